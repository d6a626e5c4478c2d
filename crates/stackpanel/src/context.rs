use geom::{Axis, Measure};

use crate::{dimension::LengthInput, error::Result, host::Host, id::NodeId, node::Node, tree::Tree};

/// Access to the tree on behalf of one control, handed to widget hooks.
pub struct NodeContext<'a> {
    /// Tree being updated.
    tree: &'a mut Tree,
    /// Node bound to this context.
    node_id: NodeId,
}

impl<'a> NodeContext<'a> {
    /// Create a new context for a node.
    pub fn new(tree: &'a mut Tree, node_id: NodeId) -> Self {
        Self { tree, node_id }
    }

    /// The bound node.
    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    /// Shared tree access.
    pub fn tree(&self) -> &Tree {
        &*self.tree
    }

    /// Mutable tree access.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut *self.tree
    }

    /// The layout host.
    pub fn host(&self) -> &Host {
        self.tree.host()
    }

    /// The bound node's data.
    pub fn node(&self) -> Result<&Node> {
        self.tree.get(self.node_id)
    }

    /// Mutable node data.
    pub(crate) fn node_mut(&mut self) -> Result<&mut Node> {
        self.tree.get_mut(self.node_id)
    }

    /// Children of the bound node, in stacking order.
    pub fn children(&self) -> Result<Vec<NodeId>> {
        Ok(self.node()?.children.clone())
    }

    /// Mark the bound node and its ancestors for re-layout.
    pub fn mark_as_dirty(&mut self) -> Result<()> {
        self.tree.mark_as_dirty(self.node_id)
    }

    /// Request another measure iteration for the bound node.
    pub fn request_rebuild(&mut self) -> Result<()> {
        self.node_mut()?.rebuild_layout = true;
        Ok(())
    }

    /// Inherited pre-measure: start from the parent region.
    pub fn base_pre_measure(&mut self, parent: Measure) -> Result<()> {
        self.node_mut()?.current_measure.copy_from(&parent);
        Ok(())
    }

    /// Inherited processing: children get this control's own region.
    pub fn base_additional_processing(&mut self, _parent: Measure) -> Result<()> {
        let node = self.node_mut()?;
        node.measure_for_children = node.current_measure;
        Ok(())
    }

    /// Inherited post-measure.
    pub fn base_post_measure(&mut self) -> Result<()> {
        Ok(())
    }

    /// Inherited width/height setter.
    ///
    /// No-op when `value` equals the current display string; otherwise the
    /// value is parsed and the node is marked dirty if it changed.
    pub fn assign_size(&mut self, axis: Axis, value: LengthInput) -> Result<()> {
        let host = *self.host();
        let source = value.into_source();
        let dimension = self.node_mut()?.size_value_mut(axis);
        if dimension.to_display(&host) == source {
            return Ok(());
        }
        if dimension.from_source(&source) {
            self.mark_as_dirty()?;
        }
        Ok(())
    }
}
