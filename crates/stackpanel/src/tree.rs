use std::any::{Any, type_name};

use geom::{Axis, Measure, Size};
use slotmap::SlotMap;

use crate::{
    align::{HorizontalAlignment, VerticalAlignment},
    context::NodeContext,
    dimension::LengthInput,
    error::{Error, Result},
    host::{AdaptiveScaling, Host},
    id::{NodeId, TypedId},
    layout::{LayoutPass, LayoutStats},
    node::Node,
    widget::{Container, Widget},
};

/// Arena of controls plus the host they are laid out on.
///
/// Nodes own their children by id and refer to their parent by id, so dirty
/// signals can bubble upward without shared ownership.
pub struct Tree {
    /// Node storage arena.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root container.
    pub(crate) root: NodeId,
    /// Layout host.
    pub(crate) host: Host,
    /// Counters from layout passes.
    pub(crate) stats: LayoutStats,
}

impl Tree {
    /// Create a tree with an empty root container.
    pub fn new(host: Host) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(Node::new(Box::new(Container::named("root"))));
        Self {
            nodes,
            root,
            host,
            stats: LayoutStats::default(),
        }
    }

    /// The root container.
    pub fn root_id(&self) -> NodeId {
        self.root
    }

    /// The layout host.
    pub fn host(&self) -> &Host {
        &self.host
    }

    /// Resize the host. Every node is re-laid out on the next pass.
    pub fn set_host_size(&mut self, size: Size) {
        if self.host.size == size {
            return;
        }
        self.host.size = size;
        self.mark_all_as_dirty();
    }

    /// Replace adaptive scaling settings.
    pub fn set_scaling(&mut self, scaling: AdaptiveScaling) {
        if self.host.scaling == scaling {
            return;
        }
        self.host.scaling = scaling;
        self.mark_all_as_dirty();
    }

    /// Counters accumulated over layout passes.
    pub fn stats(&self) -> LayoutStats {
        self.stats
    }

    /// Reset layout counters.
    pub fn reset_stats(&mut self) {
        self.stats = LayoutStats::default();
    }

    /// Look up a node.
    pub fn node(&self, node_id: impl Into<NodeId>) -> Option<&Node> {
        self.nodes.get(node_id.into())
    }

    /// Look up a node, failing if it is missing.
    pub fn get(&self, node_id: NodeId) -> Result<&Node> {
        self.nodes.get(node_id).ok_or(Error::NodeNotFound(node_id))
    }

    /// Mutable lookup, failing if the node is missing.
    pub(crate) fn get_mut(&mut self, node_id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(node_id).ok_or(Error::NodeNotFound(node_id))
    }

    /// Children of a node in stacking order.
    pub fn children(&self, node_id: impl Into<NodeId>) -> Result<&[NodeId]> {
        Ok(&self.get(node_id.into())?.children)
    }

    /// Add a detached node.
    pub fn add<W: Widget>(&mut self, widget: W) -> TypedId<W> {
        TypedId::new(self.add_boxed(Box::new(widget)))
    }

    /// Add a detached node from a boxed widget.
    pub fn add_boxed(&mut self, widget: Box<dyn Widget>) -> NodeId {
        self.nodes.insert(Node::new(widget))
    }

    /// Add a node and append it to `parent`'s children.
    pub fn add_child<W: Widget>(
        &mut self,
        parent: impl Into<NodeId>,
        widget: W,
    ) -> Result<TypedId<W>> {
        let parent = parent.into();
        if !self.get(parent)?.is_container {
            return Err(Error::NotAContainer(parent));
        }
        let child = self.add(widget);
        self.attach(parent, child)?;
        Ok(child)
    }

    /// Append a detached node to `parent`'s children.
    pub fn attach(&mut self, parent: impl Into<NodeId>, child: impl Into<NodeId>) -> Result<()> {
        let parent = parent.into();
        let child = child.into();
        self.check_attach(parent, child)?;
        if self.get(child)?.parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        self.get_mut(child)?.parent = Some(parent);
        self.get_mut(parent)?.children.push(child);
        self.mark_as_dirty(parent)
    }

    /// Validate a parent/child pairing.
    fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<()> {
        if !self.get(parent)?.is_container {
            return Err(Error::NotAContainer(parent));
        }
        self.get(child)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        Ok(())
    }

    /// Detach a node from its parent if attached.
    pub fn detach(&mut self, child: impl Into<NodeId>) -> Result<()> {
        let child = child.into();
        let Some(parent) = self.get(child)?.parent else {
            return Ok(());
        };
        self.get_mut(child)?.parent = None;
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|id| *id != child);
        }
        self.mark_as_dirty(parent)
    }

    /// Replace a container's children, preserving the given order.
    pub fn set_children(&mut self, parent: impl Into<NodeId>, children: Vec<NodeId>) -> Result<()> {
        let parent = parent.into();
        for (i, child) in children.iter().enumerate() {
            self.check_attach(parent, *child)?;
            if children[..i].contains(child) {
                return Err(Error::Invalid(format!("duplicate child {child:?}")));
            }
        }
        let old = std::mem::take(&mut self.get_mut(parent)?.children);
        for child in old {
            if let Some(node) = self.nodes.get_mut(child) {
                node.parent = None;
            }
        }
        for child in &children {
            self.detach(*child)?;
            self.get_mut(*child)?.parent = Some(parent);
        }
        self.get_mut(parent)?.children = children;
        self.mark_as_dirty(parent)
    }

    /// Remove a node and all of its descendants.
    pub fn remove_subtree(&mut self, node_id: impl Into<NodeId>) -> Result<()> {
        let node_id = node_id.into();
        if node_id == self.root {
            return Err(Error::Invalid("cannot remove the root node".into()));
        }
        self.detach(node_id)?;
        let mut stack = vec![node_id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.remove(id) {
                stack.extend(node.children);
            }
        }
        Ok(())
    }

    /// True if `ancestor` is a strict ancestor of `node`.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.nodes.get(node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Mark a node and all its ancestors for re-layout. Hidden nodes are skipped.
    pub fn mark_as_dirty(&mut self, node_id: impl Into<NodeId>) -> Result<()> {
        self.mark_dirty_inner(node_id.into(), false)
    }

    /// Mark a node and its ancestors dirty, optionally even when hidden.
    fn mark_dirty_inner(&mut self, node_id: NodeId, force: bool) -> Result<()> {
        if !self.get(node_id)?.visible && !force {
            return Ok(());
        }
        let mut current = Some(node_id);
        while let Some(id) = current {
            let Some(node) = self.nodes.get_mut(id) else {
                break;
            };
            node.dirty = true;
            current = node.parent;
        }
        Ok(())
    }

    /// Mark every node dirty.
    pub fn mark_all_as_dirty(&mut self) {
        for (_id, node) in self.nodes.iter_mut() {
            node.dirty = true;
        }
    }

    /// True if a layout pass has pending work.
    pub fn needs_layout(&self) -> bool {
        self.nodes[self.root].dirty
    }

    /// Set the offset along `axis` (`top` for vertical, `left` for horizontal).
    pub fn set_offset(
        &mut self,
        node_id: impl Into<NodeId>,
        axis: Axis,
        value: impl Into<LengthInput>,
    ) -> Result<()> {
        let node_id = node_id.into();
        let source = value.into().into_source();
        if self.get_mut(node_id)?.offset_mut(axis).from_source(&source) {
            self.mark_as_dirty(node_id)?;
        }
        Ok(())
    }

    /// Set the left offset.
    pub fn set_left(
        &mut self,
        node_id: impl Into<NodeId>,
        value: impl Into<LengthInput>,
    ) -> Result<()> {
        self.set_offset(node_id, Axis::Horizontal, value)
    }

    /// Set the top offset.
    pub fn set_top(
        &mut self,
        node_id: impl Into<NodeId>,
        value: impl Into<LengthInput>,
    ) -> Result<()> {
        self.set_offset(node_id, Axis::Vertical, value)
    }

    /// Set width (`Axis::Horizontal`) or height (`Axis::Vertical`) through the
    /// widget's setter.
    pub fn set_size(
        &mut self,
        node_id: impl Into<NodeId>,
        axis: Axis,
        value: impl Into<LengthInput>,
    ) -> Result<()> {
        let node_id = node_id.into();
        let value = value.into();
        self.with_widget_mut(node_id, |w, tree| {
            w.set_size(&mut NodeContext::new(tree, node_id), axis, value)
        })?
    }

    /// Set the width.
    pub fn set_width(
        &mut self,
        node_id: impl Into<NodeId>,
        value: impl Into<LengthInput>,
    ) -> Result<()> {
        self.set_size(node_id, Axis::Horizontal, value)
    }

    /// Set the height.
    pub fn set_height(
        &mut self,
        node_id: impl Into<NodeId>,
        value: impl Into<LengthInput>,
    ) -> Result<()> {
        self.set_size(node_id, Axis::Vertical, value)
    }

    /// Display string of the width.
    pub fn width(&self, node_id: impl Into<NodeId>) -> Result<String> {
        Ok(self.get(node_id.into())?.width.to_display(&self.host))
    }

    /// Display string of the height.
    pub fn height(&self, node_id: impl Into<NodeId>) -> Result<String> {
        Ok(self.get(node_id.into())?.height.to_display(&self.host))
    }

    /// Display string of the left offset.
    pub fn left(&self, node_id: impl Into<NodeId>) -> Result<String> {
        Ok(self.get(node_id.into())?.left.to_display(&self.host))
    }

    /// Display string of the top offset.
    pub fn top(&self, node_id: impl Into<NodeId>) -> Result<String> {
        Ok(self.get(node_id.into())?.top.to_display(&self.host))
    }

    /// Region a node occupied after the last pass.
    pub fn measure(&self, node_id: impl Into<NodeId>) -> Result<Measure> {
        Ok(self.get(node_id.into())?.current_measure)
    }

    /// Set horizontal alignment.
    pub fn set_horizontal_alignment(
        &mut self,
        node_id: impl Into<NodeId>,
        alignment: HorizontalAlignment,
    ) -> Result<()> {
        let node_id = node_id.into();
        let node = self.get_mut(node_id)?;
        if node.horizontal_alignment == alignment {
            return Ok(());
        }
        node.horizontal_alignment = alignment;
        self.mark_as_dirty(node_id)
    }

    /// Set vertical alignment.
    pub fn set_vertical_alignment(
        &mut self,
        node_id: impl Into<NodeId>,
        alignment: VerticalAlignment,
    ) -> Result<()> {
        let node_id = node_id.into();
        let node = self.get_mut(node_id)?;
        if node.vertical_alignment == alignment {
            return Ok(());
        }
        node.vertical_alignment = alignment;
        self.mark_as_dirty(node_id)
    }

    /// Show or hide a node. Hiding still marks the node dirty.
    pub fn set_visible(&mut self, node_id: impl Into<NodeId>, visible: bool) -> Result<()> {
        let node_id = node_id.into();
        let node = self.get_mut(node_id)?;
        if node.visible == visible {
            return Ok(());
        }
        node.visible = visible;
        self.mark_dirty_inner(node_id, true)
    }

    /// Exclude a node from rendering and stacking.
    pub fn set_not_renderable(
        &mut self,
        node_id: impl Into<NodeId>,
        not_renderable: bool,
    ) -> Result<()> {
        let node_id = node_id.into();
        let node = self.get_mut(node_id)?;
        if node.not_renderable == not_renderable {
            return Ok(());
        }
        node.not_renderable = not_renderable;
        self.mark_as_dirty(node_id)
    }

    /// Take a node's widget out of its slot for a single call.
    pub(crate) fn with_widget_mut<R>(
        &mut self,
        node_id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Self) -> R,
    ) -> Result<R> {
        let mut widget = self
            .get_mut(node_id)?
            .widget
            .take()
            .ok_or(Error::ReentrantWidgetBorrow(node_id))?;
        let out = f(widget.as_mut(), self);
        if let Some(node) = self.nodes.get_mut(node_id) {
            node.widget = Some(widget);
        }
        Ok(out)
    }

    /// Execute a closure with mutable access to a widget of type `W`.
    pub fn with_widget<W, R>(
        &mut self,
        node_id: impl Into<NodeId>,
        f: impl FnOnce(&mut W, &mut NodeContext<'_>) -> Result<R>,
    ) -> Result<R>
    where
        W: Widget,
    {
        let node_id = node_id.into();
        self.with_widget_mut(node_id, |widget, tree| {
            let any = widget as &mut dyn Any;
            let widget = any
                .downcast_mut::<W>()
                .ok_or_else(|| Error::WidgetType(type_name::<W>().into()))?;
            f(widget, &mut NodeContext::new(tree, node_id))
        })?
    }

    /// Execute a closure with mutable access to a widget using a typed node ID.
    pub fn with_typed<W, R>(
        &mut self,
        node_id: TypedId<W>,
        f: impl FnOnce(&mut W, &mut NodeContext<'_>) -> Result<R>,
    ) -> Result<R>
    where
        W: Widget,
    {
        self.with_widget(node_id, f)
    }

    /// Borrow a widget of type `W`.
    pub fn widget<W: Widget>(&self, node_id: impl Into<NodeId>) -> Result<&W> {
        let node_id = node_id.into();
        let widget = self
            .get(node_id)?
            .widget
            .as_deref()
            .ok_or(Error::ReentrantWidgetBorrow(node_id))?;
        (widget as &dyn Any)
            .downcast_ref::<W>()
            .ok_or_else(|| Error::WidgetType(type_name::<W>().into()))
    }

    /// Run a node's pre-measure hook against `parent`.
    pub fn pre_measure(&mut self, node_id: impl Into<NodeId>, parent: Measure) -> Result<()> {
        let node_id = node_id.into();
        self.with_widget_mut(node_id, |w, tree| {
            w.pre_measure(&mut NodeContext::new(tree, node_id), parent)
        })?
    }

    /// Run a node's additional-processing hook against `parent`.
    pub fn additional_processing(
        &mut self,
        node_id: impl Into<NodeId>,
        parent: Measure,
    ) -> Result<()> {
        let node_id = node_id.into();
        self.with_widget_mut(node_id, |w, tree| {
            w.additional_processing(&mut NodeContext::new(tree, node_id), parent)
        })?
    }

    /// Run a node's post-measure hook. Returns true if the hook requested
    /// another measure iteration.
    pub fn post_measure(&mut self, node_id: impl Into<NodeId>) -> Result<bool> {
        let node_id = node_id.into();
        self.get_mut(node_id)?.rebuild_layout = false;
        self.with_widget_mut(node_id, |w, tree| {
            w.post_measure(&mut NodeContext::new(tree, node_id))
        })??;
        Ok(self.get(node_id)?.rebuild_layout)
    }

    /// Lay out the whole tree in the host region.
    pub fn update_layout(&mut self) -> Result<()> {
        let root = self.root;
        let region = self.host.region();
        tracing::debug!("layout pass over {}x{}", region.width, region.height);
        LayoutPass::new(self).layout_control(root, region)?;
        Ok(())
    }
}
