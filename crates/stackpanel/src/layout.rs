//! The measure/arrange pass.
//!
//! Each control resolves its region from the parent region in a fixed hook
//! order (see [`Widget`](crate::widget::Widget)). Containers then lay out
//! their children inside `measure_for_children` and run post-measure, looping
//! while post-measure requests a rebuild, up to
//! [`LayoutOptions::max_layout_cycle`](crate::host::LayoutOptions) iterations.

use geom::Measure;

use crate::{error::Result, id::NodeId, tree::Tree};

/// Counters accumulated over layout passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutStats {
    /// Controls visited.
    pub layout_calls: u64,
    /// Measure iterations beyond the first, across all controls.
    pub rebuilds: u64,
    /// Controls that exhausted their iteration budget still wanting a rebuild.
    pub layout_cycles: u64,
}

/// A single traversal of the tree.
pub(crate) struct LayoutPass<'a> {
    /// Tree being updated.
    tree: &'a mut Tree,
}

impl<'a> LayoutPass<'a> {
    /// Create a pass over a tree.
    pub(crate) fn new(tree: &'a mut Tree) -> Self {
        Self { tree }
    }

    /// Lay out a control inside `parent`. Returns false if the control was
    /// skipped because it is clean and not displayed.
    pub(crate) fn layout_control(&mut self, node_id: NodeId, parent: Measure) -> Result<bool> {
        let node = self.tree.get(node_id)?;
        if !node.dirty && (!node.visible || node.not_renderable) {
            return Ok(false);
        }
        let is_container = node.is_container;
        let stale = node.dirty || !node.cached_parent_measure.is_equals_to(&parent);
        self.tree.stats.layout_calls += 1;

        if is_container {
            self.layout_container(node_id, parent)?;
        } else if stale {
            self.iterate(node_id, |pass| pass.process_measures(node_id, parent))?;
        }

        // Marks raised on children after they were placed keep the node dirty.
        let pending = self.dirty_children(node_id)?;
        self.tree.get_mut(node_id)?.dirty = pending;
        Ok(true)
    }

    /// True if any child of `node_id` still awaits layout.
    fn dirty_children(&self, node_id: NodeId) -> Result<bool> {
        let node = self.tree.get(node_id)?;
        for child in &node.children {
            if self.tree.get(*child)?.dirty {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Measure a container, lay out its children, and post-measure.
    fn layout_container(&mut self, node_id: NodeId, parent: Measure) -> Result<()> {
        self.iterate(node_id, |pass| {
            pass.process_measures(node_id, parent)?;
            let node = pass.tree.get(node_id)?;
            let region = node.measure_for_children;
            for child in node.children.clone() {
                pass.layout_control(child, region)?;
            }
            if !pass.tree.post_measure(node_id)? && pass.dirty_children(node_id)? {
                let node = pass.tree.get_mut(node_id)?;
                tracing::debug!("{} has children marked during post-measure", node.name);
                node.rebuild_layout = true;
            }
            Ok(())
        })
    }

    /// Run `step` until the node stops requesting a rebuild or the iteration
    /// budget is spent.
    fn iterate(
        &mut self,
        node_id: NodeId,
        mut step: impl FnMut(&mut Self) -> Result<()>,
    ) -> Result<()> {
        let max = self.tree.host.options.max_layout_cycle.max(1);
        let mut count = 0;
        loop {
            self.tree.get_mut(node_id)?.rebuild_layout = false;
            step(self)?;
            count += 1;
            if !self.tree.get(node_id)?.rebuild_layout || count >= max {
                break;
            }
        }
        self.tree.stats.rebuilds += (count - 1) as u64;

        let node = self.tree.get(node_id)?;
        let name = node.name.clone();
        if node.rebuild_layout {
            self.tree.stats.layout_cycles += 1;
            if self.tree.host.options.log_layout_cycle_errors {
                tracing::error!(
                    "layout cycle detected in {} ({:?}) after {} iterations",
                    name,
                    node_id,
                    count
                );
            }
        } else if count > 1 {
            tracing::debug!("{} settled after {} iterations", name, count);
        }
        Ok(())
    }

    /// Resolve a control's own region from `parent`.
    fn process_measures(&mut self, node_id: NodeId, parent: Measure) -> Result<()> {
        self.tree.pre_measure(node_id, parent)?;
        let host = self.tree.host;
        let node = self.tree.get_mut(node_id)?;
        node.measure_self(&host);
        node.compute_alignment(&host, parent);
        node.current_measure = node.current_measure.truncate();
        self.tree.additional_processing(node_id, parent)?;
        self.tree.get_mut(node_id)?.cached_parent_measure = parent;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use geom::Size;

    use super::*;
    use crate::{
        align::{HorizontalAlignment, VerticalAlignment},
        context::NodeContext,
        host::{Host, LayoutOptions},
        widget::{Container, Control, Widget},
    };

    /// A container whose post-measure always asks for another iteration.
    struct Restless;

    impl Widget for Restless {
        fn is_container(&self) -> bool {
            true
        }

        fn post_measure(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
            ctx.request_rebuild()
        }
    }

    /// A container that shifts its first child once, after the child was placed.
    #[derive(Default)]
    struct Nudge {
        /// The shift has been applied.
        done: bool,
    }

    impl Widget for Nudge {
        fn is_container(&self) -> bool {
            true
        }

        fn post_measure(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
            if !self.done {
                self.done = true;
                if let Some(first) = ctx.children()?.first() {
                    ctx.tree_mut().set_top(*first, 3)?;
                }
            }
            ctx.base_post_measure()
        }
    }

    fn tree() -> Tree {
        Tree::new(Host::new(Size::new(200.0, 100.0)))
    }

    #[test]
    fn leaf_percent_and_pixel_sizes() -> Result<()> {
        let mut t = tree();
        let leaf = t.add_child(t.root_id(), Control::new())?;
        t.set_width(leaf, "50%")?;
        t.set_height(leaf, 20)?;
        t.set_horizontal_alignment(leaf, HorizontalAlignment::Left)?;
        t.set_vertical_alignment(leaf, VerticalAlignment::Bottom)?;
        t.update_layout()?;
        assert_eq!(t.measure(leaf)?, Measure::new(0.0, 80.0, 100.0, 20.0));
        Ok(())
    }

    #[test]
    fn centered_leaf_truncates() -> Result<()> {
        let mut t = tree();
        let leaf = t.add_child(t.root_id(), Control::new())?;
        t.set_width(leaf, "5px")?;
        t.set_height(leaf, "5px")?;
        t.update_layout()?;
        assert_eq!(t.measure(leaf)?, Measure::new(97.0, 47.0, 5.0, 5.0));
        Ok(())
    }

    #[test]
    fn nested_offsets_accumulate() -> Result<()> {
        let mut t = tree();
        let outer = t.add_child(t.root_id(), Container::new())?;
        t.set_width(outer, "100px")?;
        t.set_height(outer, "50px")?;
        t.set_horizontal_alignment(outer, HorizontalAlignment::Left)?;
        t.set_vertical_alignment(outer, VerticalAlignment::Top)?;
        t.set_left(outer, "10px")?;
        t.set_top(outer, "5px")?;
        let leaf = t.add_child(outer, Control::new())?;
        t.set_width(leaf, "10px")?;
        t.set_height(leaf, "10px")?;
        t.set_horizontal_alignment(leaf, HorizontalAlignment::Right)?;
        t.set_vertical_alignment(leaf, VerticalAlignment::Top)?;
        t.update_layout()?;
        assert_eq!(t.measure(outer)?, Measure::new(10.0, 5.0, 100.0, 50.0));
        assert_eq!(t.measure(leaf)?, Measure::new(100.0, 5.0, 10.0, 10.0));
        Ok(())
    }

    #[test]
    fn clean_hidden_controls_are_skipped() -> Result<()> {
        let mut t = tree();
        let leaf = t.add_child(t.root_id(), Control::new())?;
        t.set_visible(leaf, false)?;
        t.update_layout()?;
        t.reset_stats();
        t.update_layout()?;
        assert_eq!(t.stats().layout_calls, 1);
        Ok(())
    }

    #[test]
    fn clean_leaf_is_not_reprocessed() -> Result<()> {
        let mut t = tree();
        let leaf = t.add_child(t.root_id(), Control::new())?;
        t.update_layout()?;
        t.get_mut(leaf.id())?.current_measure = Measure::empty();
        t.update_layout()?;
        assert_eq!(t.measure(leaf)?, Measure::empty());
        t.mark_as_dirty(leaf)?;
        t.update_layout()?;
        assert_eq!(t.measure(leaf)?, Measure::new(0.0, 0.0, 200.0, 100.0));
        Ok(())
    }

    #[test]
    fn children_marked_in_post_measure_are_relaid() -> Result<()> {
        let mut t = tree();
        let outer = t.add_child(t.root_id(), Nudge::default())?;
        let leaf = t.add_child(outer, Control::new())?;
        t.set_height(leaf, 10)?;
        t.set_vertical_alignment(leaf, VerticalAlignment::Top)?;
        t.update_layout()?;
        assert_eq!(t.measure(leaf)?.top, 3.0);
        assert!(!t.get(leaf.id())?.is_dirty());
        assert!(!t.needs_layout());
        assert_eq!(t.stats().rebuilds, 1);
        Ok(())
    }

    #[test]
    fn layout_cycle_is_bounded() -> Result<()> {
        let mut t = Tree::new(Host::new(Size::new(10.0, 10.0)).with_options(LayoutOptions {
            max_layout_cycle: 4,
            log_layout_cycle_errors: false,
        }));
        let restless = t.add_child(t.root_id(), Restless)?;
        t.update_layout()?;
        let stats = t.stats();
        assert_eq!(stats.rebuilds, 3);
        assert_eq!(stats.layout_cycles, 1);
        assert!(t.get(restless.id())?.rebuild_layout());
        Ok(())
    }
}
