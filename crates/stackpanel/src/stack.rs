//! Linear stacking container.
//!
//! A [`StackPanel`] places its visible children one after another along its
//! axis and, unless the caller fixed a dimension, sizes itself to its
//! content: the sum of the children's extents along the axis and the largest
//! child across it.
//!
//! Two per-axis flags keep this stable across passes. The panel's
//! `manual_width`/`manual_height` record that the caller authored a
//! dimension, which auto-sizing then leaves alone. Each written value's
//! `ignore_adaptive_scaling` flag records that a change has already been
//! signalled, so rewriting an unchanged offset or size does not trigger
//! another pass.

use geom::{Axis, Measure, Size};
use scopeguard::guard;

use crate::{
    align::{HorizontalAlignment, VerticalAlignment},
    context::NodeContext,
    dimension::LengthInput,
    error::Result,
    name::NodeName,
    widget::Widget,
};

/// Container that stacks its children vertically or horizontally.
#[derive(Debug)]
pub struct StackPanel {
    /// Optional identification name.
    name: Option<NodeName>,
    /// Stacking axis flag.
    is_vertical: bool,
    /// Width was set by the caller.
    manual_width: bool,
    /// Height was set by the caller.
    manual_height: bool,
    /// Set while the panel writes back its own computed size.
    tracking_suspended: bool,
}

impl Default for StackPanel {
    fn default() -> Self {
        Self {
            name: None,
            is_vertical: true,
            manual_width: false,
            manual_height: false,
            tracking_suspended: false,
        }
    }
}

impl StackPanel {
    /// A vertical stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// A named vertical stack.
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(NodeName::convert(name)),
            ..Self::default()
        }
    }

    /// Builder: horizontal stacking.
    pub fn horizontal(mut self) -> Self {
        self.is_vertical = false;
        self
    }

    /// True if children stack top to bottom.
    pub fn is_vertical(&self) -> bool {
        self.is_vertical
    }

    /// The stacking axis.
    pub fn axis(&self) -> Axis {
        Axis::from_vertical(self.is_vertical)
    }

    /// Switch the stacking axis. Children are realigned on the next pre-measure.
    pub fn set_is_vertical(&mut self, ctx: &mut NodeContext<'_>, vertical: bool) -> Result<()> {
        if self.is_vertical == vertical {
            return Ok(());
        }
        self.is_vertical = vertical;
        ctx.mark_as_dirty()
    }

    /// True once the caller has set the width.
    pub fn manual_width(&self) -> bool {
        self.manual_width
    }

    /// True once the caller has set the height.
    pub fn manual_height(&self) -> bool {
        self.manual_height
    }

    /// True only while the panel writes back its computed size.
    pub fn is_tracking_suspended(&self) -> bool {
        self.tracking_suspended
    }

    /// Manual flag for the dimension along `axis`.
    fn manual_mut(&mut self, axis: Axis) -> &mut bool {
        match axis {
            Axis::Horizontal => &mut self.manual_width,
            Axis::Vertical => &mut self.manual_height,
        }
    }

    /// Place visible children along the axis and return the content size.
    fn stack_children(&self, ctx: &mut NodeContext<'_>) -> Result<Size> {
        let axis = self.axis();
        let mut main = 0.0f32;
        let mut cross = 0.0f32;
        for child in ctx.children()? {
            let tree = ctx.tree_mut();
            let node = tree.get(child)?;
            if !node.visible() || node.not_renderable() {
                continue;
            }
            let extent = node.current_measure().size();

            tree.set_offset(child, axis, main)?;
            if !tree.get(child)?.offset(axis).ignore_adaptive_scaling() {
                tree.mark_as_dirty(child)?;
            }
            tree.get_mut(child)?
                .offset_mut(axis)
                .set_ignore_adaptive_scaling(true);
            tracing::trace!("{} offset {}px", tree.get(child)?.name(), main);

            main += extent.main(axis);
            if extent.cross(axis) > cross {
                cross = extent.cross(axis);
            }
        }
        Ok(Size::from_main_cross(axis, main, cross))
    }

    /// Write the content size into every non-manual dimension. Returns true
    /// if either dimension changed.
    fn write_back_size(&mut self, ctx: &mut NodeContext<'_>, content: Size) -> Result<bool> {
        let mut panel = guard(self, |panel| panel.tracking_suspended = false);
        panel.tracking_suspended = true;

        let host = *ctx.host();
        let previous_width = ctx.node()?.width().to_display(&host);
        let previous_height = ctx.node()?.height().to_display(&host);

        if !panel.manual_height {
            panel.set_size(ctx, Axis::Vertical, LengthInput::Pixels(content.height))?;
        }
        if !panel.manual_width {
            panel.set_size(ctx, Axis::Horizontal, LengthInput::Pixels(content.width))?;
        }

        let node = ctx.node_mut()?;
        let width_changed = previous_width != node.width().to_display(&host)
            || !node.width().ignore_adaptive_scaling();
        let height_changed = previous_height != node.height().to_display(&host)
            || !node.height().ignore_adaptive_scaling();
        if height_changed {
            node.height.set_ignore_adaptive_scaling(true);
        }
        if width_changed {
            node.width.set_ignore_adaptive_scaling(true);
        }
        Ok(width_changed || height_changed)
    }
}

impl Widget for StackPanel {
    fn is_container(&self) -> bool {
        true
    }

    fn pre_measure(&mut self, ctx: &mut NodeContext<'_>, parent: Measure) -> Result<()> {
        for child in ctx.children()? {
            if self.is_vertical {
                ctx.tree_mut()
                    .set_vertical_alignment(child, VerticalAlignment::Top)?;
            } else {
                ctx.tree_mut()
                    .set_horizontal_alignment(child, HorizontalAlignment::Left)?;
            }
        }
        ctx.base_pre_measure(parent)
    }

    fn additional_processing(&mut self, ctx: &mut NodeContext<'_>, parent: Measure) -> Result<()> {
        ctx.base_additional_processing(parent)?;
        let node = ctx.node_mut()?;
        node.measure_for_children.copy_from(&parent);
        node.measure_for_children.left = node.current_measure.left;
        node.measure_for_children.top = node.current_measure.top;
        Ok(())
    }

    fn post_measure(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        let content = self.stack_children(ctx)?;
        if self.write_back_size(ctx, content)? {
            tracing::debug!(
                "{} resized to {}x{}, rebuilding",
                ctx.node()?.name(),
                content.width,
                content.height
            );
            ctx.request_rebuild()?;
        }
        ctx.base_post_measure()
    }

    fn set_size(
        &mut self,
        ctx: &mut NodeContext<'_>,
        axis: Axis,
        value: LengthInput,
    ) -> Result<()> {
        if !self.tracking_suspended {
            *self.manual_mut(axis) = true;
        }
        ctx.assign_size(axis, value)
    }

    fn name(&self) -> NodeName {
        self.name
            .clone()
            .unwrap_or_else(|| NodeName::convert("StackPanel"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        host::{AdaptiveScaling, Host},
        id::{NodeId, TypedId},
        tree::Tree,
        widget::Control,
    };

    /// A widget with no overrides.
    struct Plain;

    impl Widget for Plain {}

    fn setup(sizes: &[(f32, f32)]) -> Result<(Tree, TypedId<StackPanel>, Vec<NodeId>)> {
        let mut tree = Tree::new(Host::new(Size::new(800.0, 600.0)));
        let stack = tree.add_child(tree.root_id(), StackPanel::named("menu"))?;
        let mut children = Vec::new();
        for (w, h) in sizes {
            let c = tree.add_child(stack, Control::new())?;
            tree.set_width(c, *w)?;
            tree.set_height(c, *h)?;
            children.push(c.id());
        }
        Ok((tree, stack, children))
    }

    #[test]
    fn guard_released_after_write_back() -> Result<()> {
        let (mut tree, stack, _) = setup(&[(5.0, 10.0)])?;
        tree.post_measure(stack)?;
        assert!(!tree.widget::<StackPanel>(stack)?.is_tracking_suspended());
        assert!(!tree.widget::<StackPanel>(stack)?.manual_width());
        assert!(!tree.widget::<StackPanel>(stack)?.manual_height());
        Ok(())
    }

    #[test]
    fn guard_released_on_error_path() -> Result<()> {
        let mut tree = Tree::new(Host::default());
        let mut panel = StackPanel::new();
        let mut ctx = NodeContext::new(&mut tree, NodeId::default());
        let err = panel.write_back_size(&mut ctx, Size::new(1.0, 1.0));
        assert!(matches!(err, Err(Error::NodeNotFound(_))));
        assert!(!panel.is_tracking_suspended());
        Ok(())
    }

    #[test]
    fn first_post_measure_rebuilds_second_does_not() -> Result<()> {
        let (mut tree, stack, _) = setup(&[(5.0, 10.0), (15.0, 20.0)])?;
        assert!(tree.post_measure(stack)?);
        assert!(!tree.post_measure(stack)?);
        Ok(())
    }

    #[test]
    fn offsets_marked_once() -> Result<()> {
        let (mut tree, stack, children) = setup(&[(5.0, 10.0)])?;
        tree.update_layout()?;
        assert!(!tree.get(children[0])?.is_dirty());
        assert!(tree.get(children[0])?.top().ignore_adaptive_scaling());
        tree.post_measure(stack)?;
        assert!(!tree.get(children[0])?.is_dirty());
        Ok(())
    }

    #[test]
    fn axis_switch_marks_dirty() -> Result<()> {
        let (mut tree, stack, _) = setup(&[(5.0, 10.0)])?;
        tree.update_layout()?;
        assert!(!tree.needs_layout());
        tree.with_typed(stack, |panel, ctx| panel.set_is_vertical(ctx, true))?;
        assert!(!tree.needs_layout());
        tree.with_typed(stack, |panel, ctx| panel.set_is_vertical(ctx, false))?;
        assert!(tree.get(stack.id())?.is_dirty());
        assert!(tree.needs_layout());
        Ok(())
    }

    #[test]
    fn write_back_is_exact_under_scaling() -> Result<()> {
        let (mut tree, stack, children) = setup(&[(5.0, 10.0), (15.0, 20.0)])?;
        tree.set_scaling(AdaptiveScaling {
            ideal_width: Some(400.0),
            ..AdaptiveScaling::default()
        });
        tree.update_layout()?;
        // Authored child sizes scale; the stack's written offsets and size do not.
        assert_eq!(tree.height(children[0])?, "20px");
        assert_eq!(tree.top(children[1])?, "20px");
        assert_eq!(tree.height(stack)?, "60px");
        assert_eq!(tree.width(stack)?, "30px");
        Ok(())
    }

    #[test]
    fn non_stack_widgets_keep_base_setter() -> Result<()> {
        let mut tree = Tree::new(Host::default());
        let b = tree.add_child(tree.root_id(), Plain)?;
        tree.set_height(b, "3px")?;
        assert_eq!(tree.height(b)?, "3px");
        assert!(matches!(
            tree.widget::<StackPanel>(b),
            Err(Error::WidgetType(_))
        ));
        Ok(())
    }
}
