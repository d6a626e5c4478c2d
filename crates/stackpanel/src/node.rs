use geom::{Axis, Measure};

use crate::{
    align::{HorizontalAlignment, VerticalAlignment},
    dimension::DimensionValue,
    host::Host,
    id::NodeId,
    name::NodeName,
    widget::Widget,
};

/// Core control data stored in the arena.
pub struct Node {
    /// Widget behavior and state. Empty while the widget is checked out.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Cached from the widget at insertion.
    pub(crate) is_container: bool,

    /// Parent in the arena tree.
    pub(crate) parent: Option<NodeId>,
    /// Children in stacking order.
    pub(crate) children: Vec<NodeId>,
    /// Control name.
    pub(crate) name: NodeName,

    /// Offset from the aligned left edge.
    pub(crate) left: DimensionValue,
    /// Offset from the aligned top edge.
    pub(crate) top: DimensionValue,
    /// Requested width.
    pub(crate) width: DimensionValue,
    /// Requested height.
    pub(crate) height: DimensionValue,
    /// Horizontal placement in the parent region.
    pub(crate) horizontal_alignment: HorizontalAlignment,
    /// Vertical placement in the parent region.
    pub(crate) vertical_alignment: VerticalAlignment,

    /// Visibility.
    pub(crate) visible: bool,
    /// Excluded from rendering and stacking.
    pub(crate) not_renderable: bool,
    /// Needs re-layout.
    pub(crate) dirty: bool,
    /// Set during post-measure to request another measure iteration.
    pub(crate) rebuild_layout: bool,

    /// Region occupied by this control after the last pass.
    pub(crate) current_measure: Measure,
    /// Region handed to children.
    pub(crate) measure_for_children: Measure,
    /// Parent region used in the last pass.
    pub(crate) cached_parent_measure: Measure,
}

impl Node {
    /// Build a detached node around a widget.
    pub(crate) fn new(widget: Box<dyn Widget>) -> Self {
        Self {
            is_container: widget.is_container(),
            name: widget.name(),
            widget: Some(widget),
            parent: None,
            children: Vec::new(),
            left: DimensionValue::pixels(0.0),
            top: DimensionValue::pixels(0.0),
            width: DimensionValue::percent(100.0),
            height: DimensionValue::percent(100.0),
            horizontal_alignment: HorizontalAlignment::default(),
            vertical_alignment: VerticalAlignment::default(),
            visible: true,
            not_renderable: false,
            dirty: true,
            rebuild_layout: false,
            current_measure: Measure::empty(),
            measure_for_children: Measure::empty(),
            cached_parent_measure: Measure::empty(),
        }
    }

    /// Return the control name.
    pub fn name(&self) -> &NodeName {
        &self.name
    }

    /// Return the node's parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Return the node's children.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// True if the node accepts children.
    pub fn is_container(&self) -> bool {
        self.is_container
    }

    /// Left offset value.
    pub fn left(&self) -> &DimensionValue {
        &self.left
    }

    /// Top offset value.
    pub fn top(&self) -> &DimensionValue {
        &self.top
    }

    /// Width value.
    pub fn width(&self) -> &DimensionValue {
        &self.width
    }

    /// Height value.
    pub fn height(&self) -> &DimensionValue {
        &self.height
    }

    /// Offset value along `axis`: `top` for vertical, `left` for horizontal.
    pub fn offset(&self, axis: Axis) -> &DimensionValue {
        match axis {
            Axis::Vertical => &self.top,
            Axis::Horizontal => &self.left,
        }
    }

    /// Mutable offset value along `axis`.
    pub(crate) fn offset_mut(&mut self, axis: Axis) -> &mut DimensionValue {
        match axis {
            Axis::Vertical => &mut self.top,
            Axis::Horizontal => &mut self.left,
        }
    }

    /// Size value along `axis`: `height` for vertical, `width` for horizontal.
    pub fn size_value(&self, axis: Axis) -> &DimensionValue {
        match axis {
            Axis::Vertical => &self.height,
            Axis::Horizontal => &self.width,
        }
    }

    /// Mutable size value along `axis`.
    pub(crate) fn size_value_mut(&mut self, axis: Axis) -> &mut DimensionValue {
        match axis {
            Axis::Vertical => &mut self.height,
            Axis::Horizontal => &mut self.width,
        }
    }

    /// Horizontal alignment.
    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    /// Vertical alignment.
    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    /// Return true if the node is visible.
    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Return true if the node is excluded from rendering.
    pub fn not_renderable(&self) -> bool {
        self.not_renderable
    }

    /// Return true if the node awaits re-layout.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Return true if the last post-measure requested another iteration.
    pub fn rebuild_layout(&self) -> bool {
        self.rebuild_layout
    }

    /// Region occupied after the last pass.
    pub fn current_measure(&self) -> Measure {
        self.current_measure
    }

    /// Region handed to children in the last pass.
    pub fn measure_for_children(&self) -> Measure {
        self.measure_for_children
    }

    /// Resolve own size from `width`/`height`. `current_measure` holds the
    /// parent region on entry.
    pub(crate) fn measure_self(&mut self, host: &Host) {
        self.current_measure.width = self.width.pixels_in(host, self.current_measure.width);
        self.current_measure.height = self.height.pixels_in(host, self.current_measure.height);
    }

    /// Place the measured size inside `parent` by alignment and offsets.
    pub(crate) fn compute_alignment(&mut self, host: &Host, parent: Measure) {
        let m = &mut self.current_measure;
        let x = self.horizontal_alignment.offset(m.width, parent.width)
            + self.left.pixels_in(host, parent.width);
        let y = self.vertical_alignment.offset(m.height, parent.height)
            + self.top.pixels_in(host, parent.height);
        m.left += x;
        m.top += y;
    }
}

#[cfg(test)]
mod tests {
    use geom::Size;

    use super::*;
    use crate::widget::Control;

    #[test]
    fn measure_and_align() {
        let host = Host::new(Size::new(100.0, 100.0));
        let parent = Measure::new(10.0, 20.0, 100.0, 50.0);
        let mut node = Node::new(Box::new(Control::new()));
        node.width = DimensionValue::percent(50.0);
        node.height = DimensionValue::pixels(10.0);
        node.horizontal_alignment = HorizontalAlignment::Right;
        node.vertical_alignment = VerticalAlignment::Top;
        node.top = DimensionValue::pixels(5.0);
        node.current_measure = parent;
        node.measure_self(&host);
        node.compute_alignment(&host, parent);
        assert_eq!(node.current_measure, Measure::new(60.0, 25.0, 50.0, 10.0));
    }
}
