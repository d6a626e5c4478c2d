//! Widget trait and the built-in base controls.

use std::any::{Any, type_name};

use geom::{Axis, Measure};

use crate::{context::NodeContext, dimension::LengthInput, error::Result, name::NodeName};

/// Widgets are the behavior attached to controls in the tree arena.
///
/// The measure hooks run in this order for every iteration of a control's
/// layout: [`Widget::pre_measure`], own size and alignment resolution,
/// [`Widget::additional_processing`], then (for containers, after children
/// are laid out) [`Widget::post_measure`]. Overrides call the matching
/// `base_*` method on the context to keep the inherited behavior.
pub trait Widget: Any {
    /// True if the widget arranges child controls.
    fn is_container(&self) -> bool {
        false
    }

    /// Runs before this control's region is resolved.
    fn pre_measure(&mut self, ctx: &mut NodeContext<'_>, parent: Measure) -> Result<()> {
        ctx.base_pre_measure(parent)
    }

    /// Runs after this control's region is resolved, before children are laid out.
    fn additional_processing(&mut self, ctx: &mut NodeContext<'_>, parent: Measure) -> Result<()> {
        ctx.base_additional_processing(parent)
    }

    /// Runs after children have been laid out.
    fn post_measure(&mut self, ctx: &mut NodeContext<'_>) -> Result<()> {
        ctx.base_post_measure()
    }

    /// Public width (`Axis::Horizontal`) or height (`Axis::Vertical`) setter.
    fn set_size(
        &mut self,
        ctx: &mut NodeContext<'_>,
        axis: Axis,
        value: LengthInput,
    ) -> Result<()> {
        ctx.assign_size(axis, value)
    }

    /// Name used for identification.
    fn name(&self) -> NodeName {
        let name = type_name::<Self>();
        let short = name.rsplit("::").next().unwrap_or(name);
        NodeName::convert(short)
    }
}

/// Convert widgets into boxed trait objects.
impl<W> From<W> for Box<dyn Widget>
where
    W: Widget + 'static,
{
    fn from(widget: W) -> Self {
        Box::new(widget)
    }
}

/// A plain leaf control sized by its `width` and `height`.
#[derive(Debug, Default)]
pub struct Control {
    /// Optional identification name.
    name: Option<NodeName>,
}

impl Control {
    /// An unnamed control.
    pub fn new() -> Self {
        Self::default()
    }

    /// A named control.
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(NodeName::convert(name)),
        }
    }
}

impl Widget for Control {
    fn name(&self) -> NodeName {
        self.name
            .clone()
            .unwrap_or_else(|| NodeName::convert("Control"))
    }
}

/// A container that lays every child out in its own region.
#[derive(Debug, Default)]
pub struct Container {
    /// Optional identification name.
    name: Option<NodeName>,
}

impl Container {
    /// An unnamed container.
    pub fn new() -> Self {
        Self::default()
    }

    /// A named container.
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(NodeName::convert(name)),
        }
    }
}

impl Widget for Container {
    fn is_container(&self) -> bool {
        true
    }

    fn name(&self) -> NodeName {
        self.name
            .clone()
            .unwrap_or_else(|| NodeName::convert("Container"))
    }
}
