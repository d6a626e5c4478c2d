//! Stackpanel: the layout pass of a retained-mode 2D control tree.
//!
//! Controls live in an arena [`Tree`] and are laid out top-down: every control
//! resolves its own region from the region its parent hands it, containers
//! then lay out their children and may ask for another iteration when their
//! own size changed as a result.
//!
//! # Quick Start
//!
//! - [`Tree`] - The arena, its host, and the layout entry point
//! - [`StackPanel`] - A container that stacks children and sizes to them
//! - [`Widget`] - The trait implemented by all controls
//!
//! # Module Organization
//!
//! - [`dimension`] - Length values and their parsing
//! - [`host`] - Render surface, adaptive scaling, and layout options
//! - [`layout`] - The measure pass and its counters

#![warn(missing_docs)]

/// Control alignment within a parent region.
pub mod align;
/// Per-node access for widget hooks.
pub mod context;
pub mod dimension;
/// Error types.
pub mod error;
pub mod host;
/// Node identifiers.
pub mod id;
pub mod layout;
/// Control names.
pub mod name;
/// Node storage.
pub mod node;
pub mod stack;
/// Control arena.
pub mod tree;
pub mod widget;

pub use align::{HorizontalAlignment, VerticalAlignment};
pub use context::NodeContext;
pub use dimension::{DimensionValue, LengthInput, Unit};
pub use error::{Error, ParseError, Result};
pub use geom;
pub use host::{AdaptiveScaling, Host, HostConfig, LayoutOptions};
pub use id::{NodeId, TypedId};
pub use layout::LayoutStats;
pub use name::NodeName;
pub use node::Node;
pub use stack::StackPanel;
pub use tree::Tree;
pub use widget::{Container, Control, Widget};
