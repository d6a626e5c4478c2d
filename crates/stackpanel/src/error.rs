use std::result::Result as StdResult;

use thiserror::Error;

use crate::id::NodeId;

/// Result type for stackpanel operations.
pub type Result<T> = StdResult<T, Error>;

/// A length expression that could not be parsed.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
#[error("invalid length {input:?}: {message}")]
pub struct ParseError {
    /// The rejected input.
    input: String,
    /// What was wrong with it.
    message: String,
}

impl ParseError {
    /// Construct a parse error for an input string.
    pub fn new(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            message: message.into(),
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Core error type.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// Node not present in the arena.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),
    /// Children were attached to a node that cannot hold them.
    #[error("node is not a container: {0:?}")]
    NotAContainer(NodeId),
    /// The child already has a parent.
    #[error("node already attached: {0:?}")]
    AlreadyAttached(NodeId),
    /// The attachment would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Requested parent.
        parent: NodeId,
        /// Requested child.
        child: NodeId,
    },
    /// A widget was requested while it was already checked out of its slot.
    #[error("reentrant widget borrow: {0:?}")]
    ReentrantWidgetBorrow(NodeId),
    /// A typed widget lookup hit a different widget type.
    #[error("expected widget type {0}")]
    WidgetType(String),
    #[error("invalid: {0}")]
    /// Invalid input error.
    Invalid(String),
    #[error("parse error: {0}")]
    /// Parsing failure.
    Parse(#[from] ParseError),
    #[error("config: {0}")]
    /// Configuration failure.
    Config(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
