//! Protocol-level errors.
//!
//! These cover failures of the MCP plumbing itself. Failures of a LinkedIn
//! operation never surface here; tools fold them into a normalized
//! `{status: "error", kind, message}` payload.

/// MCP server error.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum McpError {
    /// No tool is registered under the requested name
    #[display("Tool not found: {_0}")]
    ToolNotFound(String),
    /// The request could not be interpreted at all
    #[display("Invalid input: {_0}")]
    InvalidInput(String),
}

impl std::error::Error for McpError {}

/// Result alias for MCP operations.
pub type McpResult<T> = Result<T, McpError>;
