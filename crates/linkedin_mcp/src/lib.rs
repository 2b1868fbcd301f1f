//! Model Context Protocol (MCP) server for LinkedIn.
//!
//! This crate is the orchestration facade: a fixed catalogue of tools, each
//! mapped to one operation on [`LinkedInService`], which routes scraping
//! reads to the browser session and writes to the REST API. Every tool
//! answers with a normalized `{status: "success", ...}` or
//! `{status: "error", kind, message}` object.
//!
//! # Usage
//!
//! ```no_run
//! use linkedin_core::{CredentialBundle, CredentialStore, LinkedInConfig};
//! use linkedin_mcp::{ByteTransport, LinkedInRouter, LinkedInService, RouterService, Server, ToolRegistry};
//! use std::sync::Arc;
//! use tokio::io::{stdin, stdout};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let credentials = Arc::new(CredentialStore::new(CredentialBundle::from_env()));
//!     let service = Arc::new(LinkedInService::from_config(credentials, LinkedInConfig::load()?)?);
//!     let router = LinkedInRouter::builder()
//!         .name("linkedin")
//!         .version(env!("CARGO_PKG_VERSION"))
//!         .tools(ToolRegistry::linkedin(service))
//!         .build();
//!
//!     let server = Server::new(RouterService(router));
//!     let transport = ByteTransport::new(stdin(), stdout());
//!     server.run(transport).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod outcome;
mod server;
mod service;
pub mod tools;

pub use error::{McpError, McpResult};
pub use outcome::{failure, respond, success};
pub use server::{LinkedInRouter, LinkedInRouterBuilder};
pub use service::{CredentialReport, CredentialStatus, EMPLOYEE_LIMIT, LinkedInService};
pub use tools::{McpTool, ToolRegistry};

// Server plumbing for the binary
pub use mcp_server::router::RouterService;
pub use mcp_server::{ByteTransport, Router, Server};
