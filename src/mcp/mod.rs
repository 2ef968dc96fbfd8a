//! Model Context Protocol (MCP) server implementation.
//!
//! This module implements the protocol dispatch layer: a capability-exposure
//! server that advertises a fixed catalogue of schema-described tools and
//! URI-addressable resources, validates and routes incoming requests, and
//! returns structured results or typed errors over stdio JSON-RPC 2.0.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                           MCP Server                             │
//! │                                                                  │
//! │  ┌───────────┐   ┌───────────┐   ┌──────────────┐  ┌──────────┐ │
//! │  │ Transport │──▶│  Server   │──▶│  Dispatcher  │─▶│ Handlers │ │
//! │  │  (stdio)  │   │(lifecycle)│   │ (validation, │  │ (tools,  │ │
//! │  └───────────┘   └───────────┘   │   routing)   │  │resources)│ │
//! │        │               │         └──────────────┘  └──────────┘ │
//! │        ▼               ▼                │                        │
//! │  ┌────────────────────────────┐  ┌─────────────────────────┐    │
//! │  │     JSON-RPC Messages      │  │   Registry + Router     │    │
//! │  └────────────────────────────┘  └─────────────────────────┘    │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Protocol Version
//!
//! This implementation targets MCP protocol version 2024-11-05.

pub mod dispatch;
pub mod handler;
pub mod protocol;
pub mod registry;
pub mod router;
pub mod schema;
pub mod server;
pub mod transport;

pub use dispatch::{DispatchError, Dispatcher, ErrorKind, Request};
pub use handler::{HandlerError, HandlerResult, ResourceHandler, ResourceParams, ToolHandler};
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
pub use registry::{ToolDescriptor, ToolRegistry};
pub use router::{ResourceDescriptor, ResourceRouter, ResourceTemplate};
pub use schema::{InputSchema, SchemaType};
pub use server::McpServer;
pub use transport::StdioTransport;
