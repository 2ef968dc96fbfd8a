//! knowledge-mcp: MCP server exposing a demo knowledge and analysis toolkit
//!
//! This library implements an MCP (Model Context Protocol) server over stdio.
//! It advertises a catalogue of tools and resources backed entirely by
//! in-memory demo data, which makes it a self-contained target for exercising
//! MCP clients and agent frameworks.
//!
//! # Architecture
//!
//! The protocol layer is strictly separated from the capabilities behind it:
//!
//! - **Transport and lifecycle**: newline-delimited JSON-RPC over
//!   stdin/stdout, with the `initialize` handshake gating all other traffic
//! - **Dispatch**: method routing, argument schema validation, and the
//!   mapping of handler failures onto the protocol's error taxonomy
//! - **Capabilities**: pure handler functions over immutable backing data
//!   (a knowledge base, a document store, a generated dataset, a simulated
//!   web search index)
//!
//! # Modules
//!
//! - [`analysis`] — Dataset generation, statistics, and text analysis
//! - [`catalogue`] — The full tool and resource catalogue
//! - [`config`] — Configuration loading and validation
//! - [`corpus`] — The in-memory demo corpus
//! - [`error`] — Error types
//! - [`mcp`] — MCP protocol implementation

pub mod analysis;
pub mod catalogue;
pub mod config;
pub mod corpus;
pub mod error;
pub mod mcp;
