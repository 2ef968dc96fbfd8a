//! Error types for knowledge-mcp.
//!
//! Startup errors (configuration and catalogue construction) live here.
//! Per-request protocol errors are modelled separately in
//! [`crate::mcp::dispatch::DispatchError`], since they are reported to the
//! client rather than terminating the process.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be parsed.
    #[error("failed to parse configuration file: {path}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    NotFound {
        /// Path where the configuration file was expected.
        path: PathBuf,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ValidationError {
        /// Description of the validation failure.
        message: String,
    },
}

/// Errors raised while building the tool and resource catalogue at startup.
///
/// These are configuration defects, not runtime conditions: the server
/// refuses to start rather than serving a broken catalogue.
#[derive(Error, Debug)]
pub enum CatalogueError {
    /// A tool name was registered twice.
    #[error("duplicate tool name: {name}")]
    DuplicateTool {
        /// The offending tool name.
        name: String,
    },

    /// A tool's input schema is internally inconsistent.
    #[error("malformed input schema for tool '{tool}': {message}")]
    MalformedSchema {
        /// The tool whose schema failed the check.
        tool: String,
        /// Description of the inconsistency.
        message: String,
    },

    /// A static resource URI was registered twice.
    #[error("duplicate resource URI: {uri}")]
    DuplicateResource {
        /// The offending URI.
        uri: String,
    },

    /// A resource template could not be compiled.
    #[error("malformed resource template '{template}': {message}")]
    MalformedTemplate {
        /// The offending URI template.
        template: String,
        /// Description of the defect.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let error = ConfigError::NotFound {
            path: PathBuf::from("/path/to/config.json"),
        };
        let msg = error.to_string();
        assert!(msg.contains("not found"));
        assert!(msg.contains("config.json"));
    }

    #[test]
    fn validation_error_display() {
        let error = ConfigError::ValidationError {
            message: "invalid setting".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("invalid setting"));
    }

    #[test]
    fn duplicate_tool_display() {
        let error = CatalogueError::DuplicateTool {
            name: "echo".to_string(),
        };
        assert!(error.to_string().contains("echo"));
    }

    #[test]
    fn malformed_template_display() {
        let error = CatalogueError::MalformedTemplate {
            template: "mcp://broken".to_string(),
            message: "no placeholder".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("mcp://broken"));
        assert!(msg.contains("no placeholder"));
    }
}
