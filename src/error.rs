use crate::transport::TransportError;
use std::sync::Arc;
use thiserror::Error;

/// Separator placed between a protocol message and the request it came from.
pub const DIAGNOSTIC_SEPARATOR: &str = " :: ";

/// Structured error context for configuration and validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorContext {
    /// Field or configuration key that caused the error (e.g., "graph.id", "PIXELA_BASE_URL")
    pub field_path: Option<String>,
    /// Additional context about the error (e.g., expected format, actual value)
    pub details: Option<String>,
    /// Source of the error (e.g., "credentials", "client_builder")
    pub source: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self {
            field_path: None,
            details: None,
            source: None,
        }
    }

    pub fn with_field_path(mut self, path: impl Into<String>) -> Self {
        self.field_path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Unified error type for the Pixela client.
///
/// Only [`Error::Protocol`] ever carries request diagnostics; transport and
/// codec failures are surfaced exactly as the lower layer produced them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation error: {message}{}", format_context(.context))]
    Validation {
        message: String,
        context: ErrorContext,
    },

    #[error("Configuration error: {message}{}", format_context(.context))]
    Configuration {
        message: String,
        context: ErrorContext,
    },

    #[error("Network transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("{message}{}", format_request(.request))]
    Protocol {
        message: String,
        status: u16,
        request: Option<String>,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Client has been shut down")]
    Shutdown,

    #[error("Runtime error: {0}")]
    Runtime(String),

    #[error(transparent)]
    Shared(Arc<Error>),
}

fn format_request(request: &Option<String>) -> String {
    match request {
        Some(rendering) => format!("{}{}", DIAGNOSTIC_SEPARATOR, rendering),
        None => String::new(),
    }
}

// Helper function to format error context for display
fn format_context(ctx: &ErrorContext) -> String {
    let mut parts = Vec::new();
    if let Some(ref field) = ctx.field_path {
        parts.push(format!("field: {}", field));
    }
    if let Some(ref details) = ctx.details {
        parts.push(format!("details: {}", details));
    }
    if let Some(ref source) = ctx.source {
        parts.push(format!("source: {}", source));
    }
    if parts.is_empty() {
        String::new()
    } else {
        format!(" ({})", parts.join(", "))
    }
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn validation_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Validation {
            message: msg.into(),
            context,
        }
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
            context: ErrorContext::new(),
        }
    }

    pub fn configuration_with_context(msg: impl Into<String>, context: ErrorContext) -> Self {
        Error::Configuration {
            message: msg.into(),
            context,
        }
    }

    /// A failure reported by the service itself, not yet tied to a request.
    pub fn protocol(message: impl Into<String>, status: u16) -> Self {
        Error::Protocol {
            message: message.into(),
            status,
            request: None,
        }
    }

    /// Attach a request rendering to a protocol failure.
    ///
    /// Every other variant is returned untouched, and a protocol error that
    /// already names its request keeps the first rendering.
    pub fn decorate(self, rendering: impl FnOnce() -> String) -> Self {
        match self {
            Error::Protocol {
                message,
                status,
                request: None,
            } => Error::Protocol {
                message,
                status,
                request: Some(rendering()),
            },
            other => other,
        }
    }

    /// The innermost error, looking through replayed single-flight results.
    pub fn root(&self) -> &Error {
        match self {
            Error::Shared(inner) => inner.root(),
            other => other,
        }
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self.root(), Error::Protocol { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self.root(), Error::Decode(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.root(), Error::Transport(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self.root(), Error::Validation { .. })
    }

    /// The server-supplied message of a protocol failure.
    pub fn protocol_message(&self) -> Option<&str> {
        match self.root() {
            Error::Protocol { message, .. } => Some(message),
            _ => None,
        }
    }

    /// HTTP status of a protocol failure.
    pub fn status(&self) -> Option<u16> {
        match self.root() {
            Error::Protocol { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Extract error context if available
    pub fn context(&self) -> Option<&ErrorContext> {
        match self.root() {
            Error::Configuration { context, .. } | Error::Validation { context, .. } => {
                Some(context)
            }
            _ => None,
        }
    }
}
