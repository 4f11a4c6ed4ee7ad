//! Error taxonomy for the Carta graph layer.
//!
//! Every failure surfaced by the access layer is classified into one of
//! two variants sharing the same structural contract: a human message, a
//! stable greppable code, and the preserved underlying cause. No other
//! error type crosses the access-layer boundary.

use thiserror::Error;

/// Boxed underlying cause, kept for diagnostics via `source()`.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Message prefix for query-execution failures.
pub const QUERY_MESSAGE_PREFIX: &str = "Error during graph query : ";
/// Code prefix for query-execution failures.
pub const QUERY_CODE_PREFIX: &str = "QRY_";
/// Message prefix for engine/runtime failures.
pub const ENGINE_MESSAGE_PREFIX: &str = "Error returned by graph engine API : ";
/// Code prefix for engine/runtime failures.
pub const ENGINE_CODE_PREFIX: &str = "RT_";

/// Top-level error type for the Carta graph layer.
///
/// Codes are deterministic concatenations of a category prefix and a
/// caller-supplied suffix identifying the failing call site; messages are
/// category prefix + caller text. Construction never fails and never
/// reformats or truncates.
#[derive(Debug, Error)]
pub enum CartaError {
    /// A composed query could not be executed, or returned an unexpected
    /// shape (zero rows where one was required).
    #[error("{message}")]
    Query {
        message: String,
        code: String,
        #[source]
        cause: Option<Cause>,
    },

    /// A lower-level engine fault not tied to a specific query, e.g.
    /// node handle creation or connectivity loss.
    #[error("{message}")]
    Engine {
        message: String,
        code: String,
        #[source]
        cause: Option<Cause>,
    },
}

impl CartaError {
    /// Build a query failure from a request description.
    pub fn query(request: &str, cause: Option<Cause>, code: &str) -> Self {
        Self::Query {
            message: format!("{QUERY_MESSAGE_PREFIX}{request}"),
            code: format!("{QUERY_CODE_PREFIX}{code}"),
            cause,
        }
    }

    /// Build a query failure carrying the literal query text.
    pub fn query_with_text(request: &str, query: &str, cause: Option<Cause>, code: &str) -> Self {
        Self::Query {
            message: format!("{QUERY_MESSAGE_PREFIX}{request} . Query : {query}"),
            code: format!("{QUERY_CODE_PREFIX}{code}"),
            cause,
        }
    }

    /// Build an engine failure.
    pub fn engine(message: &str, cause: Option<Cause>, code: &str) -> Self {
        Self::Engine {
            message: format!("{ENGINE_MESSAGE_PREFIX}{message}"),
            code: format!("{ENGINE_CODE_PREFIX}{code}"),
            cause,
        }
    }

    /// The full human message, prefix included.
    pub fn message(&self) -> &str {
        match self {
            Self::Query { message, .. } | Self::Engine { message, .. } => message,
        }
    }

    /// The full stable code, prefix included.
    pub fn code(&self) -> &str {
        match self {
            Self::Query { code, .. } | Self::Engine { code, .. } => code,
        }
    }

    /// The preserved underlying cause, if any.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Query { cause, .. } | Self::Engine { cause, .. } => cause
                .as_ref()
                .map(|c| c.as_ref() as &(dyn std::error::Error + 'static)),
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Self::Query { .. })
    }

    pub fn is_engine(&self) -> bool {
        matches!(self, Self::Engine { .. })
    }
}
