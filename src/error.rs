//! Error types for the assembly engine.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`AccessError`] - named property get/set failures
//! - [`TransformError`] - value transformation failures
//! - [`ResolveError`] - schema resolution failures
//! - [`AssembleError`] - top-level copy engine errors
//!
//! Error conversion is automatic via `From` implementations, allowing `?` to
//! work across error boundaries, and the underlying cause is always preserved
//! through `#[source]` chains.

use std::fmt;

use thiserror::Error;

/// Boxed error used where a cause can come from caller-supplied code
/// (transformer factories, DTO constructors, custom accessors).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// =============================================================================
// Copy Direction
// =============================================================================

/// Direction of a property copy, carried by [`AssembleError::PropertyCopy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Assembling: model properties are read, DTO properties are written.
    ModelToDto,
    /// Updating: DTO properties are read, model properties are written.
    DtoToModel,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::ModelToDto => write!(f, "model -> dto"),
            Direction::DtoToModel => write!(f, "dto -> model"),
        }
    }
}

// =============================================================================
// Property Access Errors
// =============================================================================

/// Errors raised by a [`PropertyAccess`](crate::access::PropertyAccess)
/// implementation.
///
/// The copy engine treats all three failure modes identically, wrapping them
/// as [`AssembleError::PropertyCopy`] with the property name and direction.
#[derive(Debug, Error)]
pub enum AccessError {
    /// The object declares no property with this name.
    #[error("no property named '{0}'")]
    NoSuchProperty(String),

    /// The property exists but cannot be read or written.
    #[error("property '{property}' is not accessible: {message}")]
    Inaccessible { property: String, message: String },

    /// A custom accessor failed while reading or writing the property.
    #[error("accessor for property '{property}' failed")]
    Invocation {
        property: String,
        #[source]
        source: BoxError,
    },
}

// =============================================================================
// Transformation Errors
// =============================================================================

/// A `transform` or `reverse` invocation failed.
#[derive(Debug, Error)]
#[error("transformation failed: {message}")]
pub struct TransformError {
    pub message: String,
}

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// =============================================================================
// Resolution Errors
// =============================================================================

/// Errors while turning a DTO schema into transfer parameters.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The schema lacks the transferable marker.
    #[error("type '{dto}' is not a transfer object")]
    NotATransferObject { dto: String },

    /// A declared transformer type could not be constructed.
    #[error("failed to construct transformer '{transformer}'")]
    TransformerConstruction {
        transformer: String,
        #[source]
        source: BoxError,
    },
}

// =============================================================================
// Assembly Errors
// =============================================================================

/// Top-level errors returned by the copy engine.
#[derive(Debug, Error)]
pub enum AssembleError {
    /// A required input (model, DTO, batch element) was null.
    #[error("required input '{what}' is missing")]
    InvalidInput { what: &'static str },

    /// Parameter resolution failed before any copying began.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The DTO constructor failed.
    #[error("failed to instantiate dto '{dto}'")]
    Instantiation {
        dto: String,
        #[source]
        source: BoxError,
    },

    /// A single field copy failed; the whole assembly is aborted.
    #[error("failed to copy property '{property}' ({direction})")]
    PropertyCopy {
        property: String,
        direction: Direction,
        #[source]
        source: BoxError,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for property access.
pub type AccessResult<T> = Result<T, AccessError>;

/// Result type for schema resolution.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Result type for assembly operations.
pub type AssembleResult<T> = Result<T, AssembleError>;
