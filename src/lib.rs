//! # Assemblage - declarative model <-> DTO assembly
//!
//! Assemblage copies named properties between a domain model and its transfer
//! object (DTO) according to a per-field schema: which fields to copy, what
//! the model-side property is called, and which transformer converts the
//! value in each direction. Domain models stay decoupled from the shapes
//! exposed to external consumers without hand-written copy code per DTO.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐     ┌────────────────┐     ┌───────────┐     ┌───────────┐
//! │ DtoSchema │────▶│ TransferParams │────▶│ Assembler │────▶│ DTO Value │
//! │(descriptor)│    │ (copy per field)│    │ (engine)  │     │  (object) │
//! └───────────┘     └────────────────┘     └───────────┘     └───────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use assemblage::{Assembler, DtoSchema, FieldDescriptor, TransformerSpec, Uppercase};
//! use serde_json::json;
//!
//! let schema = DtoSchema::builder("WorkDto")
//!     .field(FieldDescriptor::new("title").transformed_by(TransformerSpec::of::<Uppercase>()))
//!     .field(FieldDescriptor::new("code").mapped_to("iswc"))
//!     .field(FieldDescriptor::new("royalties").ignored())
//!     .build();
//!
//! let model = json!({ "title": "ma chanson", "iswc": "T1234567890" });
//! let dto = Assembler::new().assemble(&model, &schema)?;
//! assert_eq!(dto["title"], "MA CHANSON");
//! ```
//!
//! ## Modules
//!
//! - [`error`] - hierarchical error types
//! - [`access`] - named property get/set on arbitrary objects
//! - [`schema`] - DTO schema descriptors
//! - [`transform`] - transformers, registry, parameter resolution, and the
//!   copy engine

pub mod access;
pub mod error;
pub mod schema;
pub mod transform;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    AccessError, AccessResult, AssembleError, AssembleResult, BoxError, Direction, ResolveError,
    ResolveResult, TransformError,
};

// =============================================================================
// Re-exports - Property access
// =============================================================================

pub use access::PropertyAccess;

// =============================================================================
// Re-exports - Schema
// =============================================================================

pub use schema::{DtoConstructor, DtoSchema, FieldDescriptor, FieldMapping, SchemaBuilder};

// =============================================================================
// Re-exports - Transformation
// =============================================================================

pub use transform::{
    resolve_transfer_params, Assembler, AssemblerOptions, CacheScope, DigitsOnly, Identity,
    Lowercase, TransferParams, Transformer, TransformerFactory, TransformerRegistry,
    TransformerSpec, Trim, Uppercase,
};
