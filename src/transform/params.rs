//! Transfer parameter resolution.
//!
//! Walks a DTO schema's declared fields and produces one copy instruction per
//! non-ignored field. The result is a set, not a sequence: callers must not
//! rely on its ordering.

use std::fmt;
use std::sync::Arc;

use crate::error::{ResolveError, ResolveResult};
use crate::schema::DtoSchema;

use super::registry::TransformerRegistry;
use super::transformer::{Transformer, TransformerSpec};

/// Resolved copy instruction for a single DTO field.
///
/// Immutable after construction; rebuilt on every resolution pass.
#[derive(Clone)]
pub struct TransferParams {
    dto_property: String,
    model_property: Option<String>,
    transformer: Arc<dyn Transformer>,
}

impl TransferParams {
    /// DTO-side property name. Always non-empty.
    pub fn dto_property(&self) -> &str {
        &self.dto_property
    }

    /// Model-side property name.
    ///
    /// Falls back to the DTO name when no target name was declared, or the
    /// declared target name was empty. The fallback is applied here, on read,
    /// so the two cases stay indistinguishable.
    pub fn model_property(&self) -> &str {
        match &self.model_property {
            Some(name) => name,
            None => &self.dto_property,
        }
    }

    /// Transformer applied during copies of this field. Never absent; the
    /// identity transformer when none was declared.
    pub fn transformer(&self) -> &dyn Transformer {
        self.transformer.as_ref()
    }
}

impl fmt::Debug for TransferParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransferParams")
            .field("dto_property", &self.dto_property)
            .field("model_property", &self.model_property)
            .finish_non_exhaustive()
    }
}

/// Turn a DTO schema into the transfer parameters for its non-ignored fields.
///
/// Ignored fields produce no parameter and no transformer construction: the
/// registry is not consulted for them at all, since construction may have
/// side effects or fail. An empty schema yields an empty set.
pub fn resolve_transfer_params(
    schema: &DtoSchema,
    registry: &mut TransformerRegistry,
) -> ResolveResult<Vec<TransferParams>> {
    if !schema.is_transferable() {
        return Err(ResolveError::NotATransferObject {
            dto: schema.name().to_string(),
        });
    }

    let mut params = Vec::new();
    for field in schema.fields() {
        if field.is_ignored() {
            continue;
        }

        let spec = field
            .mapping()
            .and_then(|mapping| mapping.transformer().copied())
            .unwrap_or_else(TransformerSpec::identity);
        let transformer = registry.resolve(&spec)?;

        let model_property = field
            .mapping()
            .map(|mapping| mapping.model_property())
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        params.push(TransferParams {
            dto_property: field.name().to_string(),
            model_property,
            transformer,
        });
    }

    tracing::debug!(
        dto = schema.name(),
        count = params.len(),
        "resolved transfer parameters"
    );
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BoxError, TransformError};
    use crate::schema::FieldDescriptor;
    use crate::transform::transformer::TransformerFactory;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn resolve(schema: &DtoSchema) -> ResolveResult<Vec<TransferParams>> {
        resolve_transfer_params(schema, &mut TransformerRegistry::new())
    }

    #[test]
    fn test_empty_schema_yields_empty_set() {
        let schema = DtoSchema::builder("EmptyDto").build();
        assert!(resolve(&schema).unwrap().is_empty());
    }

    #[test]
    fn test_non_transferable_schema_is_rejected() {
        let schema = DtoSchema::builder("PlainStruct")
            .field(FieldDescriptor::new("title"))
            .transferable(false)
            .build();

        let err = resolve(&schema).unwrap_err();
        assert!(matches!(err, ResolveError::NotATransferObject { dto } if dto == "PlainStruct"));
    }

    #[test]
    fn test_unmapped_field_defaults_to_its_own_name() {
        let schema = DtoSchema::builder("WorkDto")
            .field(FieldDescriptor::new("title"))
            .build();

        let params = resolve(&schema).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].dto_property(), "title");
        assert_eq!(params[0].model_property(), "title");
    }

    #[test]
    fn test_mapped_field_uses_declared_name() {
        let schema = DtoSchema::builder("WorkDto")
            .field(FieldDescriptor::new("iswc").mapped_to("workCode"))
            .build();

        let params = resolve(&schema).unwrap();
        assert_eq!(params[0].model_property(), "workCode");
    }

    #[test]
    fn test_empty_declared_name_falls_back_to_dto_name() {
        let schema = DtoSchema::builder("WorkDto")
            .field(FieldDescriptor::new("iswc").mapped_to(""))
            .build();

        let params = resolve(&schema).unwrap();
        assert_eq!(params[0].model_property(), "iswc");
    }

    #[test]
    fn test_undeclared_transformer_is_identity() {
        let schema = DtoSchema::builder("WorkDto")
            .field(FieldDescriptor::new("title"))
            .build();

        let params = resolve(&schema).unwrap();
        let transformer = params[0].transformer();
        assert_eq!(transformer.transform(json!("abc")).unwrap(), json!("abc"));
        assert_eq!(transformer.reverse(json!(7)).unwrap(), json!(7));
    }

    #[test]
    fn test_ignored_fields_produce_no_params() {
        let schema = DtoSchema::builder("WorkDto")
            .field(FieldDescriptor::new("title"))
            .field(FieldDescriptor::new("internal").ignored())
            .build();

        let params = resolve(&schema).unwrap();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].dto_property(), "title");
    }

    #[test]
    fn test_ignored_fields_construct_no_transformer() {
        static CONSTRUCTIONS: AtomicUsize = AtomicUsize::new(0);

        #[derive(Default)]
        struct Counting;

        impl Transformer for Counting {
            fn transform(&self, value: Value) -> Result<Value, TransformError> {
                Ok(value)
            }
            fn reverse(&self, value: Value) -> Result<Value, TransformError> {
                Ok(value)
            }
        }

        let factory: TransformerFactory = || {
            CONSTRUCTIONS.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(Counting))
        };

        let schema = DtoSchema::builder("WorkDto")
            .field(
                FieldDescriptor::new("internal")
                    .transformed_by(TransformerSpec::with_factory::<Counting>(factory))
                    .ignored(),
            )
            .build();

        let params = resolve(&schema).unwrap();
        assert!(params.is_empty());
        assert_eq!(CONSTRUCTIONS.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_same_transformer_type_shares_one_instance() {
        let spec = TransformerSpec::of::<crate::transform::builtin::Uppercase>();
        let schema = DtoSchema::builder("WorkDto")
            .field(FieldDescriptor::new("title").transformed_by(spec))
            .field(FieldDescriptor::new("subtitle").transformed_by(spec))
            .build();

        let mut registry = TransformerRegistry::new();
        let params = resolve_transfer_params(&schema, &mut registry).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_two_dto_fields_may_target_one_model_property() {
        let schema = DtoSchema::builder("WorkDto")
            .field(FieldDescriptor::new("display").mapped_to("title"))
            .field(FieldDescriptor::new("sortKey").mapped_to("title"))
            .build();

        let params = resolve(&schema).unwrap();
        assert_eq!(params[0].model_property(), "title");
        assert_eq!(params[1].model_property(), "title");
    }

    #[test]
    fn test_construction_failure_aborts_resolution() {
        struct Failing;

        impl Transformer for Failing {
            fn transform(&self, value: Value) -> Result<Value, TransformError> {
                Ok(value)
            }
            fn reverse(&self, value: Value) -> Result<Value, TransformError> {
                Ok(value)
            }
        }

        fn failing_factory() -> Result<Box<dyn Transformer>, BoxError> {
            Err("no default construction".into())
        }

        let schema = DtoSchema::builder("WorkDto")
            .field(
                FieldDescriptor::new("title")
                    .transformed_by(TransformerSpec::with_factory::<Failing>(failing_factory)),
            )
            .build();

        let err = resolve(&schema).unwrap_err();
        assert!(matches!(err, ResolveError::TransformerConstruction { .. }));
    }
}
