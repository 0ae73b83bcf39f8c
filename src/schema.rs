//! DTO schema descriptors.
//!
//! A schema is the statically registered equivalent of annotation metadata:
//! one descriptor per DTO type, built once through [`DtoSchema::builder`] and
//! handed to the engine on every call. It carries the transferable marker,
//! the field list with per-field mapping metadata, and an optional custom
//! constructor. The engine never mutates a schema.

use serde_json::{Map, Value};

use crate::error::BoxError;
use crate::transform::TransformerSpec;

/// Constructor used by [`DtoSchema::instantiate`] in place of the default
/// field-by-field initialization.
pub type DtoConstructor = fn() -> Result<Value, BoxError>;

/// Declarative description of a DTO type.
#[derive(Debug, Clone)]
pub struct DtoSchema {
    name: String,
    transferable: bool,
    fields: Vec<FieldDescriptor>,
    constructor: Option<DtoConstructor>,
}

impl DtoSchema {
    /// Start building a schema for the named DTO type.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            transferable: true,
            fields: Vec::new(),
            constructor: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the type carries the transfer-object marker. Only marked
    /// schemas can be resolved into transfer parameters.
    pub fn is_transferable(&self) -> bool {
        self.transferable
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Create a new DTO instance.
    ///
    /// Uses the declared constructor when one is set; its failure is returned,
    /// never swallowed. Otherwise builds an object with every declared field
    /// present at its declared default, or `Value::Null`.
    pub fn instantiate(&self) -> Result<Value, BoxError> {
        match self.constructor {
            Some(construct) => construct(),
            None => {
                let mut object = Map::new();
                for field in &self.fields {
                    object.insert(
                        field.name().to_string(),
                        field.default_value().cloned().unwrap_or(Value::Null),
                    );
                }
                Ok(Value::Object(object))
            }
        }
    }
}

/// One declared DTO field: name, ignored flag, optional default value, and
/// optional mapping metadata.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    name: String,
    ignored: bool,
    default: Option<Value>,
    mapping: Option<FieldMapping>,
}

impl FieldDescriptor {
    /// Declare a field. `name` must be non-empty.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ignored: false,
            default: None,
            mapping: None,
        }
    }

    /// Exclude this field from copying in both directions.
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    /// Map this field to a differently named model property. An empty name
    /// behaves as if no mapping was declared.
    pub fn mapped_to(mut self, model_property: impl Into<String>) -> Self {
        self.mapping.get_or_insert_with(FieldMapping::empty).model_property =
            model_property.into();
        self
    }

    /// Convert values through the given transformer type instead of copying
    /// them verbatim.
    pub fn transformed_by(mut self, transformer: TransformerSpec) -> Self {
        self.mapping.get_or_insert_with(FieldMapping::empty).transformer = Some(transformer);
        self
    }

    /// Value this field holds on a freshly instantiated DTO.
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn mapping(&self) -> Option<&FieldMapping> {
        self.mapping.as_ref()
    }
}

/// Mapping metadata attached to a field: the model-side property name (empty
/// means "use the field's own name") and an optional transformer type.
#[derive(Debug, Clone)]
pub struct FieldMapping {
    model_property: String,
    transformer: Option<TransformerSpec>,
}

impl FieldMapping {
    fn empty() -> Self {
        Self {
            model_property: String::new(),
            transformer: None,
        }
    }

    pub fn model_property(&self) -> &str {
        &self.model_property
    }

    pub fn transformer(&self) -> Option<&TransformerSpec> {
        self.transformer.as_ref()
    }
}

/// Builder returned by [`DtoSchema::builder`].
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    name: String,
    transferable: bool,
    fields: Vec<FieldDescriptor>,
    constructor: Option<DtoConstructor>,
}

impl SchemaBuilder {
    /// Add a field. Declaring a name twice replaces the earlier descriptor,
    /// keeping one descriptor per field name.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        match self.fields.iter().position(|existing| existing.name() == field.name()) {
            Some(index) => self.fields[index] = field,
            None => self.fields.push(field),
        }
        self
    }

    /// Set or clear the transfer-object marker. Builders start marked.
    pub fn transferable(mut self, transferable: bool) -> Self {
        self.transferable = transferable;
        self
    }

    /// Use a custom constructor for new DTO instances.
    pub fn constructor(mut self, constructor: DtoConstructor) -> Self {
        self.constructor = Some(constructor);
        self
    }

    pub fn build(self) -> DtoSchema {
        DtoSchema {
            name: self.name,
            transferable: self.transferable,
            fields: self.fields,
            constructor: self.constructor,
        }
    }
}
