//! Named property access on arbitrary objects.
//!
//! The copy engine never touches object internals directly; it goes through
//! the [`PropertyAccess`] capability, so any type that can expose named
//! properties can act as a model or a DTO. The crate ships the
//! [`serde_json::Value`] implementation used by dynamic records.

use serde_json::Value;

use crate::error::{AccessError, AccessResult};

/// Named get/set capability.
///
/// Implementations must report the three failure modes distinguished by
/// [`AccessError`]; the engine wraps all of them identically.
pub trait PropertyAccess {
    /// Read the named property.
    fn get_property(&self, property: &str) -> AccessResult<Value>;

    /// Write the named property.
    ///
    /// Writing a property the object does not declare is an error, not an
    /// insertion.
    fn set_property(&mut self, property: &str, value: Value) -> AccessResult<()>;
}

impl PropertyAccess for Value {
    fn get_property(&self, property: &str) -> AccessResult<Value> {
        let object = self.as_object().ok_or_else(|| AccessError::Inaccessible {
            property: property.to_string(),
            message: format!("expected an object, found {}", value_kind(self)),
        })?;

        object
            .get(property)
            .cloned()
            .ok_or_else(|| AccessError::NoSuchProperty(property.to_string()))
    }

    fn set_property(&mut self, property: &str, value: Value) -> AccessResult<()> {
        let kind = value_kind(self);
        let object = self.as_object_mut().ok_or_else(|| AccessError::Inaccessible {
            property: property.to_string(),
            message: format!("expected an object, found {kind}"),
        })?;

        match object.get_mut(property) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(AccessError::NoSuchProperty(property.to_string())),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_get_existing_property() {
        let object = json!({ "title": "Ma Chanson", "year": 2024 });
        assert_eq!(object.get_property("title").unwrap(), json!("Ma Chanson"));
        assert_eq!(object.get_property("year").unwrap(), json!(2024));
    }

    #[test]
    fn test_get_missing_property() {
        let object = json!({ "title": "Ma Chanson" });
        let err = object.get_property("iswc").unwrap_err();
        assert!(matches!(err, AccessError::NoSuchProperty(name) if name == "iswc"));
    }

    #[test]
    fn test_get_on_non_object() {
        let scalar = json!(42);
        let err = scalar.get_property("title").unwrap_err();
        assert!(matches!(err, AccessError::Inaccessible { .. }));
        assert!(err.to_string().contains("a number"));
    }

    #[test]
    fn test_set_overwrites_existing_property() {
        let mut object = json!({ "title": "old" });
        object.set_property("title", json!("new")).unwrap();
        assert_eq!(object["title"], "new");
    }

    #[test]
    fn test_set_rejects_undeclared_property() {
        let mut object = json!({ "title": "old" });
        let err = object.set_property("subtitle", json!("x")).unwrap_err();
        assert!(matches!(err, AccessError::NoSuchProperty(name) if name == "subtitle"));
        assert_eq!(object, json!({ "title": "old" }));
    }

    #[test]
    fn test_set_on_non_object() {
        let mut scalar = json!("text");
        let err = scalar.set_property("title", json!(1)).unwrap_err();
        assert!(matches!(err, AccessError::Inaccessible { .. }));
    }
}
