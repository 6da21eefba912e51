//! Declarative output schemas.
//!
//! A [`Schema`] describes the JSON a structured task expects back. The same
//! descriptor is rendered into the backend's response-schema dialect, embedded
//! in prompts, and used to check the top-level shape of whatever comes back.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    String,
    Number,
    Integer,
    Boolean,
    Array(Box<Schema>),
    Object(Vec<Field>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub schema: Schema,
    pub required: bool,
}

impl Field {
    pub fn required(name: &'static str, schema: Schema) -> Self {
        Self {
            name,
            schema,
            required: true,
        }
    }

    pub fn optional(name: &'static str, schema: Schema) -> Self {
        Self {
            name,
            schema,
            required: false,
        }
    }
}

/// Top-level kind of a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Object,
    Array,
    Scalar,
}

impl Shape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => Shape::Object,
            Value::Array(_) => Shape::Array,
            _ => Shape::Scalar,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Object => "object",
            Shape::Array => "array",
            Shape::Scalar => "scalar",
        }
    }
}

impl Schema {
    pub fn array(item: Schema) -> Self {
        Schema::Array(Box::new(item))
    }

    pub fn object(fields: Vec<Field>) -> Self {
        Schema::Object(fields)
    }

    pub fn string_list() -> Self {
        Schema::array(Schema::String)
    }

    pub fn shape(&self) -> Shape {
        match self {
            Schema::Object(_) => Shape::Object,
            Schema::Array(_) => Shape::Array,
            _ => Shape::Scalar,
        }
    }

    /// Gemini `responseSchema` dialect: upper-case type names plus an explicit
    /// property ordering.
    pub fn to_gemini(&self) -> Value {
        self.render(Dialect::Gemini)
    }

    /// Standard JSON Schema, for OpenAI-compatible backends and prompt text.
    pub fn to_json_schema(&self) -> Value {
        self.render(Dialect::JsonSchema)
    }

    /// Every place where `value` departs from this schema: a missing required
    /// field, an undeclared field, a `null`, or a value of the wrong type.
    /// Empty when the value conforms.
    pub fn violations(&self, value: &Value) -> Vec<String> {
        let mut found = Vec::new();
        self.collect_violations("$", value, &mut found);
        found
    }

    fn collect_violations(&self, path: &str, value: &Value, found: &mut Vec<String>) {
        match (self, value) {
            (_, Value::Null) => found.push(format!("{path} is null")),
            (Schema::String, Value::String(_)) | (Schema::Boolean, Value::Bool(_)) => {}
            (Schema::Number, Value::Number(_)) => {}
            (Schema::Integer, Value::Number(n)) if n.is_i64() || n.is_u64() => {}
            (Schema::Array(item), Value::Array(items)) => {
                for (i, child) in items.iter().enumerate() {
                    item.collect_violations(&format!("{path}[{i}]"), child, found);
                }
            }
            (Schema::Object(fields), Value::Object(map)) => {
                for field in fields {
                    match map.get(field.name) {
                        Some(child) => field.schema.collect_violations(
                            &format!("{path}.{}", field.name),
                            child,
                            found,
                        ),
                        None if field.required => {
                            found.push(format!("{path}.{} is missing", field.name))
                        }
                        None => {}
                    }
                }
                for key in map.keys() {
                    if !fields.iter().any(|f| f.name == key) {
                        found.push(format!("{path}.{key} is not declared"));
                    }
                }
            }
            (expected, _) => {
                let rendered = expected.to_json_schema();
                let kind = rendered["type"].as_str().unwrap_or("valid");
                found.push(format!("{path} is not {kind}"));
            }
        }
    }

    fn render(&self, dialect: Dialect) -> Value {
        match self {
            Schema::String => json!({ "type": dialect.type_name("string") }),
            Schema::Number => json!({ "type": dialect.type_name("number") }),
            Schema::Integer => json!({ "type": dialect.type_name("integer") }),
            Schema::Boolean => json!({ "type": dialect.type_name("boolean") }),
            Schema::Array(item) => json!({
                "type": dialect.type_name("array"),
                "items": item.render(dialect),
            }),
            Schema::Object(fields) => {
                let mut properties = Map::new();
                for field in fields {
                    properties.insert(field.name.to_string(), field.schema.render(dialect));
                }

                let required: Vec<&str> = fields
                    .iter()
                    .filter(|f| f.required)
                    .map(|f| f.name)
                    .collect();

                let mut object = Map::new();
                object.insert("type".into(), json!(dialect.type_name("object")));
                object.insert("properties".into(), Value::Object(properties));
                object.insert("required".into(), json!(required));

                if dialect == Dialect::Gemini {
                    let ordering: Vec<&str> = fields.iter().map(|f| f.name).collect();
                    object.insert("propertyOrdering".into(), json!(ordering));
                }

                Value::Object(object)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Dialect {
    Gemini,
    JsonSchema,
}

impl Dialect {
    fn type_name(&self, name: &str) -> String {
        match self {
            Dialect::Gemini => name.to_uppercase(),
            Dialect::JsonSchema => name.to_string(),
        }
    }
}

/// A Structured Result type and the schema it is parsed against.
pub trait Structured: DeserializeOwned {
    fn schema() -> Schema;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion_schema() -> Schema {
        Schema::object(vec![
            Field::required("suggestedTargeting", Schema::String),
            Field::required("reason", Schema::String),
            Field::optional("tags", Schema::string_list()),
        ])
    }

    #[test]
    fn test_shape_of_values() {
        assert_eq!(Shape::of(&json!({"a": 1})), Shape::Object);
        assert_eq!(Shape::of(&json!([1, 2])), Shape::Array);
        assert_eq!(Shape::of(&json!("text")), Shape::Scalar);
        assert_eq!(Shape::of(&Value::Null), Shape::Scalar);
    }

    #[test]
    fn test_schema_shape() {
        assert_eq!(suggestion_schema().shape(), Shape::Object);
        assert_eq!(Schema::string_list().shape(), Shape::Array);
        assert_eq!(Schema::Number.shape(), Shape::Scalar);
    }

    #[test]
    fn test_gemini_dialect() {
        let rendered = suggestion_schema().to_gemini();
        assert_eq!(rendered["type"], "OBJECT");
        assert_eq!(rendered["properties"]["tags"]["type"], "ARRAY");
        assert_eq!(rendered["properties"]["tags"]["items"]["type"], "STRING");
        assert_eq!(rendered["required"], json!(["suggestedTargeting", "reason"]));
        assert_eq!(
            rendered["propertyOrdering"],
            json!(["suggestedTargeting", "reason", "tags"])
        );
    }

    #[test]
    fn test_json_schema_dialect() {
        let rendered = suggestion_schema().to_json_schema();
        assert_eq!(rendered["type"], "object");
        assert_eq!(rendered["properties"]["reason"]["type"], "string");
        assert!(rendered.get("propertyOrdering").is_none());
    }

    #[test]
    fn test_conforming_value_has_no_violations() {
        let value = json!({"suggestedTargeting": "Women 25-34", "reason": "r", "tags": ["a"]});
        assert!(suggestion_schema().violations(&value).is_empty());

        let without_optional = json!({"suggestedTargeting": "x", "reason": "r"});
        assert!(suggestion_schema().violations(&without_optional).is_empty());
    }

    #[test]
    fn test_violations_report_each_departure() {
        let value = json!({"suggestedTargeting": 3, "tags": null, "extra": true});
        let violations = suggestion_schema().violations(&value);

        assert_eq!(violations.len(), 4, "{violations:?}");
        assert!(violations.contains(&"$.suggestedTargeting is not string".to_string()));
        assert!(violations.contains(&"$.reason is missing".to_string()));
        assert!(violations.contains(&"$.tags is null".to_string()));
        assert!(violations.contains(&"$.extra is not declared".to_string()));
    }

    #[test]
    fn test_integer_rejects_fractions() {
        assert!(Schema::Integer.violations(&json!(3)).is_empty());
        assert_eq!(Schema::Integer.violations(&json!(3.5)).len(), 1);
        assert!(Schema::Number.violations(&json!(3.5)).is_empty());
    }
}
