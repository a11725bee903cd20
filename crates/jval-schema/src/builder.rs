use std::collections::HashSet;
use std::rc::Rc;
use std::str::FromStr;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::pattern::compile_pattern;
use crate::schema::{BoolOrSchema, OneOrMultiTypes, Schema, SchemaType};
use crate::{Error, Keys, SchemaError, SchemaResult, REF_PREFIX};

impl TryFrom<&Value> for Schema {
    type Error = SchemaError;

    /// Builds the typed schema tree from a parsed schema document.
    ///
    /// Only structural validity is checked: every keyword must hold the
    /// right JSON kind, patterns must compile and `$ref` targets must
    /// exist in the document. Semantically contradictory schemas
    /// (`minimum > maximum`) are legal and simply reject every instance.
    fn try_from(value: &Value) -> SchemaResult<Self> {
        let parser = SchemaParser {
            keys: Keys::default(),
            value,
            def_names: Rc::new(collect_def_names(value)?),
            root: true,
        };
        parser.parse()
    }
}

impl FromStr for Schema {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;
        let schema = Schema::try_from(&value)?;
        Ok(schema)
    }
}

// Definition names are registered before any body parses, so defs may
// reference themselves, each other and the root in any order.
fn collect_def_names(value: &Value) -> SchemaResult<HashSet<String>> {
    match value.get("$defs") {
        None => Ok(HashSet::new()),
        Some(Value::Object(defs)) => Ok(defs.keys().cloned().collect()),
        Some(_) => Err(SchemaError::UnexpectedType {
            keys: Keys::single("$defs"),
            keyword: "$defs",
        }),
    }
}

#[derive(Debug, Clone)]
struct SchemaParser<'a> {
    keys: Keys,
    value: &'a Value,
    def_names: Rc<HashSet<String>>,
    root: bool,
}

impl<'a> SchemaParser<'a> {
    fn parse(&self) -> SchemaResult<Schema> {
        let object = match self.value.as_object() {
            Some(v) => v,
            None => {
                return Err(SchemaError::InvalidSchemaValue {
                    keys: self.keys.clone(),
                    error: "schema must be an object".into(),
                })
            }
        };

        let mut schema = Schema::default();
        // The draft-4 boolean exclusive bounds depend on `minimum` and
        // `maximum`, which may appear later in the document, so they are
        // resolved after the keyword loop.
        let mut exclusive_minimum_flag = false;
        let mut exclusive_maximum_flag = false;

        for (key, value) in object.iter() {
            let keys = self.keys.join(key.as_str());
            match key.as_str() {
                "$ref" => schema.ref_value = Some(self.parse_ref(&keys, value)?),
                "$defs" if self.root => {
                    schema.defs = Some(self.parse_schema_map(&keys, "$defs", value)?)
                }
                "title" => schema.title = Some(self.parse_string(&keys, "title", value)?),
                "description" => {
                    schema.description = Some(self.parse_string(&keys, "description", value)?)
                }
                "default" => schema.default = Some(value.clone()),
                "type" => schema.schema_type = Some(self.parse_types(&keys, value)?),
                "enum" => match value.as_array() {
                    Some(items) => schema.enum_value = Some(items.clone()),
                    None => {
                        return Err(SchemaError::UnexpectedType {
                            keys,
                            keyword: "enum",
                        })
                    }
                },
                "const" => schema.const_value = Some(value.clone()),
                "minimum" => schema.minimum = Some(self.parse_number(&keys, "minimum", value)?),
                "maximum" => schema.maximum = Some(self.parse_number(&keys, "maximum", value)?),
                "exclusiveMinimum" => match value {
                    Value::Bool(flag) => exclusive_minimum_flag = *flag,
                    _ => {
                        schema.exclusive_minimum =
                            Some(self.parse_number(&keys, "exclusiveMinimum", value)?)
                    }
                },
                "exclusiveMaximum" => match value {
                    Value::Bool(flag) => exclusive_maximum_flag = *flag,
                    _ => {
                        schema.exclusive_maximum =
                            Some(self.parse_number(&keys, "exclusiveMaximum", value)?)
                    }
                },
                "multipleOf" => {
                    schema.multiple_of = Some(self.parse_number(&keys, "multipleOf", value)?)
                }
                "minLength" => schema.min_length = Some(self.parse_count(&keys, "minLength", value)?),
                "maxLength" => schema.max_length = Some(self.parse_count(&keys, "maxLength", value)?),
                "pattern" => {
                    let pattern = self.parse_string(&keys, "pattern", value)?;
                    self.check_pattern(&keys, &pattern)?;
                    schema.pattern = Some(pattern);
                }
                "format" => schema.format = Some(self.parse_string(&keys, "format", value)?),
                "items" => schema.items = Some(Box::new(self.spawn(&keys, value).parse()?)),
                "minItems" => schema.min_items = Some(self.parse_count(&keys, "minItems", value)?),
                "maxItems" => schema.max_items = Some(self.parse_count(&keys, "maxItems", value)?),
                "uniqueItems" => {
                    schema.unique_items = Some(self.parse_bool(&keys, "uniqueItems", value)?)
                }
                "contains" => schema.contains = Some(Box::new(self.spawn(&keys, value).parse()?)),
                "properties" => {
                    schema.properties = Some(self.parse_schema_map(&keys, "properties", value)?)
                }
                "patternProperties" => {
                    let patterns = self.parse_schema_map(&keys, "patternProperties", value)?;
                    for pattern in patterns.keys() {
                        self.check_pattern(&keys.join(pattern.as_str()), pattern)?;
                    }
                    schema.pattern_properties = Some(patterns);
                }
                "required" => {
                    schema.required = Some(self.parse_string_array(&keys, "required", value)?)
                }
                "additionalProperties" => {
                    schema.additional_properties = Some(match value {
                        Value::Bool(allowed) => BoolOrSchema::from(*allowed),
                        _ => BoolOrSchema::from(self.spawn(&keys, value).parse()?),
                    })
                }
                "minProperties" => {
                    schema.min_properties = Some(self.parse_count(&keys, "minProperties", value)?)
                }
                "maxProperties" => {
                    schema.max_properties = Some(self.parse_count(&keys, "maxProperties", value)?)
                }
                "allOf" => schema.all_of = Some(self.parse_schema_array(&keys, "allOf", value)?),
                "anyOf" => schema.any_of = Some(self.parse_schema_array(&keys, "anyOf", value)?),
                "oneOf" => schema.one_of = Some(self.parse_schema_array(&keys, "oneOf", value)?),
                "not" => schema.not = Some(Box::new(self.spawn(&keys, value).parse()?)),
                "if" => schema.if_value = Some(Box::new(self.spawn(&keys, value).parse()?)),
                "then" => schema.then_value = Some(Box::new(self.spawn(&keys, value).parse()?)),
                "else" => schema.else_value = Some(Box::new(self.spawn(&keys, value).parse()?)),
                _ => {
                    schema
                        .unknown
                        .get_or_insert_with(Map::new)
                        .insert(key.clone(), value.clone());
                }
            }
        }

        if exclusive_minimum_flag {
            match schema.minimum.take() {
                Some(bound) => schema.exclusive_minimum = Some(bound),
                None => {
                    return Err(SchemaError::InvalidSchemaValue {
                        keys: self.keys.join("exclusiveMinimum"),
                        error: "boolean exclusiveMinimum requires minimum".into(),
                    })
                }
            }
        }
        if exclusive_maximum_flag {
            match schema.maximum.take() {
                Some(bound) => schema.exclusive_maximum = Some(bound),
                None => {
                    return Err(SchemaError::InvalidSchemaValue {
                        keys: self.keys.join("exclusiveMaximum"),
                        error: "boolean exclusiveMaximum requires maximum".into(),
                    })
                }
            }
        }

        Ok(schema)
    }

    fn spawn(&self, keys: &Keys, value: &'a Value) -> Self {
        Self {
            keys: keys.clone(),
            value,
            def_names: self.def_names.clone(),
            root: false,
        }
    }

    fn parse_ref(&self, keys: &Keys, value: &Value) -> SchemaResult<String> {
        let ref_value = self.parse_string(keys, "$ref", value)?;
        if ref_value == "#" {
            return Ok(ref_value);
        }
        // Definition names may hold any character except the pointer
        // separator
        let name = ref_value
            .strip_prefix(REF_PREFIX)
            .filter(|name| !name.is_empty() && !name.contains('/'));
        match name {
            Some(name) if self.def_names.contains(name) => Ok(ref_value),
            _ => Err(SchemaError::UnknownRef {
                keys: keys.clone(),
                name: ref_value,
            }),
        }
    }

    fn parse_types(&self, keys: &Keys, value: &Value) -> SchemaResult<OneOrMultiTypes> {
        match value {
            Value::String(name) => Ok(self.parse_type_name(keys, name)?.into()),
            Value::Array(names) => {
                if names.is_empty() {
                    return Err(SchemaError::InvalidSchemaValue {
                        keys: keys.clone(),
                        error: "type array must not be empty".into(),
                    });
                }
                let mut types = Vec::with_capacity(names.len());
                for (idx, name) in names.iter().enumerate() {
                    let keys = keys.join(idx);
                    let name = self.parse_string(&keys, "type", name)?;
                    types.push(self.parse_type_name(&keys, &name)?);
                }
                Ok(OneOrMultiTypes::new(types.into_iter()))
            }
            _ => Err(SchemaError::UnexpectedType {
                keys: keys.clone(),
                keyword: "type",
            }),
        }
    }

    fn parse_type_name(&self, keys: &Keys, name: &str) -> SchemaResult<SchemaType> {
        SchemaType::from_name(name).ok_or_else(|| SchemaError::InvalidSchemaValue {
            keys: keys.clone(),
            error: format!("unknown type `{}`", name),
        })
    }

    fn parse_schema_array(
        &self,
        keys: &Keys,
        keyword: &'static str,
        value: &'a Value,
    ) -> SchemaResult<Vec<Schema>> {
        let items = value
            .as_array()
            .ok_or_else(|| SchemaError::UnexpectedType {
                keys: keys.clone(),
                keyword,
            })?;
        let mut schemas = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            schemas.push(self.spawn(&keys.join(idx), item).parse()?);
        }
        Ok(schemas)
    }

    fn parse_schema_map(
        &self,
        keys: &Keys,
        keyword: &'static str,
        value: &'a Value,
    ) -> SchemaResult<IndexMap<String, Schema>> {
        let object = value
            .as_object()
            .ok_or_else(|| SchemaError::UnexpectedType {
                keys: keys.clone(),
                keyword,
            })?;
        let mut schemas = IndexMap::with_capacity(object.len());
        for (name, item) in object.iter() {
            let schema = self.spawn(&keys.join(name.as_str()), item).parse()?;
            schemas.insert(name.clone(), schema);
        }
        Ok(schemas)
    }

    fn parse_string_array(
        &self,
        keys: &Keys,
        keyword: &'static str,
        value: &Value,
    ) -> SchemaResult<Vec<String>> {
        let items = value
            .as_array()
            .ok_or_else(|| SchemaError::UnexpectedType {
                keys: keys.clone(),
                keyword,
            })?;
        let mut names = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            names.push(self.parse_string(&keys.join(idx), keyword, item)?);
        }
        Ok(names)
    }

    fn parse_string(&self, keys: &Keys, keyword: &'static str, value: &Value) -> SchemaResult<String> {
        value
            .as_str()
            .map(ToString::to_string)
            .ok_or_else(|| SchemaError::UnexpectedType {
                keys: keys.clone(),
                keyword,
            })
    }

    fn parse_bool(&self, keys: &Keys, keyword: &'static str, value: &Value) -> SchemaResult<bool> {
        value.as_bool().ok_or_else(|| SchemaError::UnexpectedType {
            keys: keys.clone(),
            keyword,
        })
    }

    fn parse_number(&self, keys: &Keys, keyword: &'static str, value: &Value) -> SchemaResult<f64> {
        value.as_f64().ok_or_else(|| SchemaError::UnexpectedType {
            keys: keys.clone(),
            keyword,
        })
    }

    fn parse_count(&self, keys: &Keys, keyword: &'static str, value: &Value) -> SchemaResult<u32> {
        value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| SchemaError::InvalidSchemaValue {
                keys: keys.clone(),
                error: format!("{} must be a non-negative integer", keyword),
            })
    }

    fn check_pattern(&self, keys: &Keys, pattern: &str) -> SchemaResult<()> {
        compile_pattern(pattern).map_err(|error| SchemaError::InvalidPattern {
            keys: keys.clone(),
            pattern: pattern.to_string(),
            error: error.to_string(),
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_empty_schema() {
        let schema = Schema::try_from(&json!({})).unwrap();
        assert_eq!(schema, Schema::default());
    }

    #[test]
    fn test_build_basic_keywords() {
        let schema = Schema::try_from(&json!({
            "type": "object",
            "properties": {
                "name": { "type": "string", "minLength": 1 },
                "age": { "type": "integer", "minimum": 0 }
            },
            "required": ["name"]
        }))
        .unwrap();
        assert!(schema.maybe_type(&SchemaType::Object));
        let properties = schema.properties.as_ref().unwrap();
        assert_eq!(properties.len(), 2);
        assert_eq!(properties["age"].minimum, Some(0.0));
        assert_eq!(schema.required.as_deref(), Some(&["name".to_string()][..]));
    }

    #[test]
    fn test_build_rejects_wrong_kinds() {
        let err = Schema::try_from(&json!({ "properties": [] })).unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedType { keyword: "properties", .. }));
        assert_eq!(err.keys().to_string(), "properties");

        let err = Schema::try_from(&json!({ "allOf": {} })).unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedType { keyword: "allOf", .. }));

        let err = Schema::try_from(&json!({ "required": [1] })).unwrap_err();
        assert!(matches!(err, SchemaError::UnexpectedType { keyword: "required", .. }));
        assert_eq!(err.keys().to_string(), "required.0");

        let err = Schema::try_from(&json!({ "minLength": -1 })).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSchemaValue { .. }));
    }

    #[test]
    fn test_build_rejects_bad_pattern() {
        let err = Schema::try_from(&json!({ "pattern": "(unclosed" })).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidPattern { .. }));

        let err = Schema::try_from(&json!({
            "items": { "pattern": "(unclosed" }
        }))
        .unwrap_err();
        assert_eq!(err.keys().to_string(), "items.pattern");
    }

    #[test]
    fn test_build_nested_keyword_paths() {
        let err = Schema::try_from(&json!({
            "properties": { "a": { "anyOf": [{ "type": "nope" }] } }
        }))
        .unwrap_err();
        assert_eq!(err.keys().to_string(), "properties.a.anyOf.0");
    }

    #[test]
    fn test_build_refs() {
        let schema = Schema::try_from(&json!({
            "$defs": {
                "node": {
                    "type": "object",
                    "properties": { "next": { "$ref": "#/$defs/node" } }
                }
            },
            "$ref": "#/$defs/node"
        }))
        .unwrap();
        assert_eq!(schema.ref_value.as_deref(), Some("#/$defs/node"));
        assert!(schema.defs.as_ref().unwrap().contains_key("node"));

        let err = Schema::try_from(&json!({ "$ref": "#/$defs/missing" })).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownRef { .. }));

        let err = Schema::try_from(&json!({ "$ref": "https://example.com/schema" })).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownRef { .. }));
    }

    #[test]
    fn test_build_refs_with_punctuated_names() {
        let schema = Schema::try_from(&json!({
            "$defs": { "foo-bar": { "type": "integer" } },
            "$ref": "#/$defs/foo-bar"
        }))
        .unwrap();
        assert_eq!(schema.ref_value.as_deref(), Some("#/$defs/foo-bar"));

        // nested pointers are not supported
        let err = Schema::try_from(&json!({
            "$defs": { "a": {} },
            "$ref": "#/$defs/a/b"
        }))
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownRef { .. }));
    }

    #[test]
    fn test_build_draft4_exclusive_bounds() {
        let schema = Schema::try_from(&json!({
            "minimum": 3,
            "exclusiveMinimum": true
        }))
        .unwrap();
        assert_eq!(schema.minimum, None);
        assert_eq!(schema.exclusive_minimum, Some(3.0));

        let schema = Schema::try_from(&json!({
            "minimum": 3,
            "exclusiveMinimum": false
        }))
        .unwrap();
        assert_eq!(schema.minimum, Some(3.0));
        assert_eq!(schema.exclusive_minimum, None);

        let err = Schema::try_from(&json!({ "exclusiveMaximum": true })).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSchemaValue { .. }));

        let schema = Schema::try_from(&json!({ "exclusiveMaximum": 7.5 })).unwrap();
        assert_eq!(schema.exclusive_maximum, Some(7.5));
    }

    #[test]
    fn test_build_keeps_unknown_keywords() {
        let schema = Schema::try_from(&json!({
            "type": "string",
            "x-vendor": { "anything": true }
        }))
        .unwrap();
        let unknown = schema.unknown.as_ref().unwrap();
        assert!(unknown.contains_key("x-vendor"));
    }

    #[test]
    fn test_build_roundtrip() {
        let doc = json!({
            "type": "object",
            "properties": { "tags": { "type": "array", "items": { "type": "string" } } },
            "required": ["tags"],
            "additionalProperties": false
        });
        let schema = Schema::try_from(&doc).unwrap();
        let serialized = serde_json::to_value(&schema).unwrap();
        let rebuilt = Schema::try_from(&serialized).unwrap();
        assert_eq!(schema, rebuilt);
    }

    #[test]
    fn test_from_str() {
        let schema: Schema = r#"{ "type": "integer" }"#.parse().unwrap();
        assert!(schema.maybe_type(&SchemaType::Integer));
        assert!(r#"{ not json"#.parse::<Schema>().is_err());
    }
}
