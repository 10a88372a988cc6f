//! The schema model (spec §3.1) plus its loader (`Schema::from_json`, spec
//! §4.1) and verifier (`Schema::verify`, spec §4.2).
//!
//! A [`Schema`] is an immutable tagged value: an optional table of named
//! [`definitions`](Schema::definitions) plus exactly one of the eight
//! mutually exclusive [`Form`] variants. Keeping `form` a closed enum
//! matched exhaustively (rather than an open hierarchy of keyword
//! validators) means a missing form is a compile-time error, not a
//! silent no-op.
use crate::{error::InvalidSchema, primitive_type::Type};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::convert::TryFrom;

/// The nine keyword keys the loader inspects. Anything else in a schema
/// object is ignored for form detection (spec §4.1 step 3).
const KEYWORDS: &[&str] = &[
    "ref",
    "type",
    "enum",
    "elements",
    "properties",
    "optionalProperties",
    "additionalProperties",
    "values",
    "discriminator",
];

/// A parsed, syntactically valid JDDF schema.
///
/// Only the root schema may carry [`definitions`](Schema::definitions) —
/// the loader does not enforce this, [`Schema::verify`] does. Always run
/// `verify` before trusting a schema you didn't construct yourself.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub(crate) definitions: Option<BTreeMap<String, Schema>>,
    pub(crate) form: Form,
}

/// One of the eight mutually exclusive shapes a schema can take.
#[derive(Debug, Clone, PartialEq)]
pub enum Form {
    /// Accepts anything.
    Empty,
    /// Delegates to `root.definitions[name]`.
    Ref(String),
    /// Primitive-type check.
    Type(Type),
    /// Instance must be one of these distinct, non-empty strings.
    Enum(Vec<String>),
    /// Instance must be an array; the sub-schema validates each element.
    Elements(Box<Schema>),
    /// Object shape: named required/optional properties plus a policy for
    /// properties not named by either.
    Properties {
        required: Option<BTreeMap<String, Schema>>,
        optional: Option<BTreeMap<String, Schema>>,
        additional: bool,
    },
    /// Instance must be an object; the sub-schema validates each value.
    Values(Box<Schema>),
    /// Tagged-union dispatch: `tag` names a string property whose value
    /// selects a `Properties`-form schema from `mapping`.
    Discriminator {
        tag: String,
        mapping: BTreeMap<String, Schema>,
    },
}

impl Schema {
    /// Parse a JSON value into a [`Schema`], rejecting malformed input.
    ///
    /// Total on valid inputs; recurses into child schemas. Does not check
    /// the cross-form invariants `verify` enforces (ref targets existing,
    /// properties/optionalProperties disjointness, discriminator
    /// constraints) — a freshly loaded schema must still be verified.
    pub fn from_json(value: &Value) -> Result<Schema, InvalidSchema> {
        let object = value
            .as_object()
            .ok_or_else(|| InvalidSchema::new("schema must be object"))?;

        let definitions = match object.get("definitions") {
            Some(Value::Object(defs)) => {
                let mut map = BTreeMap::new();
                for (name, sub) in defs {
                    map.insert(name.clone(), Schema::from_json(sub)?);
                }
                Some(map)
            }
            Some(_) => return Err(InvalidSchema::new("definitions must be object")),
            None => None,
        };

        let form = Form::from_object(object)?;

        Ok(Schema { definitions, form })
    }

    /// Check the semantic invariants that cross sub-schemas: ref targets
    /// exist, `definitions` only appears on the root, properties/optional
    /// key sets are disjoint, and discriminator mappings are well formed
    /// (spec §4.2).
    pub fn verify(&self) -> Result<(), InvalidSchema> {
        verify_node(self, self)
    }

    /// Re-project this schema back into the JSON shape `from_json` would
    /// accept. Supports the round-trip testable property from spec §8.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        if let Some(definitions) = &self.definitions {
            let mut defs = Map::new();
            for (name, sub) in definitions {
                defs.insert(name.clone(), sub.to_json());
            }
            object.insert("definitions".to_string(), Value::Object(defs));
        }
        self.form.write_keywords(&mut object);
        Value::Object(object)
    }
}

impl Form {
    fn from_object(object: &Map<String, Value>) -> Result<Form, InvalidSchema> {
        let present: Vec<&str> = KEYWORDS
            .iter()
            .copied()
            .filter(|k| object.contains_key(*k))
            .collect();

        let candidates = [
            object.contains_key("ref"),
            object.contains_key("type"),
            object.contains_key("enum"),
            object.contains_key("elements"),
            object.contains_key("properties")
                || object.contains_key("optionalProperties")
                || object.contains_key("additionalProperties"),
            object.contains_key("values"),
            object.contains_key("discriminator"),
        ];
        if candidates.iter().filter(|present| **present).count() > 1 {
            return Err(InvalidSchema::new("invalid form"));
        }
        if present.is_empty() {
            return Ok(Form::Empty);
        }

        if let Some(reference) = object.get("ref") {
            return Form::load_ref(reference);
        }
        if let Some(ty) = object.get("type") {
            return Form::load_type(ty);
        }
        if let Some(values) = object.get("enum") {
            return Form::load_enum(values);
        }
        if let Some(sub) = object.get("elements") {
            return Ok(Form::Elements(Box::new(Schema::from_json(sub)?)));
        }
        if candidates[4] {
            return Form::load_properties(object);
        }
        if let Some(sub) = object.get("values") {
            return Ok(Form::Values(Box::new(Schema::from_json(sub)?)));
        }
        if let Some(discriminator) = object.get("discriminator") {
            return Form::load_discriminator(discriminator);
        }
        unreachable!("candidates check above guarantees one of the branches matched")
    }

    fn load_ref(value: &Value) -> Result<Form, InvalidSchema> {
        match value.as_str() {
            Some(name) => Ok(Form::Ref(name.to_string())),
            None => Err(InvalidSchema::new("ref must be a string")),
        }
    }

    fn load_type(value: &Value) -> Result<Form, InvalidSchema> {
        let name = value
            .as_str()
            .ok_or_else(|| InvalidSchema::new("type must be a string"))?;
        Type::try_from(name)
            .map(Form::Type)
            .map_err(|()| InvalidSchema::new(format!("unknown type name {:?}", name)))
    }

    fn load_enum(value: &Value) -> Result<Form, InvalidSchema> {
        let items = value
            .as_array()
            .ok_or_else(|| InvalidSchema::new("enum must be an array"))?;
        if items.is_empty() {
            return Err(InvalidSchema::new("enum must not be empty"));
        }
        let mut seen = std::collections::HashSet::with_capacity(items.len());
        let mut values = Vec::with_capacity(items.len());
        for item in items {
            let s = item
                .as_str()
                .ok_or_else(|| InvalidSchema::new("enum values must be strings"))?;
            if !seen.insert(s.to_string()) {
                return Err(InvalidSchema::new(format!("duplicate enum value {:?}", s)));
            }
            values.push(s.to_string());
        }
        Ok(Form::Enum(values))
    }

    fn load_properties(object: &Map<String, Value>) -> Result<Form, InvalidSchema> {
        let required = match object.get("properties") {
            Some(Value::Object(map)) => Some(load_schema_map(map)?),
            Some(_) => return Err(InvalidSchema::new("properties must be an object")),
            None => None,
        };
        let optional = match object.get("optionalProperties") {
            Some(Value::Object(map)) => Some(load_schema_map(map)?),
            Some(_) => return Err(InvalidSchema::new("optionalProperties must be an object")),
            None => None,
        };
        let additional = match object.get("additionalProperties") {
            Some(Value::Bool(b)) => *b,
            Some(_) => return Err(InvalidSchema::new("additionalProperties must be a boolean")),
            None => false,
        };
        if required.is_none() && optional.is_none() {
            return Err(InvalidSchema::new(
                "properties form requires `properties` or `optionalProperties`",
            ));
        }
        Ok(Form::Properties {
            required,
            optional,
            additional,
        })
    }

    fn load_discriminator(value: &Value) -> Result<Form, InvalidSchema> {
        let inner = value
            .as_object()
            .ok_or_else(|| InvalidSchema::new("discriminator must be an object"))?;
        let tag = inner
            .get("tag")
            .and_then(Value::as_str)
            .ok_or_else(|| InvalidSchema::new("discriminator.tag must be a string"))?
            .to_string();
        let mapping_obj = inner
            .get("mapping")
            .and_then(Value::as_object)
            .ok_or_else(|| InvalidSchema::new("discriminator.mapping must be an object"))?;
        let mapping = load_schema_map(mapping_obj)?;
        Ok(Form::Discriminator { tag, mapping })
    }

    fn write_keywords(&self, object: &mut Map<String, Value>) {
        match self {
            Form::Empty => {}
            Form::Ref(name) => {
                object.insert("ref".to_string(), Value::String(name.clone()));
            }
            Form::Type(t) => {
                object.insert("type".to_string(), Value::String(t.to_string()));
            }
            Form::Enum(values) => {
                object.insert(
                    "enum".to_string(),
                    Value::Array(values.iter().cloned().map(Value::String).collect()),
                );
            }
            Form::Elements(sub) => {
                object.insert("elements".to_string(), sub.to_json());
            }
            Form::Properties {
                required,
                optional,
                additional,
            } => {
                if let Some(required) = required {
                    object.insert(
                        "properties".to_string(),
                        Value::Object(write_schema_map(required)),
                    );
                }
                if let Some(optional) = optional {
                    object.insert(
                        "optionalProperties".to_string(),
                        Value::Object(write_schema_map(optional)),
                    );
                }
                if *additional {
                    object.insert("additionalProperties".to_string(), Value::Bool(true));
                }
            }
            Form::Values(sub) => {
                object.insert("values".to_string(), sub.to_json());
            }
            Form::Discriminator { tag, mapping } => {
                let mut inner = Map::new();
                inner.insert("tag".to_string(), Value::String(tag.clone()));
                inner.insert("mapping".to_string(), Value::Object(write_schema_map(mapping)));
                object.insert("discriminator".to_string(), Value::Object(inner));
            }
        }
    }
}

fn load_schema_map(object: &Map<String, Value>) -> Result<BTreeMap<String, Schema>, InvalidSchema> {
    let mut map = BTreeMap::new();
    for (key, sub) in object {
        map.insert(key.clone(), Schema::from_json(sub)?);
    }
    Ok(map)
}

fn write_schema_map(map: &BTreeMap<String, Schema>) -> Map<String, Value> {
    let mut object = Map::new();
    for (key, sub) in map {
        object.insert(key.clone(), sub.to_json());
    }
    object
}

fn verify_node(schema: &Schema, root: &Schema) -> Result<(), InvalidSchema> {
    if let Some(definitions) = &schema.definitions {
        if !std::ptr::eq(schema, root) {
            return Err(InvalidSchema::new(
                "definitions may only appear on the root schema",
            ));
        }
        for sub in definitions.values() {
            verify_node(sub, root)?;
        }
    }

    match &schema.form {
        Form::Empty | Form::Type(_) | Form::Enum(_) => Ok(()),
        Form::Ref(name) => {
            let definitions = root.definitions.as_ref().ok_or_else(|| {
                InvalidSchema::new(format!(
                    "ref {:?} cannot resolve: root schema has no definitions",
                    name
                ))
            })?;
            if definitions.contains_key(name) {
                Ok(())
            } else {
                Err(InvalidSchema::new(format!(
                    "ref {:?} does not resolve in root definitions",
                    name
                )))
            }
        }
        Form::Elements(sub) | Form::Values(sub) => verify_node(sub, root),
        Form::Properties {
            required, optional, ..
        } => {
            if let (Some(required), Some(optional)) = (required, optional) {
                for key in required.keys() {
                    if optional.contains_key(key) {
                        return Err(InvalidSchema::new(format!(
                            "property {:?} is both required and optional",
                            key
                        )));
                    }
                }
            }
            if let Some(required) = required {
                for sub in required.values() {
                    verify_node(sub, root)?;
                }
            }
            if let Some(optional) = optional {
                for sub in optional.values() {
                    verify_node(sub, root)?;
                }
            }
            Ok(())
        }
        Form::Discriminator { tag, mapping } => {
            for sub in mapping.values() {
                match &sub.form {
                    Form::Properties {
                        required, optional, ..
                    } => {
                        let clashes = required.as_ref().map_or(false, |r| r.contains_key(tag))
                            || optional.as_ref().map_or(false, |o| o.contains_key(tag));
                        if clashes {
                            return Err(InvalidSchema::new(format!(
                                "discriminator tag {:?} must not be a property of its mapping",
                                tag
                            )));
                        }
                    }
                    _ => {
                        return Err(InvalidSchema::new(
                            "discriminator mapping values must be in properties form",
                        ))
                    }
                }
                verify_node(sub, root)?;
            }
            Ok(())
        }
    }
}
