//! The validation engine (spec §4.4–§4.6): walks a verified [`Schema`] and
//! a JSON instance in lockstep, maintaining the two path stacks described
//! in the data model and honoring the `max_depth` / `max_errors` limits.
use crate::{
    checks,
    error::{MaxDepthExceeded, ValidationError},
    primitive_type::Type,
    schema::{Form, Schema},
};
use serde_json::{Map, Value};

/// Validator limits (spec §3.2). `0` disables the corresponding limit.
///
/// Mirrors the teacher's small `Default`-deriving configuration structs
/// (e.g. `CompilationConfig`): a builder with `&mut Self`-returning setters,
/// immutable once handed to [`validate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidatorConfig {
    max_depth: usize,
    max_errors: usize,
}

impl ValidatorConfig {
    /// Build a config from explicit limits. `0` means "no limit" for
    /// either field, matching the shape used by sibling JDDF
    /// implementations' `ValidateOptions::new`.
    #[must_use]
    pub fn new(max_depth: usize, max_errors: usize) -> Self {
        ValidatorConfig {
            max_depth,
            max_errors,
        }
    }

    /// Cap the number of currently active reference chains. `0` disables
    /// the limit.
    pub fn with_max_depth(&mut self, max_depth: usize) -> &mut Self {
        self.max_depth = max_depth;
        self
    }

    /// Stop as soon as the Nth error would be produced, returning exactly
    /// that many. `0` disables the limit.
    pub fn with_max_errors(&mut self, max_errors: usize) -> &mut Self {
        self.max_errors = max_errors;
        self
    }
}

/// Run `schema` (trusted to have passed [`Schema::verify`]) against
/// `instance` under `config`'s limits.
///
/// Returns the accumulated errors, or [`MaxDepthExceeded`] if a `Ref`
/// traversal would have exceeded `config`'s `max_depth` — in that case no
/// partial errors are returned alongside it (spec §4.3, §7).
pub fn validate(
    config: &ValidatorConfig,
    schema: &Schema,
    instance: &Value,
) -> Result<Vec<ValidationError>, MaxDepthExceeded> {
    let mut machine = Machine {
        root: schema,
        max_depth: config.max_depth,
        max_errors: config.max_errors,
        instance_tokens: Vec::new(),
        schema_tokens: vec![Vec::new()],
        errors: Vec::new(),
    };
    match machine.validate(schema, instance, None) {
        Ok(()) | Err(Abort::MaxErrors) => Ok(machine.errors),
        Err(Abort::MaxDepth) => Err(MaxDepthExceeded),
    }
}

/// The two in-band cancellation signals (spec §5): both are terminating
/// exits from the recursive walk, threaded through as a sentinel `Result`
/// rather than a panic or an exception, per the "early exit" design note.
/// Neither variant escapes this module's public surface.
enum Abort {
    MaxDepth,
    MaxErrors,
}

struct Machine<'a> {
    root: &'a Schema,
    max_depth: usize,
    max_errors: usize,
    instance_tokens: Vec<String>,
    schema_tokens: Vec<Vec<String>>,
    errors: Vec<ValidationError>,
}

impl<'a> Machine<'a> {
    fn push_schema_token(&mut self, token: impl Into<String>) {
        self.schema_tokens
            .last_mut()
            .expect("schema_tokens always has a top frame")
            .push(token.into());
    }

    fn pop_schema_token(&mut self) {
        self.schema_tokens
            .last_mut()
            .expect("schema_tokens always has a top frame")
            .pop();
    }

    fn push_instance_token(&mut self, token: impl Into<String>) {
        self.instance_tokens.push(token.into());
    }

    fn pop_instance_token(&mut self) {
        self.instance_tokens.pop();
    }

    /// Append one error at the current path pair. Both paths are copied by
    /// value, not aliased to the live stacks (spec §4.3). Returns
    /// `Err(Abort::MaxErrors)` the instant the count reaches `max_errors`.
    fn emit(&mut self) -> Result<(), Abort> {
        let schema_path = self
            .schema_tokens
            .last()
            .expect("schema_tokens always has a top frame")
            .clone();
        let instance_path = self.instance_tokens.clone();
        self.errors.push(ValidationError::new(instance_path, schema_path));
        if self.max_errors != 0 && self.errors.len() == self.max_errors {
            return Err(Abort::MaxErrors);
        }
        Ok(())
    }

    /// `validate(M, schema, instance, parent_tag)` from spec §4.5.
    ///
    /// `parent_tag` is the discriminator tag key of the enclosing
    /// `Discriminator` form, if any — it is exempted from the
    /// `additionalProperties: false` check on the dispatched sub-schema.
    fn validate(
        &mut self,
        schema: &Schema,
        instance: &Value,
        parent_tag: Option<&str>,
    ) -> Result<(), Abort> {
        match &schema.form {
            Form::Empty => Ok(()),
            Form::Ref(name) => self.validate_ref(name, instance),
            Form::Type(t) => self.validate_type(*t, instance),
            Form::Enum(values) => self.validate_enum(values, instance),
            Form::Elements(sub) => self.validate_elements(sub, instance),
            Form::Properties {
                required,
                optional,
                additional,
            } => self.validate_properties(required, optional, *additional, instance, parent_tag),
            Form::Values(sub) => self.validate_values(sub, instance),
            Form::Discriminator { tag, mapping } => {
                self.validate_discriminator(tag, mapping, instance)
            }
        }
    }

    fn validate_ref(&mut self, name: &str, instance: &Value) -> Result<(), Abort> {
        if self.max_depth != 0 && self.schema_tokens.len() == self.max_depth {
            return Err(Abort::MaxDepth);
        }
        self.schema_tokens
            .push(vec!["definitions".to_string(), name.to_string()]);
        let target = &self
            .root
            .definitions
            .as_ref()
            .expect("verified schema: ref resolves in root.definitions")[name];
        let result = self.validate(target, instance, None);
        self.schema_tokens.pop();
        result
    }

    fn validate_type(&mut self, t: Type, instance: &Value) -> Result<(), Abort> {
        self.push_schema_token("type");
        if !type_matches(t, instance) {
            self.emit()?;
        }
        self.pop_schema_token();
        Ok(())
    }

    fn validate_enum(&mut self, values: &[String], instance: &Value) -> Result<(), Abort> {
        self.push_schema_token("enum");
        let matches = instance
            .as_str()
            .map_or(false, |s| values.iter().any(|v| v == s));
        if !matches {
            self.emit()?;
        }
        self.pop_schema_token();
        Ok(())
    }

    fn validate_elements(&mut self, sub: &Schema, instance: &Value) -> Result<(), Abort> {
        self.push_schema_token("elements");
        if let Some(items) = instance.as_array() {
            for (index, item) in items.iter().enumerate() {
                self.push_instance_token(index.to_string());
                self.validate(sub, item, None)?;
                self.pop_instance_token();
            }
        } else {
            self.emit()?;
        }
        self.pop_schema_token();
        Ok(())
    }

    fn validate_properties(
        &mut self,
        required: &Option<std::collections::BTreeMap<String, Schema>>,
        optional: &Option<std::collections::BTreeMap<String, Schema>>,
        additional: bool,
        instance: &Value,
        parent_tag: Option<&str>,
    ) -> Result<(), Abort> {
        if let Some(object) = instance.as_object() {
            if let Some(required) = required {
                self.push_schema_token("properties");
                for (key, sub) in required {
                    self.push_schema_token(key.clone());
                    if let Some(value) = object.get(key) {
                        self.push_instance_token(key.clone());
                        self.validate(sub, value, None)?;
                        self.pop_instance_token();
                    } else {
                        self.emit()?;
                    }
                    self.pop_schema_token();
                }
                self.pop_schema_token();
            }
            if let Some(optional) = optional {
                self.push_schema_token("optionalProperties");
                for (key, sub) in optional {
                    self.push_schema_token(key.clone());
                    if let Some(value) = object.get(key) {
                        self.push_instance_token(key.clone());
                        self.validate(sub, value, None)?;
                        self.pop_instance_token();
                    }
                    self.pop_schema_token();
                }
                self.pop_schema_token();
            }
            if !additional {
                self.reject_additional_properties(object, required, optional, parent_tag)?;
            }
        } else {
            self.push_schema_token(if required.is_some() {
                "properties"
            } else {
                "optionalProperties"
            });
            self.emit()?;
            self.pop_schema_token();
        }
        Ok(())
    }

    fn reject_additional_properties(
        &mut self,
        object: &Map<String, Value>,
        required: &Option<std::collections::BTreeMap<String, Schema>>,
        optional: &Option<std::collections::BTreeMap<String, Schema>>,
        parent_tag: Option<&str>,
    ) -> Result<(), Abort> {
        for key in object.keys() {
            let named = required.as_ref().map_or(false, |r| r.contains_key(key))
                || optional.as_ref().map_or(false, |o| o.contains_key(key))
                || parent_tag.map_or(false, |tag| tag == key);
            if !named {
                self.push_instance_token(key.clone());
                self.emit()?;
                self.pop_instance_token();
            }
        }
        Ok(())
    }

    fn validate_values(&mut self, sub: &Schema, instance: &Value) -> Result<(), Abort> {
        self.push_schema_token("values");
        if let Some(object) = instance.as_object() {
            for (key, value) in object {
                self.push_instance_token(key.clone());
                self.validate(sub, value, None)?;
                self.pop_instance_token();
            }
        } else {
            self.emit()?;
        }
        self.pop_schema_token();
        Ok(())
    }

    fn validate_discriminator(
        &mut self,
        tag: &str,
        mapping: &std::collections::BTreeMap<String, Schema>,
        instance: &Value,
    ) -> Result<(), Abort> {
        self.push_schema_token("discriminator");
        if let Some(object) = instance.as_object() {
            match object.get(tag) {
                None => {
                    self.push_schema_token("tag");
                    self.emit()?;
                    self.pop_schema_token();
                }
                Some(value) => match value.as_str() {
                    None => {
                        self.push_schema_token("tag");
                        self.push_instance_token(tag.to_string());
                        self.emit()?;
                        self.pop_instance_token();
                        self.pop_schema_token();
                    }
                    Some(variant) => match mapping.get(variant) {
                        None => {
                            self.push_schema_token("mapping");
                            self.push_instance_token(tag.to_string());
                            self.emit()?;
                            self.pop_instance_token();
                            self.pop_schema_token();
                        }
                        Some(sub) => {
                            self.push_schema_token("mapping");
                            self.push_schema_token(variant.to_string());
                            self.validate(sub, instance, Some(tag))?;
                            self.pop_schema_token();
                            self.pop_schema_token();
                        }
                    },
                },
            }
        } else {
            self.emit()?;
        }
        self.pop_schema_token();
        Ok(())
    }
}

/// Does `instance` satisfy primitive type `t` (spec §4.5, tie-breaks in
/// §4.5 and §9)?
fn type_matches(t: Type, instance: &Value) -> bool {
    match t {
        Type::Boolean => instance.is_boolean(),
        Type::Float32 | Type::Float64 => instance.is_number(),
        Type::String => instance.is_string(),
        Type::Timestamp => instance.as_str().map_or(false, checks::timestamp),
        Type::Int8
        | Type::Uint8
        | Type::Int16
        | Type::Uint16
        | Type::Int32
        | Type::Uint32 => {
            let (min, max) = t.integer_bounds().expect("integer variant has bounds");
            instance.as_f64().map_or(false, |x| {
                x.is_finite() && x.round() == x && x >= min && x <= max
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;
    use serde_json::json;
    use test_case::test_case;

    fn load(schema: Value) -> Schema {
        let schema = Schema::from_json(&schema).unwrap();
        schema.verify().unwrap();
        schema
    }

    fn errs(schema: &Value, instance: &Value) -> Vec<ValidationError> {
        let schema = load(schema.clone());
        validate(&ValidatorConfig::default(), &schema, instance).unwrap()
    }

    #[test]
    fn primitive_type_miss() {
        let errors = errs(&json!({"type": "boolean"}), &json!(null));
        assert_eq!(errors, vec![ValidationError::new(vec![], vec!["type".into()])]);
    }

    #[test]
    fn empty_schema_never_errors() {
        for instance in [json!(null), json!(1), json!("x"), json!([1, 2]), json!({"a": 1})] {
            assert_eq!(errs(&json!({}), &instance), vec![]);
        }
    }

    #[test]
    fn properties_with_three_problems() {
        let schema = json!({
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "uint32"},
                "phones": {"elements": {"type": "string"}}
            }
        });
        let instance = json!({"age": "42", "phones": ["+44 1234567", 442345678]});
        let mut errors = errs(&schema, &instance);
        errors.sort_by_key(|e| e.schema_path().join("/"));
        let mut expected = vec![
            ValidationError::new(vec![], vec!["properties".into(), "name".into()]),
            ValidationError::new(
                vec!["age".into()],
                vec!["properties".into(), "age".into(), "type".into()],
            ),
            ValidationError::new(
                vec!["phones".into(), "1".into()],
                vec![
                    "properties".into(),
                    "phones".into(),
                    "elements".into(),
                    "type".into(),
                ],
            ),
        ];
        expected.sort_by_key(|e| e.schema_path().join("/"));
        assert_eq!(errors, expected);
    }

    #[test]
    fn max_depth_cycle_aborts() {
        let schema = load(json!({"definitions": {"loop": {"ref": "loop"}}, "ref": "loop"}));
        let config = ValidatorConfig::new(32, 0);
        let result = validate(&config, &schema, &json!(null));
        assert!(result.is_err());
    }

    #[test]
    fn max_errors_clamps() {
        let schema = load(json!({"elements": {"type": "string"}}));
        let instance = json!([null, null, null, null, null]);
        let config = ValidatorConfig::new(0, 3);
        let errors = validate(&config, &schema, &instance).unwrap();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn discriminator_success_does_not_flag_tag() {
        let schema = json!({
            "discriminator": {
                "tag": "t",
                "mapping": {"a": {"properties": {"x": {"type": "string"}}}}
            }
        });
        let instance = json!({"t": "a", "x": "hi"});
        assert_eq!(errs(&schema, &instance), vec![]);
    }

    #[test_case(json!(256), true)]
    #[test_case(json!(255), false)]
    #[test_case(json!(1.5), true)]
    #[test_case(json!(1.0), false)]
    fn integer_bounds(instance: Value, expect_error: bool) {
        let errors = errs(&json!({"type": "uint8"}), &instance);
        assert_eq!(!errors.is_empty(), expect_error);
    }

    #[test]
    fn ref_equivalence_modulo_schema_path_prefix() {
        let def = json!({"properties": {"x": {"type": "string"}}});
        let via_ref = load(json!({"definitions": {"d": def}, "ref": "d"}));
        let inlined = load(def);
        let instance = json!({"x": 1});
        let ref_errors = validate(&ValidatorConfig::default(), &via_ref, &instance).unwrap();
        let inlined_errors = validate(&ValidatorConfig::default(), &inlined, &instance).unwrap();
        assert_eq!(ref_errors.len(), inlined_errors.len());
        assert_eq!(ref_errors[0].instance_path(), inlined_errors[0].instance_path());
        assert_eq!(
            ref_errors[0].schema_path(),
            ["definitions", "d", "properties", "x", "type"]
        );
        assert_eq!(inlined_errors[0].schema_path(), ["properties", "x", "type"]);
    }

    #[test]
    fn stack_balance_after_validation() {
        let schema = load(json!({
            "properties": {"a": {"elements": {"type": "string"}}},
            "optionalProperties": {"b": {"values": {"type": "uint8"}}}
        }));
        let instance = json!({"a": [1, "x"], "b": {"k": 300}, "extra": true});
        let mut machine = Machine {
            root: &schema,
            max_depth: 0,
            max_errors: 0,
            instance_tokens: Vec::new(),
            schema_tokens: vec![Vec::new()],
            errors: Vec::new(),
        };
        machine.validate(&schema, &instance, None).unwrap();
        assert!(machine.instance_tokens.is_empty());
        assert_eq!(machine.schema_tokens.len(), 1);
        assert!(machine.schema_tokens[0].is_empty());
    }
}
