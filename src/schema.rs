//! Schema declaration: which fields a record has, how each is typed, where its
//! value comes from, and what it falls back to.
//!
//! A schema is plain data. Types opt in by implementing [`EnvSchema`]:
//!
//! ```ignore
//! impl EnvSchema for AppConfig {
//!     fn schema() -> Schema {
//!         Schema::new("AppConfig")
//!             .field(FieldDescriptor::new("name", TypeTag::of::<String>()))
//!             .field(FieldDescriptor::new("port", TypeTag::of::<u32>()).default(3000u32))
//!             .field(FieldDescriptor::new("cache", TypeTag::optional(
//!                 TypeTag::record(CacheConfig::schema()),
//!             )))
//!             .env_keys([("name", "APP_NAME"), ("port", "PORT")])
//!     }
//! }
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::BindError;
use crate::types::TypeTag;
use crate::value::{self, Value, ValueError};

/// Key mapping entry meaning "never read this field from the environment".
pub const SKIP: &str = "-";

/// A type that can be bound from the environment.
///
/// The schema's field names must match the names serde uses for the struct,
/// since the bound record is deserialized into `Self` by name.
pub trait EnvSchema: DeserializeOwned {
    fn schema() -> Schema;
}

/// Where a field's value is looked up.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum KeySpec {
    /// Use the field's own name.
    #[default]
    Name,
    /// Use this key instead of the field name.
    Explicit(String),
    /// Never look the field up.
    Skip,
}

impl KeySpec {
    /// Parse a mapping table entry. [`SKIP`] (`"-"`) is the skip sentinel.
    pub fn parse(key: &str) -> Self {
        if key == SKIP {
            KeySpec::Skip
        } else {
            KeySpec::Explicit(key.to_string())
        }
    }
}

/// One field of a [`Schema`].
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    name: String,
    type_tag: TypeTag,
    key: KeySpec,
    default: Option<Result<Value, ValueError>>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, type_tag: TypeTag) -> Self {
        Self {
            name: name.into(),
            type_tag,
            key: KeySpec::Name,
            default: None,
        }
    }

    /// Read this field from `key` instead of its name. `"-"` skips the field.
    pub fn env(mut self, key: &str) -> Self {
        self.key = KeySpec::parse(key);
        self
    }

    /// Never read this field from the environment.
    pub fn skip(mut self) -> Self {
        self.key = KeySpec::Skip;
        self
    }

    /// Value used when the environment does not supply one.
    ///
    /// Any `Serialize` value works, including whole structs for optional
    /// nested records. A value with no bound representation (a `Vec`, say) is
    /// reported as [`BindError::InvalidDefault`] when the default is needed.
    pub fn default<V: Serialize>(mut self, value: V) -> Self {
        self.default = Some(value::to_value(&value));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_tag(&self) -> &TypeTag {
        &self.type_tag
    }

    pub fn key_spec(&self) -> &KeySpec {
        &self.key
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// The declared default, if it converted cleanly.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref().and_then(|d| d.as_ref().ok())
    }

    /// The key this field is read from, or `None` if skipped.
    pub fn effective_key(&self, prefix: &str) -> Option<String> {
        match &self.key {
            KeySpec::Skip => None,
            KeySpec::Explicit(key) => Some(format!("{prefix}{key}")),
            KeySpec::Name => Some(format!("{prefix}{}", self.name)),
        }
    }

    pub(crate) fn resolve_default(&self) -> Result<Option<Value>, BindError> {
        match &self.default {
            None => Ok(None),
            Some(Ok(value)) => Ok(Some(value.clone())),
            Some(Err(e)) => Err(BindError::InvalidDefault {
                field: self.name.clone(),
                reason: e.to_string(),
            }),
        }
    }
}

/// The ordered field list of one record type.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field. Fields bind in the order they are added.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Apply a field-name → environment-key mapping table.
    ///
    /// A key of `"-"` marks the field as skipped. Fields not named in the
    /// table keep their current key (their own name unless set otherwise).
    pub fn env_keys<'a>(mut self, table: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (field_name, key) in table {
            match self.fields.iter_mut().find(|f| f.name == field_name) {
                Some(field) => field.key = KeySpec::parse(key),
                None => warn!(
                    schema = %self.name,
                    field = field_name,
                    "env key mapping names an unknown field"
                ),
            }
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Every non-skipped effective key, through nested records, in
    /// declaration order.
    pub fn keys(&self, prefix: &str) -> Vec<String> {
        let mut out = Vec::new();
        collect_keys(self, prefix, &mut out);
        out
    }
}

fn collect_keys(schema: &Schema, prefix: &str, out: &mut Vec<String>) {
    for field in &schema.fields {
        match field.type_tag.strip_optional() {
            TypeTag::Record(child) => collect_keys(child, prefix, out),
            TypeTag::Primitive(_) | TypeTag::Optional(_) => {
                if let Some(key) = field.effective_key(prefix) {
                    out.push(key);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{AppConfig, CacheConfig};

    #[test]
    fn skip_sentinel_parses() {
        assert_eq!(KeySpec::parse("-"), KeySpec::Skip);
        assert_eq!(KeySpec::parse("PORT"), KeySpec::Explicit("PORT".into()));
        assert_eq!(KeySpec::parse("--"), KeySpec::Explicit("--".into()));
    }

    #[test]
    fn effective_key_resolution() {
        let by_name = FieldDescriptor::new("port", TypeTag::of::<u16>());
        let explicit = by_name.clone().env("PORT");
        let skipped = by_name.clone().skip();

        assert_eq!(by_name.effective_key(""), Some("port".into()));
        assert_eq!(explicit.effective_key(""), Some("PORT".into()));
        assert_eq!(explicit.effective_key("APP_"), Some("APP_PORT".into()));
        assert_eq!(skipped.effective_key("APP_"), None);
    }

    #[test]
    fn env_keys_table_applies_mapping() {
        let schema = Schema::new("S")
            .field(FieldDescriptor::new("a", TypeTag::of::<String>()))
            .field(FieldDescriptor::new("b", TypeTag::of::<String>()))
            .field(FieldDescriptor::new("c", TypeTag::of::<String>()))
            .env_keys([("a", "KEY_A"), ("b", "-"), ("nope", "X")]);

        assert_eq!(
            schema.field_named("a").unwrap().key_spec(),
            &KeySpec::Explicit("KEY_A".into())
        );
        assert_eq!(schema.field_named("b").unwrap().key_spec(), &KeySpec::Skip);
        assert_eq!(schema.field_named("c").unwrap().key_spec(), &KeySpec::Name);
    }

    #[test]
    fn default_converts_to_value() {
        let f = FieldDescriptor::new("ttl", TypeTag::of::<u32>()).default(60u32);
        assert!(f.has_default());
        assert_eq!(f.default_value(), Some(&Value::UInt(60)));
        assert_eq!(f.resolve_default().unwrap(), Some(Value::UInt(60)));
    }

    #[test]
    fn unrepresentable_default_surfaces_on_resolve() {
        let f = FieldDescriptor::new("hosts", TypeTag::of::<String>()).default(vec!["a"]);
        assert!(f.has_default());
        assert_eq!(f.default_value(), None);
        let err = f.resolve_default().unwrap_err();
        assert!(matches!(err, BindError::InvalidDefault { ref field, .. } if field == "hosts"));
    }

    #[test]
    fn keys_walks_nested_records_in_order() {
        assert_eq!(
            AppConfig::schema().keys(""),
            vec!["APP_NAME", "PORT", "DEBUG", "CACHE_ENABLED", "CACHE_TTL"]
        );
        assert_eq!(
            CacheConfig::schema().keys("X_"),
            vec!["X_CACHE_ENABLED", "X_CACHE_TTL"]
        );
    }
}
