//! The schema walker: binds a [`Schema`] against an environment snapshot.
//!
//! Fields are visited once each, in declaration order. Per field the walker
//! resolves the effective key (prefix + explicit key or field name, or none
//! when skipped) and dispatches on the declared type:
//!
//! | Declared type          | Key found        | Key missing / skipped          |
//! |------------------------|------------------|--------------------------------|
//! | primitive              | coerce           | default, else `MissingVariable`|
//! | `Optional(primitive)`  | coerce           | default, else `None`           |
//! | `Record`               | always recurse   | always recurse                 |
//! | `Optional(Record)`     | recurse if any descendant key is present, else default, else `None` |
//!
//! A coercion failure is always fatal, including for optional fields. The first
//! failing field aborts the bind; nothing partial is returned.

use tracing::{debug, trace};

use crate::coerce::coerce;
use crate::env::EnvSource;
use crate::error::BindError;
use crate::schema::{FieldDescriptor, Schema};
use crate::types::{Primitive, TypeTag};
use crate::value::{Record, Value};

/// Bind `schema` against `env`, producing one value per field.
pub fn bind<S: EnvSource + ?Sized>(schema: &Schema, env: &S) -> Result<Record, BindError> {
    bind_prefixed(schema, env, "")
}

/// [`bind`] with `prefix` prepended to every non-skipped key.
pub fn bind_prefixed<S: EnvSource + ?Sized>(
    schema: &Schema,
    env: &S,
    prefix: &str,
) -> Result<Record, BindError> {
    Walker { env, prefix }.record(schema)
}

/// Whether any field of `schema`, through nested records, has its key in `env`.
///
/// Pure membership check: values are not coerced or validated.
pub fn has_any_bound_key<S: EnvSource + ?Sized>(schema: &Schema, env: &S) -> bool {
    Walker { env, prefix: "" }.has_any_bound_key(schema)
}

struct Walker<'a, S: ?Sized> {
    env: &'a S,
    prefix: &'a str,
}

impl<S: EnvSource + ?Sized> Walker<'_, S> {
    fn record(&self, schema: &Schema) -> Result<Record, BindError> {
        let mut record = Record::with_capacity(schema.fields().len());
        for field in schema.fields() {
            let value = self.field(field)?;
            record.insert(field.name(), value);
        }
        Ok(record)
    }

    fn field(&self, field: &FieldDescriptor) -> Result<Value, BindError> {
        match field.type_tag() {
            TypeTag::Primitive(p) => self.required_primitive(field, *p),
            TypeTag::Record(child) => self.record(child).map(Value::Record),
            TypeTag::Optional(inner) => self.optional(field, inner),
        }
    }

    fn optional(&self, field: &FieldDescriptor, inner: &TypeTag) -> Result<Value, BindError> {
        match inner {
            TypeTag::Primitive(p) => self.optional_primitive(field, *p),
            TypeTag::Record(child) => self.optional_record(field, child),
            TypeTag::Optional(deeper) => self.optional(field, deeper),
        }
    }

    fn required_primitive(
        &self,
        field: &FieldDescriptor,
        target: Primitive,
    ) -> Result<Value, BindError> {
        let key = field.effective_key(self.prefix);
        if let Some(key) = &key
            && let Some(raw) = self.env.get(key)
        {
            return self.coerce(field, key, raw, target);
        }

        match field.resolve_default()? {
            Some(value) => {
                trace!(field = field.name(), "using default");
                Ok(value)
            }
            None => Err(BindError::MissingVariable {
                key: key.unwrap_or_else(|| field.name().to_string()),
            }),
        }
    }

    fn optional_primitive(
        &self,
        field: &FieldDescriptor,
        target: Primitive,
    ) -> Result<Value, BindError> {
        if let Some(key) = field.effective_key(self.prefix)
            && let Some(raw) = self.env.get(&key)
        {
            return self.coerce(field, &key, raw, target);
        }
        Ok(field.resolve_default()?.unwrap_or(Value::None))
    }

    fn optional_record(&self, field: &FieldDescriptor, child: &Schema) -> Result<Value, BindError> {
        if self.has_any_bound_key(child) {
            return self.record(child).map(Value::Record);
        }
        match field.resolve_default()? {
            Some(value) => Ok(value),
            None => {
                debug!(
                    field = field.name(),
                    record = child.name(),
                    "no keys present, leaving optional record unset"
                );
                Ok(Value::None)
            }
        }
    }

    fn coerce(
        &self,
        field: &FieldDescriptor,
        key: &str,
        raw: &str,
        target: Primitive,
    ) -> Result<Value, BindError> {
        trace!(field = field.name(), key, "binding from environment");
        coerce(raw, target).map_err(|e| BindError::InvalidValue {
            key: key.to_string(),
            expected: e.expected,
            value: e.raw,
        })
    }

    fn has_any_bound_key(&self, schema: &Schema) -> bool {
        schema
            .fields()
            .iter()
            .any(|field| match field.type_tag().strip_optional() {
                TypeTag::Record(child) => self.has_any_bound_key(child),
                TypeTag::Primitive(_) | TypeTag::Optional(_) => field
                    .effective_key(self.prefix)
                    .is_some_and(|key| self.env.contains_key(&key)),
            })
    }
}
