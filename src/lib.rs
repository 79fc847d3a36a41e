//! Typed configuration from environment variables. Describe a struct's fields
//! once, then load it in one call.
//!
//! ```ignore
//! let config: AppConfig = envbind::load()?;
//! ```
//!
//! That single call captures the process environment, looks up every field's
//! key, parses each raw string into the declared type, fills in defaults,
//! decides which optional sections are configured, and hands you a typed
//! struct, or the first thing that was wrong.
//!
//! # Declaring a schema
//!
//! A config type implements [`EnvSchema`] by returning its [`Schema`]: an
//! ordered list of [`FieldDescriptor`]s. Each descriptor names the field,
//! declares its [`TypeTag`], and optionally sets a key and a default:
//!
//! ```ignore
//! #[derive(Deserialize)]
//! struct AppConfig {
//!     name: String,
//!     port: u32,
//!     debug: bool,
//!     cache: Option<CacheConfig>,
//! }
//!
//! impl EnvSchema for AppConfig {
//!     fn schema() -> Schema {
//!         Schema::new("AppConfig")
//!             .field(FieldDescriptor::new("name", TypeTag::of::<String>()))
//!             .field(FieldDescriptor::new("port", TypeTag::of::<u32>()).default(3000u32))
//!             .field(FieldDescriptor::new("debug", TypeTag::of::<bool>()).default(false))
//!             .field(FieldDescriptor::new(
//!                 "cache",
//!                 TypeTag::optional(TypeTag::record(CacheConfig::schema())),
//!             ))
//!             .env_keys([("name", "APP_NAME"), ("port", "PORT"), ("debug", "DEBUG")])
//!     }
//! }
//! ```
//!
//! The schema is ordinary data; the struct only needs `Deserialize`, and its
//! serde field names must match the schema's field names.
//!
//! # Keys
//!
//! A field is read from its own name unless the mapping table (or
//! [`FieldDescriptor::env`]) gives another key. The key `"-"` means the field
//! is never read from the environment; it can still have a default. Lookups
//! are exact-match, case included.
//!
//! # Binding rules
//!
//! | Declared type          | Key present | Key absent or skipped                  |
//! |------------------------|-------------|----------------------------------------|
//! | `T`                    | parse       | default, else [`BindError::MissingVariable`] |
//! | `Option<T>`            | parse       | default, else `None`                   |
//! | nested record          | always built, field by field                          |
//! | `Option<record>`       | built if *any* of its keys (at any depth) is present, else default, else `None` |
//!
//! A present key always wins over a default. A value that does not parse is
//! an error even for `Option` fields; it never silently becomes `None`.
//!
//! # Parsing
//!
//! Integers are base-10 and must fit the declared width; unsigned types reject
//! any sign. Floats accept decimal and exponent forms and must be finite:
//! `inf`, `NaN` and values too large for the declared precision are errors.
//! Nothing is trimmed.
//!
//! Booleans are permissive: `true`, `1` and `yes` in any case are `true`, and
//! **every other string is `false`**, including typos. Boolean parsing never
//! fails.
//!
//! # Errors
//!
//! Binding stops at the first failing field in declaration order and returns
//! one [`BindError`]. There is no partial result. Enable the `rich-errors`
//! feature for [miette](https://docs.rs/miette) diagnostics.
//!
//! # Testing
//!
//! [`load_from_map`] binds against any [`EnvSource`] (a `HashMap` or
//! `BTreeMap` of strings), so tests never have to touch the real process
//! environment. [`Envbind::builder`] adds a key prefix and template output.

pub mod error;
pub mod types;

mod bind;
mod builder;
mod coerce;
mod env;
mod schema;
mod template;
mod value;

#[cfg(test)]
mod fixtures;

pub use bind::{bind, bind_prefixed, has_any_bound_key};
pub use builder::{Envbind, EnvbindBuilder};
pub use coerce::{CoerceError, coerce};
pub use env::{EnvSource, Snapshot};
pub use error::BindError;
pub use schema::{EnvSchema, FieldDescriptor, KeySpec, SKIP, Schema};
pub use template::env_template;
pub use types::{EnvType, FloatPrecision, IntWidth, Primitive, TypeTag};
pub use value::{Record, Value, ValueError, to_value};

/// Load `C` from the process environment.
pub fn load<C: EnvSchema>() -> Result<C, BindError> {
    load_from_map(&env::capture())
}

/// Load `C` from a caller-supplied snapshot.
pub fn load_from_map<C: EnvSchema, S: EnvSource + ?Sized>(snapshot: &S) -> Result<C, BindError> {
    let record = bind::bind(&C::schema(), snapshot)?;
    builder::into_config(record)
}
