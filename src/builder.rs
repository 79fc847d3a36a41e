use std::marker::PhantomData;

use tracing::debug;

use crate::bind;
use crate::env::{self, Snapshot};
use crate::error::BindError;
use crate::schema::EnvSchema;
use crate::template;
use crate::value::{self, Record};

/// Entry point for building an envbind load.
pub struct Envbind;

impl Envbind {
    pub fn builder<C: EnvSchema>() -> EnvbindBuilder<C> {
        EnvbindBuilder::new()
    }
}

/// Builder for one load of config type `C`.
///
/// By default the process environment is captured when the load runs and
/// keys are looked up exactly as the schema declares them.
pub struct EnvbindBuilder<C: EnvSchema> {
    prefix: Option<String>,
    vars: Option<Snapshot>,
    _phantom: PhantomData<C>,
}

impl<C: EnvSchema> EnvbindBuilder<C> {
    fn new() -> Self {
        Self {
            prefix: None,
            vars: None,
            _phantom: PhantomData,
        }
    }

    /// Prepend `prefix` to every key the schema reads (skipped fields stay
    /// skipped). `prefix("MYAPP_")` turns `PORT` into `MYAPP_PORT`.
    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = Some(prefix.to_string());
        self
    }

    /// Bind against these pairs instead of the process environment.
    /// Later duplicates win.
    pub fn vars(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.vars = Some(env::snapshot(vars));
        self
    }

    fn effective_prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or("")
    }

    /// Bind the schema without converting to `C`.
    pub fn bind(&self) -> Result<Record, BindError> {
        let schema = C::schema();
        match &self.vars {
            Some(vars) => bind::bind_prefixed(&schema, vars, self.effective_prefix()),
            None => bind::bind_prefixed(&schema, &env::capture(), self.effective_prefix()),
        }
    }

    /// Bind the schema and build a `C`.
    pub fn load(self) -> Result<C, BindError> {
        let record = self.bind()?;
        debug!(fields = record.len(), "bound configuration");
        into_config(record)
    }

    /// The dotenv-style template for `C`'s schema, with this builder's prefix.
    pub fn template(&self) -> String {
        template::env_template(&C::schema(), self.effective_prefix())
    }
}

pub(crate) fn into_config<C: EnvSchema>(record: Record) -> Result<C, BindError> {
    value::from_record(record).map_err(|e| BindError::Deserialize {
        reason: e.to_string(),
    })
}
