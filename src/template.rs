//! Dotenv-style template generation.
//!
//! Lists every key a schema reads, in declaration order, so the set of
//! variables an application understands can be documented or shipped as a
//! starting `.env` file:
//!
//! ```text
//! # name (string, required)
//! APP_NAME=
//!
//! # port (u32, default: 3000)
//! # PORT=3000
//!
//! # cache.enabled (bool, required when cache is set)
//! # CACHE_ENABLED=
//! ```
//!
//! Required keys are left active with an empty value. Keys that may be left
//! unset (defaulted, optional, or inside an optional record) are commented
//! out. Skipped fields never appear.

use crate::schema::{FieldDescriptor, Schema};
use crate::types::TypeTag;

/// Render the env template for `schema`, with `prefix` on every key.
pub fn env_template(schema: &Schema, prefix: &str) -> String {
    let mut entries = Vec::new();
    collect(schema, prefix, "", None, &mut entries);
    entries.join("\n\n") + "\n"
}

fn collect(
    schema: &Schema,
    prefix: &str,
    path: &str,
    optional_parent: Option<&str>,
    out: &mut Vec<String>,
) {
    for field in schema.fields() {
        let dotted = if path.is_empty() {
            field.name().to_string()
        } else {
            format!("{path}.{}", field.name())
        };

        match field.type_tag() {
            TypeTag::Record(child) => collect(child, prefix, &dotted, optional_parent, out),
            TypeTag::Optional(inner) => match inner.strip_optional() {
                TypeTag::Record(child) => {
                    let parent = optional_parent.unwrap_or(dotted.as_str()).to_string();
                    collect(child, prefix, &dotted, Some(&parent), out);
                }
                _ => {
                    if let Some(entry) = render(field, prefix, &dotted, optional_parent) {
                        out.push(entry);
                    }
                }
            },
            TypeTag::Primitive(_) => {
                if let Some(entry) = render(field, prefix, &dotted, optional_parent) {
                    out.push(entry);
                }
            }
        }
    }
}

fn render(
    field: &FieldDescriptor,
    prefix: &str,
    dotted: &str,
    optional_parent: Option<&str>,
) -> Option<String> {
    let key = field.effective_key(prefix)?;
    let type_name = field.type_tag().strip_optional().to_string();
    let optional = matches!(field.type_tag(), TypeTag::Optional(_));

    let (status, value, active) = match (field.default_value(), optional, optional_parent) {
        (Some(default), _, _) => (format!("default: {default}"), default.to_string(), false),
        (None, true, _) => ("optional".to_string(), String::new(), false),
        (None, false, Some(parent)) => (
            format!("required when {parent} is set"),
            String::new(),
            false,
        ),
        (None, false, None) => ("required".to_string(), String::new(), true),
    };

    let line = if active {
        format!("{key}={value}")
    } else {
        format!("# {key}={value}")
    };
    Some(format!("# {dotted} ({type_name}, {status})\n{line}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::{AppConfig, NestedConfig, ServiceConfig, SkipConfig};
    use crate::schema::EnvSchema;

    #[test]
    fn required_key_is_active() {
        let t = env_template(&ServiceConfig::schema(), "");
        assert!(t.contains("# name (string, required)\nAPP_NAME=\n"), "{t}");
    }

    #[test]
    fn defaulted_key_is_commented_with_value() {
        let t = env_template(&ServiceConfig::schema(), "");
        assert!(t.contains("# port (u32, default: 3000)\n# PORT=3000"), "{t}");
        assert!(t.contains("# DEBUG=false"), "{t}");
    }

    #[test]
    fn optional_record_fields_are_commented() {
        let t = env_template(&AppConfig::schema(), "");
        assert!(
            t.contains("# cache.enabled (bool, required when cache is set)\n# CACHE_ENABLED="),
            "{t}"
        );
        assert!(t.contains("# cache.ttl (u32, default: 60)\n# CACHE_TTL=60"), "{t}");
    }

    #[test]
    fn optional_primitive_is_commented() {
        let t = env_template(&NestedConfig::schema(), "");
        assert!(t.contains("# db.url (string, optional)\n# DB_URL="), "{t}");
    }

    #[test]
    fn nested_optional_record_defaults_listed() {
        let t = env_template(&NestedConfig::schema(), "");
        assert!(
            t.contains("# replica.pool.size (u32, default: 5)\n# REPLICA_POOL_SIZE=5"),
            "{t}"
        );
    }

    #[test]
    fn prefix_applied() {
        let t = env_template(&ServiceConfig::schema(), "SVC_");
        assert!(t.contains("SVC_APP_NAME="), "{t}");
        assert!(t.contains("# SVC_PORT=3000"), "{t}");
    }

    #[test]
    fn skipped_fields_omitted() {
        let t = env_template(&SkipConfig::schema(), "");
        assert!(!t.contains("token"), "{t}");
    }

    #[test]
    fn entries_follow_declaration_order() {
        let t = env_template(&AppConfig::schema(), "");
        let positions: Vec<usize> = ["APP_NAME", "PORT", "DEBUG", "CACHE_ENABLED", "CACHE_TTL"]
            .iter()
            .map(|k| t.find(&format!("{k}=")).unwrap())
            .collect();
        let mut sorted = positions.clone();
        sorted.sort();
        assert_eq!(positions, sorted);
    }
}
