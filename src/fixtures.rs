#[cfg(test)]
pub mod test {
    use serde::{Deserialize, Serialize};

    use crate::schema::{EnvSchema, FieldDescriptor, Schema};
    use crate::types::TypeTag;

    /// Three flat fields: one required, two defaulted.
    #[derive(Deserialize, Debug, PartialEq)]
    pub struct ServiceConfig {
        pub name: String,
        pub port: u32,
        pub debug: bool,
    }

    impl EnvSchema for ServiceConfig {
        fn schema() -> Schema {
            Schema::new("ServiceConfig")
                .field(FieldDescriptor::new("name", TypeTag::of::<String>()))
                .field(FieldDescriptor::new("port", TypeTag::of::<u32>()).default(3000u32))
                .field(FieldDescriptor::new("debug", TypeTag::of::<bool>()).default(false))
                .env_keys([("name", "APP_NAME"), ("port", "PORT"), ("debug", "DEBUG")])
        }
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct CacheConfig {
        pub enabled: bool,
        pub ttl: u32,
    }

    impl EnvSchema for CacheConfig {
        fn schema() -> Schema {
            Schema::new("CacheConfig")
                .field(FieldDescriptor::new("enabled", TypeTag::of::<bool>()).env("CACHE_ENABLED"))
                .field(
                    FieldDescriptor::new("ttl", TypeTag::of::<u32>())
                        .env("CACHE_TTL")
                        .default(60u32),
                )
        }
    }

    /// The service fields plus an optional nested cache section.
    #[derive(Deserialize, Debug, PartialEq)]
    pub struct AppConfig {
        pub name: String,
        pub port: u32,
        pub debug: bool,
        pub cache: Option<CacheConfig>,
    }

    impl EnvSchema for AppConfig {
        fn schema() -> Schema {
            Schema::new("AppConfig")
                .field(FieldDescriptor::new("name", TypeTag::of::<String>()).env("APP_NAME"))
                .field(
                    FieldDescriptor::new("port", TypeTag::of::<u32>())
                        .env("PORT")
                        .default(3000u32),
                )
                .field(
                    FieldDescriptor::new("debug", TypeTag::of::<bool>())
                        .env("DEBUG")
                        .default(false),
                )
                .field(FieldDescriptor::new(
                    "cache",
                    TypeTag::optional(TypeTag::record(CacheConfig::schema())),
                ))
        }
    }

    // -- Deeper nesting: required record holding an optional record --------------

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    pub struct PoolConfig {
        pub size: u32,
        pub idle_secs: Option<u64>,
    }

    impl EnvSchema for PoolConfig {
        fn schema() -> Schema {
            Schema::new("PoolConfig")
                .field(
                    FieldDescriptor::new("size", TypeTag::of::<u32>())
                        .env("POOL_SIZE")
                        .default(5u32),
                )
                .field(FieldDescriptor::new("idle_secs", TypeTag::of::<Option<u64>>()).env("POOL_IDLE"))
        }
    }

    #[derive(Deserialize, Debug, PartialEq)]
    pub struct DbConfig {
        pub url: Option<String>,
        pub pool: Option<PoolConfig>,
    }

    impl EnvSchema for DbConfig {
        fn schema() -> Schema {
            Schema::new("DbConfig")
                .field(FieldDescriptor::new("url", TypeTag::of::<Option<String>>()).env("DB_URL"))
                .field(FieldDescriptor::new(
                    "pool",
                    TypeTag::optional(TypeTag::record(PoolConfig::schema())),
                ))
        }
    }

    #[derive(Deserialize, Debug, PartialEq)]
    pub struct NestedConfig {
        pub db: DbConfig,
        pub replica: Option<DbConfig>,
    }

    impl EnvSchema for NestedConfig {
        fn schema() -> Schema {
            Schema::new("NestedConfig")
                .field(FieldDescriptor::new("db", TypeTag::record(DbConfig::schema())))
                .field(FieldDescriptor::new(
                    "replica",
                    TypeTag::optional(TypeTag::record(
                        Schema::new("ReplicaConfig")
                            .field(
                                FieldDescriptor::new("url", TypeTag::of::<Option<String>>())
                                    .env("REPLICA_URL"),
                            )
                            .field(FieldDescriptor::new(
                                "pool",
                                TypeTag::optional(TypeTag::record(
                                    PoolConfig::schema().env_keys([
                                        ("size", "REPLICA_POOL_SIZE"),
                                        ("idle_secs", "REPLICA_POOL_IDLE"),
                                    ]),
                                )),
                            )),
                    )),
                ))
        }
    }

    // -- Skip sentinel ----------------------------------------------------------

    /// `token` is never read from the environment.
    #[derive(Deserialize, Debug, PartialEq)]
    pub struct SkipConfig {
        pub token: String,
    }

    impl EnvSchema for SkipConfig {
        fn schema() -> Schema {
            Schema::new("SkipConfig")
                .field(FieldDescriptor::new("token", TypeTag::of::<String>()))
                .env_keys([("token", "-")])
        }
    }

    // -- Every primitive --------------------------------------------------------

    #[derive(Deserialize, Debug, PartialEq)]
    pub struct PrimitivesConfig {
        pub text: String,
        pub small: i8,
        pub big: i64,
        pub byte: u8,
        pub count: u64,
        pub size: usize,
        pub ratio: f32,
        pub precise: f64,
        pub flag: bool,
    }

    impl EnvSchema for PrimitivesConfig {
        fn schema() -> Schema {
            Schema::new("PrimitivesConfig")
                .field(FieldDescriptor::new("text", TypeTag::of::<String>()))
                .field(FieldDescriptor::new("small", TypeTag::of::<i8>()))
                .field(FieldDescriptor::new("big", TypeTag::of::<i64>()))
                .field(FieldDescriptor::new("byte", TypeTag::of::<u8>()))
                .field(FieldDescriptor::new("count", TypeTag::of::<u64>()))
                .field(FieldDescriptor::new("size", TypeTag::of::<usize>()))
                .field(FieldDescriptor::new("ratio", TypeTag::of::<f32>()))
                .field(FieldDescriptor::new("precise", TypeTag::of::<f64>()))
                .field(FieldDescriptor::new("flag", TypeTag::of::<bool>()))
        }
    }

    #[test]
    fn fixture_schemas_declare_every_struct_field() {
        assert_eq!(ServiceConfig::schema().fields().len(), 3);
        assert_eq!(AppConfig::schema().fields().len(), 4);
        assert_eq!(NestedConfig::schema().fields().len(), 2);
        assert_eq!(PrimitivesConfig::schema().fields().len(), 9);
    }
}
