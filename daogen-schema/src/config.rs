use serde::Deserialize;

/// Largest composite key that still gets a typed tuple identity.
pub const MAX_SUPPORTED_KEY_DEGREE: usize = 12;

/// Generator switches read from the `[generator]` section of the schema file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Emit `from_json` / `to_json` and the JSON-consuming constructor.
    pub json: bool,
    /// Emit the shared-interface trait per table.
    pub interfaces: bool,
    /// Emit the backing-record struct per table.
    pub records: bool,
    /// Emit DAOs for tables with a primary key.
    pub daos: bool,
    /// Composite keys with more columns degrade to an untyped record key.
    pub max_key_degree: usize,
    /// Path of the runtime crate used in generated `use` statements.
    pub runtime_crate: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            json: true,
            interfaces: true,
            records: true,
            daos: true,
            max_key_degree: MAX_SUPPORTED_KEY_DEGREE,
            runtime_crate: "daogen_runtime".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_keys() {
        let config: GeneratorConfig = toml::from_str("interfaces = false").unwrap();
        assert!(config.json);
        assert!(!config.interfaces);
        assert_eq!(config.max_key_degree, MAX_SUPPORTED_KEY_DEGREE);
        assert_eq!(config.runtime_crate, "daogen_runtime");
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result: Result<GeneratorConfig, _> = toml::from_str("pojos = true");
        assert!(result.is_err());
    }
}
