//! Configuration of [`crate::ArgumentCoercion`].

use std::str::FromStr;

use schemars::gen::SchemaSettings;
use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;

/// Argument coercion configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Fail the field when any coercer returned an error, instead of resolving it with the
    /// arguments that could be coerced. Defaults to true.
    pub reject_on_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reject_on_error: true,
        }
    }
}

impl FromStr for Config {
    type Err = serde_yaml::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_yaml::from_str(s)
    }
}

impl Config {
    /// JSON schema of the configuration, to validate or document YAML files.
    pub fn json_schema() -> RootSchema {
        let settings = SchemaSettings::draft07().with(|s| {
            s.option_nullable = true;
            s.option_add_null_type = false;
        });
        settings.into_generator().into_root_schema_for::<Config>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rejects_on_error() {
        assert!(Config::default().reject_on_error);
        assert_eq!(Config::from_str("{}").unwrap(), Config::default());
    }

    #[test]
    fn from_yaml() {
        let config = Config::from_str("reject_on_error: false").unwrap();
        assert!(!config.reject_on_error);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let error = Config::from_str("reject_on_eror: false").unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }

    #[test]
    fn json_schema() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        assert_eq!(
            schema["properties"]["reject_on_error"]["type"],
            serde_json::json!("boolean")
        );
        assert_eq!(schema["additionalProperties"], serde_json::json!(false));
    }
}
