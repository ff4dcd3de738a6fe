//! Configuration for template extraction.
//!
//! Configuration is read from host settings under the "curl-template" key,
//! merged with defaults and validated. Nothing is stored globally: callers
//! hold the returned [`TemplateConfig`] and pass it to
//! [`identify_candidates_with`](crate::fields::identify_candidates_with).

pub mod schema;

pub use schema::TemplateConfig;

use log::warn;
use serde_json::Value;

/// Settings key the configuration is read from.
pub const SETTINGS_KEY: &str = "curl-template";

/// Loads configuration from host settings.
///
/// Settings that fail to deserialize are logged and replaced by defaults.
/// A configuration that deserializes but fails validation is rejected.
///
/// # Example
///
/// ```
/// use curl_template::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "curl-template": {
///         "maxBodyDepth": 3,
///         "excludedHeaders": ["X-Request-Id"]
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.max_body_depth, 3);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<TemplateConfig, String> {
    let mut config = TemplateConfig::default();

    if let Some(section) = settings_json.as_ref().and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<TemplateConfig>(section.clone()) {
            Ok(user_config) => {
                config = config.merge(&user_config);
            }
            Err(e) => {
                warn!(
                    "failed to parse {} settings: {}; using defaults",
                    SETTINGS_KEY, e
                );
            }
        }
    }

    config
        .validate()
        .map_err(|e| format!("Invalid configuration: {}", e))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_load_config_with_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config, TemplateConfig::default());
    }

    #[test]
    fn test_load_config_with_user_settings() {
        let settings = json!({
            "curl-template": {
                "maxBodyDepth": 2,
                "excludedHeaders": ["X-Request-Id"]
            }
        });

        let config = load_config(Some(settings)).unwrap();
        assert_eq!(config.max_body_depth, 2);
        assert_eq!(config.excluded_headers, vec!["X-Request-Id".to_string()]);
    }

    #[test]
    fn test_load_config_invalid_json_uses_defaults() {
        let settings = json!({
            "curl-template": {
                "maxBodyDepth": "deep"
            }
        });

        let config = load_config(Some(settings)).unwrap();
        assert_eq!(config.max_body_depth, 5);
    }

    #[test]
    fn test_load_config_validation_error() {
        let settings = json!({
            "curl-template": {
                "maxBodyDepth": 0
            }
        });

        let result = load_config(Some(settings));
        assert!(result
            .unwrap_err()
            .contains("maxBodyDepth must be greater than 0"));
    }

    #[test]
    fn test_no_settings_key() {
        let settings = json!({ "other-extension": { "maxBodyDepth": 1 } });
        let config = load_config(Some(settings)).unwrap();
        assert_eq!(config.max_body_depth, 5);
    }

    #[test]
    fn test_loading_has_no_lasting_effect() {
        let settings = json!({ "curl-template": { "maxBodyDepth": 1 } });
        assert_eq!(load_config(Some(settings)).unwrap().max_body_depth, 1);
        assert_eq!(load_config(None).unwrap(), TemplateConfig::default());
    }
}
