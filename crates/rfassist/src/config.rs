//
// config.rs
//
// Editor-facing configuration for the assistance engines.
//

use serde::Deserialize;

use crate::completion::AUTO_ACTIVATION_CHARS;

/// Runtime configuration, fully populated. Defaults apply wherever the
/// client sends nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistConfig {
    /// Characters the client should trigger completion on without an
    /// explicit request.
    pub auto_activation_characters: Vec<char>,
    /// Offer links on `Resource` import paths.
    pub resource_links: bool,
    /// Offer links on `Variables` import paths.
    pub variable_file_links: bool,
}

impl Default for AssistConfig {
    fn default() -> Self {
        Self {
            auto_activation_characters: AUTO_ACTIVATION_CHARS.to_vec(),
            resource_links: true,
            variable_file_links: true,
        }
    }
}

/// The `assist` settings section as clients send it. Every field is
/// optional; absent fields keep their defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct AssistSection {
    auto_activation_characters: Option<String>,
    resource_links: Option<bool>,
    variable_file_links: Option<bool>,
}

impl AssistConfig {
    /// Parse configuration from client settings.
    ///
    /// Reads the top-level `assist` section. Returns `None` when the
    /// section is missing entirely; a present but malformed section
    /// yields the defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use rfassist::config::AssistConfig;
    /// use serde_json::json;
    ///
    /// let settings = json!({
    ///     "assist": { "resourceLinks": false, "autoActivationCharacters": "$@{" }
    /// });
    /// let config = AssistConfig::from_settings(&settings).unwrap();
    /// assert!(!config.resource_links);
    /// assert!(config.variable_file_links);
    /// assert_eq!(config.auto_activation_characters, vec!['$', '@', '{']);
    /// ```
    pub fn from_settings(settings: &serde_json::Value) -> Option<AssistConfig> {
        let section = settings.get("assist")?;
        let parsed: AssistSection = serde_json::from_value(section.clone()).unwrap_or_else(|e| {
            log::warn!("malformed assist settings section, using defaults: {e}");
            AssistSection::default()
        });

        let mut config = AssistConfig::default();
        if let Some(chars) = parsed.auto_activation_characters {
            config.auto_activation_characters = chars.chars().collect();
        }
        if let Some(v) = parsed.resource_links {
            config.resource_links = v;
        }
        if let Some(v) = parsed.variable_file_links {
            config.variable_file_links = v;
        }
        Some(config)
    }
}
