use ffcompose_core::capability::SettingsScope;
use ffcompose_core::{ResourceLocations, SettingValue};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    /// Directories for generated and temporary resources.
    #[serde(default)]
    pub paths: ResourceLocations,

    /// User-defined templates, looked up before the built-in presets.
    #[serde(default)]
    pub templates: Vec<TemplateConfig>,
}

impl Config {
    /// The configured template named `name`, ignoring case.
    pub fn template(&self, name: &str) -> Option<&TemplateConfig> {
        self.templates
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TemplateConfig {
    pub name: String,

    /// `input` or `output`.
    pub scope: SettingsScope,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub settings: Vec<SettingConfig>,
}

/// One `{ kind, value }` entry of a template.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SettingConfig {
    /// Built-in kind name, e.g. `codec_video`.
    pub kind: String,

    /// Omitted for flag-only kinds such as `disable_video`.
    #[serde(default)]
    pub value: Option<ValueConfig>,
}

/// A setting value as written in TOML.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ValueConfig {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl From<&ValueConfig> for SettingValue {
    fn from(value: &ValueConfig) -> Self {
        match value {
            ValueConfig::Integer(n) => SettingValue::Integer(*n),
            ValueConfig::Decimal(n) => SettingValue::Decimal(*n),
            ValueConfig::Text(text) => SettingValue::text(text.as_str()),
        }
    }
}

impl SettingConfig {
    /// The value to build the setting with; flag-only when omitted.
    pub fn setting_value(&self) -> SettingValue {
        self.value
            .as_ref()
            .map_or(SettingValue::Flag, SettingValue::from)
    }
}
