mod types;

pub use types::*;

use anyhow::{Context, Result};
use ffcompose_core::setting::kinds::kind_by_name;
use ffcompose_core::template::presets;
use ffcompose_core::{Setting, SettingsTemplate};
use std::collections::HashSet;
use std::path::Path;

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    validate_config(&config)?;

    tracing::debug!(
        "Loaded config from {:?} with {} templates",
        path,
        config.templates.len()
    );

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    let default_paths = [
        "./ffcompose.toml",
        "~/.config/ffcompose/config.toml",
        "/etc/ffcompose/config.toml",
    ];

    for path_str in default_paths {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Build a configured template into its settings.
pub fn build_template(template: &TemplateConfig) -> Result<SettingsTemplate> {
    let mut built = SettingsTemplate::new(&template.name, template.scope)
        .with_context(|| format!("Template '{}' has an invalid scope", template.name))?;

    for entry in &template.settings {
        let declaration = kind_by_name(&entry.kind).with_context(|| {
            format!(
                "Template '{}' uses unknown setting kind '{}'",
                template.name, entry.kind
            )
        })?;
        let setting = Setting::from_declaration(declaration, entry.setting_value())
            .with_context(|| format!("Template '{}': invalid {}", template.name, entry.kind))?;
        built
            .add(setting)
            .with_context(|| format!("Template '{}': cannot add {}", template.name, entry.kind))?;
    }

    Ok(built)
}

/// Find a template by name: configured templates first, then built-in presets.
pub fn resolve_template(config: &Config, name: &str) -> Result<SettingsTemplate> {
    match config.template(name) {
        Some(template) => build_template(template),
        None => presets::preset_by_name(name).map_err(Into::into),
    }
}

/// Validate configuration
fn validate_config(config: &Config) -> Result<()> {
    let mut seen = HashSet::new();

    for template in &config.templates {
        if template.name.trim().is_empty() {
            anyhow::bail!("Template name cannot be empty");
        }
        if !seen.insert(template.name.to_ascii_lowercase()) {
            anyhow::bail!("Duplicate template name '{}'", template.name);
        }
        if presets::preset_names()
            .iter()
            .any(|p| p.eq_ignore_ascii_case(&template.name))
        {
            tracing::warn!(
                "Template '{}' shadows the built-in preset of the same name",
                template.name
            );
        }
        if template.settings.is_empty() {
            tracing::warn!("Template '{}' has no settings", template.name);
        }

        build_template(template)?;
    }

    if !config.paths.output_dir.exists() {
        tracing::warn!("Output directory does not exist: {:?}", config.paths.output_dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffcompose_core::capability::Scope;

    fn parse(toml: &str) -> Config {
        toml::from_str(toml).unwrap()
    }

    #[test]
    fn defaults_without_sections() {
        let config = parse("");
        assert!(config.templates.is_empty());
        assert_eq!(config.paths.output_dir, Path::new("."));
    }

    #[test]
    fn template_values_keep_their_type() {
        let config = parse(
            r#"
            [[templates]]
            name = "voice"
            scope = "output"
            settings = [
                { kind = "codec_audio", value = "aac" },
                { kind = "sample_rate", value = 44100 },
                { kind = "disable_video" },
            ]
            "#,
        );
        validate_config(&config).unwrap();

        let template = build_template(&config.templates[0]).unwrap();
        assert_eq!(template.scope(), Scope::Output);
        assert_eq!(
            template.settings().serialize(),
            ["-c:a", "aac", "-ar", "44100", "-vn"]
        );
    }

    #[test]
    fn rejects_any_scope() {
        let config = parse(
            r#"
            [[templates]]
            name = "loose"
            scope = "any"
            "#,
        );
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_unknown_kind() {
        let config = parse(
            r#"
            [[templates]]
            name = "typo"
            scope = "output"
            settings = [{ kind = "codec_vidoe", value = "libx264" }]
            "#,
        );
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("codec_vidoe"));
    }

    #[test]
    fn rejects_duplicate_names() {
        let config = parse(
            r#"
            [[templates]]
            name = "web"
            scope = "output"

            [[templates]]
            name = "WEB"
            scope = "output"
            "#,
        );
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_setting_from_other_scope() {
        let config = parse(
            r#"
            [[templates]]
            name = "still"
            scope = "output"
            settings = [{ kind = "loop_image", value = 1 }]
            "#,
        );
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn configured_templates_take_precedence() {
        let config = parse(
            r#"
            [[templates]]
            name = "audio_mp3"
            scope = "output"
            settings = [{ kind = "codec_audio", value = "mp3_mf" }]
            "#,
        );
        let template = resolve_template(&config, "audio_mp3").unwrap();
        assert_eq!(template.settings().serialize(), ["-c:a", "mp3_mf"]);

        let preset = resolve_template(&config, "web_vp9").unwrap();
        assert_eq!(preset.name(), "web_vp9");
        assert!(resolve_template(&config, "missing").is_err());
    }
}
