mod cli;

use ffcompose::config::{self, Config};
use ffcompose_core::capability::{self, Scope, SettingsScope};
use ffcompose_core::setting::kinds::{self, Overwrite};
use ffcompose_core::template::{self, presets};
use ffcompose_core::{ContainerRegistry, Invocation, Resource, SettingsTemplate};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "ffcompose=trace,ffcompose_core=trace".to_string()
        } else {
            "ffcompose=info,ffcompose_core=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    let registry = ContainerRegistry::builtin();

    match cli.command {
        Commands::Resolve { path, json } => resolve_path(&registry, &path, json),
        Commands::Containers => list_containers(&registry),
        Commands::Kinds => list_kinds(),
        Commands::Presets => list_presets(cli.config.as_deref()),
        Commands::Build {
            input,
            output,
            format,
            intermediate,
            input_presets,
            presets,
            settings,
            overwrite,
            json,
        } => {
            let config = config::load_config_or_default(cli.config.as_deref())?;
            let request = BuildRequest {
                input,
                output,
                format,
                intermediate,
                input_presets,
                presets,
                settings,
                overwrite,
            };
            build_command(&registry, &config, &request, json)
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
    }
}

fn resolve_path(registry: &ContainerRegistry, path: &Path, json: bool) -> Result<()> {
    let resource = registry
        .resolve(path)
        .with_context(|| format!("Failed to resolve {:?}", path))?;

    if json {
        let value = serde_json::json!({
            "path": resource.full_path(),
            "directory": resource.path(),
            "name": resource.name(),
            "extension": resource.extension(),
            "container": resource.key(),
            "resources": resource.resource_kinds(),
            "streams": resource.stream_kinds(),
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("Path: {}", resource.full_path().display());
        println!("Container: {}", resource.key());
        println!("Name: {}", resource.name());
        println!("Directory: {}", resource.path().display());
        println!("Resources: {}", join(&resource.resource_kinds()));
        println!("Streams: {}", join(&resource.stream_kinds()));
    }

    Ok(())
}

fn list_containers(registry: &ContainerRegistry) -> Result<()> {
    println!("Registered containers: {}\n", registry.len());

    for registration in registry.registrations() {
        let container = registration.instantiate();
        println!(
            "  {:<6} .{:<5} resources: {:<14} streams: {}",
            registration.key(),
            container.extension(),
            join(&capability::resource_kinds(container.as_ref())),
            join(&capability::stream_kinds(container.as_ref())),
        );
    }

    Ok(())
}

fn list_kinds() -> Result<()> {
    for (name, declaration) in kinds::kinds() {
        let requires = declaration
            .resource
            .map(|k| k.describe())
            .into_iter()
            .chain(declaration.stream.map(|k| k.describe()))
            .collect::<Vec<_>>();
        let scope = declaration
            .scope
            .map_or_else(|| "input/output".to_string(), |s| s.to_string());

        print!(
            "  {:<16} -{:<10} {:<5} {:<13}",
            name,
            declaration.flag,
            declaration.phase.to_string(),
            scope
        );
        if !requires.is_empty() {
            print!(" requires {}", requires.join(" and "));
        }
        println!();
    }

    Ok(())
}

fn list_presets(config_path: Option<&Path>) -> Result<()> {
    println!("Built-in presets:");
    for name in presets::preset_names() {
        let preset = presets::preset_by_name(name)?;
        print_template(&preset, None);
    }

    let config = config::load_config_or_default(config_path)?;
    if !config.templates.is_empty() {
        println!("\nConfigured templates:");
        for entry in &config.templates {
            let template = config::build_template(entry)?;
            print_template(&template, entry.description.as_deref());
        }
    }

    Ok(())
}

fn print_template(template: &SettingsTemplate, description: Option<&str>) {
    println!(
        "  {:<16} [{}] {}",
        template.name(),
        template.scope(),
        template.settings().serialize().join(" ")
    );
    if let Some(description) = description {
        println!("  {:<16} {}", "", description);
    }
}

struct BuildRequest {
    input: PathBuf,
    output: Option<PathBuf>,
    format: Option<String>,
    intermediate: bool,
    input_presets: Vec<String>,
    presets: Vec<String>,
    settings: Vec<String>,
    overwrite: bool,
}

fn build_command(
    registry: &ContainerRegistry,
    config: &Config,
    request: &BuildRequest,
    json: bool,
) -> Result<()> {
    let input = registry
        .resolve(&request.input)
        .with_context(|| format!("Failed to resolve input {:?}", request.input))?;
    let output = resolve_output(registry, config, request, &input)?;
    let output_path = output.full_path();

    let input_settings = compose_named(config, SettingsScope::Input, &request.input_presets)?;
    let mut output_settings = compose_named(config, SettingsScope::Output, &request.presets)?;

    for entry in &request.settings {
        let (kind, value) = entry
            .split_once('=')
            .map_or((entry.as_str(), ""), |(k, v)| (k.trim(), v.trim()));
        let setting = kinds::setting_from_name(kind, value)
            .with_context(|| format!("Invalid --set {:?}", entry))?;
        output_settings
            .add(setting)
            .with_context(|| format!("Cannot apply --set {:?}", entry))?;
    }

    let mut invocation = Invocation::new();
    if request.overwrite {
        invocation.global(Overwrite::flag()?)?;
    }
    invocation
        .input(input, input_settings)
        .context("Input settings do not apply to the input")?;
    invocation
        .output(output, output_settings)
        .context("Output settings do not apply to the output")?;

    tracing::info!(
        "Assembled {} tokens for {:?}",
        invocation.tokens().len(),
        output_path
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&invocation.plan())?);
    } else {
        let tokens = invocation.tokens_with_program("ffmpeg");
        println!(
            "{}",
            tokens.iter().map(|t| quote(t)).collect::<Vec<_>>().join(" ")
        );
    }

    Ok(())
}

/// The explicit output path, or a uniquely named output in the configured
/// output (or temp) directory.
fn resolve_output(
    registry: &ContainerRegistry,
    config: &Config,
    request: &BuildRequest,
    input: &Resource,
) -> Result<Resource> {
    if let Some(output) = &request.output {
        let output_path = if output.is_relative() {
            config.paths.output_dir.join(output)
        } else {
            output.clone()
        };
        return registry
            .resolve(&output_path)
            .with_context(|| format!("Failed to resolve output {:?}", output_path));
    }

    let extension = request.format.as_deref().unwrap_or(input.extension());
    let registration = registry
        .lookup(extension)
        .with_context(|| format!("No container registered for output format {:?}", extension))?;
    let output = if request.intermediate {
        config.paths.create_temporary_of(registration)
    } else {
        config.paths.create_output_of(registration)
    };
    tracing::info!("Generated output {:?}", output.full_path());
    Ok(output)
}

fn compose_named(
    config: &Config,
    scope: SettingsScope,
    names: &[String],
) -> Result<ffcompose_core::SettingsCollection> {
    let templates = names
        .iter()
        .map(|name| config::resolve_template(config, name))
        .collect::<Result<Vec<_>>>()?;

    if let Some(mismatch) = templates
        .iter()
        .find(|t| SettingsScope::from(t.scope()) != scope)
    {
        let flag = match mismatch.scope() {
            Scope::Input => "--input-preset",
            Scope::Output => "--preset",
        };
        anyhow::bail!(
            "Template '{}' is an {} template; pass it with {}",
            mismatch.name(),
            mismatch.scope(),
            flag
        );
    }

    Ok(template::compose(scope, &templates)?)
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            println!("  Output dir: {}", config.paths.output_dir.display());
            println!("  Temp dir: {}", config.paths.temp_dir.display());
            println!("  Templates: {}", config.templates.len());
            for template in &config.templates {
                println!(
                    "    {} ({}, {} settings)",
                    template.name,
                    template.scope,
                    template.settings.len()
                );
            }
        }
        None => {
            println!("No config file specified, using defaults");
            let config = Config::default();
            println!("Default config:");
            println!("  Output dir: {}", config.paths.output_dir.display());
            println!("  Templates: {}", config.templates.len());
        }
    }

    Ok(())
}

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Characters that never need shell quoting.
fn is_shell_safe(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '@' | '%' | '+' | '=' | ':' | ',' | '.' | '/' | '-')
}

fn quote(token: &str) -> String {
    if !token.is_empty() && token.chars().all(is_shell_safe) {
        token.to_string()
    } else {
        format!("'{}'", token.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ffcompose_core::resource::containers::Mp4;

    #[test]
    fn test_commands_use_the_given_registry() {
        let registry = ContainerRegistry::builder().register::<Mp4>().build();
        assert!(resolve_path(&registry, Path::new("/in/a.mp4"), false).is_ok());
        assert!(resolve_path(&registry, Path::new("/in/a.mkv"), false).is_err());

        let request = BuildRequest {
            input: PathBuf::from("/in/a.mp4"),
            output: None,
            format: Some("mkv".to_string()),
            intermediate: false,
            input_presets: Vec::new(),
            presets: Vec::new(),
            settings: Vec::new(),
            overwrite: false,
        };
        let err = build_command(&registry, &Config::default(), &request, false).unwrap_err();
        assert!(err.to_string().contains("mkv"));
    }

    #[test]
    fn test_quote_leaves_plain_tokens() {
        assert_eq!(quote("-c:v"), "-c:v");
        assert_eq!(quote("/out/take_2.mp4"), "/out/take_2.mp4");
        assert_eq!(quote("scale=1280:-2,fps=24"), "scale=1280:-2,fps=24");
    }

    #[test]
    fn test_quote_shell_metacharacters() {
        assert_eq!(quote(""), "''");
        assert_eq!(quote("my clip.mp4"), "'my clip.mp4'");
        assert_eq!(quote("[v]"), "'[v]'");
        assert_eq!(quote("a;rm -rf"), "'a;rm -rf'");
        assert_eq!(quote("$HOME"), "'$HOME'");
        assert_eq!(quote("a&b|c"), "'a&b|c'");
        assert_eq!(quote("*.mp4"), "'*.mp4'");
        assert_eq!(quote("it's"), r"'it'\''s'");
    }
}
