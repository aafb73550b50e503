use std::fmt;
use std::str::FromStr;

use crate::app::AppContext;
use crate::domain::AppError;
use crate::domain::resolve::{ResolveOptions, ResolvedConfiguration, SetupResolver};
use crate::ports::{DeviceClassCatalog, SetupRegistry};

/// Serialization of a resolved configuration on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Toml,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(OutputFormat::Toml),
            "json" => Ok(OutputFormat::Json),
            "yaml" | "yml" => Ok(OutputFormat::Yaml),
            other => Err(format!("unknown output format '{}': use toml, json or yaml", other)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OutputFormat::Toml => "toml",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        })
    }
}

pub fn execute<R, C, S>(
    ctx: &AppContext<R, C>,
    names: &[S],
    options: ResolveOptions,
) -> Result<ResolvedConfiguration, AppError>
where
    R: SetupRegistry,
    C: DeviceClassCatalog,
    S: AsRef<str>,
{
    SetupResolver::resolve_all(names, ctx.setups(), ctx.classes(), options)
}

/// Render a resolved configuration in the requested format.
pub fn render(config: &ResolvedConfiguration, format: OutputFormat) -> Result<String, AppError> {
    let what = format!("resolved configuration as {}", format);
    let rendered = match format {
        OutputFormat::Toml => toml::to_string_pretty(config)
            .map_err(|err| AppError::ParseError { what, details: err.to_string() })?,
        OutputFormat::Json => serde_json::to_string_pretty(config)
            .map_err(|err| AppError::ParseError { what, details: err.to_string() })?,
        OutputFormat::Yaml => serde_yaml::to_string(config)
            .map_err(|err| AppError::ParseError { what, details: err.to_string() })?,
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MemoryClassCatalog, MemorySetupRegistry, SetupBuilder};

    fn context() -> AppContext<MemorySetupRegistry, MemoryClassCatalog> {
        let setups = MemorySetupRegistry::new(vec![
            SetupBuilder::new("instrument")
                .include("motors")
                .device("Sample", "nicos.devices.sample.Sample")
                .startup("printinfo('ready')")
                .build(),
            SetupBuilder::new("motors").device("mtt", "nicos.devices.generic.VirtualMotor").build(),
        ]);
        AppContext::new(setups, MemoryClassCatalog::default())
    }

    #[test]
    fn parses_output_formats() {
        assert_eq!("TOML".parse::<OutputFormat>().unwrap(), OutputFormat::Toml);
        assert_eq!("yml".parse::<OutputFormat>().unwrap(), OutputFormat::Yaml);
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn resolves_through_context() {
        let config = execute(&context(), &["instrument"], ResolveOptions::default()).unwrap();
        assert_eq!(config.loaded, ["motors", "instrument"]);
        assert_eq!(config.device_names(), ["Sample", "mtt"]);
    }

    #[test]
    fn renders_every_format() {
        let config = execute(&context(), &["instrument"], ResolveOptions::default()).unwrap();

        let json = render(&config, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["devices"]["mtt"]["setup"], "motors");
        assert_eq!(value["devices"]["mtt"]["type"], "nicos.devices.generic.VirtualMotor");

        let toml_out = render(&config, OutputFormat::Toml).unwrap();
        assert!(toml_out.contains("[devices.mtt]"));

        let yaml = render(&config, OutputFormat::Yaml).unwrap();
        assert!(yaml.contains("printinfo('ready')"));
    }
}
