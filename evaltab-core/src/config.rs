//! Configuration system for evaltab.
//!
//! Uses `figment` for layered configuration: defaults -> config files ->
//! environment -> CLI args. Configuration is loaded from
//! `~/.config/evaltab/config.toml`, `.evaltab/config.toml` in the working
//! directory, and an optional explicit file.

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{ConfigError, EvaltabError, Result};
use crate::palette::ColorScale;

/// Top-level configuration for a report run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaltabConfig {
    pub output: OutputConfig,
    pub palette: PaletteConfig,
    pub symbols: SymbolsConfig,
    pub latex: LatexConfig,
}

/// Which rendering of the report to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Structured JSON: colors, symbol commands, rows and legends.
    #[default]
    Json,
    /// LaTeX macro definitions followed by table rows.
    Latex,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Latex => write!(f, "latex"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "latex" | "tex" => Ok(OutputFormat::Latex),
            other => Err(format!("unknown output format '{other}' (expected json or latex)")),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Indentation width of the JSON output.
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            indent: 4,
        }
    }
}

/// Symbol color palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteConfig {
    /// Gradient stops as hex colors, spread evenly over the scale.
    pub stops: Vec<String>,
    /// Number of colors sampled from the gradient. Also caps the number of
    /// symbols a run may hand out.
    pub size: usize,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            // orange, indigo, a mid blue, lightgreen
            stops: vec![
                "ffa500".to_string(),
                "4b0082".to_string(),
                "008ae5".to_string(),
                "90ee90".to_string(),
            ],
            size: 13,
        }
    }
}

impl PaletteConfig {
    /// Sample the configured gradient.
    pub fn colors(&self) -> Result<Vec<String>> {
        let scale = ColorScale::from_hex(&self.stops)?;
        Ok(scale.colors(self.size)?)
    }
}

/// Order in which text groupings are offered to the symbol pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimOrder {
    /// Every `text_true` list first, then every `text_false` list, both in
    /// record order, before any row is built.
    #[default]
    PrePass,
    /// Positive then negative list of each record, while building rows.
    OnDemand,
}

impl std::fmt::Display for ClaimOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClaimOrder::PrePass => write!(f, "pre_pass"),
            ClaimOrder::OnDemand => write!(f, "on_demand"),
        }
    }
}

/// Symbol assignment settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymbolsConfig {
    pub claim_order: ClaimOrder,
}

/// Settings for the LaTeX rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatexConfig {
    /// Fill color used by every symbol macro.
    pub symbol_fill: String,
    /// Subscripted label for similarity method numbers, e.g. `$s_{1}$`.
    pub similarity_prefix: String,
    /// Subscripted label for score method numbers, e.g. `$y_{1}$`.
    pub score_prefix: String,
}

impl Default for LatexConfig {
    fn default() -> Self {
        Self {
            symbol_fill: "black!60".to_string(),
            similarity_prefix: "s".to_string(),
            score_prefix: "y".to_string(),
        }
    }
}

/// Load configuration from layered sources.
///
/// Priority (highest to lowest):
/// 1. Environment variables (prefixed with `EVALTAB_`)
/// 2. Explicit config file (`--config`)
/// 3. Workspace-local config (`.evaltab/config.toml`)
/// 4. User config (`~/.config/evaltab/config.toml`)
/// 5. Built-in defaults
///
/// CLI flags are applied by the caller on the returned value.
pub fn load_config(workspace: Option<&Path>, explicit: Option<&Path>) -> Result<EvaltabConfig> {
    let mut figment = Figment::from(Serialized::defaults(EvaltabConfig::default()));

    // User-level config
    if let Some(config_dir) = directories::ProjectDirs::from("dev", "evaltab", "evaltab") {
        let user_config = config_dir.config_dir().join("config.toml");
        if user_config.exists() {
            figment = figment.merge(Toml::file(&user_config));
        }
    }

    // Workspace-level config
    if let Some(ws) = workspace {
        let ws_config = ws.join(".evaltab").join("config.toml");
        if ws_config.exists() {
            figment = figment.merge(Toml::file(&ws_config));
        }
    }

    if let Some(path) = explicit {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }
        figment = figment.merge(Toml::file(path));
    }

    // Environment variables (EVALTAB_OUTPUT__FORMAT, EVALTAB_PALETTE__SIZE, etc.)
    figment = figment.merge(Env::prefixed("EVALTAB_").split("__"));

    figment
        .extract()
        .map_err(|e| EvaltabError::Config(ConfigError::from(e)))
}

/// Check whether a workspace or user configuration file exists.
pub fn config_exists(workspace: Option<&Path>) -> bool {
    if let Some(config_dir) = directories::ProjectDirs::from("dev", "evaltab", "evaltab") {
        if config_dir.config_dir().join("config.toml").exists() {
            return true;
        }
    }

    if let Some(ws) = workspace {
        if ws.join(".evaltab").join("config.toml").exists() {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EvaltabConfig::default();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.indent, 4);
        assert_eq!(config.palette.size, 13);
        assert_eq!(config.palette.stops.len(), 4);
        assert_eq!(config.symbols.claim_order, ClaimOrder::PrePass);
        assert_eq!(config.latex.symbol_fill, "black!60");
    }

    #[test]
    fn test_output_format_parse_and_display() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("LaTeX".parse::<OutputFormat>().unwrap(), OutputFormat::Latex);
        assert_eq!("tex".parse::<OutputFormat>().unwrap(), OutputFormat::Latex);
        assert!("csv".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Latex.to_string(), "latex");
        assert_eq!(ClaimOrder::OnDemand.to_string(), "on_demand");
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = EvaltabConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: EvaltabConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_default_palette_colors() {
        let colors = PaletteConfig::default().colors().unwrap();
        assert_eq!(colors.len(), 13);
        assert_eq!(colors[0], "ffa500");
        assert_eq!(colors[12], "90ee90");
    }

    #[test]
    fn test_palette_config_rejects_bad_stop() {
        let palette = PaletteConfig {
            stops: vec!["ffa500".to_string(), "not-a-color".to_string()],
            size: 3,
        };
        assert!(matches!(
            palette.colors(),
            Err(EvaltabError::Palette(_))
        ));
    }

    #[test]
    fn test_load_config_from_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_dir = dir.path().join(".evaltab");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        std::fs::write(
            cfg_dir.join("config.toml"),
            r#"
[output]
format = "latex"

[symbols]
claim_order = "on_demand"

[latex]
symbol_fill = "gray"
"#,
        )
        .unwrap();

        let config = load_config(Some(dir.path()), None).unwrap();
        assert_eq!(config.output.format, OutputFormat::Latex);
        assert_eq!(config.output.indent, 4);
        assert_eq!(config.symbols.claim_order, ClaimOrder::OnDemand);
        assert_eq!(config.latex.symbol_fill, "gray");
        assert_eq!(config.latex.score_prefix, "y");
        assert!(config_exists(Some(dir.path())));
    }

    #[test]
    fn test_explicit_file_overrides_workspace() {
        let dir = tempfile::tempdir().unwrap();
        let cfg_dir = dir.path().join(".evaltab");
        std::fs::create_dir_all(&cfg_dir).unwrap();
        std::fs::write(cfg_dir.join("config.toml"), "[palette]\nsize = 5\n").unwrap();
        let explicit = dir.path().join("custom.toml");
        std::fs::write(&explicit, "[palette]\nsize = 7\n").unwrap();

        let config = load_config(Some(dir.path()), Some(&explicit)).unwrap();
        assert_eq!(config.palette.size, 7);
    }

    #[test]
    fn test_explicit_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(None, Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(matches!(
            err,
            EvaltabError::Config(ConfigError::FileNotFound { .. })
        ));
    }

    #[test]
    fn test_invalid_value_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let explicit = dir.path().join("bad.toml");
        std::fs::write(&explicit, "[output]\nformat = \"html\"\n").unwrap();
        let err = load_config(None, Some(&explicit)).unwrap_err();
        assert!(matches!(
            err,
            EvaltabError::Config(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[output]\nformat = \"json\"\n")?;
            jail.set_env("EVALTAB_OUTPUT__FORMAT", "latex");
            let config = load_config(None, Some(Path::new("custom.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.output.format, OutputFormat::Latex);
            Ok(())
        });
    }
}
