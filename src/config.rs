use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::manifest::ICNS_FILE;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub converter: ConverterConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("icons")
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConverterConfig {
    /// Program that turns an .iconset directory into an .icns file
    #[serde(default = "default_converter_program")]
    pub program: String,
    /// When false the placeholder ICNS is always written
    #[serde(default = "default_converter_enabled")]
    pub enabled: bool,
}

fn default_converter_program() -> String {
    "iconutil".to_string()
}

fn default_converter_enabled() -> bool {
    true
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig {
            program: default_converter_program(),
            enabled: default_converter_enabled(),
        }
    }
}

impl Config {
    /// Load and validate a YAML config file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml(&contents)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;
        Ok(config)
    }

    /// Load `path` when given, otherwise fall back to the built-in defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Config::default()),
        }
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let config: Config =
            serde_yaml::from_str(contents).context("Failed to parse config")?;

        // Validate configuration after loading
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.output.dir.as_os_str().is_empty() {
            bail!("output.dir cannot be empty");
        }

        if self.converter.program.trim().is_empty() {
            bail!("converter.program cannot be empty");
        }

        Ok(())
    }

    pub fn icns_path(&self) -> PathBuf {
        self.output.dir.join(ICNS_FILE)
    }
}
