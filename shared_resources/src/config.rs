use std::env;
use std::fs;
use std::io;
use std::time::Duration;

use log::warn;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("could not parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CarConfig {
    pub max_speed: f32,
    pub acceleration: f32,
}

impl Default for CarConfig {
    fn default() -> Self {
        CarConfig {
            max_speed: 50.0,
            acceleration: 10.0,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub move_tick_ms: u64,
    pub no_destination_poll_ms: u64,
    pub door_step_ms: u64,
    pub door_pause_ms: u64,
    pub button_poll_ms: u64,
    pub button_debounce_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            move_tick_ms: 500,
            no_destination_poll_ms: 100,
            door_step_ms: 1000,
            door_pause_ms: 5000,
            button_poll_ms: 100,
            button_debounce_ms: 15,
        }
    }
}

impl TimingConfig {
    pub fn move_tick(&self) -> Duration {
        Duration::from_millis(self.move_tick_ms)
    }

    pub fn no_destination_poll(&self) -> Duration {
        Duration::from_millis(self.no_destination_poll_ms)
    }

    pub fn door_step(&self) -> Duration {
        Duration::from_millis(self.door_step_ms)
    }

    pub fn door_pause(&self) -> Duration {
        Duration::from_millis(self.door_pause_ms)
    }

    pub fn button_poll(&self) -> Duration {
        Duration::from_millis(self.button_poll_ms)
    }

    pub fn button_debounce(&self) -> Duration {
        Duration::from_millis(self.button_debounce_ms)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ChannelConfig {
    pub status_log_capacity: usize,
    pub car_input_capacity: usize,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        ChannelConfig {
            status_log_capacity: 20,
            car_input_capacity: 16,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    fn parse(text: &str) -> Option<Self> {
        match text {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            _ => None,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub status_panel: bool,
    pub line_length: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            format: OutputFormat::Text,
            status_panel: false,
            line_length: 50,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub car: CarConfig,
    pub timing: TimingConfig,
    pub channels: ChannelConfig,
    pub output: OutputConfig,
}

const CONFIG_FILE_PATH: &str = "config.json";
const FALLBACK_CONFIG_FILE_PATH: &str = "_config.json";

impl Config {
    /// Reads the configuration file named on the command line (or the default
    /// ones) and applies the remaining command line overrides.
    pub fn get() -> Result<Self, ConfigError> {
        let args: Vec<String> = env::args().collect();
        let overrides = parse_env_args(&args);

        let mut config = match &overrides.config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::read_config_file()?,
        };
        if let Some(format) = overrides.format {
            config.output.format = format;
        }
        if let Some(panel) = overrides.status_panel {
            config.output.status_panel = panel;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn from_json(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source: source,
        })?;
        Self::from_json(&contents)
    }

    fn read_config_file() -> Result<Self, ConfigError> {
        match fs::read_to_string(CONFIG_FILE_PATH) {
            Ok(contents) => Self::from_json(&contents),
            Err(_) => match fs::read_to_string(FALLBACK_CONFIG_FILE_PATH) {
                Ok(contents) => {
                    warn!("No configuration file provided, using {}...", FALLBACK_CONFIG_FILE_PATH);
                    Self::from_json(&contents)
                }
                Err(_) => {
                    warn!("No configuration file found, using built-in defaults...");
                    Ok(Config::default())
                }
            },
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.car.max_speed.is_finite() && self.car.max_speed > 0.0) {
            return Err(ConfigError::Invalid(format!("max_speed must be positive, got {}", self.car.max_speed)));
        }
        if !(self.car.acceleration.is_finite() && self.car.acceleration > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "acceleration must be positive, got {}",
                self.car.acceleration
            )));
        }
        if self.channels.status_log_capacity == 0 || self.channels.car_input_capacity == 0 {
            return Err(ConfigError::Invalid(String::from("channel capacities must be at least 1")));
        }
        if self.output.line_length == 0 {
            return Err(ConfigError::Invalid(String::from("line_length must be at least 1")));
        }
        Ok(())
    }
}

#[derive(Debug, Default, PartialEq)]
struct ArgOverrides {
    config_path: Option<String>,
    format: Option<OutputFormat>,
    status_panel: Option<bool>,
}

fn parse_env_args(args: &[String]) -> ArgOverrides {
    let mut overrides = ArgOverrides::default();

    for arg_pair in args.rchunks_exact(2) {
        match arg_pair[0].as_str() {
            "--config" => {
                overrides.config_path = Some(arg_pair[1].clone());
            }
            "--format" => {
                overrides.format = match OutputFormat::parse(&arg_pair[1]) {
                    Some(format) => Some(format),
                    None => {
                        warn!("format {} is not text or json, skipping...", arg_pair[1]);
                        overrides.format
                    }
                };
            }
            "--panel" => {
                overrides.status_panel = match arg_pair[1].parse::<bool>() {
                    Ok(panel) => Some(panel),
                    Err(_) => {
                        warn!("panel {} is not true or false, skipping...", arg_pair[1]);
                        overrides.status_panel
                    }
                };
            }
            _ => {
                warn!("illegal argument {}, skipping...", arg_pair[0]);
            }
        }
    }
    overrides
}
