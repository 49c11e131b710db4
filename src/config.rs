use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const ENV_PREFIX: &str = "LCD20X4_";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayBackend {
    Tinkerforge,
    Console,
    Fake,
}

impl std::str::FromStr for DisplayBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tinkerforge" => Ok(Self::Tinkerforge),
            "console" => Ok(Self::Console),
            "fake" => Ok(Self::Fake),
            other => Err(format!("unknown display backend '{}'", other)),
        }
    }
}

/// Where the peripheral lives. Read-only for every session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayEndpoint {
    pub host: String,
    pub port: u16,
    pub uid: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: DisplayEndpoint,
    pub custom_char_file: PathBuf,
    pub debug: bool,
    pub connect_timeout: Duration,
    pub response_timeout: Duration,
    pub backend: DisplayBackend,
    pub logger_timezone: chrono::FixedOffset,
    pub text_unit: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DisplayEndpoint {
                host: "127.0.0.1".to_string(),
                port: 4223,
                uid: "BHN".to_string(),
            },
            custom_char_file: PathBuf::from("customchar.json"),
            debug: false,
            connect_timeout: Duration::from_secs(2),
            response_timeout: Duration::from_millis(2500),
            backend: DisplayBackend::Tinkerforge,
            logger_timezone: utc(),
            text_unit: 1,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(format!("{}{}", ENV_PREFIX, key)).ok())
    }

    /// Builds a config from the defaults, overriding every key `lookup`
    /// returns a value for. Keys are given without the env prefix.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(host) = lookup("HOST") {
            config.endpoint.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.endpoint.port = parse("PORT", &port)?;
        }
        if let Some(uid) = lookup("UID") {
            config.endpoint.uid = uid.trim().to_string();
        }
        if let Some(path) = lookup("CUSTOM_CHAR_FILE") {
            config.custom_char_file = PathBuf::from(path);
        }
        if let Some(debug) = lookup("DEBUG") {
            config.debug = parse_flag("DEBUG", &debug)?;
        }
        if let Some(ms) = lookup("CONNECT_TIMEOUT_MS") {
            config.connect_timeout = parse_timeout("CONNECT_TIMEOUT_MS", &ms)?;
        }
        if let Some(ms) = lookup("RESPONSE_TIMEOUT_MS") {
            config.response_timeout = parse_timeout("RESPONSE_TIMEOUT_MS", &ms)?;
        }
        if let Some(backend) = lookup("DISPLAY") {
            config.backend = parse("DISPLAY", &backend)?;
        }
        if let Some(hours) = lookup("UTC_OFFSET_HOURS") {
            let hours: i32 = parse("UTC_OFFSET_HOURS", &hours)?;
            config.logger_timezone =
                chrono::FixedOffset::east_opt(hours * 3600).ok_or_else(|| {
                    ConfigError::InvalidValue {
                        key: "UTC_OFFSET_HOURS".to_string(),
                        value: hours.to_string(),
                        reason: "offset out of range".to_string(),
                    }
                })?;
        }

        Ok(config)
    }

    /// Parameter dump written to the debug log at startup.
    pub fn dump(&self) -> Vec<String> {
        vec![
            format!("'Address':'{}'", self.endpoint.host),
            format!("'Port':'{}'", self.endpoint.port),
            format!("'UID':'{}'", self.endpoint.uid),
            format!("'CustomCharFile':'{}'", self.custom_char_file.display()),
            format!("'Debug':'{}'", self.debug),
            format!("'ConnectTimeout':'{:?}'", self.connect_timeout),
            format!("'ResponseTimeout':'{:?}'", self.response_timeout),
            format!("'Display':'{:?}'", self.backend),
        ]
    }
}

fn parse<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: e.to_string(),
        })
}

fn parse_flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "debug" => Ok(true),
        "0" | "false" | "no" | "normal" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "expected true or false".to_string(),
        }),
    }
}

fn parse_timeout(key: &str, value: &str) -> Result<Duration, ConfigError> {
    match parse::<u64>(key, value)? {
        0 => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: value.to_string(),
            reason: "timeout must be at least 1 ms".to_string(),
        }),
        ms => Ok(Duration::from_millis(ms)),
    }
}

fn utc() -> chrono::FixedOffset {
    chrono::Offset::fix(&chrono::Utc)
}
