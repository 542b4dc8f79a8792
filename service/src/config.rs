use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use log::LevelFilter;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default simulated latency between two archive steps.
pub const DEFAULT_STEP_DELAY_MS: u64 = 50;

#[derive(Clone, Debug, PartialEq)]
pub enum RustEnv {
    Development,
    Production,
    Staging,
}

#[derive(Debug, PartialEq, Eq)]
pub struct RustEnvParseError;

impl FromStr for RustEnv {
    type Err = RustEnvParseError;
    fn from_str(level: &str) -> Result<RustEnv, Self::Err> {
        match level.to_lowercase().as_str() {
            "development" => Ok(RustEnv::Development),
            "production" => Ok(RustEnv::Production),
            "staging" => Ok(RustEnv::Staging),
            _ => Err(RustEnvParseError),
        }
    }
}

impl fmt::Display for RustEnv {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RustEnv::Development => write!(f, "development"),
            RustEnv::Production => write!(f, "production"),
            RustEnv::Staging => write!(f, "staging"),
        }
    }
}

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "127.0.0.1")]
    pub interface: Option<String>,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 4000)]
    pub port: u16,

    /// Simulated latency in milliseconds between two steps of an archive run
    #[arg(long, env, default_value_t = DEFAULT_STEP_DELAY_MS)]
    pub step_delay_ms: u64,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// Set the Rust runtime environment to use.
    #[arg(
    short,
    long,
    env,
    default_value_t = RustEnv::Development,
    value_parser = clap::builder::PossibleValuesParser::new([
        "DEVELOPMENT", "PRODUCTION", "STAGING",
        "development", "production", "staging"
    ])
        .map(|s| s.parse::<RustEnv>().unwrap()),
    )]
    pub runtime_env: RustEnv,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    /// Address the server binds to, `interface:port`.
    pub fn listen_addr(&self) -> String {
        let interface = self.interface.as_deref().unwrap_or("127.0.0.1");
        format!("{}:{}", interface, self.port)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    pub fn runtime_env(&self) -> RustEnv {
        self.runtime_env.clone()
    }

    pub fn is_production(&self) -> bool {
        self.runtime_env() == RustEnv::Production
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_no_flags_given() {
        let config = Config::parse_from(["keno_archive_rs"]);

        assert_eq!(config.interface.as_deref(), Some("127.0.0.1"));
        assert_eq!(config.port, 4000);
        assert_eq!(config.step_delay(), Duration::from_millis(DEFAULT_STEP_DELAY_MS));
        assert_eq!(config.log_level_filter, LevelFilter::Info);
        assert_eq!(config.runtime_env(), RustEnv::Development);
        assert!(!config.is_production());
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = Config::parse_from([
            "keno_archive_rs",
            "--interface",
            "0.0.0.0",
            "--port",
            "8080",
            "--step-delay-ms",
            "0",
            "--log-level-filter",
            "TRACE",
            "--runtime-env",
            "PRODUCTION",
        ]);

        assert_eq!(config.listen_addr(), "0.0.0.0:8080");
        assert!(config.step_delay().is_zero());
        assert_eq!(config.log_level_filter, LevelFilter::Trace);
        assert!(config.is_production());
    }

    #[test]
    fn test_rust_env_round_trips_through_display() {
        for env in [RustEnv::Development, RustEnv::Production, RustEnv::Staging] {
            assert_eq!(env.to_string().parse::<RustEnv>(), Ok(env));
        }
        assert_eq!("qa".parse::<RustEnv>(), Err(RustEnvParseError));
    }
}
