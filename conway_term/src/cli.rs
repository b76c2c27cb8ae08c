// cli.rs - Command line options and the validated startup configuration

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use conway::{DEFAULT_STABILITY_THRESHOLD, SeedPolicy, Simulation, random_factory};
use thiserror::Error;

use crate::fetch::validate_wiki_url;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

const AFTER_HELP: &str = "\
Shortcuts:
  q, h/?, space, r, l

URL Example:
  https://conwaylife.com/wiki/Glider";

#[derive(Parser, Debug)]
#[command(name = "conway_term", version, about = "Conway's Game of Life in the terminal", after_help = AFTER_HELP)]
pub struct Cli {
    /// Generations per second.
    #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
    pub fps: i64,

    /// Seed for the random starting board.
    #[arg(long, default_value_t = 0)]
    pub seed: u64,

    /// ConwayLife wiki page to load the starting pattern from.
    #[arg(long)]
    pub pattern_url: Option<String>,

    /// Identical generations in a row before the board is reseeded.
    #[arg(long, default_value_t = DEFAULT_STABILITY_THRESHOLD)]
    pub stability_threshold: u32,

    /// Side of the centered window random cells are placed in.
    #[arg(long, default_value_t = SeedPolicy::default().window)]
    pub seed_window: usize,

    /// Number of live cells in a random board.
    #[arg(long, default_value_t = SeedPolicy::default().cells)]
    pub seed_cells: usize,

    /// Give up on the pattern download after this many milliseconds.
    #[arg(long, default_value_t = 5_000)]
    pub fetch_timeout_ms: u64,

    /// Largest pattern page accepted, in bytes.
    #[arg(long, default_value_t = 1024 * 1024)]
    pub max_pattern_bytes: u64,

    /// Write logs to this file (the terminal itself is taken by the board).
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid fps {0}: must be between 1 and 1000000000")]
    InvalidFps(i64),
    #[error("invalid pattern-url {0:?}: must match https://conwaylife.com/wiki/...")]
    InvalidPatternUrl(String),
    #[error("invalid stability-threshold: must be greater than zero")]
    InvalidStabilityThreshold,
    #[error("invalid fetch-timeout-ms: must be greater than zero")]
    InvalidFetchTimeout,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tick_interval       : Duration,
    pub seed                : u64,
    pub pattern_url         : Option<String>,
    pub stability_threshold : u32,
    pub seed_policy         : SeedPolicy,
    pub fetch_timeout       : Duration,
    pub max_pattern_bytes   : u64,
    pub log_file            : Option<PathBuf>,
}

impl Cli {
    pub fn into_config(self) -> Result<AppConfig, ConfigError> {
        // rates past one tick per nanosecond leave no usable interval
        let tick_nanos = u64::try_from(self.fps)
            .ok()
            .filter(|&fps| fps > 0)
            .map(|fps| NANOS_PER_SECOND / fps)
            .filter(|&nanos| nanos > 0)
            .ok_or(ConfigError::InvalidFps(self.fps))?;
        if let Some(url) = &self.pattern_url
            && !validate_wiki_url(url)
        {
            return Err(ConfigError::InvalidPatternUrl(url.clone()));
        }
        if self.stability_threshold == 0 {
            return Err(ConfigError::InvalidStabilityThreshold);
        }
        if self.fetch_timeout_ms == 0 {
            return Err(ConfigError::InvalidFetchTimeout);
        }

        Ok(AppConfig {
            tick_interval: Duration::from_nanos(tick_nanos),
            seed: self.seed,
            pattern_url: self.pattern_url,
            stability_threshold: self.stability_threshold,
            seed_policy: SeedPolicy { window: self.seed_window, cells: self.seed_cells },
            fetch_timeout: Duration::from_millis(self.fetch_timeout_ms),
            max_pattern_bytes: self.max_pattern_bytes,
            log_file: self.log_file,
        })
    }
}

impl AppConfig {
    /// `random`, or the configured pattern URL.
    pub fn source(&self) -> &str {
        self.pattern_url.as_deref().unwrap_or("random")
    }

    pub fn simulation(&self, width: usize, height: usize) -> Simulation {
        let factory = random_factory(self.seed, self.seed_policy);
        Simulation::with_factory(width, height, factory).with_stability_threshold(self.stability_threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<AppConfig, ConfigError> {
        let argv = std::iter::once("conway_term").chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("arguments parse").into_config()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.tick_interval, Duration::from_millis(200));
        assert_eq!(config.seed, 0);
        assert_eq!(config.source(), "random");
        assert_eq!(config.stability_threshold, 100);
        assert_eq!(config.seed_policy, SeedPolicy::default());
        assert_eq!(config.fetch_timeout, Duration::from_secs(5));
        assert_eq!(config.max_pattern_bytes, 1_048_576);
    }

    #[test]
    fn non_positive_fps_is_fatal() {
        assert_eq!(parse(&["--fps", "0"]).unwrap_err(), ConfigError::InvalidFps(0));
        assert_eq!(parse(&["--fps", "-3"]).unwrap_err(), ConfigError::InvalidFps(-3));
    }

    #[test]
    fn fps_too_high_for_a_tick_interval_is_fatal() {
        assert_eq!(
            parse(&["--fps", "2000000000"]).unwrap_err(),
            ConfigError::InvalidFps(2_000_000_000)
        );
        let fastest = parse(&["--fps", "1000000000"]).unwrap();
        assert_eq!(fastest.tick_interval, Duration::from_nanos(1));
    }

    #[test]
    fn pattern_url_must_be_a_wiki_page() {
        let url = "https://conwaylife.com/wiki/Glider";
        assert_eq!(parse(&["--pattern-url", url]).unwrap().source(), url);

        let bad = "http://conwaylife.com/wiki/Glider";
        assert_eq!(
            parse(&["--pattern-url", bad]).unwrap_err(),
            ConfigError::InvalidPatternUrl(bad.to_string())
        );
    }

    #[test]
    fn seed_policy_flags() {
        let config = parse(&["--seed-window", "4", "--seed-cells", "3", "--seed", "9"]).unwrap();
        assert_eq!(config.seed_policy, SeedPolicy { window: 4, cells: 3 });
        assert_eq!(config.simulation(20, 20).board().population(), 3);
    }

    #[test]
    fn malformed_input_is_rejected_by_the_parser() {
        assert!(Cli::try_parse_from(["conway_term", "--fps", "fast"]).is_err());
        assert!(Cli::try_parse_from(["conway_term", "--bogus"]).is_err());
    }
}
