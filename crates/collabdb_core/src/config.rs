//! Database configuration.

use std::time::Duration;

/// Smallest simulated round trip; zero is never used.
pub const MIN_LATENCY: Duration = Duration::from_millis(1);

/// Configuration for opening a database.
#[derive(Debug, Clone)]
pub struct Config {
    /// Simulated network round trip applied before every query and blob call.
    pub latency: Duration,

    /// Seed for the deterministic seed generator.
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(120),
            seed: 42,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the simulated latency, clamped to [`MIN_LATENCY`].
    #[must_use]
    pub const fn latency(mut self, latency: Duration) -> Self {
        self.latency = if latency.as_nanos() < MIN_LATENCY.as_nanos() {
            MIN_LATENCY
        } else {
            latency
        };
        self
    }

    /// Sets the seed generator seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.latency, Duration::from_millis(120));
        assert_eq!(config.seed, 42);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new().latency(Duration::from_millis(5)).seed(7);
        assert_eq!(config.latency, Duration::from_millis(5));
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn zero_latency_is_clamped() {
        let config = Config::new().latency(Duration::ZERO);
        assert_eq!(config.latency, MIN_LATENCY);
    }
}
