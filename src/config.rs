//! Configuration management for the community topology engine

use serde::{Deserialize, Serialize};

/// Strength range handed to the filtration engine.
///
/// The filtration order comes from the relationship strengths themselves;
/// the range is carried through to the result for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiltrationParams {
    pub min_strength: f32,
    pub max_strength: f32,
    pub steps: u32,
}

impl Default for FiltrationParams {
    fn default() -> Self {
        Self {
            min_strength: 0.0,
            max_strength: 10.0,
            steps: 20,
        }
    }
}

/// Default configuration for community analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Minimum total strength for edge synthesis to create a relationship
    pub min_strength: f32,

    /// Boundary score at or above which a member is an isolation risk
    pub boundary_threshold: f32,

    /// Highest boundary score of a member suggested as an introduction partner
    pub introduction_boundary_cap: f32,

    pub filtration: FiltrationParams,

    /// Number of event slots to keep
    pub event_top_n: usize,

    /// Slots with fewer available members are skipped
    pub event_min_attendance: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            min_strength: 0.5,
            boundary_threshold: 0.7,
            introduction_boundary_cap: 0.5,
            filtration: FiltrationParams::default(),
            event_top_n: 5,
            event_min_attendance: 5,
        }
    }
}

impl Config {
    /// Create a new configuration with custom thresholds
    pub fn new(min_strength: f32, boundary_threshold: f32) -> Self {
        Self {
            min_strength,
            boundary_threshold,
            ..Default::default()
        }
    }

    /// Load overrides from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &str) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"min_strength": 1.5}"#).unwrap();
        assert_eq!(config.min_strength, 1.5);
        assert_eq!(config.boundary_threshold, 0.7);
        assert_eq!(config.filtration.steps, 20);
    }

    #[test]
    fn new_overrides_thresholds() {
        let config = Config::new(2.0, 0.8);
        assert_eq!(config.min_strength, 2.0);
        assert_eq!(config.boundary_threshold, 0.8);
        assert_eq!(config.event_top_n, 5);
    }
}
