//! Optional on-disk configuration for the CLI driver and benchmark harness.
//!
//! A `layout.toml` in the working directory overrides these defaults; any
//! field it omits falls back to [`LayoutConfig::default`]. Only the binaries
//! consume this — the `graph` core takes its parameters directly.

use serde::{Deserialize, Serialize};

/// Tunable simulation parameters, mirroring [`crate::graph::LayoutEngine`]'s
/// constructor and cooling-schedule setters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Frame width.
    pub width: f32,
    /// Frame height.
    pub height: f32,
    /// Scaling constant `C` used to derive the optimal distance `k`.
    pub scaling_constant: f32,
    /// Initial temperature.
    pub initial_temperature: f32,
    /// Per-step cooling multiplier.
    pub cooling_rate: f32,
    /// Temperature floor.
    pub t_min: f32,
    /// Barnes-Hut acceptance threshold. Ignored when the brute-force
    /// strategy is selected.
    pub theta: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 1000.0,
            scaling_constant: 1.0,
            initial_temperature: 10.0,
            cooling_rate: 0.95,
            t_min: 1e-3,
            theta: 0.5,
        }
    }
}

impl LayoutConfig {
    /// Loads `path` if it exists, falling back to [`Default::default`]
    /// otherwise. A present-but-unparsable file is an error.
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_default() {
        let cfg = LayoutConfig::load(std::path::Path::new("/nonexistent/layout.toml")).unwrap();
        assert_eq!(cfg.width, LayoutConfig::default().width);
    }

    #[test]
    fn roundtrips_through_toml() {
        let cfg = LayoutConfig::default();
        let s = toml::to_string(&cfg).unwrap();
        let back: LayoutConfig = toml::from_str(&s).unwrap();
        assert_eq!(back.width, cfg.width);
        assert_eq!(back.theta, cfg.theta);
    }
}
