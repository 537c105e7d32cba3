use serde::{Deserialize, Serialize};

use crate::components::domain::Domain;
use crate::components::frames::Rgba;

/// Default alpha threshold: pixels with alpha below this are transparent
/// for every pixel-based test.
pub const ALPHA_LEVEL: u8 = 20;

/// Engine-wide settings, provided by the host.
/// Can be built in code or loaded from JSON; missing fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Alpha threshold for pixel tests and collision masks (default: 20).
    pub alpha_level: u8,
    /// Flat color painted over opaque pixels in collision masks.
    pub mask_color: Rgba,
    /// Visible region of the world, used by on-screen queries.
    pub screen: Domain,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alpha_level: ALPHA_LEVEL,
            mask_color: Rgba::MASK,
            screen: Domain::new(0.0, 0.0, 800.0, 600.0),
        }
    }
}

impl EngineConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.alpha_level, 20);
    }

    #[test]
    fn parse_partial_config() {
        let json = r#"{
            "alpha_level": 128,
            "screen": { "left": -10.0, "top": -10.0, "right": 10.0, "bottom": 10.0 }
        }"#;
        let config = EngineConfig::from_json(json).unwrap();
        assert_eq!(config.alpha_level, 128);
        assert_eq!(config.screen.right, 10.0);
        assert_eq!(config.mask_color, Rgba::MASK);
    }

    #[test]
    fn rejects_bad_json() {
        assert!(EngineConfig::from_json(r#"{ "alpha_level": "high" }"#).is_err());
    }
}
