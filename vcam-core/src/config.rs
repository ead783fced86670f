/// Viewer configuration with reference defaults
use std::env;
use std::time::Duration;

use crate::error::ConfigError;
use crate::frame::Color;
use crate::projection::Viewport;
use crate::transform::RotationPolicy;

/// Environment variable selecting the rotation policy
pub const ROTATION_POLICY_VAR: &str = "VCAM_ROTATION_POLICY";

/// Tunables for one viewer session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    /// Virtual screen width in pixels
    pub width: u32,
    /// Virtual screen height in pixels
    pub height: u32,
    pub pixel_scale: f32,
    /// Pause at the end of every tick
    pub tick_interval: Duration,
    pub line_color: Color,
    pub rotation_policy: RotationPolicy,
}

impl ViewerConfig {
    /// Defaults, overridden by `VCAM_ROTATION_POLICY` when set
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`ViewerConfig::from_env`], reading variables through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(value) = lookup(ROTATION_POLICY_VAR) {
            config.rotation_policy = value.parse()?;
        }
        Ok(config)
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height, self.pixel_scale)
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            pixel_scale: 100.0,
            tick_interval: Duration::from_millis(10),
            line_color: Color::WHITE,
            rotation_policy: RotationPolicy::Incremental,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.viewport(), Viewport::new(800, 600, 100.0));
        assert_eq!(config.tick_interval, Duration::from_millis(10));
        assert_eq!(config.line_color, Color::new(255, 255, 255));
    }

    #[test]
    fn test_policy_override() {
        let config = ViewerConfig::from_lookup(|key| {
            (key == ROTATION_POLICY_VAR).then(|| "EULER".to_string())
        })
        .unwrap();
        assert_eq!(config.rotation_policy, RotationPolicy::Euler);

        let unset = ViewerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(unset, ViewerConfig::default());
    }

    #[test]
    fn test_bad_policy_is_rejected() {
        let err = ViewerConfig::from_lookup(|_| Some("sideways".to_string())).unwrap_err();
        assert_eq!(err, ConfigError::UnknownRotationPolicy("sideways".to_string()));
    }
}
