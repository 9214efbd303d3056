use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::Side;
use crate::params::Params;

/// Reasons a [`Config`] is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("min_ball_speed must be positive, got {0}")]
    NonPositiveMinSpeed(f32),

    #[error("max_ball_speed {max} is below min_ball_speed {min}")]
    InvertedSpeedEnvelope { min: f32, max: f32 },

    #[error("points_to_win must be at least 1")]
    NoPointsToWin,

    #[error("{name} must be positive and finite, got {value}")]
    BadDimension { name: &'static str, value: f32 },

    #[error("paddle contact line {contact} lies outside the table half-length {half_length}")]
    ContactOutsideTable { contact: f32, half_length: f32 },

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Game configuration
///
/// Immutable once a game is built; engine and opponent read it by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub max_ball_speed: f32,
    pub min_ball_speed: f32,
    pub paddle_speed: f32,
    pub points_to_win: u8,
    pub table_half_length: f32,
    pub wall_half_width: f32,
    pub paddle_x: f32,
    pub paddle_contact_x: f32,
    pub paddle_reach: f32,
    pub paddle_hitbox_half_depth: f32,
    pub paddle_deflect_half_depth: f32,
    pub ball_rest_height: f32,
    pub ball_speed_increase: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_ball_speed: Params::BALL_SPEED_MAX,
            min_ball_speed: Params::BALL_SPEED_MIN,
            paddle_speed: Params::PADDLE_SPEED,
            points_to_win: Params::POINTS_TO_WIN,
            table_half_length: Params::TABLE_HALF_LENGTH,
            wall_half_width: Params::WALL_HALF_WIDTH,
            paddle_x: Params::PADDLE_X,
            paddle_contact_x: Params::PADDLE_CONTACT_X,
            paddle_reach: Params::PADDLE_REACH,
            paddle_hitbox_half_depth: Params::PADDLE_HITBOX_HALF_DEPTH,
            paddle_deflect_half_depth: Params::PADDLE_DEFLECT_HALF_DEPTH,
            ball_rest_height: Params::BALL_REST_HEIGHT,
            ball_speed_increase: Params::BALL_SPEED_INCREASE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a partial JSON override on top of the defaults and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_ball_speed > 0.0) {
            return Err(ConfigError::NonPositiveMinSpeed(self.min_ball_speed));
        }
        if !(self.max_ball_speed >= self.min_ball_speed) {
            return Err(ConfigError::InvertedSpeedEnvelope {
                min: self.min_ball_speed,
                max: self.max_ball_speed,
            });
        }
        if self.points_to_win == 0 {
            return Err(ConfigError::NoPointsToWin);
        }

        let dimensions = [
            ("paddle_speed", self.paddle_speed),
            ("table_half_length", self.table_half_length),
            ("wall_half_width", self.wall_half_width),
            ("paddle_x", self.paddle_x),
            ("paddle_contact_x", self.paddle_contact_x),
            ("paddle_reach", self.paddle_reach),
            ("paddle_hitbox_half_depth", self.paddle_hitbox_half_depth),
            ("paddle_deflect_half_depth", self.paddle_deflect_half_depth),
            ("ball_speed_increase", self.ball_speed_increase),
        ];
        for (name, value) in dimensions {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::BadDimension { name, value });
            }
        }

        if self.paddle_contact_x >= self.table_half_length {
            return Err(ConfigError::ContactOutsideTable {
                contact: self.paddle_contact_x,
                half_length: self.table_half_length,
            });
        }
        Ok(())
    }

    /// Get X position for the paddle on the given side
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Left => -self.paddle_x,
            Side::Right => self.paddle_x,
        }
    }

    /// Clamp paddle Z to the reachable band
    pub fn clamp_paddle_z(&self, z: f32) -> f32 {
        z.clamp(-self.paddle_reach, self.paddle_reach)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.min_ball_speed, 0.1);
        assert_eq!(config.max_ball_speed, 0.15);
        assert_eq!(config.points_to_win, 3);
    }

    #[test]
    fn test_config_paddle_x() {
        let config = Config::new();
        assert_eq!(config.paddle_x(Side::Left), -4.9, "Left paddle X position");
        assert_eq!(config.paddle_x(Side::Right), 4.9, "Right paddle X position");
    }

    #[test]
    fn test_config_clamp_paddle_z() {
        let config = Config::new();
        assert_eq!(config.clamp_paddle_z(-10.0), -config.paddle_reach);
        assert_eq!(config.clamp_paddle_z(10.0), config.paddle_reach);
        assert_eq!(config.clamp_paddle_z(1.2), 1.2);
    }

    #[test]
    fn test_from_json_overrides_only_given_fields() {
        let config = Config::from_json(r#"{ "points_to_win": 11 }"#).unwrap();
        assert_eq!(config.points_to_win, 11);
        assert_eq!(config.max_ball_speed, Params::BALL_SPEED_MAX);
    }

    #[test]
    fn test_inverted_envelope_rejected() {
        let result = Config::from_json(r#"{ "min_ball_speed": 0.2, "max_ball_speed": 0.1 }"#);
        assert!(matches!(
            result,
            Err(ConfigError::InvertedSpeedEnvelope { .. })
        ));
    }

    #[test]
    fn test_zero_points_rejected() {
        let config = Config {
            points_to_win: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::NoPointsToWin)));
    }

    #[test]
    fn test_contact_line_must_be_inside_table() {
        let config = Config {
            paddle_contact_x: 5.5,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ContactOutsideTable { .. })
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            Config::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
