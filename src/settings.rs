//! Table tuning
//!
//! Every physics constant the engine uses is supplied here at table
//! construction. Defaults reproduce the stock table; a JSON file can
//! override any subset of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, check_positive, check_restitution};

/// Placement and starting tunables for the calibration launcher
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DebugLauncherSettings {
    pub x: f32,
    pub y: f32,
    /// Degrees, 0 = straight up
    pub angle: f32,
    pub force: f32,
}

impl Default for DebugLauncherSettings {
    fn default() -> Self {
        Self {
            x: 440.0,
            y: 120.0,
            angle: 0.0,
            force: 600.0,
        }
    }
}

/// Physics and layout settings for one table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Ball ===
    /// Downward acceleration (pixels/s²)
    pub gravity: f32,
    /// Ball diameter (pixels)
    pub ball_size: f32,

    // === Walls ===
    /// Fraction of speed kept on a wall bounce, in [0, 1]
    pub restitution: f32,
    pub wall_thickness: f32,

    // === Playfield guides ===
    pub table_width: f32,
    pub table_height: f32,
    pub margin_top: f32,
    pub margin_side: f32,

    // === Flippers ===
    pub flipper_size: f32,
    pub flipper_thickness: f32,
    /// Upward speed given to the ball on a flipper hit
    pub flipper_impulse: f32,
    /// Sideways speed added on a flipper hit
    pub flipper_kick: f32,

    // === Charge launcher ===
    /// Force gained per second while charging
    pub charge_rate: f32,
    /// Maximum accumulated force
    pub charge_cap: f32,
    /// Launch angle (degrees)
    pub launcher_angle: f32,
    pub launcher_width: f32,
    pub launcher_height: f32,
    /// Height above the chute where a new ball is served
    pub serve_drop: f32,

    // === Scoring ===
    pub wall_hit_points: u64,
    pub drain_bonus: u64,
    /// Balls per game
    pub max_balls: u32,

    /// Calibration launcher, absent in normal play
    pub debug_launcher: Option<DebugLauncherSettings>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            ball_size: BALL_SIZE,

            restitution: RESTITUTION,
            wall_thickness: WALL_THICKNESS,

            table_width: TABLE_WIDTH,
            table_height: TABLE_HEIGHT,
            margin_top: MARGIN_TOP,
            margin_side: MARGIN_SIDE,

            flipper_size: FLIPPER_SIZE,
            flipper_thickness: FLIPPER_THICKNESS,
            flipper_impulse: FLIPPER_IMPULSE,
            flipper_kick: FLIPPER_KICK,

            charge_rate: CHARGE_RATE,
            charge_cap: CHARGE_CAP,
            launcher_angle: 0.0,
            launcher_width: LAUNCHER_WIDTH,
            launcher_height: LAUNCHER_HEIGHT,
            serve_drop: SERVE_DROP,

            wall_hit_points: WALL_HIT_POINTS,
            drain_bonus: DRAIN_BONUS,
            max_balls: MAX_BALLS,

            debug_launcher: None,
        }
    }
}

impl Settings {
    /// Default table with the calibration launcher enabled
    pub fn with_debug_launcher() -> Self {
        Self {
            debug_launcher: Some(DebugLauncherSettings::default()),
            ..Self::default()
        }
    }

    /// Parse settings from JSON (missing fields fall back to defaults)
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded table settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_restitution(self.restitution)?;
        check_positive("gravity", self.gravity)?;
        check_positive("ball_size", self.ball_size)?;
        check_positive("wall_thickness", self.wall_thickness)?;
        check_positive("table_width", self.table_width)?;
        check_positive("table_height", self.table_height)?;
        check_positive("flipper_size", self.flipper_size)?;
        check_positive("flipper_thickness", self.flipper_thickness)?;
        check_positive("flipper_impulse", self.flipper_impulse)?;
        check_positive("charge_rate", self.charge_rate)?;
        check_positive("charge_cap", self.charge_cap)?;
        check_positive("launcher_width", self.launcher_width)?;
        check_positive("launcher_height", self.launcher_height)?;
        if self.max_balls == 0 {
            return Err(ConfigError::InvalidBallCount(self.max_balls));
        }
        Ok(())
    }

    // Playfield guides, derived from the margins

    pub fn top_guide(&self) -> f32 {
        self.margin_top
    }

    pub fn bottom_guide(&self) -> f32 {
        self.table_height + self.margin_top
    }

    pub fn left_guide(&self) -> f32 {
        self.margin_side
    }

    pub fn right_guide(&self) -> f32 {
        self.table_width + self.margin_side
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
        assert!(Settings::with_debug_launcher().validate().is_ok());
    }

    #[test]
    fn test_guides() {
        let s = Settings::default();
        assert_eq!(s.top_guide(), 100.0);
        assert_eq!(s.bottom_guide(), 800.0);
        assert_eq!(s.left_guide(), 150.0);
        assert_eq!(s.right_guide(), 650.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "gravity": 300.0, "max_balls": 5 }"#).unwrap();
        assert_eq!(s.gravity, 300.0);
        assert_eq!(s.max_balls, 5);
        assert_eq!(s.restitution, RESTITUTION);
        assert!(s.debug_launcher.is_none());
    }

    #[test]
    fn test_json_rejects_bad_restitution() {
        let err = Settings::from_json(r#"{ "restitution": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::RestitutionOutOfRange(_)));
    }

    #[test]
    fn test_json_rejects_zero_balls() {
        let err = Settings::from_json(r#"{ "max_balls": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBallCount(0)));
    }

    #[test]
    fn test_json_parse_error() {
        let err = Settings::from_json("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/nonexistent/table.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_roundtrip_debug_launcher() {
        let s = Settings::with_debug_launcher();
        let json = serde_json::to_string(&s).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), s);
    }
}
