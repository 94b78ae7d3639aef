//! Pinball Engine - a discrete-step 2D pinball table
//!
//! Core modules:
//! - `sim`: Ball integration, obstacle collision/response, actuators, table orchestration
//! - `settings`: Numeric tuning supplied at table construction
//! - `error`: Construction-time configuration errors

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::Settings;
pub use sim::{Action, DebugCommand, GameEvent, Table};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions (pixels)
    pub const TABLE_WIDTH: f32 = 500.0;
    pub const TABLE_HEIGHT: f32 = 700.0;
    pub const MARGIN_TOP: f32 = 100.0;
    pub const MARGIN_SIDE: f32 = 150.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 25.0;
    /// Downward pull (pixels/s²)
    pub const GRAVITY: f32 = 281.0;

    /// Fraction of speed kept on a wall bounce
    pub const RESTITUTION: f32 = 0.9;
    /// Thickness of border and lane walls
    pub const WALL_THICKNESS: f32 = 5.0;
    /// Gap left between the ball and a straight wall after unsticking
    pub const UNSTICK_MARGIN: f32 = 1.0;

    /// Flipper defaults
    pub const FLIPPER_SIZE: f32 = 150.0;
    pub const FLIPPER_THICKNESS: f32 = 24.0;
    /// Upward speed set by a flipper hit
    pub const FLIPPER_IMPULSE: f32 = 800.0;
    /// Horizontal velocity added by a flipper hit
    pub const FLIPPER_KICK: f32 = 100.0;

    /// Charge launcher defaults
    pub const CHARGE_RATE: f32 = 1000.0;
    pub const CHARGE_CAP: f32 = 3000.0;
    pub const LAUNCHER_WIDTH: f32 = 25.0;
    pub const LAUNCHER_HEIGHT: f32 = 30.0;
    /// Serve point height above the chute
    pub const SERVE_DROP: f32 = 300.0;

    /// Debug launcher step sizes (divided by grit)
    pub const DEBUG_ROTATE_STEP: f32 = 22.5;
    pub const DEBUG_FORCE_STEP: f32 = 50.0;
    pub const DEBUG_MOVE_STEP: f32 = 20.0;

    /// Scoring
    pub const WALL_HIT_POINTS: u64 = 1000;
    pub const DRAIN_BONUS: u64 = 10_000;
    pub const MAX_BALLS: u32 = 3;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Initial velocity for a launch of `force` at `angle_deg`
///
/// Angle 0 fires straight up; positive angles tilt toward -x.
#[inline]
pub fn launch_vector(force: f32, angle_deg: f32) -> Vec2 {
    let angle = angle_deg.to_radians();
    Vec2::new(-force * angle.sin(), -force * angle.cos())
}
