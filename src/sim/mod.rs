//! Deterministic simulation module
//!
//! All table logic lives here. This module must stay pure and deterministic:
//! - Caller-supplied timestep, no clock reads
//! - No randomness
//! - Stable resolution order (obstacle list order)
//! - No rendering or platform dependencies

pub mod ball;
pub mod flipper;
pub mod launcher;
pub mod layout;
pub mod obstacle;
pub mod rect;
pub mod score;
pub mod sdf;
pub mod table;

pub use ball::Ball;
pub use flipper::{Flipper, FlipperSide};
pub use launcher::{ChargeLauncher, ChargeState, DebugCommand, DebugLauncher};
pub use layout::Layout;
pub use obstacle::{Obstacle, ObstacleKind, Slope};
pub use rect::Rect;
pub use score::{DrainOutcome, ScoreBoard};
pub use sdf::{circle_overlaps, reflect, sd_box, sd_segment};
pub use table::{Action, GameEvent, Table, TableSnapshot};
