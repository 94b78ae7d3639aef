//! Stock table layout
//!
//! Everything is placed relative to the playfield guides (top, right,
//! bottom, left edges of the table area), so resizing the table in the
//! settings moves the pieces with it.

use glam::Vec2;

use super::flipper::{Flipper, FlipperSide};
use super::launcher::{ChargeLauncher, DebugLauncher};
use super::obstacle::Obstacle;
use crate::error::ConfigError;
use crate::settings::Settings;

const RAIL_THICKNESS: f32 = 1.0;

/// All pieces of a freshly built table
#[derive(Debug, Clone)]
pub struct Layout {
    pub obstacles: Vec<Obstacle>,
    pub left_flipper: Flipper,
    pub right_flipper: Flipper,
    pub launcher: ChargeLauncher,
    pub debug_launcher: Option<DebugLauncher>,
}

impl Layout {
    pub fn build(settings: &Settings) -> Result<Self, ConfigError> {
        settings.validate()?;

        let mut obstacles = Vec::new();
        launch_lane(settings, &mut obstacles);
        exit_lanes(settings, &mut obstacles);
        borders(settings, &mut obstacles);
        rails(settings, &mut obstacles);

        let obstacles = obstacles
            .into_iter()
            .map(|o| o.with_restitution(settings.restitution))
            .collect::<Result<Vec<_>, _>>()?;

        let (_, r, b, l) = guides(settings);
        let left_flipper = Flipper::new(FlipperSide::Left, l + 90.0, b - 148.0, settings);
        let right_flipper = Flipper::new(FlipperSide::Right, r - 276.0, b - 148.0, settings);
        let launcher = ChargeLauncher::new(Vec2::new(r - 17.0, b - 140.0), settings);
        let debug_launcher = settings.debug_launcher.as_ref().map(DebugLauncher::new);

        log::debug!(
            "Built table: {} obstacles, debug launcher {}",
            obstacles.len(),
            if debug_launcher.is_some() { "on" } else { "off" }
        );

        Ok(Self {
            obstacles,
            left_flipper,
            right_flipper,
            launcher,
            debug_launcher,
        })
    }
}

/// (top, right, bottom, left)
fn guides(s: &Settings) -> (f32, f32, f32, f32) {
    (s.top_guide(), s.right_guide(), s.bottom_guide(), s.left_guide())
}

/// Lane wall separating the plunger chute, plus the deflector at its top
fn launch_lane(s: &Settings, out: &mut Vec<Obstacle>) {
    let (t, r, _, _) = guides(s);
    let w = s.wall_thickness;
    out.push(Obstacle::vertical_wall(r - 40.0, t + 40.0, w, s.table_height - 140.0));
    out.push(Obstacle::diagonal_down(r - 13.0, t, w, 20.0));
}

/// Short slopes feeding the flippers
fn exit_lanes(s: &Settings, out: &mut Vec<Obstacle>) {
    let (_, r, b, l) = guides(s);
    let w = s.wall_thickness;
    out.push(Obstacle::diagonal_down(l + 40.0, b - 198.0, w, 70.0));
    out.push(Obstacle::diagonal_up(r - 76.0, b - 197.0, w, 70.0));
}

fn borders(s: &Settings, out: &mut Vec<Obstacle>) {
    let (t, r, b, l) = guides(s);
    let w = s.wall_thickness;
    out.push(Obstacle::horizontal_wall(l, t, w, s.table_width));
    out.push(Obstacle::vertical_wall(l, t, w, s.table_height));
    out.push(Obstacle::vertical_wall(r, t, w, s.table_height));
    out.push(Obstacle::diagonal_down(l, b - 179.0, w, 100.0));
    out.push(Obstacle::diagonal_up(r - 36.0, b - 177.0, w, 100.0));
}

/// Guides steering the ball from the outlanes toward the flippers
fn rails(s: &Settings, out: &mut Vec<Obstacle>) {
    let (_, r, b, l) = guides(s);
    let len = s.table_width / 2.0;
    out.push(Obstacle::rail_down(l + 34.0, b - 172.0, RAIL_THICKNESS, len));
    out.push(Obstacle::rail_up(r - 70.0, b - 172.0, RAIL_THICKNESS, len));
}
