//! Launchers: the plunger chute and the calibration launcher
//!
//! Both fire with the same formula (see [`launch_vector`]); they differ in
//! where the force comes from. The charge launcher accumulates it while the
//! trigger is held, the debug launcher takes it from direct tuning commands.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::rect::Rect;
use super::sdf::{circle_overlaps, sd_box};
use crate::consts::{BALL_SIZE, DEBUG_FORCE_STEP, DEBUG_MOVE_STEP, DEBUG_ROTATE_STEP};
use crate::settings::{DebugLauncherSettings, Settings};
use crate::{launch_vector, normalize_degrees};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChargeState {
    #[default]
    Idle,
    Charging,
}

/// Plunger at the bottom of the launch lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeLauncher {
    /// Chute center
    pub pos: Vec2,
    pub rect: Rect,
    /// Degrees, 0 = straight up
    pub angle: f32,
    pub charge_rate: f32,
    pub charge_cap: f32,
    /// Accumulated launch force
    pub force: f32,
    pub state: ChargeState,
    /// Ball is resting in the chute
    pub holding: bool,
    /// Serve height above the chute
    pub serve_drop: f32,
}

impl ChargeLauncher {
    pub fn new(pos: Vec2, settings: &Settings) -> Self {
        let size = Vec2::new(settings.launcher_width, settings.launcher_height);
        Self {
            pos,
            rect: Rect::from_center(pos, size),
            angle: normalize_degrees(settings.launcher_angle),
            charge_rate: settings.charge_rate,
            charge_cap: settings.charge_cap,
            force: 0.0,
            state: ChargeState::Idle,
            holding: false,
            serve_drop: settings.serve_drop,
        }
    }

    pub fn touches(&self, ball: &Ball) -> bool {
        circle_overlaps(ball.pos, ball.radius(), |p| {
            sd_box(p, self.rect.center(), self.rect.half_extents())
        })
    }

    /// Start charging
    pub fn charge(&mut self) {
        self.state = ChargeState::Charging;
    }

    /// Accumulate force while charging, never past the cap
    pub fn update(&mut self, dt: f32) {
        if self.state == ChargeState::Charging {
            self.force = (self.force + self.charge_rate * dt).min(self.charge_cap);
        }
    }

    /// Pin a ball that sits in the chute so it cannot fall through.
    ///
    /// Runs before the wall pass each tick. Returns whether the ball is held.
    pub fn hold_ball(&mut self, ball: &mut Ball) -> bool {
        self.holding = self.touches(ball);
        if self.holding {
            ball.vel.y = 0.0;
            ball.pos.x = self.pos.x;
            ball.set_bottom(self.pos.y);
        }
        self.holding
    }

    /// Fire the accumulated force. Returns the launch velocity if the ball
    /// was in the chute; the charge is spent either way.
    pub fn release(&mut self, ball: &mut Ball) -> Option<Vec2> {
        let launched = if self.holding {
            ball.vel = launch_vector(self.force, self.angle);
            ball.set_bottom(self.rect.top - 1.0);
            ball.pos.x = self.pos.x;
            self.holding = false;
            log::debug!("Launch with force {:.0}", self.force);
            Some(ball.vel)
        } else {
            log::warn!("Launcher released with no ball in the chute");
            None
        };
        self.force = 0.0;
        self.state = ChargeState::Idle;
        launched
    }

    /// Where a new ball is dropped in
    pub fn serve_point(&self) -> Vec2 {
        Vec2::new(self.pos.x, self.pos.y - self.serve_drop)
    }

    /// Put the ball at rest above the chute
    pub fn serve(&self, ball: &mut Ball) {
        ball.place(self.serve_point());
    }

    pub fn reset(&mut self) {
        self.force = 0.0;
        self.state = ChargeState::Idle;
        self.holding = false;
    }

    pub fn is_charging(&self) -> bool {
        self.state == ChargeState::Charging
    }
}

/// Discrete tuning commands for the debug launcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebugCommand {
    IncreaseGrit,
    DecreaseGrit,
    RotateLeft,
    RotateRight,
    IncreaseForce,
    DecreaseForce,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Launch,
}

/// Hand-aimed launcher for calibrating gravity, restitution and impulses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebugLauncher {
    /// Muzzle position
    pub pos: Vec2,
    /// Degrees in [0, 360)
    pub angle: f32,
    pub force: f32,
    /// Step divisor, at least 1
    pub grit: u32,
}

impl DebugLauncher {
    pub fn new(settings: &DebugLauncherSettings) -> Self {
        Self {
            pos: Vec2::new(settings.x, settings.y),
            angle: normalize_degrees(settings.angle),
            force: settings.force.max(0.0),
            grit: 1,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(BALL_SIZE))
    }

    /// Apply a tuning command. Returns true if the ball was launched.
    pub fn apply(&mut self, command: DebugCommand, ball: &mut Ball) -> bool {
        let step = self.grit.max(1) as f32;
        match command {
            DebugCommand::IncreaseGrit => self.grit += 1,
            DebugCommand::DecreaseGrit => self.grit = self.grit.saturating_sub(1).max(1),
            DebugCommand::RotateLeft => {
                self.angle = normalize_degrees(self.angle + DEBUG_ROTATE_STEP / step)
            }
            DebugCommand::RotateRight => {
                self.angle = normalize_degrees(self.angle - DEBUG_ROTATE_STEP / step)
            }
            DebugCommand::IncreaseForce => self.force += DEBUG_FORCE_STEP / step,
            DebugCommand::DecreaseForce => {
                self.force = (self.force - DEBUG_FORCE_STEP / step).max(0.0)
            }
            DebugCommand::MoveUp => self.pos.y -= DEBUG_MOVE_STEP / step,
            DebugCommand::MoveDown => self.pos.y += DEBUG_MOVE_STEP / step,
            DebugCommand::MoveLeft => self.pos.x -= DEBUG_MOVE_STEP / step,
            DebugCommand::MoveRight => self.pos.x += DEBUG_MOVE_STEP / step,
            DebugCommand::Launch => {
                self.launch(ball);
                return true;
            }
        }
        log::debug!(
            "Debug launcher: pos {:?}, angle {:.2}, force {:.1}, grit {}",
            self.pos,
            self.angle,
            self.force,
            self.grit
        );
        false
    }

    /// Put the ball at the muzzle and fire it
    pub fn launch(&self, ball: &mut Ball) {
        ball.pos = self.pos;
        ball.vel = launch_vector(self.force, self.angle);
    }
}
