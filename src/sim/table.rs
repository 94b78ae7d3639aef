//! Table orchestration
//!
//! The table owns every piece and advances them in a fixed order each tick:
//! ball integration, chute hold, wall collisions, rail guidance, flipper
//! contact tracking, drain check. Input arrives separately as discrete
//! actions, one per key edge.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::flipper::{Flipper, FlipperSide};
use super::launcher::{ChargeLauncher, DebugCommand, DebugLauncher};
use super::layout::Layout;
use super::obstacle::Obstacle;
use super::score::{DrainOutcome, ScoreBoard};
use crate::error::ConfigError;
use crate::settings::Settings;

/// Player commands, delivered once per press or release edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    EngageFlipper(FlipperSide),
    DisengageFlipper(FlipperSide),
    ChargeLauncher,
    ReleaseLauncher,
    Restart,
    /// Calibration launcher command (ignored when the table has none)
    Debug(DebugCommand),
}

/// Things the host may want to react to (sounds, HUD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    NewGame,
    WallHit,
    FlipperMoved { side: FlipperSide },
    FlipperImpulse { side: FlipperSide },
    Launch,
    Drain,
    GameOver,
}

/// Read-only view for renderers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    pub ball_pos: Vec2,
    pub ball_vel: Vec2,
    pub score: u64,
    pub ball_number: u32,
    pub game_over: bool,
    pub left_flipper_engaged: bool,
    pub right_flipper_engaged: bool,
    pub launcher_force: f32,
    pub launcher_charging: bool,
    pub ball_held: bool,
}

pub struct Table {
    settings: Settings,
    ball: Ball,
    obstacles: Vec<Obstacle>,
    left_flipper: Flipper,
    right_flipper: Flipper,
    launcher: ChargeLauncher,
    debug_launcher: Option<DebugLauncher>,
    score: ScoreBoard,
    events: Vec<GameEvent>,
    /// Scratch list of obstacles hit this tick
    contacts: Vec<usize>,
}

impl Table {
    /// Build the stock table and serve the first ball
    pub fn new(settings: Settings) -> Result<Self, ConfigError> {
        let layout = Layout::build(&settings)?;
        let mut ball = Ball::new(Vec2::ZERO, settings.ball_size, settings.gravity);
        layout.launcher.serve(&mut ball);

        let table = Self {
            score: ScoreBoard::new(settings.max_balls),
            ball,
            obstacles: layout.obstacles,
            left_flipper: layout.left_flipper,
            right_flipper: layout.right_flipper,
            launcher: layout.launcher,
            debug_launcher: layout.debug_launcher,
            events: vec![GameEvent::NewGame],
            contacts: Vec::new(),
            settings,
        };
        log::info!("New game, {} balls", table.settings.max_balls);
        Ok(table)
    }

    /// Advance one tick of `dt` seconds. Does nothing after game over.
    pub fn update(&mut self, dt: f32) {
        if self.score.is_game_over() {
            return;
        }

        self.ball.integrate(dt);

        self.launcher.update(dt);
        self.launcher.hold_ball(&mut self.ball);

        self.resolve_walls();
        self.resolve_rails();

        self.left_flipper.track_contact(&self.ball);
        self.right_flipper.track_contact(&self.ball);

        self.check_drain();

        debug_assert!(
            self.score.is_game_over() || self.score.balls_spent() < self.score.max_balls(),
            "spent balls reached the limit without game over"
        );
    }

    /// Every wall touching the ball at the start of the pass is resolved,
    /// one after another
    fn resolve_walls(&mut self) {
        self.collect_contacts(|o| o.is_wall());
        for &idx in &self.contacts {
            self.obstacles[idx].resolve(&mut self.ball);
            self.score.add_points(self.settings.wall_hit_points);
            self.events.push(GameEvent::WallHit);
        }
    }

    fn resolve_rails(&mut self) {
        self.collect_contacts(|o| o.is_rail());
        for &idx in &self.contacts {
            self.obstacles[idx].resolve(&mut self.ball);
        }
    }

    fn collect_contacts(&mut self, filter: impl Fn(&Obstacle) -> bool) {
        self.contacts.clear();
        let ball = &self.ball;
        self.contacts.extend(
            self.obstacles
                .iter()
                .enumerate()
                .filter(|(_, o)| filter(o) && o.detects_collision(ball))
                .map(|(i, _)| i),
        );
    }

    fn check_drain(&mut self) {
        if self.ball.top() <= self.settings.bottom_guide() {
            return;
        }

        self.score.add_points(self.settings.drain_bonus);
        self.events.push(GameEvent::Drain);

        match self.score.record_drain() {
            DrainOutcome::Reserve => {
                log::info!(
                    "Ball drained, serving ball {} of {}",
                    self.score.ball_number(),
                    self.score.max_balls()
                );
                self.launcher.serve(&mut self.ball);
            }
            DrainOutcome::GameOver => {
                log::info!("Game over, final score {}", self.score.points());
                self.events.push(GameEvent::GameOver);
            }
        }
    }

    /// Apply one input edge
    pub fn handle_action(&mut self, action: Action) {
        if self.score.is_game_over() && action != Action::Restart {
            log::debug!("Ignoring {:?} after game over", action);
            return;
        }

        match action {
            Action::EngageFlipper(side) => {
                let flipper = match side {
                    FlipperSide::Left => &mut self.left_flipper,
                    FlipperSide::Right => &mut self.right_flipper,
                };
                if flipper.engage(&mut self.ball) {
                    self.events.push(GameEvent::FlipperImpulse { side });
                }
                self.events.push(GameEvent::FlipperMoved { side });
            }
            Action::DisengageFlipper(side) => self.flipper_mut(side).disengage(),
            Action::ChargeLauncher => self.launcher.charge(),
            Action::ReleaseLauncher => {
                if self.launcher.release(&mut self.ball).is_some() {
                    self.events.push(GameEvent::Launch);
                }
            }
            Action::Restart => self.restart(),
            Action::Debug(command) => match self.debug_launcher.as_mut() {
                Some(debug) => {
                    if debug.apply(command, &mut self.ball) {
                        self.events.push(GameEvent::Launch);
                    }
                }
                None => log::warn!("Debug command {:?} with no debug launcher", command),
            },
        }
    }

    /// Reset score, ball count and ball placement together
    pub fn restart(&mut self) {
        self.score.reset();
        self.launcher.reset();
        self.left_flipper.reset();
        self.right_flipper.reset();
        self.launcher.serve(&mut self.ball);
        self.events.push(GameEvent::NewGame);
        log::info!("New game, {} balls", self.settings.max_balls);
    }

    /// Take the events queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            ball_pos: self.ball.pos,
            ball_vel: self.ball.vel,
            score: self.score.points(),
            ball_number: self.score.ball_number(),
            game_over: self.score.is_game_over(),
            left_flipper_engaged: self.left_flipper.engaged,
            right_flipper_engaged: self.right_flipper.engaged,
            launcher_force: self.launcher.force,
            launcher_charging: self.launcher.is_charging(),
            ball_held: self.launcher.holding,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Direct ball access for calibration and tests
    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Obstacles may only be moved while calibrating
    pub fn obstacles_mut(&mut self) -> &mut [Obstacle] {
        &mut self.obstacles
    }

    pub fn flipper(&self, side: FlipperSide) -> &Flipper {
        match side {
            FlipperSide::Left => &self.left_flipper,
            FlipperSide::Right => &self.right_flipper,
        }
    }

    fn flipper_mut(&mut self, side: FlipperSide) -> &mut Flipper {
        match side {
            FlipperSide::Left => &mut self.left_flipper,
            FlipperSide::Right => &mut self.right_flipper,
        }
    }

    pub fn launcher(&self) -> &ChargeLauncher {
        &self.launcher
    }

    pub fn debug_launcher(&self) -> Option<&DebugLauncher> {
        self.debug_launcher.as_ref()
    }

    pub fn score(&self) -> &ScoreBoard {
        &self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.score.is_game_over()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::obstacle::ObstacleKind;

    fn table() -> Table {
        Table::new(Settings::default()).unwrap()
    }

    /// Tick until the served ball settles in the chute
    fn settle_in_chute(table: &mut Table) {
        for _ in 0..600 {
            table.update(SIM_DT);
            if table.launcher().holding {
                return;
            }
        }
        panic!("ball never reached the chute");
    }

    fn drain(table: &mut Table) {
        table.ball_mut().place(Vec2::new(400.0, 900.0));
        table.update(SIM_DT);
    }

    #[test]
    fn test_new_table_serves_ball() {
        let mut t = table();
        assert_eq!(t.ball().pos, Vec2::new(633.0, 360.0));
        assert_eq!(t.ball().vel, Vec2::ZERO);
        assert_eq!(t.drain_events(), vec![GameEvent::NewGame]);
        assert!(t.drain_events().is_empty());
    }

    #[test]
    fn test_ball_falls_into_chute_and_waits() {
        let mut t = table();
        settle_in_chute(&mut t);
        let resting = t.ball().pos;
        assert_eq!(t.ball().bottom(), 660.0);
        for _ in 0..240 {
            t.update(SIM_DT);
        }
        assert_eq!(t.ball().pos, resting);
        assert_eq!(t.score().points(), 0);
    }

    #[test]
    fn test_charge_and_launch() {
        let mut t = table();
        settle_in_chute(&mut t);
        t.drain_events();

        t.handle_action(Action::ChargeLauncher);
        for _ in 0..120 {
            t.update(SIM_DT);
        }
        assert!(t.snapshot().launcher_charging);
        let force = t.launcher().force;
        assert!((force - 1000.0).abs() < 1.0);

        t.handle_action(Action::ReleaseLauncher);
        assert!((t.ball().vel.y + force).abs() < 1e-3);
        assert_eq!(t.launcher().force, 0.0);
        assert_eq!(t.drain_events(), vec![GameEvent::Launch]);

        t.update(SIM_DT);
        assert!(t.ball().pos.y < 640.0);
        assert!(!t.launcher().holding);
    }

    #[test]
    fn test_release_in_midair_does_not_launch() {
        let mut t = table();
        t.drain_events();
        t.handle_action(Action::ChargeLauncher);
        t.handle_action(Action::ReleaseLauncher);
        assert_eq!(t.ball().vel, Vec2::ZERO);
        assert!(t.drain_events().is_empty());
    }

    #[test]
    fn test_wall_hit_scores_and_bounces() {
        let mut t = table();
        t.drain_events();
        // Against the left border, moving left
        t.ball_mut().pos = Vec2::new(168.0, 300.0);
        t.ball_mut().vel = Vec2::new(-600.0, 0.0);
        t.update(SIM_DT);
        assert!(t.ball().vel.x > 0.0);
        assert!(t.ball().left() > 155.0);
        assert_eq!(t.score().points(), 1000);
        assert_eq!(t.drain_events(), vec![GameEvent::WallHit]);
    }

    #[test]
    fn test_corner_contacts_resolve_in_one_tick() {
        let mut t = table();
        t.drain_events();
        // Top-left corner: top border and left border at once
        t.ball_mut().pos = Vec2::new(165.0, 115.0);
        t.ball_mut().vel = Vec2::new(-300.0, -300.0);
        t.update(SIM_DT);
        let events = t.drain_events();
        assert_eq!(events.iter().filter(|e| **e == GameEvent::WallHit).count(), 2);
        assert_eq!(t.score().points(), 2000);
        assert!(t.ball().vel.x > 0.0 && t.ball().vel.y > 0.0);
    }

    #[test]
    fn test_drain_awards_bonus_and_reserves() {
        let mut t = table();
        t.drain_events();
        drain(&mut t);
        assert_eq!(t.score().points(), 10_000);
        assert_eq!(t.score().balls_spent(), 1);
        assert_eq!(t.ball().pos, Vec2::new(633.0, 360.0));
        assert_eq!(t.drain_events(), vec![GameEvent::Drain]);
        assert_eq!(t.snapshot().ball_number, 2);
    }

    #[test]
    fn test_three_drains_then_restart() {
        let mut t = table();
        for _ in 0..3 {
            drain(&mut t);
        }
        assert!(t.is_game_over());
        assert_eq!(t.score().balls_spent(), 3);
        let events = t.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::GameOver));

        // Physics is frozen
        let frozen = t.ball().clone();
        t.update(SIM_DT);
        assert_eq!(t.ball(), &frozen);

        // Inputs other than restart are ignored
        t.handle_action(Action::EngageFlipper(FlipperSide::Left));
        assert!(!t.flipper(FlipperSide::Left).engaged);

        t.handle_action(Action::Restart);
        assert!(!t.is_game_over());
        assert_eq!(t.score().points(), 0);
        assert_eq!(t.score().balls_spent(), 0);
        assert_eq!(t.ball().pos, Vec2::new(633.0, 360.0));
        assert_eq!(t.ball().vel, Vec2::ZERO);
        assert_eq!(t.drain_events(), vec![GameEvent::NewGame]);
    }

    #[test]
    fn test_flipper_action_hits_ball_once() {
        let mut t = table();
        let (pivot, tip) = t.flipper(FlipperSide::Left).bar();
        t.ball_mut().place((pivot + tip) / 2.0);
        t.drain_events();

        t.handle_action(Action::EngageFlipper(FlipperSide::Left));
        assert_eq!(t.ball().vel.y, -800.0);
        assert_eq!(
            t.drain_events(),
            vec![
                GameEvent::FlipperImpulse {
                    side: FlipperSide::Left
                },
                GameEvent::FlipperMoved {
                    side: FlipperSide::Left
                },
            ]
        );

        // Repeated press while still in contact
        t.ball_mut().vel = Vec2::ZERO;
        t.handle_action(Action::DisengageFlipper(FlipperSide::Left));
        t.handle_action(Action::EngageFlipper(FlipperSide::Left));
        assert_eq!(t.ball().vel, Vec2::ZERO);
        assert!(t.flipper(FlipperSide::Left).engaged);
    }

    #[test]
    fn test_flipper_rearms_after_ball_leaves() {
        let mut t = table();
        let (pivot, tip) = t.flipper(FlipperSide::Right).bar();
        let on_bar = (pivot + tip) / 2.0;
        t.ball_mut().place(on_bar);
        t.handle_action(Action::EngageFlipper(FlipperSide::Right));
        t.handle_action(Action::DisengageFlipper(FlipperSide::Right));

        // Ball flies off; the tick notices it left the bar
        t.ball_mut().place(Vec2::new(400.0, 300.0));
        t.update(SIM_DT);
        assert!(!t.flipper(FlipperSide::Right).is_latched());

        t.ball_mut().place(on_bar);
        t.handle_action(Action::EngageFlipper(FlipperSide::Right));
        assert_eq!(t.ball().vel.y, -800.0);
    }

    #[test]
    fn test_debug_commands_need_debug_launcher() {
        let mut t = table();
        let before = t.ball().clone();
        t.handle_action(Action::Debug(DebugCommand::Launch));
        assert_eq!(t.ball(), &before);

        let mut t = Table::new(Settings::with_debug_launcher()).unwrap();
        t.drain_events();
        t.handle_action(Action::Debug(DebugCommand::IncreaseForce));
        t.handle_action(Action::Debug(DebugCommand::Launch));
        assert_eq!(t.ball().pos, Vec2::new(440.0, 120.0));
        assert!((t.ball().vel.y + 650.0).abs() < 1e-3);
        assert_eq!(t.drain_events(), vec![GameEvent::Launch]);
        assert_eq!(t.debug_launcher().unwrap().force, 650.0);
    }

    #[test]
    fn test_obstacles_can_be_moved_for_calibration() {
        let mut t = table();
        let roof = t
            .obstacles()
            .iter()
            .position(|o| o.kind == ObstacleKind::HorizontalWall)
            .unwrap();
        t.obstacles_mut()[roof].translate(Vec2::new(0.0, 50.0));
        assert_eq!(t.obstacles()[roof].rect.top, 150.0);

        // The lowered roof now turns a rising ball back
        t.drain_events();
        t.ball_mut().pos = Vec2::new(400.0, 170.0);
        t.ball_mut().vel = Vec2::new(0.0, -600.0);
        t.update(SIM_DT);
        assert_eq!(t.drain_events(), vec![GameEvent::WallHit]);
        assert_eq!(t.ball().top(), 156.0);
        assert!(t.ball().vel.y > 0.0);
    }

    #[test]
    fn test_new_rejects_bad_settings() {
        let settings = Settings {
            restitution: -0.5,
            ..Settings::default()
        };
        assert!(Table::new(settings).is_err());
    }

    #[test]
    fn test_snapshot_serializes() {
        let t = table();
        let json = serde_json::to_string(&t.snapshot()).unwrap();
        let back: TableSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t.snapshot());
    }
}
