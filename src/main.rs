//! Pinball Engine entry point
//!
//! Headless driver: plays a scripted session on the stock table with a
//! fixed-timestep loop and logs what happens. Pass a settings JSON path as
//! the first argument to override the default tuning.

use std::process::ExitCode;

use pinball_engine::consts::{MAX_SUBSTEPS, SIM_DT};
use pinball_engine::sim::FlipperSide;
use pinball_engine::{Action, GameEvent, Settings, Table};

/// Host frame time (60 Hz display)
const FRAME_DT: f32 = 1.0 / 60.0;
/// Give up after ten minutes of table time
const MAX_FRAMES: u32 = 60 * 600;
/// How long the plunger is held back
const CHARGE_FRAMES: u32 = 90;
/// Flippers fire every this many frames, alternating sides
const FLIPPER_PERIOD: u32 = 45;

/// Driver state around the table
struct Game {
    table: Table,
    accumulator: f32,
    frame: u32,
    charge_started: Option<u32>,
    flipper_up: Option<FlipperSide>,
    wall_hits: u32,
}

impl Game {
    fn new(table: Table) -> Self {
        Self {
            table,
            accumulator: 0.0,
            frame: 0,
            charge_started: None,
            flipper_up: None,
            wall_hits: 0,
        }
    }

    /// Run simulation ticks for one host frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.table.update(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    /// Scripted player: pull the plunger when the ball waits in the chute,
    /// tap the flippers otherwise
    fn play(&mut self) {
        let frame = self.frame;

        match self.charge_started {
            None if self.table.launcher().holding => {
                self.table.handle_action(Action::ChargeLauncher);
                self.charge_started = Some(frame);
            }
            Some(start) if frame - start >= CHARGE_FRAMES => {
                self.table.handle_action(Action::ReleaseLauncher);
                self.charge_started = None;
            }
            _ => {}
        }

        if let Some(side) = self.flipper_up.take() {
            self.table.handle_action(Action::DisengageFlipper(side));
        } else if frame % FLIPPER_PERIOD == 0 {
            let side = if (frame / FLIPPER_PERIOD) % 2 == 0 {
                FlipperSide::Left
            } else {
                FlipperSide::Right
            };
            self.table.handle_action(Action::EngageFlipper(side));
            self.flipper_up = Some(side);
        }
    }

    fn report_events(&mut self) {
        for event in self.table.drain_events() {
            match event {
                GameEvent::WallHit => self.wall_hits += 1,
                GameEvent::FlipperMoved { .. } => {}
                other => log::info!("[frame {}] {:?}", self.frame, other),
            }
        }
    }

    fn run(&mut self) {
        while self.frame < MAX_FRAMES && !self.table.is_game_over() {
            self.play();
            self.update(FRAME_DT);
            self.report_events();
            self.frame += 1;
        }

        if !self.table.is_game_over() {
            log::warn!("Session stopped after {} frames without game over", self.frame);
        }
        log::info!(
            "Session over after {} frames: score {}, {} wall hits",
            self.frame,
            self.table.score().points(),
            self.wall_hits
        );
    }
}

fn load_settings() -> Result<Settings, pinball_engine::ConfigError> {
    match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Ok(Settings::default()),
    }
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Pinball Engine (headless) starting...");

    let table = match load_settings().and_then(Table::new) {
        Ok(table) => table,
        Err(e) => {
            log::error!("Bad configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut game = Game::new(table);
    game.report_events();
    game.run();

    match serde_json::to_string_pretty(&game.table.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Could not serialize snapshot: {}", e);
            return ExitCode::FAILURE;
        }
    }
    ExitCode::SUCCESS
}
