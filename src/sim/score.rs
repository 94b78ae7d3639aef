//! Points and ball count

use serde::{Deserialize, Serialize};

/// What happens after a ball drains
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Balls remain; serve the next one
    Reserve,
    /// That was the last ball
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBoard {
    points: u64,
    balls_spent: u32,
    max_balls: u32,
    game_over: bool,
}

impl ScoreBoard {
    pub fn new(max_balls: u32) -> Self {
        Self {
            points: 0,
            balls_spent: 0,
            max_balls,
            game_over: false,
        }
    }

    pub fn points(&self) -> u64 {
        self.points
    }

    pub fn balls_spent(&self) -> u32 {
        self.balls_spent
    }

    pub fn max_balls(&self) -> u32 {
        self.max_balls
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Number of the ball in play, starting at 1
    pub fn ball_number(&self) -> u32 {
        (self.balls_spent + 1).min(self.max_balls)
    }

    pub fn add_points(&mut self, points: u64) {
        self.points = self.points.saturating_add(points);
    }

    /// Count a drained ball, flagging game over on the last one
    pub fn record_drain(&mut self) -> DrainOutcome {
        self.balls_spent += 1;
        if self.balls_spent >= self.max_balls {
            self.game_over = true;
            DrainOutcome::GameOver
        } else {
            DrainOutcome::Reserve
        }
    }

    pub fn reset(&mut self) {
        self.points = 0;
        self.balls_spent = 0;
        self.game_over = false;
    }
}
