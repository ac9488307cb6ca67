//! Applies UI events and expired timers to the game session.

use std::time::{Duration, Instant};

use match_core::{ClickOutcome, Resolution, Session};
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::controller::{
    events::{DeferredEvent, UiEvent},
    orchestration::DeferredQueue,
};

pub struct GameController {
    session: Session,
    queue: DeferredQueue<DeferredEvent>,
    rng: StdRng,
    reveal_delay: Duration,
    status: String,
}

impl GameController {
    pub fn new(session: Session, rng: StdRng, reveal_delay: Duration) -> Self {
        let status = score_line(&session);
        Self {
            session,
            queue: DeferredQueue::new(),
            rng,
            reveal_delay,
            status,
        }
    }

    pub fn handle(&mut self, event: UiEvent, now: Instant) {
        match event {
            UiEvent::TileClicked(tile) => match self.session.click(tile) {
                Ok(ClickOutcome::FirstRevealed { .. }) => {}
                Ok(ClickOutcome::SecondRevealed { .. }) => {
                    self.status = score_line(&self.session);
                    self.queue.schedule(
                        now,
                        self.reveal_delay,
                        self.session.epoch(),
                        DeferredEvent::ResolveTurn,
                    );
                }
                Err(err) if err.is_ignored_click() => {
                    debug!(tile = tile.0, reason = %err, "click ignored");
                }
                Err(err) => warn!(tile = tile.0, error = %err, "click rejected"),
            },
            UiEvent::Restart => {
                self.session.restart(&mut self.rng);
                self.status = score_line(&self.session);
            }
        }
    }

    /// Runs every deferred event whose delay has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.queue.is_empty() {
            return;
        }
        for event in self.queue.drain_due(now, self.session.epoch()) {
            debug!(event = event.name(), "deferred event fired");
            match event {
                DeferredEvent::ResolveTurn => match self.session.resolve() {
                    Ok(Resolution::Continue { .. }) => {}
                    Ok(Resolution::GameOver(summary)) => {
                        info!(score = summary.score, turns = summary.turns, "board cleared");
                        self.status = summary.to_string();
                    }
                    Err(err) => warn!(error = %err, "deferred resolve had nothing to do"),
                },
            }
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.next_deadline()
    }

    pub fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }
}

fn score_line(session: &Session) -> String {
    format!("Score: {}", session.score())
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
