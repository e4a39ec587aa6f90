//! Cosmetic game-over pulse.
//!
//! Runs on its own frame clock, independent of the simulation tick. It is
//! armed when a session ends and stops itself on the first frame it sees a
//! phase other than game over.

use std::time::Duration;

use crate::game::Phase;

/// Frame period of the animation driver
pub const PULSE_FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Values a renderer needs to draw one pulse frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseFrame {
    pub frame: u64,
    /// Opacity of the darkening overlay, in `[0.3, 0.7]`
    pub overlay_alpha: f64,
    /// Size factor for the headline, in `[0.9, 1.1]`
    pub text_scale: f64,
}

impl PulseFrame {
    fn at(frame: u64) -> Self {
        let t = frame as f64;
        Self {
            frame,
            overlay_alpha: 0.5 + (t * 0.2).sin() * 0.2,
            text_scale: 1.0 + (t * 0.1).sin() * 0.1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameOverPulse {
    frame: u64,
    active: bool,
}

impl GameOverPulse {
    pub fn start(&mut self) {
        self.frame = 0;
        self.active = true;
    }

    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn current(&self) -> Option<PulseFrame> {
        self.active.then(|| PulseFrame::at(self.frame))
    }

    /// Step one frame, or shut down if the session is no longer over
    pub fn advance(&mut self, phase: Phase) -> Option<PulseFrame> {
        if !self.active {
            return None;
        }
        if phase != Phase::GameOver {
            self.active = false;
            return None;
        }
        self.frame += 1;
        Some(PulseFrame::at(self.frame))
    }
}
