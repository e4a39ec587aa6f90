//! Session lifecycle: the controller state machine, tick timing, and the
//! game-over animation clock.

pub mod controller;
pub mod pulse;
pub mod timer;

pub use controller::SessionController;
pub use pulse::{GameOverPulse, PULSE_FRAME_INTERVAL, PulseFrame};
pub use timer::{TickSchedule, TickTimer};
