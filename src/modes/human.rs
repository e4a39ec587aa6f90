use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{Command, GameConfig, Phase};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::session::{PULSE_FRAME_INTERVAL, SessionController, TickTimer};

/// Keyboard-driven play in the terminal.
///
/// One `select!` loop interleaves key events, the session's tick timer, and
/// the game-over animation clock. Every handler runs to completion before the
/// next event is taken.
pub struct HumanMode {
    controller: SessionController,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let controller =
            SessionController::new(config).context("Failed to start the first session")?;

        Ok(Self {
            controller,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = TickTimer::new();
        tick_timer.sync(self.controller.schedule());

        let mut pulse_timer = interval(PULSE_FRAME_INTERVAL);
        pulse_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.draw(terminal)?;

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                    self.draw(terminal)?;
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                    self.draw(terminal)?;
                }

                // Game-over pulse, only polled while it is running
                _ = pulse_timer.tick(), if self.controller.pulse().is_active() => {
                    self.controller.advance_animation();
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            // Pausing, speed-ups, game over and restarts all show up as a new schedule.
            tick_timer.sync(self.controller.schedule());

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Command(command) => self.apply_command(command)?,
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn apply_command(&mut self, command: Command) -> Result<()> {
        let phase = self.controller.phase();
        let sessions = self.controller.sessions_started();

        self.controller
            .handle_command(command)
            .context("Failed to start a new session")?;

        self.track(phase, sessions);
        Ok(())
    }

    fn update_game(&mut self) {
        let phase = self.controller.phase();
        let sessions = self.controller.sessions_started();

        self.controller.tick();

        self.track(phase, sessions);
    }

    /// Keep the play clock and game counters in step with phase changes
    fn track(&mut self, before: Phase, sessions_before: u64) {
        if self.controller.sessions_started() != sessions_before {
            self.metrics.on_game_start();
            return;
        }

        match (before, self.controller.phase()) {
            (Phase::Running, Phase::Paused) => self.metrics.on_pause(),
            (Phase::Paused, Phase::Running) => self.metrics.on_resume(),
            (Phase::Running, Phase::GameOver) => {
                self.metrics.on_game_over(self.controller.state().score)
            }
            _ => {}
        }
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        let snapshot = self.controller.snapshot();
        let pulse = self.controller.pulse().current();
        terminal
            .draw(|frame| {
                self.renderer.render(frame, &snapshot, &self.metrics, pulse);
            })
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
