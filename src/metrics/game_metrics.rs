use std::time::{Duration, Instant};

/// Per-process play statistics shown in the header.
///
/// Nothing here is persisted; the best score lives only as long as the
/// process.
pub struct GameMetrics {
    started_at: Instant,
    /// Set while the clock is stopped (paused or game over)
    stopped_at: Option<Instant>,
    stopped_total: Duration,
    pub elapsed_time: Duration,
    pub best_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            started_at: Instant::now(),
            stopped_at: None,
            stopped_total: Duration::ZERO,
            elapsed_time: Duration::ZERO,
            best_score: 0,
            games_played: 0,
        }
    }

    pub fn update(&mut self) {
        let now = self.stopped_at.unwrap_or_else(Instant::now);
        self.elapsed_time = now
            .saturating_duration_since(self.started_at)
            .saturating_sub(self.stopped_total);
    }

    pub fn on_game_start(&mut self) {
        self.started_at = Instant::now();
        self.stopped_at = None;
        self.stopped_total = Duration::ZERO;
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_pause(&mut self) {
        if self.stopped_at.is_none() {
            self.stopped_at = Some(Instant::now());
        }
    }

    pub fn on_resume(&mut self) {
        if let Some(stopped_at) = self.stopped_at.take() {
            self.stopped_total += stopped_at.elapsed();
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.on_pause();
        self.update();
        self.games_played += 1;
        if final_score > self.best_score {
            self.best_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
