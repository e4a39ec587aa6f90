//! Food placement
//!
//! Draws uniform random cells and rejects occupied ones. The number of draws
//! is bounded; past the bound the free cells are enumerated and one is picked
//! uniformly, so a nearly full grid still terminates and a full one errors.

use rand::Rng;
use rand::seq::IteratorRandom;

use super::error::GameError;
use super::state::Position;

/// Pick a cell in `[0, width) x [0, height)` that is not in `occupied`
pub fn place_food<R: Rng>(
    rng: &mut R,
    width: usize,
    height: usize,
    occupied: &[Position],
    max_attempts: usize,
) -> Result<Position, GameError> {
    if width == 0 || height == 0 {
        return Err(GameError::GridFull { width, height });
    }

    for _ in 0..max_attempts {
        let candidate = Position::new(
            rng.gen_range(0..width) as i32,
            rng.gen_range(0..height) as i32,
        );
        if !occupied.contains(&candidate) {
            return Ok(candidate);
        }
    }

    tracing::warn!(
        attempts = max_attempts,
        occupied = occupied.len(),
        "food sampling exhausted, scanning for free cells"
    );

    (0..height as i32)
        .flat_map(|y| (0..width as i32).map(move |x| Position::new(x, y)))
        .filter(|pos| !occupied.contains(pos))
        .choose(rng)
        .ok_or(GameError::GridFull { width, height })
}
