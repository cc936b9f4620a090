//! Move-prior models for the tree search.
//!
//! A predictor maps an encoded board to a 256-wide score vector, one entry
//! per move byte. Training splits positions into stages by how many walls
//! are on the board, one model per stage per side, so the registry holds
//! 21 predictors for each player and picks by placed-wall count. The
//! search runs fine without any registry; it then falls back to a
//! shortest-path prior.

use anyhow::{ensure, Result};

use crate::board::Player;
use crate::constants::MODEL_STAGES;

/// Length of [`BoardEncoding`]: pawns, wall counts, goal distances,
/// mobility, then the 128-slot occupancy map.
pub const ENCODING_LEN: usize = 136;

/// Fixed-width feature vector produced by [`crate::board::Board::encode`].
pub type BoardEncoding = [u8; ENCODING_LEN];

/// Scores an encoded position, one entry per move byte. Outputs are
/// relative weights, not probabilities; the search scales them itself.
pub trait MovePredictor {
    fn predict(&self, encoding: &BoardEncoding) -> [f32; 256];
}

/// Immutable bundle of per-stage predictors, 21 per side, built once and
/// handed to the search.
pub struct ModelRegistry {
    white: Vec<Box<dyn MovePredictor>>,
    black: Vec<Box<dyn MovePredictor>>,
}

impl ModelRegistry {
    /// Build a registry from one predictor per stage per side. Fails
    /// unless both sides supply exactly [`MODEL_STAGES`] predictors.
    pub fn new(
        white: Vec<Box<dyn MovePredictor>>,
        black: Vec<Box<dyn MovePredictor>>,
    ) -> Result<Self> {
        ensure!(
            white.len() == MODEL_STAGES,
            "expected {MODEL_STAGES} white-side models, got {}",
            white.len()
        );
        ensure!(
            black.len() == MODEL_STAGES,
            "expected {MODEL_STAGES} black-side models, got {}",
            black.len()
        );
        Ok(ModelRegistry { white, black })
    }

    /// The predictor for `player` in a position with `walls_placed` walls
    /// on the board. Counts past the last stage clamp to it.
    pub fn predictor_for(&self, player: Player, walls_placed: usize) -> &dyn MovePredictor {
        let stage = walls_placed.min(MODEL_STAGES - 1);
        match player {
            Player::White => self.white[stage].as_ref(),
            Player::Black => self.black[stage].as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Flat(f32);

    impl MovePredictor for Flat {
        fn predict(&self, _encoding: &BoardEncoding) -> [f32; 256] {
            [self.0; 256]
        }
    }

    fn boxed(score: f32) -> Vec<Box<dyn MovePredictor>> {
        (0..MODEL_STAGES)
            .map(|_| Box::new(Flat(score)) as Box<dyn MovePredictor>)
            .collect()
    }

    #[test]
    fn test_registry_requires_all_stages() {
        assert!(ModelRegistry::new(boxed(1.0), boxed(1.0)).is_ok());
        let mut short = boxed(1.0);
        short.pop();
        assert!(ModelRegistry::new(short, boxed(1.0)).is_err());
    }

    #[test]
    fn test_stage_clamps() {
        let registry = ModelRegistry::new(boxed(1.0), boxed(2.0)).unwrap();
        let encoding = [0u8; ENCODING_LEN];
        let scores = registry
            .predictor_for(Player::Black, MODEL_STAGES + 5)
            .predict(&encoding);
        assert_eq!(scores[0], 2.0);
    }
}
