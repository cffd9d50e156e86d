//! Slot machine engines.
//!
//! Two games share the ledger: a 3-reel game scored on the last symbol of each
//! reel, and a 3x3 grid scored on rows, columns and diagonals. Both the draw and
//! the payout are pure; persistence lives in `services::slot_service`.

pub mod reels;
pub mod grid;

use rand::distr::weighted::WeightedIndex;
use crate::Error;

pub use reels::{ReelSpin, ReelSymbol, reel_payout};
pub use grid::{GridOutcome, GridSymbol, LineWin, SlotGrid, evaluate_grid};

/// Source of random symbols for the slot services.
pub trait SymbolDraw: Send + Sync {
    fn draw_reels(&self) -> ReelSpin;
    fn draw_grid(&self) -> SlotGrid;
}

/// Draws from the thread-local RNG.
pub struct ThreadRngDraw {
    grid_weights: WeightedIndex<u32>,
}

impl ThreadRngDraw {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            grid_weights: grid::symbol_distribution()?,
        })
    }
}

impl SymbolDraw for ThreadRngDraw {
    fn draw_reels(&self) -> ReelSpin {
        reels::draw_reels(&mut rand::rng())
    }

    fn draw_grid(&self) -> SlotGrid {
        grid::draw_grid(&mut rand::rng(), &self.grid_weights)
    }
}
