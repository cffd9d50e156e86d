// File: memberpoints-core/src/slot/reels.rs

use std::fmt;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const REEL_COUNT: usize = 3;

/// Symbols shown per reel while it spins; the last one is where the reel stops.
pub const REEL_LENGTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReelSymbol {
    Symbol1,
    Symbol2,
    Symbol3,
    Symbol4,
    Wild,
}

impl ReelSymbol {
    pub const ALL: [ReelSymbol; 5] = [
        ReelSymbol::Symbol1,
        ReelSymbol::Symbol2,
        ReelSymbol::Symbol3,
        ReelSymbol::Symbol4,
        ReelSymbol::Wild,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReelSymbol::Symbol1 => "symbol1",
            ReelSymbol::Symbol2 => "symbol2",
            ReelSymbol::Symbol3 => "symbol3",
            ReelSymbol::Symbol4 => "symbol4",
            ReelSymbol::Wild => "wild",
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, ReelSymbol::Wild)
    }
}

impl fmt::Display for ReelSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The full animation strip of each reel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReelSpin {
    pub sequences: [[ReelSymbol; REEL_LENGTH]; REEL_COUNT],
}

impl ReelSpin {
    /// A spin whose reels stop on `finals`; the lead-in symbols are filler.
    pub fn stopping_at(finals: [ReelSymbol; REEL_COUNT]) -> Self {
        let mut sequences = [[ReelSymbol::Symbol1; REEL_LENGTH]; REEL_COUNT];
        for (seq, last) in sequences.iter_mut().zip(finals) {
            seq[REEL_LENGTH - 1] = last;
        }
        Self { sequences }
    }

    pub fn final_symbols(&self) -> [ReelSymbol; REEL_COUNT] {
        self.sequences.map(|seq| seq[REEL_LENGTH - 1])
    }

    /// Stored form, e.g. `"wild / symbol2 / wild"`.
    pub fn encode_result(&self) -> String {
        self.final_symbols()
            .iter()
            .map(ReelSymbol::as_str)
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

pub fn draw_reels<R: Rng + ?Sized>(rng: &mut R) -> ReelSpin {
    let mut sequences = [[ReelSymbol::Symbol1; REEL_LENGTH]; REEL_COUNT];
    for seq in sequences.iter_mut() {
        for slot in seq.iter_mut() {
            *slot = ReelSymbol::ALL[rng.random_range(0..ReelSymbol::ALL.len())];
        }
    }
    ReelSpin { sequences }
}

/// Multiplier applied to the bet for a set of final symbols.
pub fn reel_multiplier(finals: &[ReelSymbol; REEL_COUNT]) -> i64 {
    let [a, b, c] = *finals;
    if a == b && b == c {
        return if a.is_wild() { 10 } else { 5 };
    }
    match finals.iter().filter(|s| s.is_wild()).count() {
        2 => 3,
        1 => 2,
        _ => 0,
    }
}

pub fn reel_payout(finals: &[ReelSymbol; REEL_COUNT], bet: i64) -> i64 {
    bet * reel_multiplier(finals)
}
