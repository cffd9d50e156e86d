// File: memberpoints-core/src/slot/grid.rs

use std::fmt;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};
use crate::Error;

pub const GRID_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridSymbol {
    Seven,
    Star,
    Cherry,
    Lemon,
    Bell,
}

impl GridSymbol {
    pub const ALL: [GridSymbol; 5] = [
        GridSymbol::Seven,
        GridSymbol::Star,
        GridSymbol::Cherry,
        GridSymbol::Lemon,
        GridSymbol::Bell,
    ];

    /// Relative draw weight; rarer symbols pay more.
    pub fn weight(&self) -> u32 {
        match self {
            GridSymbol::Seven => 1,
            GridSymbol::Star => 2,
            GridSymbol::Cherry | GridSymbol::Lemon | GridSymbol::Bell => 4,
        }
    }

    pub fn multiplier(&self) -> i64 {
        match self {
            GridSymbol::Seven => 5,
            GridSymbol::Star => 3,
            GridSymbol::Cherry | GridSymbol::Lemon | GridSymbol::Bell => 2,
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            GridSymbol::Seven => "7",
            GridSymbol::Star => "⭐",
            GridSymbol::Cherry => "🍒",
            GridSymbol::Lemon => "🍋",
            GridSymbol::Bell => "🔔",
        }
    }
}

impl fmt::Display for GridSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Cell coordinates (row, col) of the eight scoring lines.
pub const LINES: [[(usize, usize); 3]; 8] = [
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotGrid {
    pub cells: [[GridSymbol; GRID_SIZE]; GRID_SIZE],
}

impl SlotGrid {
    pub fn new(cells: [[GridSymbol; GRID_SIZE]; GRID_SIZE]) -> Self {
        Self { cells }
    }

    /// Stored form, rows separated by `" / "`, e.g. `"🍒 🍋 🍒 / 🍋 🍋 🍋 / 🔔 🍒 7"`.
    pub fn encode_result(&self) -> String {
        self.cells
            .iter()
            .map(|row| row.iter().map(GridSymbol::glyph).collect::<Vec<_>>().join(" "))
            .collect::<Vec<_>>()
            .join(" / ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineWin {
    /// Index into `LINES`.
    pub line: usize,
    pub symbol: GridSymbol,
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridOutcome {
    pub wins: Vec<LineWin>,
    pub win_points: i64,
}

/// Scores every line; wins on several lines add up.
pub fn evaluate_grid(grid: &SlotGrid, bet: i64) -> GridOutcome {
    let wins: Vec<LineWin> = LINES
        .iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let [a, b, c] = line.map(|(r, col)| grid.cells[r][col]);
            (a == b && b == c).then(|| LineWin {
                line: idx,
                symbol: a,
                points: bet * a.multiplier(),
            })
        })
        .collect();
    let win_points = wins.iter().map(|w| w.points).sum();
    GridOutcome { wins, win_points }
}

pub fn symbol_distribution() -> Result<WeightedIndex<u32>, Error> {
    WeightedIndex::new(GridSymbol::ALL.iter().map(GridSymbol::weight))
        .map_err(|e| Error::Validation(format!("invalid grid symbol weights: {}", e)))
}

pub fn draw_grid<R: Rng + ?Sized>(rng: &mut R, weights: &WeightedIndex<u32>) -> SlotGrid {
    let mut cells = [[GridSymbol::Cherry; GRID_SIZE]; GRID_SIZE];
    for row in cells.iter_mut() {
        for cell in row.iter_mut() {
            *cell = GridSymbol::ALL[weights.sample(rng)];
        }
    }
    SlotGrid { cells }
}
