use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::*;

/// Preset board sizes offered to the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 9x9, 10 mines
    Easy,
    /// 16x16, 40 mines
    Medium,
    /// 16 rows by 30 columns, 99 mines
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// `(rows, columns, mines)` for this preset.
    pub const fn params(self) -> (Coord, Coord, CellCount) {
        match self {
            Self::Easy => (9, 9, 10),
            Self::Medium => (16, 16, 40),
            Self::Hard => (16, 30, 99),
        }
    }

    pub const fn config(self) -> GameConfig {
        let (rows, columns, mines) = self.params();
        GameConfig::new_unchecked((rows, columns), mines)
    }

    /// Stable identifier, also used as the serialized form.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|difficulty| difficulty.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(GameError::UnknownDifficulty)
    }
}

impl From<Difficulty> for GameConfig {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.config()
    }
}

/// Validated board dimensions and mine count.
///
/// Only [`GameConfig::new`] and the [`Difficulty`] presets construct one, so every value in
/// circulation satisfies `rows > 0`, `columns > 0` and `0 < mines < rows * columns`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "GameConfigRepr")]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

#[derive(Deserialize)]
struct GameConfigRepr {
    size: Coord2,
    mines: CellCount,
}

impl TryFrom<GameConfigRepr> for GameConfig {
    type Error = GameError;

    fn try_from(repr: GameConfigRepr) -> Result<Self> {
        Self::new(repr.size, repr.mines)
    }
}

impl GameConfig {
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Refuses out-of-range values instead of clamping them.
    pub fn new((rows, columns): Coord2, mines: CellCount) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(GameError::InvalidSize { rows, columns });
        }

        let cells = mult(rows, columns);
        if mines == 0 || mines >= cells {
            return Err(GameError::InvalidMineCount { mines, cells });
        }

        Ok(Self::new_unchecked((rows, columns), mines))
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn columns(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}
