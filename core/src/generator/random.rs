use ndarray::Array2;
use rand::prelude::*;
use rand::rngs::SmallRng;

use super::*;

/// Places mines by drawing uniformly random cells and redrawing on collision until the
/// configured count of distinct cells is reached.
#[derive(Clone, Debug)]
pub struct RandomBoardGenerator<R = SmallRng> {
    rng: R,
}

impl<R: Rng> RandomBoardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl RandomBoardGenerator<SmallRng> {
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(SmallRng::from_rng(&mut rand::rng()))
    }
}

impl<R: Rng> BoardGenerator for RandomBoardGenerator<R> {
    fn generate(&mut self, config: GameConfig) -> Board {
        generate(config, &mut self.rng)
    }
}

/// Rejection-sampled mine placement followed by adjacency counting.
///
/// `config` guarantees at least one safe cell, so sampling always terminates.
pub fn generate<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Board {
    let (rows, columns) = config.size();
    let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
    let mut mines_placed: CellCount = 0;
    let mut collisions: usize = 0;

    while mines_placed < config.mines() {
        let coords: Coord2 = (rng.random_range(0..rows), rng.random_range(0..columns));
        let tile = &mut mines[coords.to_nd_index()];
        if *tile {
            collisions += 1;
            continue;
        }
        *tile = true;
        mines_placed += 1;
    }

    log::debug!(
        "Generated {}x{} board with {} mines ({} collisions redrawn)",
        rows,
        columns,
        mines_placed,
        collisions
    );

    Board::from_checked_mask(&mines, mines_placed)
}
