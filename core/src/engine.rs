use std::collections::{BTreeSet, VecDeque};

use ndarray::Array2;
use serde::{Deserialize, Serialize, Serializer};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// One game: the board, the player's marks on it, and the counters derived from play.
///
/// Only [`reveal`](Self::reveal) and [`toggle_flag`](Self::toggle_flag) mutate a session, and
/// neither does once it is won or lost.
///
/// Serializes as its [`SessionView`]; the board itself never leaves the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct GameSession {
    board: Board,
    cells: Array2<RevealState>,
    flags_remaining: CellCount,
    mines_flagged_correctly: CellCount,
    score: CellCount,
    state: GameState,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    /// Starts a game on a freshly generated preset board.
    ///
    /// The same seed always yields the same layout; `None` draws one from entropy.
    pub fn new_game(difficulty: Difficulty, seed: Option<u64>) -> Self {
        Self::with_config(difficulty.config(), seed)
    }

    pub fn with_config(config: GameConfig, seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::with_generator(config, &mut RandomBoardGenerator::from_seed(seed)),
            None => Self::with_generator(config, &mut RandomBoardGenerator::from_entropy()),
        }
    }

    pub fn with_generator(config: GameConfig, generator: &mut impl BoardGenerator) -> Self {
        Self::with_board(generator.generate(config))
    }

    pub fn with_board(board: Board) -> Self {
        let size = board.size();
        let flags_remaining = board.mine_count();
        Self {
            board,
            cells: Array2::default(size.to_nd_index()),
            flags_remaining,
            mines_flagged_correctly: 0,
            score: 0,
            state: Default::default(),
            triggered_mine: None,
        }
    }

    /// Replaces this session with a new game of the same configuration.
    pub fn restart(&mut self, seed: Option<u64>) {
        *self = Self::with_config(self.config(), seed);
    }

    pub fn config(&self) -> GameConfig {
        self.board.game_config()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.flags_remaining
    }

    pub fn mines_flagged_correctly(&self) -> CellCount {
        self.mines_flagged_correctly
    }

    /// Non-mine cells revealed so far. Kept as-is when the game is lost.
    pub fn score(&self) -> CellCount {
        self.score
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn status(&self) -> SessionStatus {
        match self.state {
            GameState::InProgress => SessionStatus::InProgress,
            GameState::Won => SessionStatus::Won(self.score),
            GameState::Lost => SessionStatus::Lost(self.score),
        }
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn reveal_state(&self, coords: Coord2) -> Result<RevealState> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.view_at(coords))
    }

    /// Everything the player may currently see.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_session(self)
    }

    /// Player-visible state plus counters, for hosts that mirror or transmit a session.
    pub fn view(&self) -> SessionView {
        SessionView {
            config: self.config(),
            status: self.status(),
            score: self.score,
            flags_remaining: self.flags_remaining,
            triggered_mine: self.triggered_mine,
            cells: self.snapshot(),
        }
    }

    /// The full board with every cell's content, available only once the game has ended.
    pub fn solution(&self) -> Option<Snapshot> {
        self.state
            .is_finished()
            .then(|| Snapshot::solution(&self.board))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        use FlagOutcome::*;
        use RevealState::*;

        let coords = self.board.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(AlreadyTerminal);
        }

        let state = self.cells[coords.to_nd_index()];
        Ok(match state {
            Revealed => Rejected,
            Hidden if self.flags_remaining == 0 => Rejected,
            Hidden => {
                self.cells[coords.to_nd_index()] = Flagged;
                self.flags_remaining -= 1;
                if self.board.contains_mine(coords) {
                    self.mines_flagged_correctly += 1;
                    if self.mines_flagged_correctly == self.board.mine_count() {
                        self.end_game(GameState::Won);
                    }
                }
                Placed
            }
            Flagged => {
                self.unflag(coords);
                Removed
            }
        })
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if self.state.is_finished() {
            return Ok(RevealOutcome::AlreadyTerminal);
        }

        if self.cells[coords.to_nd_index()] == RevealState::Revealed {
            return Ok(RevealOutcome::NoOp);
        }

        if self.board.contains_mine(coords) {
            self.unflag(coords);
            self.cells[coords.to_nd_index()] = RevealState::Revealed;
            self.triggered_mine = Some(coords);
            self.end_game(GameState::Lost);
            return Ok(RevealOutcome::MineHit);
        }

        Ok(RevealOutcome::CellsOpened(self.open_region(coords)))
    }

    /// Opens `start` and, through empty cells, everything connected to it.
    ///
    /// Numbered cells are opened but not expanded. Mines are never reached because only empty
    /// cells enqueue their neighbors.
    fn open_region(&mut self, start: Coord2) -> BTreeSet<Coord2> {
        let mut opened = BTreeSet::new();
        let mut to_visit = VecDeque::from([start]);

        while let Some(visit_coords) = to_visit.pop_front() {
            if !self.cells[visit_coords.to_nd_index()].is_unrevealed() {
                continue;
            }

            let content = self.board[visit_coords];
            if content.is_mine() {
                continue;
            }

            self.unflag(visit_coords);
            self.cells[visit_coords.to_nd_index()] = RevealState::Revealed;
            self.score += 1;
            opened.insert(visit_coords);

            if content == CellContent::Empty {
                to_visit.extend(
                    self.board
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| self.cells[pos.to_nd_index()].is_unrevealed()),
                );
            }
        }

        if opened.len() > 1 {
            log::debug!("Cascade from {:?} opened {} cells", start, opened.len());
        }

        opened
    }

    /// Returns a flag on `coords` to the pool, if there is one.
    fn unflag(&mut self, coords: Coord2) {
        if self.cells[coords.to_nd_index()] != RevealState::Flagged {
            return;
        }

        self.cells[coords.to_nd_index()] = RevealState::Hidden;
        self.flags_remaining += 1;
        if self.board.contains_mine(coords) {
            self.mines_flagged_correctly -= 1;
        }
    }

    fn end_game(&mut self, state: GameState) {
        if self.state.is_finished() {
            return;
        }

        self.state = state;
        log::info!("Game ended: {:?} with score {}", state, self.score);
    }

    pub(crate) fn view_at(&self, coords: Coord2) -> CellView {
        CellView::new(self.cells[coords.to_nd_index()], self.board[coords])
    }
}

impl Serialize for GameSession {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        self.view().serialize(serializer)
    }
}
