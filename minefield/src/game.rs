//! Gameplay for a single round: uncovering cells, cascading through blank regions and
//! deciding when the round is won or lost.
//!
//! A round is a [`Game`] wrapping a freshly built [`Grid`]. [`Game::uncover`] is the
//! only operation that changes anything; once the round is [`Lost`][GameState::Lost] or
//! [`Won`][GameState::Won] it ignores every further move. Start a new round with a new
//! grid and a new [`Game`].
use tracing::{debug, info};

use crate::{
    board::{Cell, Coordinate, Grid},
    output::{Message, Output},
};

pub use self::config::{GameConfig, MAX_MINE_DENSITY_PERCENT};

mod config;

/// Status of a round.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GameState {
    /// Moves are still accepted.
    Playing,
    /// A mine was uncovered.
    Lost,
    /// Every safe cell was uncovered.
    Won,
}

impl GameState {
    /// Returns true for [`Lost`][GameState::Lost] and [`Won`][GameState::Won].
    pub fn is_finished(self) -> bool {
        match self {
            GameState::Playing => false,
            GameState::Lost | GameState::Won => true,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        GameState::Playing
    }
}

/// Who asked for a cell to be uncovered.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Trigger {
    /// A move chosen by the player. Reports the adjacent count and checks for a win.
    Player,
    /// A reveal made on the player's behalf. Stays silent and skips the win check.
    Cascade,
}

/// Result of [`Game::uncover`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum UncoverOutcome {
    /// Nothing changed: the coordinate was out of bounds, the cell was already
    /// revealed, or the round was already over.
    NoChange,
    /// Safe cells were revealed and the round goes on.
    Revealed {
        /// Number of cells revealed by this move, including any cascade.
        cells: usize,
    },
    /// The cell held a mine. The round is lost.
    Detonated,
    /// The move revealed the last safe cell. The round is won.
    Won,
}

/// Gameplay state for one round.
#[derive(Debug)]
pub struct Game<O> {
    /// Minefield being played.
    grid: Grid,

    /// Where announcements go.
    output: O,

    /// Whether the round is still going.
    state: GameState,
}

impl<O: Output> Game<O> {
    /// Start a round on the given grid.
    pub fn new(grid: Grid, output: O) -> Self {
        Self {
            grid,
            output,
            state: GameState::default(),
        }
    }

    /// Get the state of the round.
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Returns true once a mine has been uncovered.
    pub fn is_game_over(&self) -> bool {
        self.state == GameState::Lost
    }

    /// Returns true once every safe cell has been uncovered.
    pub fn is_game_won(&self) -> bool {
        self.state == GameState::Won
    }

    /// Returns true if the round no longer accepts moves.
    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Read-only view of the grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Get the output collaborator.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Hand the current grid to the output collaborator for rendering.
    pub fn show_grid(&mut self) {
        self.output.display_grid(&self.grid);
    }

    /// Uncover a cell as a player move. Shorthand for
    /// `uncover(coord, Trigger::Player)`.
    pub fn reveal(&mut self, coord: Coordinate) -> UncoverOutcome {
        self.uncover(coord, Trigger::Player)
    }

    /// Uncover the cell at `coord`.
    ///
    /// Out-of-bounds coordinates, already-revealed cells and moves after the round has
    /// ended change nothing. Uncovering a mine loses the round. A safe cell with no
    /// neighboring mines also reveals the whole blank region around it, along with the
    /// numbered cells bordering that region. Only [`Trigger::Player`] moves report the
    /// adjacent count and can win the round.
    pub fn uncover(&mut self, coord: Coordinate, trigger: Trigger) -> UncoverOutcome {
        if self.state.is_finished() {
            return UncoverOutcome::NoChange;
        }
        let cell = match self.grid.reveal(coord) {
            Some(cell) => cell,
            None => return UncoverOutcome::NoChange,
        };

        if cell.is_mine() {
            self.state = GameState::Lost;
            info!(%coord, "mine detonated");
            self.output.display_message(&Message::Detonated);
            return UncoverOutcome::Detonated;
        }

        if trigger == Trigger::Player {
            self.output
                .display_message(&Message::AdjacentMines(cell.adjacent_mines()));
        }

        let mut cells = 1;
        if cell.adjacent_mines() == 0 {
            cells += self.cascade_from(coord);
        }

        if trigger == Trigger::Player && self.grid.all_safe_revealed() {
            debug_assert_eq!(self.grid.revealed_count(), self.grid.safe_cell_count());
            self.state = GameState::Won;
            info!(revealed = self.grid.revealed_count(), "all safe cells revealed");
            self.output.display_message(&Message::Won);
            return UncoverOutcome::Won;
        }

        UncoverOutcome::Revealed { cells }
    }

    /// Reveal the blank region connected to `start`, which must already be revealed
    /// with no adjacent mines. Numbered cells at the border are revealed but not
    /// expanded. Returns how many cells were newly revealed.
    fn cascade_from(&mut self, start: Coordinate) -> usize {
        let mut revealed = 0;
        let mut pending = vec![start];
        while let Some(coord) = pending.pop() {
            for neighbor in self.grid.neighbors(coord) {
                if self.grid.get(neighbor).map_or(true, Cell::is_mine) {
                    continue;
                }
                // `reveal` returns `None` for cells that are already open, so every cell
                // enters `pending` at most once.
                if let Some(cell) = self.grid.reveal(neighbor) {
                    revealed += 1;
                    if cell.adjacent_mines() == 0 {
                        pending.push(neighbor);
                    }
                }
            }
        }
        debug!(%start, revealed, "cascaded through blank region");
        revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{output::MessageLog, placement::FixedMinePlacer};

    fn game(size: usize, mines: &[(usize, usize)]) -> Game<MessageLog> {
        let grid = Grid::new(size, FixedMinePlacer::from_pairs(mines)).unwrap();
        Game::new(grid, MessageLog::new())
    }

    fn revealed(game: &Game<MessageLog>) -> Vec<Vec<bool>> {
        game.grid()
            .iter_rows()
            .map(|row| row.map(Cell::is_revealed).collect())
            .collect()
    }

    fn at(row: usize, col: usize) -> Coordinate {
        Coordinate::new(row, col)
    }

    #[test]
    fn numbered_cell_reveals_only_itself() {
        let mut game = game(4, &[(0, 1), (1, 0), (1, 1)]);

        let outcome = game.reveal(at(0, 0));

        assert_eq!(outcome, UncoverOutcome::Revealed { cells: 1 });
        assert_eq!(game.grid().get(at(0, 0)).unwrap().adjacent_mines(), 3);
        assert_eq!(game.grid().revealed_count(), 1);
        assert_eq!(game.output().messages(), &[Message::AdjacentMines(3)]);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn uncovering_a_mine_loses() {
        let mut game = game(4, &[(1, 1)]);
        game.grid.set_mine(at(0, 0), true);

        let outcome = game.reveal(at(0, 0));

        assert_eq!(outcome, UncoverOutcome::Detonated);
        assert!(game.is_game_over());
        assert!(!game.is_game_won());
        assert!(game.grid().get(at(0, 0)).unwrap().is_revealed());
        assert_eq!(game.output().last(), Some(&Message::Detonated));
    }

    #[test]
    fn blank_cell_cascades_and_stops_at_numbers() {
        // . . 1 1
        // . . 1 *
        // . . 1 1
        // . . . .
        let mut game = game(4, &[(1, 3)]);

        let outcome = game.reveal(at(3, 0));

        assert_eq!(outcome, UncoverOutcome::Revealed { cells: 14 });
        // (0, 3) borders no blank cell, so the cascade can't reach it.
        assert!(!game.grid().get(at(0, 3)).unwrap().is_revealed());
        assert!(!game.grid().get(at(1, 3)).unwrap().is_revealed());
        assert_eq!(game.output().messages(), &[Message::AdjacentMines(0)]);

        assert_eq!(game.reveal(at(0, 3)), UncoverOutcome::Won);
        assert_eq!(
            game.output().messages(),
            &[Message::AdjacentMines(0), Message::AdjacentMines(1), Message::Won]
        );
    }

    #[test]
    fn cascade_does_not_expand_past_numbered_border() {
        // . 1 * 1 .
        // . 1 1 2 1
        // . . . 1 *
        // 1 1 . 1 1
        // * 1 . . .
        let mines = &[(0, 2), (2, 4), (4, 0)];
        let mut game = game(5, mines);

        let outcome = game.reveal(at(0, 0));

        assert_eq!(outcome, UncoverOutcome::Revealed { cells: 19 });
        let open = revealed(&game);
        // The top-right corner is only reachable through numbered cells.
        assert!(!open[0][3]);
        assert!(!open[0][4]);
        assert!(!open[1][4]);
        assert!(open[1][3]);
        assert!(open[4][1]);
        assert!(open[4][4]);
        for &(r, c) in mines {
            assert!(!open[r][c]);
        }
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn repeated_and_out_of_bounds_moves_change_nothing() {
        let mut game = game(4, &[(1, 1)]);
        game.reveal(at(0, 0));
        let before = revealed(&game);

        assert_eq!(game.reveal(at(0, 0)), UncoverOutcome::NoChange);
        assert_eq!(game.reveal(at(4, 0)), UncoverOutcome::NoChange);
        assert_eq!(game.reveal(at(0, 17)), UncoverOutcome::NoChange);

        assert_eq!(revealed(&game), before);
        assert_eq!(game.output().messages().len(), 1);
        assert_eq!(game.state(), GameState::Playing);
    }

    #[test]
    fn revealing_every_safe_cell_wins() {
        let mut game = game(2, &[(0, 0)]);

        assert_eq!(game.reveal(at(0, 1)), UncoverOutcome::Revealed { cells: 1 });
        assert_eq!(game.reveal(at(1, 0)), UncoverOutcome::Revealed { cells: 1 });
        assert!(!game.is_game_won());
        assert_eq!(game.reveal(at(1, 1)), UncoverOutcome::Won);

        assert!(game.is_game_won());
        assert!(!game.is_game_over());
        assert_eq!(game.output().last(), Some(&Message::Won));
    }

    #[test]
    fn finished_round_ignores_moves() {
        let mut game = game(3, &[(0, 0), (2, 2)]);
        game.reveal(at(0, 0));
        let messages = game.output().messages().len();

        assert_eq!(game.reveal(at(1, 1)), UncoverOutcome::NoChange);
        assert_eq!(game.reveal(at(2, 2)), UncoverOutcome::NoChange);

        assert!(!game.grid().get(at(1, 1)).unwrap().is_revealed());
        assert_eq!(game.output().messages().len(), messages);
        assert_eq!(game.state(), GameState::Lost);
    }

    #[test]
    fn won_round_does_not_repeat_the_announcement() {
        let mut game = game(1, &[]);

        assert_eq!(game.reveal(at(0, 0)), UncoverOutcome::Won);
        assert_eq!(game.reveal(at(0, 0)), UncoverOutcome::NoChange);

        let wins = game
            .output()
            .messages()
            .iter()
            .filter(|&&m| m == Message::Won)
            .count();
        assert_eq!(wins, 1);
    }

    #[test]
    fn cascade_trigger_is_silent_and_never_wins() {
        let mut game = game(2, &[(0, 0)]);
        game.reveal(at(0, 1));
        game.reveal(at(1, 0));

        let outcome = game.uncover(at(1, 1), Trigger::Cascade);

        assert_eq!(outcome, UncoverOutcome::Revealed { cells: 1 });
        assert!(game.grid().all_safe_revealed());
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.output().messages().len(), 2);
    }

    #[test]
    fn grid_without_mines_is_won_by_first_move() {
        let mut game = game(5, &[]);

        assert_eq!(game.reveal(at(2, 2)), UncoverOutcome::Won);
        assert_eq!(game.grid().revealed_count(), 25);
    }
}
