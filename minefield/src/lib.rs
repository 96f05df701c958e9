//! Game-state engine for console Minesweeper.
//!
//! A round is built in two steps. A [`MinePlacer`][placement::MinePlacer] puts mines on a
//! [`Grid`][board::Grid] while it is still in its setup phase, after which every safe
//! cell learns how many mines surround it. The grid is then handed to a
//! [`Game`][game::Game], which resolves moves and reports what happened through an
//! [`Output`][output::Output].
//!
//! ```
//! use minefield::{
//!     board::Coordinate,
//!     game::{Game, GameConfig, UncoverOutcome},
//!     output::MessageLog,
//!     placement::FixedMinePlacer,
//! };
//!
//! let config = GameConfig::new(2, 1).unwrap();
//! let grid = config.build_grid(FixedMinePlacer::from_pairs(&[(0, 0)])).unwrap();
//! let mut game = Game::new(grid, MessageLog::new());
//!
//! game.reveal(Coordinate::new(0, 1));
//! game.reveal(Coordinate::new(1, 0));
//! assert_eq!(game.reveal(Coordinate::new(1, 1)), UncoverOutcome::Won);
//! ```

pub mod board;
pub mod game;
pub mod output;
pub mod placement;
