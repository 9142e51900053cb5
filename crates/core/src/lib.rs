//! Toy rules - pure, deterministic, and testable
//!
//! Each module holds the state and rules of one toy with no terminal, clock or
//! I/O dependency. Time arrives as elapsed milliseconds and randomness through
//! a caller-owned [`SimpleRng`], so the same seed and inputs replay a session
//! exactly.
//!
//! # Module Structure
//!
//! - [`ball`]: bouncing balls with gravity, damping and collisions
//! - [`clock`]: analog face geometry and big digital glyphs
//! - [`fire`]: heat-diffusion fire
//! - [`game_2048`]: 2048 slide and merge
//! - [`life`]: Conway's Game of Life on a bounded grid
//! - [`matrix`]: falling-character rain
//! - [`paint`]: canvas, brushes, lines and flood fill
//! - [`pipes`]: growing-pipes screensaver
//! - [`snake`]: snake with growth and speed-up
//! - [`tetris`]: falling blocks with line clears
//! - [`tictactoe`]: tic-tac-toe against minimax
//!
//! # Example
//!
//! ```
//! use terminal_toys_core::game_2048::Game2048;
//! use terminal_toys_core::types::Arrow;
//! use terminal_toys_core::SimpleRng;
//!
//! let board = [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]];
//! let mut game = Game2048::from_board(board, SimpleRng::new(7));
//! assert!(game.slide(Arrow::Left));
//! assert_eq!(game.score(), 4);
//! ```

pub mod ball;
pub mod clock;
pub mod fire;
pub mod game_2048;
pub mod life;
pub mod matrix;
pub mod paint;
pub mod pipes;
pub mod rng;
pub mod snake;
pub mod tetris;
pub mod tictactoe;

pub use terminal_toys_types as types;

pub use rng::SimpleRng;
