//! Menu launcher: lists the toys and dispatches by number.

use crate::config::Settings;
use crate::engine::Toy;
use crate::error::ToysError;
use crate::term::Viewport;
use crate::toys::{
    BouncingBall, Clock, FireToy, Game2048Toy, LifeToy, MatrixRain, Paint, PipesToy, SnakeToy, TetrisToy,
    TicTacToeToy,
};
use crate::types::TerminalMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToyKind {
    BouncingBall,
    Clock,
    Fire,
    Game2048,
    Paint,
    Life,
    TicTacToe,
    Pipes,
    Tetris,
    Snake,
    MatrixRain,
}

impl ToyKind {
    /// Menu order; a toy's number is its position plus one.
    pub const ALL: [ToyKind; 11] = [
        ToyKind::BouncingBall,
        ToyKind::Clock,
        ToyKind::Fire,
        ToyKind::Game2048,
        ToyKind::Paint,
        ToyKind::Life,
        ToyKind::TicTacToe,
        ToyKind::Pipes,
        ToyKind::Tetris,
        ToyKind::Snake,
        ToyKind::MatrixRain,
    ];

    pub fn from_number(n: usize) -> Option<Self> {
        n.checked_sub(1).and_then(|i| Self::ALL.get(i)).copied()
    }

    pub fn number(self) -> usize {
        Self::ALL.iter().position(|k| *k == self).map_or(0, |i| i + 1)
    }

    pub fn title(self) -> &'static str {
        match self {
            ToyKind::BouncingBall => "Bouncing Ball",
            ToyKind::Clock => "Terminal Clock",
            ToyKind::Fire => "Fire Effect",
            ToyKind::Game2048 => "2048",
            ToyKind::Paint => "ASCII Paint",
            ToyKind::Life => "Game of Life",
            ToyKind::TicTacToe => "Tic-Tac-Toe",
            ToyKind::Pipes => "Pipes Screensaver",
            ToyKind::Tetris => "Tetris",
            ToyKind::Snake => "Snake",
            ToyKind::MatrixRain => "Matrix Rain",
        }
    }

    /// Build the toy for a screen of `viewport` in `mode`.
    pub fn build(self, viewport: Viewport, mode: TerminalMode, settings: &Settings) -> Box<dyn Toy> {
        match self {
            ToyKind::BouncingBall => Box::new(BouncingBall::new(viewport, settings)),
            ToyKind::Clock => Box::new(Clock::new()),
            ToyKind::Fire => Box::new(FireToy::new(viewport, settings)),
            ToyKind::Game2048 => Box::new(Game2048Toy::new(settings)),
            ToyKind::Paint => Box::new(Paint::new(viewport, settings)),
            ToyKind::Life => Box::new(LifeToy::new(viewport, settings)),
            ToyKind::TicTacToe => Box::new(TicTacToeToy::new(settings)),
            ToyKind::Pipes => Box::new(PipesToy::new(viewport, settings)),
            ToyKind::Tetris => Box::new(TetrisToy::new(settings)),
            ToyKind::Snake => Box::new(SnakeToy::new(viewport, settings)),
            ToyKind::MatrixRain => Box::new(MatrixRain::new(viewport, mode, settings)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Run(ToyKind),
    Quit,
}

/// Parse one line of menu input: a toy number or `q`.
pub fn parse_choice(input: &str) -> Result<MenuChoice, ToysError> {
    let s = input.trim();
    if s.eq_ignore_ascii_case("q") {
        return Ok(MenuChoice::Quit);
    }
    s.parse::<usize>()
        .ok()
        .and_then(ToyKind::from_number)
        .map(MenuChoice::Run)
        .ok_or_else(|| ToysError::UnknownToy(s.to_string()))
}

/// The menu as printed by the launcher.
pub fn menu_text() -> String {
    let mut out = String::from("Terminal Toys\n=============\n\n");
    for kind in ToyKind::ALL {
        out.push_str(&format!("{:>3}. {}\n", kind.number(), kind.title()));
    }
    out.push_str("\n  q. Quit\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_numbers_round_trip_through_menu_order() {
        for (i, kind) in ToyKind::ALL.iter().enumerate() {
            assert_eq!(kind.number(), i + 1);
            assert_eq!(ToyKind::from_number(i + 1), Some(*kind));
        }
        assert_eq!(ToyKind::from_number(0), None);
        assert_eq!(ToyKind::from_number(12), None);
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1").unwrap(), MenuChoice::Run(ToyKind::BouncingBall));
        assert_eq!(parse_choice(" 11\n").unwrap(), MenuChoice::Run(ToyKind::MatrixRain));
        assert_eq!(parse_choice("Q").unwrap(), MenuChoice::Quit);
        assert!(matches!(parse_choice("12"), Err(ToysError::UnknownToy(s)) if s == "12"));
        assert!(parse_choice("").is_err());
        assert!(parse_choice("tetris").is_err());
    }

    #[test]
    fn test_menu_lists_every_toy() {
        let menu = menu_text();
        assert!(menu.contains("  1. Bouncing Ball"));
        assert!(menu.contains(" 11. Matrix Rain"));
        assert!(menu.contains("q. Quit"));
    }

    #[test]
    fn test_every_toy_builds_and_names_itself() {
        let settings = Settings {
            seed: Some(1),
            ..Settings::default()
        };
        for kind in ToyKind::ALL {
            let toy = kind.build(Viewport::new(80, 24), TerminalMode::DegradedAscii, &settings);
            assert!(!toy.name().is_empty());
            assert!(!toy.config().frame_interval.is_zero());
        }
    }

    proptest! {
        #[test]
        fn prop_parse_choice_accepts_only_menu_numbers(input in "\\PC{0,6}") {
            match parse_choice(&input) {
                Ok(MenuChoice::Quit) => prop_assert!(input.trim().eq_ignore_ascii_case("q")),
                Ok(MenuChoice::Run(kind)) => {
                    prop_assert_eq!(input.trim().parse::<usize>().ok(), Some(kind.number()));
                }
                Err(ToysError::UnknownToy(s)) => prop_assert_eq!(s, input.trim()),
                Err(other) => prop_assert!(false, "unexpected error {other}"),
            }
        }
    }
}
