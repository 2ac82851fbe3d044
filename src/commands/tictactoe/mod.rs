//! Tic-tac-toe mini-game: board logic, the scripted opponent, session
//! bookkeeping, and rendering. Button flows live in
//! `interactions::game_handler`.

pub mod board;
pub mod opponent;
pub mod run;
pub mod session;
pub mod ui;
