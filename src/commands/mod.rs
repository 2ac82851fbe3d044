// src/commands/mod.rs
// This file declares the existence of our command modules.

pub mod shop;
pub mod start;
pub mod tictactoe;
