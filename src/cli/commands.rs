//! Subcommands of the `tictactoe` binary

pub mod evaluate;
pub mod play;
pub mod self_play;
pub mod solve;
