use super::*;

mod endgame;
mod kiwipete;
mod starting_position;
mod symmetrical;
