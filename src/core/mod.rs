//! Core data model: coordinates, tiles, the board, configuration, RNG,
//! actions, and the authoritative state aggregate.

pub mod action;
pub mod board;
pub mod config;
pub mod position;
pub mod rng;
pub mod state;
pub mod tile;

pub use action::{Action, ActionOutcome, ActionRecord, RejectReason};
pub use board::Board;
pub use config::EngineConfig;
pub use position::{Position, TileId, GRID_SIZE};
pub use rng::{GameRng, GameRngState};
pub use state::GameState;
pub use tile::{LinkKind, Tile, TileKind};
