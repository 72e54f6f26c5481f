//! Game rules: the engine, reaction propagation, scoring, and spawning.

pub mod engine;
pub mod reaction;
pub mod scoring;
pub mod spawner;

pub use engine::{GameEngine, GameEngineBuilder};
pub use reaction::ChainReport;
pub use scoring::ComboTracker;
