//! Grid space shooter: simulation core plus save/config plumbing.
//!
//! - `entities`: pure data (entity kinds, player state, constants)
//! - `grid`: the board and the power-up / hit-effect pools
//! - `cadence`: frame-delta driven clocks and cooldowns
//! - `spawner`, `compute`, `progression`: the Playing-screen simulation
//! - `screen`: menu / playing / level-up / pause / end-screen state machine
//! - `session`: the single owner of all of the above
//! - `save`, `config`: files on disk

pub mod cadence;
pub mod compute;
pub mod config;
pub mod entities;
pub mod grid;
pub mod progression;
pub mod save;
pub mod screen;
pub mod session;
pub mod spawner;

pub use compute::TickInput;
pub use config::Config;
pub use save::SaveRecord;
pub use session::GameSession;
