//! Runtime orchestration for the tower game engine.
//!
//! This crate wraps the deterministic rules of `game-core` in the services a
//! front end needs: a [`Session`] to dispatch actions against, an
//! [`EventBus`] announcing what changed, and a [`SaveManager`] that persists
//! games as replayable action logs.
//!
//! Modules are organized by responsibility:
//! - [`session`] hosts dispatch, history and battle auto-resolution
//! - [`events`] derives notifications from state deltas and routes them
//! - [`save`] and [`repository`] provide event-sourced persistence
//! - [`providers`] abstracts where actions come from
//! - [`config`] reads runtime settings from the environment
pub mod config;
pub mod error;
pub mod events;
pub mod providers;
pub mod repository;
pub mod save;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{EventBus, GameEvent, Topic, extract_events};
pub use providers::{ActionProvider, ScriptedProvider};
pub use repository::{
    FileSaveRepository, InMemorySaveRepo, InitialStateSeed, RepositoryError, SaveRecord,
    SaveRepository,
};
pub use save::{SaveManager, SaveSummary};
pub use session::Session;
