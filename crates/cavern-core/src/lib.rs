//! Narrative core for Cavern.
//!
//! A choice-driven story is a static graph of scenes. Some scenes are gated
//! on the player's inventory and branch into a success or a failure path.
//! The [`NarrativeEngine`] walks the graph, awaits each scene's narration on
//! a [`PresentationSink`], and only then offers the choices that follow it.
//! The inventory is persisted through an injected [`InventoryBackend`].

/// Pacing configuration.
pub mod config;
/// Inventory predicates used by gates.
pub mod condition;
/// The narrative state machine.
pub mod engine;
/// Error types for the narrative core.
pub mod error;
/// The validated scene table.
pub mod graph;
/// The player's inventory and its persistence.
pub mod inventory;
/// Scenes, branches, choices, and endings.
pub mod scene;
/// The presentation boundary.
pub mod sink;
/// The built-in cave story.
pub mod story;

pub use condition::Condition;
pub use config::EngineConfig;
pub use engine::{ChoiceOutcome, GameState, NarrativeEngine, Phase};
pub use error::{EngineError, EngineResult, GraphError, GraphResult, PersistError};
pub use graph::SceneGraph;
pub use inventory::{FileBackend, Inventory, InventoryBackend, InventoryStore, MemoryBackend};
pub use scene::{Action, Branch, Choice, Ending, EndingKind, Gate, Outcome, Scene, SceneBody, SceneId};
pub use sink::{ChoiceView, Directive, HeadlessSink, PresentationSink};
pub use story::cave_story;
