//! Error types for the narrative core.

use thiserror::Error;

use crate::scene::SceneId;

/// Result type for scene graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Result type for narrative engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors raised while building or querying a scene graph.
///
/// All of these describe a broken story table, i.e. an authoring bug.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A scene id was looked up that the graph does not contain.
    #[error("unknown scene: {0}")]
    UnknownScene(SceneId),

    /// Two scenes share the same id.
    #[error("duplicate scene id: {0}")]
    DuplicateScene(SceneId),

    /// The opening scene is not part of the graph.
    #[error("opening scene not found: {0}")]
    MissingOpening(SceneId),

    /// A choice or continuation points at a scene that does not exist.
    #[error("scene {from} references unknown scene {target}")]
    DanglingTarget {
        /// Scene holding the reference.
        from: SceneId,
        /// The missing target id.
        target: SceneId,
    },

    /// A forced defeat routes to a scene that is not an ending.
    #[error("scene {from} routes its defeat to {target}, which is not an ending")]
    NotAnEnding {
        /// Scene holding the defeat outcome.
        from: SceneId,
        /// The non-terminal target.
        target: SceneId,
    },

    /// A branch offers choices but the list is empty.
    #[error("scene {0} offers an empty choice list")]
    EmptyChoices(SceneId),

    /// A gate condition is malformed (e.g. an empty item name).
    #[error("scene {scene} has an invalid gate: {reason}")]
    InvalidGate {
        /// Gated scene.
        scene: SceneId,
        /// What is wrong with the gate.
        reason: String,
    },

    /// A story file could not be parsed or written.
    #[error("story format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Errors raised by the narrative engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A transition targeted a scene id the graph does not know.
    #[error("unknown scene: {0}")]
    UnknownScene(SceneId),

    /// A choice index past the end of the offered choices.
    #[error("choice {index} out of range for scene {scene} ({available} available)")]
    ChoiceOutOfRange {
        /// Scene the selection was made in.
        scene: SceneId,
        /// Requested index.
        index: usize,
        /// Number of choices on offer.
        available: usize,
    },

    /// A selection was made for a scene that is no longer current.
    #[error("choice made for scene {got}, but the current scene is {expected}")]
    SceneMismatch {
        /// Current scene.
        expected: SceneId,
        /// Scene named by the caller.
        got: SceneId,
    },

    /// A selection arrived while no choices were on offer.
    #[error("scene {0} is not waiting for a choice")]
    NotAwaitingChoice(SceneId),

    /// Graph lookup or validation failure.
    #[error(transparent)]
    Graph(GraphError),
}

impl From<GraphError> for EngineError {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::UnknownScene(id) => EngineError::UnknownScene(id),
            other => EngineError::Graph(other),
        }
    }
}

/// Errors raised by inventory persistence backends.
///
/// The inventory store never propagates these; it logs them and falls back
/// to a safe default.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Reading or writing the record failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored record is not a list of item names.
    #[error("malformed inventory record: {0}")]
    Format(#[from] serde_json::Error),
}
