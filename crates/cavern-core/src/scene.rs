//! Scenes, branches, and choices that make up a story.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::inventory::Inventory;

/// Identifier of a scene in the graph.
pub type SceneId = String;

/// How a story ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingKind {
    /// The treasure was found.
    Victory,
    /// The player died.
    Defeat,
    /// The player got out alive without the treasure.
    Survival,
}

impl fmt::Display for EndingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndingKind::Victory => write!(f, "victory"),
            EndingKind::Defeat => write!(f, "defeat"),
            EndingKind::Survival => write!(f, "survival"),
        }
    }
}

/// The end screen of a terminal scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ending {
    /// Kind of ending.
    pub kind: EndingKind,
    /// Headline shown on the end screen.
    pub title: String,
    /// Message shown under the headline.
    pub message: String,
}

impl Ending {
    /// Create an ending.
    pub fn new(kind: EndingKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// A side effect run when a choice is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Add items to the inventory.
    Acquire {
        /// Items to add.
        items: Vec<String>,
    },
    /// Remove an item from the inventory.
    Discard {
        /// Item to remove.
        item: String,
    },
    /// Play a sound cue. Fire and forget.
    PlayAudio {
        /// Audio cue name.
        cue: String,
    },
}

impl Action {
    /// Acquire a single item.
    pub fn acquire(item: impl Into<String>) -> Self {
        Action::Acquire {
            items: vec![item.into()],
        }
    }

    /// Play a sound cue.
    pub fn play_audio(cue: impl Into<String>) -> Self {
        Action::PlayAudio { cue: cue.into() }
    }
}

/// A labeled option offered to the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Button text.
    pub label: String,
    /// Prompt the player must confirm before the choice takes effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<String>,
    /// Effects applied, in order, once the choice is taken.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<Action>,
    /// Scene entered afterwards. `None` keeps the player in the current scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<SceneId>,
}

impl Choice {
    /// Create a choice with no effects and no target.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            confirmation: None,
            actions: Vec::new(),
            target: None,
        }
    }

    /// Set the scene entered after this choice.
    pub fn with_target(mut self, scene: impl Into<SceneId>) -> Self {
        self.target = Some(scene.into());
        self
    }

    /// Require confirmation with the given prompt.
    pub fn with_confirmation(mut self, prompt: impl Into<String>) -> Self {
        self.confirmation = Some(prompt.into());
        self
    }

    /// Add an action.
    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    /// Whether the choice waits for a confirmation.
    pub fn requires_confirmation(&self) -> bool {
        self.confirmation.is_some()
    }
}

/// What happens once a branch's narration has been presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Offer these choices and wait.
    Choices(Vec<Choice>),
    /// Move on to another scene after a short pause.
    Continue {
        /// Successor scene.
        target: SceneId,
    },
    /// Force an ending after a short pause, replacing its message and
    /// optionally its title.
    Defeat {
        /// Terminal scene to show.
        ending: SceneId,
        /// Headline shown instead of the ending's own.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        /// Message shown instead of the ending's own.
        message: String,
    },
    /// This scene is terminal.
    Ending(Ending),
}

impl Outcome {
    /// Scene ids this outcome can lead to.
    pub fn targets(&self) -> Vec<&str> {
        match self {
            Outcome::Choices(choices) => choices
                .iter()
                .filter_map(|c| c.target.as_deref())
                .collect(),
            Outcome::Continue { target } => vec![target.as_str()],
            Outcome::Defeat { ending, .. } => vec![ending.as_str()],
            Outcome::Ending(_) => Vec::new(),
        }
    }
}

/// Narration plus the outcome that follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Narration to type out. May be empty.
    #[serde(default)]
    pub text: String,
    /// What follows the narration.
    pub outcome: Outcome,
}

impl Branch {
    /// Create a branch.
    pub fn new(text: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            text: text.into(),
            outcome,
        }
    }
}

/// Picks between two branches based on the inventory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate {
    /// Condition for the success branch.
    pub requires: Condition,
    /// Taken when the condition holds.
    pub success: Branch,
    /// Taken otherwise.
    pub failure: Branch,
}

/// The content of a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SceneBody {
    /// A single ungated branch.
    Fixed(Branch),
    /// Two branches selected by a gate.
    Gated(Gate),
}

/// A node of the story graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    /// Unique id.
    pub id: SceneId,
    /// Backdrop asset shown while this scene is active.
    ///
    /// `None` keeps whatever backdrop is already showing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backdrop: Option<String>,
    /// Narration and outcome(s).
    pub body: SceneBody,
}

impl Scene {
    /// An ungated scene.
    pub fn new(id: impl Into<SceneId>, text: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            id: id.into(),
            backdrop: None,
            body: SceneBody::Fixed(Branch::new(text, outcome)),
        }
    }

    /// A gated scene.
    pub fn gated(id: impl Into<SceneId>, gate: Gate) -> Self {
        Self {
            id: id.into(),
            backdrop: None,
            body: SceneBody::Gated(gate),
        }
    }

    /// A terminal scene whose backdrop shares its id.
    pub fn ending(id: impl Into<SceneId>, ending: Ending) -> Self {
        let id = id.into();
        Self {
            backdrop: Some(id.clone()),
            id,
            body: SceneBody::Fixed(Branch::new("", Outcome::Ending(ending))),
        }
    }

    /// Set the backdrop.
    pub fn with_backdrop(mut self, backdrop: impl Into<String>) -> Self {
        self.backdrop = Some(backdrop.into());
        self
    }

    /// The branch that applies for the given inventory.
    pub fn branch(&self, inventory: &Inventory) -> &Branch {
        match &self.body {
            SceneBody::Fixed(branch) => branch,
            SceneBody::Gated(gate) => {
                if gate.requires.evaluate(inventory) {
                    &gate.success
                } else {
                    &gate.failure
                }
            }
        }
    }

    /// The narration for the given inventory.
    pub fn text(&self, inventory: &Inventory) -> &str {
        &self.branch(inventory).text
    }

    /// Every branch of the scene, success first for gated scenes.
    pub fn branches(&self) -> Vec<&Branch> {
        match &self.body {
            SceneBody::Fixed(branch) => vec![branch],
            SceneBody::Gated(gate) => vec![&gate.success, &gate.failure],
        }
    }

    /// The gate, if any.
    pub fn gate(&self) -> Option<&Gate> {
        match &self.body {
            SceneBody::Gated(gate) => Some(gate),
            SceneBody::Fixed(_) => None,
        }
    }

    /// The choices offered for the given inventory, empty if none are.
    pub fn choices(&self, inventory: &Inventory) -> &[Choice] {
        match &self.branch(inventory).outcome {
            Outcome::Choices(choices) => choices,
            _ => &[],
        }
    }

    /// The ending of a terminal scene.
    pub fn ending_info(&self) -> Option<&Ending> {
        match &self.body {
            SceneBody::Fixed(Branch {
                outcome: Outcome::Ending(ending),
                ..
            }) => Some(ending),
            _ => None,
        }
    }

    /// Whether the scene is terminal.
    pub fn is_ending(&self) -> bool {
        self.ending_info().is_some()
    }

    /// Kind of ending, for terminal scenes.
    pub fn ending_kind(&self) -> Option<EndingKind> {
        self.ending_info().map(|e| e.kind)
    }

    /// All scene ids reachable in one step, across every branch.
    pub fn targets(&self) -> Vec<&str> {
        self.branches()
            .into_iter()
            .flat_map(|b| b.outcome.targets())
            .collect()
    }
}
