//! The narrative state machine.
//!
//! `NarrativeEngine` owns the game state, evaluates gates against the
//! inventory, and drives a [`PresentationSink`]. Every scene's narration is
//! awaited before the choices, continuation, or ending that follow it are
//! issued.

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::graph::SceneGraph;
use crate::inventory::{Inventory, InventoryBackend, InventoryStore};
use crate::scene::{Action, Choice, EndingKind, Outcome, SceneId};
use crate::sink::{ChoiceView, PresentationSink};

/// Notification shown when a confirmed choice is taken.
pub const CONFIRMED_NOTICE: &str = "Path chosen";

/// Notification shown when a confirmation is declined.
pub const CANCELED_NOTICE: &str = "Action canceled";

/// Where the engine is within the current scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Not started, or restarted.
    Idle,
    /// Presenting a scene.
    Narrating,
    /// Choices are on offer.
    AwaitingChoice,
    /// An ending was reached.
    Finished(EndingKind),
}

/// A snapshot of everything the engine can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// Current scene.
    pub scene: SceneId,
    /// Current phase.
    pub phase: Phase,
    /// Inventory contents.
    pub inventory: Inventory,
}

/// What a choice selection led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceOutcome {
    /// The confirmation was declined; nothing changed.
    Canceled,
    /// The choice ran its actions and the scene stayed the same.
    Stayed,
    /// The choice moved the story on. Holds the scene the engine settled in.
    Transitioned {
        /// Scene after any automatic continuations.
        scene: SceneId,
    },
}

struct Step {
    target: SceneId,
    title: Option<String>,
    message: Option<String>,
}

/// Drives a story through a presentation sink.
pub struct NarrativeEngine<S, B>
where
    S: PresentationSink,
    B: InventoryBackend,
{
    graph: SceneGraph,
    inventory: InventoryStore<B>,
    sink: S,
    config: EngineConfig,
    scene: SceneId,
    phase: Phase,
    offered: Vec<Choice>,
}

impl<S, B> NarrativeEngine<S, B>
where
    S: PresentationSink,
    B: InventoryBackend,
{
    /// Create an idle engine positioned at the graph's opening scene.
    pub fn new(graph: SceneGraph, inventory: InventoryStore<B>, sink: S, config: EngineConfig) -> Self {
        let scene = graph.opening().to_string();
        Self {
            graph,
            inventory,
            sink,
            config,
            scene,
            phase: Phase::Idle,
            offered: Vec::new(),
        }
    }

    /// Begin the story at the opening scene.
    ///
    /// The inventory is kept as loaded; use [`restart`](Self::restart) to
    /// wipe it.
    pub async fn start(&mut self) -> EngineResult<()> {
        let opening = self.graph.opening().to_string();
        info!(opening = %opening, items = ?self.inventory.items(), "story started");
        self.enter_scene(&opening).await
    }

    /// Wipe the inventory and return to the title screen.
    pub fn restart(&mut self) {
        info!("story restarted");
        self.inventory.clear();
        self.scene = self.graph.opening().to_string();
        self.phase = Phase::Idle;
        self.offered.clear();
        self.sink.set_backdrop(&self.config.title_backdrop);
    }

    /// Enter a scene and follow automatic continuations until the story
    /// waits for a choice or ends.
    ///
    /// An unknown id is a broken story and is returned as
    /// [`EngineError::UnknownScene`] with the state untouched.
    pub async fn enter_scene(&mut self, id: &str) -> EngineResult<()> {
        let mut next = Some(Step {
            target: id.to_string(),
            title: None,
            message: None,
        });
        while let Some(step) = next.take() {
            next = self.step(step).await?;
        }
        Ok(())
    }

    async fn step(&mut self, step: Step) -> EngineResult<Option<Step>> {
        let scene = match self.graph.get(&step.target) {
            Ok(scene) => scene,
            Err(err) => {
                error!(scene = %step.target, from = %self.scene, "transition to unknown scene");
                return Err(err.into());
            }
        };
        debug!(scene = %scene.id, "entering scene");

        self.scene = scene.id.clone();
        self.phase = Phase::Narrating;
        self.offered.clear();

        let branch = scene.branch(self.inventory.inventory());
        let terminal = matches!(branch.outcome, Outcome::Ending(_));

        if !terminal && let Some(backdrop) = &scene.backdrop {
            self.sink.set_backdrop(backdrop);
        }
        if !branch.text.is_empty() {
            self.sink.present_text(&branch.text).await;
        }

        match &branch.outcome {
            Outcome::Choices(choices) => {
                self.sink.present_choices(&choice_views(choices));
                self.offered = choices.clone();
                self.phase = Phase::AwaitingChoice;
                Ok(None)
            }
            Outcome::Continue { target } => {
                pause(self.config.continue_delay).await;
                debug!(from = %scene.id, to = %target, "continuing");
                Ok(Some(Step {
                    target: target.clone(),
                    title: None,
                    message: None,
                }))
            }
            Outcome::Defeat {
                ending,
                title,
                message,
            } => {
                pause(self.config.defeat_delay).await;
                debug!(from = %scene.id, to = %ending, "gate failed, forcing ending");
                Ok(Some(Step {
                    target: ending.clone(),
                    title: title.clone(),
                    message: Some(message.clone()),
                }))
            }
            Outcome::Ending(ending) => {
                let backdrop = scene.backdrop.as_deref().unwrap_or(&scene.id);
                let title = step.title.as_deref().unwrap_or(&ending.title);
                let message = step.message.as_deref().unwrap_or(&ending.message);
                self.sink.present_ending(title, message, backdrop);
                self.phase = Phase::Finished(ending.kind);
                info!(scene = %scene.id, kind = %ending.kind, "story ended");
                Ok(None)
            }
        }
    }

    /// Take the choice at `index` in `scene_id`.
    ///
    /// Rejected selections (wrong scene, nothing on offer, index out of
    /// range) leave the state exactly as it was.
    pub async fn select_choice(&mut self, scene_id: &str, index: usize) -> EngineResult<ChoiceOutcome> {
        if scene_id != self.scene {
            return Err(EngineError::SceneMismatch {
                expected: self.scene.clone(),
                got: scene_id.to_string(),
            });
        }
        if self.phase != Phase::AwaitingChoice {
            return Err(EngineError::NotAwaitingChoice(self.scene.clone()));
        }
        let Some(choice) = self.offered.get(index).cloned() else {
            return Err(EngineError::ChoiceOutOfRange {
                scene: self.scene.clone(),
                index,
                available: self.offered.len(),
            });
        };
        debug!(scene = %self.scene, index, label = %choice.label, "choice selected");

        if let Some(prompt) = &choice.confirmation {
            if !self.sink.request_confirmation(prompt).await {
                debug!(scene = %self.scene, index, "choice canceled");
                self.sink.notify(CANCELED_NOTICE);
                return Ok(ChoiceOutcome::Canceled);
            }
            self.sink.notify(CONFIRMED_NOTICE);
        }

        self.run_actions(&choice.actions);

        match choice.target {
            Some(target) => {
                self.enter_scene(&target).await?;
                Ok(ChoiceOutcome::Transitioned {
                    scene: self.scene.clone(),
                })
            }
            None => {
                self.sink.present_choices(&choice_views(&self.offered));
                Ok(ChoiceOutcome::Stayed)
            }
        }
    }

    fn run_actions(&mut self, actions: &[Action]) {
        for action in actions {
            match action {
                Action::Acquire { items } => {
                    for item in self.inventory.acquire(items.iter().map(String::as_str)) {
                        self.sink.notify(&format!("{item} added to inventory!"));
                    }
                }
                Action::Discard { item } => {
                    self.inventory.remove(item);
                }
                Action::PlayAudio { cue } => self.sink.play_audio(cue),
            }
        }
    }

    /// A snapshot of the current state.
    pub fn state(&self) -> GameState {
        GameState {
            scene: self.scene.clone(),
            phase: self.phase,
            inventory: self.inventory.inventory().clone(),
        }
    }

    /// Current scene id.
    pub fn current_scene(&self) -> &str {
        &self.scene
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether an ending has been reached.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// The choices currently on offer.
    pub fn offered_choices(&self) -> Vec<ChoiceView> {
        choice_views(&self.offered)
    }

    /// The inventory store.
    pub fn inventory(&self) -> &InventoryStore<B> {
        &self.inventory
    }

    /// The scene graph.
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// The presentation sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }
}

fn choice_views(choices: &[Choice]) -> Vec<ChoiceView> {
    choices
        .iter()
        .enumerate()
        .map(|(index, c)| ChoiceView {
            index,
            label: c.label.clone(),
        })
        .collect()
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
