//! The static scene graph.
//!
//! A [`SceneGraph`] is built once, validated, and never mutated afterwards.
//! Validation rejects any table whose transitions could reach a scene id that
//! does not exist, so an unknown scene at runtime can only come from a caller
//! naming one directly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{GraphError, GraphResult};
use crate::scene::{Outcome, Scene, SceneBody, SceneId};

/// A validated, read-only table of scenes.
#[derive(Debug, Clone)]
pub struct SceneGraph {
    opening: SceneId,
    scenes: Vec<Scene>,
    index: HashMap<SceneId, usize>,
}

#[derive(Deserialize)]
struct StoryFile {
    opening: SceneId,
    scenes: Vec<Scene>,
}

#[derive(Serialize)]
struct StoryRef<'a> {
    opening: &'a str,
    scenes: &'a [Scene],
}

impl SceneGraph {
    /// Build and validate a graph.
    pub fn new(opening: impl Into<SceneId>, scenes: Vec<Scene>) -> GraphResult<Self> {
        let opening = opening.into();
        let mut index = HashMap::with_capacity(scenes.len());
        for (i, scene) in scenes.iter().enumerate() {
            if index.insert(scene.id.clone(), i).is_some() {
                return Err(GraphError::DuplicateScene(scene.id.clone()));
            }
        }
        if !index.contains_key(&opening) {
            return Err(GraphError::MissingOpening(opening));
        }

        let graph = Self {
            opening,
            scenes,
            index,
        };
        graph.validate()?;
        Ok(graph)
    }

    /// Parse and validate a JSON story file.
    pub fn from_json(json: &str) -> GraphResult<Self> {
        let file: StoryFile = serde_json::from_str(json)?;
        Self::new(file.opening, file.scenes)
    }

    /// Serialize the graph as a JSON story file.
    pub fn to_json(&self) -> GraphResult<String> {
        Ok(serde_json::to_string_pretty(&StoryRef {
            opening: &self.opening,
            scenes: &self.scenes,
        })?)
    }

    fn validate(&self) -> GraphResult<()> {
        for scene in &self.scenes {
            if let SceneBody::Gated(gate) = &scene.body {
                let items = gate.requires.items();
                if items.is_empty() {
                    return Err(GraphError::InvalidGate {
                        scene: scene.id.clone(),
                        reason: "gate does not test any item".to_string(),
                    });
                }
                if items.iter().any(|i| i.trim().is_empty()) {
                    return Err(GraphError::InvalidGate {
                        scene: scene.id.clone(),
                        reason: "empty item name".to_string(),
                    });
                }
            }

            for branch in scene.branches() {
                if let Outcome::Choices(choices) = &branch.outcome
                    && choices.is_empty()
                {
                    return Err(GraphError::EmptyChoices(scene.id.clone()));
                }
                for target in branch.outcome.targets() {
                    if !self.contains(target) {
                        return Err(GraphError::DanglingTarget {
                            from: scene.id.clone(),
                            target: target.to_string(),
                        });
                    }
                }
                if let Outcome::Defeat { ending, .. } = &branch.outcome
                    && !self.scenes[self.index[ending]].is_ending()
                {
                    return Err(GraphError::NotAnEnding {
                        from: scene.id.clone(),
                        target: ending.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Look up a scene by id.
    pub fn get(&self, id: &str) -> GraphResult<&Scene> {
        self.index
            .get(id)
            .map(|&i| &self.scenes[i])
            .ok_or_else(|| GraphError::UnknownScene(id.to_string()))
    }

    /// Whether a scene id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Id of the scene a new game starts in.
    pub fn opening(&self) -> &str {
        &self.opening
    }

    /// All scenes, in authoring order.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter()
    }

    /// Terminal scenes, in authoring order.
    pub fn endings(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.iter().filter(|s| s.is_ending())
    }

    /// Number of scenes.
    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    /// Whether the graph has no scenes. A validated graph never does.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::Condition;
    use crate::scene::{Branch, Choice, Ending, EndingKind, Gate};

    fn ending() -> Scene {
        Scene::ending("end", Ending::new(EndingKind::Victory, "Won", "You won."))
    }

    fn small_graph() -> SceneGraph {
        SceneGraph::new(
            "start",
            vec![
                Scene::new(
                    "start",
                    "Begin.",
                    Outcome::Continue {
                        target: "pick".into(),
                    },
                ),
                Scene::new(
                    "pick",
                    "",
                    Outcome::Choices(vec![Choice::new("Go").with_target("end")]),
                ),
                ending(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn lookup() {
        let graph = small_graph();
        assert_eq!(graph.opening(), "start");
        assert_eq!(graph.len(), 3);
        assert_eq!(graph.get("pick").unwrap().id, "pick");
        assert!(matches!(
            graph.get("cellar"),
            Err(GraphError::UnknownScene(ref id)) if id == "cellar"
        ));
    }

    #[test]
    fn endings_are_listed() {
        let graph = small_graph();
        let ids: Vec<_> = graph.endings().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["end"]);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = SceneGraph::new("end", vec![ending(), ending()]).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateScene(_)));
    }

    #[test]
    fn rejects_missing_opening() {
        let err = SceneGraph::new("start", vec![ending()]).unwrap_err();
        assert!(matches!(err, GraphError::MissingOpening(_)));
    }

    #[test]
    fn rejects_dangling_choice_target() {
        let err = SceneGraph::new(
            "start",
            vec![Scene::new(
                "start",
                "",
                Outcome::Choices(vec![Choice::new("Go").with_target("nowhere")]),
            )],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GraphError::DanglingTarget { ref target, .. } if target == "nowhere"
        ));
    }

    #[test]
    fn rejects_empty_choices() {
        let err = SceneGraph::new("start", vec![Scene::new("start", "", Outcome::Choices(vec![]))])
            .unwrap_err();
        assert!(matches!(err, GraphError::EmptyChoices(_)));
    }

    #[test]
    fn rejects_defeat_into_non_ending() {
        let err = SceneGraph::new(
            "start",
            vec![
                Scene::new(
                    "start",
                    "",
                    Outcome::Defeat {
                        ending: "other".into(),
                        title: None,
                        message: "dead".into(),
                    },
                ),
                Scene::new(
                    "other",
                    "",
                    Outcome::Continue {
                        target: "start".into(),
                    },
                ),
            ],
        )
        .unwrap_err();
        assert!(matches!(err, GraphError::NotAnEnding { .. }));
    }

    #[test]
    fn rejects_gate_without_item() {
        let gate = Gate {
            requires: Condition::Always,
            success: Branch::new(
                "",
                Outcome::Continue {
                    target: "end".into(),
                },
            ),
            failure: Branch::new(
                "",
                Outcome::Continue {
                    target: "end".into(),
                },
            ),
        };
        let err = SceneGraph::new("gate", vec![Scene::gated("gate", gate), ending()]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidGate { .. }));
    }

    #[test]
    fn json_roundtrip_keeps_order_and_opening() {
        let graph = small_graph();
        let json = graph.to_json().unwrap();
        let parsed = SceneGraph::from_json(&json).unwrap();
        assert_eq!(parsed.opening(), "start");
        let ids: Vec<_> = parsed.scenes().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["start", "pick", "end"]);
    }

    #[test]
    fn malformed_json_is_a_format_error() {
        let err = SceneGraph::from_json("{\"opening\": 3}").unwrap_err();
        assert!(matches!(err, GraphError::Format(_)));
    }
}
