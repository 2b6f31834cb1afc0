//! The built-in story: a young man, a dark cave, and the lost ark.

use crate::condition::Condition;
use crate::error::GraphResult;
use crate::graph::SceneGraph;
use crate::scene::{Action, Branch, Choice, Ending, EndingKind, Gate, Outcome, Scene};

/// Scene ids of the built-in story.
pub mod ids {
    /// Opening narration.
    pub const OPENING: &str = "opening";
    /// First branch point: follow or ignore the whisper.
    pub const WHISPER: &str = "whisper";
    /// The old sage.
    pub const EXPLORE: &str = "explore";
    /// Venturing deeper after the sage.
    pub const NARRATION_AFTER_EXPLORE: &str = "narrationAfterExplore";
    /// Second branch point: passage or road.
    pub const CROSSROADS: &str = "crossroads";
    /// Torch-gated passage.
    pub const NARROW_PASSAGE: &str = "narrowPassage";
    /// Rope-gated road.
    pub const ROCKY_ROAD: &str = "rockyRoad";
    /// Ignoring the whisper.
    pub const IGNORE: &str = "ignore";
    /// The inscription on the wall.
    pub const INSCRIPTION: &str = "inscription";
    /// Walking on after the inscription.
    pub const NEXT_SCENE_IN_IGNORE_PATH: &str = "nextSceneInIgnorePath";
    /// Something follows in the dark.
    pub const CRITICAL_MOMENT: &str = "criticalMoment";
    /// Final branch point: the red eyes.
    pub const NOW_OR_NEVER: &str = "nowOrNever";
    /// Victory ending.
    pub const TREASURE_ENDING: &str = "treasureEnding";
    /// Survival ending.
    pub const ESCAPE_ENDING: &str = "escapeEnding";
    /// Defeat ending.
    pub const SAD_ENDING: &str = "sadEnding";
}

/// Items the built-in story gates on.
pub mod items {
    /// Lights the narrow passage. Found at the sage's.
    pub const TORCH: &str = "torch";
    /// Needed on the rocky road.
    pub const ROPE: &str = "rope";
}

/// Sound cues the built-in story triggers.
pub mod cues {
    /// Button click on branch-point choices.
    pub const BUTTON_CLICK: &str = "buttonClick";
    /// The old sage's recorded advice.
    pub const WISE_MAN_SAID: &str = "wiseManSaid";
}

use ids::*;

/// Headline of the end screen when a gate is failed.
const FALLEN_TITLE: &str = "You Died";

/// Build the built-in story graph.
pub fn cave_story() -> GraphResult<SceneGraph> {
    SceneGraph::new(OPENING, scenes())
}

fn branch_choice(label: &str, prompt: &str, target: &str) -> Choice {
    Choice::new(label)
        .with_confirmation(prompt)
        .with_action(Action::play_audio(cues::BUTTON_CLICK))
        .with_target(target)
}

fn go(label: &str, target: &str) -> Choice {
    Choice::new(label).with_target(target)
}

fn scenes() -> Vec<Scene> {
    vec![
        Scene::new(
            OPENING,
            "A young man wakes up in a dark cave, alone and disoriented. \
             The only thing he remembers is a mysterious map hidden in his pocket, \
             showing the way to a legendary treasure, the lost ark.",
            Outcome::Continue {
                target: WHISPER.into(),
            },
        )
        .with_backdrop("story"),
        Scene::new(
            WHISPER,
            "...A strange whisper is heard...",
            Outcome::Choices(vec![
                branch_choice(
                    "EXPLORE",
                    "Are you sure you want to explore the whisper?",
                    EXPLORE,
                ),
                branch_choice(
                    "IGNORE",
                    "Are you sure you want to ignore the whisper?",
                    IGNORE,
                ),
            ]),
        ),
        Scene::new(
            EXPLORE,
            "Following the whisper, he discovers an old sage who gives him a clue to the treasure. \
             The Old Sage: \"The wilderness is unforgiving. Learn to read the signs, \
             and you'll find your way.\"",
            Outcome::Choices(vec![
                Choice::new("Ask For Advice").with_action(Action::play_audio(cues::WISE_MAN_SAID)),
                go("Venture", NARRATION_AFTER_EXPLORE),
                Choice::new("Pick Up The Torch").with_action(Action::acquire(items::TORCH)),
            ]),
        )
        .with_backdrop("explore"),
        Scene::new(
            NARRATION_AFTER_EXPLORE,
            "A chill crept down his spine as the old man's words echoed. \
             Curiosity and dread warred within him. Drawn by the promise of treasure, \
             he ventured deeper into the ominous darkness.",
            Outcome::Continue {
                target: CROSSROADS.into(),
            },
        )
        .with_backdrop("narrationAfterExplore"),
        Scene::new(
            CROSSROADS,
            "...Squeeze through or crush your toes? That is the question....",
            Outcome::Choices(vec![
                branch_choice(
                    "The Narrow Passage",
                    "You need a torch to make it through the narrow passage!",
                    NARROW_PASSAGE,
                ),
                branch_choice(
                    "The Rocky Road",
                    "You need a rope to make it through The Rocky Road",
                    ROCKY_ROAD,
                ),
            ]),
        ),
        Scene::gated(
            NARROW_PASSAGE,
            Gate {
                requires: Condition::has_item(items::TORCH),
                success: Branch::new(
                    "You crawl into the narrow passage, breathing slowly to keep yourself calm. \
                     The walls are cold and sticky, and every movement feels difficult and \
                     claustrophobic. Suddenly you feel something touch your arm, a cluster of \
                     small, poisonous spiders. You flinch, but manage to stay calm enough to \
                     press on. When you finally reach the exit, you see an ancient stone with a \
                     clear carving: the final clue to the treasure!",
                    Outcome::Choices(vec![go("Discover The Treasure!", TREASURE_ENDING)]),
                ),
                failure: Branch::new(
                    "Without a torch, the narrow passage is too dark to navigate. \
                     You stumble, and the ground gives way beneath you.",
                    Outcome::Defeat {
                        ending: SAD_ENDING.into(),
                        title: Some(FALLEN_TITLE.into()),
                        message: "You couldn't make it through the narrow passage without a torch."
                            .into(),
                    },
                ),
            },
        )
        .with_backdrop("narrowPassage"),
        Scene::gated(
            ROCKY_ROAD,
            Gate {
                requires: Condition::has_item(items::ROPE),
                success: Branch::new(
                    "You choose the wider, rocky road, convinced that it is safer. \
                     The road slopes downwards and becomes increasingly uneven. Suddenly you hear \
                     a rumbling sound: pebbles and rocks start falling around you. You rush \
                     forward, but a large rock comes loose and blocks your way back. The ground \
                     shakes, and before you can react, you slip on the slippery rock. You grope \
                     for grip, but fall hard, the world disappearing in a moment of chaos and \
                     darkness.",
                    Outcome::Choices(vec![go("Continue your journey", TREASURE_ENDING)]),
                ),
                failure: Branch::new(
                    "The rocky road proves too treacherous without a rope to help you climb. \
                     You slip and fall to your death.",
                    Outcome::Defeat {
                        ending: SAD_ENDING.into(),
                        title: Some(FALLEN_TITLE.into()),
                        message: "Without the rope, you couldn't make it across the rocky road."
                            .into(),
                    },
                ),
            },
        )
        .with_backdrop("rockyRoad"),
        Scene::new(
            IGNORE,
            "While the faint whisper still echoes in the air, the character feels a chilly wind \
             sweep through the cave. Something makes you hesitate; following the whisper feels \
             dangerous, and maybe even unnecessary. He decides to ignore the sound, continues \
             forward, and finds a mysterious message on a wall.",
            Outcome::Choices(vec![
                go("Read The Scripture", INSCRIPTION),
                go("Continue", NEXT_SCENE_IN_IGNORE_PATH),
            ]),
        )
        .with_backdrop("ignore"),
        Scene::new(
            INSCRIPTION,
            "[As dark shadows move on the stone's surface, and echoes of lost voices fill the \
             air, look for the stone that doesn't belong. There, deep in the heart of the cave, \
             you will find the key to what is hidden]",
            Outcome::Choices(vec![go("Back", IGNORE)]),
        ),
        Scene::new(
            NEXT_SCENE_IN_IGNORE_PATH,
            "The player, unable to decipher the cryptic message, continues his journey. \
             The air grows colder, the shadows longer. As the path twists and turns, \
             uncertainty creeps in.",
            Outcome::Choices(vec![go("Keep Moving Forward", CRITICAL_MOMENT)]),
        )
        .with_backdrop("nextSceneInIgnorePath"),
        Scene::new(
            CRITICAL_MOMENT,
            "As the player ventures deeper, a chilling presence fills the air. \
             The darkness feels alive, as if something unseen trails behind. \
             They reach a spot where the walls are clawed with strange marks and unsettling \
             tracks, signs of recent visitors... or perhaps something far more menacing.",
            Outcome::Continue {
                target: NOW_OR_NEVER.into(),
            },
        )
        .with_backdrop("criticalMoment"),
        Scene::new(
            NOW_OR_NEVER,
            "The red eyes glowed in the darkness, freezing the young man in horror. \
             His heart pounded so fiercely, it felt ready to burst.",
            Outcome::Choices(vec![go("Leave The Cave", ESCAPE_ENDING)]),
        ),
        Scene::ending(
            TREASURE_ENDING,
            Ending::new(
                EndingKind::Victory,
                "Congratulations!",
                "You just found the legendary treasure!",
            ),
        ),
        Scene::ending(
            ESCAPE_ENDING,
            Ending::new(
                EndingKind::Survival,
                "Survived!",
                "You have successfully escaped the cave!",
            ),
        ),
        Scene::ending(
            SAD_ENDING,
            Ending::new(
                EndingKind::Defeat,
                "You Died!",
                "The rocky road turned out to be more treacherous than you could have ever \
                 imagined. The cave remains a mystery, and the treasure undiscovered.",
            ),
        ),
    ]
}
