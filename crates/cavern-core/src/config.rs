//! Pacing configuration for the narrative engine.

use std::time::Duration;

/// Delay before an automatic continuation, matching the browser pacing.
pub const DEFAULT_CONTINUE_DELAY: Duration = Duration::from_millis(500);

/// Delay before a failed gate forces its ending.
pub const DEFAULT_DEFEAT_DELAY: Duration = Duration::from_millis(10);

/// Backdrop shown on the title screen.
pub const DEFAULT_TITLE_BACKDROP: &str = "startScreen";

/// Configuration for a narrative engine.
///
/// The delays only pace presentation; they never affect which scene is
/// reached. Headless runs use [`EngineConfig::instant`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Pause between a scene's narration and its automatic successor.
    pub continue_delay: Duration,
    /// Pause between a failure narration and the forced ending.
    pub defeat_delay: Duration,
    /// Backdrop set when the game is restarted.
    pub title_backdrop: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            continue_delay: DEFAULT_CONTINUE_DELAY,
            defeat_delay: DEFAULT_DEFEAT_DELAY,
            title_backdrop: DEFAULT_TITLE_BACKDROP.to_string(),
        }
    }
}

impl EngineConfig {
    /// A configuration with every pacing delay collapsed to zero.
    pub fn instant() -> Self {
        Self {
            continue_delay: Duration::ZERO,
            defeat_delay: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Set the automatic-continuation delay.
    pub fn with_continue_delay(mut self, delay: Duration) -> Self {
        self.continue_delay = delay;
        self
    }

    /// Set the forced-defeat delay.
    pub fn with_defeat_delay(mut self, delay: Duration) -> Self {
        self.defeat_delay = delay;
        self
    }

    /// Set the title-screen backdrop.
    pub fn with_title_backdrop(mut self, backdrop: impl Into<String>) -> Self {
        self.title_backdrop = backdrop.into();
        self
    }
}
