//! The boundary between the narrative engine and whatever renders it.

use std::collections::VecDeque;
use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

/// A choice as shown to the player: its position and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceView {
    /// Index to pass back to `select_choice`.
    pub index: usize,
    /// Button text.
    pub label: String,
}

/// Receives render commands from the engine.
///
/// The engine awaits [`present_text`](Self::present_text) before it offers
/// the choices or continuation that follow the text, so implementations that
/// reveal text progressively must only resolve once it is fully shown.
/// Implementations are driven from a single task and need not be `Send`.
#[async_trait(?Send)]
pub trait PresentationSink {
    /// Reveal narration. Resolves when the text is fully shown.
    async fn present_text(&mut self, text: &str);

    /// Offer choices to the player.
    fn present_choices(&mut self, choices: &[ChoiceView]);

    /// Switch the background.
    fn set_backdrop(&mut self, backdrop: &str);

    /// Show the end screen.
    fn present_ending(&mut self, title: &str, message: &str, backdrop: &str);

    /// Show a transient notification.
    fn notify(&mut self, message: &str);

    /// Ask the player to confirm. Resolves with their answer.
    async fn request_confirmation(&mut self, prompt: &str) -> bool;

    /// Play a sound cue. Fire and forget.
    fn play_audio(&mut self, _cue: &str) {}
}

/// One call the engine made on a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "directive", rename_all = "snake_case")]
pub enum Directive {
    /// `present_text`.
    Text {
        /// Narration.
        text: String,
    },
    /// `present_choices`.
    Choices {
        /// Offered choices.
        choices: Vec<ChoiceView>,
    },
    /// `set_backdrop`.
    Backdrop {
        /// Backdrop id.
        backdrop: String,
    },
    /// `present_ending`.
    Ending {
        /// Headline.
        title: String,
        /// Message.
        message: String,
        /// Backdrop id.
        backdrop: String,
    },
    /// `notify`.
    Notify {
        /// Notification text.
        message: String,
    },
    /// `request_confirmation`, with the answer given.
    Confirm {
        /// Prompt shown.
        prompt: String,
        /// Answer returned to the engine.
        answer: bool,
    },
    /// `play_audio`.
    Audio {
        /// Cue name.
        cue: String,
    },
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Text { text } => write!(f, "text: {text}"),
            Directive::Choices { choices } => {
                let labels: Vec<String> = choices
                    .iter()
                    .map(|c| format!("[{}] {}", c.index, c.label))
                    .collect();
                write!(f, "choices: {}", labels.join("  "))
            }
            Directive::Backdrop { backdrop } => write!(f, "backdrop: {backdrop}"),
            Directive::Ending {
                title,
                message,
                backdrop,
            } => write!(f, "ending: {title} / {message} ({backdrop})"),
            Directive::Notify { message } => write!(f, "notify: {message}"),
            Directive::Confirm { prompt, answer } => {
                write!(f, "confirm: {prompt} -> {}", if *answer { "yes" } else { "no" })
            }
            Directive::Audio { cue } => write!(f, "audio: {cue}"),
        }
    }
}

/// A sink that renders nothing and records every directive.
///
/// Text resolves immediately. Confirmations are answered from a scripted
/// queue, then from the default answer once the queue runs dry.
#[derive(Debug, Clone)]
pub struct HeadlessSink {
    directives: Vec<Directive>,
    answers: VecDeque<bool>,
    default_answer: bool,
}

impl Default for HeadlessSink {
    fn default() -> Self {
        Self {
            directives: Vec::new(),
            answers: VecDeque::new(),
            default_answer: true,
        }
    }
}

impl HeadlessSink {
    /// A sink that confirms everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue confirmation answers, consumed in order.
    pub fn with_answers(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.answers.extend(answers);
        self
    }

    /// Answer used once the scripted answers are exhausted.
    pub fn with_default_answer(mut self, answer: bool) -> Self {
        self.default_answer = answer;
        self
    }

    /// Queue one more confirmation answer.
    pub fn push_answer(&mut self, answer: bool) {
        self.answers.push_back(answer);
    }

    /// Everything recorded so far.
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Drain the recorded directives.
    pub fn take_directives(&mut self) -> Vec<Directive> {
        std::mem::take(&mut self.directives)
    }

    /// Notification messages, in order.
    pub fn notifications(&self) -> Vec<&str> {
        self.directives
            .iter()
            .filter_map(|d| match d {
                Directive::Notify { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Narration texts, in order.
    pub fn texts(&self) -> Vec<&str> {
        self.directives
            .iter()
            .filter_map(|d| match d {
                Directive::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// The most recently offered choices.
    pub fn last_choices(&self) -> Option<&[ChoiceView]> {
        self.directives.iter().rev().find_map(|d| match d {
            Directive::Choices { choices } => Some(choices.as_slice()),
            _ => None,
        })
    }

    /// The ending directive, if one was issued.
    pub fn ending(&self) -> Option<&Directive> {
        self.directives
            .iter()
            .find(|d| matches!(d, Directive::Ending { .. }))
    }
}

#[async_trait(?Send)]
impl PresentationSink for HeadlessSink {
    async fn present_text(&mut self, text: &str) {
        self.directives.push(Directive::Text {
            text: text.to_string(),
        });
    }

    fn present_choices(&mut self, choices: &[ChoiceView]) {
        self.directives.push(Directive::Choices {
            choices: choices.to_vec(),
        });
    }

    fn set_backdrop(&mut self, backdrop: &str) {
        self.directives.push(Directive::Backdrop {
            backdrop: backdrop.to_string(),
        });
    }

    fn present_ending(&mut self, title: &str, message: &str, backdrop: &str) {
        self.directives.push(Directive::Ending {
            title: title.to_string(),
            message: message.to_string(),
            backdrop: backdrop.to_string(),
        });
    }

    fn notify(&mut self, message: &str) {
        self.directives.push(Directive::Notify {
            message: message.to_string(),
        });
    }

    async fn request_confirmation(&mut self, prompt: &str) -> bool {
        let answer = self.answers.pop_front().unwrap_or(self.default_answer);
        self.directives.push(Directive::Confirm {
            prompt: prompt.to_string(),
            answer,
        });
        answer
    }

    fn play_audio(&mut self, cue: &str) {
        self.directives.push(Directive::Audio {
            cue: cue.to_string(),
        });
    }
}
