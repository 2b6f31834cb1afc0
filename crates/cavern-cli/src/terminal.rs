//! A presentation sink that renders the story on a terminal.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use async_trait::async_trait;
use colored::Colorize;

use cavern_core::{ChoiceView, PresentationSink};

/// Per-character delay of the typing effect.
pub const DEFAULT_TYPING_DELAY: Duration = Duration::from_millis(10);

/// Renders narration with a typing effect and reads confirmations from stdin.
///
/// Choices are shown one-based; the play loop maps them back.
pub struct TerminalSink {
    typing_delay: Duration,
}

impl TerminalSink {
    pub fn new(typing_delay: Duration) -> Self {
        Self { typing_delay }
    }
}

/// Read one trimmed line from stdin. `None` on end of input.
pub fn read_input() -> Option<String> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

#[async_trait(?Send)]
impl PresentationSink for TerminalSink {
    async fn present_text(&mut self, text: &str) {
        let mut out = io::stdout();
        if self.typing_delay.is_zero() {
            let _ = writeln!(out, "{text}\n");
            return;
        }
        for ch in text.chars() {
            let _ = write!(out, "{ch}");
            let _ = out.flush();
            tokio::time::sleep(self.typing_delay).await;
        }
        let _ = writeln!(out, "\n");
    }

    fn present_choices(&mut self, choices: &[ChoiceView]) {
        for choice in choices {
            println!("  {} {}", format!("[{}]", choice.index + 1).bold(), choice.label);
        }
        println!();
    }

    fn set_backdrop(&mut self, backdrop: &str) {
        println!("{}", format!("~ {backdrop} ~").dimmed());
    }

    fn present_ending(&mut self, title: &str, message: &str, backdrop: &str) {
        println!("{}", format!("~ {backdrop} ~").dimmed());
        println!();
        println!("  {}", title.bold());
        println!("  {message}");
        println!();
    }

    fn notify(&mut self, message: &str) {
        println!("  {}", format!("» {message}").yellow());
    }

    async fn request_confirmation(&mut self, prompt: &str) -> bool {
        print!("  {} {} ", prompt.cyan(), "[y/N]".dimmed());
        let _ = io::stdout().flush();
        read_input().is_some_and(|a| matches!(a.to_lowercase().as_str(), "y" | "yes"))
    }

    fn play_audio(&mut self, cue: &str) {
        println!("  {}", format!("(♪ {cue})").dimmed());
    }
}
