use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use colored::Colorize;

use cavern_core::{EngineConfig, EngineError, FileBackend, NarrativeEngine};

use crate::terminal::{DEFAULT_TYPING_DELAY, TerminalSink, read_input};

type TerminalEngine = NarrativeEngine<TerminalSink, FileBackend>;

pub fn run(
    story: Option<&Path>,
    save_dir: &Path,
    profile: &str,
    fast: bool,
    restart: bool,
) -> Result<(), String> {
    let graph = super::load_story(story)?;
    let store = super::open_store(save_dir, profile);

    let (config, typing) = if fast {
        (EngineConfig::instant(), Duration::ZERO)
    } else {
        (EngineConfig::default(), DEFAULT_TYPING_DELAY)
    };
    let mut engine = NarrativeEngine::new(graph, store, TerminalSink::new(typing), config);

    super::runtime()?.block_on(async {
        if restart {
            engine.restart();
        }
        println!(
            "  {} Type a choice number, 'i' for inventory, 'r' to restart, 'q' to quit.\n",
            "Cavern".bold()
        );
        engine.start().await.map_err(|e| e.to_string())?;
        play_loop(&mut engine).await
    })
}

async fn play_loop(engine: &mut TerminalEngine) -> Result<(), String> {
    loop {
        if engine.is_finished() {
            if !play_again()? {
                break;
            }
            engine.restart();
            engine.start().await.map_err(|e| e.to_string())?;
            continue;
        }

        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        let Some(input) = read_input() else {
            break; // EOF
        };
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "q" | "quit" => break,
            "i" | "inventory" => {
                print_inventory(engine.inventory().items());
                continue;
            }
            "r" | "restart" => {
                engine.restart();
                engine.start().await.map_err(|e| e.to_string())?;
                continue;
            }
            _ => {}
        }

        let Some(index) = input.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) else {
            println!("{}\n", format!("not a choice: {input}").yellow());
            continue;
        };

        let scene = engine.current_scene().to_string();
        match engine.select_choice(&scene, index).await {
            Ok(_) => {}
            Err(e @ EngineError::ChoiceOutOfRange { .. }) => {
                println!("{}\n", e.to_string().yellow());
            }
            Err(e) => return Err(e.to_string()),
        }
    }

    Ok(())
}

/// Offer a restart on the end screen. Anything but `r` quits.
fn play_again() -> Result<bool, String> {
    print!("  {} ", "Press 'r' to play again, 'q' to quit:".cyan());
    io::stdout().flush().map_err(|e| e.to_string())?;
    Ok(read_input().is_some_and(|a| matches!(a.to_lowercase().as_str(), "r" | "restart")))
}

fn print_inventory(items: &[String]) {
    if items.is_empty() {
        println!("  {}\n", "Your pockets are empty.".dimmed());
    } else {
        println!("  Inventory: {}\n", items.join(", "));
    }
}
