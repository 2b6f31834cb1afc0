use std::path::Path;

use cavern_core::{Action, Branch, Outcome, SceneGraph, cave_story};

pub fn run(format: &str, output: Option<&Path>) -> Result<(), String> {
    let graph = cave_story().map_err(|e| format!("built-in story is broken: {e}"))?;

    let content = match format {
        "json" => graph
            .to_json()
            .map_err(|e| format!("JSON serialization error: {e}"))?,
        "markdown" | "md" => export_markdown(&graph),
        _ => {
            return Err(format!(
                "unsupported format: \"{format}\". Use: json, markdown"
            ));
        }
    };

    if let Some(path) = output {
        std::fs::write(path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported to {}", path.display());
    } else {
        println!("{content}");
    }

    Ok(())
}

fn export_markdown(graph: &SceneGraph) -> String {
    let mut out = String::from("# Cavern\n\n");
    out.push_str(&format!("Opening scene: `{}`\n\n", graph.opening()));

    for scene in graph.scenes() {
        out.push_str(&format!("## {}\n\n", scene.id));
        if let Some(ref backdrop) = scene.backdrop {
            out.push_str(&format!("*Backdrop: {backdrop}*\n\n"));
        }
        match scene.gate() {
            Some(gate) => {
                let items = gate.requires.items().join(", ");
                out.push_str(&format!("### With {items}\n\n"));
                push_branch(&mut out, &gate.success);
                out.push_str(&format!("### Without {items}\n\n"));
                push_branch(&mut out, &gate.failure);
            }
            None => {
                for branch in scene.branches() {
                    push_branch(&mut out, branch);
                }
            }
        }
    }
    out
}

fn push_branch(out: &mut String, branch: &Branch) {
    if !branch.text.is_empty() {
        out.push_str(&format!("{}\n\n", branch.text));
    }
    match &branch.outcome {
        Outcome::Choices(choices) => {
            for choice in choices {
                let mut line = format!("- **{}**", choice.label);
                if let Some(ref target) = choice.target {
                    line.push_str(&format!(" → `{target}`"));
                }
                for action in &choice.actions {
                    match action {
                        Action::Acquire { items } => {
                            line.push_str(&format!(" (takes {})", items.join(", ")))
                        }
                        Action::Discard { item } => line.push_str(&format!(" (drops {item})")),
                        Action::PlayAudio { .. } => {}
                    }
                }
                if let Some(ref prompt) = choice.confirmation {
                    line.push_str(&format!(" — asks: \"{prompt}\""));
                }
                out.push_str(&line);
                out.push('\n');
            }
            out.push('\n');
        }
        Outcome::Continue { target } => {
            out.push_str(&format!("*Continues to `{target}`.*\n\n"));
        }
        Outcome::Defeat {
            ending,
            title,
            message,
        } => match title {
            Some(title) => {
                out.push_str(&format!("*Ends in `{ending}`: {title}. {message}*\n\n"))
            }
            None => out.push_str(&format!("*Ends in `{ending}`: {message}*\n\n")),
        },
        Outcome::Ending(ending) => {
            out.push_str(&format!(
                "**{}** {} ({})\n\n",
                ending.title, ending.message, ending.kind
            ));
        }
    }
}
