use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use cavern_core::{EndingKind, Outcome, Scene};

pub fn run(story: Option<&Path>) -> Result<(), String> {
    let graph = super::load_story(story)?;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Scene", "Backdrop", "Gate", "Kind", "Leads to"]);

    for scene in graph.scenes() {
        let backdrop = scene.backdrop.as_deref().unwrap_or("—");
        let gate = scene
            .gate()
            .map(|g| g.requires.items().join(" + "))
            .unwrap_or_else(|| "—".to_string());
        let targets = super::describe_targets(&dedup(scene.targets()));
        table.add_row(vec![
            scene.id.as_str(),
            backdrop,
            gate.as_str(),
            kind(scene),
            targets.as_str(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} scenes, opening at '{}'", graph.len(), graph.opening());

    Ok(())
}

fn kind(scene: &Scene) -> &'static str {
    if let Some(kind) = scene.ending_kind() {
        return match kind {
            EndingKind::Victory => "ending (victory)",
            EndingKind::Defeat => "ending (defeat)",
            EndingKind::Survival => "ending (survival)",
        };
    }
    if scene.gate().is_some() {
        return "gated";
    }
    match scene.branches().first().map(|b| &b.outcome) {
        Some(Outcome::Continue { .. }) => "narration",
        _ => "choice",
    }
}

fn dedup(targets: Vec<&str>) -> Vec<&str> {
    let mut out: Vec<&str> = Vec::with_capacity(targets.len());
    for t in targets {
        if !out.contains(&t) {
            out.push(t);
        }
    }
    out
}
