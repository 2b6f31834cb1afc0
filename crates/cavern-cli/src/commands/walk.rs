use std::path::Path;

use serde::Serialize;

use cavern_core::{
    Directive, EngineConfig, GameState, HeadlessSink, InventoryStore, MemoryBackend,
    NarrativeEngine, Phase,
};

#[derive(Serialize)]
struct Transcript<'a> {
    directives: &'a [Directive],
    state: GameState,
}

pub fn run(
    story: Option<&Path>,
    choices: &[usize],
    items: &[String],
    decline_all: bool,
    json: bool,
) -> Result<(), String> {
    let graph = super::load_story(story)?;

    let mut store = InventoryStore::open(MemoryBackend::new());
    store.acquire(items.iter().map(String::as_str));

    let sink = HeadlessSink::new().with_default_answer(!decline_all);
    let mut engine = NarrativeEngine::new(graph, store, sink, EngineConfig::instant());

    super::runtime()?.block_on(async {
        engine.start().await.map_err(|e| e.to_string())?;
        for &index in choices {
            let scene = engine.current_scene().to_string();
            engine
                .select_choice(&scene, index)
                .await
                .map_err(|e| e.to_string())?;
        }
        Ok::<(), String>(())
    })?;

    let state = engine.state();
    if json {
        let transcript = Transcript {
            directives: engine.sink().directives(),
            state,
        };
        let out = serde_json::to_string_pretty(&transcript)
            .map_err(|e| format!("JSON serialization error: {e}"))?;
        println!("{out}");
    } else {
        for directive in engine.sink().directives() {
            println!("  {directive}");
        }
        println!();
        println!("  scene:     {}", state.scene);
        println!("  phase:     {}", describe_phase(&state));
        println!("  inventory: [{}]", state.inventory.items().join(", "));
    }

    Ok(())
}

fn describe_phase(state: &GameState) -> String {
    match state.phase {
        Phase::Idle => "idle".to_string(),
        Phase::Narrating => "narrating".to_string(),
        Phase::AwaitingChoice => "awaiting choice".to_string(),
        Phase::Finished(kind) => format!("finished ({kind})"),
    }
}
