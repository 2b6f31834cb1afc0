use std::path::Path;

pub fn run(story: Option<&Path>) -> Result<(), String> {
    let graph = super::load_story(story)?;

    let gated = graph.scenes().filter(|s| s.gate().is_some()).count();
    let endings = graph.endings().count();

    println!("  All checks passed, opening at '{}'.", graph.opening());
    println!(
        "  {} scenes, {} gated, {} endings",
        graph.len(),
        gated,
        endings
    );

    Ok(())
}
