//! The `quizmark check` command.

use anyhow::Result;

use quizmark_core::reference;

pub fn execute(reference_answer: &str) -> Result<()> {
    let candidates = reference::candidates(reference_answer);
    println!("Accepted variants ({}):", candidates.len());
    for candidate in &candidates {
        println!("  {candidate}");
    }

    let warnings = reference::lint(reference_answer);
    for w in &warnings {
        println!("WARNING: {w}");
    }

    if warnings.is_empty() {
        println!("Reference is clean.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
