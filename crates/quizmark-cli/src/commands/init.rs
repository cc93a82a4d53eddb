//! The `quizmark init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("quizmark.toml").exists() {
        println!("quizmark.toml already exists, skipping.");
    } else {
        std::fs::write("quizmark.toml", SAMPLE_CONFIG)?;
        println!("Created quizmark.toml");
    }

    println!("\nNext steps:");
    println!("  1. Set the feedback locale in quizmark.toml");
    println!("  2. Run: quizmark check --reference \"東京/とうきょう/Tokyo\"");
    println!("  3. Run: quizmark evaluate --reference \"東京/Tokyo\" --answer とうきょう");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizmark configuration

# Feedback language: "en" or "ja". QUIZMARK_LOCALE overrides this.
locale = "en"

# Output format for evaluate and batch: "text" or "json".
format = "text"
"#;
