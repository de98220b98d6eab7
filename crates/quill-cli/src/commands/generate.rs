//! Generate command handler

use anyhow::{bail, Result};

use quill_core::{Config, Generator};

use crate::output::{Output, OutputFormat};

/// Generate content from a prompt and print it
pub async fn run(prompt: Vec<String>, config: &Config, output: &Output) -> Result<()> {
    let prompt = prompt.join(" ");
    if prompt.trim().is_empty() {
        bail!("Prompt is required. Usage: quill generate <prompt>");
    }

    let generator = Generator::from_config(config)?;

    output.message("Generating...");
    let text = generator.generate(&prompt).await?;

    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "text": text }));
        }
        _ => println!("{}", text),
    }

    Ok(())
}
