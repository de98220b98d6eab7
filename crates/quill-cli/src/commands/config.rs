//! Config command handlers

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use quill_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(output: &Output) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "sync_url": config.sync_url,
                    "sync_enabled": config.sync_enabled,
                    "sync_api_key_set": config.sync_api_key.is_some(),
                    "generation_url": config.generation_url,
                    "generation_api_key_set": config.generation_api_key.is_some(),
                    "generation_model": config.generation_model
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            println!("Configuration ({})", Config::config_file_path().display());
            println!("  data_dir:           {}", config.data_dir.display());
            println!(
                "  sync_url:           {}",
                config.sync_url.as_deref().unwrap_or("(not set)")
            );
            println!("  sync_enabled:       {}", config.sync_enabled);
            println!(
                "  sync_api_key:       {}",
                if config.sync_api_key.is_some() {
                    "(set)"
                } else {
                    "(not set)"
                }
            );
            println!("  generation_url:     {}", config.generation_url);
            println!(
                "  generation_api_key: {}",
                if config.generation_api_key.is_some() {
                    "(set)"
                } else {
                    "(not set)"
                }
            );
            println!("  generation_model:   {}", config.generation_model);
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String, output: &Output) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    match key.as_str() {
        "data_dir" => config.data_dir = PathBuf::from(&value),
        "sync_url" => {
            config.sync_url = if value.is_empty() { None } else { Some(value) };
        }
        "sync_enabled" => {
            config.sync_enabled = value.eq_ignore_ascii_case("true") || value == "1";
        }
        "sync_api_key" => {
            config.sync_api_key = if value.is_empty() { None } else { Some(value) };
        }
        "generation_url" => config.generation_url = value,
        "generation_api_key" => {
            config.generation_api_key = if value.is_empty() { None } else { Some(value) };
        }
        "generation_model" => config.generation_model = value,
        _ => bail!(
            "Unknown configuration key: {}\n\
             Valid keys: data_dir, sync_url, sync_enabled, sync_api_key, \
             generation_url, generation_api_key, generation_model",
            key
        ),
    }

    config.save().context("Failed to save configuration")?;
    output.success(&format!("Set {}", key));

    Ok(())
}
