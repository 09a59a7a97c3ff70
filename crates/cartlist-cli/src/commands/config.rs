//! Config command handlers

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use cartlist_core::Config;

use crate::output::{Output, OutputFormat};

/// Show current configuration
pub fn show(config_path: Option<&PathBuf>, output: &Output) -> Result<()> {
    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "share_label": config.share_label,
                    "log_file": config.log_file
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            let effective_path = config_path
                .cloned()
                .unwrap_or_else(Config::config_file_path);
            println!("Configuration:");
            println!("  data_dir:    {}", config.data_dir.display());
            println!("  share_label: {}", config.share_label);
            println!(
                "  log_file:    {}",
                config
                    .log_file
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| format!("(default: {})", config.log_path().display()))
            );
            println!();
            println!("Config file: {}", effective_path.display());
        }
    }

    Ok(())
}

/// Set a configuration value
pub fn set(
    key: String,
    value: String,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    let mut config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;

    apply(&mut config, &key, &value)?;

    // Save to the CLI-specified path or default
    let save_path = config_path
        .cloned()
        .unwrap_or_else(Config::config_file_path);
    save(&config, &save_path)?;

    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}

/// Change one field of the configuration
fn apply(config: &mut Config, key: &str, value: &str) -> Result<()> {
    match key {
        "data_dir" => {
            if value.trim().is_empty() {
                bail!("data_dir cannot be empty");
            }
            config.data_dir = value.into();
        }
        "share_label" => {
            if value.trim().is_empty() {
                bail!("share_label cannot be empty");
            }
            config.share_label = value.to_string();
        }
        "log_file" => {
            config.log_file = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.into())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: data_dir, share_label, log_file",
                key
            );
        }
    }
    Ok(())
}

fn save(config: &Config, path: &Path) -> Result<()> {
    config
        .save_to_path(path)
        .context("Failed to save configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "share_label", "Ostoslista").unwrap();
        assert_eq!(config.share_label, "Ostoslista");

        apply(&mut config, "data_dir", "/tmp/lists").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/lists"));

        apply(&mut config, "log_file", "/tmp/cartlist.log").unwrap();
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/cartlist.log")));
        apply(&mut config, "log_file", "none").unwrap();
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_apply_rejects_bad_input() {
        let mut config = Config::default();
        assert!(apply(&mut config, "sync_url", "ws://x").is_err());
        assert!(apply(&mut config, "share_label", "  ").is_err());
        assert_eq!(config.share_label, "Shopping list");
    }
}
