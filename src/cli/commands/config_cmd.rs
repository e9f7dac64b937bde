//! Configuration display command.

use std::path::Path;

use console::style;

use crate::config::{default_config_path, Settings};

/// Print the effective settings as TOML.
pub fn cmd_config_show(settings: &Settings, explicit: Option<&Path>) -> anyhow::Result<()> {
    let source = match explicit {
        Some(path) => path.display().to_string(),
        None => match default_config_path().filter(|p| p.exists()) {
            Some(path) => path.display().to_string(),
            None => "built-in defaults".to_string(),
        },
    };
    println!("{} {}", style("# Loaded from:").dim(), style(source).dim());
    print!("{}", settings.to_toml()?);
    Ok(())
}
