use crate::core::config::{get_config_path, Config};
use crate::error::Result;

pub fn show_config(init: bool) -> Result<()> {
    let config_path = get_config_path()?;

    if init {
        if config_path.exists() {
            println!("Configuration already exists at {}", config_path.display());
            return Ok(());
        }
        let written = Config::default().save()?;
        println!("✅ Wrote default configuration to {}", written.display());
        return Ok(());
    }

    let config = Config::load()?;
    println!("Configuration file: {}", config_path.display());
    if !config_path.exists() {
        println!("  (not created yet, showing defaults; run 'quarkus-wizard config --init')");
    }
    println!();
    println!("{}", serde_json::to_string_pretty(&config)?);

    Ok(())
}
