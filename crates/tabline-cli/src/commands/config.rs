use anyhow::{Context, Result};

use tabline_core::AppConfig;

/// Print the effective configuration, or write the default file with
/// `--init`.
pub fn run(config: &AppConfig, init: bool) -> Result<()> {
    if init {
        let path = AppConfig::config_path();
        if path.exists() {
            println!("Config file already exists at {}", path.display());
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        std::fs::write(&path, AppConfig::default().to_toml()?)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Wrote default config to {}", path.display());
    } else {
        print!("{}", config.to_toml()?);
    }
    Ok(())
}
