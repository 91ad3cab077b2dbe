//! Init command implementation.

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::ui;

/// Initialize the autoblog project layout
pub fn init_project(config: &Config, force: bool) -> anyhow::Result<Vec<Diagnostic>> {
    let config_path = config.paths.state_root.join("config.toml");

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use -f to overwrite)",
            config_path.display()
        );
    }

    let dirs = [&config.paths.state_root, &config.paths.exports_output];
    for dir in dirs {
        std::fs::create_dir_all(dir)?;
        ui::created_path(dir);
    }

    std::fs::write(&config_path, Config::default_toml())?;
    ui::created_path(&config_path);

    ui::success("Project initialized");
    ui::sub_info("Next: autoblog analyze <your-website-url>");
    Ok(vec![])
}
