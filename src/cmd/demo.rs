//! Demo-mode commands: the sticky gate-bypass flag.

use crate::config::Config;
use crate::diagnostic::Diagnostic;
use crate::session;
use crate::ui;

/// Enable or disable the sticky demo flag
pub fn set(config: &Config, enabled: bool) -> anyhow::Result<Vec<Diagnostic>> {
    session::set_demo_mode(config, enabled)?;
    if enabled {
        ui::success("Demo mode enabled: all gates are bypassed");
    } else {
        ui::success("Demo mode disabled");
    }
    Ok(vec![])
}

/// Show the effective demo state and where it comes from
pub fn status(config: &Config, demo_flag: bool) -> anyhow::Result<Vec<Diagnostic>> {
    let sticky = session::demo_mode(config);
    let effective = demo_flag || sticky;
    if effective {
        let source = if demo_flag { "--demo flag" } else { "sticky flag or environment" };
        ui::info(format!("Demo mode: on ({source})"));
    } else {
        ui::info("Demo mode: off");
    }
    Ok(vec![])
}
