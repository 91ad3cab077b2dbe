//! TUI module for the interactive dashboard.
//!
//! Read-only view over the wizard session, generated topics, saved posts,
//! and the activity log.

mod app;
mod event;
mod ui;

use crate::cmd;
use crate::config::Config;
use crate::session;
use crate::store;
use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

pub use app::App;

/// Run the TUI application
pub fn run(config: &Config, demo_flag: bool) -> Result<()> {
    // Load session data
    let auth = session::load_auth(config);
    let demo = demo_flag || session::demo_mode(config);
    let (state, _diags) = cmd::load_state(config, &auth);
    let user_id = auth.user_id();
    let posts = store::list_posts(config, user_id.as_deref());
    let activities = store::recent_activities(config, 100);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let account_email = auth.account.as_ref().map(|a| a.email.clone());
    let mut app = App::new(state, posts, activities, account_email, demo);

    // Run event loop
    let result = event::run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}
