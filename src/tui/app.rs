//! Application state for TUI.

use crate::model::{ActivityRecord, SavedPost, WizardState};
use ratatui::widgets::TableState;

/// Current view in the TUI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    TopicList,
    PostList,
    ActivityList,
    PostDetail(usize),
}

/// Application state
pub struct App {
    /// Wizard session snapshot
    pub state: WizardState,
    /// Saved posts, newest first
    pub posts: Vec<SavedPost>,
    /// Recent activity records
    pub activities: Vec<ActivityRecord>,
    /// Logged-in account email, if any
    pub account_email: Option<String>,
    /// Effective demo-mode flag
    pub demo: bool,
    /// Current view
    pub view: View,
    /// Selected index in list views
    pub selected: usize,
    /// Table state for scrollable list views
    pub table_state: TableState,
    /// Scroll offset for detail views
    pub scroll: u16,
    /// Should quit
    pub should_quit: bool,
}

impl App {
    /// Create new app with loaded session data
    pub fn new(
        state: WizardState,
        posts: Vec<SavedPost>,
        activities: Vec<ActivityRecord>,
        account_email: Option<String>,
        demo: bool,
    ) -> Self {
        Self {
            state,
            posts,
            activities,
            account_email,
            demo,
            view: View::Dashboard,
            selected: 0,
            table_state: TableState::default().with_selected(Some(0)),
            scroll: 0,
            should_quit: false,
        }
    }

    /// Number of items in the current list view
    pub fn list_len(&self) -> usize {
        match self.view {
            View::TopicList => self.state.topics.len(),
            View::PostList => self.posts.len(),
            View::ActivityList => self.activities.len(),
            _ => 0,
        }
    }

    /// Move selection up
    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.table_state.select(Some(self.selected));
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        let len = self.list_len();
        if len > 0 && self.selected < len - 1 {
            self.selected += 1;
        }
        self.table_state.select(Some(self.selected));
    }

    /// Jump to first item in list
    pub fn select_top(&mut self) {
        self.selected = 0;
        self.table_state.select(Some(0));
    }

    /// Jump to last item in list
    pub fn select_bottom(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        self.selected = len - 1;
        self.table_state.select(Some(self.selected));
    }

    /// Enter detail view for selected item (posts only)
    pub fn enter_detail(&mut self) {
        if self.view == View::PostList && self.selected < self.posts.len() {
            self.view = View::PostDetail(self.selected);
            self.scroll = 0;
        }
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        self.view = match self.view {
            View::PostDetail(_) => View::PostList,
            View::TopicList | View::PostList | View::ActivityList => View::Dashboard,
            View::Dashboard => {
                self.should_quit = true;
                View::Dashboard
            }
        };
        self.scroll = 0;
    }

    /// Navigate to a specific view
    pub fn go_to(&mut self, view: View) {
        self.view = view;
        self.selected = 0;
        self.table_state = TableState::default().with_selected(Some(0));
        self.scroll = 0;
    }

    /// Scroll down in detail view
    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    /// Scroll up in detail view
    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }
}
