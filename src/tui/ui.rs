//! UI rendering for TUI.

use super::app::{App, View};
use crate::model::Step;
use crate::render;
use ratatui::{
    prelude::*,
    symbols::border,
    widgets::{Block, Borders, Paragraph, Row, Table, Wrap},
};

const STEPS: [Step; 7] = [
    Step::UrlEntry,
    Step::Analyzing,
    Step::StrategySelection,
    Step::TopicGeneration,
    Step::ContentGeneration,
    Step::Editing,
    Step::Exporting,
];

fn post_status_style(status: &str) -> Style {
    match status {
        "exported" => Style::default().fg(Color::Green),
        "draft" => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    }
}

fn step_icon(reached: bool, current: bool) -> &'static str {
    if current {
        "◉"
    } else if reached {
        "●"
    } else {
        "○"
    }
}

fn breadcrumb(app: &App) -> String {
    match app.view {
        View::Dashboard => "Dashboard".to_string(),
        View::TopicList => "Dashboard > Topics".to_string(),
        View::PostList => "Dashboard > Posts".to_string(),
        View::ActivityList => "Dashboard > Activity".to_string(),
        View::PostDetail(idx) => app
            .posts
            .get(idx)
            .map(|p| format!("Dashboard > Posts > {}", p.title))
            .unwrap_or_else(|| "Dashboard > Posts".to_string()),
    }
}

fn header_status(app: &App) -> String {
    match app.view {
        View::Dashboard => {
            let account = app.account_email.as_deref().unwrap_or("anonymous");
            if app.demo {
                format!("{account} | demo")
            } else {
                account.to_string()
            }
        }
        View::TopicList | View::PostList | View::ActivityList => {
            let len = app.list_len();
            if len > 0 {
                format!("Sel {}/{}", app.selected + 1, len)
            } else {
                "Empty".to_string()
            }
        }
        _ => String::new(),
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(30)])
        .split(inner);

    let left = Paragraph::new(Line::from(vec![
        Span::styled("autoblog", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" "),
        Span::raw(breadcrumb(app)),
    ]))
    .alignment(Alignment::Left);

    let right = Paragraph::new(header_status(app)).alignment(Alignment::Right);

    frame.render_widget(left, chunks[0]);
    frame.render_widget(right, chunks[1]);
}

fn keybind_line(bindings: &[&str]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = vec![Span::raw(" ")];
    for chunk in bindings.chunks(2) {
        if chunk.len() == 2 {
            spans.push(Span::styled("[", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                chunk[0].to_string(),
                Style::default().fg(Color::Cyan).bold(),
            ));
            spans.push(Span::styled("] ", Style::default().fg(Color::DarkGray)));
            spans.push(Span::styled(
                format!("{}  ", chunk[1]),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    Line::from(spans)
}

fn draw_footer(frame: &mut Frame, area: Rect, bindings: &[&str]) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let left = Paragraph::new(keybind_line(bindings)).alignment(Alignment::Center);
    frame.render_widget(left, inner);
}

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Content
            Constraint::Length(3), // Footer
        ])
        .split(area);

    draw_header(frame, app, chunks[0]);

    let bindings: &[&str] = match app.view {
        View::Dashboard => &[
            "1/t", "Topics", "2/p", "Posts", "3/a", "Activity", "q", "Quit",
        ],
        View::TopicList | View::PostList | View::ActivityList => &[
            "j/k", "Navigate", "Enter", "View", "Esc", "Back", "g/G", "Jump", "q", "Quit",
        ],
        View::PostDetail(_) => &["j/k", "Scroll", "Esc", "Back", "q", "Quit"],
    };

    match app.view {
        View::Dashboard => draw_dashboard(frame, app, chunks[1]),
        View::TopicList => draw_topic_list(frame, app, chunks[1]),
        View::PostList => draw_post_list(frame, app, chunks[1]),
        View::ActivityList => draw_activity_list(frame, app, chunks[1]),
        View::PostDetail(idx) => draw_post_detail(frame, app, idx, chunks[1]),
    }

    draw_footer(frame, chunks[2], bindings);
}

fn draw_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(3)])
        .split(area);

    // Wizard progress panel
    let current = app.state.current_step;
    let mut lines: Vec<Line> = Vec::new();
    for step in STEPS {
        let reached = step <= current;
        let is_current = step == current;
        let style = if is_current {
            Style::default().fg(Color::Cyan).bold()
        } else if reached {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {} ", step_icon(reached, is_current)), style),
            Span::styled(step.as_ref().to_string(), style),
        ]));
    }
    let progress = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title(" Wizard "),
    );
    frame.render_widget(progress, chunks[0]);

    // Session summary panel
    let mut summary: Vec<Line> = Vec::new();
    if app.state.website_url.is_empty() {
        summary.push(Line::from(" No session. Run: autoblog analyze <url>"));
    } else {
        summary.push(Line::from(format!(" Website: {}", app.state.website_url)));
        if let Some(analysis) = &app.state.analysis {
            summary.push(Line::from(format!(
                " Business: {} ({})",
                analysis.business_name, analysis.business_type
            )));
        }
        if let Some(scenario) = app.state.selected_scenario() {
            summary.push(Line::from(format!(" Strategy: {}", scenario.title)));
        }
        if !app.state.generated_content.is_empty() {
            summary.push(Line::from(format!(
                " Article: {} words, {} min read",
                render::word_count(&app.state.generated_content),
                render::reading_time(&app.state.generated_content)
            )));
        }
        summary.push(Line::from(format!(
            " Post state: {}",
            app.state.post_state.as_ref()
        )));
    }
    summary.push(Line::from(format!(
        " Topics {} | Posts {} | Activity {}",
        app.state.topics.len(),
        app.posts.len(),
        app.activities.len()
    )));

    let session = Paragraph::new(summary)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .title(" Session "),
        );
    frame.render_widget(session, chunks[1]);
}

fn draw_topic_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app
        .state
        .topics
        .iter()
        .map(|t| {
            Row::new(vec![
                t.id.clone(),
                t.title.clone(),
                t.category.clone(),
                t.seo_benefit.clone(),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(24),
            Constraint::Length(18),
            Constraint::Min(18),
        ],
    )
    .header(
        Row::new(vec!["Topic", "Title", "Category", "SEO Benefit"])
            .style(Style::default().bold()),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title(" Topics "),
    );

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn draw_post_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app
        .posts
        .iter()
        .map(|p| {
            Row::new(vec![
                Span::raw(p.title.clone()),
                Span::raw(format!("v{}", p.version)),
                Span::styled(p.status.as_ref().to_string(), post_status_style(p.status.as_ref())),
                Span::raw(p.export_count.to_string()),
                Span::raw(p.updated_at.clone()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(24),
            Constraint::Length(5),
            Constraint::Length(10),
            Constraint::Length(8),
            Constraint::Length(26),
        ],
    )
    .header(
        Row::new(vec!["Title", "Ver", "Status", "Exports", "Updated"])
            .style(Style::default().bold()),
    )
    .row_highlight_style(Style::default().bg(Color::DarkGray))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_set(border::ROUNDED)
            .title(" Posts "),
    );

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn draw_activity_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows: Vec<Row> = app
        .activities
        .iter()
        .map(|a| Row::new(vec![a.event_type.clone(), a.timestamp.clone()]))
        .collect();

    let table = Table::new(rows, [Constraint::Min(24), Constraint::Length(30)])
        .header(Row::new(vec!["Event", "Timestamp"]).style(Style::default().bold()))
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .title(" Activity "),
        );

    frame.render_stateful_widget(table, area, &mut app.table_state);
}

fn draw_post_detail(frame: &mut Frame, app: &App, idx: usize, area: Rect) {
    let Some(post) = app.posts.get(idx) else {
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            post.title.clone(),
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(format!(
            "v{} | {} | exported {} times",
            post.version,
            post.status.as_ref(),
            post.export_count
        )),
        Line::from(""),
    ];
    for text_line in post.content.lines() {
        lines.push(Line::from(text_line.to_string()));
    }

    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .title(" Post "),
        );
    frame.render_widget(detail, area);
}
