//! TUI rendering and input handling for Folio.

mod content;
mod doc;
mod input;
mod landing;
mod pages;
mod theme;

pub use input::{InputPump, handle_events};
pub use theme::{Palette, palette, styles, theme_glyph};

use chrono::Datelike;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use folio_engine::{App, InputMode, NAV_ITEMS, Route, SectionId};

use self::doc::{Doc, truncate_with_ellipsis};

/// Main draw function
pub fn draw(frame: &mut Frame, app: &mut App) {
    let palette = palette(app.theme());
    let bg_block = Block::default().style(Style::default().bg(palette.bg));
    frame.render_widget(bg_block, frame.area());

    let footer_height = if app.session_identity().identity_id().is_some() {
        4
    } else {
        3
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Header
            Constraint::Min(1),                // Page
            Constraint::Length(footer_height), // Footer
            Constraint::Length(1),             // Status bar
        ])
        .split(frame.area());

    draw_header(frame, app, chunks[0], &palette);
    draw_page(frame, app, chunks[1], &palette);
    draw_footer(frame, app, chunks[2], &palette);
    draw_status_bar(frame, app, chunks[3], &palette);
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(area).inner(Margin {
        horizontal: 1,
        vertical: 0,
    });
    frame.render_widget(block, area);

    let mut nav = vec![
        Span::styled(content::BRAND, styles::title(palette)),
        Span::raw("   "),
    ];
    for item in &NAV_ITEMS {
        let style = if app.is_nav_active(item) {
            styles::nav_active(palette)
        } else {
            styles::nav_inactive(palette)
        };
        nav.push(Span::styled(item.hotkey.to_string(), styles::key_highlight(palette)));
        nav.push(Span::raw(" "));
        nav.push(Span::styled(item.label, style));
        nav.push(Span::raw("  "));
    }

    let second = if app.route() == Some(Route::Home) {
        let mut spans = Vec::new();
        for (i, section) in SectionId::ALL.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" · ", styles::muted(palette)));
            }
            let style = if app.active_section() == Some(section) {
                styles::nav_active(palette)
            } else {
                styles::muted(palette)
            };
            spans.push(Span::styled(section.label(), style));
        }
        Line::from(spans)
    } else {
        Line::from(Span::styled(app.path().to_string(), styles::muted(palette)))
    };

    frame.render_widget(Paragraph::new(vec![Line::from(nav), second]), inner);

    let toggle = Line::from(vec![
        Span::styled(theme_glyph(app.theme()), Style::default().fg(palette.warning)),
        Span::styled(" t", styles::key_hint(palette)),
    ]);
    frame.render_widget(Paragraph::new(toggle).alignment(Alignment::Right), inner);
}

fn draw_page(frame: &mut Frame, app: &mut App, area: Rect, palette: &Palette) {
    let inner = area.inner(Margin {
        horizontal: 2,
        vertical: 0,
    });
    let mut doc = Doc::new(inner.width);
    match app.route() {
        Some(Route::Home) => landing::render(&mut doc, app, palette),
        Some(Route::NotFound) => pages::not_found(&mut doc, app.path(), palette),
        Some(route) => {
            if let Some(page) = content::page(route) {
                pages::tutorial(&mut doc, page, palette);
            }
        }
        // Unmatched path without a not-found route: empty outlet.
        None => {}
    }

    let rows = doc.rows();
    let (lines, spans) = doc.finish();
    app.update_layout(&spans, rows, area.height);

    frame.render_widget(Paragraph::new(lines).scroll((app.scroll(), 0)), inner);

    if rows > area.height {
        let mut scrollbar_state = ScrollbarState::new(usize::from(rows - area.height))
            .position(usize::from(app.scroll()));
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .style(Style::default().fg(palette.border)),
            area,
            &mut scrollbar_state,
        );
    }
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let year = chrono::Local::now().year();
    let mut lines = vec![
        Line::from(vec![
            Span::styled("GitHub ", styles::muted(palette)),
            Span::styled(content::GITHUB_URL, styles::link(palette)),
            Span::raw("   "),
            Span::styled("LinkedIn ", styles::muted(palette)),
            Span::styled(content::LINKEDIN_URL, styles::link(palette)),
        ]),
        Line::from(Span::styled(
            format!("© {year} {} All rights reserved.", content::OWNER),
            styles::muted(palette),
        )),
    ];
    if let Some(uid) = app.session_identity().identity_id() {
        lines.push(Line::from(Span::styled(
            format!("User ID: {uid}"),
            Style::default().fg(palette.text_muted),
        )));
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let (label, color) = match app.input_mode() {
        InputMode::Normal => ("NORMAL", palette.text_secondary),
        InputMode::Contact => ("CONTACT", palette.success),
        InputMode::PathPrompt => ("GO TO", palette.warning),
    };
    let mode_style = Style::default()
        .fg(palette.bg)
        .bg(color)
        .add_modifier(Modifier::BOLD);

    let mut spans = vec![Span::styled(format!(" {label} "), mode_style), Span::raw(" ")];
    match app.input_mode() {
        InputMode::PathPrompt => {
            spans.push(Span::styled(
                app.path_prompt().to_string(),
                styles::body(palette),
            ));
            spans.push(Span::styled("█", Style::default().fg(palette.accent)));
            spans.push(Span::styled(
                "  Enter go · Esc cancel",
                styles::key_hint(palette),
            ));
        }
        InputMode::Contact => spans.push(Span::styled(
            "Tab field · Ctrl-S send · Esc done",
            styles::key_hint(palette),
        )),
        InputMode::Normal => {
            for (key, action) in [
                ("1-6", "pages"),
                ("/", "go to"),
                ("c", "contact"),
                ("t", "theme"),
                ("j/k", "scroll"),
                ("q", "quit"),
            ] {
                spans.push(Span::styled(key, styles::key_highlight(palette)));
                spans.push(Span::styled(format!(" {action}  "), styles::key_hint(palette)));
            }
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    let state = app.session_state();
    let connection = match state.session() {
        None => "connecting...".to_string(),
        Some(session) => match session.identity_id() {
            Some(uid) => format!("signed in {uid}"),
            None => "offline".to_string(),
        },
    };
    let width = usize::from(area.width / 3).max(8);
    frame.render_widget(
        Paragraph::new(Span::styled(
            truncate_with_ellipsis(&connection, width),
            styles::muted(palette),
        ))
        .alignment(Alignment::Right),
        area,
    );
}
