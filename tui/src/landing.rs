//! The single-page landing view: hero, about, projects, and the contact form.

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use folio_engine::{App, ContactField, InputMode, SectionId, SubmissionStatus};

use crate::content::{self, PROJECTS};
use crate::doc::{Doc, wrap};
use crate::theme::{Palette, styles};

const MESSAGE_ROWS: usize = 4;

pub(crate) fn render(doc: &mut Doc, app: &App, palette: &Palette) {
    doc.section(SectionId::Home, |doc| hero(doc, palette));
    doc.section(SectionId::About, |doc| about(doc, palette));
    doc.section(SectionId::Projects, |doc| projects(doc, palette));
    doc.section(SectionId::Contact, |doc| contact(doc, app, palette));
}

fn hero(doc: &mut Doc, palette: &Palette) {
    doc.blank();
    doc.text(
        content::HERO_GREETING,
        Style::default()
            .fg(palette.accent)
            .add_modifier(Modifier::BOLD),
    );
    doc.blank();

    let headline = format!(
        "{} {} {}",
        content::HERO_HEADLINE,
        content::HERO_EMPHASIS,
        content::HERO_TAIL
    );
    if headline.width() <= doc.width() {
        doc.push(Line::from(vec![
            Span::styled(format!("{} ", content::HERO_HEADLINE), styles::heading(palette)),
            Span::styled(content::HERO_EMPHASIS, styles::title(palette)),
            Span::styled(format!(" {}", content::HERO_TAIL), styles::heading(palette)),
        ]));
    } else {
        doc.text(&headline, styles::heading(palette));
    }
    doc.blank();
    doc.text(content::HERO_BODY, Style::default().fg(palette.text_secondary));
    doc.blank();
    doc.text(content::HERO_DISCLAIMER, Style::default().fg(palette.warning));
    doc.blank();
    doc.push(Line::from(vec![
        Span::styled("→ ", styles::key_highlight(palette)),
        Span::styled(content::HERO_LINK, styles::link(palette)),
        Span::styled("  (press 2)", styles::muted(palette)),
    ]));
    doc.blank();
}

fn about(doc: &mut Doc, palette: &Palette) {
    doc.text("About Me", styles::title(palette));
    doc.blank();
    doc.text(content::ABOUT_BODY, styles::body(palette));
    doc.blank();
    doc.text(content::ABOUT_CLOSING, Style::default().fg(palette.text_secondary));
    doc.blank();
    doc.text("Core Skills", styles::heading(palette));
    for skill in content::CORE_SKILLS {
        doc.bullet("•", skill, styles::key_highlight(palette), styles::body(palette));
    }
    doc.blank();
}

fn projects(doc: &mut Doc, palette: &Palette) {
    doc.text("Projects", styles::title(palette));
    doc.blank();
    for project in &PROJECTS {
        doc.text(project.title, styles::heading(palette));
        doc.prefixed("  ", "  ", project.description, styles::body(palette), styles::body(palette));

        let mut tags = vec![Span::raw("  ")];
        for tech in project.tech {
            tags.push(Span::styled(format!(" {tech} "), styles::tag(palette)));
            tags.push(Span::raw(" "));
        }
        doc.push(Line::from(tags));
        doc.push(Line::from(vec![
            Span::styled("  Demo: ", styles::muted(palette)),
            Span::styled(project.demo_url, styles::link(palette)),
        ]));
        doc.push(Line::from(vec![
            Span::styled("  Code: ", styles::muted(palette)),
            Span::styled(project.repo_url, styles::link(palette)),
        ]));
        doc.blank();
    }
}

fn contact(doc: &mut Doc, app: &App, palette: &Palette) {
    let form = app.contact();
    let editing = app.input_mode() == InputMode::Contact;
    let focused = editing.then(|| app.contact_focus());

    doc.text(content::CONTACT_TITLE, styles::title(palette));
    doc.blank();

    let status = form.status();
    if let Some(banner) = status.banner() {
        let (glyph, color) = match status {
            SubmissionStatus::Success => ("✓ ", palette.success),
            _ => ("✗ ", palette.error),
        };
        let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
        doc.prefixed(glyph, "  ", banner, style, style);
        doc.blank();
    }

    for field in ContactField::ALL {
        input_field(doc, field, form.draft().get(field), focused == Some(field), palette);
        doc.blank();
    }

    let label = if status == SubmissionStatus::Sending {
        "Sending..."
    } else {
        "Send Message"
    };
    let button_style = if app.can_submit() {
        Style::default()
            .fg(palette.bg)
            .bg(palette.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text_muted).bg(palette.bg_highlight)
    };
    doc.push(Line::from(vec![
        Span::raw("  "),
        Span::styled(format!(" {label} "), button_style),
    ]));

    if !app.session_state().is_ready() {
        doc.text(content::CONNECTING, styles::muted(palette));
    }

    let hint = if editing {
        "Tab next field · Enter on Message adds a line · Ctrl-S send · Esc done"
    } else {
        "Press c to write a message"
    };
    doc.text(hint, styles::key_hint(palette));
    doc.blank();
}

fn input_field(doc: &mut Doc, field: ContactField, value: &str, focused: bool, palette: &Palette) {
    let label_style = if focused {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(palette.text_secondary)
    };
    doc.text(field.label(), label_style);

    let inner = doc.width().saturating_sub(5);
    let mut rows = wrap(value, inner);
    // Cursor sits after the last character typed, not after padding rows.
    let cursor_row = rows.len().saturating_sub(1);
    if field == ContactField::Message {
        while rows.len() < MESSAGE_ROWS {
            rows.push(String::new());
        }
    }

    let bar = Style::default().fg(if focused { palette.accent } else { palette.border });
    let text = Style::default().fg(palette.text_primary).bg(palette.bg_panel);
    for (i, row) in rows.into_iter().enumerate() {
        let pad = inner.saturating_sub(row.width());
        let mut spans = vec![Span::styled("  ▌", bar), Span::styled(row, text)];
        if focused && i == cursor_row {
            spans.push(Span::styled("█", Style::default().fg(palette.accent).bg(palette.bg_panel)));
            spans.push(Span::styled(" ".repeat(pad.saturating_sub(1)), text));
        } else {
            spans.push(Span::styled(" ".repeat(pad), text));
        }
        doc.push(Line::from(spans));
    }
}
