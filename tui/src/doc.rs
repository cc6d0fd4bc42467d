//! Pre-wrapped page content.
//!
//! Pages are laid out into terminal rows before rendering so that section
//! offsets are exact and scrolling is measured in rows, not logical lines.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use folio_engine::{SectionId, SectionSpan};

/// Greedy word wrap to `width` display columns.
///
/// Explicit newlines always break. Lines that already fit are kept verbatim,
/// including leading indentation. Words wider than a row are split.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut rows = Vec::new();
    for raw in text.split('\n') {
        if raw.width() <= width {
            rows.push(raw.to_string());
            continue;
        }
        let mut row = String::new();
        let mut row_width = 0;
        for word in raw.split(' ') {
            let word_width = word.width();
            if row_width > 0 && row_width + 1 + word_width > width {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            if word_width > width {
                for c in word.chars() {
                    let char_width = c.width().unwrap_or(0);
                    if row_width > 0 && row_width + char_width > width {
                        rows.push(std::mem::take(&mut row));
                        row_width = 0;
                    }
                    row.push(c);
                    row_width += char_width;
                }
                continue;
            }
            if row_width > 0 {
                row.push(' ');
                row_width += 1;
            }
            row.push_str(word);
            row_width += word_width;
        }
        rows.push(row);
    }
    rows
}

pub(crate) fn truncate_with_ellipsis(raw: &str, max: usize) -> String {
    if raw.width() <= max {
        return raw.to_string();
    }
    let budget = max.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for c in raw.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

/// Row-oriented content builder that records where sections start.
#[derive(Debug)]
pub(crate) struct Doc {
    width: usize,
    lines: Vec<Line<'static>>,
    spans: Vec<SectionSpan>,
}

impl Doc {
    pub(crate) fn new(width: u16) -> Self {
        Self {
            width: usize::from(width.max(1)),
            lines: Vec::new(),
            spans: Vec::new(),
        }
    }

    pub(crate) fn width(&self) -> usize {
        self.width
    }

    pub(crate) fn rows(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }

    pub(crate) fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    /// Push a line that is already known to fit.
    pub(crate) fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    pub(crate) fn text(&mut self, text: &str, style: Style) {
        self.prefixed("", "", text, style, style);
    }

    /// Wrap `text` behind a first-row prefix, continuing under `rest`.
    pub(crate) fn prefixed(
        &mut self,
        first: &str,
        rest: &str,
        text: &str,
        prefix_style: Style,
        style: Style,
    ) {
        let indent = first.width().max(rest.width());
        for (i, row) in wrap(text, self.width.saturating_sub(indent))
            .into_iter()
            .enumerate()
        {
            let prefix = if i == 0 { first } else { rest };
            let mut spans = Vec::with_capacity(2);
            if !prefix.is_empty() {
                spans.push(Span::styled(prefix.to_string(), prefix_style));
            }
            spans.push(Span::styled(row, style));
            self.lines.push(Line::from(spans));
        }
    }

    pub(crate) fn bullet(&mut self, bullet: &str, text: &str, bullet_style: Style, style: Style) {
        let first = format!("  {bullet} ");
        let rest = " ".repeat(first.width());
        self.prefixed(&first, &rest, text, bullet_style, style);
    }

    /// Code is indented and padded to the content width so the background
    /// reads as a block.
    pub(crate) fn code(&mut self, text: &str, style: Style) {
        let inner = self.width.saturating_sub(4);
        for row in wrap(text, inner) {
            let pad = inner.saturating_sub(row.width());
            self.lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!(" {row}{} ", " ".repeat(pad)), style),
            ]));
        }
    }

    /// Record the rows produced by `build` as `section`.
    pub(crate) fn section(&mut self, section: SectionId, build: impl FnOnce(&mut Self)) {
        let start = self.rows();
        build(self);
        self.spans.push(SectionSpan {
            section,
            start,
            height: self.rows().saturating_sub(start),
        });
    }

    pub(crate) fn finish(self) -> (Vec<Line<'static>>, Vec<SectionSpan>) {
        (self.lines, self.spans)
    }
}
