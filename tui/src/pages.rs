//! Tutorial pages and the not-found view.

use ratatui::style::Style;

use crate::content::{Block, Page};
use crate::doc::Doc;
use crate::theme::{Palette, styles};

pub(crate) fn tutorial(doc: &mut Doc, page: &Page, palette: &Palette) {
    doc.blank();
    doc.text(page.title, styles::title(palette));
    doc.blank();
    doc.text(page.intro, Style::default().fg(palette.text_secondary));

    for block in page.blocks {
        match block {
            Block::Heading(text) => {
                doc.blank();
                doc.text(text, styles::heading(palette));
            }
            Block::Para(text) => doc.text(text, styles::body(palette)),
            Block::Bullets(items) => {
                for item in *items {
                    doc.bullet("•", item, styles::key_highlight(palette), styles::body(palette));
                }
            }
            Block::Code(text) => doc.code(text, styles::code(palette)),
            Block::Tip(text) => {
                doc.prefixed(
                    "Tip: ",
                    "     ",
                    text,
                    styles::key_highlight(palette),
                    styles::muted(palette),
                );
            }
        }
    }
    doc.blank();
    doc.text("Press 1 to return home.", styles::key_hint(palette));
}

pub(crate) fn not_found(doc: &mut Doc, path: &str, palette: &Palette) {
    doc.blank();
    doc.text("404", styles::title(palette));
    doc.blank();
    doc.text(&format!("Nothing lives at {path}."), styles::body(palette));
    doc.blank();
    doc.text(
        "Press 1 to return home, or / to enter another path.",
        styles::key_hint(palette),
    );
}
