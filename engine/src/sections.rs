//! Which landing-page section is "in view".
//!
//! Selection is a pure function of the current visibility set: sections at
//! or above [`VISIBILITY_THRESHOLD`] qualify, the highest ratio wins, ties go
//! to the earlier section. With no qualifier the previous pick stands.

use folio_types::SectionId;

pub const VISIBILITY_THRESHOLD: f64 = 0.5;

/// Rows a section occupies in the landing page's content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub section: SectionId,
    pub start: u16,
    pub height: u16,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionVisibility {
    pub section: SectionId,
    pub ratio: f64,
}

/// Fraction of each span inside the viewport `[scroll, scroll + rows)`.
#[must_use]
pub fn visibility(spans: &[SectionSpan], scroll: u16, viewport_rows: u16) -> Vec<SectionVisibility> {
    let top = u32::from(scroll);
    let bottom = top + u32::from(viewport_rows);
    spans
        .iter()
        .filter(|span| span.height > 0)
        .map(|span| {
            let start = u32::from(span.start);
            let end = start + u32::from(span.height);
            let visible = end.min(bottom).saturating_sub(start.max(top));
            SectionVisibility {
                section: span.section,
                ratio: f64::from(visible) / f64::from(span.height),
            }
        })
        .collect()
}

#[must_use]
pub fn active_section(
    visible: &[SectionVisibility],
    previous: Option<SectionId>,
) -> Option<SectionId> {
    visible
        .iter()
        .filter(|v| v.ratio >= VISIBILITY_THRESHOLD)
        .min_by(|a, b| {
            b.ratio
                .total_cmp(&a.ratio)
                .then_with(|| a.section.document_order().cmp(&b.section.document_order()))
        })
        .map(|v| v.section)
        .or(previous)
}

/// Observation lifecycle for the landing page.
#[derive(Debug, Clone, Default)]
pub struct SectionTracker {
    observing: bool,
    active: Option<SectionId>,
}

impl SectionTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start observing. The first section is active until something else
    /// qualifies.
    pub fn mount(&mut self) {
        if !self.observing {
            self.observing = true;
            self.active = Some(SectionId::Home);
        }
    }

    /// Stop observing and forget the selection.
    pub fn unmount(&mut self) {
        self.observing = false;
        self.active = None;
    }

    #[must_use]
    pub fn is_observing(&self) -> bool {
        self.observing
    }

    #[must_use]
    pub fn active(&self) -> Option<SectionId> {
        self.active
    }

    /// Recompute from the latest layout. Ignored while unmounted.
    pub fn observe(&mut self, spans: &[SectionSpan], scroll: u16, viewport_rows: u16) {
        if !self.observing {
            return;
        }
        let visible = visibility(spans, scroll, viewport_rows);
        self.active = active_section(&visible, self.active);
    }
}
