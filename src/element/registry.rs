use std::collections::HashMap;

use crate::element::model::{GlassElement, GlassId};

/// Maximum number of elements visible to the pixel pipeline in one frame.
pub const MAX_ACTIVE_ELEMENTS: usize = 10;

/// Monotonically increasing token that advances whenever the active set, or a parameter of one
/// of its elements, changes beyond tolerance.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct Revision(pub u64);

impl Revision {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// What [`GlassRegistry::report`] did with a reported element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportOutcome {
    /// First report of this id; appended to the active list.
    Inserted,
    /// Known id whose attributes moved beyond tolerance; replaced in place.
    Replaced,
    /// Known id within tolerance of the stored snapshot; left untouched.
    Unchanged,
}

impl ReportOutcome {
    /// Return `true` when the report changed the stored element.
    pub fn is_change(self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Per-frame bookkeeping of the live glass regions.
///
/// Elements live in a dense arena in registration order, with an id index on the side. Each
/// frame the host layout pass reports every region it placed; [`GlassRegistry::end_frame`]
/// then drops whatever was not reported. There is no expiry timer: "not seen this frame" means
/// "gone after this frame's cleanup".
///
/// Single writer (layout phase), single reader (render phase): the only read access is the
/// borrowed [`Snapshot`], so the borrow checker keeps the two phases apart.
#[derive(Debug, Default)]
pub struct GlassRegistry {
    elements: Vec<GlassElement>,
    seen: Vec<bool>,
    index_by_id: HashMap<GlassId, usize>,
    revision: Revision,
}

impl GlassRegistry {
    /// Create an empty registry at revision 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert one element and mark its id as seen this frame.
    ///
    /// Inserts always advance the revision, since they change the dropped count. Replacing an
    /// element that sits beyond [`MAX_ACTIVE_ELEMENTS`] does not, because no packed slot holds it.
    pub fn report(&mut self, element: GlassElement) -> ReportOutcome {
        let outcome = match self.index_by_id.get(&element.id).copied() {
            None => {
                let idx = self.elements.len();
                self.elements.push(element);
                self.seen.push(true);
                self.index_by_id.insert(element.id, idx);
                if self.elements.len() == MAX_ACTIVE_ELEMENTS + 1 {
                    tracing::warn!(
                        max = MAX_ACTIVE_ELEMENTS,
                        dropped_from = %element.id,
                        "glass element cap exceeded; later registrations are not rendered"
                    );
                }
                ReportOutcome::Inserted
            }
            Some(idx) => {
                self.seen[idx] = true;
                if self.elements[idx].equals_with_tolerance(&element) {
                    ReportOutcome::Unchanged
                } else {
                    self.elements[idx] = element;
                    if idx >= MAX_ACTIVE_ELEMENTS {
                        tracing::trace!(id = %element.id, "replaced glass element beyond the cap");
                        return ReportOutcome::Replaced;
                    }
                    ReportOutcome::Replaced
                }
            }
        };

        if outcome.is_change() {
            self.bump(outcome_label(outcome));
        }
        outcome
    }

    /// Drop every element not reported since the previous call and reset the seen marks.
    ///
    /// Returns the number of removed elements.
    pub fn end_frame(&mut self) -> usize {
        let before = self.elements.len();
        if self.seen.iter().any(|s| !s) {
            let mut keep = self.seen.iter().copied();
            self.elements.retain(|_| keep.next().unwrap_or(false));
            self.rebuild_index();
        }
        let removed = before - self.elements.len();

        self.seen.clear();
        self.seen.resize(self.elements.len(), false);

        if removed > 0 {
            self.bump("removed");
        }
        removed
    }

    /// Read-only view of the active list for the render phase.
    ///
    /// At most [`MAX_ACTIVE_ELEMENTS`] elements are exposed, the first ones in registration
    /// order. The remainder stays tracked and becomes visible when earlier elements go away.
    pub fn snapshot(&self) -> Snapshot<'_> {
        let visible = self.elements.len().min(MAX_ACTIVE_ELEMENTS);
        Snapshot {
            elements: &self.elements[..visible],
            total: self.elements.len(),
            revision: self.revision,
        }
    }

    /// Current revision token.
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Look up a tracked element.
    pub fn get(&self, id: GlassId) -> Option<&GlassElement> {
        self.index_by_id.get(&id).map(|&idx| &self.elements[idx])
    }

    /// Number of tracked elements, including those beyond the visibility cap.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Return `true` when nothing is tracked.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Forget every element, e.g. when the hosting container is torn down.
    pub fn clear(&mut self) {
        if self.elements.is_empty() {
            return;
        }
        self.elements.clear();
        self.seen.clear();
        self.index_by_id.clear();
        self.bump("cleared");
    }

    fn rebuild_index(&mut self) {
        self.index_by_id.clear();
        for (idx, e) in self.elements.iter().enumerate() {
            self.index_by_id.insert(e.id, idx);
        }
    }

    fn bump(&mut self, reason: &'static str) {
        self.revision = self.revision.next();
        tracing::debug!(revision = self.revision.0, reason, "glass registry revision");
    }
}

fn outcome_label(outcome: ReportOutcome) -> &'static str {
    match outcome {
        ReportOutcome::Inserted => "inserted",
        ReportOutcome::Replaced => "replaced",
        ReportOutcome::Unchanged => "unchanged",
    }
}

/// Immutable view of the active elements for one render phase.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    elements: &'a [GlassElement],
    total: usize,
    revision: Revision,
}

impl<'a> Snapshot<'a> {
    /// Visible elements in registration order.
    pub fn elements(&self) -> &'a [GlassElement] {
        self.elements
    }

    /// Revision the view was taken at.
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Number of visible elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Return `true` when no element is visible.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Tracked elements hidden by the visibility cap.
    pub fn dropped(&self) -> usize {
        self.total - self.elements.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/element/registry.rs"]
mod tests;
