//! Single selected location shared by the list and the map.

use thiserror::Error;
use tracing::debug;

/// Fraction of the viewport where the selected row should land; 0.5 centers it.
pub const CENTERED: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrollError {
    #[error("row {index} has not been laid out yet")]
    NotMeasured { index: usize },

    #[error("row {index} is out of range for {len} rows")]
    OutOfRange { index: usize, len: usize },
}

/// A scrollable list the coordinator can drive.
pub trait ScrollTarget {
    fn scroll_to_index(&mut self, index: usize, view_position: f64) -> Result<(), ScrollError>;

    fn scroll_to_offset(&mut self, offset: f64);

    /// Estimated row height used when an index cannot be scrolled to.
    fn average_item_length(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollOutcome {
    /// Nothing changed since the last sync.
    Unchanged,
    /// Nothing is selected.
    Cleared,
    /// The selected id is not in the visible collection.
    NotVisible,
    Scrolled { index: usize },
    /// Index scroll failed; fell back to an estimated offset.
    Estimated { index: usize, offset: f64 },
}

#[derive(Debug, Clone, Default)]
pub struct SelectionCoordinator {
    selected: Option<String>,
    revision: u64,
    synced_revision: Option<u64>,
    synced_collection: Option<Vec<String>>,
}

impl SelectionCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Selects `id`. Membership in any collection is not checked; selecting
    /// the current id again changes nothing.
    pub fn select(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.selected.as_deref() == Some(id.as_str()) {
            return;
        }
        debug!(%id, "location selected");
        self.selected = Some(id);
        self.revision += 1;
    }

    pub fn clear(&mut self) {
        if self.selected.take().is_some() {
            self.revision += 1;
        }
    }

    /// Position of the selection in `visible_ids`, if present.
    pub fn index_in<S: AsRef<str>>(&self, visible_ids: &[S]) -> Option<usize> {
        let selected = self.selected.as_deref()?;
        visible_ids.iter().position(|id| id.as_ref() == selected)
    }

    /// Brings the selected row into view after the selection or the visible
    /// collection changed.
    pub fn sync<S, T>(&mut self, visible_ids: &[S], target: &mut T) -> ScrollOutcome
    where
        S: AsRef<str>,
        T: ScrollTarget + ?Sized,
    {
        let collection_changed = self.synced_collection.as_ref().map_or(true, |previous| {
            previous.len() != visible_ids.len()
                || previous
                    .iter()
                    .zip(visible_ids)
                    .any(|(a, b)| a != b.as_ref())
        });

        if !collection_changed && self.synced_revision == Some(self.revision) {
            return ScrollOutcome::Unchanged;
        }

        self.synced_revision = Some(self.revision);
        if collection_changed {
            self.synced_collection =
                Some(visible_ids.iter().map(|id| id.as_ref().to_string()).collect());
        }

        if self.selected.is_none() {
            return ScrollOutcome::Cleared;
        }

        let Some(index) = self.index_in(visible_ids) else {
            return ScrollOutcome::NotVisible;
        };

        match target.scroll_to_index(index, CENTERED) {
            Ok(()) => ScrollOutcome::Scrolled { index },
            Err(err) => {
                #[allow(clippy::cast_precision_loss)]
                let offset = target.average_item_length() * index as f64;
                debug!(%err, offset, "scroll to index failed, using estimated offset");
                target.scroll_to_offset(offset);
                ScrollOutcome::Estimated { index, offset }
            }
        }
    }
}

/// Scroll state of a row list rendered in the terminal.
///
/// Row heights are unknown until the first render reports the viewport
/// size, so index scrolling fails until [`ListViewport::measure`] is called.
#[derive(Debug, Clone, PartialEq)]
pub struct ListViewport {
    offset: usize,
    len: usize,
    visible_rows: Option<usize>,
    row_height: f64,
}

impl Default for ListViewport {
    fn default() -> Self {
        Self {
            offset: 0,
            len: 0,
            visible_rows: None,
            row_height: 1.0,
        }
    }
}

impl ListViewport {
    pub const fn new(row_height: f64) -> Self {
        Self {
            offset: 0,
            len: 0,
            visible_rows: None,
            row_height,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn visible_rows(&self) -> Option<usize> {
        self.visible_rows
    }

    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.offset = self.offset.min(len.saturating_sub(1));
    }

    pub fn measure(&mut self, visible_rows: usize) {
        self.visible_rows = Some(visible_rows.max(1));
    }

    /// Keeps `index` on screen while moving with the keyboard.
    pub fn ensure_visible(&mut self, index: usize) {
        let rows = self.visible_rows.unwrap_or(1);
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + rows {
            self.offset = index + 1 - rows;
        }
    }

    fn max_offset(&self) -> usize {
        self.len.saturating_sub(self.visible_rows.unwrap_or(1))
    }
}

impl ScrollTarget for ListViewport {
    fn scroll_to_index(&mut self, index: usize, view_position: f64) -> Result<(), ScrollError> {
        if index >= self.len {
            return Err(ScrollError::OutOfRange {
                index,
                len: self.len,
            });
        }
        let rows = self.visible_rows.ok_or(ScrollError::NotMeasured { index })?;

        #[allow(
            clippy::cast_precision_loss,
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss
        )]
        let lead =
            (rows.saturating_sub(1) as f64 * view_position.clamp(0.0, 1.0)).round() as usize;
        self.offset = index.saturating_sub(lead).min(self.max_offset());
        Ok(())
    }

    fn scroll_to_offset(&mut self, offset: f64) {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let row = (offset.max(0.0) / self.row_height).floor() as usize;
        self.offset = row.min(self.max_offset());
    }

    fn average_item_length(&self) -> f64 {
        self.row_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingTarget {
        fail_index: bool,
        indices: Vec<(usize, f64)>,
        offsets: Vec<f64>,
    }

    impl ScrollTarget for RecordingTarget {
        fn scroll_to_index(&mut self, index: usize, view_position: f64) -> Result<(), ScrollError> {
            if self.fail_index {
                return Err(ScrollError::NotMeasured { index });
            }
            self.indices.push((index, view_position));
            Ok(())
        }

        fn scroll_to_offset(&mut self, offset: f64) {
            self.offsets.push(offset);
        }

        fn average_item_length(&self) -> f64 {
            3.0
        }
    }

    const IDS: [&str; 4] = ["loc-1", "loc-2", "loc-3", "loc-4"];

    #[test]
    fn select_missing_id_keeps_state_and_does_not_scroll() {
        let mut coordinator = SelectionCoordinator::new();
        let mut target = RecordingTarget::default();
        coordinator.select("loc-99");

        assert_eq!(coordinator.selected(), Some("loc-99"));
        assert_eq!(coordinator.sync(&IDS, &mut target), ScrollOutcome::NotVisible);
        assert!(target.indices.is_empty());
        assert!(target.offsets.is_empty());
    }

    #[test]
    fn select_is_idempotent() {
        let mut once = SelectionCoordinator::new();
        once.select("loc-2");
        let mut twice = SelectionCoordinator::new();
        twice.select("loc-2");
        twice.select("loc-2");

        assert_eq!(once.selected(), twice.selected());

        let mut target = RecordingTarget::default();
        assert_eq!(
            twice.sync(&IDS, &mut target),
            ScrollOutcome::Scrolled { index: 1 }
        );
        twice.select("loc-2");
        assert_eq!(twice.sync(&IDS, &mut target), ScrollOutcome::Unchanged);
        assert_eq!(target.indices, vec![(1, CENTERED)]);
    }

    #[test]
    fn external_selection_scrolls_centered() {
        let mut coordinator = SelectionCoordinator::new();
        let mut target = RecordingTarget::default();
        coordinator.select("loc-4");
        assert_eq!(
            coordinator.sync(&IDS, &mut target),
            ScrollOutcome::Scrolled { index: 3 }
        );
        assert_eq!(target.indices, vec![(3, 0.5)]);
    }

    #[test]
    fn failed_index_scroll_retries_with_estimated_offset() {
        let mut coordinator = SelectionCoordinator::new();
        let mut target = RecordingTarget {
            fail_index: true,
            ..RecordingTarget::default()
        };
        coordinator.select("loc-3");

        assert_eq!(
            coordinator.sync(&IDS, &mut target),
            ScrollOutcome::Estimated {
                index: 2,
                offset: 6.0
            }
        );
        assert_eq!(target.offsets, vec![6.0]);
    }

    #[test]
    fn clear_resets_selection() {
        let mut coordinator = SelectionCoordinator::new();
        let mut target = RecordingTarget::default();
        coordinator.select("loc-1");
        coordinator.clear();
        assert_eq!(coordinator.selected(), None);
        assert_eq!(coordinator.sync(&IDS, &mut target), ScrollOutcome::Cleared);
    }

    #[test]
    fn filtered_out_selection_is_left_dangling() {
        let mut coordinator = SelectionCoordinator::new();
        let mut target = RecordingTarget::default();
        coordinator.select("loc-2");
        coordinator.sync(&IDS, &mut target);

        let filtered = ["loc-1", "loc-3"];
        assert_eq!(coordinator.sync(&filtered, &mut target), ScrollOutcome::NotVisible);
        assert_eq!(coordinator.selected(), Some("loc-2"));
        assert_eq!(coordinator.index_in(&filtered), None);
    }

    #[test]
    fn collection_change_resyncs_same_selection() {
        let mut coordinator = SelectionCoordinator::new();
        let mut target = RecordingTarget::default();
        coordinator.select("loc-3");
        coordinator.sync(&IDS, &mut target);

        let reordered = ["loc-3", "loc-1"];
        assert_eq!(
            coordinator.sync(&reordered, &mut target),
            ScrollOutcome::Scrolled { index: 0 }
        );
    }

    #[test]
    fn unmeasured_viewport_falls_back_to_offset() {
        let mut viewport = ListViewport::new(1.0);
        viewport.set_len(20);
        let mut coordinator = SelectionCoordinator::new();
        let ids: Vec<String> = (0..20).map(|i| format!("loc-{i}")).collect();

        coordinator.select("loc-12");
        assert_eq!(
            coordinator.sync(&ids, &mut viewport),
            ScrollOutcome::Estimated {
                index: 12,
                offset: 12.0
            }
        );
        assert_eq!(viewport.offset(), 12);
    }

    #[test]
    fn measured_viewport_centers_row() {
        let mut viewport = ListViewport::new(1.0);
        viewport.set_len(20);
        viewport.measure(5);

        assert_eq!(viewport.scroll_to_index(10, CENTERED), Ok(()));
        assert_eq!(viewport.offset(), 8);

        assert_eq!(viewport.scroll_to_index(19, CENTERED), Ok(()));
        assert_eq!(viewport.offset(), 15);

        assert_eq!(viewport.scroll_to_index(1, CENTERED), Ok(()));
        assert_eq!(viewport.offset(), 0);

        assert_eq!(
            viewport.scroll_to_index(25, CENTERED),
            Err(ScrollError::OutOfRange { index: 25, len: 20 })
        );
    }

    #[test]
    fn estimated_offset_keeps_a_full_page() {
        let mut viewport = ListViewport::new(1.0);
        viewport.set_len(20);
        viewport.measure(5);

        viewport.scroll_to_offset(18.0);
        assert_eq!(viewport.offset(), 15);

        viewport.scroll_to_offset(-3.0);
        assert_eq!(viewport.offset(), 0);
    }

    #[test]
    fn ensure_visible_follows_keyboard() {
        let mut viewport = ListViewport::default();
        viewport.set_len(10);
        viewport.measure(3);
        viewport.ensure_visible(4);
        assert_eq!(viewport.offset(), 2);
        viewport.ensure_visible(1);
        assert_eq!(viewport.offset(), 1);
    }
}
