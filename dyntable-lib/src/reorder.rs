//! Column order mutation and the drag gesture that drives it.

use std::time::{Duration, Instant};

/// How long a column stays highlighted as drop target after the last hover.
pub const DROP_TARGET_DEBOUNCE: Duration = Duration::from_millis(100);

/// Moves `dragged` to the position `target` occupies in `order`.
///
/// The target's index is taken before the dragged id is removed, so dragging
/// to the left lands before the target and dragging to the right lands after
/// it. Unknown ids and self-drops return the order unchanged.
///
/// # Example
///
/// ```
/// use dyntable_lib::reorder::reorder_column;
///
/// let order: Vec<String> = ["A", "B", "C", "D"].map(String::from).to_vec();
/// assert_eq!(reorder_column(&order, "D", "B"), ["A", "D", "B", "C"]);
/// ```
pub fn reorder_column(order: &[String], dragged: &str, target: &str) -> Vec<String> {
    let mut next = order.to_vec();
    if dragged == target {
        return next;
    }
    let (Some(from), Some(to)) = (
        order.iter().position(|id| id == dragged),
        order.iter().position(|id| id == target),
    ) else {
        log::debug!("ignoring drop of '{}' on '{}': unknown column", dragged, target);
        return next;
    };
    let moved = next.remove(from);
    next.insert(to.min(next.len()), moved);
    next
}

/// Transient state of a header drag.
///
/// The gesture has three phases: [`start`](Self::start), any number of
/// [`hover`](Self::hover) events, and [`drop_on`](Self::drop_on). Only the drop
/// changes column order; the drop-target flag exists for highlighting.
#[derive(Debug, Clone, Default)]
pub struct DragState {
    dragging: Option<String>,
    drop_target: Option<(String, Instant)>,
}

impl DragState {
    /// Creates an idle drag state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Begins dragging a column.
    pub fn start(&mut self, column_id: impl Into<String>) {
        let column_id = column_id.into();
        log::trace!("drag start '{}'", column_id);
        self.dragging = Some(column_id);
        self.drop_target = None;
    }

    /// Records a hover over a header, refreshing its highlight.
    pub fn hover(&mut self, column_id: impl Into<String>, now: Instant) {
        if self.dragging.is_none() {
            return;
        }
        let column_id = column_id.into();
        log::trace!("drag hover '{}'", column_id);
        self.drop_target = Some((column_id, now));
    }

    /// Completes the gesture over `target`, returning the reordered ids.
    ///
    /// Returns `None` when nothing was being dragged.
    pub fn drop_on(&mut self, target: &str, order: &[String]) -> Option<Vec<String>> {
        let dragged = self.dragging.take()?;
        self.drop_target = None;
        log::trace!("drop '{}' on '{}'", dragged, target);
        Some(reorder_column(order, &dragged, target))
    }

    /// Abandons the gesture.
    pub fn cancel(&mut self) {
        self.dragging = None;
        self.drop_target = None;
    }

    /// The column being dragged, if any.
    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    /// Returns `true` while `column_id` is being dragged.
    pub fn is_dragging(&self, column_id: &str) -> bool {
        self.dragging.as_deref() == Some(column_id)
    }

    /// Returns `true` if `column_id` was hovered within the debounce window.
    pub fn is_drop_target(&self, column_id: &str, now: Instant) -> bool {
        match &self.drop_target {
            Some((id, at)) => id == column_id && now.saturating_duration_since(*at) < DROP_TARGET_DEBOUNCE,
            None => false,
        }
    }
}
