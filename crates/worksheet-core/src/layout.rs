//! Page layout sizing for the handwriting field
//!
//! A worksheet page has a fixed usable height; each task needs room for its
//! statement text plus a gridded field for handwritten work. Given how many
//! tasks must share one page, this module computes the field height so the
//! page does not overflow.

/// Usable vertical space on one printed page, in millimeters.
pub const USABLE_PAGE_HEIGHT_MM: u32 = 190;

/// Space reserved per task for the statement text, in millimeters.
pub const TASK_TEXT_BUFFER_MM: u32 = 15;

/// Smallest handwriting field that is still usable.
pub const MIN_FIELD_HEIGHT_MM: u32 = 10;

/// The layout does not support more tasks than this on one page.
pub const MAX_TASKS_PER_PAGE: u32 = 6;

/// Task count assumed when the client sends nothing parseable.
pub const DEFAULT_TASK_COUNT: u32 = 3;

/// Clamp a client-supplied task count into the supported range.
///
/// `None` covers both a missing field and a failed integer coercion, and a
/// literal `0` is treated the same way; both fall back to
/// [`DEFAULT_TASK_COUNT`]. Anything above [`MAX_TASKS_PER_PAGE`] is capped.
pub fn clamp_task_count(requested: Option<u32>) -> u32 {
    match requested {
        None | Some(0) => DEFAULT_TASK_COUNT,
        Some(n) => n.min(MAX_TASKS_PER_PAGE),
    }
}

/// Height of the handwriting field in millimeters for `task_count` tasks
/// sharing one page.
///
/// The count is clamped first, so this is total: every input yields a value
/// in `[MIN_FIELD_HEIGHT_MM, 175]`.
pub fn grid_height_mm(task_count: u32) -> u32 {
    let count = clamp_task_count(Some(task_count));
    let raw = USABLE_PAGE_HEIGHT_MM as f64 / count as f64 - TASK_TEXT_BUFFER_MM as f64;
    (raw.floor() as u32).max(MIN_FIELD_HEIGHT_MM)
}
