//! Series extraction: selects the analysed index range of a run.

use fc_log::RunRecord;

use crate::cycle::CycleWindow;

/// Slice every series to the cycle window and rebase time to start at zero.
pub fn extract_cycle(record: &RunRecord, window: &CycleWindow) -> RunRecord {
    let sliced = record.slice(window.start..window.end);
    let origin = sliced.time().first().copied().unwrap_or(0.0);
    sliced.with_time_origin(origin)
}

/// Transient runs are analysed over the whole (already cut off) horizon.
pub fn extract_transient(record: &RunRecord) -> RunRecord {
    record.clone()
}
