//! Completion percentage shown while the form is being filled in.

use crate::snapshot::FormSnapshot;

/// Percentage (0 to 100, rounded) of fields holding a value.
///
/// A text field counts once when non-blank after trimming; a list field
/// counts once per selected entry. Pass [`FormSchema::progress_total`] as
/// the total so a completed sheet reads 100. A zero total yields 0.
///
/// [`FormSchema::progress_total`]: crate::schema::FormSchema::progress_total
pub fn estimate_progress(snapshot: &FormSnapshot, total_field_count: usize) -> u8 {
    if total_field_count == 0 {
        return 0;
    }
    let filled: usize = snapshot.iter().map(|(_, value)| value.filled_count()).sum();
    let percentage = (filled as f64 / total_field_count as f64 * 100.0).round();
    percentage.clamp(0.0, 100.0) as u8
}

/// Progress text, e.g. `"40% 完了"`.
pub fn progress_label(percentage: u8) -> String {
    format!("{percentage}% 完了")
}
