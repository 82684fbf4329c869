//! Registry status vocabulary.

use crate::template::domain::ApprovalStatus;

/// Maps a registry approval status onto the internal enum.
///
/// Unrecognised statuses map to [`ApprovalStatus::Draft`]: the content
/// exists externally but is not known to be under review.
#[must_use]
pub fn map_external_status(status: &str) -> ApprovalStatus {
    match status.trim().to_ascii_lowercase().as_str() {
        "approved" => ApprovalStatus::Approved,
        "pending" | "received" | "submitted" => ApprovalStatus::PendingApproval,
        "rejected" | "paused" | "disabled" => ApprovalStatus::Rejected,
        _ => ApprovalStatus::Draft,
    }
}
