//! Template categories and external approval states.

use super::{ParseApprovalStatusError, ParseTemplateTypeError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a template in an outreach sequence.
///
/// An owner may have at most one non-archived template of each type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    /// First contact message.
    Opening,
    /// Light reminder after no reply.
    FollowupGentle,
    /// Reminder that restates the value proposition.
    FollowupValue,
    /// Last message before the sequence stops.
    FollowupFinal,
}

impl TemplateType {
    /// All template types in sequence order.
    pub const ALL: [Self; 4] = [
        Self::Opening,
        Self::FollowupGentle,
        Self::FollowupValue,
        Self::FollowupFinal,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Opening => "opening",
            Self::FollowupGentle => "followup_gentle",
            Self::FollowupValue => "followup_value",
            Self::FollowupFinal => "followup_final",
        }
    }
}

impl fmt::Display for TemplateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemplateType {
    type Error = ParseTemplateTypeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "opening" => Ok(Self::Opening),
            "followup_gentle" | "followupgentle" => Ok(Self::FollowupGentle),
            "followup_value" | "followupvalue" => Ok(Self::FollowupValue),
            "followup_final" | "followupfinal" => Ok(Self::FollowupFinal),
            _ => Err(ParseTemplateTypeError(value.to_owned())),
        }
    }
}

/// Approval state of a version in the external template registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Never exported.
    #[default]
    NotSynced,
    /// Content exists externally but has not been submitted for approval.
    Draft,
    /// Submitted and awaiting a decision.
    PendingApproval,
    /// Approved for sending.
    Approved,
    /// Rejected, paused, or disabled by the registry.
    Rejected,
}

impl ApprovalStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotSynced => "not_synced",
            Self::Draft => "draft",
            Self::PendingApproval => "pending_approval",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns `true` once the version has reached the registry.
    #[must_use]
    pub const fn is_synced(self) -> bool {
        !matches!(self, Self::NotSynced)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ApprovalStatus {
    type Error = ParseApprovalStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "not_synced" => Ok(Self::NotSynced),
            "draft" => Ok(Self::Draft),
            "pending_approval" => Ok(Self::PendingApproval),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseApprovalStatusError(value.to_owned())),
        }
    }
}
