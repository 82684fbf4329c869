//! What a resolution run resolves against.

use super::{RecipientId, SampleDataSetId};
use std::collections::BTreeMap;

/// Sample-mode inputs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SampleContext {
    /// Named set to use; the owner's default set when `None`.
    pub sample_set_id: Option<SampleDataSetId>,
    /// Ad-hoc values that replace any stored set.
    pub values: Option<BTreeMap<String, String>>,
    /// Read owner and agent variables from the caller's real records before
    /// falling back to sample values.
    pub use_owner_profile: bool,
}

/// Resolution mode and its context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionRequest {
    /// Resolve from sample data.
    Sample(SampleContext),
    /// Resolve from a real recipient record.
    Recipient {
        /// The recipient to render for.
        recipient_id: RecipientId,
    },
}

impl ResolutionRequest {
    /// Sample mode using the owner's default set.
    #[must_use]
    pub fn default_sample() -> Self {
        Self::Sample(SampleContext::default())
    }

    /// Sample mode using a named set.
    #[must_use]
    pub fn sample_set(sample_set_id: SampleDataSetId) -> Self {
        Self::Sample(SampleContext {
            sample_set_id: Some(sample_set_id),
            ..SampleContext::default()
        })
    }

    /// Sample mode using ad-hoc values.
    #[must_use]
    pub fn sample_values(values: BTreeMap<String, String>) -> Self {
        Self::Sample(SampleContext {
            values: Some(values),
            ..SampleContext::default()
        })
    }

    /// Recipient mode.
    #[must_use]
    pub const fn recipient(recipient_id: RecipientId) -> Self {
        Self::Recipient { recipient_id }
    }
}
