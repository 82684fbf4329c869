//! Configurable validation limits.

/// Limits applied to template bodies and mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationLimits {
    /// Maximum body length in characters.
    pub max_body_len: usize,
    /// Maximum number of mapped variables.
    pub max_variables: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self {
            max_body_len: 1024, // WhatsApp template body limit
            max_variables: 20,
        }
    }
}
