//! In-memory recipient directory for tests and local runs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::resolution::{
    domain::{AgentConfig, OwnerProfile, RecipientId, RecipientRecord},
    ports::{DirectoryError, DirectoryResult, RecipientDirectory},
};
use crate::tenancy::{AgentId, OwnerId};

/// Thread-safe in-memory directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecipientDirectory {
    state: Arc<RwLock<InMemoryDirectoryState>>,
}

#[derive(Debug, Default)]
struct InMemoryDirectoryState {
    recipients: HashMap<RecipientId, RecipientRecord>,
    owners: HashMap<OwnerId, OwnerProfile>,
    agents: Vec<AgentConfig>,
}

fn lock_error(err: impl std::fmt::Display) -> DirectoryError {
    DirectoryError::unavailable(std::io::Error::other(err.to_string()))
}

impl InMemoryRecipientDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a recipient.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the state lock is poisoned.
    pub fn put_recipient(&self, recipient: RecipientRecord) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.recipients.insert(recipient.id, recipient);
        Ok(())
    }

    /// Adds or replaces an owner profile.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the state lock is poisoned.
    pub fn put_owner_profile(&self, profile: OwnerProfile) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.owners.insert(profile.id, profile);
        Ok(())
    }

    /// Adds or replaces an agent configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryError`] when the state lock is poisoned.
    pub fn put_agent_config(&self, config: AgentConfig) -> DirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state.agents.retain(|existing| existing.id != config.id);
        state.agents.push(config);
        Ok(())
    }
}

#[async_trait]
impl RecipientDirectory for InMemoryRecipientDirectory {
    async fn find_recipient(
        &self,
        owner_id: OwnerId,
        recipient_id: RecipientId,
    ) -> DirectoryResult<Option<RecipientRecord>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .recipients
            .get(&recipient_id)
            .filter(|recipient| recipient.owner_id == owner_id)
            .cloned())
    }

    async fn find_owner_profile(&self, owner_id: OwnerId) -> DirectoryResult<Option<OwnerProfile>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.owners.get(&owner_id).cloned())
    }

    async fn find_agent_config(
        &self,
        owner_id: OwnerId,
        agent_id: Option<AgentId>,
    ) -> DirectoryResult<Option<AgentConfig>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state
            .agents
            .iter()
            .filter(|config| config.owner_id == owner_id)
            .find(|config| agent_id.is_none_or(|wanted| config.id == wanted))
            .cloned())
    }
}
