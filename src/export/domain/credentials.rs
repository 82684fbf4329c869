//! Per-owner credentials for the content registry.

use crate::identifier::uuid_identifier;
use crate::tenancy::{AgentId, OwnerId};
use std::fmt;

uuid_identifier! {
    /// Identifier of a stored credential set.
    CredentialsId
}

/// Account credentials used to call the registry on an owner's behalf.
///
/// The auth token is redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct ContentCredentials {
    id: CredentialsId,
    owner_id: OwnerId,
    agent_id: Option<AgentId>,
    account_sid: String,
    auth_token: String,
    is_active: bool,
}

impl ContentCredentials {
    /// Creates an active credential set.
    #[must_use]
    pub fn new(
        owner_id: OwnerId,
        account_sid: impl Into<String>,
        auth_token: impl Into<String>,
    ) -> Self {
        Self {
            id: CredentialsId::new(),
            owner_id,
            agent_id: None,
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            is_active: true,
        }
    }

    /// Binds the credentials to the agent they were configured for.
    #[must_use]
    pub const fn for_agent(mut self, agent_id: AgentId) -> Self {
        self.agent_id = Some(agent_id);
        self
    }

    /// Marks the credentials unusable.
    #[must_use]
    pub const fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// Returns the credential identifier.
    #[must_use]
    pub const fn id(&self) -> CredentialsId {
        self.id
    }

    /// Returns the owning operator.
    #[must_use]
    pub const fn owner_id(&self) -> OwnerId {
        self.owner_id
    }

    /// Returns the agent these credentials belong to, if any.
    #[must_use]
    pub const fn agent_id(&self) -> Option<AgentId> {
        self.agent_id
    }

    /// Returns the registry account identifier.
    #[must_use]
    pub fn account_sid(&self) -> &str {
        &self.account_sid
    }

    /// Returns the secret token.
    #[must_use]
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// Returns `true` when the credentials may be used.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.is_active
    }
}

impl fmt::Debug for ContentCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentCredentials")
            .field("id", &self.id)
            .field("owner_id", &self.owner_id)
            .field("agent_id", &self.agent_id)
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("is_active", &self.is_active)
            .finish()
    }
}
