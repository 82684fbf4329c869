//! Source records read by the resolver and the typed lookup over them.

use super::RecipientId;
use crate::catalog::domain::{
    AgentConfigField, ComputedField, FieldSelector, OwnerField, RecipientField, SourceField,
    SourceRef,
};
use crate::tenancy::{AgentId, OwnerId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A message recipient (lead) as supplied by the surrounding application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipientRecord {
    /// Recipient identifier.
    pub id: RecipientId,
    /// Owning operator.
    pub owner_id: OwnerId,
    /// Agent handling the recipient, if assigned.
    pub agent_id: Option<AgentId>,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// E-mail address.
    pub email: Option<String>,
    /// Free-form lead information document.
    pub lead_info: Value,
}

impl RecipientRecord {
    /// Creates a recipient with no optional data.
    #[must_use]
    pub const fn new(id: RecipientId, owner_id: OwnerId) -> Self {
        Self {
            id,
            owner_id,
            agent_id: None,
            first_name: None,
            last_name: None,
            phone_number: None,
            email: None,
            lead_info: Value::Null,
        }
    }

    fn field(&self, field: RecipientField, nested: &[String]) -> Option<String> {
        match field {
            RecipientField::FirstName => present(self.first_name.as_deref()),
            RecipientField::LastName => present(self.last_name.as_deref()),
            RecipientField::PhoneNumber => present(self.phone_number.as_deref()),
            RecipientField::Email => present(self.email.as_deref()),
            RecipientField::LeadInfo => walk(&self.lead_info, nested),
        }
    }

    fn computed(&self, field: ComputedField) -> Option<String> {
        let first = present(self.first_name.as_deref());
        let last = present(self.last_name.as_deref());
        match field {
            ComputedField::FullName => {
                let parts: Vec<String> = first.into_iter().chain(last).collect();
                (!parts.is_empty()).then(|| parts.join(" "))
            }
            ComputedField::Initials => {
                let initials: String = [first, last]
                    .into_iter()
                    .flatten()
                    .filter_map(|part| part.chars().next())
                    .flat_map(char::to_uppercase)
                    .collect();
                (!initials.is_empty()).then_some(initials)
            }
            ComputedField::GreetingName => first.map(|name| capitalise(&name)),
        }
    }
}

/// The operator's own profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerProfile {
    /// Operator identifier.
    pub id: OwnerId,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Name shown to recipients.
    pub display_name: Option<String>,
    /// E-mail address.
    pub email: Option<String>,
    /// Business or practice name.
    pub business_name: Option<String>,
}

impl OwnerProfile {
    /// Creates a profile with no optional data.
    #[must_use]
    pub const fn new(id: OwnerId) -> Self {
        Self {
            id,
            first_name: None,
            last_name: None,
            display_name: None,
            email: None,
            business_name: None,
        }
    }

    fn field(&self, field: OwnerField) -> Option<String> {
        match field {
            OwnerField::FirstName => present(self.first_name.as_deref()),
            OwnerField::LastName => present(self.last_name.as_deref()),
            OwnerField::DisplayName => present(self.display_name.as_deref()),
            OwnerField::Email => present(self.email.as_deref()),
            OwnerField::BusinessName => present(self.business_name.as_deref()),
        }
    }
}

/// Settings of the agent that sends on the owner's behalf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Agent identifier.
    pub id: AgentId,
    /// Owning operator.
    pub owner_id: OwnerId,
    /// Internal agent name.
    pub agent_name: Option<String>,
    /// Business name presented by the agent.
    pub business_name: Option<String>,
    /// Operator name the agent introduces itself with.
    pub consultant_display_name: Option<String>,
    /// Short business description.
    pub business_description: Option<String>,
    /// Sending phone number.
    pub whatsapp_number: Option<String>,
    /// Free-form positioning document.
    pub profile: Value,
}

impl AgentConfig {
    /// Creates an agent configuration with no optional data.
    #[must_use]
    pub const fn new(id: AgentId, owner_id: OwnerId) -> Self {
        Self {
            id,
            owner_id,
            agent_name: None,
            business_name: None,
            consultant_display_name: None,
            business_description: None,
            whatsapp_number: None,
            profile: Value::Null,
        }
    }

    fn field(&self, field: AgentConfigField, nested: &[String]) -> Option<String> {
        match field {
            AgentConfigField::AgentName => present(self.agent_name.as_deref()),
            AgentConfigField::BusinessName => present(self.business_name.as_deref()),
            AgentConfigField::ConsultantDisplayName => {
                present(self.consultant_display_name.as_deref())
            }
            AgentConfigField::BusinessDescription => present(self.business_description.as_deref()),
            AgentConfigField::WhatsappNumber => present(self.whatsapp_number.as_deref()),
            AgentConfigField::Profile => walk(&self.profile, nested),
        }
    }
}

/// The records available to one resolution run.
///
/// Any of them may be absent; lookups against an absent record yield
/// nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceRecords<'a> {
    /// Recipient record, in recipient mode.
    pub recipient: Option<&'a RecipientRecord>,
    /// Owner profile.
    pub owner: Option<&'a OwnerProfile>,
    /// Agent configuration.
    pub agent: Option<&'a AgentConfig>,
}

impl SourceRecords<'_> {
    /// Reads the value addressed by `source`.
    ///
    /// Returns `None` when the path is unresolvable, the record is absent,
    /// or the value is null, blank, or not a scalar.
    #[must_use]
    pub fn lookup(&self, source: &SourceRef) -> Option<String> {
        let selector = source.selector()?;
        self.read(&selector)
    }

    fn read(&self, selector: &FieldSelector) -> Option<String> {
        match selector.field() {
            SourceField::Recipient(field) => self.recipient?.field(field, selector.nested()),
            SourceField::Owner(field) => self.owner?.field(field),
            SourceField::AgentConfig(field) => self.agent?.field(field, selector.nested()),
            SourceField::Computed(field) => self.recipient?.computed(field),
        }
    }
}

fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
}

fn walk(document: &Value, nested: &[String]) -> Option<String> {
    let leaf = nested
        .iter()
        .try_fold(document, |node, segment| node.get(segment.as_str()))?;
    match leaf {
        Value::String(text) => present(Some(text.as_str())),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |head| {
        head.to_uppercase().chain(chars).collect()
    })
}
