//! Built-in catalog entries used by the stock outreach templates.

use super::{CatalogDomainError, CatalogEntryDraft, SourceType, VariableCatalogEntry};
use mockable::Clock;

/// Returns the drafts for the built-in catalog.
fn default_drafts() -> Vec<CatalogEntryDraft> {
    vec![
        CatalogEntryDraft::new("nome_lead", "Nome lead", SourceType::Recipient, "firstName")
            .with_description("Il nome del potenziale cliente")
            .with_fallback_value("Cliente"),
        CatalogEntryDraft::new("cognome_lead", "Cognome lead", SourceType::Recipient, "lastName")
            .with_description("Il cognome del potenziale cliente"),
        CatalogEntryDraft::new("nome_completo_lead", "Nome completo lead", SourceType::Computed, "fullName")
            .with_description("Nome e cognome del potenziale cliente"),
        CatalogEntryDraft::new("obiettivi", "Obiettivi", SourceType::Recipient, "leadInfo.obiettivi")
            .with_description("Gli obiettivi dichiarati dal lead"),
        CatalogEntryDraft::new("desideri", "Desideri", SourceType::Recipient, "leadInfo.desideri")
            .with_description("I desideri dichiarati dal lead"),
        CatalogEntryDraft::new("uncino", "Uncino", SourceType::Recipient, "leadInfo.uncino")
            .with_description("Il gancio commerciale per il lead"),
        CatalogEntryDraft::new(
            "nome_consulente",
            "Nome consulente",
            SourceType::AgentConfig,
            "consultantDisplayName",
        )
        .with_description("Il nome con cui il consulente si presenta")
        .with_fallback_source(SourceType::Owner, "firstName"),
        CatalogEntryDraft::new("nome_azienda", "Nome azienda", SourceType::AgentConfig, "businessName")
            .with_description("Il nome dell'attività del consulente")
            .with_fallback_source(SourceType::Owner, "businessName"),
        CatalogEntryDraft::new("email_consulente", "Email consulente", SourceType::Owner, "email")
            .with_description("L'indirizzo email del consulente"),
    ]
}

/// Builds the built-in catalog entries.
///
/// # Errors
///
/// Returns [`CatalogDomainError`] if a built-in draft fails validation.
pub fn default_catalog(clock: &impl Clock) -> Result<Vec<VariableCatalogEntry>, CatalogDomainError> {
    default_drafts()
        .into_iter()
        .map(|draft| draft.build(clock))
        .collect()
}
