//! Domain model for template export.

mod convert;
mod credentials;
mod friendly;
mod outcome;
mod status;

pub use convert::{ExternalBody, convert_to_external_format};
pub use credentials::{ContentCredentials, CredentialsId};
pub use friendly::FriendlyName;
pub use outcome::{ContentSubmission, ExportOutcome, SyncFailure, SyncReport, SyncedVersion};
pub use status::map_external_status;
