//! Application services for template authoring and versioning.

mod store;

pub use store::{
    CreateTemplateRequest, TemplateStoreError, TemplateStoreResult, TemplateStoreService,
    load_catalog_snapshot,
};
