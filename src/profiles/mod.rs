//! Profile record shared by the form and interview collectors.
//!
//! Both collectors mutate a single owned `ProfileDraft`; the generation engine
//! and the persistence layer only ever read it.

pub mod model;
pub mod validation;

pub use model::{
    derive_username, parse_services, Attachment, ProfileDraft, MAX_PHOTOS, MICROSITE_DOMAIN,
};
pub use validation::{ProfileField, ValidationReport};
