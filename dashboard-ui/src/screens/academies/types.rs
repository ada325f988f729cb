//! Academy screen state types

use shared_types::Academy;

/// Which dialog is open
#[derive(Debug, Clone, PartialEq)]
pub enum DialogState {
    None,
    Create,
    Edit { academy: Academy },
    Delete { id: String, name: String },
}

/// Form buffer behind the create and edit dialogs. Raw strings straight
/// from the inputs; trimming and empty-to-absent happen when the request
/// is built.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AcademyForm {
    pub name: String,
    pub name_ar: String,
    pub slug: String,
    pub city: String,
    pub contact_email: String,
}

impl AcademyForm {
    pub fn from_academy(academy: &Academy) -> Self {
        Self {
            name: academy.name.clone(),
            name_ar: academy.name_ar.clone(),
            slug: academy.slug.clone(),
            city: academy.city.clone().unwrap_or_default(),
            contact_email: academy.contact_email.clone().unwrap_or_default(),
        }
    }
}

/// Table filter for archived rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFilter {
    Active,
    All,
}
