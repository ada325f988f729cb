//! Academy management screen

pub mod dialogs;
pub mod logic;
pub mod types;
pub mod view;

pub use view::AcademiesScreen;
