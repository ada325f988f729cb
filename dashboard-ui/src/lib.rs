pub mod api;
pub mod scope;
pub mod screens;
pub mod session;
pub mod shell;
pub mod store;
pub mod styles;
pub mod theme;
pub mod toast;
pub mod widgets;

pub use shell::Shell;
