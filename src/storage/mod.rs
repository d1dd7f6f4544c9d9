pub mod layout;
pub mod registry;
pub mod walker;
