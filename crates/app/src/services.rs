//! Use-case services consumed by the bot front end.

pub mod pantry;
pub mod registration;

pub use pantry::PantryService;
pub use registration::RegistrationService;
