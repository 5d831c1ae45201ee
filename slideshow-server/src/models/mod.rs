pub mod events;
pub mod photo;
pub mod settings;
