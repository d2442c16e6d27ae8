pub mod background;
pub mod events;
pub mod interactions;
pub mod plugin;
pub mod present;
pub mod setup;
