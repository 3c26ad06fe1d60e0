/// Binary-level error carrying a message.
pub mod custom_error;
