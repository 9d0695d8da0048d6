pub mod add_extensions;
pub mod config;
pub mod extensions;
pub mod generate;
pub mod pick_extensions;
