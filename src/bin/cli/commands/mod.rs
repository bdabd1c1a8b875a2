//! Command handlers for the Deckgen CLI
//!
//! This module contains all command handler implementations, decomposed by command category.

pub mod config;
pub mod demo;
pub mod download;
pub mod generate;
pub mod template;

pub use config::handle_config_command;
pub use demo::handle_demo_command;
pub use download::handle_download_command;
pub use generate::handle_generate_command;
pub use template::handle_template_command;
