//! CLI module for the Deckgen CLI tool
//!
//! This module organizes all CLI-related functionality including
//! command structures and their handlers.

pub mod commands;

pub use commands::{
    handle_config_command, handle_demo_command, handle_download_command, handle_generate_command,
    handle_template_command,
};
