//! API client implementations for the Deckgen service
//!
//! This module contains the HTTP client for the Deckgen presentation API
//! together with its configuration types.

pub mod deckgen_client;

pub use deckgen_client::{DeckgenApiClient, DeckgenApiConfig, PPTX_CONTENT_TYPE};
