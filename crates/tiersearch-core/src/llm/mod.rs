//! Completion API integration

mod client;

pub use client::{ChatMessage, CompletionClient, CompletionRequest, HttpCompletionClient};
