//! Note use-case services.
//!
//! # Responsibility
//! - Orchestrate load -> mutate -> save cycles over a repository.
//! - Keep the CLI decoupled from storage details and wall-clock access.

pub mod clock;
pub mod note_service;
