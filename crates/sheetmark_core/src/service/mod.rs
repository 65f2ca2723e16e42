//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep the HTTP and CLI layers decoupled from storage details.

pub mod backup_service;
pub mod profile_service;
pub mod status_service;
