//! Use-case services behind the HTTP layer.
//!
//! # Responsibility
//! - Compose repository results into typed page contexts.
//! - Run the contact submission flow (validate, persist, notify, acknowledge).
//!
//! # Invariants
//! - Services are storage-agnostic; they only see repository traits.
//! - Services hold no state across requests.

pub mod contact_service;
pub mod page_service;
