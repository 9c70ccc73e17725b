//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id behind an injectable trait)
//! - Cryptographic utilities (random bytes, Base64, constant-time compare)
//! - `x-api-key` header parsing
//! - Environment configuration helpers

pub mod api_key;
pub mod config;
pub mod crypto;
pub mod password;
