//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cookie building and parsing
//! - Client identification for rate limiting
//! - Fixed-window rate limiting

pub mod client;
pub mod cookie;
pub mod rate_limit;
