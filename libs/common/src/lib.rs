//! Common library for the RSVP application
//!
//! This crate provides shared infrastructure used by the RSVP services:
//! PostgreSQL connection pooling, health checks, and the database error
//! taxonomy.

pub mod database;
pub mod error;
