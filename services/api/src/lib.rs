//! RSVP backend service
//!
//! Users register, create events, and mark themselves as attending or
//! hosting events. The user and event records reference each other; the
//! membership coordinator keeps those cross-references consistent across
//! every mutating operation.

pub mod avatars;
pub mod error;
pub mod jwt;
pub mod membership;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;
