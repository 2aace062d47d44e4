//! Posts and comments service.
//!
//! `domain` holds the entities, ports and services that enforce ownership and
//! the error catalog. `infrastructure` implements the ports (PostgreSQL,
//! in-memory, argon2, JWT) and loads configuration. `adapters::http` exposes
//! the services as a JSON API over actix-web.

pub mod adapters;
pub mod domain;
pub mod infrastructure;
