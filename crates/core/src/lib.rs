//! # Field Schedule Core
//!
//! Domain types, the persistence contract and the services that manage
//! reservable field schedules. Nothing in this crate knows about HTTP or SQL;
//! storage is reached only through the traits in [`repository`].

pub mod errors;
pub mod format;
pub mod models;
pub mod repository;
pub mod services;
