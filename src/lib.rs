//! Quarkus project wizard library
//!
//! This library provides the multi-step prompt engine and the project
//! generator client behind the `quarkus-wizard` CLI.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;
pub mod wizard;
