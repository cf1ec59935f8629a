//! Core domain types
//!
//! This module contains the structures a plugin author declares (job
//! definitions and handlers) and the structures the runtime produces from
//! them (resolved jobs and execution results).

pub mod handler;
pub mod job;
