//! HWProbe Core
//!
//! Core types and abstractions for the HWProbe diagnostics system.
//!
//! This crate contains:
//! - Domain types: Core entities (targets, job handles, task states)
//! - DTOs: Wire bodies exchanged with the diagnostic job services

pub mod domain;
pub mod dto;
