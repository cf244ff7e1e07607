//! Platform booking engine for a transit station.
//!
//! Books stoppages and through trains onto station platforms, rejecting any
//! booking that comes too close to an earlier one of the same kind.

pub mod config;
pub mod domain;
pub mod registry;
pub mod timeline;
pub mod web;
