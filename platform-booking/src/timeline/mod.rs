//! Platform timeline engine.
//!
//! Decides whether a stoppage or through event may be placed on a platform,
//! given the events already accepted there.

mod config;
mod platform;

pub use config::SeparationRules;
pub use platform::{Platform, Timeline};
