//! Core types for sitepilot
//!
//! This crate contains domain types shared across all other crates.

mod agents;
mod domain;
mod question;
mod session;
mod step;
mod website;
mod wizard;

pub use agents::*;
pub use domain::*;
pub use question::*;
pub use session::*;
pub use step::*;
pub use website::*;
pub use wizard::*;
