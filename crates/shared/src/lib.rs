//! Data contracts shared by the simulation core and its front-ends.

pub mod domain;
pub mod error;
pub mod protocol;
pub mod state;
