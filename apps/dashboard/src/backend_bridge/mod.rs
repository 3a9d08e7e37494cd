//! Backend bridge: command types and the worker thread hosting the simulation.

pub mod commands;
pub mod runtime;
