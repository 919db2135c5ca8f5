//! Command line front end for record generalization.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
