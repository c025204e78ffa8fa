//! `tecogan-runner` library crate.
//!
//! The binary (`runner`) is a thin wrapper around this library so that:
//!
//! - run-case dispatch is testable without spawning the binary
//! - command-line construction can be checked without launching Python

pub mod app;
pub mod cli;
pub mod command;
pub mod config;
pub mod domain;
pub mod download;
pub mod error;
pub mod logging;
pub mod process;
