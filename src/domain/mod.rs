//! Domain types used by the dispatcher.
//!
//! This module defines:
//!
//! - the run-case selector (`RunCase`)
//! - the conventional directory layout (`Layout`) and input-name resolution

pub mod layout;
pub mod run_case;

pub use layout::*;
pub use run_case::*;
