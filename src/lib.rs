//! Programmatic access to the LVM2 command-line toolkit.
//!
//! The library renders toolkit command lines from typed operations, validates LVM object names
//! before anything is run and normalizes the JSON reports the toolkit prints.
//!
//! ```no_run
//! # async fn example() -> Result<(), lvm2::executor::ExecuteError> {
//! use lvm2::{command::CommandOptions, resources::Lvm};
//!
//! let lvm = Lvm::new();
//! let groups = lvm.vg().list(CommandOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod args;
pub mod command;
pub mod commands;
pub mod dependencies;
pub mod executor;
pub mod formatting;
pub mod interaction;
pub mod logging;
pub mod models;
pub mod names;
pub mod resources;
pub mod table;
