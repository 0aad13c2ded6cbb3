//! Output formats of the CLI.
//!
//! Command results implement [`Formattable`] and are printed either as human readable text or as
//! JSON, depending on the `--output` flag.
use std::fmt::Display;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Format of the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Types that can be printed in every [`Format`].
pub trait Formattable {
    fn format(&self, format: Format) -> Result<String>;
}

/// Text goes through [`Display`], JSON through [`Serialize`].
impl<T> Formattable for T
where
    T: Display + Serialize,
{
    fn format(&self, format: Format) -> Result<String> {
        match format {
            Format::Text => Ok(self.to_string()),
            Format::Json => serde_json::to_string(self).context("serializing output to json"),
        }
    }
}
