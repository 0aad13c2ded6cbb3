//! This module defines traits for external dependencies (the LVM2 toolkit processes) to make them
//! easier to mock and substitute in tests or other environments. The executor only ever talks to
//! the toolkit through [`CommandRunner`].
pub mod process;

pub use process::*;

#[cfg(test)]
pub mod mocks {
    pub use super::process::mocks::*;
}
