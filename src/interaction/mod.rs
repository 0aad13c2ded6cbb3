//! User interaction of the CLI: confirmation prompts and progress spinners.
//!
//! Commands only see the traits in this module, [`Interaction`] is the terminal implementation.
use anyhow::Result;
use typed_builder::TypedBuilder;

mod confirm;
mod spinner;

#[derive(Debug, Default, Clone)]
pub struct Interaction;

impl Interaction {
    pub fn new() -> Self {
        Default::default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, TypedBuilder)]
pub struct ConfirmationPromptOptions {
    #[builder(setter(into))]
    message: String,
    #[builder(default, setter(strip_option))]
    default: Option<bool>,
    /// Printed before the prompt, e.g. to explain what is about to be destroyed.
    #[builder(default, setter(strip_option, into))]
    pre_confirmation_help_text: Option<String>,
}

impl ConfirmationPromptOptions {
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationPromptResult {
    Yes,
    No,
    Canceled,
}

pub trait ConfirmationPrompt {
    fn confirm(&self, options: ConfirmationPromptOptions) -> Result<ConfirmationPromptResult>;
}

/// Stops its spinner when dropped.
pub struct SpinnerHandle {
    stop_spinner: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl SpinnerHandle {
    pub fn new(stop_spinner: Box<dyn FnOnce() + Send + Sync>) -> Self {
        Self {
            stop_spinner: Some(stop_spinner),
        }
    }
}

impl Drop for SpinnerHandle {
    fn drop(&mut self) {
        if let Some(stop_spinner) = self.stop_spinner.take() {
            stop_spinner();
        }
    }
}

pub trait SpinnerInteraction {
    fn start_spinner(&self, message: String) -> Result<SpinnerHandle>;
}

#[cfg(test)]
pub mod mocks {
    use super::*;
    use mockall::mock;

    mock! {
        pub Interaction {}

        impl ConfirmationPrompt for Interaction {
            fn confirm(&self, options: ConfirmationPromptOptions) -> Result<ConfirmationPromptResult>;
        }

        impl SpinnerInteraction for Interaction {
            fn start_spinner(&self, message: String) -> Result<SpinnerHandle>;
        }
    }

    /// Spinner handle that does nothing when dropped.
    pub fn noop_spinner() -> SpinnerHandle {
        SpinnerHandle::new(Box::new(|| {}))
    }
}
