use std::time::Duration;

use anyhow::Result;
use indicatif::ProgressBar;

use super::{Interaction, SpinnerHandle, SpinnerInteraction};

const TICK_INTERVAL: Duration = Duration::from_millis(80);

impl SpinnerInteraction for Interaction {
    fn start_spinner(&self, message: String) -> Result<SpinnerHandle> {
        // Draws to stderr, stdout is reserved for the command output.
        let progress_bar = ProgressBar::new_spinner().with_message(message);
        progress_bar.enable_steady_tick(TICK_INTERVAL);

        Ok(SpinnerHandle::new(Box::new(move || {
            progress_bar.finish_and_clear();
        })))
    }
}
