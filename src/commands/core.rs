//! Core traits shared by all commands.
//!
//! - [`Command`] is a unit of work the CLI runs.
//! - [`CommandWithOutput`] produces a value, [`CommandWithOutputExt::with_print_to_stdout`] turns
//!   it into a [`Command`] that prints that value in the requested [`Format`].

use anyhow::Result;
use async_trait::async_trait;

use crate::formatting::{Format, Formattable};

#[async_trait]
pub trait Command {
    async fn execute(&mut self) -> Result<()>;
}

#[async_trait]
pub trait CommandWithOutput {
    type Output;

    async fn execute(&mut self) -> Result<Self::Output>;
}

pub trait CommandWithOutputExt {
    /// Wrap the command so its output is printed to stdout in `format`.
    fn with_print_to_stdout(self, format: Format) -> Result<Box<dyn Command>>;
}

/// Prints the output of the wrapped command.
pub struct PrintToStdoutCommand<C> {
    command: C,
    format: Format,
}

impl<C> PrintToStdoutCommand<C> {
    pub fn new(command: C, format: Format) -> Self {
        Self { command, format }
    }

    /// Execute the wrapped command and format its output.
    async fn render(&mut self) -> Result<String>
    where
        C: CommandWithOutput + Send,
        C::Output: Formattable,
    {
        let output = self.command.execute().await?;
        output.format(self.format)
    }
}

#[async_trait]
impl<C> Command for PrintToStdoutCommand<C>
where
    C: CommandWithOutput + Send,
    C::Output: Formattable,
{
    async fn execute(&mut self) -> Result<()> {
        let formatted_output = self.render().await?;

        // Tables already end with a newline.
        if formatted_output.ends_with('\n') {
            print!("{formatted_output}");
        } else {
            println!("{formatted_output}");
        }

        Ok(())
    }
}

impl<C> CommandWithOutputExt for C
where
    C: CommandWithOutput + Send + 'static,
    C::Output: Formattable,
{
    fn with_print_to_stdout(self, format: Format) -> Result<Box<dyn Command>> {
        Ok(Box::new(PrintToStdoutCommand::new(self, format)))
    }
}
