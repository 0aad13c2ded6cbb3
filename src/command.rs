//! Command line templates for the LVM2 toolkit.
//!
//! A [`CommandTemplate`] is built once per [`CommandDescriptor`] and renders the final command line
//! for every call. The rendered command always has the following shape:
//!
//! ```text
//! <command> --yes [--reportformat json] [--test] [--verbose] [arg1 [arg2 ...]]
//! ```
//!
//! `--yes` is always present so the toolkit never waits for an interactive answer.

use std::fmt::Display;

use typed_builder::TypedBuilder;

/// Flag that answers every prompt with yes.
const NON_INTERACTIVE_FLAG: &str = "--yes";
/// Flags that switch the report output to JSON.
const JSON_REPORT_FLAG: &str = "--reportformat json";
const TEST_FLAG: &str = "--test";
const VERBOSE_FLAG: &str = "--verbose";

/// Commands of the LVM2 toolkit this crate knows how to invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LvmCommand {
    VgDisplay,
    LvDisplay,
    PvDisplay,
    Vgs,
    Lvs,
    Pvs,
    VgCreate,
    LvCreate,
    PvCreate,
    VgRemove,
    LvRemove,
    PvRemove,
    VgExtend,
    LvExtend,
    VgReduce,
    LvReduce,
    VgRename,
    LvRename,
    LvResize,
    PvResize,
}

impl LvmCommand {
    pub fn as_str(self) -> &'static str {
        match self {
            LvmCommand::VgDisplay => "vgdisplay",
            LvmCommand::LvDisplay => "lvdisplay",
            LvmCommand::PvDisplay => "pvdisplay",
            LvmCommand::Vgs => "vgs",
            LvmCommand::Lvs => "lvs",
            LvmCommand::Pvs => "pvs",
            LvmCommand::VgCreate => "vgcreate",
            LvmCommand::LvCreate => "lvcreate",
            LvmCommand::PvCreate => "pvcreate",
            LvmCommand::VgRemove => "vgremove",
            LvmCommand::LvRemove => "lvremove",
            LvmCommand::PvRemove => "pvremove",
            LvmCommand::VgExtend => "vgextend",
            LvmCommand::LvExtend => "lvextend",
            LvmCommand::VgReduce => "vgreduce",
            LvmCommand::LvReduce => "lvreduce",
            LvmCommand::VgRename => "vgrename",
            LvmCommand::LvRename => "lvrename",
            LvmCommand::LvResize => "lvresize",
            LvmCommand::PvResize => "pvresize",
        }
    }
}

impl Display for LvmCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static description of one kind of toolkit invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct CommandDescriptor {
    /// The toolkit command to run.
    pub command: LvmCommand,
    /// Request the report in JSON format.
    #[builder(default)]
    pub json: bool,
    /// Ignore positional arguments passed at call time.
    #[builder(default)]
    pub no_args: bool,
}

/// Per-call toolkit options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, TypedBuilder)]
pub struct CommandOptions {
    /// Run in test mode, the toolkit does not update any metadata.
    #[builder(default)]
    pub test: bool,
    /// Ask the toolkit for verbose output.
    ///
    /// Summary commands report extra columns in verbose mode.
    #[builder(default)]
    pub verbose: bool,
}

/// Everything that varies between two calls of the same template.
#[derive(Debug, Clone, Default, PartialEq, Eq, TypedBuilder)]
pub struct Invocation {
    #[builder(default)]
    pub options: CommandOptions,
    #[builder(default)]
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new(options: CommandOptions, args: Vec<String>) -> Self {
        Self { options, args }
    }
}

/// A reusable command line template.
///
/// The part of the command line that only depends on the descriptor is rendered once, when the
/// template is created. [`CommandTemplate::render`] only appends the per-call parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    descriptor: CommandDescriptor,
    prefix: String,
}

impl CommandTemplate {
    pub fn new(descriptor: CommandDescriptor) -> Self {
        let mut prefix = format!("{} {NON_INTERACTIVE_FLAG}", descriptor.command);

        if descriptor.json {
            prefix.push(' ');
            prefix.push_str(JSON_REPORT_FLAG);
        }

        Self { descriptor, prefix }
    }

    pub fn descriptor(&self) -> &CommandDescriptor {
        &self.descriptor
    }

    /// The command line without any per-call options or arguments.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Render the full command line for a single call.
    ///
    /// Arguments that contain a space are wrapped in double quotes, nothing else is escaped.
    /// Names must be validated before they are passed in here.
    pub fn render(&self, invocation: &Invocation) -> String {
        let mut command_line = self.prefix.clone();

        if invocation.options.test {
            command_line.push(' ');
            command_line.push_str(TEST_FLAG);
        }

        if invocation.options.verbose {
            command_line.push(' ');
            command_line.push_str(VERBOSE_FLAG);
        }

        if !self.descriptor.no_args {
            for arg in &invocation.args {
                command_line.push(' ');
                if arg.contains(' ') {
                    command_line.push('"');
                    command_line.push_str(arg);
                    command_line.push('"');
                } else {
                    command_line.push_str(arg);
                }
            }
        }

        command_line
    }
}

impl From<CommandDescriptor> for CommandTemplate {
    fn from(descriptor: CommandDescriptor) -> Self {
        Self::new(descriptor)
    }
}
