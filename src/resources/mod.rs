//! Operations on volume groups, logical volumes and physical volumes.
//!
//! Every operation renders a command line from a static [`CommandTemplate`], attaches the name
//! validation that applies to its arguments and hands both to the [`Executor`].
//!
//! [`CommandTemplate`]: crate::command::CommandTemplate

use serde::de::DeserializeOwned;

use crate::{
    command::CommandOptions,
    dependencies::CommandRunner,
    executor::{ExecuteError, Executor, Response, ValidationHook},
    models::Records,
};

pub mod lv;
pub mod pv;
pub mod vg;

pub use lv::LogicalVolumeCatalog;
pub use pv::PhysicalVolumeCatalog;
pub use vg::VolumeGroupCatalog;

/// Size of a logical volume or of a change to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SizeSpec {
    /// Size with an optional unit suffix, e.g. `4M` or `+1G` (`-L`).
    Size(String),
    /// Number of logical extents (`-l`).
    Extents(u64),
}

impl SizeSpec {
    fn push_args(&self, args: &mut Vec<String>) {
        match self {
            SizeSpec::Size(size) => args.extend(["-L".to_string(), size.clone()]),
            SizeSpec::Extents(extents) => args.extend(["-l".to_string(), extents.to_string()]),
        }
    }
}

/// Entry point to the LVM2 toolkit.
#[derive(Default)]
pub struct Lvm {
    executor: Executor,
}

impl Lvm {
    /// Create a client that runs the toolkit through the system shell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client that runs the toolkit through `runner`.
    pub fn with_runner(runner: impl CommandRunner + Send + Sync + 'static) -> Self {
        Self {
            executor: Executor::new(runner),
        }
    }

    pub fn executor(&self) -> &Executor {
        &self.executor
    }

    pub fn vg(&self) -> VolumeGroupCatalog<'_> {
        VolumeGroupCatalog::new(&self.executor)
    }

    pub fn lv(&self) -> LogicalVolumeCatalog<'_> {
        LogicalVolumeCatalog::new(&self.executor)
    }

    pub fn pv(&self) -> PhysicalVolumeCatalog<'_> {
        PhysicalVolumeCatalog::new(&self.executor)
    }
}

/// Run a summary command and decode the report into the variant `options` asks for.
async fn list_records<B, V>(
    executor: &Executor,
    command_line: &str,
    options: &CommandOptions,
    validate: Option<&ValidationHook<'_>>,
) -> Result<Response<Option<Records<B, V>>>, ExecuteError>
where
    B: DeserializeOwned,
    V: DeserializeOwned,
{
    if options.verbose {
        Ok(executor
            .execute_json::<Vec<V>>(command_line, validate)
            .await?
            .map(|records| records.map(Records::Verbose)))
    } else {
        Ok(executor
            .execute_json::<Vec<B>>(command_line, validate)
            .await?
            .map(|records| records.map(Records::Brief)))
    }
}
