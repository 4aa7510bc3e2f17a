pub mod chain;
pub mod cli;
pub mod color;
pub mod completions;
pub mod config;
pub mod discovery;
pub mod env;
pub mod error;
pub mod escape;
pub mod mapping;
pub mod output;
pub mod replacer;
pub mod scratch;
pub mod substitute;
pub mod verbose;

pub use chain::ReaderChain;
pub use cli::{Cli, Command, OutputFormat, ReplaceArgs};
pub use error::{Error, ExitCode, ReplaceError, Result};
pub use mapping::{Mapping, MappingTable};
pub use replacer::{Replacer, ReplacerOptions, Strategy};
pub use scratch::ScratchFile;
pub use substitute::SubstitutingReader;
