use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use memview_spec::tools::{memview_check, memview_gen};

#[derive(Parser, Debug)]
#[command(
    name = "memview",
    version,
    long_version = include_str!(concat!(env!("OUT_DIR"), "/version.txt")),
    about = "Checks memory-view declarations and generates their support code"
)]
pub struct Opt {
    #[command(flatten)]
    pub logger: LoggerOpt,

    /// Which tool to use
    #[command(subcommand)]
    pub tool: Tool,
}

#[derive(Args, Debug, Clone)]
pub struct LoggerOpt {
    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Tool {
    /// Check a declaration file, reporting every invalid view
    Check(memview_check::Opt),
    /// Generate the support code of a declaration file
    Gen(memview_gen::Opt),
    /// Generate the autocompletion files for the shell
    GenAutocompletion(GenAutocompletionOpt),
}

#[derive(Args, Debug, Clone)]
pub struct GenAutocompletionOpt {
    /// Where to write the autocompletion files
    #[arg(short = 't', long = "target")]
    pub target: Option<PathBuf>,
}

impl LoggerOpt {
    pub fn enable_log(&self) {
        if self.verbose > 0 {
            std::env::set_var("RUST_BACKTRACE", "1");
            match self.verbose {
                0 => unreachable!(),
                1 => std::env::set_var("RUST_LOG", "info"),
                2 => std::env::set_var("RUST_LOG", "debug"),
                _ => std::env::set_var("RUST_LOG", "trace"),
            }
        }

        env_logger::Builder::from_default_env()
            .format_timestamp_nanos()
            .init();
        better_panic::install();
    }
}
