//! Generation of the autocompletion scripts, inside the target/autocompletion directory.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Error};
use clap::CommandFactory;
use clap_complete::{Generator, Shell};

use crate::{GenAutocompletionOpt, Opt};

pub fn main_gen_autocompletion(opt: GenAutocompletionOpt) -> Result<(), Error> {
    let target = opt.target.unwrap_or_else(|| {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("target/autocompletion")
    });
    std::fs::create_dir_all(&target)
        .with_context(|| format!("Failed to create target dir: {}", target.display()))?;

    for shell in [Shell::Bash, Shell::Zsh, Shell::Fish] {
        generate(shell, &target)?;
    }
    Ok(())
}

fn generate(shell: Shell, target: &Path) -> Result<(), Error> {
    let path = target.join(shell.file_name("memview"));
    let mut file = File::create(&path).with_context(|| {
        format!("Failed to create completion for {} at {}", shell, path.display())
    })?;
    clap_complete::generate(shell, &mut Opt::command(), "memview", &mut file);
    info!("written {}", path.display());
    Ok(())
}
