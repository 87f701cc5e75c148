use std::fs::File;
use std::io;
use std::io::stdout;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Error};
use clap::{Parser, ValueEnum};

use crate::code::{build_unit, UtilityCache};
use crate::gen::{emit_string, Inspect};
use crate::lang::c::C;

use super::SpecOpt;

#[derive(Parser, Debug, Clone)]
pub struct Opt {
    #[command(flatten)]
    pub spec: SpecOpt,
    #[arg(long, value_enum, default_value = "c")]
    pub lang: LangOpt,
    /// Where to write the generated code, instead of the standard output
    #[arg(long)]
    pub dest: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LangOpt {
    C,
    Inspect,
}

pub fn do_main(opt: Opt, stderr: &mut dyn io::Write) -> Result<(), Error> {
    let (ir, _) = opt.spec.load(stderr)?;

    let cache = UtilityCache::new();
    let unit = build_unit(&ir, &cache).context("cannot generate the support code")?;
    debug!("generated {} functions", unit.functions.len());

    let str = match opt.lang {
        LangOpt::C => emit_string(&unit, &C),
        LangOpt::Inspect => emit_string(&unit, &Inspect),
    };

    match &opt.dest {
        Some(path) => File::create(path)
            .with_context(|| format!("cannot create {}", path.display()))?
            .write_all(str.as_bytes())?,
        None => stdout().write_all(str.as_bytes())?,
    };

    Ok(())
}
