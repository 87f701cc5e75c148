use std::io;
use std::io::Write;

use anyhow::Error;
use clap::Parser;

use crate::ir;

use super::SpecOpt;

#[derive(Parser, Debug, Clone)]
pub struct Opt {
    #[command(flatten)]
    pub spec: SpecOpt,
    /// Print the resolved type of each view
    #[arg(long)]
    pub list: bool,
}

/// One line per declared view: name, axis specs, layout mode and buffer request.
pub fn describe(spec: &ir::Spec) -> String {
    spec.views()
        .map(|decl| {
            format!(
                "{}: {} ({}, {:?})\n",
                decl.name.ident,
                decl.ty,
                decl.ty.mode(),
                decl.ty.buffer_request()
            )
        })
        .collect()
}

pub fn do_main(opt: Opt, stderr: &mut dyn io::Write) -> Result<(), Error> {
    let (ir, _) = opt.spec.load(stderr)?;
    info!("{} is valid", opt.spec.spec.display());

    if opt.list {
        io::stdout().write_all(describe(&ir).as_bytes())?;
    }

    Ok(())
}
