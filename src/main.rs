use clap::Parser;

use memview::error::NiceError;
use memview::{main_gen_autocompletion, Opt, Tool};
use memview_spec::tools::*;

fn main() {
    let opt = Opt::parse();
    opt.logger.enable_log();

    match opt.tool {
        Tool::Check(opt) => memview_check::do_main(opt, &mut std::io::stderr()),
        Tool::Gen(opt) => memview_gen::do_main(opt, &mut std::io::stderr()),
        Tool::GenAutocompletion(opt) => main_gen_autocompletion(opt),
    }
    .nice_unwrap()
}
