use clap::Parser;
use speculoos::prelude::*;

use memview::{main_gen_autocompletion, GenAutocompletionOpt, Opt, Tool};
use memview_spec::tools::memview_gen::LangOpt;

#[test]
fn test_gen_options() {
    let opt = Opt::try_parse_from([
        "memview", "-vv", "gen", "--spec", "views.spec", "--lang", "inspect",
    ])
    .unwrap();

    assert_that!(opt.logger.verbose).is_equal_to(2);
    match opt.tool {
        Tool::Gen(gen) => {
            assert_that!(gen.lang).is_equal_to(LangOpt::Inspect);
            assert_that!(gen.spec.spec.to_str()).is_equal_to(Some("views.spec"));
            assert_that!(gen.dest).is_none();
        }
        other => panic!("unexpected tool {:?}", other),
    }
}

#[test]
fn test_check_defaults() {
    let opt = Opt::try_parse_from(["memview", "check", "--max-dims", "3"]).unwrap();
    match opt.tool {
        Tool::Check(check) => {
            assert_that!(check.spec.spec.to_str()).is_equal_to(Some("memview.spec"));
            assert_that!(check.spec.max_dims).is_equal_to(Some(3));
            assert_that!(check.list).is_false();
        }
        other => panic!("unexpected tool {:?}", other),
    }
}

#[test]
fn test_unknown_language() {
    assert_that!(Opt::try_parse_from(["memview", "gen", "--lang", "cobol"])).is_err();
}

#[test]
fn test_autocompletion_files() {
    let dir = tempfile::tempdir().unwrap();
    main_gen_autocompletion(GenAutocompletionOpt {
        target: Some(dir.path().to_owned()),
    })
    .unwrap();

    for file in ["memview.bash", "_memview", "memview.fish"] {
        assert_that!(dir.path().join(file).exists()).is_true();
    }
}
