use std::fs;
use std::path::Path;

use memview_spec::tools::{memview_check, memview_gen, ColorOpt, SpecOpt};
use speculoos::prelude::*;

fn spec_opt(path: &Path) -> SpecOpt {
    SpecOpt {
        spec: path.to_owned(),
        config: None,
        max_dims: None,
        color: ColorOpt::Never,
    }
}

#[test]
fn test_gen_writes_the_unit() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("views.spec");
    let dest = dir.path().join("views.c");
    fs::write(&spec, "f64[:, ::1] a;\nf64[::1, :] b;\ncopy a to new b;\n").unwrap();

    let mut stderr: Vec<u8> = vec![];
    memview_gen::do_main(
        memview_gen::Opt {
            spec: spec_opt(&spec),
            lang: memview_gen::LangOpt::C,
            dest: Some(dest.clone()),
        },
        &mut stderr,
    )
    .unwrap();

    assert!(stderr.is_empty());
    let text = fs::read_to_string(&dest).unwrap();
    assert!(text.contains("memview_new_fortran_f64_2d_from_c("));
    assert!(text.contains("memview_copy_f64_2d_c_to_fortran("));
    assert!(text.contains("memview_alloc_contiguous("));
}

#[test]
fn test_check_reports_errors() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("bad.spec");
    fs::write(&spec, "f64[:, ::2] a;\n").unwrap();

    let mut stderr: Vec<u8> = vec![];
    let result = memview_check::do_main(
        memview_check::Opt {
            spec: spec_opt(&spec),
            list: false,
        },
        &mut stderr,
    );

    let error = result.unwrap_err();
    assert_eq!(
        error.to_string(),
        "compilation stopped due to previous errors"
    );
    let stderr = String::from_utf8(stderr).unwrap();
    assert!(stderr.contains(
        "Error: Only the value 1 (one) or valid axis specification allowed in the step slot."
    ));
    assert!(stderr.contains("bad.spec:1:"));
}

#[test]
fn test_check_reports_syntax_errors() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("bad.spec");
    fs::write(&spec, "f64[:, :]\n").unwrap();

    let mut stderr: Vec<u8> = vec![];
    let result = memview_check::do_main(
        memview_check::Opt {
            spec: spec_opt(&spec),
            list: false,
        },
        &mut stderr,
    );

    assert_that!(result).is_err();
    assert!(!stderr.is_empty());
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("views.spec");
    let config = dir.path().join("memview.yaml");
    fs::write(&spec, "f64[::view.strided] a;\n").unwrap();
    fs::write(&config, "modules: [mv]\n").unwrap();

    let opt = SpecOpt {
        config: Some(config),
        ..spec_opt(&spec)
    };
    let mut stderr: Vec<u8> = vec![];
    assert_that!(opt.load(&mut stderr)).is_err();

    fs::write(&spec, "f64[::mv.strided] a;\n").unwrap();
    let (ir, _) = opt.load(&mut stderr).unwrap();
    assert_eq!(
        memview_check::describe(&ir),
        "a: f64[ds] (strided, Strided)\n"
    );
}

#[test]
fn test_max_dims_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let spec = dir.path().join("views.spec");
    fs::write(&spec, "f64[:, :, :] a;\n").unwrap();

    let opt = SpecOpt {
        max_dims: Some(2),
        ..spec_opt(&spec)
    };
    let mut stderr: Vec<u8> = vec![];
    assert_that!(opt.load(&mut stderr)).is_err();
    assert!(String::from_utf8(stderr)
        .unwrap()
        .contains("at most 2 dimensions"));
}
