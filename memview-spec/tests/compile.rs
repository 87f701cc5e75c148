use memview_spec::ast;
use memview_spec::compile::{compile, CompileOptions};
use memview_spec::dgns::DiagnosticContext;
use memview_spec::ir;
use memview_spec::sem::{Access, AxisSpec, BufferRequest, Mode, Packing};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

fn compile_with(source: &str, options: CompileOptions) -> (Option<ir::Spec>, DiagnosticContext) {
    let ast: ast::Spec = syn::parse_str(source).expect("the source should parse");
    let mut dgns = DiagnosticContext::new("test.spec", source);
    let ir = compile(&ast, &mut dgns, options).ok();
    (ir, dgns)
}

fn compile_str(source: &str) -> (Option<ir::Spec>, DiagnosticContext) {
    compile_with(source, CompileOptions::default())
}

/// Compiles a source expected to fail, returning the error messages.
fn errors(source: &str) -> Vec<String> {
    let (ir, dgns) = compile_str(source);
    assert!(ir.is_none(), "compilation of {:?} should fail", source);
    dgns.diagnostics()
        .iter()
        .map(|d| d.message().to_string())
        .collect()
}

fn view<'a>(spec: &'a ir::Spec, name: &str) -> &'a ir::ViewDecl {
    spec.views()
        .find(|decl| decl.name.ident == name)
        .map(|decl| decl.as_ref())
        .expect("the view should be declared")
}

#[test]
fn test_layouts() {
    let (ir, dgns) = compile_str(
        "
        f64[:, ::1] c;
        f64[::1, :] f;
        i32[:, :] s;
        u8[::view.generic, ::view.contiguous] g;
        f32[::cython.view.indirect_contiguous, ::view.contiguous] p;
        ",
    );
    assert!(!dgns.has_errors());
    let ir = ir.unwrap();

    assert_eq!(view(&ir, "c").ty.mode(), Mode::C);
    assert_eq!(view(&ir, "f").ty.mode(), Mode::Fortran);
    assert_eq!(view(&ir, "s").ty.mode(), Mode::Strided);
    assert_eq!(view(&ir, "g").ty.mode(), Mode::Full);

    assert_eq!(
        view(&ir, "c").ty.axes(),
        &[
            AxisSpec::new(Access::Direct, Packing::Follow),
            AxisSpec::new(Access::Direct, Packing::Contig)
        ]
    );
    assert_eq!(
        view(&ir, "p").ty.axes(),
        &[
            AxisSpec::new(Access::Ptr, Packing::Contig),
            AxisSpec::new(Access::Direct, Packing::Contig)
        ]
    );
    assert_eq!(view(&ir, "s").ty.buffer_request(), BufferRequest::Strided);
    assert_eq!(view(&ir, "g").ty.buffer_request(), BufferRequest::Full);
}

#[test]
fn test_zero_start_is_accepted() {
    let (ir, _) = compile_str("i64[0:, 0::1] a;");
    let ir = ir.unwrap();
    assert_eq!(view(&ir, "a").ty.mode(), Mode::C);
}

#[test]
fn test_bare_names() {
    let (ir, _) = compile_str("f64[::strided, ::follow] a;");
    assert!(ir.is_none());

    let (ir, _) = compile_str("f64[::generic, ::strided] a;");
    assert!(ir.is_some());

    let options = CompileOptions {
        bare_names: false,
        ..Default::default()
    };
    let (ir, dgns) = compile_with("f64[::strided] a;", options);
    assert!(ir.is_none());
    assert_eq!(dgns.diagnostics()[0].message(), "Invalid axis specification.");
    let help = dgns.diagnostics()[0].help().unwrap_or_default();
    assert!(help.contains("strided"), "unexpected help: {}", help);
}

#[test]
fn test_slot_errors() {
    assert_eq!(
        errors("f64[1:] a;"),
        vec!["there must be nothing or the value 0 (zero) in the start slot."]
    );
    assert_eq!(
        errors("f64[:5] a;"),
        vec!["there must be nothing in the stop slot."]
    );
    assert_eq!(
        errors("f64[:, ::2] a;"),
        vec!["Only the value 1 (one) or valid axis specification allowed in the step slot."]
    );
    assert_eq!(
        errors("f64[:, ::1, :] a;"),
        vec!["The value 1 (one) may appear in the first or last axis specification only."]
    );
    assert_eq!(
        errors("f64[::1, ::1] a;"),
        vec!["Cannot specify an array that is both C and Fortran contiguous."]
    );
    assert_eq!(
        errors("f64[::view.strided, ::1] a;"),
        vec!["Invalid axis specification for a C/Fortran contiguous array."]
    );
    assert_eq!(
        errors("f64[::(1 + 1)] a;"),
        vec!["no expressions allowed in axis spec, only names and literals."]
    );
    assert_eq!(
        errors("f64[::numpy.strided] a;"),
        vec!["undeclared name not builtin: numpy"]
    );
    assert_eq!(
        errors("f64[::view.banana] a;"),
        vec!["Invalid axis specification."]
    );
}

#[test]
fn test_validation_errors() {
    assert_eq!(
        errors("f64[::view.contiguous, ::view.indirect_contiguous] a;"),
        vec!["Indirect contiguous dimensions must precede direct contiguous"]
    );
    assert_eq!(
        errors("f64[::view.generic_contiguous, ::view.contiguous] a;"),
        vec!["Generic contiguous cannot be combined with direct contiguous"]
    );
    assert_eq!(
        errors("f64[::view.contiguous, ::view.contiguous] a;"),
        vec!["Only one direct contiguous axis may be specified."]
    );
}

#[test]
fn test_rank_limits() {
    assert_eq!(errors("f64[] a;"), vec!["a memoryview needs at least one axis"]);

    let options = CompileOptions {
        max_dims: 2,
        ..Default::default()
    };
    let (ir, dgns) = compile_with("f64[:, :, :] a;", options);
    assert!(ir.is_none());
    assert_eq!(
        dgns.diagnostics()[0].message(),
        "a memoryview may have at most 2 dimensions, this one has 3"
    );
}

#[test]
fn test_every_bad_declaration_is_reported() {
    let messages = errors(
        "
        f64[1:] a;
        f64[:] b;
        bool[:] c;
        ",
    );
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1], "invalid element type `bool`");
}

#[test]
fn test_names() {
    assert_eq!(
        errors("f64[:] a; i32[:] a;"),
        vec!["view `a` already defined"]
    );
    assert_eq!(
        errors("f64[:] a; copy a to b;"),
        vec!["no view named `b` found in the current scope"]
    );
}

#[test]
fn test_copy_statements() {
    let (ir, _) = compile_str(
        "
        f64[:, :] src;
        f64[::1, :] dst;
        copy src to dst;
        copy src to new dst;
        ",
    );
    let ir = ir.unwrap();
    let copies: Vec<_> = ir
        .stmts
        .iter()
        .filter_map(|stmt| match stmt {
            ir::Stmt::Copy(copy) => Some((copy.to_new, copy.key.from, copy.key.to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        copies,
        vec![
            (false, Mode::Strided, Mode::Fortran),
            (true, Mode::Strided, Mode::Fortran)
        ]
    );
}

#[test]
fn test_copy_errors() {
    let (ir, dgns) = compile_str("f64[:] a; f32[:] b; copy a to b;");
    assert!(ir.is_none());
    let diagnostic = &dgns.diagnostics()[0];
    assert_eq!(diagnostic.message(), "cannot copy `a` to `b`");
    assert_eq!(diagnostic.note(), Some("dtype mismatch: `f64` and `f32`"));

    let messages = errors("f64[:] a; f64[:, :] b; copy a to b;");
    assert_eq!(messages, vec!["cannot copy `a` to `b`"]);

    let messages = errors("f64[::view.indirect] a; f64[::1] b; copy a to b;");
    assert_eq!(messages, vec!["cannot copy `a` to `b`"]);

    let messages = errors("f64[:, :] a; f64[:, :] b; copy a to new b;");
    assert_eq!(messages, vec!["cannot copy `a` to `b`"]);
}

#[test]
fn test_copy_onto_itself() {
    let (ir, dgns) = compile_str("f64[:, ::1] a; copy a to new a;");
    assert!(ir.is_some());
    assert!(dgns.diagnostics().is_empty());

    let (ir, dgns) = compile_str("f64[:, ::1] a; copy a to a;");
    assert!(ir.is_some());
    assert!(!dgns.has_errors());
    let messages: Vec<_> = dgns.diagnostics().iter().map(|d| d.message()).collect();
    assert_eq!(messages, vec!["copying `a` onto itself has no effect"]);
}

#[test]
fn test_assignment_checks_conformance() {
    let (ir, _) = compile_str("f64[:, ::1] c; f64[:, :] s; s = c;");
    assert!(ir.is_some());

    let (ir, dgns) = compile_str("f64[:, ::1] c; f64[:, :] s; c = s;");
    assert!(ir.is_none());
    let diagnostic = &dgns.diagnostics()[0];
    assert_eq!(diagnostic.message(), "cannot assign `s` to `c`");
    assert_eq!(
        diagnostic.note(),
        Some("a view of type f64[ds, ds] is not a view of type f64[d_, dc]")
    );
}

#[test]
fn test_diagnostics_point_at_the_axis() {
    let source = "f64[:, ::2] a;";
    let (_, dgns) = compile_str(source);
    colored::control::set_override(false);
    let rendered = dgns.diagnostics()[0].to_string();
    assert_that!(rendered.contains("test.spec:1:")).is_true();
    assert_that!(rendered.contains("f64[:, ::2] a;")).is_true();
}
