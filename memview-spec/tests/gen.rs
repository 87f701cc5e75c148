use std::thread;

use memview_spec::ast;
use memview_spec::code::{build_unit, CopyKey, UtilityCache, UtilityKey, INDEX_FULL};
use memview_spec::compile::{compile, CompileOptions};
use memview_spec::dgns::DiagnosticContext;
use memview_spec::gen::{emit_string, Inspect};
use memview_spec::ir;
use memview_spec::lang::c::C;
use memview_spec::sem::{Access, AxisSpec, Dtype, Order, Packing, ViewType};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

fn spec(source: &str) -> ir::Spec {
    let ast: ast::Spec = syn::parse_str(source).unwrap();
    let mut dgns = DiagnosticContext::new("test.spec", source);
    compile(&ast, &mut dgns, CompileOptions::default()).unwrap()
}

fn names(cache: &UtilityCache) -> Vec<String> {
    cache
        .functions()
        .iter()
        .map(|f| f.name().to_string())
        .collect()
}

#[test]
fn test_c_unit() {
    let cache = UtilityCache::new();
    let unit = build_unit(
        &spec(
            "
            f64[:, ::1] a;
            f64[:, :] b;
            copy b to a;
            b = a;
            ",
        ),
        &cache,
    )
    .unwrap();
    let text = emit_string(&unit, &C);

    assert_that!(text.starts_with("/* Generated by memview. Do not edit. */\n")).is_true();
    for needle in [
        "#define MEMVIEW_MAX_DIMS 8\n",
        "} memview_slice;\n",
        "extern void memview_error(",
        "static int memview_is_c_contiguous(const memview_slice *mvs, int ndim, ssize_t itemsize) {",
        "static int memview_copy_f64_2d_strided_to_c(",
        "memoryview shapes not the same in dimension %d",
        "static inline void memview_assign_2d(",
    ] {
        assert!(text.contains(needle), "missing {:?} in:\n{}", needle, text);
    }

    // every definition is forward declared first
    let forward = text.find("memview_copy_f64_2d_strided_to_c(const").unwrap();
    let definition = text.rfind("memview_copy_f64_2d_strided_to_c(const").unwrap();
    assert!(forward < definition);
}

#[test]
fn test_inspect_unit() {
    let cache = UtilityCache::new();
    let unit = build_unit(&spec("i32[::view.generic, ::view.contiguous] a;"), &cache).unwrap();
    let text = emit_string(&unit, &Inspect);

    assert_that!(text.starts_with("// max dims: 8\n")).is_true();
    assert!(text.contains(&format!("fn {}(", INDEX_FULL)), "{}", text);
    assert!(text.contains("fn memview_item_i32_fs_dc("), "{}", text);
    assert!(text.contains("extern fn memview_error("), "{}", text);
}

#[test]
fn test_cache_is_shared_between_units() {
    let cache = UtilityCache::new();

    build_unit(&spec("f64[:, ::1] a; f64[:, ::1] b;"), &cache).unwrap();
    assert_eq!(
        names(&cache),
        vec!["memview_item_f64_d__dc", "memview_is_c_contiguous"]
    );

    let unit = build_unit(&spec("f64[:, ::1] c; f32[::1] d;"), &cache).unwrap();
    assert_eq!(
        names(&cache),
        vec![
            "memview_item_f64_d__dc",
            "memview_is_c_contiguous",
            "memview_item_f32_dc"
        ]
    );
    assert_eq!(unit.functions.len(), 3);
}

#[test]
fn test_concurrent_requests() {
    let cache = UtilityCache::new();
    let strided = ViewType::new(
        Dtype::F64,
        vec![AxisSpec::new(Access::Direct, Packing::Strided); 3],
    )
    .unwrap();
    let contiguous = ViewType::contiguous(Dtype::F64, 3, Order::Fortran);
    let key = CopyKey::for_new(&strided, &contiguous).unwrap();

    let requested: Vec<String> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = &cache;
                s.spawn(move || {
                    cache.request(&UtilityKey::IsContiguous(Order::C)).unwrap();
                    cache.request(&UtilityKey::CopyNew(key)).unwrap()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert!(requested.iter().all(|name| name == &requested[0]));
    assert_eq!(requested[0], "memview_new_fortran_f64_3d_from_strided");
    // the copy, its contents copy and the contiguity check, once each
    assert_eq!(cache.len(), 3);
}
