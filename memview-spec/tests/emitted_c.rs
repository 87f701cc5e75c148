//! Runs the generated C code against a small host, when a C compiler is available.

use std::fs;
use std::path::Path;
use std::process::Command;

use memview_spec::tools::{memview_gen, ColorOpt, SpecOpt};
use pretty_assertions::assert_eq;

const HOST: &str = r#"
#include <stdarg.h>
#include <stdio.h>
#include <stdlib.h>

#include "views.c"

struct memview_handle {
    int refcount;
    char *data;
    ssize_t shape[MEMVIEW_MAX_DIMS];
    ssize_t strides[MEMVIEW_MAX_DIMS];
};

static int live_handles = 0;

void memview_handle_incref(memview_handle *handle) {
    handle->refcount++;
}

void memview_handle_decref(memview_handle *handle) {
    if (--handle->refcount == 0) {
        free(handle->data);
        free(handle);
        live_handles--;
    }
}

int memview_init_slice(memview_handle *handle, int ndim, memview_slice *slice) {
    slice->handle = handle;
    slice->data = handle->data;
    for (int i = 0; i < ndim; i++) {
        slice->shape[i] = handle->shape[i];
        slice->strides[i] = handle->strides[i];
        slice->suboffsets[i] = -1;
    }
    return 0;
}

memview_handle *memview_alloc_contiguous(int ndim, const ssize_t *shape, ssize_t itemsize, char order) {
    memview_handle *handle = calloc(1, sizeof(memview_handle));
    ssize_t size = itemsize;
    for (int k = 0; k < ndim; k++) {
        int i = order == 'C' ? ndim - 1 - k : k;
        handle->shape[i] = shape[i];
        handle->strides[i] = size;
        size *= shape[i];
    }
    handle->data = calloc(size, 1);
    handle->refcount = 1;
    live_handles++;
    return handle;
}

void memview_error(const char *format, ...) {
    va_list args;
    va_start(args, format);
    printf("error: ");
    vprintf(format, args);
    printf("\n");
    va_end(args);
}

static void print(const char *name, const memview_slice *slice) {
    const double *data = (const double *)slice->data;
    printf("%s =", name);
    for (int i = 0; i < slice->shape[0] * slice->shape[1]; i++) {
        printf(" %g", data[i]);
    }
    printf("\n");
}

/* A new C-contiguous slice holding first, first + 1, ..., or all 9s when first is 0. */
static void new_slice(memview_slice *slice, ssize_t rows, ssize_t cols, double first) {
    ssize_t shape[2] = {rows, cols};
    memview_init_slice(memview_alloc_contiguous(2, shape, sizeof(double), 'C'), 2, slice);
    for (int i = 0; i < rows * cols; i++) {
        ((double *)slice->data)[i] = first == 0 ? 9 : first + i;
    }
}

int main(void) {
    memview_slice a, f, c;
    new_slice(&a, 2, 3, 1);
    f.handle = NULL;
    f.data = NULL;

    if (memview_new_fortran_f64_2d_from_c(&a, &f) != 0) return 1;
    print("f", &f);

    if (memview_new_c_f64_2d_from_c(&a, &a) != 0) return 1;
    print("a", &a);

    new_slice(&c, 3, 2, 0);
    printf("rc = %d\n", memview_copy_f64_2d_c_to_c(&a, &c));
    print("c", &c);

    memview_handle_decref(a.handle);
    memview_handle_decref(f.handle);
    memview_handle_decref(c.handle);
    printf("live = %d\n", live_handles);
    return 0;
}
"#;

fn compiler() -> Option<String> {
    let cc = std::env::var("CC").unwrap_or_else(|_| "cc".into());
    let found = Command::new(&cc)
        .arg("--version")
        .output()
        .map(|out| out.status.success())
        .unwrap_or(false);
    found.then_some(cc)
}

fn generate(dir: &Path, source: &str) {
    let spec = dir.join("views.spec");
    fs::write(&spec, source).unwrap();

    let mut stderr: Vec<u8> = vec![];
    memview_gen::do_main(
        memview_gen::Opt {
            spec: SpecOpt {
                spec,
                config: None,
                max_dims: None,
                color: ColorOpt::Never,
            },
            lang: memview_gen::LangOpt::C,
            dest: Some(dir.join("views.c")),
        },
        &mut stderr,
    )
    .unwrap();
    assert!(stderr.is_empty(), "{}", String::from_utf8_lossy(&stderr));
}

#[test]
fn test_generated_copies_run() {
    let cc = match compiler() {
        Some(cc) => cc,
        None => {
            eprintln!("no C compiler found, skipping");
            return;
        }
    };

    let dir = tempfile::tempdir().unwrap();
    generate(
        dir.path(),
        "
        f64[:, ::1] a;
        f64[::1, :] f;
        f64[:, ::1] c;
        copy a to new f;
        copy a to new a;
        copy a to c;
        ",
    );
    fs::write(dir.path().join("host.c"), HOST).unwrap();

    let exe = dir.path().join("host");
    let status = Command::new(&cc)
        .current_dir(dir.path())
        .arg("-o")
        .arg(&exe)
        .arg("host.c")
        .status()
        .unwrap();
    assert!(status.success());

    let output = Command::new(&exe).output().unwrap();
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "f = 1 4 2 5 3 6\n\
         a = 1 2 3 4 5 6\n\
         error: memoryview shapes not the same in dimension 0\n\
         rc = -1\n\
         c = 9 9 9 9 9 9\n\
         live = 0\n"
    );
}
