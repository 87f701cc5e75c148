use std::fs;
use std::path::Path;
use std::process::Command;

/// The package version, followed by the git revision when building from a checkout.
fn version() -> String {
    let version = env!("CARGO_PKG_VERSION").to_string();
    let revision = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty=+dirty"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .map(|output| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .unwrap_or_default();

    if revision.is_empty() {
        version
    } else {
        format!("{version} ({revision})")
    }
}

fn main() {
    let out_dir = std::env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    let path = Path::new(&out_dir).join("version.txt");
    if let Err(e) = fs::write(&path, version()) {
        panic!("cannot write {}: {}", path.display(), e);
    }
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");
}
