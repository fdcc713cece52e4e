use std::process::Command;

/// Embed the short git SHA so `taxcast --version` identifies the build.
fn main() {
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let repo_root = format!("{manifest_dir}/..");

    let sha = Command::new("git")
        .args(["-C", &repo_root, "rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rerun-if-changed={repo_root}/.git/HEAD");
    println!("cargo:rustc-env=TAXCAST_BUILD_SHA={sha}");
}
