/// Build script for erlang-planner
/// Embeds version and source revision for `erlang-planner version`

fn main() {
    println!("cargo:rerun-if-changed=Cargo.toml");

    if let Ok(version) = std::env::var("CARGO_PKG_VERSION") {
        println!("cargo:rustc-env=ERLANG_PLANNER_VERSION={version}");
    }

    // Missing git (e.g. a crates.io tarball) leaves GIT_HASH unset
    if let Ok(output) = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
    {
        if output.status.success() {
            if let Ok(hash) = String::from_utf8(output.stdout) {
                println!("cargo:rustc-env=GIT_HASH={}", hash.trim());
            }
        }
    }
}
