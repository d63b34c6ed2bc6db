//! Stamps the simulator binary with its version, commit and build date so
//! saved balance reports can be traced back to the code that produced them.

use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::Command;

const UNKNOWN: &str = "unknown";

/// Short commit hash: `ZARGON_COMMIT` wins, then `git`, then "unknown".
fn commit_hash() -> String {
    if let Ok(commit) = env::var("ZARGON_COMMIT") {
        return commit;
    }
    Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|hash| hash.trim().to_owned())
        .filter(|hash| !hash.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_owned())
}

fn build_date() -> String {
    env::var("ZARGON_BUILD_DATE")
        .unwrap_or_else(|_| chrono::Utc::now().format("%Y-%m-%d").to_string())
}

fn main() {
    let version = env::var("CARGO_PKG_VERSION").expect("cargo sets CARGO_PKG_VERSION");
    let profile = env::var("PROFILE").unwrap_or_else(|_| UNKNOWN.to_owned());
    let commit = commit_hash();
    let date = build_date();
    let long_version = format!("{} ({} {}, {})", version, commit, date, profile);

    let generated = format!(
        "pub const PKG_VERSION: &str = {:?};\n\
         pub const BUILD_COMMIT: &str = {:?};\n\
         pub const BUILD_DATE: &str = {:?};\n\
         pub const BUILD_PROFILE: &str = {:?};\n\
         pub const LONG_VERSION: &str = {:?};\n",
        version, commit, date, profile, long_version
    );

    let out = PathBuf::from(env::var("OUT_DIR").expect("cargo sets OUT_DIR"));
    fs::write(out.join("build_info.rs"), generated).expect("write generated build_info.rs");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-env-changed=ZARGON_COMMIT");
    println!("cargo:rerun-if-env-changed=ZARGON_BUILD_DATE");
}
