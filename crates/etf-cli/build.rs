use chrono::Local;
use std::process::Command;

/// Run a git command and return its trimmed stdout, or `None` if git is
/// unavailable or the command failed.
fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn main() {
    let build_hash = match git(&["rev-parse", "--short", "HEAD"]) {
        Some(hash) => {
            // Untracked files don't count as dirty
            let dirty = Command::new("git")
                .args(["diff", "--quiet", "HEAD"])
                .status()
                .map(|s| !s.success())
                .unwrap_or(false);
            if dirty {
                format!("{hash}-dirty-{}", Local::now().format("%Y%m%d-%H%M%S"))
            } else {
                hash
            }
        }
        None => "unknown".to_string(),
    };

    println!("cargo:rustc-env=BUILD_HASH={build_hash}");

    // .git lives at the workspace root
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");
}
