use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");

    let commit_full = env::var("GITHUB_SHA")
        .ok()
        .filter(|sha| !sha.is_empty())
        .or_else(|| git_output(&["rev-parse", "HEAD"]))
        .unwrap_or_else(|| "unknown".to_string());
    let commit_short = match commit_full.as_str() {
        "unknown" => {
            git_output(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string())
        }
        full => full.chars().take(7).collect(),
    };
    let commit_date = git_output(&["log", "-1", "--format=%cI"]).unwrap_or_else(|| "unknown".to_string());

    emit("FIELDLENS_BUILD_COMMIT", &commit_short);
    emit("FIELDLENS_BUILD_COMMIT_FULL", &commit_full);
    emit("FIELDLENS_BUILD_DATE", &commit_date);
}

fn emit(key: &str, value: &str) {
    println!("cargo:rustc-env={key}={value}");
}

fn git_output(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
