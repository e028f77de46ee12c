use std::process::Command;

// `--version` shows the commit and commit date; CI checkouts may lack git
// metadata, so `GITHUB_SHA` is the fallback for the commit.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=GITHUB_SHA");

    let commit = git(&["rev-parse", "--short=7", "HEAD"])
        .or_else(|| {
            std::env::var("GITHUB_SHA")
                .ok()
                .map(|sha| sha.chars().take(7).collect())
        })
        .filter(|commit: &String| !commit.is_empty());
    let date = git(&["log", "-1", "--format=%cs"]);

    let info = match (commit, date) {
        (Some(commit), Some(date)) => format!("commit {commit}, {date}"),
        (Some(commit), None) => format!("commit {commit}"),
        _ => "no git metadata".to_string(),
    };
    println!("cargo:rustc-env=FERMI_BUILD_INFO={info}");
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
        .filter(|value| !value.is_empty())
}
