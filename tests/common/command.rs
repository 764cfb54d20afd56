use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

pub const OUTPUT_DIR: &str = "archives";

#[fixture]
pub fn workspace_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

pub fn run_wikisnap_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("wikisnap").expect("Failed to find wikisnap binary");
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("WIKISNAP_OUTPUT_DIR");
    cmd.env_remove("WIKISNAP_NOW");
    cmd.env_remove("RUST_LOG");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

/// Runs the standalone `diffcheck` binary, pinned the same way as `wikisnap`.
pub fn run_diffcheck_binary(dir: &Path, days: u32, now: &str, extra: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("diffcheck").expect("Failed to find diffcheck binary");
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("WIKISNAP_OUTPUT_DIR");
    cmd.env_remove("RUST_LOG");
    cmd.env("WIKISNAP_NOW", now);
    cmd.current_dir(dir);
    cmd.args(["--days", &days.to_string(), "--output-dir", OUTPUT_DIR]);
    cmd.args(extra);
    cmd
}

/// Runs a snapshot of `input` into `archives/` as if the local time were `now`.
pub fn wikisnap_snapshot(dir: &Path, input: &str, now: &str) -> Command {
    let mut cmd = run_wikisnap_command(
        dir,
        &["snapshot", "--input", input, "--output-dir", OUTPUT_DIR],
    );
    cmd.env("WIKISNAP_NOW", now);
    cmd
}

/// Compares `archives/` over the last `days` days as if the local time were `now`.
pub fn wikisnap_diffcheck(dir: &Path, days: u32, now: &str, extra: &[&str]) -> Command {
    let days = days.to_string();
    let mut args = vec!["diffcheck", "--days", days.as_str(), "--output-dir", OUTPUT_DIR];
    args.extend_from_slice(extra);

    let mut cmd = run_wikisnap_command(dir, &args);
    cmd.env("WIKISNAP_NOW", now);
    cmd
}
