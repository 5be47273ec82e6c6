use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};

/// The precision configurations an experiment transforms with.
pub const EXPERIMENT_PRECISIONS: [&str; 3] = ["f64", "f32", "bf16"];

/// Get the workspace root directory
pub fn workspace_root() -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.pop(); // Go up from xtask to workspace root
    path
}

fn cargo() -> Command {
    let mut cmd = Command::new(std::env::var("CARGO").unwrap_or_else(|_| "cargo".to_string()));
    cmd.current_dir(workspace_root());
    cmd
}

pub fn build_command() -> Command {
    let mut cmd = cargo();
    cmd.args(["build", "--workspace"]);
    cmd
}

pub fn test_command() -> Command {
    let mut cmd = cargo();
    cmd.args(["test", "--workspace"]);
    cmd
}

pub fn clippy_command() -> Command {
    let mut cmd = cargo();
    cmd.args(["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"]);
    cmd
}

pub fn fmt_command() -> Command {
    let mut cmd = cargo();
    cmd.args(["fmt", "--all"]);
    cmd
}

pub fn bench_command() -> Command {
    let mut cmd = cargo();
    cmd.args(["bench", "-p", "dwt-bench"]);
    cmd
}

/// `dwt-precision <args>` through cargo, in release mode.
fn harness(config: &Path, args: &[&str]) -> Command {
    let mut cmd = cargo();
    cmd.args(["run", "--release", "-q", "-p", "precision-cli", "--"]);
    cmd.arg("--config").arg(config);
    cmd.args(args);
    cmd
}

/// The full experiment as a sequence of harness invocations: generate the
/// inputs, transform them once per precision, then compare f32 against the
/// reference and bf16 against f32.
pub fn experiment_commands(config: &Path, data: &Path) -> Vec<Command> {
    let input = data.join("input");
    let dir = |p: &str| {
        if p == "f64" {
            data.join("output-reference")
        } else {
            data.join(format!("output-{p}"))
        }
    };

    let mut commands = Vec::new();
    let mut generate = harness(config, &["generate", "--output"]);
    generate.arg(&input);
    commands.push(generate);

    for p in EXPERIMENT_PRECISIONS {
        let mut transform = harness(config, &["transform", "--precision", p, "--input"]);
        transform.arg(&input).arg("--output").arg(dir(p));
        commands.push(transform);
    }

    let mut compare = harness(config, &["compare"]);
    for (cmp, reference) in [("f32", "f64"), ("bf16", "f32")] {
        compare.arg("--pair").arg(format!(
            "{}={}",
            dir(cmp).display(),
            dir(reference).display()
        ));
    }
    commands.push(compare);
    commands
}

/// Run commands in order, stopping at the first failure.
pub fn run_all(commands: Vec<Command>) -> Result<()> {
    for mut cmd in commands {
        let status = cmd
            .status()
            .with_context(|| format!("spawning {:?}", cmd.get_program()))?;
        if !status.success() {
            bail!("{:?} exited with {}", cmd, status);
        }
    }
    Ok(())
}
