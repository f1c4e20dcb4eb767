use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Small provenance block: code revision, crate versions, run parameters.
pub fn block(params: Value, outputs: &[&Path]) -> Value {
    json!({
        "code_rev": current_git_rev(),
        "realizer_version": realizer::VERSION,
        "cli_version": env!("CARGO_PKG_VERSION"),
        "params": params,
        "outputs": outputs.iter().map(|p| p.to_string_lossy()).collect::<Vec<_>>(),
    })
}

/// Write `<report>.provenance.json` next to a report file.
pub fn write_sidecar(report: &Path, params: Value) -> Result<PathBuf> {
    let path = sidecar_path(report);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating provenance dir {}", parent.display()))?;
        }
    }
    let doc = block(params, &[report]);
    fs::write(&path, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn sidecar_path(report: &Path) -> PathBuf {
    let mut name = report
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("report"));
    name.push(".provenance.json");
    report.with_file_name(name)
}

pub fn current_git_rev() -> String {
    if let Some(rev) = option_env!("GIT_COMMIT").filter(|r| !r.is_empty()) {
        return rev.to_string();
    }
    if let Ok(rev) = std::env::var("GIT_COMMIT") {
        if !rev.is_empty() {
            return rev;
        }
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn sidecar_sits_next_to_the_report() {
        let derived = sidecar_path(Path::new("/tmp/runs/tetra.json"));
        assert_eq!(derived, Path::new("/tmp/runs/tetra.provenance.json"));
    }

    #[test]
    fn sidecar_records_params_and_output() {
        let dir = tempdir().unwrap();
        let report = dir.path().join("out").join("r.json");
        let path = write_sidecar(&report, json!({"seed": 7})).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["params"]["seed"], 7);
        assert_eq!(parsed["outputs"][0], report.to_string_lossy().as_ref());
        assert_eq!(parsed["realizer_version"], realizer::VERSION);
    }
}
