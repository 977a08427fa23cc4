use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use capstat_core::{AnalyzerConfig, ReplayRunner, analyze_capture};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let config = path.join("config.json");
        if !config.exists() {
            continue;
        }
        regenerate_one(&path, &config)?;
    }

    Ok(())
}

fn regenerate_one(dir: &Path, config: &Path) -> Result<(), String> {
    let config_json = fs::read_to_string(config)
        .map_err(|err| format!("failed to read {}: {}", config.display(), err))?;
    let config: AnalyzerConfig = serde_json::from_str(&config_json)
        .map_err(|err| format!("invalid config {}: {}", config.display(), err))?;

    let runner = ReplayRunner::new(dir);
    let report = analyze_capture(&runner, Path::new("input.pcapng"), &config)
        .map_err(|err| format!("analysis failed for {}: {}", dir.display(), err))?;
    let json = serde_json::to_string_pretty(&report)
        .map_err(|err| format!("JSON serialization failed: {}", err))?;
    let output = dir.join("expected_report.json");
    fs::write(&output, json + "\n")
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
