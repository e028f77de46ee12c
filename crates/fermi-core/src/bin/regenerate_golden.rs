use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use fermi_core::{analyze_log_file, hex_dump, read_binary};

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
        let log = path.join("input.log");
        if log.exists() {
            regenerate_log(&log, &path.join("expected_output.txt"))?;
        }
        let bin = path.join("input.bin");
        if bin.exists() {
            regenerate_dump(&bin, &path.join("expected_dump.txt"))?;
        }
    }

    Ok(())
}

fn regenerate_log(input: &Path, output: &Path) -> Result<(), String> {
    let analyses = analyze_log_file(input)
        .map_err(|err| format!("analysis failed for {}: {}", input.display(), err))?;
    let mut text = String::new();
    for analysis in analyses {
        let analysis =
            analysis.map_err(|err| format!("analysis failed for {}: {}", input.display(), err))?;
        text.push_str(&analysis.render_text());
    }
    fs::write(output, text)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}

fn regenerate_dump(input: &Path, output: &Path) -> Result<(), String> {
    let data = read_binary(input)
        .map_err(|err| format!("failed to read {}: {}", input.display(), err))?;
    fs::write(output, hex_dump(&data))
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
