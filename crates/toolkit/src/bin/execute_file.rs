//! Run a workspace file and relay its combined output.
//!
//! Arguments: `path`, relative to the workspace root. Scripts run under
//! their interpreter by extension; anything else runs directly.

use benchhand_toolkit::{fail, read_params, require_str, tool_dir, workspace_root};
use std::error::Error;
use std::path::Path;
use std::process::Command;

fn main() {
    if let Err(e) = run() {
        fail(e);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let tools = tool_dir()?;
    let root = workspace_root(&tools);
    let params = read_params(&tools)?;

    let path = require_str(&params, "path")?;
    let target = root.join(path);
    if !target.exists() {
        return Err(format!("File not found: {}", target.display()).into());
    }

    let output = match interpreter_for(&target) {
        Some(interpreter) => Command::new(interpreter).arg(&target).output()?,
        None => Command::new(&target).output()?,
    };

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    let combined = format!("{stdout}{stderr}");
    let combined = combined.trim();

    if output.status.success() {
        println!("[execute_file output]\n{combined}");
        Ok(())
    } else {
        eprintln!("[ERROR in file execution]\n{combined}");
        std::process::exit(1);
    }
}

fn interpreter_for(target: &Path) -> Option<&'static str> {
    match target.extension().and_then(|e| e.to_str()) {
        Some("py") => Some("python3"),
        Some("sh") => Some("sh"),
        _ => None,
    }
}
