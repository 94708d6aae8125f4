//! List a workspace directory's entries as a JSON array.
//!
//! Arguments: `directory`, relative to the workspace root; empty means the
//! root itself.

use benchhand_toolkit::{fail, optional_str, read_params, tool_dir, workspace_root};
use std::error::Error;

fn main() {
    if let Err(e) = run() {
        fail(e);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let tools = tool_dir()?;
    let root = workspace_root(&tools);
    let params = read_params(&tools)?;

    let directory = optional_str(&params, "directory")?;
    let target = if directory.is_empty() {
        root
    } else {
        root.join(directory)
    };
    if !target.is_dir() {
        return Err(format!("Invalid directory: {}", target.display()).into());
    }

    let mut names = Vec::new();
    for entry in std::fs::read_dir(&target)? {
        let entry = entry?;
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    println!("{}", serde_json::to_string_pretty(&names)?);
    Ok(())
}
