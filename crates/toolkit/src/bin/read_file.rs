//! Print a workspace file's contents.
//!
//! Arguments: `path`, relative to the workspace root.

use benchhand_toolkit::{fail, read_params, require_str, tool_dir, workspace_root};
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

    let path = require_str(&params, "path")?;
    let target = root.join(path);
    if !target.exists() {
        return Err(format!("File not found: {}", target.display()).into());
    }

    let content = std::fs::read_to_string(&target)?;
    println!("[read_file output]\n{content}");
    Ok(())
}
