//! Create a text file under the workspace.
//!
//! Arguments: `base` (directory under the workspace root), `filename`,
//! `content`, optional `subfolder`, optional `dry_run`.

use benchhand_toolkit::{
    fail, optional_bool, optional_str, read_params, require_str, tool_dir, workspace_root,
};
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

    let base = require_str(&params, "base")?;
    let filename = require_str(&params, "filename")?;
    let content = require_str(&params, "content")?;
    let subfolder = optional_str(&params, "subfolder")?;
    let dry_run = optional_bool(&params, "dry_run")?;

    let mut target = root.join(base);
    if !subfolder.is_empty() {
        target.push(subfolder);
    }
    target.push(filename);

    if dry_run {
        println!("[Dry run] Would create: {}", target.display());
        println!("[Dry run] Content:\n{content}");
        return Ok(());
    }

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&target, content)?;
    println!("File created at: {}", target.display());
    Ok(())
}
