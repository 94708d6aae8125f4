//! `benchhand onboard` - First-time setup wizard.
//!
//! Creates the config file and workspace layout, then installs the bundled
//! tool set: each tool binary built alongside the CLI is copied into the
//! tool directory with a matching declaration file, so a fresh install has
//! something to dispatch on its first turn.

use std::path::Path;

use benchhand_config::AppConfig;

/// Tool binaries expected next to the CLI executable.
const BUNDLED_TOOLS: [&str; 5] = [
    "check_capacity",
    "create_file",
    "execute_file",
    "list_directory",
    "read_file",
];

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    println!("🔧 Benchhand - First-Time Setup");
    println!("===============================\n");

    // Create directories
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
        println!("✅ Created config directory: {}", config_dir.display());
    } else {
        println!("  Config directory exists: {}", config_dir.display());
    }

    for (label, dir) in [
        ("workspace", config.workspace_root()),
        ("tool", config.tools_dir()),
        ("memory", config.memory_dir()),
    ] {
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
            println!("✅ Created {label} directory: {}", dir.display());
        }
    }

    // Install bundled tools
    let installed = install_bundled_tools(&config.tools_dir())?;
    println!("✅ Installed {installed} bundled tool(s)");

    // Create config file
    if config_path.exists() {
        println!("\n⚠️  Config already exists at: {}", config_path.display());
        println!("   Edit it manually or delete and re-run onboard.\n");
    } else {
        let default_toml = AppConfig::default_toml();
        std::fs::write(&config_path, &default_toml)?;
        println!("✅ Created config.toml at: {}", config_path.display());
        println!("\n📝 Next steps:");
        println!("   1. Edit {} and add your API key", config_path.display());
        println!("   2. Run: benchhand chat\n");
    }

    println!("🎉 Setup complete! Run `benchhand chat` to start.\n");

    Ok(())
}

/// Copy each bundled tool binary from the CLI's own directory into the
/// tool directory and write its declaration beside it. A binary missing
/// from the build is reported and skipped, never fatal.
fn install_bundled_tools(tools_dir: &Path) -> Result<usize, Box<dyn std::error::Error>> {
    let exe = std::env::current_exe()?;
    let exe_dir = exe
        .parent()
        .ok_or("Cannot locate the running executable's directory")?;

    let mut installed = 0;
    for tool in BUNDLED_TOOLS {
        let file_name = format!("{tool}{}", std::env::consts::EXE_SUFFIX);
        let binary = exe_dir.join(&file_name);
        if !binary.exists() {
            println!("⚠️  Bundled tool binary not found: {}", binary.display());
            continue;
        }

        // fs::copy carries the execute bit along with the bytes
        std::fs::copy(&binary, tools_dir.join(&file_name))?;
        std::fs::write(
            tools_dir.join(format!("{tool}.json")),
            declaration_body(tool),
        )?;
        installed += 1;
    }
    Ok(installed)
}

/// The declaration written next to a bundled tool's artifact. Names stay
/// in sync with what the binaries in the toolkit crate actually read.
fn declaration_body(tool: &str) -> String {
    let declaration = match tool {
        "check_capacity" => serde_json::json!({
            "description": "Report current memory usage",
            "inputs": []
        }),
        "create_file" => serde_json::json!({
            "description": "Create a text file under the workspace",
            "inputs": [
                { "name": "base", "type": "string" },
                { "name": "filename", "type": "string" },
                { "name": "content", "type": "string" },
                { "name": "subfolder", "type": "string" }
            ]
        }),
        "execute_file" => serde_json::json!({
            "description": "Run a workspace file and relay its output",
            "inputs": [
                { "name": "path", "type": "string" }
            ]
        }),
        "list_directory" => serde_json::json!({
            "description": "List a workspace directory as a JSON array of entry names",
            "inputs": [
                { "name": "directory", "type": "string" }
            ]
        }),
        "read_file" => serde_json::json!({
            "description": "Print a workspace file's contents",
            "inputs": [
                { "name": "path", "type": "string" }
            ]
        }),
        other => serde_json::json!({
            "description": format!("Bundled tool {other}"),
            "inputs": []
        }),
    };

    let mut body = serde_json::to_string_pretty(&declaration).unwrap_or_default();
    body.push('\n');
    body
}
