//! `benchhand tools` - List dispatchable tools without starting a session.

use benchhand_config::AppConfig;
use benchhand_toolbox::load_manifests;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let tools_dir = config.tools_dir();
    let manifests = load_manifests(&tools_dir);

    println!();
    println!("  Tool directory: {}", tools_dir.display());
    println!();

    if manifests.is_empty() {
        println!("  No tools installed. Run `benchhand onboard` to install the bundled set.");
        println!();
        return Ok(());
    }

    for manifest in manifests.values() {
        if manifest.description.is_empty() {
            println!("  {}", manifest.name);
        } else {
            println!("  {}: {}", manifest.name, manifest.description);
        }
        for field in &manifest.inputs {
            match field.kind {
                Some(kind) => println!("      {} ({kind})", field.name),
                None => println!("      {}", field.name),
            }
        }
    }

    println!();
    Ok(())
}
