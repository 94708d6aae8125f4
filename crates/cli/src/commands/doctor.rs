//! `benchhand doctor` - Diagnose configuration and workspace health.

use benchhand_config::AppConfig;
use benchhand_core::provider::Provider;
use benchhand_providers::OpenAiCompatProvider;
use benchhand_toolbox::load_manifests;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 Benchhand Doctor - System Diagnostics");
    println!("========================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    if config_path.exists() {
        match AppConfig::load() {
            Ok(config) => {
                println!("  ✅ Config file valid");
                issues += check_credentials(&config);
                issues += check_workspace(&config);
                issues += check_endpoint(&config).await;
            }
            Err(e) => {
                println!("  ❌ Config file invalid: {e}");
                issues += 1;
            }
        }
    } else {
        println!("  ❌ No config file - run `benchhand onboard`");
        issues += 1;
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}

fn check_credentials(config: &AppConfig) -> u32 {
    if config.has_api_key() {
        println!("  ✅ API key configured");
        0
    } else {
        println!("  ⚠️  No API key configured - add api_key to config.toml");
        1
    }
}

fn check_workspace(config: &AppConfig) -> u32 {
    let mut issues = 0;

    for (label, dir) in [
        ("workspace", config.workspace_root()),
        ("tool", config.tools_dir()),
        ("memory", config.memory_dir()),
    ] {
        if dir.is_dir() {
            println!("  ✅ Have {label} directory: {}", dir.display());
        } else {
            println!("  ⚠️  No {label} directory - run `benchhand onboard`");
            issues += 1;
        }
    }

    let tools_dir = config.tools_dir();
    let manifests = load_manifests(&tools_dir);
    if manifests.is_empty() {
        println!("  ⚠️  No dispatchable tools - run `benchhand onboard`");
        issues += 1;
    } else {
        println!("  ✅ {} dispatchable tool(s)", manifests.len());
    }

    let unpaired = unpaired_artifacts(&tools_dir);
    if unpaired > 0 {
        println!("  ⚠️  {unpaired} artifact(s) without a declaration (invisible to the agent)");
        issues += 1;
    }

    issues
}

async fn check_endpoint(config: &AppConfig) -> u32 {
    let api_key = config.api_key.clone().unwrap_or_default();
    let provider = match OpenAiCompatProvider::new("openai", &config.api_base_url, api_key) {
        Ok(provider) => provider,
        Err(e) => {
            println!("  ⚠️  Provider not constructible: {e}");
            return 1;
        }
    };

    match provider.health_check().await {
        Ok(true) => {
            println!("  ✅ Endpoint reachable: {}", config.api_base_url);
            0
        }
        Ok(false) => {
            println!("  ⚠️  Endpoint responded with an error: {}", config.api_base_url);
            1
        }
        Err(e) => {
            println!("  ⚠️  Endpoint unreachable: {e}");
            1
        }
    }
}

/// Artifacts in the tool directory that have no `.json` declaration and
/// therefore never reach the model's context.
fn unpaired_artifacts(dir: &std::path::Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .filter(|entry| {
            let path = entry.path();
            path.is_file()
                && !path.extension().is_some_and(|ext| ext == "json")
                && !path.with_extension("json").exists()
        })
        .count()
}
