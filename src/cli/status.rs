//! Status command implementation

use colored::Colorize;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::names::NameDirectory;

/// Run the status command to display the resolved configuration
pub fn run(cli: &Cli) -> Result<()> {
    println!("{}\n", "classroll Configuration Status".bold());

    let config_path = Config::resolve_path(cli.config.as_deref())?;
    if config_path.exists() {
        println!("Config file: {}", config_path.display().to_string().cyan());
    } else {
        println!(
            "Config file: {} {}",
            config_path.display().to_string().cyan(),
            "(not present, using defaults)".dimmed()
        );
    }

    let config = cli.resolve_config()?;
    println!();

    // Token status
    match config.github_token.as_deref() {
        Some(token) if !token.is_empty() => println!("{} GitHub token configured", "✓".green()),
        _ => {
            println!("{} GitHub token not configured", "✗".red());
            println!("  → Set GITHUB_TOKEN or pass --token");
        }
    }

    // Name directory status
    match NameDirectory::load(&config.names_path) {
        Ok(names) => println!(
            "{} Names file: {} ({} names)",
            "✓".green(),
            config.names_path.display(),
            names.len()
        ),
        Err(err) => println!("{} Names file unusable: {}", "✗".red(), err),
    }

    // Cache mode
    if config.development {
        println!(
            "{} Cache: never expires {}",
            "○".dimmed(),
            "(development)".yellow()
        );
    } else {
        println!("{} Cache: expires after {}s", "✓".green(), config.cache_ttl_secs);
    }

    println!("{} API base: {}", "○".dimmed(), config.api_base);
    println!("{} Purview root: {}", "○".dimmed(), config.purview_root);
    println!("{} Assignments: {}", "○".dimmed(), config.assignments_dir.display());
    println!("{} Default policy: {:?}", "○".dimmed(), config.default_policy);
    println!("{} Bind: {}", "○".dimmed(), config.bind.cyan());
    println!();

    Ok(())
}
