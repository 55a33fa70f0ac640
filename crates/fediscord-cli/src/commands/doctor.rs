//! Doctor command for environment and consistency checks.

use anyhow::Result;
use colored::Colorize;
use fediscord_fediverse::Handle;
use fediscord_storage::{StoreError, TokenState};

use super::Context;

/// Print the environment and store health report.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn run_doctor(ctx: &Context) -> Result<()> {
    println!("{}", "Fediscord Doctor - Environment Check".cyan().bold());
    println!();

    let root = ctx.paths().root();
    print!("  Configuration directory... ");
    if root.is_dir() {
        println!("{}", "OK".green());
    } else {
        println!("{} (not created yet)", "WARN".yellow());
    }
    println!("    Path: {}", root.display());

    print!("  Configuration file... ");
    match (&ctx.loaded, &ctx.config_error) {
        (_, Some(e)) => {
            println!("{}", "FAIL".red());
            println!("    {e}");
            println!("    Built-in defaults are in use.");
        },
        (Some(loaded), None) => {
            println!("{}", "OK".green());
            match &loaded.source_file {
                Some(path) => println!("    Loaded: {}", path.display()),
                None => println!("    No config.toml, using built-in defaults"),
            }
            if !loaded.env_overrides.is_empty() {
                println!("    Environment overrides: {}", loaded.env_overrides.join(", "));
            }
        },
        (None, None) => println!("{}", "???".dimmed()),
    }

    let tool = ctx.store.cipher().name();
    print!("  Encryption tool ({tool})... ");
    match which::which(tool) {
        Ok(path) => {
            println!("{}", "OK".green());
            println!("    Found: {}", path.display());
        },
        Err(_) => {
            println!("{} (not found, only plain text storage is possible)", "WARN".yellow());
            crate::theme::print_gpg_install_hints();
        },
    }

    print!("  Encryption preference... ");
    match ctx.store.get_preference() {
        Ok(protection) => println!("{} ({protection})", "OK".green()),
        Err(StoreError::NotSet) => println!("{} (not set)", "WARN".yellow()),
        Err(e) => println!("{} ({e})", "FAIL".red()),
    }

    print!("  Discord token... ");
    match ctx.store.token_state() {
        TokenState::Absent => println!("{} (not set)", "WARN".yellow()),
        TokenState::Encrypted => println!("{} (encrypted)", "OK".green()),
        TokenState::Plain => println!("{} (plain text, INSECURE)", "WARN".yellow()),
        TokenState::Conflicted => println!("{} (both representations exist)", "FAIL".red()),
    }

    print!("  Fediverse handle... ");
    match ctx.store.retrieve_handle() {
        Ok(raw) => match Handle::parse(&raw) {
            Ok(handle) => println!("{} ({})", "OK".green(), handle.mention()),
            Err(e) => println!("{} ({e})", "FAIL".red()),
        },
        Err(StoreError::NotFound(_)) => println!("{} (not set)", "WARN".yellow()),
        Err(e) => println!("{} ({e})", "FAIL".red()),
    }

    println!("\n{}", "Consistency checks:".cyan());
    let findings = ctx.store.verify();
    if findings.is_empty() {
        println!("  {} no problems found", "OK".green());
    }
    for finding in &findings {
        let state = if finding.is_corruption() {
            "FAIL".red()
        } else {
            "WARN".yellow()
        };
        println!("  {state} {finding}");
    }

    println!();
    let overall = if findings.iter().any(|f| f.is_corruption()) || ctx.config_error.is_some() {
        "Problems found".red()
    } else if findings.is_empty() {
        "All checks passed".green()
    } else {
        "Some issues detected".yellow()
    };
    println!("{}", overall.bold());
    Ok(())
}
