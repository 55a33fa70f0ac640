//! Change how the token is protected.

use anyhow::{Result, bail};
use fediscord_storage::SwitchOutcome;

use super::Context;
use crate::prompt;
use crate::theme::{Theme, print_title};

/// Ask for a protection and convert the stored token to it.
pub(crate) fn run_encryption(ctx: &Context) -> Result<()> {
    print_title("Change Encryption Settings");

    if ctx.store.token_state().is_present() {
        println!("{}", Theme::warning("Existing Discord token found."));
        println!(
            "{}",
            Theme::warning("  It will be re-encrypted or decrypted based on your new choice.")
        );
    } else {
        println!("{}", Theme::info("No existing Discord token found."));
    }
    if let Ok(current) = ctx.store.get_preference() {
        println!("  {}", Theme::kv("Current preference", &current.to_string()));
    }
    println!();

    let Some(target) = prompt::choose_protection(&ctx.store)? else {
        bail!("encryption change cancelled");
    };

    match ctx.store.switch_protection(target)? {
        SwitchOutcome::Converted => println!(
            "{}",
            Theme::success(&format!("Token converted; now stored as {target}"))
        ),
        SwitchOutcome::PreferenceOnly => println!(
            "{}",
            Theme::success("Encryption preference saved for future tokens")
        ),
        SwitchOutcome::Unchanged => println!(
            "{}",
            Theme::info(&format!("Nothing to change; the token is already {target}"))
        ),
    }
    Ok(())
}
