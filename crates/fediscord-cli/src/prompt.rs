//! Thin wrappers over `dialoguer` prompts.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};
use fediscord_storage::{CredentialStore, Protection};

use crate::theme::{Theme, print_gpg_install_hints};

pub(crate) fn select(prompt: &str, items: &[&str], default: usize) -> Result<usize> {
    Ok(Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()?)
}

pub(crate) fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()?)
}

pub(crate) fn text(prompt: &str) -> Result<String> {
    Ok(Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact_text()?)
}

pub(crate) fn secret(prompt: &str) -> Result<String> {
    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .allow_empty_password(true)
        .interact()?)
}

pub(crate) fn press_enter() -> Result<()> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Press Enter to continue")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}

/// Ask how the token should be stored.
///
/// Returns `None` when the user declines plain text with no tool
/// installed. Choosing plain text always needs a second confirmation.
pub(crate) fn choose_protection(store: &CredentialStore) -> Result<Option<Protection>> {
    if !store.cipher().is_available() {
        println!(
            "{}",
            Theme::warning(&format!(
                "{} is not installed. The token can only be stored in plain text (INSECURE).",
                store.cipher().name()
            ))
        );
        print_gpg_install_hints();
        println!();
        return Ok(confirm("Continue with plain text storage?")?.then_some(Protection::Plain));
    }

    let items = [
        "Encrypted (recommended, asks for a GPG passphrase)",
        "Plain text (NOT RECOMMENDED)",
    ];
    loop {
        if select("How should the Discord token be stored?", &items, 0)? == 0 {
            return Ok(Some(Protection::Encrypted));
        }

        println!(
            "{}",
            Theme::warning("The Discord token will be stored in PLAIN TEXT.")
        );
        println!(
            "{}",
            Theme::warning("Anyone who can read your configuration directory can read it.")
        );
        if confirm("Are you absolutely sure?")? {
            return Ok(Some(Protection::Plain));
        }
    }
}
