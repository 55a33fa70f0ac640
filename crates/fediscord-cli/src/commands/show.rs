//! Show what is stored.

use anyhow::Result;
use fediscord_core::SecretToken;
use fediscord_fediverse::Handle;
use fediscord_storage::{Protection, StoreError, TokenState};

use super::Context;
use crate::theme::{Theme, print_title};

const PREVIEW_CHARS: usize = 10;

/// The `Preview: ...` row for a stored token.
pub(crate) fn preview_line(token: &SecretToken) -> String {
    Theme::kv("Preview", &token.preview(PREVIEW_CHARS))
}

/// Print the token status, handle and preference.
pub(crate) fn run_show(ctx: &Context) -> Result<()> {
    print_title("Stored Configuration");
    let mut has_config = false;

    match ctx.store.retrieve_token() {
        Ok(token) => {
            has_config = true;
            println!("{}", Theme::success("Discord token: [STORED]"));
            match ctx.store.token_state().authoritative() {
                Some(Protection::Encrypted) => {
                    println!("  {}", Theme::kv("Storage", "Encrypted (GPG) - SECURE"));
                },
                Some(Protection::Plain) => {
                    println!(
                        "  {}",
                        Theme::warning("Storage: Plain text - INSECURE")
                    );
                },
                None => {},
            }
            println!("  {}", preview_line(&token));
        },
        Err(StoreError::NotFound(_)) => {
            println!("{}", Theme::error("Discord token: [NOT SET]"));
        },
        Err(e) => {
            has_config = true;
            println!("{}", Theme::error(&format!("Discord token: [UNREADABLE] {e}")));
        },
    }
    if ctx.store.token_state() == TokenState::Conflicted {
        println!(
            "  {}",
            Theme::warning("Both an encrypted and a plain text token exist; run `fediscord doctor`")
        );
    }
    println!();

    match ctx.store.retrieve_handle() {
        Ok(raw) => {
            has_config = true;
            match Handle::parse(&raw) {
                Ok(handle) => {
                    println!(
                        "{}",
                        Theme::success(&format!("Fediverse handle: {}", handle.mention()))
                    );
                    println!("  {}", Theme::kv("Instance", handle.domain()));
                },
                Err(_) => println!(
                    "{}",
                    Theme::warning(&format!("Fediverse handle: {raw} (not a valid handle)"))
                ),
            }
        },
        Err(StoreError::NotFound(_)) => {
            println!("{}", Theme::error("Fediverse handle: [NOT SET]"));
        },
        Err(e) => return Err(e.into()),
    }
    println!();

    match ctx.store.get_preference() {
        Ok(protection) => println!("{}", Theme::kv("Encryption preference", &protection.to_string())),
        Err(StoreError::NotSet) => println!("{}", Theme::kv("Encryption preference", "not set")),
        Err(e) => return Err(e.into()),
    }

    if !has_config {
        println!();
        println!("{}", Theme::separator());
        println!(
            "{}",
            Theme::warning("No configuration found. Run `fediscord setup` first.")
        );
        println!("{}", Theme::separator());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_line_has_single_ellipsis() {
        colored::control::set_override(false);
        let token = SecretToken::new("0123456789abcdef").unwrap();
        assert_eq!(preview_line(&token), "Preview: 0123456789...");
    }

    #[test]
    fn test_preview_line_short_token() {
        colored::control::set_override(false);
        let token = SecretToken::new("abc").unwrap();
        assert_eq!(preview_line(&token), "Preview: abc...");
    }
}
