//! Replace the stored Discord token.

use anyhow::{Context as _, Result};
use fediscord_core::SecretToken;
use fediscord_storage::{Protection, StoreError};

use super::Context;
use crate::prompt;
use crate::theme::{Theme, print_title};

/// Ask for a token with masked input.
pub(crate) fn read_token(label: &str) -> Result<SecretToken> {
    let raw = prompt::secret(label)?;
    SecretToken::new(raw).context("Discord token cannot be empty")
}

/// Store `token` and report how it was protected.
pub(crate) fn store_token(ctx: &Context, token: &SecretToken, protection: Protection) -> Result<()> {
    match protection {
        Protection::Encrypted => {
            println!("{}", Theme::info("Encrypting and storing Discord token..."));
            ctx.store
                .store_token(token, protection)
                .context("failed to encrypt token")?;
            println!(
                "{}",
                Theme::success("Discord token securely encrypted and stored")
            );
        },
        Protection::Plain => {
            println!("{}", Theme::info("Storing Discord token in plain text..."));
            ctx.store
                .store_token(token, protection)
                .context("failed to store token")?;
            println!(
                "{}",
                Theme::warning("Discord token stored (UNENCRYPTED - INSECURE)")
            );
        },
    }
    Ok(())
}

/// The protection used for a replacement token: the saved preference, or
/// plain text when none was ever chosen.
pub(crate) fn replacement_protection(
    preference: Result<Protection, StoreError>,
) -> Result<Protection, StoreError> {
    match preference {
        Ok(protection) => Ok(protection),
        Err(StoreError::NotSet) => Ok(Protection::Plain),
        Err(e) => Err(e),
    }
}

/// Replace the token under the current preference.
pub(crate) fn run_token(ctx: &Context) -> Result<()> {
    print_title("Update Discord Token");
    println!(
        "{}",
        Theme::info("This will replace your current Discord token.")
    );

    let preference = ctx.store.get_preference();
    if matches!(preference, Err(StoreError::NotSet)) {
        println!(
            "{}",
            Theme::warning("No encryption preference saved; the token will be stored in plain text.")
        );
        println!(
            "{}",
            Theme::dimmed("Run `fediscord encryption` afterwards to encrypt it.")
        );
    }
    let protection = replacement_protection(preference)?;
    println!();

    let token = read_token("Enter new Discord token (input hidden)")?;
    store_token(ctx, &token, protection)?;

    println!();
    println!("{}", Theme::success("Discord token updated successfully!"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fediscord_storage::CredentialStore;
    use fediscord_test::{MockCipher, TestHome, test_token};

    #[test]
    fn test_replacement_uses_saved_preference() {
        assert_eq!(
            replacement_protection(Ok(Protection::Encrypted)).unwrap(),
            Protection::Encrypted
        );
    }

    #[test]
    fn test_replacement_defaults_to_plain_when_unset() {
        assert_eq!(
            replacement_protection(Err(StoreError::NotSet)).unwrap(),
            Protection::Plain
        );
    }

    #[test]
    fn test_replacement_follows_store_preference() {
        let home = TestHome::new();
        let store = CredentialStore::new(home.paths(), Box::new(MockCipher::new()));

        let protection = replacement_protection(store.get_preference()).unwrap();
        assert_eq!(protection, Protection::Plain);

        store.set_preference(Protection::Encrypted).unwrap();
        let protection = replacement_protection(store.get_preference()).unwrap();
        store.store_token(&test_token("replacement"), protection).unwrap();
        assert!(store.has_encrypted_token());
        assert!(!store.has_plain_token());
    }

    #[test]
    fn test_replacement_propagates_read_failures() {
        let err = StoreError::EnvironmentUnavailable("no home".into());
        assert!(replacement_protection(Err(err)).is_err());
    }
}
