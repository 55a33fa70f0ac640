//! Delete every stored artifact.

use anyhow::Result;

use super::Context;
use crate::prompt;
use crate::theme::{Theme, print_title};

const CONFIRMATION_WORD: &str = "DELETE";

/// Whether the typed confirmation authorizes deletion.
pub(crate) fn is_delete_confirmed(input: &str) -> bool {
    input.trim() == CONFIRMATION_WORD
}

/// Remove the configuration directory after confirmation.
pub(crate) fn run_delete(ctx: &Context, assume_yes: bool) -> Result<()> {
    print_title("Delete All Data");

    if !assume_yes {
        println!("{}", Theme::warning("This will PERMANENTLY delete:"));
        println!("    Your Discord token");
        println!("    Your Fediverse handle");
        println!("    Your encryption preference");
        println!("    The configuration directory, including config.toml");
        println!();
        println!("{}", Theme::warning("This action CANNOT be undone!"));
        println!();

        let typed = prompt::text(&format!("Type '{CONFIRMATION_WORD}' to confirm"))?;
        if !is_delete_confirmed(&typed) {
            println!("{}", Theme::info("Deletion cancelled"));
            return Ok(());
        }
    }

    ctx.store.delete_all()?;
    println!("{}", Theme::success("All data deleted successfully"));
    println!(
        "  {}",
        Theme::kv(
            "Configuration directory removed",
            &ctx.paths().root().display().to_string()
        )
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_word_confirms() {
        assert!(is_delete_confirmed("DELETE"));
        assert!(is_delete_confirmed("  DELETE\n"));
    }

    #[test]
    fn test_anything_else_cancels() {
        for input in ["", "delete", "yes", "DELETE ALL", "Delete"] {
            assert!(!is_delete_confirmed(input), "{input:?} should not confirm");
        }
    }
}
