//! Replace the stored Fediverse handle.

use anyhow::Result;
use fediscord_fediverse::Handle;

use super::{Context, probe_and_report};
use crate::prompt;
use crate::theme::{Theme, print_title};

/// Validate and store a new handle. A failed probe only warns.
pub(crate) async fn run_handle(ctx: &Context) -> Result<()> {
    print_title("Update Fediverse Handle");
    println!(
        "{}",
        Theme::info("This will replace your current Fediverse handle.")
    );
    println!();

    let handle = Handle::parse(&prompt::text("Enter new Fediverse handle")?)?;
    if let Err(e) = probe_and_report(ctx, &handle).await {
        println!("{}", Theme::warning(&e.to_string()));
    }
    ctx.store.store_handle(handle.as_str())?;

    println!();
    println!(
        "{}",
        Theme::success(&format!("Fediverse handle updated to: {}", handle.mention()))
    );
    Ok(())
}
