//! Generate the Discord authorization URL.

use anyhow::Result;
use fediscord_fediverse::Handle;

use super::{Context, describe};
use crate::theme::{Theme, print_title};

/// Retrieve the stored credentials and ask Discord for the URL.
pub(crate) async fn run_connect(ctx: &Context) -> Result<()> {
    print_title("Generate Connection URL");

    let token = ctx.store.retrieve_token().map_err(describe)?;
    let handle = Handle::parse(&ctx.store.retrieve_handle().map_err(describe)?)?;

    println!("{}", Theme::success("Found stored configuration"));
    println!("  {}", Theme::kv("Fediverse handle", &handle.mention()));
    println!();

    let url = match ctx.discord.connection_url(&handle, &token).await {
        Ok(url) => url,
        Err(e) => {
            println!("{}", Theme::info("Possible reasons:"));
            println!("    1. Invalid Discord token");
            println!("    2. Discord API endpoint changed");
            println!("    3. Network connectivity issues");
            return Err(e.into());
        },
    };

    println!("{}", Theme::separator());
    println!("{}", Theme::success("Authorization URL generated successfully!"));
    println!("{}", Theme::separator());
    println!();
    println!("{url}");
    println!();
    println!("{}", Theme::separator());
    println!("{}", Theme::info("Instructions:"));
    println!("    1. Copy the URL above");
    println!("    2. Paste it in your browser");
    println!("    3. Log in to your Fediverse account if needed");
    println!("    4. Authorize the connection");
    println!("    5. Wait for confirmation");
    println!("{}", Theme::separator());
    Ok(())
}
