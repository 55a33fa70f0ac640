//! First-time setup: protection choice, token and handle.

use anyhow::{Result, bail};
use fediscord_fediverse::Handle;
use fediscord_storage::{Protection, StoreError};

use super::token::{read_token, store_token};
use super::{Context, probe_and_report};
use crate::prompt;
use crate::theme::{Theme, print_title};

const TOKEN_GUIDE_URL: &str = "https://gist.github.com/MarvNC/e601f3603df22f36ebd3102c501116c6";

/// Run the guided setup.
pub(crate) async fn run_setup(ctx: &Context) -> Result<()> {
    print_title("Setup Configuration");
    println!("{}", Theme::info("This will guide you through setting up:"));
    println!("    1. Your Discord account token");
    println!("    2. Your Fediverse handle");
    println!();

    println!("{}", Theme::header("Step 1: Discord Token"));
    println!("{}", Theme::separator());
    println!("{}", Theme::info("To get your Discord token, follow this guide:"));
    println!("    {TOKEN_GUIDE_URL}");
    println!();
    println!("{}", Theme::warning("SECURITY WARNING:"));
    println!(
        "{}",
        Theme::warning("  Your Discord token gives FULL access to your Discord account.")
    );
    println!(
        "{}",
        Theme::warning("  Never share it or paste it in public places.")
    );
    println!();

    let protection = resolve_protection(ctx)?;
    let token = read_token("Enter your Discord token (input hidden)")?;
    store_token(ctx, &token, protection)?;
    println!();

    println!("{}", Theme::header("Step 2: Fediverse Handle"));
    println!("{}", Theme::separator());
    println!(
        "{}",
        Theme::info("Enter your handle on a Mastodon API-compatible instance, for example:")
    );
    println!("    @alice@mastodon.social   (Mastodon)");
    println!("    @user@social.example.com (Akkoma)");
    println!("    @bob@pleroma.site        (Pleroma)");
    println!();

    let handle = Handle::parse(&prompt::text("Enter your Fediverse handle")?)?;
    if let Err(e) = probe_and_report(ctx, &handle).await {
        println!("{}", Theme::warning(&e.to_string()));
        if !prompt::confirm("Do you want to continue anyway?")? {
            println!("{}", Theme::info("Setup cancelled"));
            return Ok(());
        }
    }
    ctx.store.store_handle(handle.as_str())?;

    println!();
    println!("{}", Theme::separator());
    println!("{}", Theme::success("Configuration completed successfully!"));
    println!("  {}", Theme::kv("Discord token", &format!("stored ({protection})")));
    println!("  {}", Theme::kv("Fediverse handle", &handle.mention()));
    println!("{}", Theme::separator());
    println!();
    println!(
        "{}",
        Theme::info("Next step: run `fediscord connect` to generate the connection URL")
    );
    Ok(())
}

/// Reuse a saved preference, otherwise ask and save the answer.
fn resolve_protection(ctx: &Context) -> Result<Protection> {
    match ctx.store.get_preference() {
        Ok(protection) => {
            println!(
                "{}",
                Theme::info(&format!("Using saved preference: {protection}"))
            );
            Ok(protection)
        },
        Err(StoreError::NotSet) => {
            let Some(protection) = prompt::choose_protection(&ctx.store)? else {
                bail!("setup cancelled");
            };
            ctx.store.set_preference(protection)?;
            match protection {
                Protection::Encrypted => println!("{}", Theme::success("Encryption enabled")),
                Protection::Plain => println!(
                    "{}",
                    Theme::warning("Plain text storage enabled (INSECURE)")
                ),
            }
            Ok(protection)
        },
        Err(e) => Err(e.into()),
    }
}
