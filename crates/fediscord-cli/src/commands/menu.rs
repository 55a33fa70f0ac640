//! Interactive main menu.

use anyhow::Result;

use super::{Action, Context};
use crate::prompt;
use crate::theme::{Theme, print_banner, print_title};

/// Show the menu until the user exits.
///
/// A failing action prints its error and returns to the menu.
pub(crate) async fn run_menu(ctx: &Context) -> Result<()> {
    print_banner();

    let mut items: Vec<&str> = Action::MENU.iter().map(|a| a.label()).collect();
    items.push("Exit");

    loop {
        print_title("Main Menu");
        let choice = prompt::select("Select an option", &items, 0)?;

        let Some(action) = Action::MENU.get(choice).copied() else {
            println!();
            println!("{}", Theme::separator());
            println!(
                "{}",
                Theme::info("Thank you for using Fediverse to Discord Connection Tool!")
            );
            println!("{}", Theme::separator());
            return Ok(());
        };

        if let Err(e) = action.run(ctx).await {
            println!("{}", Theme::error(&format!("{e:#}")));
        }
        println!();
        prompt::press_enter()?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_lists_every_action_once() {
        let labels: Vec<_> = Action::MENU.iter().map(|a| a.label()).collect();
        let mut unique = labels.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), labels.len());
    }

    #[test]
    fn test_menu_delete_always_confirms() {
        assert!(
            Action::MENU
                .iter()
                .all(|a| !matches!(a, Action::Delete { assume_yes: true }))
        );
    }
}
