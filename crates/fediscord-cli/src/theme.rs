//! CLI theme and styling.

use colored::Colorize;

/// CLI theme configuration.
pub(crate) struct Theme;

impl Theme {
    /// Format a header.
    pub(crate) fn header(text: &str) -> String {
        format!("{}", text.bold().cyan())
    }

    /// Format a success message.
    pub(crate) fn success(text: &str) -> String {
        format!("{} {}", "✓".green(), text)
    }

    /// Format an error message.
    pub(crate) fn error(text: &str) -> String {
        format!("{} {}", "✗".red(), text.red())
    }

    /// Format a warning message.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "!".yellow(), text.yellow())
    }

    /// Format an info message.
    pub(crate) fn info(text: &str) -> String {
        format!("{} {}", "i".blue(), text)
    }

    /// Format a dimmed message.
    pub(crate) fn dimmed(text: &str) -> String {
        format!("{}", text.dimmed())
    }

    /// Format a separator line.
    pub(crate) fn separator() -> String {
        "━".repeat(50).dimmed().to_string()
    }

    /// Format a key-value pair.
    pub(crate) fn kv(key: &str, value: &str) -> String {
        format!("{}: {}", key.bold(), value)
    }
}

/// Print a screen title framed by separators.
pub(crate) fn print_title(title: &str) {
    println!();
    println!("{}", Theme::separator());
    println!("  {}", Theme::header(title));
    println!("{}", Theme::separator());
    println!();
}

/// Print the banner shown above the interactive menu.
pub(crate) fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!(
        "{}",
        format!("  Fediverse to Discord Connection Tool  v{version}")
            .bold()
            .cyan()
    );
    println!(
        "  {}",
        Theme::dimmed("Link a Mastodon-compatible account to your Discord profile")
    );
}

/// Print the install hints for GnuPG.
pub(crate) fn print_gpg_install_hints() {
    println!("{}", Theme::info("To enable encryption, install GnuPG:"));
    println!("    Ubuntu/Debian: sudo apt install gnupg");
    println!("    Fedora:        sudo dnf install gnupg");
    println!("    Arch:          sudo pacman -S gnupg");
    println!("    macOS:         brew install gnupg");
    println!("    Windows:       https://gpg4win.org");
}
