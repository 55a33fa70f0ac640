//! GnuPG invocation for symmetric encryption of the token.
//!
//! Runs `gpg --symmetric --cipher-algo AES256 --output -` to encrypt and
//! `gpg --decrypt --quiet` to decrypt. Input always travels over stdin and
//! output is read from stdout. stderr is inherited so pinentry and gpg's
//! own diagnostics reach the user's terminal.

use std::io::{self, Write};
use std::process::{Command, Output, Stdio};

use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::cipher::Cipher;
use crate::error::{CryptoError, CryptoResult};

/// Program looked up on `PATH` when none is configured.
pub const DEFAULT_PROGRAM: &str = "gpg";

/// Cipher passed to `--cipher-algo` when none is configured.
pub const DEFAULT_CIPHER_ALGO: &str = "AES256";

const INSTALL_HINT: &str = "Ubuntu/Debian: sudo apt install gnupg, \
                            Fedora: sudo dnf install gnupg, \
                            Arch: sudo pacman -S gnupg, macOS: brew install gnupg";

/// [`Cipher`] backed by the `gpg` command-line tool.
#[derive(Debug, Clone)]
pub struct GpgCipher {
    program: String,
    cipher_algo: String,
}

impl Default for GpgCipher {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            cipher_algo: DEFAULT_CIPHER_ALGO.to_string(),
        }
    }
}

impl GpgCipher {
    /// Create a cipher using `gpg` and AES256.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different program (name on `PATH` or a path to a binary).
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Use a different `--cipher-algo`.
    #[must_use]
    pub fn with_cipher_algo(mut self, cipher_algo: impl Into<String>) -> Self {
        self.cipher_algo = cipher_algo.into();
        self
    }

    /// The configured program.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    fn unavailable(&self) -> CryptoError {
        CryptoError::ToolUnavailable {
            tool: self.program.clone(),
            install_hint: INSTALL_HINT.to_string(),
        }
    }

    /// Spawn the tool with `args`, stream `input` to its stdin and collect
    /// its stdout.
    ///
    /// stdin is fed from a separate thread so a child that writes before it
    /// finishes reading cannot deadlock against a full pipe.
    fn run(&self, args: &[&str], input: &[u8]) -> io::Result<Output> {
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| io::Error::other("child stdin was not captured"))?;
        let input = Zeroizing::new(input.to_vec());
        let writer = std::thread::spawn(move || stdin.write_all(&input));

        let output = child.wait_with_output()?;

        match writer.join() {
            Ok(Ok(())) => {},
            // The child exited without draining stdin; its exit status tells
            // the caller what went wrong.
            Ok(Err(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!(program = %self.program, "tool closed stdin early");
            },
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(io::Error::other("stdin writer thread panicked")),
        }

        Ok(output)
    }
}

impl Cipher for GpgCipher {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    fn encrypt(&self, plaintext: &[u8]) -> CryptoResult<Vec<u8>> {
        if !self.is_available() {
            return Err(self.unavailable());
        }

        debug!(program = %self.program, cipher_algo = %self.cipher_algo, "encrypting");
        let output = self
            .run(
                &[
                    "--symmetric",
                    "--cipher-algo",
                    self.cipher_algo.as_str(),
                    "--output",
                    "-",
                ],
                plaintext,
            )
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    self.unavailable()
                } else {
                    CryptoError::EncryptionFailed(format!("failed to run {}: {e}", self.program))
                }
            })?;

        if !output.status.success() {
            warn!(program = %self.program, status = %output.status, "encryption tool failed");
            return Err(CryptoError::EncryptionFailed(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }
        if output.stdout.is_empty() {
            return Err(CryptoError::EncryptionFailed(format!(
                "{} produced no output",
                self.program
            )));
        }

        Ok(output.stdout)
    }

    fn decrypt(&self, ciphertext: &[u8]) -> CryptoResult<Zeroizing<Vec<u8>>> {
        if !self.is_available() {
            return Err(self.unavailable());
        }

        debug!(program = %self.program, "decrypting");
        let output = self
            .run(&["--decrypt", "--quiet"], ciphertext)
            .map_err(|e| {
                if e.kind() == io::ErrorKind::NotFound {
                    self.unavailable()
                } else {
                    CryptoError::DecryptionFailed(format!("failed to run {}: {e}", self.program))
                }
            })?;

        let plaintext = Zeroizing::new(output.stdout);
        if !output.status.success() {
            warn!(program = %self.program, status = %output.status, "decryption tool failed");
            return Err(CryptoError::DecryptionFailed(format!(
                "{} exited with {}",
                self.program, output.status
            )));
        }
        if plaintext.is_empty() {
            return Err(CryptoError::DecryptionFailed(format!(
                "{} produced no output",
                self.program
            )));
        }

        Ok(plaintext)
    }
}
