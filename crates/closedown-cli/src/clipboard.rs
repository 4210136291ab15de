//! Clipboard sinks for `closedown link --copy`.

use std::io::Write;
use std::process::{Command, Stdio};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use closedown_core::clipboard::{Clipboard, ClipboardError};
use tracing::debug;

type Commands = &'static [(&'static str, &'static [&'static str])];

/// Platform clipboard commands, tried in order.
const COMMANDS: Commands = &[
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("pbcopy", &[]),
    ("clip", &[]),
];

/// Pipes text into the first clipboard command that runs successfully.
pub struct CommandClipboard {
    commands: Commands,
}

impl Default for CommandClipboard {
    fn default() -> Self {
        Self { commands: COMMANDS }
    }
}

impl Clipboard for CommandClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        for (program, args) in self.commands {
            let Ok(mut child) = Command::new(program)
                .args(*args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
            else {
                continue;
            };
            let written = match child.stdin.take() {
                Some(mut stdin) => stdin.write_all(text.as_bytes()),
                None => Ok(()),
            };
            // stdin is closed by now, so the child can exit.
            let status = child.wait();
            match (written, status) {
                (Ok(()), Ok(status)) if status.success() => return Ok(()),
                (Err(e), _) | (_, Err(e)) => {
                    debug!(program, error = %e, "clipboard command failed");
                }
                (Ok(()), Ok(status)) => {
                    debug!(program, %status, "clipboard command failed");
                }
            }
        }
        Err(ClipboardError("no clipboard command available".into()))
    }
}

/// Asks the terminal to set its clipboard with an OSC 52 escape on stderr.
pub struct TerminalClipboard;

impl Clipboard for TerminalClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut stderr = std::io::stderr().lock();
        write!(stderr, "{}", osc52(text))
            .and_then(|()| stderr.flush())
            .map_err(|e| ClipboardError(e.to_string()))
    }
}

fn osc52(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", B64.encode(text))
}
