//! "Copy link to this entry".
//!
//! Copying goes to a primary clipboard first and falls back to a secondary
//! path when that fails. A failing fallback is not reported: the control
//! shows its confirmation either way.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

use crate::anchor::direct_link;

pub const COPY_LINK_LABEL: &str = "Copy link to this entry";
pub const COPIED_LABEL: &str = "Copied!";
/// How long [`COPIED_LABEL`] stays up before the control reverts.
pub const COPIED_FEEDBACK: Duration = Duration::from_millis(1200);

#[derive(Debug, Error)]
#[error("clipboard unavailable: {0}")]
pub struct ClipboardError(pub String);

/// Somewhere text can be copied to.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Which path ended up handling the copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    Primary,
    Fallback,
}

/// Outcome of a copy: the link that was copied and the path taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedLink {
    pub url: String,
    pub path: CopyPath,
}

impl CopiedLink {
    /// Label to show on the control `elapsed` after the click.
    pub fn label_after(&self, elapsed: Duration) -> &'static str {
        if elapsed < COPIED_FEEDBACK {
            COPIED_LABEL
        } else {
            COPY_LINK_LABEL
        }
    }
}

/// Copy the direct link for `anchor` on `page_url`.
pub fn copy_link(
    primary: &mut dyn Clipboard,
    fallback: &mut dyn Clipboard,
    page_url: &str,
    anchor: &str,
) -> CopiedLink {
    let url = direct_link(page_url, anchor);
    let path = match primary.write_text(&url) {
        Ok(()) => CopyPath::Primary,
        Err(err) => {
            debug!(error = %err, "primary clipboard failed, using fallback");
            if let Err(err) = fallback.write_text(&url) {
                warn!(error = %err, "fallback clipboard failed");
            }
            CopyPath::Fallback
        }
    };
    CopiedLink { url, path }
}
