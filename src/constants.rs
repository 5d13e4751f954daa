//! Shared crate-wide constants.

use std::time::Duration;

/// Endpoint used when neither `--endpoint` nor `CLIP_FORMAT_ENDPOINT` is set.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5173/format";

/// How long a status message stays visible before the status line clears
/// itself.
///
/// Every message carries its own deadline, so a newer message is never
/// erased by the deadline of an older one.
pub const DEFAULT_STATUS_TTL: Duration = Duration::from_millis(1500);

/// Upper bound for a single formatting request, connect time included.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Interval at which the UI loop wakes up to drain updates and expire the
/// status line when no input arrives.
pub const UI_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub const MSG_COULD_NOT_FORMAT: &str = "Error: could not format.";
pub const MSG_COPIED: &str = "Copied to clipboard.";
pub const MSG_COPY_FAILED: &str = "Copy failed; select the output and copy it manually.";
pub const MSG_NOTHING_TO_COPY: &str = "Nothing to copy.";
pub const MSG_CLIPBOARD_EMPTY: &str = "Clipboard is empty.";
pub const MSG_PASTE_BLOCKED: &str =
    "Clipboard access blocked. Paste into the input manually, then press Format.";
pub const MSG_BUSY: &str = "Still formatting the previous request.";
