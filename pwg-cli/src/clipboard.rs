use std::time::Duration;

use arboard::Clipboard;
use log::{info, warn};
use pwg_lib::zeroize::Zeroizing;

use crate::error::CliError;

/// Copies `text` to the system clipboard.
///
/// Returns `false` when there was nothing to copy. `copied` runs once the
/// text is on the clipboard. With `clear_after` the call blocks for that
/// long and then clears the clipboard, unless its content was changed
/// elsewhere in the meantime. Without it, on Linux the call blocks until
/// another program takes over the clipboard, since the selection is served
/// by this process.
pub fn copy_to_clipboard<F>(
    text: &str,
    clear_after: Option<Duration>,
    copied: F,
) -> Result<bool, CliError>
where
    F: FnOnce(),
{
    if text.is_empty() {
        return Ok(false);
    }

    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    copied();

    match clear_after {
        Some(timeout) => {
            info!("clearing clipboard in {} seconds", timeout.as_secs());
            std::thread::sleep(timeout);
            clear_if_unchanged(&mut clipboard, text);
        }
        None => hold(&mut clipboard, text)?,
    }

    Ok(true)
}

#[cfg(target_os = "linux")]
fn hold(clipboard: &mut Clipboard, text: &str) -> Result<(), CliError> {
    use arboard::SetExtLinux;

    info!("keeping the clipboard until another program replaces it");
    clipboard.set().wait().text(text)?;

    Ok(())
}

#[cfg(not(target_os = "linux"))]
fn hold(_clipboard: &mut Clipboard, _text: &str) -> Result<(), CliError> {
    Ok(())
}

fn clear_if_unchanged(clipboard: &mut Clipboard, text: &str) {
    let current = match clipboard.get_text() {
        Ok(current) => Zeroizing::new(current),
        Err(error) => {
            warn!("failed to read clipboard: {}", error);
            return;
        }
    };

    if current.as_str() != text {
        info!("clipboard changed, leaving it alone");
        return;
    }

    match clipboard.clear() {
        Ok(()) => info!("clipboard cleared"),
        Err(error) => warn!("failed to clear clipboard: {}", error),
    }
}
