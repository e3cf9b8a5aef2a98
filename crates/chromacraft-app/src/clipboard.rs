//! Clipboard access for hex codes.

/// Where a copied value ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Placed on the system clipboard.
    Clipboard,
    /// Clipboard unavailable; printed for manual copying.
    Printed,
}

/// Copy `text` to the system clipboard, falling back to stdout.
pub fn copy_text(text: &str) -> CopyOutcome {
    #[cfg(feature = "native")]
    {
        let copied = arboard::Clipboard::new()
            .and_then(|mut clipboard| clipboard.set_text(text.to_string()));
        match copied {
            Ok(()) => {
                log::info!("Copied {} to clipboard", text);
                return CopyOutcome::Clipboard;
            }
            Err(e) => log::warn!("Clipboard unavailable, printing instead: {}", e),
        }
    }

    println!("{}", text);
    CopyOutcome::Printed
}
