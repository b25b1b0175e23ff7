// crates/patchbot-monitor/src/notifier.rs
//
// Formats a PatchInfo into chat messages and sends them in order.
//
// With an image the announcement is three messages: header, the bare
// image URL (so the chat client renders an inline preview), and a footer
// whose page link is wrapped in <...> to suppress a second preview.

use patchbot_core::{BotError, Destination, PatchInfo};

/// Sent by the monitor ahead of an automatic announcement.
pub const NEW_PATCH_HEADLINE: &str = "**New patch detected!**";

/// The messages that make up an announcement, in send order.
pub fn announcement_messages(info: &PatchInfo) -> Vec<String> {
    match &info.image_url {
        None => vec![format!(
            "**Patch {} available!**\nSee patch: <{}>",
            info.version, info.page_url
        )],
        Some(image_url) => vec![
            format!("**Patch {} - League of Legends**", info.version),
            image_url.clone(),
            format!(
                "See full patch: <{}>\nLanguage: {}",
                info.page_url, info.language_tag
            ),
        ],
    }
}

/// Send an announcement to `destination`.
///
/// Messages go out one at a time; the first failure aborts the rest and
/// is returned to the caller. No retry.
pub async fn announce(destination: &dyn Destination, info: &PatchInfo) -> Result<(), BotError> {
    for message in announcement_messages(info) {
        destination.send(&message).await?;
    }
    tracing::info!(
        "Announced patch {} to channel {}",
        info.version,
        destination.id()
    );
    Ok(())
}
