// crates/patchbot-fetch/src/lib.rs
//
// patchbot-fetch: network side of the patch source.
//
// - `http`: GET with browser-like headers and a timeout; non-200 and
//   transport errors become `Unavailable`.
// - `versions`: resolves the newest VersionTag from the version feed.
// - `pages`: fetches patch-notes pages (primary locale, then secondary)
//   and selects the summary image.
// - `client`: `PatchNotesClient`, the `PatchSource` implementation.

pub mod client;
pub mod http;
pub mod pages;
pub mod versions;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::PatchNotesClient;
pub use http::{HttpFetcher, Unavailable};
pub use pages::{extract_images, PageInspection, PatchPageFetcher};
pub use versions::{tag_from_feed, VersionResolver};
