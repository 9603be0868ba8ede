// ── Reactive stores ──
//
// Single-writer, multi-reader state containers with push-based change
// notification via `watch` channels.

mod cell;
mod stream;

pub(crate) use cell::Store;
pub use cell::StoreReader;
pub use stream::{StoreStream, StoreWatchStream};
