//! MemeMe Meme Store
//!
//! The ordered, append-only collection of memes created during a session,
//! plus the list, grid, and detail queries that browse it.
//!
//! # Ownership
//!
//! ```text
//!   composition root
//!          │ Arc<MemeStore>
//!          ├──────────────► CaptureFlow (appends)
//!          │
//!          │ Weak<MemeStore>
//!          ├──────────────► MemeListView
//!          ├──────────────► MemeGridView
//!          └──────────────► MemeDetailView
//! ```
//!
//! Nothing is persisted; the collection lives as long as its last `Arc`.

pub mod store;
pub mod views;

pub use store::*;
pub use views::*;
