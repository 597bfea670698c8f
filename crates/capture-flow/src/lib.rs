//! MemeMe Capture Flow
//!
//! Drives one meme from photo to saved entry. The flow is the only
//! component that talks to the image source, the compositor, the share
//! sink, and the store's write side.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │                   CaptureFlow                      │
//! │  ┌─────────────┐  ┌─────────────┐  ┌────────────┐ │
//! │  │ ImageSource │  │ Compositor  │  │ ShareSink  │ │
//! │  │ (picker)    │  │ (flatten)   │  │ (export)   │ │
//! │  └──────┬──────┘  └──────┬──────┘  └─────┬──────┘ │
//! │         │                │               │        │
//! │         ▼                ▼               ▼        │
//! │  Idle → Editing → Ready → Composed → Saved        │
//! │                                      │            │
//! │                                      ▼            │
//! │                           MemeStore::append       │
//! └───────────────────────────────────────────────────┘
//! ```

pub mod channel;
pub mod collaborators;
pub mod flow;

pub use channel::*;
pub use collaborators::*;
pub use flow::*;
