//! # vpnc-log
//!
//! Durable event log for the `vpn-client` lifecycle simulator.
//!
//! This crate provides:
//! - `Status` and `Event` (the only record kind)
//! - the JSON array codec for the persisted document
//! - `EventLogStore` (lazy init, load, append, atomic whole-file rewrite)
//!
//! It does not interpret events. Status derivation and history queries live
//! in `vpnc-engine`.
//!
//! ## Data model
//!
//! ```text
//! events.json (one JSON array, append order)
//!     ↕  load / save (full rewrite)
//! Vec<Event> (in-memory, same order)
//! ```

pub mod codec;
pub mod event;
pub mod store;

pub use codec::{decode_events, encode_events};
pub use event::{Event, ParseStatusError, Status};
pub use store::{EventLog, EventLogStore, StorageError};
