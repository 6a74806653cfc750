//! Backend API integration for testgen.
//!
//! The api module exposes a worker task that owns request dispatch for the
//! backend HTTP client. The main loop never awaits a request itself: it
//! sends an `ApiRequest` down a channel and the completion comes back as an
//! `AppEvent::Api` in arbitrary order. Tree-listing requests carry their
//! controller tickets through the round trip so stale completions are
//! recognized and discarded on arrival.
pub mod types;
pub mod worker;
