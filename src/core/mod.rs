//! Interaction state machines.
//!
//! Each flow (autocomplete, search session, summary) owns one logical
//! request slot guarded by a monotonically increasing generation token:
//! the token is captured when a request is issued and compared when its
//! response arrives, so responses apply in issue order and stale responses
//! are discarded silently. The flows are independent; no cross-flow locking
//! exists or is needed.

pub mod autocomplete;
pub mod debounce;
pub mod session;
pub mod summary;
