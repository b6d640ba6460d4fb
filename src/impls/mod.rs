//! [`PodMember`](crate::PodMember) implementations for foreign types.
//!
//! These are the "opaque primitive" projections: the member is forwarded
//! to the archive verbatim, by reference on the way out and by value on
//! the way back in.

mod alloc;
mod core;
