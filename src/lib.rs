//! Persistently set the hostname of a machine and keep `/etc/hosts` consistent
//! with it on Linux, the BSD family and Windows.
//!
//! [converge::apply] is the entry point: it selects a persistence
//! [strategy](strategy::Strategy) from the [PlatformFacts](facts::PlatformFacts),
//! applies the hostname and returns a [ChangeSet](converge::ChangeSet) telling
//! the caller whether cached host facts must be reloaded.

pub mod converge;
pub mod error;
pub mod facts;
pub mod layout;
pub mod lines;
pub mod platform;
pub mod request;
pub mod strategy;
pub mod system;

pub use converge::{apply, ChangeSet};
pub use error::HostnameError;
pub use facts::PlatformFacts;
pub use request::HostnameRequest;
pub use strategy::Strategy;
