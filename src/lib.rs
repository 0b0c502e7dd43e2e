//! An unofficial client for the Mergington High School activities API.
//!
//! The [`SessionManager`] owns the login/logout/restore flow and the
//! persisted token behind it, while the [`ActivityBoard`] fetches the
//! activity roster and carries out enrollments. The two stay in lockstep: a
//! session change is always followed by a fresh fetch-and-render.

#![forbid(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

mod activity;
mod board;
pub mod endpoints;
mod message;
mod session;
mod token_store;
mod view;

pub use activity::{Activity, ActivityMap};
pub use board::ActivityBoard;
pub use message::{Message, MessageArea, Severity, MESSAGE_TTL};
pub use session::{Role, Session, SessionManager, User};
pub use token_store::TokenStore;
pub use view::{render, ActivityCard, BoardView, ParticipantRow};

/// The default user agent to use when communicating with the activities
/// server.
pub const DEFAULT_USER_AGENT: &str =
    concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"));
