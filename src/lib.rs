//! Robot face expression player.
//!
//! Plays looping image-sequence animations ("expressions") full-screen,
//! switching between them in response to requests that arrive on an
//! inbox queue. Requests are applied only at animation loop boundaries;
//! with no request pending the face decays to its default expression.

pub mod app;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod inbox;
pub mod library;
pub mod player;
pub mod transport;

pub use cli::Cli;
pub use config::Options;
pub use error::{FaceError, Result};
pub use inbox::{inbox, Inbox, InboxSender};
pub use library::{Expression, ExpressionLibrary, Frame};
pub use player::ExpressionPlayer;
