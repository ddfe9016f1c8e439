//! Editable marketing content panels.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every content panel on the marketing site follows the same cycle: fetch
//! its copy and images, render them read-only, let an admin edit the copy or
//! swap an image, and persist the change over REST. `state::panel` implements
//! that cycle once; `net` talks to the backend and `preview` owns the local
//! image handles the panels display.

pub mod config;
pub mod net;
pub mod preview;
pub mod session;
pub mod state;
