//! Scroll-driven visual triggers.
//!
//! Every trigger here is a small state machine: it reads a [`ViewportState`]
//! (or [`ScrollMetrics`]) snapshot and returns the presentation its DOM subtree
//! should have. Applying that presentation is the browser layer's job.
//!
//! [`ViewportState`]: viewport::ViewportState
//! [`ScrollMetrics`]: viewport::ScrollMetrics

pub mod back_to_top;
pub mod counter;
pub mod menu;
pub mod navbar;
pub mod parallax;
pub mod particles;
pub mod reveal;
pub mod sections;

pub use back_to_top::*;
pub use counter::*;
pub use menu::*;
pub use navbar::*;
pub use parallax::*;
pub use particles::*;
pub use reveal::*;
pub use sections::*;
