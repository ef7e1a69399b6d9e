//! One installer per visual trigger. Each owns its DOM subtree and reads the
//! shared viewport state only through the hub.

use std::rc::Rc;

use runtime::dispose::DisposeBag;

use crate::error::SiteError;
use crate::site::SiteContext;

pub mod back_to_top;
pub mod counters;
pub mod gallery;
pub mod menu;
pub mod navbar;
pub mod parallax;
pub mod particles;
pub mod reveal;
pub mod sections;
mod watch;

pub type Install = fn(&Rc<SiteContext>, &mut DisposeBag) -> Result<(), SiteError>;

/// Installation order. Scroll handlers run in this order within a frame.
pub const ALL: &[(&str, Install)] = &[
    ("navbar", navbar::install),
    ("menu", menu::install),
    ("sections", sections::install),
    ("reveal", reveal::install),
    ("back-to-top", back_to_top::install),
    ("parallax", parallax::install),
    ("counters", counters::install),
    ("particles", particles::install),
    ("gallery", gallery::install),
];
