pub mod controller;
pub mod gallery;
pub mod input;

pub use controller::*;
pub use gallery::*;
pub use input::*;
