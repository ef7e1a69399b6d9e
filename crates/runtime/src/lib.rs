pub mod dispose;
pub mod frame;
pub mod normalize;
pub mod scheduler;
pub mod timers;

pub use dispose::*;
pub use frame::*;
pub use normalize::*;
pub use scheduler::*;
pub use timers::*;
