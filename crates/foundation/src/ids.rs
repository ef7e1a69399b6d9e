/// Identifier for a scheduled timer. Never reused within one timer host.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

impl TimerId {
    pub fn new(n: u64) -> Self {
        TimerId(n)
    }
}
