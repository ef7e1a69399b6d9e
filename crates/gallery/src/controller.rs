use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GalleryError {
    Empty,
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for GalleryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GalleryError::Empty => write!(f, "gallery has no entries"),
            GalleryError::IndexOutOfRange { index, len } => {
                write!(f, "gallery index {index} out of range for {len} entries")
            }
        }
    }
}

impl std::error::Error for GalleryError {}

/// A change of the active entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
}

/// Requested movement, independent of what produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Previous,
    First,
    Last,
    Index(usize),
}

/// Active-entry state machine over a fixed number of entries.
///
/// Exactly one entry is active at all times; stepping wraps around both ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryController {
    len: usize,
    active: usize,
}

impl GalleryController {
    pub fn new(len: usize) -> Result<Self, GalleryError> {
        if len == 0 {
            return Err(GalleryError::Empty);
        }
        Ok(Self { len, active: 0 })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// Resolve a navigation request to a target index without applying it.
    pub fn target(&self, nav: Navigation) -> Result<usize, GalleryError> {
        let target = match nav {
            Navigation::Next => (self.active + 1) % self.len,
            Navigation::Previous => (self.active + self.len - 1) % self.len,
            Navigation::First => 0,
            Navigation::Last => self.len - 1,
            Navigation::Index(index) if index < self.len => index,
            Navigation::Index(index) => {
                return Err(GalleryError::IndexOutOfRange {
                    index,
                    len: self.len,
                });
            }
        };
        Ok(target)
    }

    /// Apply a navigation request. Selecting the already-active entry succeeds
    /// with no transition.
    pub fn navigate(&mut self, nav: Navigation) -> Result<Option<Transition>, GalleryError> {
        let to = self.target(nav)?;
        if to == self.active {
            return Ok(None);
        }
        let from = self.active;
        self.active = to;
        Ok(Some(Transition { from, to }))
    }

    pub fn select(&mut self, index: usize) -> Result<Option<Transition>, GalleryError> {
        self.navigate(Navigation::Index(index))
    }

    pub fn next(&mut self) -> Option<Transition> {
        self.navigate(Navigation::Next).ok().flatten()
    }

    pub fn previous(&mut self) -> Option<Transition> {
        self.navigate(Navigation::Previous).ok().flatten()
    }
}
