//! Lightbox state machine.
//!
//! The lightbox is either closed or open at an index into the currently
//! displayed image sequence. Every transition is expressed in modular
//! arithmetic over the sequence length, so an out-of-bounds index cannot be
//! produced: navigating past the last image wraps to the first and vice
//! versa.
//!
//! ## Lifetime of key handling
//!
//! Directional keys (left/right arrow) and Escape drive the lightbox only
//! while it is open. The rendered page embeds the key-navigation shim only
//! alongside the overlay markup, so a page without an open lightbox carries
//! no key listeners at all — nothing to leak, nothing to detach.
//!
//! ## Shrinking sequences
//!
//! The image sequence can change under an open lightbox (the filter changed,
//! a shared URL points at an index the current filter no longer has). The
//! policy is implicit close: [`Lightbox::reconcile`] folds any out-of-range
//! state back to `Closed` rather than clamping or erroring.

/// Keyboard input relevant to an open lightbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value. Unrecognized keys are `None`
    /// and leave the state machine untouched.
    pub fn from_dom(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "Escape" => Some(Key::Escape),
            _ => None,
        }
    }
}

/// Lightbox state: closed, or open at an index into the image sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lightbox {
    #[default]
    Closed,
    Open(usize),
}

impl Lightbox {
    /// Open at index `i` of a sequence of length `len`. Opening into an
    /// empty sequence or past its end stays closed.
    #[must_use]
    pub fn open(i: usize, len: usize) -> Self {
        if i < len {
            Lightbox::Open(i)
        } else {
            Lightbox::Closed
        }
    }

    /// Derive state from the page's optional `photo` query parameter.
    ///
    /// Absent, unparsable, or out-of-range values all mean closed — a
    /// stale shared URL degrades to the plain grid, never an error.
    pub fn from_query(photo: Option<&str>, len: usize) -> Self {
        match photo.and_then(|v| v.parse::<usize>().ok()) {
            Some(i) => Lightbox::open(i, len),
            None => Lightbox::Closed,
        }
    }

    /// Advance to the next image, wrapping past the end.
    #[must_use]
    pub fn next(self, len: usize) -> Self {
        match self {
            Lightbox::Open(i) if len > 0 => Lightbox::Open((i + 1) % len),
            _ => Lightbox::Closed,
        }
    }

    /// Step back to the previous image, wrapping past the start.
    #[must_use]
    pub fn prev(self, len: usize) -> Self {
        match self {
            Lightbox::Open(i) if len > 0 => Lightbox::Open((i + len - 1) % len),
            _ => Lightbox::Closed,
        }
    }

    #[must_use]
    pub fn close(self) -> Self {
        Lightbox::Closed
    }

    /// Apply a key press. Only meaningful while open; a closed lightbox
    /// ignores all keys.
    #[must_use]
    pub fn key(self, key: Key, len: usize) -> Self {
        match (self, key) {
            (Lightbox::Closed, _) => Lightbox::Closed,
            (_, Key::Escape) => Lightbox::Closed,
            (open, Key::ArrowRight) => open.next(len),
            (open, Key::ArrowLeft) => open.prev(len),
        }
    }

    /// Fold out-of-range state back to `Closed` after the underlying
    /// sequence changed length. In-range open state is preserved.
    #[must_use]
    pub fn reconcile(self, len: usize) -> Self {
        match self {
            Lightbox::Open(i) if i < len => self,
            _ => Lightbox::Closed,
        }
    }

    /// Open index, if open. Guaranteed in range for the length it was
    /// last validated against.
    pub fn index(self) -> Option<usize> {
        match self {
            Lightbox::Open(i) => Some(i),
            Lightbox::Closed => None,
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Lightbox::Open(_))
    }
}
