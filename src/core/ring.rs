//! Circular index arithmetic over a fixed-size ring of items.
//!
//! Nothing here keeps state between calls: the [`Ring`] only owns its items, and the free
//! functions take the ring length explicitly so the transition controller can
//! use them without holding on to the items themselves.

use thiserror::Error;

/// Number of indices at each end of the ring where a transition is forced to
/// travel across the seam instead of taking the direct path.
pub const BOUNDARY_WINDOW: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RingError {
    #[error("a ring needs at least one item")]
    Empty,
}

/// Which way a transition travels on screen, plus how many items it crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Heading {
    /// `true` when the incoming item enters from the left edge (and the
    /// outgoing one leaves to the right).
    pub from_left: bool,
    pub distance: usize,
}

// ───────────────────────────────────────── ring ──────────────

/// Immutable ordered ring of `N >= 1` items.
#[derive(Debug, Clone)]
pub struct Ring<T> {
    items: Vec<T>,
}

impl<T> Ring<T> {
    pub fn new(items: Vec<T>) -> Result<Self, RingError> {
        if items.is_empty() {
            return Err(RingError::Empty);
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Item at `index`, wrapping modulo the ring length.
    pub fn wrapped(&self, index: usize) -> &T {
        &self.items[index % self.items.len()]
    }
}

// ───────────────────────────────────────── index math ────────

/// Wrap `from + delta` onto `[0, len)`.
pub fn step(len: usize, from: usize, delta: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as isize;
    (from as isize + delta).rem_euclid(len) as usize
}

/// Indices flanking `center`.
///
/// The left half is ordered farthest-first so `left ++ [center] ++ right` is
/// the on-screen order.  Asking for more neighbours than the ring can supply
/// without repeats is allowed; indices simply come around again.
pub fn neighbors(len: usize, center: usize, per_side: usize) -> (Vec<usize>, Vec<usize>) {
    let left = (1..=per_side)
        .rev()
        .map(|k| step(len, center, -(k as isize)))
        .collect();
    let right = (1..=per_side)
        .map(|k| step(len, center, k as isize))
        .collect();
    (left, right)
}

/// Left-to-right visual order of the strip centred on `center`.
pub fn strip(len: usize, center: usize, per_side: usize) -> Vec<usize> {
    let (left, right) = neighbors(len, center, per_side);
    let mut out = Vec::with_capacity(left.len() + 1 + right.len());
    out.extend(left);
    out.push(center);
    out.extend(right);
    out
}

/// Largest neighbour count that keeps every strip index distinct.
///
/// Requests above it are clamped (with a warning) rather than rejected, so a
/// ring of any size stays navigable.
pub fn safe_per_side(len: usize, requested: usize) -> usize {
    let max = len.saturating_sub(1) / 2;
    if requested > max {
        tracing::warn!(
            requested,
            clamped = max,
            ring_len = len,
            "RingTooSmall: neighbour count clamped"
        );
        max
    } else {
        requested
    }
}

/// Seam window actually applied for a ring of `len` items.  Rings shorter
/// than five would let a forced crossing exceed `len - 1` items, so they get
/// half the ring instead.
fn boundary_window(len: usize) -> usize {
    if len >= 5 {
        BOUNDARY_WINDOW
    } else {
        len / 2
    }
}

/// Direction and item distance of a transition from `from` to `to`.
///
/// Transitions between the first and last [`BOUNDARY_WINDOW`] indices always
/// travel across the seam, so scrolling past the end keeps moving the same
/// way instead of rewinding through the whole ring.  Everywhere else the
/// direct path is used.
pub fn direction_and_distance(len: usize, from: usize, to: usize) -> Heading {
    if from == to {
        return Heading {
            from_left: false,
            distance: 0,
        };
    }

    let window = boundary_window(len);
    let last = len.saturating_sub(1);
    let in_head = |i: usize| i < window;
    let in_tail = |i: usize| window > 0 && i >= len - window;

    if in_head(from) && in_tail(to) {
        Heading {
            from_left: true,
            distance: from + (last - to) + 1,
        }
    } else if in_tail(from) && in_head(to) {
        Heading {
            from_left: false,
            distance: (last - from) + to + 1,
        }
    } else {
        Heading {
            from_left: to < from,
            distance: from.abs_diff(to),
        }
    }
}
