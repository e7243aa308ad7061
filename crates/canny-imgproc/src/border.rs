//! Index helpers for border handling.

/// Clamp a possibly out of range index into `[0, len)`, replicating the border.
///
/// PRECONDITION: `len > 0`.
#[inline]
pub(crate) fn replicate_index(idx: isize, len: usize) -> usize {
    idx.clamp(0, len as isize - 1) as usize
}

/// Offset an index, returning `None` when the result leaves `[0, len)`.
#[inline]
pub(crate) fn offset_index(idx: usize, offset: isize, len: usize) -> Option<usize> {
    let moved = idx as isize + offset;
    (moved >= 0 && moved < len as isize).then_some(moved as usize)
}
