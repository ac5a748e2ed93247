//! Range copies out of slices.

/// Copy `source[begin..min(end, len)]` into a fresh vector.
///
/// `end = None` selects the rest of the slice. The result never aliases
/// `source`; reference-like elements are cloned shallowly.
///
/// # Panics
///
/// Panics if `begin` lies past the clamped end, which is a caller error.
///
/// # Examples
///
/// ```
/// use presence::framing::copy_range;
///
/// assert_eq!(copy_range(&[1, 2, 3, 4, 5], 1, Some(3)), vec![2, 3]);
/// assert_eq!(copy_range(&[1, 2, 3, 4, 5], 2, None), vec![3, 4, 5]);
/// ```
#[must_use]
pub fn copy_range<T: Clone>(source: &[T], begin: usize, end: Option<usize>) -> Vec<T> {
    let end = end.map_or(source.len(), |end| end.min(source.len()));
    assert!(
        begin <= end,
        "copy_range begin {begin} exceeds end {end} of a {}-element slice",
        source.len()
    );
    source[begin..end].to_vec()
}
