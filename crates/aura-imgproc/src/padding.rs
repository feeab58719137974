/// Map a possibly out-of-range index into `[0, len)` by mirroring at the borders.
///
/// The edge pixel itself is repeated: `...d c b a | a b c d...`. Indices further
/// than one image length away keep bouncing between the two borders, so kernels
/// wider than the image stay valid.
///
/// PRECONDITION: `len > 0`.
///
/// # Example
///
/// ```
/// use aura_imgproc::padding::reflect_index;
///
/// assert_eq!(reflect_index(-1, 5), 0);
/// assert_eq!(reflect_index(6, 5), 3);
/// ```
#[inline]
pub fn reflect_index(i: isize, len: usize) -> usize {
    if i >= 0 && (i as usize) < len {
        return i as usize;
    }
    if len == 1 {
        return 0;
    }

    let len = len as isize;
    let mut i = i;
    while i < 0 || i >= len {
        if i < 0 {
            i = -i - 1;
        } else {
            i = 2 * len - i - 1;
        }
    }
    i as usize
}
