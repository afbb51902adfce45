use std::alloc::{alloc_zeroed, Layout};

use crate::error::{allocation_error, Result};

/// Allocates a zero-filled `Vec<f64>` of `len` elements, reporting failure
/// as an error instead of aborting the process.
///
/// Zeroed pages come straight from the allocator (`calloc`-style), so the
/// 800 MB output buffers of a full-size run are cheap to re-create between
/// warm-up and timed invocations.
///
/// # Errors
///
/// Returns [`LoopmulError::AllocationError`](crate::error::LoopmulError) if the
/// byte size overflows `isize::MAX` or the allocator returns null.
pub fn try_alloc_zeroed(len: usize) -> Result<Vec<f64>> {
    if len == 0 {
        return Ok(Vec::new());
    }

    let requested_bytes = len.saturating_mul(std::mem::size_of::<f64>());
    let layout = Layout::array::<f64>(len)
        .map_err(|err| allocation_error(requested_bytes, err.to_string()))?;

    let ptr = unsafe { alloc_zeroed(layout) as *mut f64 };

    if ptr.is_null() {
        return Err(allocation_error(requested_bytes, "allocator returned null"));
    }

    // SAFETY:
    // - ptr is non-null and was allocated by the global allocator with the
    //   exact layout `Vec<f64>` uses for `len` elements
    // - all-zero bits are a valid `0.0f64`, so every element is initialized
    Ok(unsafe { Vec::from_raw_parts(ptr, len, len) })
}
