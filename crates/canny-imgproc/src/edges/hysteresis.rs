//! Double threshold hysteresis over a suppressed magnitude map.

use canny_image::{Image, ImageError};

/// Marker written into the final map for pixels that belong to an edge.
///
/// It lies outside the range of gradient magnitudes, which are never negative.
pub const EDGE: i16 = i16::MIN;

const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub(crate) fn check_thresholds(low: i16, high: i16) -> Result<(), ImageError> {
    if low < 0 || high < 0 || low > high {
        return Err(ImageError::InvalidThresholds(low, high));
    }
    Ok(())
}

#[inline]
fn is_strong(val: i16, high: i16) -> bool {
    val == EDGE || val >= high
}

#[inline]
fn is_weak(val: i16, low: i16) -> bool {
    val == EDGE || val >= low
}

/// Depth first traversal from `seed`, reusing `stack` between calls.
fn flood(
    map: &mut Image<i16>,
    visited: &mut [bool],
    stack: &mut Vec<usize>,
    seed: usize,
    low: i16,
) -> usize {
    let rows = map.rows() as isize;
    let cols = map.cols() as isize;
    let data = map.as_slice_mut();

    if visited[seed] {
        return 0;
    }
    visited[seed] = true;
    stack.clear();
    stack.push(seed);

    let mut count = 0;
    while let Some(idx) = stack.pop() {
        data[idx] = EDGE;
        count += 1;

        let r = (idx as isize) / cols;
        let c = (idx as isize) % cols;
        for (dr, dc) in NEIGHBORS {
            let (nr, nc) = (r + dr, c + dc);
            if nr < 0 || nr >= rows || nc < 0 || nc >= cols {
                continue;
            }
            let nidx = (nr * cols + nc) as usize;
            if !visited[nidx] && is_weak(data[nidx], low) {
                visited[nidx] = true;
                stack.push(nidx);
            }
        }
    }

    count
}

/// Grow an edge from a seed pixel through its weakly connected neighbours.
///
/// Every pixel reached, the seed included, is set to [`EDGE`] and marked in
/// `visited`. A neighbour is followed when it is unvisited, 8-connected and its
/// value is `>= low` (or already [`EDGE`]). Pixels that are not reached are left
/// untouched.
///
/// # Arguments
///
/// * `map` - The suppressed magnitude map, modified in place.
/// * `visited` - One flag per pixel, shared across seeds.
/// * `row` - The row of the seed.
/// * `col` - The column of the seed.
/// * `low` - The low threshold.
///
/// # Returns
///
/// The number of pixels set to [`EDGE`] by this call. An already visited seed yields 0.
pub fn find_edge_pixels(
    map: &mut Image<i16>,
    visited: &mut [bool],
    row: usize,
    col: usize,
    low: i16,
) -> Result<usize, ImageError> {
    let num_pixels = map.as_slice().len();
    if visited.len() != num_pixels {
        return Err(ImageError::InvalidChannelShape(visited.len(), num_pixels));
    }
    if row >= map.rows() || col >= map.cols() {
        return Err(ImageError::PixelIndexOutOfBounds(
            col,
            row,
            map.cols(),
            map.rows(),
        ));
    }

    let seed = row * map.cols() + col;
    let mut stack = Vec::new();
    Ok(flood(map, visited, &mut stack, seed, low))
}

/// Turn a suppressed magnitude map into the final binary edge map.
///
/// Every unvisited pixel with a value `>= high` seeds [`find_edge_pixels`], in
/// raster order. Once the scan is done, every pixel that was never reached is
/// set to 0, so the map only holds [`EDGE`] and 0. Running it again on its own
/// output leaves the map unchanged.
///
/// # Arguments
///
/// * `map` - The suppressed magnitude map, rewritten in place.
/// * `low` - The low threshold.
/// * `high` - The high threshold.
///
/// # Errors
///
/// Returns [`ImageError::InvalidThresholds`] unless `0 <= low <= high`. The
/// map is not modified in that case.
///
/// # Examples
///
/// ```
/// use canny_image::Image;
/// use canny_imgproc::edges::{track_edges, EDGE};
///
/// let mut map = Image::<i16>::new([3, 1].into(), vec![12, 5, 1]).unwrap();
/// track_edges(&mut map, 2, 10).unwrap();
///
/// assert_eq!(map.as_slice(), &[EDGE, EDGE, 0]);
/// ```
pub fn track_edges(map: &mut Image<i16>, low: i16, high: i16) -> Result<(), ImageError> {
    check_thresholds(low, high)?;

    let num_pixels = map.as_slice().len();
    let mut visited = vec![false; num_pixels];
    let mut stack = Vec::new();
    let mut seeds = 0usize;
    let mut edges = 0usize;

    for idx in 0..num_pixels {
        if visited[idx] || !is_strong(map.as_slice()[idx], high) {
            continue;
        }
        let grown = flood(map, &mut visited, &mut stack, idx, low);
        log::trace!(
            "edge seeded at ({}, {}) grew to {} pixels",
            idx / map.cols(),
            idx % map.cols(),
            grown
        );
        seeds += 1;
        edges += grown;
    }

    for (val, seen) in map.as_slice_mut().iter_mut().zip(visited) {
        if !seen {
            *val = 0;
        }
    }

    log::debug!(
        "hysteresis low={} high={}: {} seeds, {} edge pixels",
        low,
        high,
        seeds,
        edges
    );

    Ok(())
}
