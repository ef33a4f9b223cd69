//! Uniform cell index for neighbour queries on large configurations

use ndarray::Array2;

use crate::spatial::pattern::Point;
use crate::spatial::window::Window;

// Prevents degenerate cell sizes from allocating huge grids
/// Maximum number of cells along either axis
pub const MAX_CELLS_PER_AXIS: usize = 2048;

/// Points bucketed into square cells covering a window
///
/// Points outside the window are clamped into the border cells, so the
/// nearest-neighbour early exit is only exact for points inside the window.
#[derive(Debug, Clone)]
pub struct CellIndex {
    cells: Array2<Vec<usize>>,
    cell_size: f64,
    x_min: f64,
    y_min: f64,
}

impl CellIndex {
    /// Bucket `points` into cells of roughly `cell_size`
    pub fn build(points: &[Point], window: &Window, cell_size: f64) -> Self {
        let longest = window.width().max(window.height());
        let cell_size = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size.max(longest / MAX_CELLS_PER_AXIS as f64)
        } else {
            longest
        };
        let cols = ((window.width() / cell_size).ceil() as usize).clamp(1, MAX_CELLS_PER_AXIS);
        let rows = ((window.height() / cell_size).ceil() as usize).clamp(1, MAX_CELLS_PER_AXIS);

        let mut index = Self {
            cells: Array2::from_elem((rows, cols), Vec::new()),
            cell_size,
            x_min: window.x_min,
            y_min: window.y_min,
        };
        for (i, &p) in points.iter().enumerate() {
            let cell = index.cell_of(p);
            if let Some(bucket) = index.cells.get_mut(cell) {
                bucket.push(i);
            }
        }
        index
    }

    /// Cell size sized for about one point per cell
    pub fn default_cell_size(window: &Window, point_count: usize) -> f64 {
        (window.area() / point_count.max(1) as f64).sqrt()
    }

    /// Side length of each cell
    pub const fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Grid dimensions (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dim()
    }

    fn cell_of(&self, p: Point) -> (usize, usize) {
        let (rows, cols) = self.cells.dim();
        let col = ((p.x - self.x_min) / self.cell_size).floor().max(0.0) as usize;
        let row = ((p.y - self.y_min) / self.cell_size).floor().max(0.0) as usize;
        (row.min(rows - 1), col.min(cols - 1))
    }

    /// Distance from point `index` to its nearest other point
    ///
    /// Scans rings of cells outward and stops once no unscanned cell can hold
    /// a closer point. Returns infinity when there is no other point.
    pub fn nearest_neighbor_distance(&self, points: &[Point], index: usize) -> f64 {
        let Some(&origin) = points.get(index) else {
            return f64::INFINITY;
        };
        let (rows, cols) = self.cells.dim();
        let (row, col) = self.cell_of(origin);
        let max_ring = rows.max(cols);
        let mut best = f64::INFINITY;

        for ring in 0..=max_ring {
            // Points beyond this ring are at least `ring` cells away
            if best <= ring.saturating_sub(1) as f64 * self.cell_size {
                break;
            }
            for (r, c) in ring_cells(row, col, ring, rows, cols) {
                let Some(bucket) = self.cells.get((r, c)) else {
                    continue;
                };
                for &j in bucket {
                    if j == index {
                        continue;
                    }
                    if let Some(&other) = points.get(j) {
                        best = best.min(origin.distance(other));
                    }
                }
            }
        }
        best
    }

    /// Visit every unordered pair of points closer than `radius`
    ///
    /// The callback receives `(i, j, distance)` with `i < j`.
    pub fn for_each_pair_within<F>(&self, points: &[Point], radius: f64, mut visit: F)
    where
        F: FnMut(usize, usize, f64),
    {
        let (rows, cols) = self.cells.dim();
        let span = (radius / self.cell_size).ceil() as usize;

        for (i, &p) in points.iter().enumerate() {
            let (row, col) = self.cell_of(p);
            let r_lo = row.saturating_sub(span);
            let r_hi = row.saturating_add(span).min(rows - 1);
            let c_lo = col.saturating_sub(span);
            let c_hi = col.saturating_add(span).min(cols - 1);

            for r in r_lo..=r_hi {
                for c in c_lo..=c_hi {
                    let Some(bucket) = self.cells.get((r, c)) else {
                        continue;
                    };
                    for &j in bucket {
                        if j <= i {
                            continue;
                        }
                        if let Some(&q) = points.get(j) {
                            let d = p.distance(q);
                            if d < radius {
                                visit(i, j, d);
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Cells at Chebyshev distance exactly `ring` from `(row, col)`, clipped to the grid
fn ring_cells(
    row: usize,
    col: usize,
    ring: usize,
    rows: usize,
    cols: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let r_lo = row.saturating_sub(ring);
    let r_hi = (row + ring).min(rows - 1);
    let c_lo = col.saturating_sub(ring);
    let c_hi = (col + ring).min(cols - 1);

    (r_lo..=r_hi).flat_map(move |r| {
        (c_lo..=c_hi).filter_map(move |c| {
            let on_ring = r.abs_diff(row) == ring || c.abs_diff(col) == ring;
            on_ring.then_some((r, c))
        })
    })
}
