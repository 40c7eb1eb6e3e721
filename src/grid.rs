//! Dense occupancy grid used by both the packer (binary) and the fitness
//! evaluator (counting, to detect overlap).

use crate::geometry::{self, disk_mask, point_in_diamond, rotated_vertices};
use crate::model::{Part, PlacedPart, Sheet};

/// A `width x height` grid of non-negative occupancy counters.
///
/// The packer only ever sets cells to 1 and checks for zero; the evaluator
/// increments cells and looks at how far above 1 they climb to measure
/// overlap. Both uses share the same cell-enumeration logic below.
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: u32,
    height: u32,
    cells: Vec<u32>,
}

impl OccupancyGrid {
    pub fn new(sheet: Sheet) -> Self {
        Self {
            width: sheet.width,
            height: sheet.height,
            cells: vec![0; (sheet.width as usize) * (sheet.height as usize)],
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = 0);
    }

    #[inline]
    fn in_bounds(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    #[inline]
    fn idx(&self, x: i64, y: i64) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    #[inline]
    pub fn get(&self, x: i64, y: i64) -> u32 {
        if self.in_bounds(x, y) {
            self.cells[self.idx(x, y)]
        } else {
            0
        }
    }

    /// Returns true only if every cell in the part's footprint (margin
    /// included) is unoccupied. Cells outside the grid are never "free":
    /// callers are expected to bounds-check the bounding box separately,
    /// but a margin inflation that spills off-grid is simply clipped here.
    pub fn is_free(&self, part: &Part, x: i64, y: i64, margin: u32) -> bool {
        footprint_cells(part, x, y, margin)
            .into_iter()
            .all(|(cx, cy)| !self.in_bounds(cx, cy) || self.cells[self.idx(cx, cy)] == 0)
    }

    /// Marks every cell in the part's footprint (margin included) as
    /// occupied (packer mode: set to 1).
    pub fn stamp_occupied(&mut self, part: &Part, x: i64, y: i64, margin: u32) {
        for (cx, cy) in footprint_cells(part, x, y, margin) {
            if self.in_bounds(cx, cy) {
                let idx = self.idx(cx, cy);
                self.cells[idx] = 1;
            }
        }
    }

    /// Increments every cell in the part's footprint (no margin: used by
    /// the evaluator, which measures true geometric overlap).
    pub fn stamp_counted(&mut self, part: &Part, x: i64, y: i64) {
        for (cx, cy) in footprint_cells(part, x, y, 0) {
            if self.in_bounds(cx, cy) {
                let idx = self.idx(cx, cy);
                self.cells[idx] += 1;
            }
        }
    }

    /// Sum of `max(0, count - 1)` over every cell: the total overlap area
    /// in cells.
    pub fn overlap_cells(&self) -> u64 {
        self.cells
            .iter()
            .map(|&c| u64::from(c.saturating_sub(1)))
            .sum()
    }
}

/// Computes every grid cell occupied by `part` placed at `(x, y)`, with the
/// given margin inflation. Shared by packer `is_free`/`stamp_occupied` and
/// evaluator `stamp_counted` (margin = 0 there).
fn footprint_cells(part: &Part, x: i64, y: i64, margin: u32) -> Vec<(i64, i64)> {
    let m = i64::from(margin);
    match part {
        Part::Circular { r } => {
            let r = i64::from(*r);
            let cx = x + r;
            let cy = y + r;
            let mask = disk_mask((r + m) as u32);
            let start_x = cx - (r + m);
            let start_y = cy - (r + m);
            let mut out = Vec::with_capacity((mask.side * mask.side) as usize / 3);
            for i in 0..mask.side {
                for j in 0..mask.side {
                    if mask.get(i, j) {
                        out.push((start_x + i as i64, start_y + j as i64));
                    }
                }
            }
            out
        }
        Part::Diamond { .. } => {
            let verts = rotated_vertices(part, x, y);
            let min_x = verts.iter().map(|v| v.0).fold(f64::INFINITY, f64::min).floor() as i64 - m;
            let max_x = verts
                .iter()
                .map(|v| v.0)
                .fold(f64::NEG_INFINITY, f64::max)
                .ceil() as i64
                + m;
            let min_y = verts.iter().map(|v| v.1).fold(f64::INFINITY, f64::min).floor() as i64 - m;
            let max_y = verts
                .iter()
                .map(|v| v.1)
                .fold(f64::NEG_INFINITY, f64::max)
                .ceil() as i64
                + m;
            let mut out = Vec::new();
            for i in min_x..=max_x {
                for j in min_y..=max_y {
                    if point_in_diamond(i as f64 + 0.5, j as f64 + 0.5, &verts) {
                        out.push((i, j));
                    }
                }
            }
            out
        }
        Part::Rectangular { .. } => {
            let (w, h) = geometry::bounding_box(part);
            let w = i64::from(w);
            let h = i64::from(h);
            let mut out = Vec::with_capacity(((w + 2 * m) * (h + 2 * m)) as usize);
            for i in -m..(w + m) {
                for j in -m..(h + m) {
                    out.push((x + i, y + j));
                }
            }
            out
        }
    }
}

/// Top-left and bottom-right of the footprint's un-inflated bounding box,
/// used by the packer to reject candidates that would extend off-sheet
/// before doing any per-cell work.
pub fn out_of_bounds(sheet: Sheet, placed: &PlacedPart) -> bool {
    let (w, h) = geometry::bounding_box(&placed.part);
    placed.x < 0
        || placed.y < 0
        || placed.x + i64::from(w) > i64::from(sheet.width)
        || placed.y + i64::from(h) > i64::from(sheet.height)
}
