//! The flexible raster packer: greedily places parts, in the given order,
//! at the first feasible integer position under a configurable scan order.

use crate::grid::{out_of_bounds, OccupancyGrid};
use crate::model::{Layout, Part, PlacedPart, ScanConfig, Sheet};
use tracing::instrument;

/// Packs `parts`, in the given order, onto `sheet` under `cfg`.
///
/// Parts that cannot be placed anywhere (at any candidate rotation and
/// position) are silently skipped; the returned [`Layout`] is a subset of
/// the input, in placement order. This function is pure: identical inputs
/// always produce an identical layout.
#[instrument(level = "debug", skip(parts), fields(parts = parts.len(), sheet_w = sheet.width, sheet_h = sheet.height))]
pub fn pack(sheet: Sheet, parts: &[Part], cfg: &ScanConfig) -> Layout {
    let mut grid = OccupancyGrid::new(sheet);
    let mut layout = Layout::new();

    for part in parts {
        if let Some(placed) = place_one(sheet, &mut grid, *part, cfg) {
            layout.push(placed);
        }
    }

    layout
}

fn place_one(
    sheet: Sheet,
    grid: &mut OccupancyGrid,
    part: Part,
    cfg: &ScanConfig,
) -> Option<PlacedPart> {
    for rotation in part.candidate_rotations() {
        let rotated = part.with_rotation(rotation);
        let (bw, bh) = crate::geometry::bounding_box(&rotated);

        if bw > sheet.width || bh > sheet.height {
            continue;
        }

        let x_positions: Vec<i64> = x_range(sheet.width, bw, cfg.left_to_right);
        let y_positions: Vec<i64> = y_range(sheet.height, bh, cfg.top_to_bottom);

        let candidates: Box<dyn Iterator<Item = (i64, i64)>> = if cfg.horizontal_priority {
            Box::new(
                y_positions
                    .into_iter()
                    .flat_map(move |y| x_positions.clone().into_iter().map(move |x| (x, y))),
            )
        } else {
            Box::new(
                x_positions
                    .into_iter()
                    .flat_map(move |x| y_positions.clone().into_iter().map(move |y| (x, y))),
            )
        };

        for (x, y) in candidates {
            let placed = PlacedPart::new(rotated, x, y);
            if out_of_bounds(sheet, &placed) {
                continue;
            }
            if grid.is_free(&rotated, x, y, cfg.margin) {
                grid.stamp_occupied(&rotated, x, y, cfg.margin);
                return Some(placed);
            }
        }
    }

    None
}

fn x_range(sheet_width: u32, bw: u32, left_to_right: bool) -> Vec<i64> {
    let max_x = i64::from(sheet_width) - i64::from(bw);
    if max_x < 0 {
        return Vec::new();
    }
    if left_to_right {
        (0..=max_x).collect()
    } else {
        (0..=max_x).rev().collect()
    }
}

fn y_range(sheet_height: u32, bh: u32, top_to_bottom: bool) -> Vec<i64> {
    let max_y = i64::from(sheet_height) - i64::from(bh);
    if max_y < 0 {
        return Vec::new();
    }
    if top_to_bottom {
        (0..=max_y).collect()
    } else {
        (0..=max_y).rev().collect()
    }
}
