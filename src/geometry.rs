//! Pure geometric functions over [`Part`]s: area, rotated bounding boxes,
//! rotated diamond vertices, point-in-polygon tests, and disk rasterization.
//!
//! Everything here is sheet-oriented: origin top-left, +x right, +y down,
//! rotation counter-clockwise and in degrees.

use crate::model::Part;
use std::cell::RefCell;
use std::collections::HashMap;
use std::f64::consts::PI;

/// Exact geometric area of a part, ignoring rotation (rotation does not
/// change area).
pub fn area(part: &Part) -> f64 {
    match part {
        Part::Rectangular {
            largura, altura, ..
        } => f64::from(*largura) * f64::from(*altura),
        Part::Circular { r } => PI * f64::from(*r) * f64::from(*r),
        Part::Diamond {
            largura, altura, ..
        } => f64::from(*largura) * f64::from(*altura) / 2.0,
    }
}

/// Axis-aligned bounding box `(width, height)` of a part after rotation,
/// rounded outward to the nearest integer cell.
pub fn bounding_box(part: &Part) -> (u32, u32) {
    match part {
        Part::Circular { r } => (2 * r, 2 * r),
        Part::Rectangular {
            largura,
            altura,
            rotacao,
        }
        | Part::Diamond {
            largura,
            altura,
            rotacao,
        } => {
            let theta = (*rotacao as f64).to_radians();
            let w = f64::from(*largura);
            let h = f64::from(*altura);
            let bw = (w * theta.cos()).abs() + (h * theta.sin()).abs();
            let bh = (w * theta.sin()).abs() + (h * theta.cos()).abs();
            (bw.round() as u32, bh.round() as u32)
        }
    }
}

/// The four rotated vertices of a diamond placed with its unrotated
/// bounding box at `(x, y)`. Vertices are the midpoints of the unrotated
/// bounding box edges, rotated about the box's center.
///
/// Returns `(top, right, bottom, left)` in that fixed order (the order the
/// unrotated midpoints are taken in), each rotated independently.
pub fn rotated_vertices(part: &Part, x: i64, y: i64) -> [(f64, f64); 4] {
    let (w, h, rotacao) = match part {
        Part::Diamond {
            largura,
            altura,
            rotacao,
        } => (f64::from(*largura), f64::from(*altura), *rotacao),
        _ => panic!("rotated_vertices called on a non-diamond part"),
    };

    let cx = x as f64 + w / 2.0;
    let cy = y as f64 + h / 2.0;

    let unrotated = [
        (cx, y as f64),         // top
        (x as f64 + w, cy),     // right
        (cx, y as f64 + h),     // bottom
        (x as f64, cy),         // left
    ];

    let theta = (rotacao as f64).to_radians();
    let (sin, cos) = theta.sin_cos();

    let mut out = [(0.0, 0.0); 4];
    for (i, &(px, py)) in unrotated.iter().enumerate() {
        let dx = px - cx;
        let dy = py - cy;
        out[i] = (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos);
    }
    out
}

/// Signed edge test used by [`point_in_diamond`]: positive/negative/zero
/// according to which side of line `b->a` the point `p` falls on.
fn edge_sign(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0) * (p.1 - b.1) - (a.1 - b.1) * (p.0 - b.0)
}

/// Point-in-convex-quadrilateral test for the rotated diamond vertices
/// returned by [`rotated_vertices`]. A point exactly on an edge (sign == 0)
/// is treated as outside.
pub fn point_in_diamond(px: f64, py: f64, vertices: &[(f64, f64); 4]) -> bool {
    let p = (px, py);
    let mut signs = [0.0; 4];
    for i in 0..4 {
        let a = vertices[i];
        let b = vertices[(i + 1) % 4];
        signs[i] = edge_sign(p, a, b);
    }
    signs.iter().all(|&s| s < 0.0)
}

/// A square boolean mask of side `2r + 1`, true at cell `(i, j)` iff
/// `(i - r)^2 + (j - r)^2 < r^2`.
///
/// Strict rather than `<=`: two disks of radius r whose centers are
/// exactly 2r apart are tangent at a single point, and `<=` would mark
/// that one shared cell occupied by both masks.
#[derive(Debug, Clone)]
pub struct DiskMask {
    pub radius: u32,
    pub side: u32,
    cells: Vec<bool>,
}

impl DiskMask {
    fn build(radius: u32) -> Self {
        let side = 2 * radius + 1;
        let r = radius as i64;
        let mut cells = vec![false; (side * side) as usize];
        for i in 0..side as i64 {
            for j in 0..side as i64 {
                let di = i - r;
                let dj = j - r;
                if di * di + dj * dj < r * r {
                    cells[(i * side as i64 + j) as usize] = true;
                }
            }
        }
        Self { radius, side, cells }
    }

    #[inline]
    pub fn get(&self, i: u32, j: u32) -> bool {
        self.cells[(i * self.side + j) as usize]
    }
}

thread_local! {
    static DISK_CACHE: RefCell<HashMap<u32, std::rc::Rc<DiskMask>>> = RefCell::new(HashMap::new());
}

/// A disk mask for radius `r`, memoized per-thread since the packer and
/// evaluator repeatedly rasterize circles of the same radii across scan
/// positions and iterations.
pub fn disk_mask(r: u32) -> std::rc::Rc<DiskMask> {
    DISK_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .entry(r)
            .or_insert_with(|| std::rc::Rc::new(DiskMask::build(r)))
            .clone()
    })
}
