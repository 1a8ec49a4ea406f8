//! Pixel rasterization on a [`PixelBuffer`].
//!
//! Every routine clips to the buffer before walking, so the work done is
//! bounded by the canvas size whatever the input coordinates. Intermediate
//! arithmetic runs in `i64`, which holds any difference of two `i32`s.

use crate::canvas::{GridPos, PixelBuffer};
use crate::color::Rgba;

/// Initial frontier capacity for [`flood_fill`]. The stack grows
/// geometrically past this, so a fill reallocates O(log n) times.
const FILL_STACK_CAPACITY: usize = 1024;

/// Bresenham line including both endpoints.
///
/// Walks from the lexicographically smaller endpoint so that swapping the
/// endpoints yields the same set of cells. Only the part of the major axis
/// inside the buffer is visited.
pub fn draw_line(buffer: &mut PixelBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let ((x0, y0), (x1, y1)) = if (x0, y0) <= (x1, y1) {
        ((x0, y0), (x1, y1))
    } else {
        ((x1, y1), (x0, y0))
    };
    let (x0, y0, x1, y1) = (i64::from(x0), i64::from(y0), i64::from(x1), i64::from(y1));
    let width = i64::from(buffer.width());
    let height = i64::from(buffer.height());

    if (x1 - x0).abs() >= (y1 - y0).abs() {
        walk_major_axis((x0, y0), (x1, y1), width, |x, y| plot(buffer, x, y, color));
    } else {
        walk_major_axis((y0, x0), (y1, x1), height, |y, x| plot(buffer, x, y, color));
    }
}

/// Steps along the major axis from `start` to `end` as `(major, minor)`
/// pairs, restricted to major coordinates in `0..major_len`.
///
/// The minor coordinate at each step is the exact slope rounded with ties
/// going back toward `start`, which is the cell the error-term walk picks.
fn walk_major_axis(
    start: (i64, i64),
    end: (i64, i64),
    major_len: i64,
    mut visit: impl FnMut(i64, i64),
) {
    let (m0, n0) = start;
    let (m1, n1) = end;
    let dm = (m1 - m0).abs();
    let dn = (n1 - n0).abs();
    let sm = if m1 >= m0 { 1 } else { -1 };
    let sn = if n1 >= n0 { 1 } else { -1 };

    let first = m0.min(m1).max(0);
    let last = m0.max(m1).min(major_len - 1);
    for m in first..=last {
        let offset = if dm == 0 {
            0
        } else {
            // Numerator reaches 2^65, past i64.
            let step = i128::from((m - m0) * sm);
            let (dm, dn) = (i128::from(dm), i128::from(dn));
            ((2 * step * dn + dm - 1) / (2 * dm)) as i64
        };
        visit(m, n0 + sn * offset);
    }
}

fn plot(buffer: &mut PixelBuffer, x: i64, y: i64, color: Rgba) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        buffer.set_pixel(x, y, color);
    }
}

/// Normalized inclusive bounds `(left, top, right, bottom)` of two corners.
pub fn normalize_corners(x0: i32, y0: i32, x1: i32, y1: i32) -> (i32, i32, i32, i32) {
    (x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1))
}

/// One-pixel border of the box spanned by two corners, in any order.
pub fn draw_rectangle_outline(
    buffer: &mut PixelBuffer,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Rgba,
) {
    let (left, top, right, bottom) = normalize_corners(x0, y0, x1, y1);

    draw_line(buffer, left, top, right, top, color);
    draw_line(buffer, left, bottom, right, bottom, color);
    draw_line(buffer, left, top, left, bottom, color);
    draw_line(buffer, right, top, right, bottom, color);
}

/// Fill every cell of the inclusive box spanned by two corners.
pub fn fill_rectangle(buffer: &mut PixelBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: Rgba) {
    let (left, top, right, bottom) = normalize_corners(x0, y0, x1, y1);

    // Clip to the canvas before iterating.
    let left = left.max(0);
    let top = top.max(0);
    let right = right.min(buffer.width() - 1);
    let bottom = bottom.min(buffer.height() - 1);

    for y in top..=bottom {
        for x in left..=right {
            buffer.set_pixel(x, y, color);
        }
    }
}

/// Cells `x0..=x1` of row `y`, clipped to the buffer. Empty when `x0 > x1`.
fn draw_span(buffer: &mut PixelBuffer, x0: i64, x1: i64, y: i64, color: Rgba) {
    if y < 0 || y >= i64::from(buffer.height()) {
        return;
    }
    let x0 = x0.max(0);
    let x1 = x1.min(i64::from(buffer.width()) - 1);
    for x in x0..=x1 {
        buffer.set_pixel(x as i32, y as i32, color);
    }
}

/// Column offset the midpoint walk reaches on row offset `dy`: the largest
/// `x` with `x * x - x + dy * dy < r * r`. Requires `0 <= dy <= r`.
fn midpoint_column(radius: i64, dy: i64) -> i64 {
    let room = radius * radius - dy * dy;
    let root = room.isqrt();
    if room > root * root + root { root + 1 } else { root }
}

/// Largest row offset whose midpoint column is at least `dx`, or -1.
fn last_row_reaching(radius: i64, dx: i64) -> i64 {
    let room = radius * radius - dx * dx + dx - 1;
    if room < 0 { -1 } else { room.isqrt() }
}

/// Visits each buffer row a circle touches with the parts of that row's
/// midpoint outline: the column offset from the shallow octants (`None`
/// when that octant pair has ended) and the inclusive offset range
/// covered by the steep octants (empty when `lo > hi`).
fn for_each_circle_row(
    buffer: &mut PixelBuffer,
    cx: i32,
    cy: i32,
    radius: i32,
    mut row: impl FnMut(&mut PixelBuffer, i64, i64, Option<i64>, (i64, i64)),
) {
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    let radius = i64::from(radius.max(0));

    let first = (cy - radius).max(0);
    let last = (cy + radius).min(i64::from(buffer.height()) - 1);
    for y in first..=last {
        let dy = (y - cy).abs();
        let column = midpoint_column(radius, dy);
        let shallow = (column >= dy).then_some(column);
        let steep = (last_row_reaching(radius, dy + 1) + 1, last_row_reaching(radius, dy).min(dy));
        row(buffer, cx, y, shallow, steep);
    }
}

/// Midpoint circle outline. Negative radii are treated as 0, which plots
/// only the center.
///
/// Each buffer row is computed directly, so the cost does not grow with
/// the radius.
pub fn draw_circle_outline(buffer: &mut PixelBuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    for_each_circle_row(buffer, cx, cy, radius, |buffer, cx, y, shallow, (lo, hi)| {
        if let Some(column) = shallow {
            draw_span(buffer, cx + column, cx + column, y, color);
            draw_span(buffer, cx - column, cx - column, y, color);
        }
        draw_span(buffer, cx + lo, cx + hi, y, color);
        draw_span(buffer, cx - hi, cx - lo, y, color);
    });
}

/// Midpoint circle filled with horizontal spans.
pub fn fill_circle(buffer: &mut PixelBuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    for_each_circle_row(buffer, cx, cy, radius, |buffer, cx, y, shallow, (lo, hi)| {
        let mut half = shallow.unwrap_or(-1);
        if hi >= lo {
            half = half.max(hi);
        }
        draw_span(buffer, cx - half, cx + half, y, color);
    });
}

/// Circle placement derived from a drag box.
///
/// The circle is centered on the box and sized by its longer side, so a
/// non-square drag still produces a round circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleFromDrag {
    pub center: GridPos,
    pub radius: i32,
}

impl CircleFromDrag {
    pub fn new(start: GridPos, end: GridPos) -> Self {
        let (left, top, right, bottom) = normalize_corners(start.x, start.y, end.x, end.y);
        let width = i64::from(right) - i64::from(left);
        let height = i64::from(bottom) - i64::from(top);

        // The center lies inside the box and the radius is at most 2^31,
        // so the saturating casts only ever clip the radius.
        let center_x = (f64::from(left) + width as f64 * 0.5).round() as i32;
        let center_y = (f64::from(top) + height as f64 * 0.5).round() as i32;
        let diameter = width.max(height);
        let radius = (diameter as f64 * 0.5).round() as i32;

        Self {
            center: GridPos::new(center_x, center_y),
            radius: radius.max(0),
        }
    }
}

/// 4-connected fill of the region around `(start_x, start_y)` whose cells
/// equal `target`.
///
/// Returns `false` without touching the buffer when the start is out of
/// range, `target == replacement`, or the start cell is not `target`.
/// Cells pushed more than once are skipped when popped because they no
/// longer match `target`, so no visited set is needed.
pub fn flood_fill(
    buffer: &mut PixelBuffer,
    start_x: i32,
    start_y: i32,
    target: Rgba,
    replacement: Rgba,
) -> bool {
    if !buffer.contains(start_x, start_y) || target == replacement {
        return false;
    }
    if buffer.get_pixel(start_x, start_y) != target {
        return false;
    }

    let area = buffer.width() as usize * buffer.height() as usize;
    let mut stack: Vec<(i32, i32)> = Vec::with_capacity(FILL_STACK_CAPACITY.min(area));
    stack.push((start_x, start_y));

    let mut changed = false;
    while let Some((x, y)) = stack.pop() {
        if buffer.get_pixel(x, y) != target {
            continue;
        }

        buffer.set_pixel(x, y, replacement);
        changed = true;

        for (nx, ny) in [(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)] {
            if buffer.contains(nx, ny) && buffer.get_pixel(nx, ny) == target {
                stack.push((nx, ny));
            }
        }
    }

    changed
}
