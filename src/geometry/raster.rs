//! Integer rasterization used by the drawing instruments.
//!
//! Every routine here is a pure function of its inputs: callers get the list of
//! pixels to touch and decide themselves how to write them (clipping, color).

use super::{Point, Rect};
use crate::image::PixelBuffer;

/// Pixels of the segment `a -> b` that fall inside `clip`, both endpoints
/// included, using Bresenham's algorithm. A zero-length segment yields the
/// single point `a` when it is visible.
///
/// Stepping runs in `i64`, so endpoints anywhere in the `i32` plane are fine.
pub fn line_points(a: Point, b: Point, clip: Rect) -> Vec<Point> {
    let Some(visible) = Rect::from_corners(a, b).intersect(&clip) else {
        return Vec::new();
    };
    let (x1, y1) = (i64::from(b.x), i64::from(b.y));
    let (mut x, mut y) = (i64::from(a.x), i64::from(a.y));
    let dx = (x1 - x).abs();
    let dy = (y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    let mut points = Vec::with_capacity(visible.width().max(visible.height()) as usize);
    loop {
        // x and y stay between the endpoints
        let p = Point::new(x as i32, y as i32);
        if clip.contains(p) {
            points.push(p);
        } else if !points.is_empty() {
            // both coordinates move monotonically, so the segment cannot come back
            break;
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    points
}

/// One-pixel outline of the rectangle spanned by two corners, limited to
/// `clip`. Each pixel appears exactly once.
pub fn rect_outline(a: Point, b: Point, clip: Rect) -> Vec<Point> {
    let rect = Rect::from_corners(a, b);
    let Some(visible) = rect.intersect(&clip) else {
        return Vec::new();
    };
    let (min, max) = (rect.min, rect.max);
    let edges = |lo: i32, hi: i32| if lo == hi { vec![lo] } else { vec![lo, hi] };

    let mut points = Vec::new();
    for y in edges(min.y, max.y) {
        if (visible.min.y..=visible.max.y).contains(&y) {
            points.extend((visible.min.x..=visible.max.x).map(|x| Point::new(x, y)));
        }
    }
    let inner = min.y.saturating_add(1).max(visible.min.y)..=max.y.saturating_sub(1).min(visible.max.y);
    for x in edges(min.x, max.x) {
        if (visible.min.x..=visible.max.x).contains(&x) {
            points.extend(inner.clone().map(|y| Point::new(x, y)));
        }
    }
    points
}

/// The 4-connected region around `seed` whose pixels exactly match the seed's
/// color, restricted to `clip` when one is given.
///
/// Returns an empty list when the seed lies outside the buffer or the clip.
pub fn flood_region(buffer: &PixelBuffer, seed: Point, clip: Option<Rect>) -> Vec<Point> {
    let Some(bounds) = buffer.bounds() else {
        return Vec::new();
    };
    let area = match clip {
        Some(clip) => match bounds.intersect(&clip) {
            Some(area) => area,
            None => return Vec::new(),
        },
        None => bounds,
    };
    if !area.contains(seed) {
        return Vec::new();
    }
    let Some(target) = buffer.get(seed) else {
        return Vec::new();
    };

    let width = buffer.width() as usize;
    let index = |p: Point| p.y as usize * width + p.x as usize;

    // visited doubles as the output mask
    let mut visited = vec![false; width * buffer.height() as usize];
    let mut region = Vec::new();
    let mut stack = vec![seed];
    visited[index(seed)] = true;

    while let Some(p) = stack.pop() {
        region.push(p);
        for n in [
            Point::new(p.x - 1, p.y),
            Point::new(p.x + 1, p.y),
            Point::new(p.x, p.y - 1),
            Point::new(p.x, p.y + 1),
        ] {
            if !area.contains(n) || visited[index(n)] {
                continue;
            }
            if buffer.get(n) == Some(target) {
                visited[index(n)] = true;
                stack.push(n);
            }
        }
    }
    region
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn plane() -> Rect {
        Rect::from_corners(Point::new(-100, -100), Point::new(100, 100))
    }

    #[test]
    fn test_diagonal_line() {
        let points = line_points(Point::new(1, 1), Point::new(3, 3), plane());
        assert_eq!(points, vec![Point::new(1, 1), Point::new(2, 2), Point::new(3, 3)]);
    }

    #[test]
    fn test_line_is_symmetric_in_length() {
        let forward = line_points(Point::new(0, 0), Point::new(7, 3), plane());
        let backward = line_points(Point::new(7, 3), Point::new(0, 0), plane());
        assert_eq!(forward.len(), 8);
        assert_eq!(backward.len(), 8);
        assert_eq!(forward.first(), Some(&Point::new(0, 0)));
        assert_eq!(forward.last(), Some(&Point::new(7, 3)));
    }

    #[test]
    fn test_degenerate_line() {
        assert_eq!(line_points(Point::new(2, 5), Point::new(2, 5), plane()), vec![Point::new(2, 5)]);
    }

    #[test]
    fn test_rect_outline_has_no_duplicates() {
        let outline = rect_outline(Point::new(3, 3), Point::new(0, 0), plane());
        assert_eq!(outline.len(), 12);
        let mut dedup = outline.clone();
        dedup.sort_by_key(|p| (p.x, p.y));
        dedup.dedup();
        assert_eq!(dedup.len(), outline.len());
        assert!(!outline.contains(&Point::new(1, 1)));
    }

    #[test]
    fn test_thin_rect_outline() {
        assert_eq!(rect_outline(Point::new(1, 1), Point::new(1, 1), plane()), vec![Point::new(1, 1)]);
        assert_eq!(rect_outline(Point::new(0, 2), Point::new(3, 2), plane()).len(), 4);
        assert_eq!(rect_outline(Point::new(2, 0), Point::new(2, 3), plane()).len(), 4);
    }

    #[test]
    fn test_line_with_far_endpoint_is_clipped() {
        let canvas = Rect::from_size(4, 4).unwrap();
        let points = line_points(Point::new(-2, 0), Point::new(i32::MAX, 0), canvas);
        assert_eq!(
            points,
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0), Point::new(3, 0)]
        );
        assert!(line_points(Point::new(i32::MIN, 9), Point::new(i32::MAX, 9), canvas).is_empty());
    }

    #[test]
    fn test_huge_rect_outline_only_covers_clip() {
        let canvas = Rect::from_size(4, 4).unwrap();
        let outline = rect_outline(Point::new(1, 1), Point::new(i32::MAX, i32::MAX), canvas);
        // top edge (1..=3, 1) and left edge (1, 2..=3)
        assert_eq!(outline.len(), 5);
        assert!(outline.iter().all(|p| canvas.contains(*p)));

        let around = rect_outline(Point::new(i32::MIN, i32::MIN), Point::new(i32::MAX, i32::MAX), canvas);
        assert!(around.is_empty());
    }

    #[test]
    fn test_flood_stops_at_boundary() {
        let white = Rgba([255, 255, 255, 255]);
        let black = Rgba([0, 0, 0, 255]);
        let mut buffer = PixelBuffer::new(5, 5, white);
        for y in 0..5 {
            buffer.put(Point::new(2, y), black);
        }

        let region = flood_region(&buffer, Point::new(0, 0), None);
        assert_eq!(region.len(), 10);
        assert!(region.iter().all(|p| p.x < 2));
    }

    #[test]
    fn test_flood_respects_clip() {
        let buffer = PixelBuffer::new(6, 6, Rgba([0, 0, 0, 0]));
        let clip = Rect::from_corners(Point::new(1, 1), Point::new(2, 2));
        assert_eq!(flood_region(&buffer, Point::new(1, 1), Some(clip)).len(), 4);
        assert!(flood_region(&buffer, Point::new(4, 4), Some(clip)).is_empty());
    }
}
