//! Collision helpers shared by the editor core.
//!
//! egui's own `Rect::contains` and `Rect::intersects` are inclusive on every edge. The
//! editor wants half-open containment and strict overlap so that touching scenes are
//! legal neighbours and zero-area rectangles never match anything.

use egui::{pos2, Pos2, Rect, Vec2};

/// Returns true if `p` lies inside `r`, treating the max edges as exclusive.
pub fn point_in_rect(p: Pos2, r: Rect) -> bool {
    if !has_area(r) {
        return false;
    }
    p.x >= r.min.x && p.x < r.max.x && p.y >= r.min.y && p.y < r.max.y
}

/// Returns true if `a` and `b` share a region of non-zero area.
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    if !has_area(a) || !has_area(b) {
        return false;
    }
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

/// Returns true if `p` lies within `radius` of `center`.
pub fn point_in_circle(p: Pos2, center: Pos2, radius: f32) -> bool {
    radius > 0.0 && p.distance(center) <= radius
}

/// Returns true if `r` has positive width and height.
pub fn has_area(r: Rect) -> bool {
    r.width() > 0.0 && r.height() > 0.0
}

/// Square icon of `size` whose top-left corner sits at `min`.
pub fn icon_rect(min: Pos2, size: f32) -> Rect {
    Rect::from_min_size(min, Vec2::splat(size))
}

/// Rectangle centered on `center` extending `half` in every direction.
pub fn square_around(center: Pos2, half: f32) -> Rect {
    Rect::from_min_max(
        pos2(center.x - half, center.y - half),
        pos2(center.x + half, center.y + half),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::vec2;

    #[test]
    fn test_point_in_rect_is_half_open() {
        let r = Rect::from_min_size(pos2(10.0, 10.0), vec2(20.0, 20.0));
        assert!(point_in_rect(pos2(10.0, 10.0), r));
        assert!(point_in_rect(pos2(29.9, 29.9), r));
        assert!(!point_in_rect(pos2(30.0, 15.0), r));
        assert!(!point_in_rect(pos2(15.0, 30.0), r));
    }

    #[test]
    fn test_zero_area_rects_never_match() {
        let flat = Rect::from_min_size(pos2(0.0, 0.0), vec2(50.0, 0.0));
        let big = Rect::from_min_size(pos2(-100.0, -100.0), vec2(500.0, 500.0));
        assert!(!point_in_rect(pos2(0.0, 0.0), flat));
        assert!(!rects_overlap(flat, big));
        assert!(!rects_overlap(big, flat));
    }

    #[test]
    fn test_touching_rects_do_not_overlap() {
        let a = Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let b = Rect::from_min_size(pos2(100.0, 0.0), vec2(100.0, 100.0));
        let c = Rect::from_min_size(pos2(99.0, 50.0), vec2(10.0, 10.0));
        assert!(!rects_overlap(a, b));
        assert!(rects_overlap(a, c));
        assert!(rects_overlap(b, c));
    }

    #[test]
    fn test_point_in_circle() {
        let c = pos2(10.0, 10.0);
        assert!(point_in_circle(pos2(14.0, 10.0), c, 6.0));
        assert!(point_in_circle(pos2(16.0, 10.0), c, 6.0));
        assert!(!point_in_circle(pos2(16.5, 10.0), c, 6.0));
        assert!(!point_in_circle(c, c, 0.0));
    }
}
