//! Exact segment-segment intersection.
//!
//! The canonical predicate is [`collides`], built on the orientation of point
//! triples (the sign of a 2D cross product). It needs no division, so vertical
//! and near-vertical segments are handled the same as any other.
//!
//! [`collides_by_projection`] is the older slope/x-projection test. It answers
//! the same question through the supporting lines' equations and is kept as a
//! secondary path with vertical segments special-cased. [`intersection_point`]
//! answers "where" once "whether" is known.

use glam::Vec2;

use crate::geometry::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Orientation of the ordered triple `(a, b, c)`.
pub fn orientation(a: Vec2, b: Vec2, c: Vec2) -> Orientation {
    let cross = (b - a).perp_dot(c - a);
    if cross > 0.0 {
        Orientation::CounterClockwise
    } else if cross < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// Strict counter-clockwise test: `c` lies to the left of the directed line `a -> b`.
pub fn ccw(a: Vec2, b: Vec2, c: Vec2) -> bool {
    orientation(a, b, c) == Orientation::CounterClockwise
}

/// `p` is collinear with `seg` and within its bounding box.
fn on_segment(seg: &Segment, p: Vec2) -> bool {
    p.x >= seg.p1.x.min(seg.p2.x)
        && p.x <= seg.p1.x.max(seg.p2.x)
        && p.y >= seg.min_y()
        && p.y <= seg.max_y()
}

/// True when the segments share at least one point.
///
/// Proper crossings are detected by opposite orientations on both sides.
/// Touching and collinear overlaps are detected by checking whether a
/// collinear endpoint lies on the other segment, so `collides(a, a)` holds.
pub fn collides(lhs: &Segment, rhs: &Segment) -> bool {
    let o1 = orientation(lhs.p1, lhs.p2, rhs.p1);
    let o2 = orientation(lhs.p1, lhs.p2, rhs.p2);
    let o3 = orientation(rhs.p1, rhs.p2, lhs.p1);
    let o4 = orientation(rhs.p1, rhs.p2, lhs.p2);

    if o1 != o2
        && o3 != o4
        && o1 != Orientation::Collinear
        && o2 != Orientation::Collinear
        && o3 != Orientation::Collinear
        && o4 != Orientation::Collinear
    {
        return true;
    }

    (o1 == Orientation::Collinear && on_segment(lhs, rhs.p1))
        || (o2 == Orientation::Collinear && on_segment(lhs, rhs.p2))
        || (o3 == Orientation::Collinear && on_segment(rhs, lhs.p1))
        || (o4 == Orientation::Collinear && on_segment(rhs, lhs.p2))
}

/// True when `segment` collides with any of `others`.
pub fn any_collide<'a, I>(segment: &Segment, others: I) -> bool
where
    I: IntoIterator<Item = &'a Segment>,
{
    others.into_iter().any(|other| collides(segment, other))
}

/// Slope/x-projection intersection test.
///
/// Orders the segments by their leftmost x, rejects non-overlapping x extents,
/// treats parallel segments as colliding only when collinear, and otherwise
/// checks that the supporting lines meet inside both x ranges. Vertical
/// segments have no slope and are resolved by evaluating the other segment's
/// line at their x.
pub fn collides_by_projection(lhs: &Segment, rhs: &Segment) -> bool {
    let (left, right) = if lhs.leftmost().x <= rhs.leftmost().x {
        (lhs, rhs)
    } else {
        (rhs, lhs)
    };

    // No overlap on the x axis.
    if left.rightmost().x < right.leftmost().x {
        return false;
    }

    match (left.slope(), right.slope()) {
        (None, None) => {
            // Both vertical at the same x (x extents overlap); compare y ranges.
            left.min_y() <= right.max_y() && right.min_y() <= left.max_y()
        }
        (None, Some(_)) => vertical_meets(left, right),
        (Some(_), None) => vertical_meets(right, left),
        (Some(left_slope), Some(right_slope)) => {
            let left_intercept = left.p1.y - left.p1.x * left_slope;
            let right_intercept = right.p1.y - right.p1.x * right_slope;
            if left_slope == right_slope {
                // Parallel: overlap requires the same supporting line.
                return left_intercept == right_intercept;
            }
            let intersection_x = (right_intercept - left_intercept) / (left_slope - right_slope);
            right.leftmost().x <= intersection_x && intersection_x <= left.rightmost().x
        }
    }
}

/// `vertical` (no slope) meets the non-vertical `other`, whose x range already covers it.
fn vertical_meets(vertical: &Segment, other: &Segment) -> bool {
    let x = vertical.p1.x;
    if x < other.leftmost().x || x > other.rightmost().x {
        return false;
    }
    let Some(slope) = other.slope() else {
        return false;
    };
    let y = other.p1.y + (x - other.p1.x) * slope;
    vertical.min_y() <= y && y <= vertical.max_y()
}

/// Point where the two segments cross, if they cross at a single point.
///
/// Parallel and collinear segments return `None`; use [`collides`] to learn
/// whether collinear segments overlap.
pub fn intersection_point(lhs: &Segment, rhs: &Segment) -> Option<Vec2> {
    let r = lhs.p2 - lhs.p1;
    let s = rhs.p2 - rhs.p1;
    let denom = r.perp_dot(s);
    if denom == 0.0 {
        return None;
    }
    let qp = rhs.p1 - lhs.p1;
    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(lhs.p1 + r * t)
    } else {
        None
    }
}
