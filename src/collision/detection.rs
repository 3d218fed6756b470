use super::manifold::Contact;
use crate::math::vec2::Vec2;
use crate::objects::rigid_body::RigidBody;
use crate::shapes::{Circle, Rect, Shape};

/// Corners within this distance of the other box still count as inside it.
const CORNER_TOLERANCE: f64 = 1e-9;

/// Dispatches to the narrow-phase test for the pair's shapes.
/// Contacts with a depth of `epsilon` or less are dropped as jitter.
pub fn check_collision(body_a: &RigidBody, body_b: &RigidBody, epsilon: f64) -> Option<Contact> {
    let contact = match (&body_a.shape, &body_b.shape) {
        (Shape::Circle(ca), Shape::Circle(cb)) => check_circle_circle(body_a, ca, body_b, cb),
        (Shape::Circle(c), Shape::Box(r)) => check_circle_box(body_a, c, body_b, r),
        (Shape::Box(r), Shape::Circle(c)) => check_circle_box(body_b, c, body_a, r).map(Contact::flipped),
        (Shape::Box(ra), Shape::Box(rb)) => check_box_box(body_a, ra, body_b, rb),
    }?;

    if contact.depth <= epsilon {
        return None;
    }
    Some(contact)
}

/// Checks for collision between two circles.
pub fn check_circle_circle(
    body_a: &RigidBody,
    circle_a: &Circle,
    body_b: &RigidBody,
    circle_b: &Circle,
) -> Option<Contact> {
    let dist_vec = body_b.position - body_a.position;
    let dist_sq = dist_vec.magnitude_squared();
    let radii_sum = circle_a.radius + circle_b.radius;

    if dist_sq >= radii_sum * radii_sum {
        return None;
    }

    let distance = dist_sq.sqrt();
    let normal = if distance > 1e-10 {
        dist_vec * (1.0 / distance)
    } else {
        // Concentric circles: any direction separates them.
        Vec2::UP
    };

    // Midway between the two surface points along the normal.
    let surface_a = body_a.position + normal * circle_a.radius;
    let surface_b = body_b.position - normal * circle_b.radius;

    Some(Contact {
        body_a: body_a.id,
        body_b: body_b.id,
        normal,
        depth: radii_sum - distance,
        point: (surface_a + surface_b) * 0.5,
    })
}

/// Checks for collision between a circle (body A) and an oriented box (body B).
///
/// The circle center is clamped onto the box in box-local space. A center
/// that lies inside the box is pushed out through the nearest face.
pub fn check_circle_box(
    circle_body: &RigidBody,
    circle: &Circle,
    box_body: &RigidBody,
    rect: &Rect,
) -> Option<Contact> {
    let t = box_body.transform();
    let center_local = t.apply_inverse(circle_body.position);

    // normal_local points from the box towards the circle center.
    let (normal_local, depth, point_local) = if rect.contains_local(center_local, 0.0) {
        let dx = rect.half_width - center_local.x.abs();
        let dy = rect.half_height - center_local.y.abs();
        let sx = if center_local.x >= 0.0 { 1.0 } else { -1.0 };
        let sy = if center_local.y >= 0.0 { 1.0 } else { -1.0 };
        if dx < dy {
            (
                Vec2::new(sx, 0.0),
                circle.radius + dx,
                Vec2::new(sx * rect.half_width, center_local.y),
            )
        } else {
            (
                Vec2::new(0.0, sy),
                circle.radius + dy,
                Vec2::new(center_local.x, sy * rect.half_height),
            )
        }
    } else {
        let closest = rect.clamp_local(center_local);
        let delta = center_local - closest;
        let dist_sq = delta.magnitude_squared();
        if dist_sq >= circle.radius * circle.radius {
            return None;
        }
        let dist = dist_sq.sqrt();
        (delta * (1.0 / dist), circle.radius - dist, closest)
    };

    Some(Contact {
        body_a: circle_body.id,
        body_b: box_body.id,
        // Contact normals point from A (circle) to B (box).
        normal: -t.apply_direction(normal_local),
        depth,
        point: t.apply(point_local),
    })
}

/// Half-length of a box's projection onto `axis`.
fn projected_radius(rect: &Rect, ux: Vec2, uy: Vec2, axis: Vec2) -> f64 {
    rect.half_width * axis.dot(ux).abs() + rect.half_height * axis.dot(uy).abs()
}

/// Checks for collision between two oriented boxes with the separating-axis test.
///
/// Both boxes' edge normals are tested; the axis of least overlap becomes the
/// contact normal. The contact point is the average of the corners of each
/// box that lie inside the other.
pub fn check_box_box(body_a: &RigidBody, rect_a: &Rect, body_b: &RigidBody, rect_b: &Rect) -> Option<Contact> {
    let ta = body_a.transform();
    let tb = body_b.transform();
    let (ax, ay) = (ta.apply_direction(Vec2::new(1.0, 0.0)), ta.apply_direction(Vec2::new(0.0, 1.0)));
    let (bx, by) = (tb.apply_direction(Vec2::new(1.0, 0.0)), tb.apply_direction(Vec2::new(0.0, 1.0)));
    let center_delta = body_b.position - body_a.position;

    let mut min_overlap = f64::INFINITY;
    let mut best_axis = Vec2::ZERO;

    // Fixed axis order keeps tie-breaking deterministic.
    for axis in [ax, ay, bx, by] {
        let ra = projected_radius(rect_a, ax, ay, axis);
        let rb = projected_radius(rect_b, bx, by, axis);
        let overlap = ra + rb - center_delta.dot(axis).abs();
        if overlap <= 0.0 {
            return None;
        }
        if overlap < min_overlap {
            min_overlap = overlap;
            best_axis = axis;
        }
    }

    let normal = if center_delta.dot(best_axis) < 0.0 { -best_axis } else { best_axis };

    let mut sum = Vec2::ZERO;
    let mut count = 0usize;
    for corner in rect_a.local_vertices() {
        let world = ta.apply(corner);
        if rect_b.contains_local(tb.apply_inverse(world), CORNER_TOLERANCE) {
            sum += world;
            count += 1;
        }
    }
    for corner in rect_b.local_vertices() {
        let world = tb.apply(corner);
        if rect_a.contains_local(ta.apply_inverse(world), CORNER_TOLERANCE) {
            sum += world;
            count += 1;
        }
    }
    let point = if count > 0 {
        sum / count as f64
    } else {
        // Edges cross without any corner inside (a "plus" overlap).
        body_a.position + center_delta * 0.5
    };

    Some(Contact {
        body_a: body_a.id,
        body_b: body_b.id,
        normal,
        depth: min_overlap,
        point,
    })
}
