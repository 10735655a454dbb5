use super::Body;

/// AABB overlap between two square bodies.
///
/// Intervals are half-open, so bodies that only share an edge do not collide.
pub fn check_collision(a: &Body, b: &Body) -> bool {
    a.pos.x < b.pos.x + b.size
        && a.pos.x + a.size > b.pos.x
        && a.pos.y < b.pos.y + b.size
        && a.pos.y + a.size > b.pos.y
}
