//! Collision detection and response for a moving sphere against static shapes
//!
//! Each test produces a `CollisionResult`; `resolve` applies it by pushing the
//! sphere out along the normal and reflecting the normal velocity with
//! restitution. Tangential velocity is left alone (frictionless contact).

use glam::Vec3;

use super::body::{Body, Shape};
use crate::reflect_with_restitution;

/// Result of a collision check
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Surface normal pointing toward the sphere center
    pub normal: Vec3,
    /// Penetration depth (for position correction)
    pub penetration: f32,
    /// Sphere center is inside a box; resolved by the upward fallback
    pub contained: bool,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec3::ZERO,
            penetration: 0.0,
            contained: false,
        }
    }

    fn contact(normal: Vec3, penetration: f32) -> Self {
        Self {
            hit: true,
            normal,
            penetration,
            contained: false,
        }
    }

    fn contained() -> Self {
        Self {
            hit: true,
            normal: Vec3::Y,
            penetration: 0.0,
            contained: true,
        }
    }
}

/// Sphere against a static sphere
///
/// Coincident centers are skipped: there is no normal to push along.
pub fn sphere_sphere(center: Vec3, radius: f32, other_center: Vec3, other_radius: f32) -> CollisionResult {
    let delta = center - other_center;
    let distance = delta.length();
    let reach = radius + other_radius;

    if distance < reach && distance > 0.0 {
        return CollisionResult::contact(delta / distance, reach - distance);
    }

    CollisionResult::miss()
}

/// Sphere against a vertical cylinder
///
/// Only the XZ plane matters for the normal; the sphere center must also lie
/// inside the cylinder's height band.
pub fn sphere_cylinder(
    center: Vec3,
    radius: f32,
    cylinder_center: Vec3,
    cylinder_radius: f32,
    height: f32,
) -> CollisionResult {
    let half = height / 2.0;
    if center.y < cylinder_center.y - half || center.y > cylinder_center.y + half {
        return CollisionResult::miss();
    }

    let dx = center.x - cylinder_center.x;
    let dz = center.z - cylinder_center.z;
    let distance = (dx * dx + dz * dz).sqrt();
    let reach = radius + cylinder_radius;

    if distance < reach && distance > 0.0 {
        let normal = Vec3::new(dx / distance, 0.0, dz / distance);
        return CollisionResult::contact(normal, reach - distance);
    }

    CollisionResult::miss()
}

/// Sphere against an axis-aligned box given by world-space corners
pub fn sphere_box(center: Vec3, radius: f32, min: Vec3, max: Vec3) -> CollisionResult {
    let closest = center.clamp(min, max);
    let delta = center - closest;
    let distance = delta.length();

    if distance == 0.0 {
        // Center tunneled into the box
        return CollisionResult::contained();
    }

    if distance < radius {
        return CollisionResult::contact(delta / distance, radius - distance);
    }

    CollisionResult::miss()
}

/// Run the test matching the obstacle's shape
pub fn detect(center: Vec3, radius: f32, obstacle: &Body) -> CollisionResult {
    match obstacle.shape {
        Shape::Sphere { radius: other } => sphere_sphere(center, radius, obstacle.position, other),
        Shape::Cylinder {
            radius: other,
            height,
        } => sphere_cylinder(center, radius, obstacle.position, other, height),
        Shape::Box { min, max } => sphere_box(
            center,
            radius,
            obstacle.position + min,
            obstacle.position + max,
        ),
    }
}

/// Apply a hit to the sphere's position and velocity
pub fn apply(position: &mut Vec3, velocity: &mut Vec3, radius: f32, result: &CollisionResult, restitution: f32) {
    if !result.hit {
        return;
    }

    if result.contained {
        position.y += radius;
        velocity.y = velocity.y.abs() * restitution;
        return;
    }

    *position += result.normal * result.penetration;
    // Only bounce while approaching; a separating sphere just gets pushed out
    if velocity.dot(result.normal) < 0.0 {
        *velocity = reflect_with_restitution(*velocity, result.normal, restitution);
    }
}

/// Resolve a moving sphere body against one static obstacle
///
/// Returns true when a contact was resolved. Non-sphere bodies never collide.
pub fn resolve(ball: &mut Body, obstacle: &Body, restitution: f32) -> bool {
    let Some(radius) = ball.sphere_radius() else {
        return false;
    };

    let result = detect(ball.position, radius, obstacle);
    apply(&mut ball.position, &mut ball.velocity, radius, &result, restitution);
    result.hit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::BodyTag;
    use proptest::prelude::*;

    const E: f32 = 0.6;

    #[test]
    fn test_sphere_sphere_separates_to_contact_distance() {
        let obstacle = Body::static_sphere(Vec3::ZERO, 0.5, BodyTag::Pin);
        let mut ball = Body::ball(Vec3::new(0.6, 0.0, 0.0), Vec3::new(-2.0, 0.0, 0.0), 0.25);

        assert!(resolve(&mut ball, &obstacle, E));

        let distance = ball.position.length();
        assert!((distance - 0.75).abs() < 1e-5, "distance {}", distance);
        // Normal is +X, so v_n' = -e * v_n
        assert!((ball.velocity.x - 2.0 * E).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_sphere_keeps_tangential_velocity() {
        let obstacle = Body::static_sphere(Vec3::ZERO, 0.5, BodyTag::Pin);
        let mut ball = Body::ball(Vec3::new(0.0, 0.7, 0.0), Vec3::new(1.5, -3.0, 0.0), 0.25);

        assert!(resolve(&mut ball, &obstacle, E));
        assert!((ball.velocity.x - 1.5).abs() < 1e-5);
        assert!((ball.velocity.y - 3.0 * E).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_sphere_coincident_is_skipped() {
        let obstacle = Body::static_sphere(Vec3::ONE, 0.5, BodyTag::Pin);
        let mut ball = Body::ball(Vec3::ONE, Vec3::new(0.0, -1.0, 0.0), 0.25);

        assert!(!resolve(&mut ball, &obstacle, E));
        assert_eq!(ball.position, Vec3::ONE);
        assert_eq!(ball.velocity, Vec3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_sphere_sphere_miss() {
        let result = sphere_sphere(Vec3::new(2.0, 0.0, 0.0), 0.25, Vec3::ZERO, 0.5);
        assert!(!result.hit);
    }

    #[test]
    fn test_cylinder_pushes_horizontally() {
        let pin = Body::static_cylinder(Vec3::new(0.0, 5.0, 0.0), 0.1, 0.4, BodyTag::Pin);
        let mut ball = Body::ball(Vec3::new(-0.2, 5.1, 0.0), Vec3::new(1.0, -2.0, 0.0), 0.15);

        assert!(resolve(&mut ball, &pin, E));
        assert!((ball.position.x + 0.25).abs() < 1e-5);
        assert_eq!(ball.position.y, 5.1);
        assert!((ball.velocity.x + E).abs() < 1e-5);
        // Vertical velocity is never touched by a pin
        assert_eq!(ball.velocity.y, -2.0);
    }

    #[test]
    fn test_cylinder_outside_height_band_is_ignored() {
        let pin = Body::static_cylinder(Vec3::new(0.0, 5.0, 0.0), 0.1, 0.4, BodyTag::Pin);
        let mut ball = Body::ball(Vec3::new(-0.2, 5.3, 0.0), Vec3::new(1.0, -2.0, 0.0), 0.15);

        assert!(!resolve(&mut ball, &pin, E));
        assert_eq!(ball.position, Vec3::new(-0.2, 5.3, 0.0));
        assert_eq!(ball.velocity, Vec3::new(1.0, -2.0, 0.0));
    }

    #[test]
    fn test_cylinder_dead_center_is_skipped() {
        let pin = Body::static_cylinder(Vec3::new(0.0, 5.0, 0.0), 0.1, 0.4, BodyTag::Pin);
        let mut ball = Body::ball(Vec3::new(0.0, 5.0, 0.0), Vec3::new(0.0, -2.0, 0.0), 0.15);

        assert!(!resolve(&mut ball, &pin, E));
        assert_eq!(ball.position, Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_box_face_contact() {
        let floor = Body::static_box(Vec3::new(-3.0, -0.25, -1.0), Vec3::new(3.0, 0.0, 1.0), BodyTag::Floor);
        let mut ball = Body::ball(Vec3::new(0.5, 0.1, 0.0), Vec3::new(0.3, -4.0, 0.0), 0.15);

        assert!(resolve(&mut ball, &floor, E));
        assert!((ball.position.y - 0.15).abs() < 1e-5);
        assert!((ball.velocity.y - 4.0 * E).abs() < 1e-5);
        assert_eq!(ball.velocity.x, 0.3);
    }

    #[test]
    fn test_box_containment_shoves_up() {
        let floor = Body::static_box(Vec3::new(-3.0, -0.25, -1.0), Vec3::new(3.0, 0.0, 1.0), BodyTag::Floor);
        let mut ball = Body::ball(Vec3::new(0.0, -0.1, 0.0), Vec3::new(0.0, -5.0, 0.0), 0.15);

        assert!(resolve(&mut ball, &floor, E));
        assert!((ball.position.y - 0.05).abs() < 1e-5);
        assert!((ball.velocity.y - 5.0 * E).abs() < 1e-5);
    }

    #[test]
    fn test_box_separating_velocity_kept() {
        let wall = Body::static_box(Vec3::new(3.0, 0.0, -1.0), Vec3::new(3.2, 12.0, 1.0), BodyTag::Wall);
        let mut ball = Body::ball(Vec3::new(2.9, 6.0, 0.0), Vec3::new(-1.0, 0.0, 0.0), 0.15);

        assert!(resolve(&mut ball, &wall, E));
        assert!((ball.position.x - 2.85).abs() < 1e-5);
        assert_eq!(ball.velocity.x, -1.0);
    }

    #[test]
    fn test_sphere_separating_is_only_pushed_out() {
        let obstacle = Body::static_sphere(Vec3::ZERO, 0.5, BodyTag::Pin);
        let mut ball = Body::ball(Vec3::new(0.6, 0.0, 0.0), Vec3::new(2.0, 1.0, 0.0), 0.25);

        assert!(resolve(&mut ball, &obstacle, E));
        assert!((ball.position.x - 0.75).abs() < 1e-5);
        assert_eq!(ball.velocity, Vec3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn test_cylinder_separating_is_only_pushed_out() {
        let pin = Body::static_cylinder(Vec3::new(0.0, 5.0, 0.0), 0.1, 0.4, BodyTag::Pin);
        let mut ball = Body::ball(Vec3::new(-0.2, 5.1, 0.0), Vec3::new(-1.0, -2.0, 0.0), 0.15);

        assert!(resolve(&mut ball, &pin, E));
        assert!((ball.position.x + 0.25).abs() < 1e-5);
        assert_eq!(ball.velocity, Vec3::new(-1.0, -2.0, 0.0));
    }

    #[test]
    fn test_non_sphere_body_never_resolves() {
        let wall = Body::static_box(Vec3::ZERO, Vec3::ONE, BodyTag::Wall);
        let mut pin = Body::static_cylinder(Vec3::splat(0.5), 0.1, 1.0, BodyTag::Pin);
        assert!(!resolve(&mut pin, &wall, E));
    }

    proptest! {
        #[test]
        fn prop_sphere_overlap_resolves_to_contact(
            d in 0.01f32..0.74,
            angle in 0.0f32..std::f32::consts::TAU,
            speed in 0.1f32..10.0,
        ) {
            let dir = Vec3::new(angle.cos(), angle.sin(), 0.0);
            let obstacle = Body::static_sphere(Vec3::ZERO, 0.5, BodyTag::Pin);
            let mut ball = Body::ball(dir * d, -dir * speed, 0.25);

            prop_assert!(resolve(&mut ball, &obstacle, E));
            prop_assert!((ball.position.length() - 0.75).abs() < 1e-4);
            let vn = ball.velocity.dot(dir);
            prop_assert!((vn - E * speed).abs() < 1e-3);
        }

        #[test]
        fn prop_cylinder_never_changes_vertical_velocity(
            x in -0.3f32..0.3,
            y in 4.5f32..5.5,
            vy in -10.0f32..10.0,
        ) {
            let pin = Body::static_cylinder(Vec3::new(0.0, 5.0, 0.0), 0.1, 0.4, BodyTag::Pin);
            let mut ball = Body::ball(Vec3::new(x, y, 0.0), Vec3::new(1.0, vy, 0.0), 0.15);
            let clearly_outside = !(4.79..=5.21).contains(&y);

            let hit = resolve(&mut ball, &pin, E);
            prop_assert_eq!(ball.velocity.y, vy);
            if clearly_outside {
                prop_assert!(!hit);
            }
        }
    }
}
