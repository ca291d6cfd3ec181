//! Procedural terrain height field
//!
//! A stateless sum of two sinusoids. The same function drives ground
//! collision, bullet culling, obstacle placement and the wireframe grid.

use crate::consts::{GRID_SIZE, GRID_SPACING, RENDER_DIST_SQ};
use crate::{Point3D, planar_distance_sq};

/// Terrain elevation at world `(x, z)`
#[inline]
pub fn terrain_height(x: f32, z: f32) -> f32 {
    30.0 * (x * 0.01).sin() * (z * 0.01).sin() + 15.0 * (x * 0.03 + z * 0.02).sin()
}

/// Point on the terrain surface
#[inline]
pub fn surface_point(x: f32, z: f32) -> Point3D {
    Point3D::new(x, terrain_height(x, z), z)
}

/// Grid line that snaps `coord` to, truncating toward zero
#[inline]
fn grid_base(coord: f32) -> f32 {
    (coord / GRID_SPACING).trunc() * GRID_SPACING
}

/// World-space edges of the terrain wireframe around `center`.
///
/// Walks a `2 * GRID_SIZE` square of grid vertices around the grid cell
/// containing `center`. Vertices farther than the render distance (planar) are
/// skipped; every kept vertex yields its +X edge and its +Z edge. Screen-space
/// culling happens after projection in the renderer.
pub fn grid_edges(center: Point3D) -> impl Iterator<Item = (Point3D, Point3D)> {
    let base_x = grid_base(center.x);
    let base_z = grid_base(center.z);

    (-GRID_SIZE..GRID_SIZE)
        .flat_map(move |i| (-GRID_SIZE..GRID_SIZE).map(move |j| (i, j)))
        .filter_map(move |(i, j)| {
            let wx = base_x + i as f32 * GRID_SPACING;
            let wz = base_z + j as f32 * GRID_SPACING;
            let origin = surface_point(wx, wz);
            (planar_distance_sq(origin, center) <= RENDER_DIST_SQ).then_some(origin)
        })
        .flat_map(|origin| {
            [
                (origin, surface_point(origin.x + GRID_SPACING, origin.z)),
                (origin, surface_point(origin.x, origin.z + GRID_SPACING)),
            ]
        })
}
