use super::mass::surface_mass_properties;
use super::{find_support_point, ShapeKind, ShapeTrait, SupportMap};
use crate::bounds::Aabb;
use crate::error::ShapeError;
use crate::math::{Mat3, Real, Vec3};

/// Points closer than this to an existing hull vertex are dropped while building the hull.
const HULL_MERGE_DISTANCE: Real = 1.0e-6;
/// Points within this distance of a face plane count as lying on it.
const HULL_PLANE_EPSILON: Real = 1.0e-10;

fn find_point_furthest_in_dir(pts: &[Vec3], dir: Vec3) -> usize {
    let mut max_idx = 0;
    let mut max_dist = dir.dot(pts[0]);
    for (i, pt) in pts.iter().enumerate().skip(1) {
        let dist = dir.dot(*pt);
        if dist > max_dist {
            max_dist = dist;
            max_idx = i;
        }
    }
    max_idx
}

fn distance_from_line(a: Vec3, b: Vec3, pt: Vec3) -> Real {
    let ab = (b - a).normalize_or_zero();
    let ray = pt - a;
    let projection = ab * ray.dot(ab);
    (ray - projection).length()
}

fn find_point_furthest_from_line(pts: &[Vec3], a: Vec3, b: Vec3) -> Vec3 {
    pts.iter()
        .copied()
        .fold((pts[0], Real::MIN), |(best, best_dist), pt| {
            let dist = distance_from_line(a, b, pt);
            if dist > best_dist {
                (pt, dist)
            } else {
                (best, best_dist)
            }
        })
        .0
}

/// Signed distance of `pt` from the plane of the CCW triangle `abc`.
fn distance_from_triangle(a: Vec3, b: Vec3, c: Vec3, pt: Vec3) -> Real {
    let normal = (b - a).cross(c - a).normalize_or_zero();
    (pt - a).dot(normal)
}

fn find_point_furthest_from_triangle(pts: &[Vec3], a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    pts.iter()
        .copied()
        .fold((pts[0], -1.0), |(best, best_dist), pt| {
            let dist = distance_from_triangle(a, b, c, pt).abs();
            if dist > best_dist {
                (pt, dist)
            } else {
                (best, best_dist)
            }
        })
        .0
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Edge {
    a: u32,
    b: u32,
}

impl Edge {
    fn matches(&self, other: &Edge) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

fn tri_edges(tri: &[u32; 3]) -> [Edge; 3] {
    [
        Edge {
            a: tri[0],
            b: tri[1],
        },
        Edge {
            a: tri[1],
            b: tri[2],
        },
        Edge {
            a: tri[2],
            b: tri[0],
        },
    ]
}

fn tri_distance(hull_points: &[Vec3], tri: &[u32; 3], pt: Vec3) -> Real {
    distance_from_triangle(
        hull_points[tri[0] as usize],
        hull_points[tri[1] as usize],
        hull_points[tri[2] as usize],
        pt,
    )
}

fn build_tetrahedron(
    verts: &[Vec3],
    hull_points: &mut Vec<Vec3>,
    hull_tris: &mut Vec<[u32; 3]>,
) -> Result<(), ShapeError> {
    let mut point0 = verts[find_point_furthest_in_dir(verts, Vec3::X)];
    let mut point1 = verts[find_point_furthest_in_dir(verts, -point0)];
    if point0.distance_squared(point1) <= HULL_MERGE_DISTANCE * HULL_MERGE_DISTANCE {
        // every point projects to the same extreme; try the opposite end of the x axis
        point1 = verts[find_point_furthest_in_dir(verts, -Vec3::X)];
        if point0.distance_squared(point1) <= HULL_MERGE_DISTANCE * HULL_MERGE_DISTANCE {
            return Err(ShapeError::DegenerateHull);
        }
    }

    let point2 = find_point_furthest_from_line(verts, point0, point1);
    if distance_from_line(point0, point1, point2) <= HULL_MERGE_DISTANCE {
        return Err(ShapeError::DegenerateHull);
    }

    let point3 = find_point_furthest_from_triangle(verts, point0, point1, point2);
    let height = distance_from_triangle(point0, point1, point2, point3);
    if height.abs() <= HULL_MERGE_DISTANCE {
        return Err(ShapeError::DegenerateHull);
    }

    // keep every face counter-clockwise when seen from outside
    if height > 0.0 {
        std::mem::swap(&mut point0, &mut point1);
    }

    hull_points.clear();
    hull_points.extend_from_slice(&[point0, point1, point2, point3]);

    hull_tris.clear();
    hull_tris.extend_from_slice(&[[0, 1, 2], [0, 2, 3], [2, 1, 3], [1, 0, 3]]);
    Ok(())
}

fn remove_internal_points(hull_points: &[Vec3], hull_tris: &[[u32; 3]], check_pts: &mut Vec<Vec3>) {
    // a point in front of any face is outside the current hull
    check_pts.retain(|&pt| {
        hull_tris
            .iter()
            .any(|tri| tri_distance(hull_points, tri, pt) > HULL_PLANE_EPSILON)
    });

    let merge_sq = HULL_MERGE_DISTANCE * HULL_MERGE_DISTANCE;
    check_pts.retain(|&pt| {
        hull_points
            .iter()
            .all(|hull_pt| hull_pt.distance_squared(pt) >= merge_sq)
    });
}

/// True if no other facing triangle shares `edge`.
fn is_edge_unique(
    tris: &[[u32; 3]],
    facing_tris: &[usize],
    ignore_tri: usize,
    edge: &Edge,
) -> bool {
    facing_tris
        .iter()
        .filter(|&&tri_idx| tri_idx != ignore_tri)
        .all(|&tri_idx| !tri_edges(&tris[tri_idx]).iter().any(|e| e.matches(edge)))
}

fn add_point(hull_points: &mut Vec<Vec3>, hull_tris: &mut Vec<[u32; 3]>, pt: Vec3) {
    // descending order so removal below keeps the remaining indices valid
    let facing_tris: Vec<usize> = (0..hull_tris.len())
        .rev()
        .filter(|&i| tri_distance(hull_points, &hull_tris[i], pt) > HULL_PLANE_EPSILON)
        .collect();

    // the horizon is made of the edges not shared between two facing triangles
    let mut unique_edges = Vec::new();
    for &tri_idx in &facing_tris {
        for edge in &tri_edges(&hull_tris[tri_idx]) {
            if is_edge_unique(hull_tris, &facing_tris, tri_idx, edge) {
                unique_edges.push(*edge);
            }
        }
    }

    for &tri_idx in &facing_tris {
        hull_tris.remove(tri_idx);
    }

    hull_points.push(pt);
    let new_pt_idx = hull_points.len() as u32 - 1;

    hull_tris.extend(unique_edges.iter().map(|edge| [edge.a, edge.b, new_pt_idx]));
}

fn remove_unreferenced_verts(hull_points: &mut Vec<Vec3>, hull_tris: &mut [[u32; 3]]) {
    let mut i = 0;
    while i < hull_points.len() as u32 {
        let is_used = hull_tris.iter().any(|tri| tri.contains(&i));
        if is_used {
            i += 1;
            continue;
        }

        for tri in hull_tris.iter_mut() {
            for idx in tri.iter_mut() {
                if *idx > i {
                    *idx -= 1;
                }
            }
        }

        hull_points.remove(i as usize);
    }
}

fn expand_convex_hull(hull_points: &mut Vec<Vec3>, hull_tris: &mut Vec<[u32; 3]>, verts: &[Vec3]) {
    let mut external_verts = Vec::from(verts);
    remove_internal_points(hull_points, hull_tris, &mut external_verts);

    while !external_verts.is_empty() {
        let pt_idx = find_point_furthest_in_dir(&external_verts, external_verts[0]);
        let pt = external_verts.swap_remove(pt_idx);

        add_point(hull_points, hull_tris, pt);

        remove_internal_points(hull_points, hull_tris, &mut external_verts);
    }

    remove_unreferenced_verts(hull_points, hull_tris);
}

/// Closed convex polyhedron given by its vertices and outward-facing triangles.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeConvex {
    points: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl ShapeConvex {
    /// Wraps an existing hull. Triangles must be wound counter-clockwise from outside.
    pub fn new(points: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self, ShapeError> {
        if points.len() < 4 {
            return Err(ShapeError::NotEnoughPoints {
                count: points.len(),
            });
        }
        for (triangle, tri) in triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&idx| idx as usize >= points.len()) {
                return Err(ShapeError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count: points.len(),
                });
            }
        }
        Ok(ShapeConvex { points, triangles })
    }

    /// Builds the convex hull of a point cloud.
    pub fn from_points(verts: &[Vec3]) -> Result<Self, ShapeError> {
        if verts.len() < 4 {
            return Err(ShapeError::NotEnoughPoints { count: verts.len() });
        }

        let mut hull_points = Vec::new();
        let mut hull_tris = Vec::new();
        build_tetrahedron(verts, &mut hull_points, &mut hull_tris)?;
        expand_convex_hull(&mut hull_points, &mut hull_tris, verts);

        Ok(ShapeConvex {
            points: hull_points,
            triangles: hull_tris,
        })
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Mutable access to the vertices. The caller keeps the hull convex.
    pub fn points_mut(&mut self) -> &mut [Vec3] {
        &mut self.points
    }

    pub fn contains_point(&self, pt: Vec3) -> bool {
        self.triangles
            .iter()
            .all(|tri| tri_distance(&self.points, tri, pt) <= HULL_PLANE_EPSILON)
    }
}

impl ShapeTrait for ShapeConvex {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Convex
    }

    fn local_aabb(&self) -> Aabb {
        Aabb::from_points(&self.points)
    }

    fn volume(&self) -> Option<Real> {
        Some(surface_mass_properties(&self.points, &self.triangles).volume)
    }

    fn center_of_mass(&self) -> Option<Vec3> {
        Some(surface_mass_properties(&self.points, &self.triangles).center_of_mass)
    }

    fn inertia_about_origin(&self) -> Option<Mat3> {
        Some(surface_mass_properties(&self.points, &self.triangles).inertia_about_origin)
    }

    fn support_map(&self) -> Option<&dyn SupportMap> {
        Some(self)
    }
}

impl SupportMap for ShapeConvex {
    fn local_support(&self, dir: Vec3) -> Vec3 {
        find_support_point(&self.points, dir)
    }
}
