use super::mass::surface_mass_properties;
use super::{ShapeKind, ShapeTrait};
use crate::bounds::Aabb;
use crate::error::ShapeError;
use crate::math::{Mat3, Real, Vec3};

/// Bounding volume type used by a mesh hierarchy. Selects the mesh's node kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum BvKind {
    #[default]
    Aabb,
    Obb,
    Rss,
    Kios,
    ObbRss,
    Kdop16,
    Kdop18,
    Kdop24,
}

impl BvKind {
    pub fn shape_kind(self) -> ShapeKind {
        match self {
            BvKind::Aabb => ShapeKind::BvAabb,
            BvKind::Obb => ShapeKind::BvObb,
            BvKind::Rss => ShapeKind::BvRss,
            BvKind::Kios => ShapeKind::BvKios,
            BvKind::ObbRss => ShapeKind::BvObbRss,
            BvKind::Kdop16 => ShapeKind::BvKdop16,
            BvKind::Kdop18 => ShapeKind::BvKdop18,
            BvKind::Kdop24 => ShapeKind::BvKdop24,
        }
    }
}

/// Triangle soup. Mass properties are only meaningful when the mesh is closed
/// and wound counter-clockwise from outside.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeMesh {
    vertices: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    bv: BvKind,
}

impl ShapeMesh {
    pub fn new(
        vertices: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
        bv: BvKind,
    ) -> Result<Self, ShapeError> {
        if vertices.is_empty() {
            return Err(ShapeError::EmptyMesh);
        }
        for (triangle, tri) in triangles.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&idx| idx as usize >= vertices.len()) {
                return Err(ShapeError::IndexOutOfRange {
                    triangle,
                    index,
                    vertex_count: vertices.len(),
                });
            }
        }
        Ok(ShapeMesh {
            vertices,
            triangles,
            bv,
        })
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    pub fn bv(&self) -> BvKind {
        self.bv
    }
}

impl ShapeTrait for ShapeMesh {
    fn kind(&self) -> ShapeKind {
        self.bv.shape_kind()
    }

    fn local_aabb(&self) -> Aabb {
        Aabb::from_points(&self.vertices)
    }

    fn volume(&self) -> Option<Real> {
        Some(surface_mass_properties(&self.vertices, &self.triangles).volume)
    }

    fn center_of_mass(&self) -> Option<Vec3> {
        Some(surface_mass_properties(&self.vertices, &self.triangles).center_of_mass)
    }

    fn inertia_about_origin(&self) -> Option<Mat3> {
        Some(surface_mass_properties(&self.vertices, &self.triangles).inertia_about_origin)
    }
}
