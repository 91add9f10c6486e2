use crate::math::{Mat3, Real, Vec3};

/// Unit-density mass properties of a closed triangle surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct MassProperties {
    pub volume: Real,
    pub center_of_mass: Vec3,
    pub inertia_about_origin: Mat3,
}

/// Integrates over the signed tetrahedra formed by each triangle and the origin.
///
/// Triangles must be wound counter-clockwise when seen from outside.
pub(crate) fn surface_mass_properties(points: &[Vec3], triangles: &[[u32; 3]]) -> MassProperties {
    // second moment of the canonical tetrahedron (0, e0, e1, e2)
    let canonical = Mat3::from_cols(
        Vec3::new(2.0, 1.0, 1.0),
        Vec3::new(1.0, 2.0, 1.0),
        Vec3::new(1.0, 1.0, 2.0),
    ) * (1.0 / 120.0);

    let mut six_volume = 0.0;
    let mut weighted_centroid = Vec3::ZERO;
    let mut covariance = Mat3::ZERO;
    for tri in triangles {
        let a = points[tri[0] as usize];
        let b = points[tri[1] as usize];
        let c = points[tri[2] as usize];

        let det = a.cross(b).dot(c);
        let basis = Mat3::from_cols(a, b, c);

        covariance += basis * canonical * basis.transpose() * det;
        weighted_centroid += (a + b + c) * det;
        six_volume += det;
    }

    let volume = six_volume / 6.0;
    let center_of_mass = if six_volume != 0.0 {
        weighted_centroid / (4.0 * six_volume)
    } else {
        Vec3::ZERO
    };

    let trace = covariance.x_axis.x + covariance.y_axis.y + covariance.z_axis.z;
    let inertia_about_origin = Mat3::from_diagonal(Vec3::splat(trace)) - covariance;

    MassProperties {
        volume,
        center_of_mass,
        inertia_about_origin,
    }
}
