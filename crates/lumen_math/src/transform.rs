// Affine transforms for shapes.
//
// A Transform keeps the forward (object -> world placement) matrix together
// with its inverse so neither direction has to be recomputed per ray.
// The inverse is the matrix rays are pushed through on their way into
// object space.

use glam::{DMat4, DVec3};

/// Composable affine transform with a cached inverse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    forward: DMat4,
    inverse: DMat4,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        forward: DMat4::IDENTITY,
        inverse: DMat4::IDENTITY,
    };

    /// Create a transform from a forward matrix.
    ///
    /// A singular matrix yields a non-finite inverse; callers that accept
    /// user input reject those before getting here.
    pub fn from_matrix(forward: DMat4) -> Self {
        Self {
            forward,
            inverse: forward.inverse(),
        }
    }

    /// Create a transform from a row-major 4x4 matrix.
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        #[rustfmt::skip]
        let flat = [
            rows[0][0], rows[0][1], rows[0][2], rows[0][3],
            rows[1][0], rows[1][1], rows[1][2], rows[1][3],
            rows[2][0], rows[2][1], rows[2][2], rows[2][3],
            rows[3][0], rows[3][1], rows[3][2], rows[3][3],
        ];
        // glam is column-major, so the row-major array loads as the transpose
        Self::from_matrix(DMat4::from_cols_array(&flat).transpose())
    }

    /// Translation by `offset`.
    pub fn translation(offset: DVec3) -> Self {
        Self {
            forward: DMat4::from_translation(offset),
            inverse: DMat4::from_translation(-offset),
        }
    }

    /// Non-uniform scale. Components must be non-zero.
    pub fn scaling(factors: DVec3) -> Self {
        Self {
            forward: DMat4::from_scale(factors),
            inverse: DMat4::from_scale(DVec3::ONE / factors),
        }
    }

    /// Rotation by Euler angles in degrees, applied about X, then Y, then Z.
    pub fn rotation_degrees(angles: DVec3) -> Self {
        let forward = DMat4::from_rotation_z(angles.z.to_radians())
            * DMat4::from_rotation_y(angles.y.to_radians())
            * DMat4::from_rotation_x(angles.x.to_radians());
        Self {
            forward,
            // Rotations are orthonormal
            inverse: forward.transpose(),
        }
    }

    /// Compose: `other` is applied first, in the local frame of `self`.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            forward: self.forward * other.forward,
            inverse: other.inverse * self.inverse,
        }
    }

    /// The inverse transform.
    pub fn inverse(&self) -> Transform {
        Transform {
            forward: self.inverse,
            inverse: self.forward,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.forward == DMat4::IDENTITY
    }

    /// Forward (object -> world) matrix.
    pub fn matrix(&self) -> DMat4 {
        self.forward
    }

    /// Inverse (world -> object) matrix.
    pub fn inverse_matrix(&self) -> DMat4 {
        self.inverse
    }

    /// Transform a point (w = 1, translation applied).
    #[inline]
    pub fn transform_point(&self, point: DVec3) -> DVec3 {
        self.forward.transform_point3(point)
    }

    /// Transform a direction (w = 0, translation ignored).
    #[inline]
    pub fn transform_vector(&self, vector: DVec3) -> DVec3 {
        self.forward.transform_vector3(vector)
    }

    #[inline]
    pub fn inverse_transform_point(&self, point: DVec3) -> DVec3 {
        self.inverse.transform_point3(point)
    }

    #[inline]
    pub fn inverse_transform_vector(&self, vector: DVec3) -> DVec3 {
        self.inverse.transform_vector3(vector)
    }

    /// Transform a surface normal with the inverse-transpose. Not normalized.
    #[inline]
    pub fn transform_normal(&self, normal: DVec3) -> DVec3 {
        self.inverse.transpose().transform_vector3(normal)
    }
}
