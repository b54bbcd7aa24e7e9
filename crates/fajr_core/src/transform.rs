use glam::{Affine3A, EulerRot, Mat3, Mat4, Quat, Vec3};

/// Transform component.
///
/// Holds a node's translation, rotation and scale (TRS) together with the
/// cached local/world matrices. The public TRS fields are written directly
/// by animation updaters; the cached matrices are refreshed lazily by the
/// scene's transform propagation, which compares against a shadow copy of
/// the last TRS it saw.
#[derive(Debug, Clone)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,

    local_matrix: Affine3A,
    world_matrix: Affine3A,

    last_position: Vec3,
    last_rotation: Quat,
    last_scale: Vec3,
    force_update: bool,

    // Euler angles last written, valid while `rotation == euler_rotation`.
    euler: Vec3,
    euler_rotation: Quat,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,

            local_matrix: Affine3A::IDENTITY,
            world_matrix: Affine3A::IDENTITY,

            last_position: Vec3::ZERO,
            last_rotation: Quat::IDENTITY,
            last_scale: Vec3::ONE,
            force_update: true,

            euler: Vec3::ZERO,
            euler_rotation: Quat::IDENTITY,
        }
    }

    /// Builds a transform at `position` with an XYZ Euler rotation and a
    /// non-uniform scale.
    #[must_use]
    pub fn from_parts(position: Vec3, euler: Vec3, scale: Vec3) -> Self {
        let mut transform = Self::new();
        transform.position = position;
        transform.set_rotation_euler(euler.x, euler.y, euler.z);
        transform.scale = scale;
        transform
    }

    /// Recomputes the local matrix if any TRS field changed since the last
    /// call. Returns whether it did.
    pub fn update_local_matrix(&mut self) -> bool {
        let changed = self.force_update
            || self.position != self.last_position
            || self.rotation != self.last_rotation
            || self.scale != self.last_scale;

        if changed {
            self.local_matrix =
                Affine3A::from_scale_rotation_translation(self.scale, self.rotation, self.position);

            self.last_position = self.position;
            self.last_rotation = self.rotation;
            self.last_scale = self.scale;
            self.force_update = false;
        }

        changed
    }

    /// Sets the rotation from XYZ-ordered Euler angles (radians).
    pub fn set_rotation_euler(&mut self, x: f32, y: f32, z: f32) {
        self.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
        self.euler = Vec3::new(x, y, z);
        self.euler_rotation = self.rotation;
    }

    /// Current rotation as XYZ-ordered Euler angles (radians).
    ///
    /// Returns the angles last passed to [`Transform::set_rotation_euler`]
    /// verbatim while `rotation` has not been written directly since.
    #[must_use]
    pub fn rotation_euler(&self) -> Vec3 {
        if self.rotation == self.euler_rotation {
            return self.euler;
        }
        let (x, y, z) = self.rotation.to_euler(EulerRot::XYZ);
        Vec3::new(x, y, z)
    }

    /// Replaces only the X and Z Euler components, keeping the current Y.
    pub fn set_rotation_euler_xz(&mut self, x: f32, z: f32) {
        let current = self.rotation_euler();
        self.set_rotation_euler(x, current.y, z);
    }

    /// Replaces only the Z Euler component, keeping the current X and Y.
    pub fn set_rotation_euler_z(&mut self, z: f32) {
        let current = self.rotation_euler();
        self.set_rotation_euler(current.x, current.y, z);
    }

    #[inline]
    #[must_use]
    pub fn local_matrix(&self) -> &Affine3A {
        &self.local_matrix
    }

    #[inline]
    #[must_use]
    pub fn world_matrix(&self) -> &Affine3A {
        &self.world_matrix
    }

    /// World matrix widened to `Mat4` for upload.
    #[inline]
    #[must_use]
    pub fn world_matrix_as_mat4(&self) -> Mat4 {
        Mat4::from(self.world_matrix)
    }

    /// World-space translation.
    #[inline]
    #[must_use]
    pub fn world_position(&self) -> Vec3 {
        Vec3::from(self.world_matrix.translation)
    }

    /// Written by the transform propagation once the parent is resolved.
    pub fn set_world_matrix(&mut self, mat: Affine3A) {
        self.world_matrix = mat;
    }

    /// Orients the transform so that its -Z axis points at `target`.
    ///
    /// `target` and `up` are expressed in the parent's space. Degenerate
    /// input (target on the up axis, or coincident with the position)
    /// leaves the rotation untouched.
    pub fn look_at(&mut self, target: Vec3, up: Vec3) {
        let to_target = target - self.position;
        if to_target.length_squared() < f32::EPSILON {
            return;
        }
        let forward = to_target.normalize();

        if forward.cross(up).length_squared() < 1e-4 {
            return;
        }

        let right = forward.cross(up).normalize();
        let new_up = right.cross(forward).normalize();

        let rot_mat = Mat3::from_cols(right, new_up, -forward);
        self.rotation = Quat::from_mat3(&rot_mat);
    }

    /// Forces the next `update_local_matrix` to recompute, e.g. after
    /// re-parenting.
    pub fn mark_dirty(&mut self) {
        self.force_update = true;
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
