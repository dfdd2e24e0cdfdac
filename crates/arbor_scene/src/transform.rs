//! The mandatory transform component.
//!
//! Local fields are stored exactly as set; world matrices are cached and
//! refreshed by the scene whenever the local fields or the parent chain
//! change.

use arbor_math::{EulerRot, Mat4, Mat4Ext, Quat, Vec3};

/// Local position/rotation/scale, as exchanged with editors and loaders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl LocalTransform {
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// Transform component: always the first component of a scene object.
#[derive(Clone, Debug)]
pub struct Transform {
    local: LocalTransform,
    /// Euler angles in degrees (yaw about Y, pitch about X, roll about Z)
    local_euler_angles: Vec3,
    local_to_world: Mat4,
    world_to_local: Option<Mat4>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            local: LocalTransform::default(),
            local_euler_angles: Vec3::ZERO,
            local_to_world: Mat4::IDENTITY,
            world_to_local: Some(Mat4::IDENTITY),
        }
    }
}

fn quat_from_euler_degrees(angles: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        angles.y.to_radians(),
        angles.x.to_radians(),
        angles.z.to_radians(),
    )
}

fn euler_degrees_from_quat(rotation: Quat) -> Vec3 {
    let (yaw, pitch, roll) = rotation.to_euler(EulerRot::YXZ);
    Vec3::new(pitch.to_degrees(), yaw.to_degrees(), roll.to_degrees())
}

impl Transform {
    pub fn local(&self) -> LocalTransform {
        self.local
    }

    pub fn local_position(&self) -> Vec3 {
        self.local.position
    }

    pub fn local_rotation(&self) -> Quat {
        self.local.rotation
    }

    /// Local rotation as Euler angles in degrees.
    pub fn local_euler_angles(&self) -> Vec3 {
        self.local_euler_angles
    }

    pub fn local_scale(&self) -> Vec3 {
        self.local.scale
    }

    pub fn local_matrix(&self) -> Mat4 {
        self.local.to_matrix()
    }

    pub fn local_to_world_matrix(&self) -> Mat4 {
        self.local_to_world
    }

    /// Inverse of the world matrix, `None` when the world transform is
    /// singular (some scale along the parent chain is zero).
    pub fn world_to_local_matrix(&self) -> Option<Mat4> {
        self.world_to_local
    }

    /// World-space position of the object's origin.
    pub fn position(&self) -> Vec3 {
        self.local_to_world.w_axis.truncate()
    }

    /// World-space rotation.
    pub fn rotation(&self) -> Quat {
        let (_, rotation, _) = self.local_to_world.to_scale_rotation_translation();
        rotation
    }

    pub fn right(&self) -> Vec3 {
        self.local_to_world.x_axis.truncate().normalize_or_zero()
    }

    pub fn up(&self) -> Vec3 {
        self.local_to_world.y_axis.truncate().normalize_or_zero()
    }

    /// Viewing direction: the world -Z axis of the object.
    pub fn forward(&self) -> Vec3 {
        -self.local_to_world.z_axis.truncate().normalize_or_zero()
    }

    pub(crate) fn set_local(&mut self, local: LocalTransform) {
        self.local = local;
        self.local_euler_angles = euler_degrees_from_quat(local.rotation);
    }

    pub(crate) fn set_local_position(&mut self, position: Vec3) {
        self.local.position = position;
    }

    pub(crate) fn set_local_rotation(&mut self, rotation: Quat) {
        self.local.rotation = rotation;
        self.local_euler_angles = euler_degrees_from_quat(rotation);
    }

    pub(crate) fn set_local_euler_angles(&mut self, angles: Vec3) {
        self.local_euler_angles = angles;
        self.local.rotation = quat_from_euler_degrees(angles);
    }

    pub(crate) fn set_local_scale(&mut self, scale: Vec3) {
        self.local.scale = scale;
    }

    /// Recompute the cached world matrices under `parent_to_world`.
    pub(crate) fn update_world(&mut self, parent_to_world: Mat4) {
        self.local_to_world = parent_to_world * self.local_matrix();
        self.world_to_local = self.local_to_world.try_inverse();
    }
}
