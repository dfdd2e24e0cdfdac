//! Light component.

use arbor_math::{Color, EulerRot, Quat, Vec3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LightType {
    #[default]
    Directional,
    Point,
    Spot,
}

/// A light source attached to a scene object.
///
/// Point and spot lights sit at the object's world position. Directional and
/// spot lights aim along the object's rotation combined with the light's own
/// local Euler angles.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    pub color: Color,
    light_type: LightType,
    /// Degrees, applied on top of the object's rotation
    local_euler_angles: Vec3,
    /// Distance falloff exponent in [0, 2] (point and spot)
    falloff: f32,
    /// Cone angle in degrees (spot)
    spot_angle: f32,
    /// `spot_angle` in radians, kept in step by `set_spot_angle`
    spot_angle_radians: f32,
    radial_falloff: f32,
}

impl Default for Light {
    fn default() -> Self {
        Self {
            color: Color::ONE,
            light_type: LightType::Directional,
            local_euler_angles: Vec3::ZERO,
            falloff: 1.0,
            spot_angle: 30.0,
            spot_angle_radians: 30f32.to_radians(),
            radial_falloff: 1.0,
        }
    }
}

impl Light {
    pub fn new(light_type: LightType) -> Self {
        Self {
            light_type,
            ..Default::default()
        }
    }

    pub fn light_type(&self) -> LightType {
        self.light_type
    }

    pub fn set_light_type(&mut self, light_type: LightType) {
        self.light_type = light_type;
    }

    pub fn local_euler_angles(&self) -> Vec3 {
        self.local_euler_angles
    }

    pub fn set_local_euler_angles(&mut self, degrees: Vec3) {
        self.local_euler_angles = degrees;
    }

    pub fn falloff(&self) -> f32 {
        self.falloff
    }

    /// Set the distance falloff, clamped to [0, 2].
    pub fn set_falloff(&mut self, falloff: f32) {
        self.falloff = falloff.clamp(0.0, 2.0);
    }

    pub fn spot_angle(&self) -> f32 {
        self.spot_angle
    }

    pub fn spot_angle_radians(&self) -> f32 {
        self.spot_angle_radians
    }

    pub fn set_spot_angle(&mut self, degrees: f32) {
        self.spot_angle = degrees;
        self.spot_angle_radians = degrees.to_radians();
    }

    pub fn radial_falloff(&self) -> f32 {
        self.radial_falloff
    }

    pub fn set_radial_falloff(&mut self, falloff: f32) {
        self.radial_falloff = falloff;
    }

    /// World direction of the light given its object's world rotation.
    pub fn world_direction(&self, object_rotation: Quat) -> Vec3 {
        let a = self.local_euler_angles;
        let local = Quat::from_euler(
            EulerRot::YXZ,
            a.y.to_radians(),
            a.x.to_radians(),
            a.z.to_radians(),
        );
        (object_rotation * local * Vec3::Z).normalize()
    }
}
