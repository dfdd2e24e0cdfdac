//! Camera component.
//!
//! The camera only stores projection parameters. Its eye position and
//! orientation come from the owning object's transform: the camera looks
//! down its local -Z axis with +Y up.

/// How the view volume is projected onto the image plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionType {
    #[default]
    Perspective,
    Parallel,
}

const MIN_ANGLE: f32 = 1.0;
const MAX_ANGLE: f32 = 179.0;
const MIN_HEIGHT: f32 = 0.01;
const MIN_ASPECT: f32 = 0.1;
const MIN_DEPTH: f32 = 0.01;

/// Camera for rendering the scene from an object's point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    projection: ProjectionType,
    /// Vertical field of view in degrees (perspective)
    view_angle: f32,
    /// Height of the view window in world units (parallel)
    height: f32,
    aspect_ratio: f32,
    near: f32,
    far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            projection: ProjectionType::Perspective,
            view_angle: 60.0,
            height: 10.0,
            aspect_ratio: 1.0,
            near: 0.01,
            far: 1000.0,
        }
    }
}

impl Camera {
    pub fn perspective(view_angle: f32) -> Self {
        let mut camera = Self::default();
        camera.set_view_angle(view_angle);
        camera
    }

    pub fn parallel(height: f32) -> Self {
        let mut camera = Self::default();
        camera.set_projection_type(ProjectionType::Parallel);
        camera.set_height(height);
        camera
    }

    pub fn projection_type(&self) -> ProjectionType {
        self.projection
    }

    pub fn set_projection_type(&mut self, projection: ProjectionType) {
        self.projection = projection;
    }

    pub fn view_angle(&self) -> f32 {
        self.view_angle
    }

    /// Set the vertical field of view in degrees, clamped to [1, 179].
    pub fn set_view_angle(&mut self, degrees: f32) {
        self.view_angle = degrees.clamp(MIN_ANGLE, MAX_ANGLE);
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_height(&mut self, height: f32) {
        self.height = height.max(MIN_HEIGHT);
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        self.aspect_ratio = aspect.max(MIN_ASPECT);
    }

    pub fn near_plane(&self) -> f32 {
        self.near
    }

    pub fn far_plane(&self) -> f32 {
        self.far
    }

    /// Returns `(near, far)`.
    pub fn clipping_planes(&self) -> (f32, f32) {
        (self.near, self.far)
    }

    /// Set the clipping planes, keeping `0 < near < far`.
    pub fn set_clipping_planes(&mut self, near: f32, far: f32) {
        self.near = near.max(MIN_DEPTH);
        self.far = far.max(self.near + MIN_DEPTH);
    }

    /// Height of the view window on the near plane, in world units.
    pub fn window_height(&self) -> f32 {
        match self.projection {
            ProjectionType::Parallel => self.height,
            ProjectionType::Perspective => {
                2.0 * self.near * (self.view_angle.to_radians() * 0.5).tan()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perspective_window_height() {
        let mut camera = Camera::perspective(90.0);
        camera.set_clipping_planes(1.0, 100.0);
        // tan(45 deg) = 1
        assert!((camera.window_height() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_parallel_window_height() {
        let camera = Camera::parallel(4.0);
        assert_eq!(camera.projection_type(), ProjectionType::Parallel);
        assert_eq!(camera.window_height(), 4.0);
    }

    #[test]
    fn test_setters_clamp() {
        let mut camera = Camera::default();
        camera.set_view_angle(500.0);
        assert_eq!(camera.view_angle(), 179.0);

        camera.set_clipping_planes(-1.0, -5.0);
        let (near, far) = camera.clipping_planes();
        assert!(near > 0.0);
        assert!(far > near);

        camera.set_height(0.0);
        assert!(camera.height() > 0.0);
    }
}
