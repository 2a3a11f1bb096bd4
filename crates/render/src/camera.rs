use glam::{Mat4, Vec3};

/// Perspective camera looking at a target point.
///
/// The projection matrix is cached; call
/// [`PerspectiveCamera::update_projection_matrix`] after changing `fov`,
/// `aspect`, `near` or `far`.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self::new(75.0, 16.0 / 9.0, 0.1, 100.0)
    }
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Vec3::new(0.0, 0.0, 3.0),
            target: Vec3::ZERO,
            fov,
            aspect,
            near,
            far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or(Vec3::NEG_Z)
    }

    /// Camera-space right and up axes in world space.
    pub fn basis(&self) -> (Vec3, Vec3) {
        let forward = self.forward();
        let right = forward.cross(Vec3::Y).normalize_or(Vec3::X);
        let up = right.cross(forward);
        (right, up)
    }
}

/// Spherical coordinates around the Y axis (radius, polar `phi`, azimuth `theta`).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

const POLE_EPS: f32 = 1e-6;

/// Orbit camera controls: pointer drag rotates around the target, right drag
/// pans, the wheel dollies. Input only accumulates deltas; [`OrbitControls::update`]
/// applies them to the camera once per frame.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    spherical_delta: Spherical,
    scale: f32,
    pan_offset: Vec3,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: false,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            spherical_delta: Spherical::default(),
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer drag by `(dx, dy)` pixels on a surface `viewport_height` pixels tall.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        let h = viewport_height.max(1.0);
        let tau = std::f32::consts::TAU;
        self.spherical_delta.theta -= tau * dx / h * self.rotate_speed;
        self.spherical_delta.phi -= tau * dy / h * self.rotate_speed;
    }

    /// Screen-space pan by `(dx, dy)` pixels.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32, camera: &PerspectiveCamera) {
        let h = viewport_height.max(1.0);
        let distance = (camera.position - self.target).length()
            * (camera.fov.to_radians() / 2.0).tan();
        let (right, up) = camera.basis();
        self.pan_offset -= right * (2.0 * dx * distance / h) * self.pan_speed;
        self.pan_offset += up * (2.0 * dy * distance / h) * self.pan_speed;
    }

    /// Wheel input in lines; positive `steps` (scroll up) moves closer.
    /// Fractional steps dolly proportionally.
    pub fn dolly(&mut self, steps: f32) {
        let zoom_scale = 0.95_f32.powf(self.zoom_speed);
        self.scale *= zoom_scale.powf(steps);
    }

    /// Apply pending input to `camera`. Returns true if the camera moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let offset = camera.position - self.target;
        let mut spherical = Spherical::from_offset(offset);

        let k = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        spherical.theta += self.spherical_delta.theta * k;
        spherical.phi += self.spherical_delta.phi * k;
        spherical.phi = spherical
            .phi
            .clamp(POLE_EPS, std::f32::consts::PI - POLE_EPS);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * k;

        let before = camera.position;
        camera.position = self.target + spherical.to_offset();
        camera.target = self.target;

        if self.enable_damping {
            self.spherical_delta.theta *= 1.0 - self.damping_factor;
            self.spherical_delta.phi *= 1.0 - self.damping_factor;
            self.pan_offset *= 1.0 - self.damping_factor;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;

        before.distance_squared(camera.position) > 1e-10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = PerspectiveCamera::default();
        assert_eq!(cam.position, Vec3::new(0.0, 0.0, 3.0));
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn projection_is_cached_until_updated() {
        let mut cam = PerspectiveCamera::default();
        let before = cam.projection_matrix();
        cam.aspect = 1.0;
        assert_eq!(cam.projection_matrix(), before);
        cam.update_projection_matrix();
        assert_ne!(cam.projection_matrix(), before);
    }

    #[test]
    fn spherical_round_trip() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let back = Spherical::from_offset(v).to_offset();
        assert!((back - v).length() < 1e-5);
    }

    #[test]
    fn idle_update_keeps_distance() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new();
        controls.enable_damping = true;
        controls.update(&mut cam);
        assert!((cam.position.length() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn rotate_without_damping_applies_at_once() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new();
        controls.rotate(100.0, 0.0, 600.0);
        assert!(controls.update(&mut cam));
        assert!((cam.position.length() - 3.0).abs() < 1e-4);
        assert!(!controls.update(&mut cam));
    }

    #[test]
    fn damping_decays_geometrically() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new();
        controls.enable_damping = true;
        controls.rotate(300.0, 0.0, 600.0);
        let start = controls.spherical_delta.theta;
        controls.update(&mut cam);
        controls.update(&mut cam);
        let expected = start * (1.0 - controls.damping_factor).powi(2);
        assert!((controls.spherical_delta.theta - expected).abs() < 1e-6);
    }

    #[test]
    fn dolly_moves_closer() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new();
        controls.dolly(1.0);
        controls.update(&mut cam);
        assert!((cam.position.length() - 3.0 * 0.95).abs() < 1e-5);
    }

    #[test]
    fn fractional_dolly_adds_up_to_whole_steps() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new();
        for _ in 0..4 {
            controls.dolly(0.25);
        }
        controls.update(&mut cam);
        assert!((cam.position.length() - 3.0 * 0.95).abs() < 1e-5);

        let mut cam = PerspectiveCamera::default();
        controls.dolly(-0.5);
        controls.update(&mut cam);
        assert!((cam.position.length() - 3.0 / 0.95_f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn pan_shifts_target() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new();
        controls.pan(50.0, 0.0, 600.0, &cam);
        controls.update(&mut cam);
        assert!(controls.target.x < 0.0);
        assert_eq!(cam.target, controls.target);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let mut cam = PerspectiveCamera::default();
        let mut controls = OrbitControls::new();
        controls.rotate(0.0, 10_000.0, 600.0);
        controls.update(&mut cam);
        assert!(cam.position.is_finite());
        assert!(cam.position.y > 0.0);
    }
}
