use crate::camera::PerspectiveCamera;
use cubelab_kernel::Scene;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads the scene and the camera, then produces output. It
/// never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Draw one frame of `scene` as seen through `camera`.
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable description of one frame. Used by the headless
/// CLI and by tests that need a renderer without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> String {
        self.frames += 1;
        let mesh = scene.mesh();
        let geometry = mesh.geometry();
        let params = geometry.params();
        let t = &mesh.transform;

        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} (rotating={}) ===\n",
            self.frames,
            scene.rotating()
        ));
        out.push_str(&format!(
            "Camera: pos=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.3}\n",
            camera.position.x, camera.position.y, camera.position.z, camera.fov, camera.aspect
        ));
        if !mesh.visible {
            out.push_str("Mesh: hidden\n");
            return out;
        }
        out.push_str(&format!(
            "Mesh: pos=({:.2}, {:.2}, {:.2}) rot.y={:.3} color={} wireframe={}\n",
            t.position.x,
            t.position.y,
            t.position.z,
            t.rotation.y,
            mesh.material.color,
            mesh.material.wireframe
        ));
        out.push_str(&format!(
            "Geometry [{}]: {}x{}x{} segments={}/{}/{} vertices={} triangles={}\n",
            geometry.id().short(),
            params.width,
            params.height,
            params.depth,
            params.width_segments,
            params.height_segments,
            params.depth_segments,
            geometry.vertices().len(),
            geometry.triangle_count()
        ));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubelab_kernel::BoxField;

    #[test]
    fn debug_renderer_default_scene() {
        let scene = Scene::default();
        let camera = PerspectiveCamera::default();
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&scene, &camera);

        assert!(output.contains("Frame 1"));
        assert!(output.contains("rotating=false"));
        assert!(output.contains("color=#982abc"));
        assert!(output.contains("vertices=24 triangles=12"));
    }

    #[test]
    fn debug_renderer_counts_frames() {
        let scene = Scene::default();
        let camera = PerspectiveCamera::default();
        let mut renderer = DebugTextRenderer::new();
        renderer.render(&scene, &camera);
        let output = renderer.render(&scene, &camera);
        assert!(output.contains("Frame 2"));
        assert_eq!(renderer.frames(), 2);
    }

    #[test]
    fn debug_renderer_reflects_rebuilds() {
        let mut scene = Scene::default();
        scene.set_param(BoxField::WidthSegments, 2.0);
        scene.rebuild_geometry();
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&scene, &PerspectiveCamera::default());
        assert!(output.contains("segments=2/1/1"));
    }

    #[test]
    fn hidden_mesh_is_not_described() {
        let mut scene = Scene::default();
        scene.mesh_mut().visible = false;
        let mut renderer = DebugTextRenderer::new();
        let output = renderer.render(&scene, &PerspectiveCamera::default());
        assert!(output.contains("Mesh: hidden"));
        assert!(!output.contains("Geometry"));
    }
}
