use crate::geometry::{BoxField, BoxGeometry, BoxParams};
use cubelab_common::{Color, GeometryId, Transform};

/// Default material colour of the demo cube.
pub const DEFAULT_COLOR: Color = Color::new(152.0 / 255.0, 42.0 / 255.0, 188.0 / 255.0);

/// An event record produced by scene mutations that go through explicit operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// A geometry was built and installed on a mesh that had none.
    GeometryBuilt { id: GeometryId, params: BoxParams },
    /// The mesh geometry was swapped for a freshly built one.
    GeometryReplaced {
        old: GeometryId,
        new: GeometryId,
        params: BoxParams,
    },
    /// A geometry resource was released.
    GeometryDisposed { id: GeometryId },
    /// The rotation gate changed value.
    RotationGateChanged { rotating: bool },
}

/// Unlit, flat-coloured material.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BasicMaterial {
    pub color: Color,
    pub wireframe: bool,
}

impl Default for BasicMaterial {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR,
            wireframe: false,
        }
    }
}

/// A drawable: one geometry, one material, a transform and a visibility flag.
///
/// The mesh owns its geometry exclusively; [`Mesh::replace_geometry`] hands
/// the outgoing one back so the caller can release it.
#[derive(Debug, Clone)]
pub struct Mesh {
    geometry: BoxGeometry,
    pub material: BasicMaterial,
    pub transform: Transform,
    pub visible: bool,
}

impl Mesh {
    pub fn new(geometry: BoxGeometry, material: BasicMaterial) -> Self {
        Self {
            geometry,
            material,
            transform: Transform::default(),
            visible: true,
        }
    }

    pub fn geometry(&self) -> &BoxGeometry {
        &self.geometry
    }

    /// Install `geometry`, returning the one it replaces.
    pub fn replace_geometry(&mut self, geometry: BoxGeometry) -> BoxGeometry {
        std::mem::replace(&mut self.geometry, geometry)
    }
}

/// The scene state: the single mesh, its box parameters and the rotation gate.
///
/// All mutations that matter to other components go through explicit
/// operations and leave a [`SceneEvent`] in the log. Whoever drives frames
/// drains the log once per frame.
#[derive(Debug, Clone)]
pub struct Scene {
    mesh: Mesh,
    params: BoxParams,
    rotating: bool,
    event_log: Vec<SceneEvent>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(BoxParams::default(), BasicMaterial::default())
    }
}

impl Scene {
    /// Build the scene with a mesh generated from `params`. The gate starts off.
    pub fn new(params: BoxParams, material: BasicMaterial) -> Self {
        let geometry = BoxGeometry::new(params);
        let event_log = vec![SceneEvent::GeometryBuilt {
            id: geometry.id(),
            params,
        }];
        Self {
            mesh: Mesh::new(geometry, material),
            params,
            rotating: false,
            event_log,
        }
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn mesh_mut(&mut self) -> &mut Mesh {
        &mut self.mesh
    }

    /// Current box parameters (the values the next rebuild will use).
    pub fn params(&self) -> BoxParams {
        self.params
    }

    /// Update one box parameter. Does not rebuild; see [`Scene::rebuild_geometry`].
    pub fn set_param(&mut self, field: BoxField, value: f32) {
        self.params.set(field, value);
    }

    /// Regenerate the mesh geometry from the current parameters, install it,
    /// and dispose the geometry it replaces. Returns the new geometry id.
    pub fn rebuild_geometry(&mut self) -> GeometryId {
        let fresh = BoxGeometry::new(self.params);
        let new = fresh.id();
        let old = self.mesh.replace_geometry(fresh).dispose();
        tracing::debug!(
            "rebuilt geometry {} -> {} ({}x{}x{}, segments {}/{}/{})",
            old.short(),
            new.short(),
            self.params.width,
            self.params.height,
            self.params.depth,
            self.params.width_segments,
            self.params.height_segments,
            self.params.depth_segments
        );
        self.event_log.push(SceneEvent::GeometryReplaced {
            old,
            new,
            params: self.params,
        });
        self.event_log.push(SceneEvent::GeometryDisposed { id: old });
        new
    }

    /// Whether the render loop drives y-rotation from elapsed time.
    pub fn rotating(&self) -> bool {
        self.rotating
    }

    pub fn set_rotating(&mut self, rotating: bool) {
        if self.rotating == rotating {
            return;
        }
        self.rotating = rotating;
        tracing::debug!("rotation gate {}", if rotating { "on" } else { "off" });
        self.event_log
            .push(SceneEvent::RotationGateChanged { rotating });
    }

    /// Flip the rotation gate. Returns the new value.
    pub fn toggle_rotation(&mut self) -> bool {
        self.set_rotating(!self.rotating);
        self.rotating
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn rebuild_count(scene: &Scene) -> usize {
        scene
            .events()
            .iter()
            .filter(|e| matches!(e, SceneEvent::GeometryReplaced { .. }))
            .count()
    }

    #[test]
    fn scene_starts_with_unit_cube_and_gate_off() {
        let scene = Scene::default();
        assert_eq!(scene.params(), BoxParams::default());
        assert!(!scene.rotating());
        assert!(scene.mesh().visible);
        assert_eq!(scene.mesh().material.color.to_hex(), 0x982abc);
        assert!(matches!(
            scene.events(),
            [SceneEvent::GeometryBuilt { .. }]
        ));
    }

    #[test]
    fn rebuild_replaces_and_disposes() {
        let mut scene = Scene::default();
        let before = scene.mesh().geometry().id();

        scene.set_param(BoxField::Width, 4.0);
        scene.set_param(BoxField::DepthSegments, 3.0);
        let after = scene.rebuild_geometry();

        assert_ne!(before, after);
        assert_eq!(scene.mesh().geometry().id(), after);
        assert_eq!(scene.mesh().geometry().params().width, 4.0);
        assert_eq!(scene.mesh().geometry().params().depth_segments, 3);
        assert!(
            scene
                .events()
                .contains(&SceneEvent::GeometryDisposed { id: before })
        );
    }

    #[test]
    fn set_param_alone_keeps_geometry() {
        let mut scene = Scene::default();
        let id = scene.mesh().geometry().id();
        scene.set_param(BoxField::Height, 7.0);
        assert_eq!(scene.mesh().geometry().id(), id);
        assert_eq!(scene.params().height, 7.0);
        assert_eq!(rebuild_count(&scene), 0);
    }

    #[test]
    fn in_place_mesh_edits_do_not_rebuild() {
        let mut scene = Scene::default();
        let id = scene.mesh().geometry().id();

        let mesh = scene.mesh_mut();
        mesh.transform.position = Vec3::new(1.0, -2.0, 0.5);
        mesh.material.color = Color::WHITE;
        mesh.material.wireframe = true;
        mesh.visible = false;

        assert_eq!(scene.mesh().geometry().id(), id);
        assert_eq!(rebuild_count(&scene), 0);
    }

    #[test]
    fn each_rebuild_disposes_exactly_one_geometry() {
        let mut scene = Scene::default();
        for i in 1..=5 {
            scene.set_param(BoxField::Width, i as f32);
            scene.rebuild_geometry();
        }
        let disposed = scene
            .events()
            .iter()
            .filter(|e| matches!(e, SceneEvent::GeometryDisposed { .. }))
            .count();
        assert_eq!(disposed, 5);
        assert_eq!(rebuild_count(&scene), 5);
    }

    #[test]
    fn toggle_rotation_flips_and_logs() {
        let mut scene = Scene::default();
        assert!(scene.toggle_rotation());
        assert!(!scene.toggle_rotation());
        let changes: Vec<_> = scene
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                SceneEvent::RotationGateChanged { rotating } => Some(rotating),
                _ => None,
            })
            .collect();
        assert_eq!(changes, vec![true, false]);
        assert!(scene.events().is_empty());
    }

    #[test]
    fn set_rotating_same_value_is_silent() {
        let mut scene = Scene::default();
        scene.drain_events();
        scene.set_rotating(false);
        assert!(scene.events().is_empty());
    }
}
