use crate::actions;
use crate::context::DemoContext;
use cubelab_kernel::BoxField;
use cubelab_panel::{ControlId, FolderId, Panel};

/// Folder and control ids of the demo panel.
#[derive(Debug, Clone)]
pub struct ControlIds {
    pub position_folder: FolderId,
    pub dimensions_folder: FolderId,
    pub segments_folder: FolderId,
    pub camera_folder: FolderId,
    /// Mesh x, y, z.
    pub position: [ControlId; 3],
    /// Width, height, depth.
    pub dimensions: [ControlId; 3],
    /// Width, height and depth segment counts.
    pub segments: [ControlId; 3],
    pub camera_z: ControlId,
    pub visible: ControlId,
    pub wireframe: ControlId,
    pub color: ControlId,
    pub spin: ControlId,
    pub ruota: ControlId,
}

const AXIS_LABELS: [&str; 3] = ["asse orizzontale", "asse verticale", "asse trasversale"];

/// Build the demo panel over [`DemoContext`]. Everything starts collapsed.
pub fn build_panel(title: &str, width: f32) -> (Panel<DemoContext>, ControlIds) {
    let mut panel = Panel::new(title).with_width(width);

    let position_folder = panel.add_folder("Posizioni Cubo");
    let position = [0, 1, 2].map(|axis| {
        panel
            .add_number(
                position_folder,
                ["x", "y", "z"][axis],
                move |ctx: &DemoContext| ctx.scene.mesh().transform.position[axis] as f64,
                move |ctx: &mut DemoContext, v| {
                    ctx.scene.mesh_mut().transform.position[axis] = v as f32
                },
            )
            .range(-3.0, 3.0)
            .step(0.01)
            .name(AXIS_LABELS[axis])
            .id()
    });

    let dimensions_folder = panel.add_folder("Dimensioni Cubo");
    let dimensions = [BoxField::Width, BoxField::Height, BoxField::Depth]
        .map(|field| geometry_control(&mut panel, dimensions_folder, field));

    let segments_folder = panel.add_folder("Segmenti Cubo");
    let segments = [
        BoxField::WidthSegments,
        BoxField::HeightSegments,
        BoxField::DepthSegments,
    ]
    .map(|field| geometry_control(&mut panel, segments_folder, field));

    let camera_folder = panel.add_folder("Posizione Camera");
    let camera_z = panel
        .add_number(
            camera_folder,
            "z",
            |ctx: &DemoContext| ctx.camera.position.z as f64,
            |ctx: &mut DemoContext, v| ctx.camera.position.z = v as f32,
        )
        .range(3.0, 10.0)
        .step(0.01)
        .name("asse trasversale")
        .id();

    let visible = panel
        .add_bool(
            FolderId::ROOT,
            "visible",
            |ctx: &DemoContext| ctx.scene.mesh().visible,
            |ctx: &mut DemoContext, v| ctx.scene.mesh_mut().visible = v,
        )
        .name("Visibilità")
        .id();
    let wireframe = panel
        .add_bool(
            FolderId::ROOT,
            "wireframe",
            |ctx: &DemoContext| ctx.scene.mesh().material.wireframe,
            |ctx: &mut DemoContext, v| ctx.scene.mesh_mut().material.wireframe = v,
        )
        .name("Wireframe")
        .id();
    let color = panel
        .add_color(
            FolderId::ROOT,
            "color",
            |ctx: &DemoContext| ctx.scene.mesh().material.color,
            |ctx: &mut DemoContext, c| ctx.scene.mesh_mut().material.color = c,
        )
        .name("Colore")
        .id();
    let spin = panel
        .add_action(FolderId::ROOT, "spin", actions::spin)
        .name("Spin")
        .id();
    let ruota = panel
        .add_action(FolderId::ROOT, "ruota", |ctx: &mut DemoContext| {
            actions::toggle_rotation(ctx);
        })
        .name("Ruota")
        .id();

    for folder in [
        position_folder,
        dimensions_folder,
        segments_folder,
        camera_folder,
        FolderId::ROOT,
    ] {
        panel.set_open(folder, false);
    }

    let ids = ControlIds {
        position_folder,
        dimensions_folder,
        segments_folder,
        camera_folder,
        position,
        dimensions,
        segments,
        camera_z,
        visible,
        wireframe,
        color,
        spin,
        ruota,
    };
    (panel, ids)
}

/// A `[1, 10]` integer control on one box parameter that rebuilds the geometry.
fn geometry_control(panel: &mut Panel<DemoContext>, folder: FolderId, field: BoxField) -> ControlId {
    panel
        .add_number(
            folder,
            field.key(),
            move |ctx: &DemoContext| ctx.scene.params().get(field) as f64,
            move |ctx: &mut DemoContext, v| ctx.scene.set_param(field, v as f32),
        )
        .range(1.0, 10.0)
        .step(1.0)
        .on_change(|ctx: &mut DemoContext, _| {
            ctx.scene.rebuild_geometry();
        })
        .id()
}
