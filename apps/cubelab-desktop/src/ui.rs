use cubelab_common::Color;
use cubelab_panel::{ControlId, ControlKind, FolderId, Value};
use cubelab_runtime::Demo;

/// A widget interaction collected while drawing, applied once drawing is done.
#[derive(Debug, Clone, Copy)]
enum Edit {
    Number(ControlId, f64),
    Bool(ControlId, bool),
    Color(ControlId, Color),
    Invoke(ControlId),
    ToggleFolder(FolderId),
}

/// Draw the parameter panel and route every edit back through the demo.
pub fn draw_panel(ctx: &egui::Context, demo: &mut Demo) {
    if demo.panel().is_hidden() {
        return;
    }

    for edit in collect_edits(ctx, demo) {
        let result = match edit {
            Edit::Number(id, v) => demo.set_number(id, v).map(drop),
            Edit::Bool(id, v) => demo.set_bool(id, v),
            Edit::Color(id, c) => demo.set_color(id, c),
            Edit::Invoke(id) => demo.invoke(id),
            Edit::ToggleFolder(folder) => {
                demo.panel_mut().toggle_open(folder);
                Ok(())
            }
        };
        if let Err(e) = result {
            tracing::error!("panel edit failed: {e}");
        }
    }
}

fn collect_edits(ctx: &egui::Context, demo: &Demo) -> Vec<Edit> {
    let mut edits = Vec::new();
    let panel = demo.panel();
    egui::Window::new(panel.title())
        .id(egui::Id::new("cubelab_panel"))
        .title_bar(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, [-8.0, 8.0])
        .default_width(panel.width())
        .show(ctx, |ui| {
            ui.set_width(panel.width());
            let root = egui::CollapsingHeader::new(panel.title())
                .id_salt("panel_root")
                .open(Some(panel.is_open(FolderId::ROOT)))
                .show(ui, |ui| {
                    for folder in panel.folders() {
                        let response = egui::CollapsingHeader::new(folder.title())
                            .id_salt(("folder", folder.id()))
                            .open(Some(folder.is_open()))
                            .show(ui, |ui| draw_controls(ui, demo, folder.id(), &mut edits));
                        if response.header_response.clicked() {
                            edits.push(Edit::ToggleFolder(folder.id()));
                        }
                    }
                    draw_controls(ui, demo, FolderId::ROOT, &mut edits);
                });
            if root.header_response.clicked() {
                edits.push(Edit::ToggleFolder(FolderId::ROOT));
            }
        });
    edits
}

fn draw_controls(ui: &mut egui::Ui, demo: &Demo, folder: FolderId, edits: &mut Vec<Edit>) {
    let ctx = demo.context();
    for control in demo.panel().controls_in(folder) {
        let id = control.id();
        let label = control.label();
        match (control.kind(), control.get(ctx)) {
            (ControlKind::Number, Some(Value::Number(mut v))) => {
                let response = match control.bounds() {
                    Some((min, max)) => {
                        let mut slider = egui::Slider::new(&mut v, min..=max).text(label);
                        if let Some(step) = control.step_size() {
                            slider = slider.step_by(step);
                        }
                        ui.add(slider)
                    }
                    None => ui.add(egui::DragValue::new(&mut v).prefix(format!("{label}: "))),
                };
                if response.changed() {
                    edits.push(Edit::Number(id, v));
                }
            }
            (ControlKind::Bool, Some(Value::Bool(mut b))) => {
                if ui.checkbox(&mut b, label).changed() {
                    edits.push(Edit::Bool(id, b));
                }
            }
            (ControlKind::Color, Some(Value::Color(c))) => {
                let hex = c.to_hex();
                let mut rgb = [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8];
                ui.horizontal(|ui| {
                    if ui.color_edit_button_srgb(&mut rgb).changed() {
                        let packed =
                            ((rgb[0] as u32) << 16) | ((rgb[1] as u32) << 8) | rgb[2] as u32;
                        edits.push(Edit::Color(id, Color::from_hex(packed)));
                    }
                    ui.label(label);
                });
            }
            (ControlKind::Action, _) => {
                if ui.button(label).clicked() {
                    edits.push(Edit::Invoke(id));
                }
            }
            _ => {}
        }
    }
}
