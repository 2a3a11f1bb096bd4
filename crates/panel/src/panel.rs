use crate::control::{Accessor, Control, ControlId, ControlKind, FolderId, Value};
use cubelab_common::Color;

/// Errors from panel operations.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PanelError {
    #[error("no control with id {0:?}")]
    UnknownControl(ControlId),
    #[error("control {key:?} is a {found} control, not {expected}")]
    WrongKind {
        key: String,
        expected: ControlKind,
        found: ControlKind,
    },
    #[error("control {0:?} rejects non-finite values")]
    NotFinite(String),
}

/// A named, independently collapsible group of controls.
#[derive(Debug, Clone)]
pub struct Folder {
    id: FolderId,
    title: String,
    open: bool,
    controls: Vec<ControlId>,
}

impl Folder {
    pub fn id(&self) -> FolderId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn controls(&self) -> &[ControlId] {
        &self.controls
    }
}

/// Declarative parameter panel over a target of type `T`.
///
/// Controls never hold a reference to the target; every read and write takes
/// it as an argument, so the panel can live next to the state it edits.
/// The root folder's open flag is the panel's own collapsed state.
pub struct Panel<T> {
    width: f32,
    hidden: bool,
    folders: Vec<Folder>,
    controls: Vec<Control<T>>,
}

impl<T> Panel<T> {
    pub fn new(title: &str) -> Self {
        Self {
            width: 245.0,
            hidden: false,
            folders: vec![Folder {
                id: FolderId::ROOT,
                title: title.to_string(),
                open: true,
                controls: Vec::new(),
            }],
            controls: Vec::new(),
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn title(&self) -> &str {
        &self.folders[FolderId::ROOT.0].title
    }

    /// Add a folder under the root. Folders start open.
    pub fn add_folder(&mut self, title: &str) -> FolderId {
        let id = FolderId(self.folders.len());
        self.folders.push(Folder {
            id,
            title: title.to_string(),
            open: true,
            controls: Vec::new(),
        });
        id
    }

    pub fn folder(&self, id: FolderId) -> Option<&Folder> {
        self.folders.get(id.0)
    }

    /// Sub-folders in creation order (the root is not included).
    pub fn folders(&self) -> &[Folder] {
        &self.folders[1..]
    }

    /// Open or close a folder; `FolderId::ROOT` collapses the whole panel.
    pub fn set_open(&mut self, folder: FolderId, open: bool) {
        if let Some(f) = self.folders.get_mut(folder.0) {
            f.open = open;
        }
    }

    pub fn toggle_open(&mut self, folder: FolderId) {
        if let Some(f) = self.folders.get_mut(folder.0) {
            f.open = !f.open;
        }
    }

    pub fn is_open(&self, folder: FolderId) -> bool {
        self.folders.get(folder.0).is_some_and(|f| f.open)
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    pub fn hide(&mut self) {
        self.hidden = true;
    }

    /// Flip between shown and hidden. Returns true if the panel is now hidden.
    pub fn toggle_hidden(&mut self) -> bool {
        self.hidden = !self.hidden;
        tracing::debug!("panel {}", if self.hidden { "hidden" } else { "shown" });
        self.hidden
    }

    fn push(&mut self, folder: FolderId, key: &str, accessor: Accessor<T>) -> &mut Control<T> {
        let folder = if folder.0 < self.folders.len() {
            folder
        } else {
            FolderId::ROOT
        };
        let id = ControlId(self.controls.len());
        self.folders[folder.0].controls.push(id);
        self.controls.push(Control::new(id, folder, key, accessor));
        &mut self.controls[id.0]
    }

    pub fn add_number(
        &mut self,
        folder: FolderId,
        key: &str,
        get: impl Fn(&T) -> f64 + 'static,
        set: impl Fn(&mut T, f64) + 'static,
    ) -> &mut Control<T> {
        self.push(
            folder,
            key,
            Accessor::Number {
                get: Box::new(get),
                set: Box::new(set),
            },
        )
    }

    pub fn add_bool(
        &mut self,
        folder: FolderId,
        key: &str,
        get: impl Fn(&T) -> bool + 'static,
        set: impl Fn(&mut T, bool) + 'static,
    ) -> &mut Control<T> {
        self.push(
            folder,
            key,
            Accessor::Bool {
                get: Box::new(get),
                set: Box::new(set),
            },
        )
    }

    pub fn add_color(
        &mut self,
        folder: FolderId,
        key: &str,
        get: impl Fn(&T) -> Color + 'static,
        set: impl Fn(&mut T, Color) + 'static,
    ) -> &mut Control<T> {
        self.push(
            folder,
            key,
            Accessor::Color {
                get: Box::new(get),
                set: Box::new(set),
            },
        )
    }

    /// A button not bound to any field.
    pub fn add_action(
        &mut self,
        folder: FolderId,
        key: &str,
        action: impl Fn(&mut T) + 'static,
    ) -> &mut Control<T> {
        self.push(folder, key, Accessor::Action(Box::new(action)))
    }

    pub fn control(&self, id: ControlId) -> Option<&Control<T>> {
        self.controls.get(id.0)
    }

    /// Look a control up by folder and key.
    pub fn find(&self, folder: FolderId, key: &str) -> Option<ControlId> {
        self.folder(folder)?
            .controls
            .iter()
            .copied()
            .find(|id| self.controls[id.0].key() == key)
    }

    pub fn controls_in(&self, folder: FolderId) -> impl Iterator<Item = &Control<T>> {
        self.folder(folder)
            .map(|f| f.controls.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|id| &self.controls[id.0])
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    fn lookup(&self, id: ControlId) -> Result<&Control<T>, PanelError> {
        self.control(id).ok_or(PanelError::UnknownControl(id))
    }

    fn wrong_kind(control: &Control<T>, expected: ControlKind) -> PanelError {
        PanelError::WrongKind {
            key: control.key().to_string(),
            expected,
            found: control.kind(),
        }
    }

    fn changed(control: &Control<T>, target: &mut T, value: Value) {
        if let Some(handler) = &control.on_change {
            handler(target, value);
        }
    }

    /// Current value of a field control.
    pub fn value(&self, target: &T, id: ControlId) -> Result<Value, PanelError> {
        let control = self.lookup(id)?;
        control
            .get(target)
            .ok_or_else(|| Self::wrong_kind(control, ControlKind::Number))
    }

    /// Write a number through the control: quantise, clamp, set, then notify.
    /// Returns the value actually written.
    pub fn set_number(&self, target: &mut T, id: ControlId, raw: f64) -> Result<f64, PanelError> {
        let control = self.lookup(id)?;
        let Accessor::Number { set, .. } = &control.accessor else {
            return Err(Self::wrong_kind(control, ControlKind::Number));
        };
        if !raw.is_finite() {
            return Err(PanelError::NotFinite(control.key().to_string()));
        }
        let value = control.quantize(raw);
        set(target, value);
        Self::changed(control, target, Value::Number(value));
        Ok(value)
    }

    pub fn set_bool(&self, target: &mut T, id: ControlId, value: bool) -> Result<(), PanelError> {
        let control = self.lookup(id)?;
        let Accessor::Bool { set, .. } = &control.accessor else {
            return Err(Self::wrong_kind(control, ControlKind::Bool));
        };
        set(target, value);
        Self::changed(control, target, Value::Bool(value));
        Ok(())
    }

    /// Flip a boolean control. Returns the new value.
    pub fn toggle(&self, target: &mut T, id: ControlId) -> Result<bool, PanelError> {
        let control = self.lookup(id)?;
        let Accessor::Bool { get, .. } = &control.accessor else {
            return Err(Self::wrong_kind(control, ControlKind::Bool));
        };
        let value = !get(target);
        self.set_bool(target, id, value)?;
        Ok(value)
    }

    pub fn set_color(&self, target: &mut T, id: ControlId, value: Color) -> Result<(), PanelError> {
        let control = self.lookup(id)?;
        let Accessor::Color { set, .. } = &control.accessor else {
            return Err(Self::wrong_kind(control, ControlKind::Color));
        };
        set(target, value);
        Self::changed(control, target, Value::Color(value));
        Ok(())
    }

    /// Run an action control.
    pub fn invoke(&self, target: &mut T, id: ControlId) -> Result<(), PanelError> {
        let control = self.lookup(id)?;
        let Accessor::Action(action) = &control.accessor else {
            return Err(Self::wrong_kind(control, ControlKind::Action));
        };
        tracing::debug!("panel action {}", control.key());
        action(target);
        Ok(())
    }
}

impl<T> std::fmt::Debug for Panel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Panel")
            .field("title", &self.title())
            .field("hidden", &self.hidden)
            .field("folders", &self.folders)
            .field("controls", &self.controls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Target {
        x: f64,
        segments: u32,
        visible: bool,
        color: Option<Color>,
        rebuilds: u32,
        clicks: u32,
    }

    fn panel() -> (Panel<Target>, ControlId, ControlId, ControlId, ControlId, ControlId) {
        let mut panel: Panel<Target> = Panel::new("Debug");
        let folder = panel.add_folder("Position");
        let x = panel
            .add_number(folder, "x", |t: &Target| t.x, |t, v| t.x = v)
            .range(-3.0, 3.0)
            .step(0.01)
            .name("horizontal")
            .id();
        let segments = panel
            .add_number(
                FolderId::ROOT,
                "segments",
                |t: &Target| t.segments as f64,
                |t, v| t.segments = v as u32,
            )
            .range(1.0, 10.0)
            .step(1.0)
            .on_change(|t, _| t.rebuilds += 1)
            .id();
        let visible = panel
            .add_bool(FolderId::ROOT, "visible", |t: &Target| t.visible, |t, v| t.visible = v)
            .id();
        let color = panel
            .add_color(
                FolderId::ROOT,
                "color",
                |t: &Target| t.color.unwrap_or(Color::BLACK),
                |t, c| t.color = Some(c),
            )
            .id();
        let click = panel
            .add_action(FolderId::ROOT, "click", |t: &mut Target| t.clicks += 1)
            .id();
        (panel, x, segments, visible, color, click)
    }

    #[test]
    fn labels_fall_back_to_keys() {
        let (panel, x, segments, ..) = panel();
        assert_eq!(panel.control(x).unwrap().label(), "horizontal");
        assert_eq!(panel.control(segments).unwrap().label(), "segments");
    }

    #[test]
    fn number_writes_are_clamped_and_quantised() {
        let (panel, x, segments, ..) = panel();
        let mut t = Target::default();

        assert_eq!(panel.set_number(&mut t, segments, 12.0).unwrap(), 10.0);
        assert_eq!(panel.set_number(&mut t, segments, 2.4).unwrap(), 2.0);
        assert_eq!(panel.set_number(&mut t, segments, -5.0).unwrap(), 1.0);
        assert_eq!(t.segments, 1);

        let v = panel.set_number(&mut t, x, 1.2345).unwrap();
        assert!((v - 1.23).abs() < 1e-9);
        assert_eq!(panel.set_number(&mut t, x, -9.0).unwrap(), -3.0);
    }

    #[test]
    fn on_change_runs_after_setter() {
        let (panel, x, segments, ..) = panel();
        let mut t = Target::default();
        panel.set_number(&mut t, segments, 3.0).unwrap();
        panel.set_number(&mut t, segments, 4.0).unwrap();
        panel.set_number(&mut t, x, 1.0).unwrap();
        assert_eq!(t.rebuilds, 2);
        assert_eq!(t.segments, 4);
    }

    #[test]
    fn toggle_twice_restores() {
        let (panel, _, _, visible, ..) = panel();
        let mut t = Target {
            visible: true,
            ..Target::default()
        };
        assert!(!panel.toggle(&mut t, visible).unwrap());
        assert!(panel.toggle(&mut t, visible).unwrap());
        assert!(t.visible);
    }

    #[test]
    fn colour_and_action_controls() {
        let (panel, _, _, _, color, click) = panel();
        let mut t = Target::default();
        panel.set_color(&mut t, color, Color::WHITE).unwrap();
        assert_eq!(panel.value(&t, color).unwrap(), Value::Color(Color::WHITE));
        panel.invoke(&mut t, click).unwrap();
        panel.invoke(&mut t, click).unwrap();
        assert_eq!(t.clicks, 2);
    }

    #[test]
    fn kind_mismatch_is_an_error() {
        let (panel, x, _, visible, _, click) = panel();
        let mut t = Target::default();
        assert!(matches!(
            panel.set_bool(&mut t, x, true),
            Err(PanelError::WrongKind { .. })
        ));
        assert!(panel.invoke(&mut t, visible).is_err());
        assert!(panel.value(&t, click).is_err());
        assert_eq!(
            panel.invoke(&mut t, ControlId(99)),
            Err(PanelError::UnknownControl(ControlId(99)))
        );
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        let (panel, x, ..) = panel();
        let mut t = Target::default();
        assert!(panel.set_number(&mut t, x, f64::NAN).is_err());
        assert_eq!(t.x, 0.0);
    }

    #[test]
    fn folders_group_controls() {
        let (mut panel, x, ..) = panel();
        let folder = panel.control(x).unwrap().folder();
        assert_eq!(panel.folders().len(), 1);
        assert_eq!(panel.folders()[0].title(), "Position");
        assert_eq!(panel.find(folder, "x"), Some(x));
        assert_eq!(panel.find(FolderId::ROOT, "x"), None);
        assert_eq!(panel.controls_in(FolderId::ROOT).count(), 4);

        assert!(panel.is_open(folder));
        panel.set_open(folder, false);
        assert!(!panel.is_open(folder));
        panel.toggle_open(folder);
        assert!(panel.is_open(folder));
    }

    #[test]
    fn hidden_toggle_flips_each_time() {
        let (mut panel, ..) = panel();
        assert!(!panel.is_hidden());
        assert!(panel.toggle_hidden());
        assert!(!panel.toggle_hidden());
        panel.hide();
        assert!(panel.is_hidden());
        panel.show();
        assert!(!panel.is_hidden());
    }
}
