use cubelab_common::Color;

/// Index of a control within its panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControlId(pub(crate) usize);

/// Index of a folder within its panel. The root folder is [`FolderId::ROOT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FolderId(pub(crate) usize);

impl FolderId {
    pub const ROOT: FolderId = FolderId(0);
}

/// What kind of widget a control is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Number,
    Bool,
    Color,
    Action,
}

impl std::fmt::Display for ControlKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Number => "number",
            Self::Bool => "bool",
            Self::Color => "color",
            Self::Action => "action",
        };
        f.write_str(name)
    }
}

/// A control value as read from, or written to, the bound target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    Color(Color),
}

type Getter<T, V> = Box<dyn Fn(&T) -> V>;
type Setter<T, V> = Box<dyn Fn(&mut T, V)>;
type ChangeHandler<T> = Box<dyn Fn(&mut T, Value)>;

/// Getter/setter pair standing in for a field binding.
pub(crate) enum Accessor<T> {
    Number { get: Getter<T, f64>, set: Setter<T, f64> },
    Bool { get: Getter<T, bool>, set: Setter<T, bool> },
    Color { get: Getter<T, Color>, set: Setter<T, Color> },
    Action(Box<dyn Fn(&mut T)>),
}

/// One panel widget bound to a single field (or an action) of `T`.
///
/// Configured lil-gui style by chaining on the `&mut Control` returned from
/// the panel's `add_*` methods.
pub struct Control<T> {
    id: ControlId,
    folder: FolderId,
    key: String,
    label: Option<String>,
    min: Option<f64>,
    max: Option<f64>,
    step: Option<f64>,
    pub(crate) accessor: Accessor<T>,
    pub(crate) on_change: Option<ChangeHandler<T>>,
}

impl<T> Control<T> {
    pub(crate) fn new(id: ControlId, folder: FolderId, key: &str, accessor: Accessor<T>) -> Self {
        Self {
            id,
            folder,
            key: key.to_string(),
            label: None,
            min: None,
            max: None,
            step: None,
            accessor,
            on_change: None,
        }
    }

    pub fn min(&mut self, min: f64) -> &mut Self {
        self.min = Some(min);
        self
    }

    pub fn max(&mut self, max: f64) -> &mut Self {
        self.max = Some(max);
        self
    }

    pub fn step(&mut self, step: f64) -> &mut Self {
        self.step = Some(step);
        self
    }

    pub fn range(&mut self, min: f64, max: f64) -> &mut Self {
        self.min(min).max(max)
    }

    /// Display label shown instead of the key.
    pub fn name(&mut self, label: &str) -> &mut Self {
        self.label = Some(label.to_string());
        self
    }

    /// Callback run after every write through the panel, with the written value.
    pub fn on_change(&mut self, handler: impl Fn(&mut T, Value) + 'static) -> &mut Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    pub fn id(&self) -> ControlId {
        self.id
    }

    pub fn folder(&self) -> FolderId {
        self.folder
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The display label, falling back to the key.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.key)
    }

    pub fn kind(&self) -> ControlKind {
        match self.accessor {
            Accessor::Number { .. } => ControlKind::Number,
            Accessor::Bool { .. } => ControlKind::Bool,
            Accessor::Color { .. } => ControlKind::Color,
            Accessor::Action(_) => ControlKind::Action,
        }
    }

    /// `(min, max)` when both bounds are set.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.min.zip(self.max)
    }

    pub fn step_size(&self) -> Option<f64> {
        self.step
    }

    /// Current value of the bound field. `None` for actions.
    pub fn get(&self, target: &T) -> Option<Value> {
        match &self.accessor {
            Accessor::Number { get, .. } => Some(Value::Number(get(target))),
            Accessor::Bool { get, .. } => Some(Value::Bool(get(target))),
            Accessor::Color { get, .. } => Some(Value::Color(get(target))),
            Accessor::Action(_) => None,
        }
    }

    /// Snap `raw` to the step grid (anchored at `min`, else `max`), then clamp.
    pub fn quantize(&self, raw: f64) -> f64 {
        let mut value = raw;
        if let Some(step) = self.step.filter(|s| *s > 0.0) {
            let offset = self.min.or(self.max).unwrap_or(0.0);
            value = ((value - offset) / step).round() * step + offset;
        }
        if let Some(min) = self.min {
            value = value.max(min);
        }
        if let Some(max) = self.max {
            value = value.min(max);
        }
        value
    }
}

impl<T> std::fmt::Debug for Control<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Control")
            .field("id", &self.id)
            .field("folder", &self.folder)
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind())
            .field("min", &self.min)
            .field("max", &self.max)
            .field("step", &self.step)
            .finish()
    }
}
