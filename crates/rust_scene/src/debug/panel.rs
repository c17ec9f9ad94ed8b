//! Panel widget
//!
//! [`PanelBackend`] is the surface the debug panel builder needs from a
//! widget library. [`PropertyPanel`] is the in-process implementation: a
//! tree of folders holding controls that write through to their bound
//! targets and notify listeners.

use slotmap::SlotMap;

use crate::debug::binding::{ChangeCallback, ParamRange, TweakTarget};
use crate::error::{SceneError, SceneResult};
use crate::scene::ParamValue;

slotmap::new_key_type! {
    /// Folder inside a panel
    pub struct FolderId;
    /// Control inside a panel
    pub struct ControlId;
}

/// Widget library operations used to build a debug panel
pub trait PanelBackend {
    /// Top-level folder
    fn root(&self) -> FolderId;
    
    /// Create a named sub-folder
    fn add_folder(&mut self, parent: FolderId, name: &str) -> FolderId;
    
    /// Color picker bound to `property` of `target`
    fn add_color(&mut self, parent: FolderId, target: TweakTarget, property: &str, label: &str) -> SceneResult<ControlId>;
    
    /// Numeric or boolean control bound to `property` of `target`
    fn add(
        &mut self,
        parent: FolderId,
        target: TweakTarget,
        property: &str,
        label: &str,
        range: ParamRange,
    ) -> SceneResult<ControlId>;
    
    /// Attach a change listener
    fn on_change(&mut self, control: ControlId, callback: ChangeCallback) -> SceneResult<()>;
    
    /// Change a control as a user would: write through, then notify listeners
    fn set_value(&mut self, control: ControlId, value: ParamValue) -> SceneResult<()>;
    
    /// Current value of the bound property
    fn value(&self, control: ControlId) -> Option<ParamValue>;
    
    /// Control by `/`-separated path of folder names and label
    fn find(&self, path: &str) -> Option<ControlId>;
    
    /// Paths of all controls, in creation order
    fn control_paths(&self) -> Vec<String>;
}

/// What a control edits
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlKind {
    /// Color picker
    Color,
    /// Toggle
    Checkbox,
    /// Number field or slider
    Number(ParamRange),
    /// Free text
    Text,
}

struct Folder {
    name: String,
    parent: Option<FolderId>,
}

struct Control {
    folder: FolderId,
    label: String,
    target: TweakTarget,
    property: String,
    kind: ControlKind,
    listeners: Vec<ChangeCallback>,
}

/// Default panel widget
pub struct PropertyPanel {
    folders: SlotMap<FolderId, Folder>,
    controls: SlotMap<ControlId, Control>,
    order: Vec<ControlId>,
    root: FolderId,
}

impl Default for PropertyPanel {
    fn default() -> Self {
        Self::new("Debug")
    }
}

impl std::fmt::Debug for PropertyPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyPanel")
            .field("folders", &self.folders.len())
            .field("controls", &self.control_paths())
            .finish()
    }
}

impl PropertyPanel {
    /// Create a panel with a titled root folder
    pub fn new(title: &str) -> Self {
        let mut folders = SlotMap::with_key();
        let root = folders.insert(Folder {
            name: title.to_string(),
            parent: None,
        });
        Self {
            folders,
            controls: SlotMap::with_key(),
            order: Vec::new(),
            root,
        }
    }
    
    /// Kind of a control
    pub fn kind(&self, control: ControlId) -> Option<ControlKind> {
        self.controls.get(control).map(|c| c.kind)
    }
    
    /// Number of controls
    pub fn len(&self) -> usize {
        self.controls.len()
    }
    
    /// Whether the panel has no controls
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
    
    fn insert(&mut self, folder: FolderId, target: TweakTarget, property: &str, label: &str, kind: ControlKind) -> ControlId {
        let id = self.controls.insert(Control {
            folder,
            label: label.to_string(),
            target,
            property: property.to_string(),
            kind,
            listeners: Vec::new(),
        });
        self.order.push(id);
        log::trace!("Panel control added: {}", self.path_of(id));
        id
    }
    
    fn current(target: &TweakTarget, property: &str) -> SceneResult<ParamValue> {
        target
            .borrow()
            .get_property(property)
            .ok_or_else(|| SceneError::Construction(format!("bound object has no property '{property}'")))
    }
    
    fn folder_path(&self, mut folder: FolderId) -> Vec<&str> {
        let mut names = Vec::new();
        while let Some(f) = self.folders.get(folder) {
            match f.parent {
                Some(parent) => {
                    names.push(f.name.as_str());
                    folder = parent;
                }
                None => break,
            }
        }
        names.reverse();
        names
    }
    
    fn path_of(&self, control: ControlId) -> String {
        match self.controls.get(control) {
            Some(c) => {
                let mut parts = self.folder_path(c.folder);
                parts.push(&c.label);
                parts.join("/")
            }
            None => String::new(),
        }
    }
}

/// Coerce `value` into what a control of `kind` accepts
fn coerce(kind: ControlKind, value: ParamValue) -> SceneResult<ParamValue> {
    let mismatch = |expected: &str, got: &ParamValue| {
        SceneError::Configuration(format!("control expects {expected}, got {}", got.kind()))
    };
    match kind {
        ControlKind::Color => value.as_color().map(ParamValue::Color).ok_or_else(|| mismatch("a color", &value)),
        ControlKind::Checkbox => value.as_bool().map(ParamValue::Bool).ok_or_else(|| mismatch("a bool", &value)),
        ControlKind::Number(range) => {
            let mut n = value.as_f64().ok_or_else(|| mismatch("a number", &value))?;
            if let Some(min) = range.min {
                n = n.max(min);
            }
            if let Some(max) = range.max {
                n = n.min(max);
            }
            if let Some(step) = range.step.filter(|s| *s > 0.0) {
                let base = range.min.unwrap_or(0.0);
                n = base + ((n - base) / step).round() * step;
                if let Some(max) = range.max {
                    n = n.min(max);
                }
            }
            Ok(ParamValue::Number(n))
        }
        ControlKind::Text => Ok(value),
    }
}

impl PanelBackend for PropertyPanel {
    fn root(&self) -> FolderId {
        self.root
    }
    
    fn add_folder(&mut self, parent: FolderId, name: &str) -> FolderId {
        self.folders.insert(Folder {
            name: name.to_string(),
            parent: Some(parent),
        })
    }
    
    fn add_color(&mut self, parent: FolderId, target: TweakTarget, property: &str, label: &str) -> SceneResult<ControlId> {
        let current = Self::current(&target, property)?;
        if current.as_color().is_none() {
            return Err(SceneError::Construction(format!(
                "property '{property}' is not a color ({})",
                current.kind()
            )));
        }
        Ok(self.insert(parent, target, property, label, ControlKind::Color))
    }
    
    fn add(
        &mut self,
        parent: FolderId,
        target: TweakTarget,
        property: &str,
        label: &str,
        range: ParamRange,
    ) -> SceneResult<ControlId> {
        let kind = match Self::current(&target, property)? {
            ParamValue::Bool(_) => ControlKind::Checkbox,
            ParamValue::Number(_) => ControlKind::Number(range),
            ParamValue::Color(_) => ControlKind::Color,
            ParamValue::Text(_) => ControlKind::Text,
        };
        Ok(self.insert(parent, target, property, label, kind))
    }
    
    fn on_change(&mut self, control: ControlId, callback: ChangeCallback) -> SceneResult<()> {
        let control = self
            .controls
            .get_mut(control)
            .ok_or_else(|| SceneError::InvalidState("unknown panel control".to_string()))?;
        control.listeners.push(callback);
        Ok(())
    }
    
    fn set_value(&mut self, control: ControlId, value: ParamValue) -> SceneResult<()> {
        let control = self
            .controls
            .get_mut(control)
            .ok_or_else(|| SceneError::InvalidState("unknown panel control".to_string()))?;
        let value = coerce(control.kind, value)?;
        control.target.borrow_mut().set_property(&control.property, value.clone())?;
        for listener in &mut control.listeners {
            listener(&value);
        }
        Ok(())
    }
    
    fn value(&self, control: ControlId) -> Option<ParamValue> {
        let control = self.controls.get(control)?;
        let value = control.target.borrow().get_property(&control.property);
        value
    }
    
    fn find(&self, path: &str) -> Option<ControlId> {
        self.order.iter().copied().find(|id| self.path_of(*id) == path)
    }
    
    fn control_paths(&self) -> Vec<String> {
        self.order.iter().map(|id| self.path_of(*id)).collect()
    }
}
