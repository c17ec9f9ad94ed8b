//! Debug binding entries
//!
//! A [`DebugEntry`] describes what should appear in the debug panel: either
//! a leaf binding one property of a [`Tweakable`] target, or a named group
//! of further entries. Entries are plain descriptions; nothing is bound
//! until the panel builder materializes them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::SceneError;
use crate::scene::ParamValue;

/// An object whose properties can be read and written by name
pub trait Tweakable {
    /// Current value of `property`, or `None` if there is no such property
    fn get_property(&self, property: &str) -> Option<ParamValue>;
    
    /// Write `value` into `property`
    fn set_property(&mut self, property: &str, value: ParamValue) -> Result<(), SceneError>;
}

/// Shared handle to a bound object
pub type TweakTarget = Rc<RefCell<dyn Tweakable>>;

/// Listener invoked with the new value after a control changes
pub type ChangeCallback = Box<dyn FnMut(&ParamValue)>;

/// Optional numeric range of a control
///
/// Missing bounds fall back to the panel's defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParamRange {
    /// Lower bound
    pub min: Option<f64>,
    /// Upper bound
    pub max: Option<f64>,
    /// Increment
    pub step: Option<f64>,
}

impl ParamRange {
    /// Range with both bounds set and no step
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
            step: None,
        }
    }
    
    /// Builder-style step
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = Some(step);
        self
    }
}

/// A leaf entry binding one property of one target
pub struct DebugBinding {
    /// The bound object
    pub target: TweakTarget,
    /// Property name on the target
    pub property: String,
    /// Numeric range
    pub range: ParamRange,
    /// Label shown instead of the property name
    pub name: Option<String>,
    /// Listener attached to the control
    pub on_change: Option<ChangeCallback>,
    /// Bind as a color picker
    pub is_color: bool,
}

impl DebugBinding {
    /// Bind `property` of `target`
    pub fn new(target: TweakTarget, property: impl Into<String>) -> Self {
        Self {
            target,
            property: property.into(),
            range: ParamRange::default(),
            name: None,
            on_change: None,
            is_color: false,
        }
    }
    
    /// Builder-style range
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range.min = Some(min);
        self.range.max = Some(max);
        self
    }
    
    /// Builder-style step
    pub fn with_step(mut self, step: f64) -> Self {
        self.range.step = Some(step);
        self
    }
    
    /// Builder-style display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
    
    /// Builder-style change listener
    pub fn on_change(mut self, callback: impl FnMut(&ParamValue) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }
    
    /// Bind as a color control
    pub fn as_color(mut self) -> Self {
        self.is_color = true;
        self
    }
    
    /// Label shown on the control
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.property)
    }
}

impl fmt::Debug for DebugBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebugBinding")
            .field("property", &self.property)
            .field("range", &self.range)
            .field("name", &self.name)
            .field("on_change", &self.on_change.is_some())
            .field("is_color", &self.is_color)
            .finish()
    }
}

/// One node of a debug panel description
#[derive(Debug)]
pub enum DebugEntry {
    /// A single bound property
    Leaf(DebugBinding),
    /// A named folder of entries
    Group {
        /// Folder title; must not be empty
        name: String,
        /// Entries in display order
        children: Vec<DebugEntry>,
    },
}

impl DebugEntry {
    /// Leaf entry for `property` of `target`
    pub fn leaf(target: TweakTarget, property: impl Into<String>) -> Self {
        Self::Leaf(DebugBinding::new(target, property))
    }
    
    /// Named group
    pub fn group(name: impl Into<String>, children: Vec<DebugEntry>) -> Self {
        Self::Group {
            name: name.into(),
            children,
        }
    }
}

impl From<DebugBinding> for DebugEntry {
    fn from(binding: DebugBinding) -> Self {
        Self::Leaf(binding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ObjectParams;

    #[test]
    fn test_binding_builders() {
        let target: TweakTarget = Rc::new(RefCell::new(ObjectParams::new().with("speed", 1.0_f64)));
        let binding = DebugBinding::new(target, "speed")
            .with_range(0.0, 10.0)
            .with_step(0.5)
            .with_name("Speed")
            .on_change(|_| {});
        
        assert_eq!(binding.label(), "Speed");
        assert_eq!(binding.range, ParamRange::new(0.0, 10.0).with_step(0.5));
        assert!(binding.on_change.is_some());
        assert!(!binding.is_color);
    }

    #[test]
    fn test_label_defaults_to_property() {
        let target: TweakTarget = Rc::new(RefCell::new(ObjectParams::new()));
        assert_eq!(DebugBinding::new(target, "color").as_color().label(), "color");
    }
}
