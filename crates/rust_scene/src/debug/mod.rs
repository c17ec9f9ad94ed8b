//! Debug parameter panel
//!
//! Application code describes controls as [`DebugEntry`] trees; the
//! [`DebugPanelBuilder`] binds them to a [`PanelBackend`] once the panel
//! widget has loaded.

pub mod binding;
pub mod builder;
pub mod panel;

pub use binding::{ChangeCallback, DebugBinding, DebugEntry, ParamRange, TweakTarget, Tweakable};
pub use builder::{BoxedPanel, DebugPanelBuilder};
pub use panel::{ControlId, ControlKind, FolderId, PanelBackend, PropertyPanel};
