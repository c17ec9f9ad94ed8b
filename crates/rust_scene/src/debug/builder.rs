//! Debug panel builder
//!
//! Turns batches of [`DebugEntry`] into live panel controls. The panel
//! widget is loaded lazily, so batches that arrive before it is ready are
//! queued and replayed in arrival order on the first tick after it
//! resolves. Once the panel is up, batches materialize immediately.

use crate::debug::binding::{DebugBinding, DebugEntry};
use crate::debug::panel::{FolderId, PanelBackend};
use crate::error::{SceneError, SceneResult};
use crate::foundation::deferred::Deferred;

/// Boxed panel widget
pub type BoxedPanel = Box<dyn PanelBackend>;

/// Builds debug controls against a lazily loaded panel
#[derive(Debug)]
pub struct DebugPanelBuilder {
    panel: Deferred<BoxedPanel>,
    pending: Vec<Vec<DebugEntry>>,
}

impl DebugPanelBuilder {
    /// Builder waiting on `panel`
    pub fn new(panel: Deferred<BoxedPanel>) -> Self {
        Self {
            panel,
            pending: Vec::new(),
        }
    }
    
    /// Queue `entries` or, if the panel is loaded, materialize them now
    ///
    /// The whole batch is checked first, so a bad entry rejects the batch
    /// before any control is created or anything is queued.
    pub fn add(&mut self, entries: Vec<DebugEntry>) -> SceneResult<()> {
        validate(&entries)?;
        if let Some(error) = self.panel.error() {
            return Err(SceneError::Configuration(format!("debug panel failed to load: {error}")));
        }
        match self.panel.get_mut() {
            Some(panel) => materialize_batch(panel.as_mut(), entries),
            None => {
                log::debug!("Debug panel not ready, queueing {} entries", entries.len());
                self.pending.push(entries);
                Ok(())
            }
        }
    }
    
    /// Check the panel load and flush the queue the first time it is ready
    ///
    /// A queued batch that no longer validates is logged and dropped as a
    /// whole.
    pub fn poll(&mut self) {
        let was_ready = self.panel.is_ready();
        if self.panel.poll().is_none() {
            if let Some(error) = self.panel.error() {
                if !self.pending.is_empty() {
                    log::error!("Debug panel failed to load, dropping {} queued batches: {}", self.pending.len(), error);
                    self.pending.clear();
                }
            }
            return;
        }
        if !was_ready {
            log::info!("Debug panel ready, materializing {} queued batches", self.pending.len());
        }
        let Some(panel) = self.panel.get_mut() else {
            return;
        };
        
        for batch in self.pending.drain(..) {
            if let Err(error) = validate(&batch) {
                log::error!("Dropping queued debug batch: {}", error);
                continue;
            }
            if let Err(error) = materialize_batch(panel.as_mut(), batch) {
                log::error!("Queued debug batch failed: {}", error);
            }
        }
    }
    
    /// Whether the panel has been observed as loaded
    pub fn is_ready(&self) -> bool {
        self.panel.is_ready()
    }
    
    /// Number of queued batches
    pub fn pending_batches(&self) -> usize {
        self.pending.len()
    }
    
    /// The loaded panel
    pub fn panel(&self) -> Option<&dyn PanelBackend> {
        self.panel.get().map(|panel| panel.as_ref())
    }
    
    /// The loaded panel, mutably
    pub fn panel_mut(&mut self) -> Option<&mut (dyn PanelBackend + 'static)> {
        self.panel.get_mut().map(|panel| panel.as_mut())
    }
}

/// Check group names, bound properties and color bindings without touching a panel
pub fn validate(entries: &[DebugEntry]) -> SceneResult<()> {
    for entry in entries {
        match entry {
            DebugEntry::Group { name, children } => {
                if name.is_empty() {
                    return Err(SceneError::Construction("debug group entries need a name".to_string()));
                }
                validate(children)?;
            }
            DebugEntry::Leaf(binding) => {
                let value = binding.target.borrow().get_property(&binding.property).ok_or_else(|| {
                    SceneError::Construction(format!("debug binding '{}' targets a missing property", binding.property))
                })?;
                if binding.is_color && value.as_color().is_none() {
                    return Err(SceneError::Construction(format!(
                        "debug binding '{}' is not a color ({})",
                        binding.property,
                        value.kind()
                    )));
                }
            }
        }
    }
    Ok(())
}

fn materialize_batch(panel: &mut dyn PanelBackend, entries: Vec<DebugEntry>) -> SceneResult<()> {
    let root = panel.root();
    for entry in entries {
        materialize(panel, entry, root)?;
    }
    Ok(())
}

/// Create the folder or control for `entry` under `parent`
pub fn materialize(panel: &mut dyn PanelBackend, entry: DebugEntry, parent: FolderId) -> SceneResult<()> {
    match entry {
        DebugEntry::Group { name, children } => {
            if name.is_empty() {
                return Err(SceneError::Construction("debug group entries need a name".to_string()));
            }
            let folder = panel.add_folder(parent, &name);
            for child in children {
                materialize(panel, child, folder)?;
            }
            Ok(())
        }
        DebugEntry::Leaf(binding) => bind(panel, binding, parent),
    }
}

fn bind(panel: &mut dyn PanelBackend, binding: DebugBinding, parent: FolderId) -> SceneResult<()> {
    let label = binding.label().to_string();
    let DebugBinding {
        target,
        property,
        range,
        on_change,
        is_color,
        ..
    } = binding;
    
    let control = if is_color {
        panel.add_color(parent, target, &property, &label)?
    } else {
        panel.add(parent, target, &property, &label, range)?
    };
    if let Some(callback) = on_change {
        panel.on_change(control, callback)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::binding::TweakTarget;
    use crate::debug::panel::PropertyPanel;
    use crate::foundation::deferred::TaskQueue;
    use crate::scene::{Color, Node, NodeRef, ObjectParams, ParamValue};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn target() -> TweakTarget {
        Rc::new(RefCell::new(ObjectParams::new().with("a", 1.0_f64).with("b", 2.0_f64).with("c", 3.0_f64)))
    }

    fn queued_builder() -> (DebugPanelBuilder, TaskQueue) {
        let tasks = TaskQueue::new();
        let panel = tasks.defer(|| Ok(Box::new(PropertyPanel::default()) as BoxedPanel));
        (DebugPanelBuilder::new(panel), tasks)
    }

    #[test]
    fn test_batches_before_load_are_replayed_once_in_order() {
        let (mut builder, tasks) = queued_builder();
        let t = target();
        
        builder.add(vec![DebugEntry::leaf(t.clone(), "b")]).unwrap();
        builder.add(vec![DebugEntry::group("G", vec![DebugEntry::leaf(t.clone(), "a")])]).unwrap();
        assert_eq!(builder.pending_batches(), 2);
        
        builder.poll();
        assert!(builder.panel().is_none());
        
        tasks.run_pending();
        builder.poll();
        builder.poll();
        
        assert_eq!(builder.pending_batches(), 0);
        assert_eq!(builder.panel().unwrap().control_paths(), vec!["b", "G/a"]);
    }

    #[test]
    fn test_batches_after_load_are_never_queued() {
        let (mut builder, tasks) = queued_builder();
        tasks.run_pending();
        builder.poll();
        
        builder.add(vec![DebugEntry::leaf(target(), "c")]).unwrap();
        
        assert_eq!(builder.pending_batches(), 0);
        assert_eq!(builder.panel().unwrap().control_paths(), vec!["c"]);
    }

    #[test]
    fn test_nameless_group_fails_before_children() {
        let mut builder = DebugPanelBuilder::new(Deferred::ready(Box::new(PropertyPanel::default()) as BoxedPanel));
        builder.poll();
        
        let result = builder.add(vec![DebugEntry::group("", vec![DebugEntry::leaf(target(), "a")])]);
        
        assert!(matches!(result, Err(SceneError::Construction(_))));
        assert!(builder.panel().unwrap().control_paths().is_empty());
    }

    #[test]
    fn test_bad_batch_is_rejected_before_queueing() {
        let (mut builder, _tasks) = queued_builder();
        let t = target();
        
        let result = builder.add(vec![
            DebugEntry::leaf(t.clone(), "a"),
            DebugEntry::group("G", vec![DebugEntry::leaf(t, "missing")]),
        ]);
        
        assert!(matches!(result, Err(SceneError::Construction(_))));
        assert_eq!(builder.pending_batches(), 0);
    }

    #[test]
    fn test_change_listener_is_attached() {
        let mut builder = DebugPanelBuilder::new(Deferred::ready(Box::new(PropertyPanel::default()) as BoxedPanel));
        let seen = Rc::new(RefCell::new(None));
        let sink = seen.clone();
        
        builder
            .add(vec![DebugBinding::new(target(), "a")
                .with_name("Alpha")
                .on_change(move |v| *sink.borrow_mut() = Some(v.clone()))
                .into()])
            .unwrap();
        
        let panel = builder.panel_mut().unwrap();
        let alpha = panel.find("Alpha").unwrap();
        panel.set_value(alpha, 4.0_f64.into()).unwrap();
        assert_eq!(*seen.borrow(), Some(ParamValue::Number(4.0)));
    }

    #[test]
    fn test_failed_panel_load_surfaces_as_configuration_error() {
        let tasks = TaskQueue::new();
        let panel = tasks.defer(|| Err::<BoxedPanel, _>(SceneError::asset("panel", "missing")));
        let mut builder = DebugPanelBuilder::new(panel);
        tasks.run_pending();
        builder.poll();
        
        let result = builder.add(vec![DebugEntry::leaf(target(), "a")]);
        assert!(matches!(result, Err(SceneError::Configuration(_))));
    }

    #[test]
    fn test_color_binding_on_non_color_is_rejected_before_queueing() {
        let (mut builder, _tasks) = queued_builder();
        let node = NodeRef::new(Node::group("n"));
        
        let result = builder.add(vec![
            DebugEntry::leaf(node.as_target(), "position.y"),
            DebugBinding::new(node.as_target(), "visible").as_color().into(),
        ]);
        
        assert!(matches!(result, Err(SceneError::Construction(_))));
        assert_eq!(builder.pending_batches(), 0);
    }

    #[test]
    fn test_queued_batch_that_no_longer_validates_is_dropped_whole() {
        let (mut builder, tasks) = queued_builder();
        let params = Rc::new(RefCell::new(ObjectParams::new().with("a", 1.0_f64).with("tint", Color::WHITE)));
        let t: TweakTarget = params.clone();
        
        builder.add(vec![DebugEntry::leaf(t.clone(), "a")]).unwrap();
        builder
            .add(vec![
                DebugEntry::group("G", vec![DebugEntry::leaf(t.clone(), "a")]),
                DebugBinding::new(t, "tint").as_color().into(),
            ])
            .unwrap();
        params.borrow_mut().insert("tint", true);
        
        tasks.run_pending();
        builder.poll();
        
        assert_eq!(builder.pending_batches(), 0);
        assert_eq!(builder.panel().unwrap().control_paths(), vec!["a"]);
    }
}
