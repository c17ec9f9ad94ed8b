//! Loading progress tracking
//!
//! A [`LoadingManager`] counts the items its loaders have requested and
//! finished and reports through optional callbacks. Clones share state, so
//! a loader can hold one and the application another.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type ItemCallback = Box<dyn FnMut(&str, usize, usize)>;

#[derive(Default)]
struct Inner {
    loading: bool,
    loaded: usize,
    total: usize,
    on_start: Option<ItemCallback>,
    on_progress: Option<ItemCallback>,
    on_load: Option<Box<dyn FnMut()>>,
    on_error: Option<Box<dyn FnMut(&str)>>,
}

/// Shared counter of in-flight and finished loads
#[derive(Clone, Default)]
pub struct LoadingManager {
    inner: Rc<RefCell<Inner>>,
}

impl fmt::Debug for LoadingManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("LoadingManager")
            .field("loading", &inner.loading)
            .field("loaded", &inner.loaded)
            .field("total", &inner.total)
            .finish()
    }
}

impl LoadingManager {
    /// Create a manager with no callbacks
    pub fn new() -> Self {
        Self::default()
    }
    
    /// Called with `(url, loaded, total)` when the first item of a batch starts
    pub fn set_on_start(&self, callback: impl FnMut(&str, usize, usize) + 'static) {
        self.inner.borrow_mut().on_start = Some(Box::new(callback));
    }
    
    /// Called with `(url, loaded, total)` after each item finishes
    pub fn set_on_progress(&self, callback: impl FnMut(&str, usize, usize) + 'static) {
        self.inner.borrow_mut().on_progress = Some(Box::new(callback));
    }
    
    /// Called when every requested item has finished
    pub fn set_on_load(&self, callback: impl FnMut() + 'static) {
        self.inner.borrow_mut().on_load = Some(Box::new(callback));
    }
    
    /// Called with the url of an item that failed
    pub fn set_on_error(&self, callback: impl FnMut(&str) + 'static) {
        self.inner.borrow_mut().on_error = Some(Box::new(callback));
    }
    
    /// Record that a loader started on `url`
    pub fn item_start(&self, url: &str) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        inner.total += 1;
        if !inner.loading {
            if let Some(callback) = inner.on_start.as_mut() {
                callback(url, inner.loaded, inner.total);
            }
        }
        inner.loading = true;
    }
    
    /// Record that `url` finished, successfully or not
    pub fn item_end(&self, url: &str) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        inner.loaded += 1;
        if let Some(callback) = inner.on_progress.as_mut() {
            callback(url, inner.loaded, inner.total);
        }
        if inner.loaded == inner.total {
            inner.loading = false;
            if let Some(callback) = inner.on_load.as_mut() {
                callback();
            }
        }
    }
    
    /// Record that `url` failed
    pub fn item_error(&self, url: &str) {
        if let Some(callback) = self.inner.borrow_mut().on_error.as_mut() {
            callback(url);
        }
    }
    
    /// Whether items are still in flight
    pub fn is_loading(&self) -> bool {
        self.inner.borrow().loading
    }
    
    /// `(loaded, total)` item counts
    pub fn counts(&self) -> (usize, usize) {
        let inner = self.inner.borrow();
        (inner.loaded, inner.total)
    }
}
