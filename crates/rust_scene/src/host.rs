//! Host environment interface
//!
//! The host owns the window (or canvas), its event loop and the display
//! refresh. The orchestrator only sees it through [`Host`] and the
//! [`HostEvent`]s the host forwards.

/// Size in logical pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Size {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Size {
    /// Create a size
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
    
    /// Width over height, treating a zero height as one pixel
    pub fn aspect(self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

bitflags::bitflags! {
    /// Pointer buttons held during an event
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u8 {
        /// Left / primary button
        const PRIMARY = 1 << 0;
        /// Right / secondary button
        const SECONDARY = 1 << 1;
        /// Middle / wheel button
        const AUXILIARY = 1 << 2;
    }
}

/// Events the host forwards to [`crate::Orchestrator::handle_event`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HostEvent {
    /// The window was resized
    Resize,
    
    /// Pointer moved over the drawing surface
    PointerMove {
        /// X in surface pixels from the left edge
        client_x: f64,
        /// Y in surface pixels from the top edge
        client_y: f64,
        /// Buttons currently held
        buttons: PointerButtons,
    },
    
    /// A pointer button went down
    PointerDown {
        /// X in surface pixels
        client_x: f64,
        /// Y in surface pixels
        client_y: f64,
        /// The button that changed
        button: PointerButtons,
    },
    
    /// A pointer button went up
    PointerUp {
        /// The button that changed
        button: PointerButtons,
    },
    
    /// Scroll wheel
    Wheel {
        /// Vertical scroll amount; positive zooms out
        delta_y: f64,
    },
}

/// The environment an orchestrator runs in
pub trait Host {
    /// Inner size of the window
    fn window_size(&self) -> Size;
    
    /// Client size of the element the renderer draws into
    fn surface_size(&self) -> Size;
    
    /// Physical pixels per logical pixel
    fn device_pixel_ratio(&self) -> f64;
    
    /// Ask for one more call to [`crate::Orchestrator::tick`] at the next
    /// display refresh
    fn request_animation_frame(&mut self);
}
