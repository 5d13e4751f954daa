//! Shared component rendering context
//!
//! `ComponentContext` carries the UI metadata a component needs while
//! rendering and handling events, so the `Component` trait stays stable and
//! components do not grow ad-hoc boolean parameters.

/// Context passed to `Component` trait methods describing UI state.
///
/// - `focused`: whether the component currently receives keyboard input.
/// - `busy`: whether a formatting request is in flight.
#[derive(Debug, Clone, Copy)]
pub struct ComponentContext {
    focused: bool,
    busy: bool,
}

impl ComponentContext {
    pub const fn new(focused: bool) -> Self {
        Self {
            focused,
            busy: false,
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn busy(&self) -> bool {
        self.busy
    }

    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub const fn with_busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

impl Default for ComponentContext {
    fn default() -> Self {
        Self::new(false)
    }
}
