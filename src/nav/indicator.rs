//! Active indicator placement.

use super::NavView;
use std::cell::Cell;
use std::rc::Rc;

/// On-screen geometry of an element, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Horizontal placement of the indicator inside the navigation wrapper.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorPosition {
    pub offset: f64,
    pub width: f64,
}

impl IndicatorPosition {
    /// Places the indicator under `control`, measured from `wrapper`'s left edge.
    pub fn relative_to(control: Rect, wrapper: Rect) -> Self {
        Self {
            offset: control.left - wrapper.left,
            width: control.width,
        }
    }
}

/// How the indicator moves to a new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorMode {
    /// Uses the stylesheet transition
    Animated,
    /// Jumps without a transition (used while the viewport is resizing)
    Immediate,
}

/// Moves the indicator under whichever control is currently targeted.
///
/// Cloned into deferred callbacks; clones share the target, so a callback
/// that fires after a later selection follows the new control.
pub struct IndicatorPositioner<V: NavView> {
    view: Rc<V>,
    target: Rc<Cell<Option<usize>>>,
}

impl<V: NavView> Clone for IndicatorPositioner<V> {
    fn clone(&self) -> Self {
        Self {
            view: self.view.clone(),
            target: self.target.clone(),
        }
    }
}

impl<V: NavView> IndicatorPositioner<V> {
    pub fn new(view: Rc<V>) -> Self {
        Self {
            view,
            target: Rc::new(Cell::new(None)),
        }
    }

    pub fn set_target(&self, index: Option<usize>) {
        self.target.set(index);
    }

    /// Repositions the indicator. No-op when nothing is active or the
    /// geometry is unavailable.
    pub fn move_to_active(&self, mode: IndicatorMode) -> Option<IndicatorPosition> {
        let index = self.target.get()?;
        let control = self.view.control_rect(index)?;
        let wrapper = self.view.wrapper_rect()?;
        let position = IndicatorPosition::relative_to(control, wrapper);
        self.view.place_indicator(position, mode);
        Some(position)
    }
}
