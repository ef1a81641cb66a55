//! Shared pan/zoom drag controller.
//!
//! Panning must be reachable from every tool (middle button, modifier
//! drag), so the mechanics live here once and are invoked by the event
//! layer directly instead of being duplicated per handler. The Pan
//! handler itself only contributes the grab cursor.

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Vec2};
use planar_bridge::ViewTransform;

/// Exponent applied per wheel-delta unit when zooming.
const WHEEL_ZOOM_RATE: f64 = 0.0015;

/// Drives the shared view transform from pan drags and wheel zooms.
#[derive(Debug, Clone)]
pub struct PanZoomController {
    view: Rc<RefCell<ViewTransform>>,
    last_screen: Option<Point>,
}

impl PanZoomController {
    pub fn new(view: Rc<RefCell<ViewTransform>>) -> Self {
        Self {
            view,
            last_screen: None,
        }
    }

    /// Begin a pan drag at a canvas-local screen point.
    pub fn begin(&mut self, screen: Point) {
        self.last_screen = Some(screen);
    }

    /// Continue a pan drag. Returns true when the view moved.
    pub fn update(&mut self, screen: Point) -> bool {
        let Some(last) = self.last_screen else {
            return false;
        };
        let delta = Vec2::new(screen.x - last.x, screen.y - last.y);
        if delta.hypot2() == 0.0 {
            return false;
        }
        self.view.borrow_mut().pan(delta);
        self.last_screen = Some(screen);
        true
    }

    /// End the pan drag.
    pub fn end(&mut self) {
        self.last_screen = None;
    }

    pub fn is_panning(&self) -> bool {
        self.last_screen.is_some()
    }

    /// Wheel zoom, keeping the pointer's screen position fixed.
    /// `delta_y` follows the DOM convention: positive = zoom out.
    pub fn wheel_zoom(&mut self, screen: Point, delta_y: f64) {
        let factor = (-delta_y * WHEEL_ZOOM_RATE).exp();
        self.view.borrow_mut().zoom_at(screen, factor);
    }

    /// Current view snapshot.
    pub fn view(&self) -> ViewTransform {
        *self.view.borrow()
    }
}
