use cursorkit::{Host, Point, PointerEvent, Subscription, Viewport, Visibility};
use gtk::prelude::*;
use gtk4 as gtk;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Main-loop timers, frame-clock ticks and event controllers for the
/// controllers in `cursorkit`.
///
/// Pointer tracking happens on `surface` (the overlay holding the canvas and
/// the sidebar), so its allocation is the viewport. Frames ride the canvas
/// frame clock.
#[derive(Clone)]
pub struct GtkHost {
    window: gtk::ApplicationWindow,
    surface: gtk::Overlay,
    canvas: gtk::DrawingArea,
}

impl GtkHost {
    pub fn new(
        window: gtk::ApplicationWindow,
        surface: gtk::Overlay,
        canvas: gtk::DrawingArea,
    ) -> Self {
        Self {
            window,
            surface,
            canvas,
        }
    }
}

impl Host for GtkHost {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn viewport(&self) -> Viewport {
        Viewport::new(self.surface.width() as f64, self.surface.height() as f64)
    }

    fn every(&self, period: Duration, mut task: Box<dyn FnMut()>) -> Subscription {
        let id = glib::timeout_add_local(period, move || {
            task();
            glib::ControlFlow::Continue
        });
        Subscription::new(move || id.remove())
    }

    fn next_frame(&self, task: Box<dyn FnOnce()>) -> Subscription {
        let fired = Rc::new(Cell::new(false));
        let task = RefCell::new(Some(task));

        let flag = fired.clone();
        let id = self.canvas.add_tick_callback(move |_, _| {
            flag.set(true);
            if let Some(task) = task.borrow_mut().take() {
                task();
            }
            glib::ControlFlow::Break
        });
        // a tick callback that returned Break is already gone
        Subscription::new(move || {
            if !fired.get() {
                id.remove();
            }
        })
    }

    fn pointer_events(&self, handler: Box<dyn FnMut(PointerEvent)>) -> Subscription {
        let handler = Rc::new(RefCell::new(handler));
        let motion = gtk::EventControllerMotion::new();

        let on_motion = handler.clone();
        motion.connect_motion(move |_, x, y| {
            (on_motion.borrow_mut())(PointerEvent::Moved(Point::new(x, y)));
        });
        motion.connect_leave(move |_| {
            (handler.borrow_mut())(PointerEvent::Left);
        });

        self.surface.add_controller(motion.clone());
        let surface = self.surface.clone();
        Subscription::new(move || surface.remove_controller(&motion))
    }

    fn visibility_events(&self, handler: Box<dyn FnMut(Visibility)>) -> Subscription {
        let handler = RefCell::new(handler);
        let id = self.window.connect_suspended_notify(move |window| {
            let visibility = if window.is_suspended() {
                Visibility::Hidden
            } else {
                Visibility::Visible
            };
            (handler.borrow_mut())(visibility);
        });
        let window = self.window.clone();
        Subscription::new(move || window.disconnect(id))
    }
}
