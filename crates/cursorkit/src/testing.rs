use crate::geometry::Viewport;
use crate::host::{Host, Notify, PointerEvent, Subscription, Visibility};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

type Shared<T> = Rc<RefCell<T>>;

struct Timer {
    period: Duration,
    due: Duration,
    task: Shared<Box<dyn FnMut()>>,
    live: Rc<Cell<bool>>,
}

struct Frame {
    task: Box<dyn FnOnce()>,
    live: Rc<Cell<bool>>,
}

struct Listener<T> {
    handler: Shared<Box<dyn FnMut(T)>>,
    live: Rc<Cell<bool>>,
}

struct Inner {
    origin: Instant,
    elapsed: Duration,
    viewport: Viewport,
    timers: Vec<Timer>,
    frames: Vec<Frame>,
    pointer: Vec<Listener<PointerEvent>>,
    visibility: Vec<Listener<Visibility>>,
}

/// Deterministic host: virtual clock, frames pumped by hand.
#[derive(Clone)]
pub(crate) struct ManualHost {
    inner: Shared<Inner>,
}

fn release_flag(live: &Rc<Cell<bool>>) -> Subscription {
    let live = live.clone();
    Subscription::new(move || live.set(false))
}

impl ManualHost {
    pub(crate) fn new(viewport: Viewport) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                origin: Instant::now(),
                elapsed: Duration::ZERO,
                viewport,
                timers: Vec::new(),
                frames: Vec::new(),
                pointer: Vec::new(),
                visibility: Vec::new(),
            })),
        }
    }

    pub(crate) fn set_viewport(&self, viewport: Viewport) {
        self.inner.borrow_mut().viewport = viewport;
    }

    /// Moves the clock forward, firing timers in due order.
    pub(crate) fn advance(&self, by: Duration) {
        let target = self.inner.borrow().elapsed + by;
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                inner.timers.retain(|t| t.live.get());
                let Some(timer) = inner
                    .timers
                    .iter_mut()
                    .filter(|t| t.due <= target)
                    .min_by_key(|t| t.due)
                else {
                    break;
                };
                let due = timer.due;
                timer.due += timer.period;
                let task = timer.task.clone();
                inner.elapsed = due;
                task
            };
            (next.borrow_mut())();
        }
        self.inner.borrow_mut().elapsed = target;
    }

    /// Runs every frame request that is still live. Returns how many ran.
    pub(crate) fn run_frame(&self) -> usize {
        let frames = std::mem::take(&mut self.inner.borrow_mut().frames);
        let mut ran = 0;
        for frame in frames {
            if frame.live.replace(false) {
                (frame.task)();
                ran += 1;
            }
        }
        ran
    }

    pub(crate) fn pointer(&self, event: PointerEvent) {
        let handlers: Vec<_> = {
            let mut inner = self.inner.borrow_mut();
            inner.pointer.retain(|l| l.live.get());
            inner.pointer.iter().map(|l| l.handler.clone()).collect()
        };
        for handler in handlers {
            (handler.borrow_mut())(event);
        }
    }

    pub(crate) fn visibility(&self, visibility: Visibility) {
        let handlers: Vec<_> = {
            let mut inner = self.inner.borrow_mut();
            inner.visibility.retain(|l| l.live.get());
            inner.visibility.iter().map(|l| l.handler.clone()).collect()
        };
        for handler in handlers {
            (handler.borrow_mut())(visibility);
        }
    }

    pub(crate) fn live_timers(&self) -> usize {
        self.inner.borrow().timers.iter().filter(|t| t.live.get()).count()
    }

    pub(crate) fn pending_frames(&self) -> usize {
        self.inner.borrow().frames.iter().filter(|f| f.live.get()).count()
    }

    pub(crate) fn live_listeners(&self) -> usize {
        let inner = self.inner.borrow();
        inner.pointer.iter().filter(|l| l.live.get()).count()
            + inner.visibility.iter().filter(|l| l.live.get()).count()
    }
}

impl Host for ManualHost {
    fn now(&self) -> Instant {
        let inner = self.inner.borrow();
        inner.origin + inner.elapsed
    }

    fn viewport(&self) -> Viewport {
        self.inner.borrow().viewport
    }

    fn every(&self, period: Duration, task: Box<dyn FnMut()>) -> Subscription {
        let live = Rc::new(Cell::new(true));
        let mut inner = self.inner.borrow_mut();
        let due = inner.elapsed + period;
        inner.timers.push(Timer {
            period,
            due,
            task: Rc::new(RefCell::new(task)),
            live: live.clone(),
        });
        release_flag(&live)
    }

    fn next_frame(&self, task: Box<dyn FnOnce()>) -> Subscription {
        let live = Rc::new(Cell::new(true));
        self.inner.borrow_mut().frames.push(Frame {
            task,
            live: live.clone(),
        });
        release_flag(&live)
    }

    fn pointer_events(&self, handler: Box<dyn FnMut(PointerEvent)>) -> Subscription {
        let live = Rc::new(Cell::new(true));
        self.inner.borrow_mut().pointer.push(Listener {
            handler: Rc::new(RefCell::new(handler)),
            live: live.clone(),
        });
        release_flag(&live)
    }

    fn visibility_events(&self, handler: Box<dyn FnMut(Visibility)>) -> Subscription {
        let live = Rc::new(Cell::new(true));
        self.inner.borrow_mut().visibility.push(Listener {
            handler: Rc::new(RefCell::new(handler)),
            live: live.clone(),
        });
        release_flag(&live)
    }
}

/// Collects notifications so a test can replay them like a message loop.
pub(crate) struct Inbox<T> {
    queue: Shared<Vec<T>>,
}

impl<T: 'static> Inbox<T> {
    pub(crate) fn new() -> Self {
        Self {
            queue: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub(crate) fn notify(&self) -> Notify<T> {
        let queue = self.queue.clone();
        Rc::new(move |input| queue.borrow_mut().push(input))
    }

    pub(crate) fn drain(&self) -> Vec<T> {
        std::mem::take(&mut *self.queue.borrow_mut())
    }
}
