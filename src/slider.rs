//! Slider core: slide index, layout resolution, and gesture handling.
//!
//! [`Slider`] has no knowledge of Floem. A host feeds it measurements and
//! pointer coordinates and applies the resulting [`Frame`]; callbacks are
//! queued as [`Notification`]s and dispatched by the host once it no longer
//! holds the slider borrowed.

use std::time::Duration;

use tracing::{debug, trace};

use crate::config::{CarouselConfig, Easing};
use crate::drag::{self, AxisLock, DragState, Swipe};

/// Sizes the slider lays itself out against.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurements {
    /// Width of the clipping container (px).
    pub container_width: f64,
    /// Width of the window, used for breakpoint resolution (px).
    pub viewport_width: f64,
    /// Number of slides.
    pub item_count: usize,
}

/// Snapshot handed to lifecycle callbacks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideInfo {
    pub current_slide: usize,
    pub per_page: usize,
    pub item_count: usize,
    pub container_width: f64,
}

/// Animated move applied to the frame offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub duration: Duration,
    pub easing: Easing,
}

/// Geometry the host applies to the sliding frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Frame {
    /// Total frame width (px).
    pub width: f64,
    /// Width of each slide as a percentage of the frame.
    pub item_width_pct: f64,
    /// Horizontal translation (px); positive shifts content left.
    pub offset: f64,
    /// Transition to reach `offset`; `None` while the pointer drags.
    pub transition: Option<Transition>,
}

/// Lifecycle callback due for dispatch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    Init(SlideInfo),
    Change(SlideInfo),
}

impl Notification {
    /// Invoke the matching callback from `config`.
    pub fn dispatch(&self, config: &CarouselConfig) {
        match self {
            Notification::Init(info) => config.on_init.call(info),
            Notification::Change(info) => config.on_change.call(info),
        }
    }
}

/// Carousel state machine.
#[derive(Debug)]
pub struct Slider {
    config: CarouselConfig,
    container_width: f64,
    viewport_width: f64,
    item_count: usize,
    per_page: usize,
    current: usize,
    pointer_down: bool,
    drag: Option<DragState>,
    frame: Frame,
    mounted: bool,
    pending: Vec<Notification>,
}

impl Slider {
    pub fn new(config: CarouselConfig) -> Self {
        Self {
            config,
            container_width: 0.0,
            viewport_width: 0.0,
            item_count: 0,
            per_page: 1,
            current: 0,
            pointer_down: false,
            drag: None,
            frame: Frame::default(),
            mounted: false,
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn current_slide(&self) -> usize {
        self.current
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether a pointer is down and tracking a horizontal gesture.
    pub fn is_dragging(&self) -> bool {
        self.pointer_down
            && self
                .drag
                .is_some_and(|d| d.lock == AxisLock::Horizontal && d.end_x.is_some())
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Index of the first slide on the last page.
    pub fn last_page_start(&self) -> usize {
        self.item_count.saturating_sub(self.per_page)
    }

    pub fn info(&self) -> SlideInfo {
        SlideInfo {
            current_slide: self.current,
            per_page: self.per_page,
            item_count: self.item_count,
            container_width: self.container_width,
        }
    }

    /// Drain callbacks queued since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.pending)
    }

    /// Dispatch queued callbacks directly. Hosts that share the slider behind
    /// a `RefCell` should use [`Slider::take_notifications`] instead.
    pub fn flush_notifications(&mut self) {
        for notification in self.take_notifications() {
            notification.dispatch(&self.config);
        }
    }

    /// First layout: start at the configured index, lay out, and fire the
    /// init callback.
    pub fn mount(&mut self, measurements: Measurements) {
        self.current = self.config.start_index;
        self.init(measurements);
        self.reset_drag();
        self.mounted = true;
        debug!(
            items = self.item_count,
            per_page = self.per_page,
            current = self.current,
            "carousel mounted"
        );
    }

    /// Replace the configuration and lay out again, keeping the current
    /// slide.
    pub fn update(&mut self, config: CarouselConfig, measurements: Measurements) {
        let was_draggable = self.config.draggable;
        self.config = config;
        self.init(measurements);
        if self.config.draggable != was_draggable {
            self.reset_drag();
        }
        debug!(draggable = self.config.draggable, "carousel config updated");
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.pointer_down = false;
        if let Some(drag) = self.drag.as_mut() {
            drag.clear();
        }
        debug!("carousel unmounted");
    }

    fn reset_drag(&mut self) {
        self.pointer_down = false;
        self.drag = self.config.draggable.then(DragState::default);
    }

    fn init(&mut self, measurements: Measurements) {
        self.container_width = measurements.container_width;
        self.viewport_width = measurements.viewport_width;
        self.item_count = measurements.item_count;
        self.resolve_per_page();
        self.current = self.current.min(self.item_count.saturating_sub(1));

        self.frame.width = self.frame_width();
        self.frame.item_width_pct = if self.item_count == 0 {
            0.0
        } else {
            100.0 / self.item_count as f64
        };
        self.frame.transition = Some(self.transition());
        self.slide_to_current();

        self.pending.push(Notification::Init(self.info()));
    }

    /// Re-resolve the per-page count and frame width after the window or
    /// container changed size.
    pub fn resize(&mut self, container_width: f64, viewport_width: f64) {
        self.viewport_width = viewport_width;
        self.resolve_per_page();
        self.container_width = container_width;
        self.current = self.current.min(self.item_count.saturating_sub(1));
        self.frame.width = self.frame_width();
        self.slide_to_current();
        debug!(
            container_width,
            viewport_width,
            per_page = self.per_page,
            "carousel resized"
        );
    }

    fn resolve_per_page(&mut self) {
        // Zero would divide the container width by zero.
        self.per_page = self.config.per_page.resolve(self.viewport_width).max(1);
    }

    fn slide_width(&self) -> f64 {
        self.container_width / self.per_page as f64
    }

    fn frame_width(&self) -> f64 {
        self.slide_width() * self.item_count as f64
    }

    fn transition(&self) -> Transition {
        Transition {
            duration: self.config.duration(),
            easing: self.config.easing,
        }
    }

    fn slide_to_current(&mut self) {
        self.frame.offset = (self.current as f64 * self.slide_width()).round();
    }

    fn changed(&mut self) {
        self.slide_to_current();
        self.pending.push(Notification::Change(self.info()));
        debug!(current = self.current, "slide changed");
    }

    /// Go back one slide, wrapping to the last page when looping.
    pub fn prev(&mut self) {
        if self.current == 0 && self.config.looping {
            self.current = self.last_page_start();
        } else {
            self.current = self.current.saturating_sub(1);
        }
        self.changed();
    }

    /// Go forward one slide, wrapping to the first when looping.
    pub fn next(&mut self) {
        let last = self.last_page_start();
        if self.current == last && self.config.looping {
            self.current = 0;
        } else {
            self.current = (self.current + 1).min(last);
        }
        self.changed();
    }

    /// Jump to `index`, clamped to the range of slides.
    ///
    /// Unlike [`Slider::next`], the upper bound is the last slide rather than
    /// the start of the last page.
    pub fn go_to(&mut self, index: isize) {
        let last = self.item_count.saturating_sub(1);
        self.current = usize::try_from(index).unwrap_or(0).min(last);
        self.changed();
    }

    /// Pointer pressed at (`x`, `y`). Returns whether the event was consumed.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        self.pointer_down = true;
        drag.begin(x, y);
        trace!(x, y, "drag start");
        true
    }

    /// Pointer moved to (`x`, `y`). Returns whether the event was consumed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        if !self.pointer_down {
            return false;
        }
        let Some(drag) = self.drag.as_mut() else {
            return false;
        };
        let lock = drag.lock_axis(x, y);
        if !drag.track(x) {
            trace!(?lock, "gesture ignored");
            return true;
        }
        let pull = drag.pull();
        self.frame.transition = None;
        self.frame.offset = self.current as f64 * self.slide_width() + pull;
        trace!(x, offset = self.frame.offset, "drag move");
        true
    }

    /// Pointer released. Returns whether the event was consumed.
    pub fn pointer_up(&mut self) -> bool {
        if self.drag.is_none() {
            return false;
        }
        self.pointer_down = false;
        self.finish_gesture();
        true
    }

    /// Pointer left the carousel. Ends a gesture in progress like a release.
    pub fn pointer_leave(&mut self) -> bool {
        if self.drag.is_none() || !self.pointer_down {
            return false;
        }
        self.pointer_down = false;
        self.finish_gesture();
        true
    }

    fn finish_gesture(&mut self) {
        self.frame.transition = Some(self.transition());
        let displacement = self.drag.as_ref().and_then(DragState::displacement);
        if let Some(displacement) = displacement {
            match drag::classify(displacement, self.config.threshold) {
                Swipe::Prev => self.prev(),
                Swipe::Next => self.next(),
                Swipe::Stay => {}
            }
            trace!(displacement, current = self.current, "drag end");
            self.slide_to_current();
        }
        if let Some(drag) = self.drag.as_mut() {
            drag.clear();
        }
    }
}
