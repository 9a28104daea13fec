//! Floem carousel view and its controller handle.
//!
//! The view is a clipped container around a horizontal frame of slides. The
//! frame's width and left margin are bound to signals that [`Carousel`]
//! updates from the [`Slider`] core; offsets are animated with Floem timers.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Instant;

use floem::action::exec_after;
use floem::event::{Event, EventListener, EventPropagation};
use floem::prelude::*;
use floem::reactive::{RwSignal, SignalGet, SignalUpdate};
use floem::views::{clip, h_stack_from_iter, Decorators};
use floem::AnyView;
use tracing::debug;

use crate::config::CarouselConfig;
use crate::constants;
use crate::math::SlideAnimation;
use crate::resize::{Debouncer, ListenerId, ResizeListeners, ResizeSource};
use crate::slider::{Measurements, Slider, Transition};

struct Inner {
    slider: RefCell<Slider>,
    resize_source: Rc<dyn ResizeSource>,
    /// Set when the carousel owns its source; fed from `WindowResized`.
    window_listeners: Option<ResizeListeners>,
    listener: Cell<Option<ListenerId>>,
    debouncer: RefCell<Debouncer<f64>>,
    animation: RefCell<Option<SlideAnimation>>,
    animation_generation: Cell<u64>,
    container_width: Cell<f64>,
    viewport_width: Cell<Option<f64>>,
    item_count: Cell<usize>,
    offset: RwSignal<f64>,
    frame_width: RwSignal<f64>,
    item_width_pct: RwSignal<f64>,
    current: RwSignal<usize>,
    page_count: RwSignal<usize>,
    looping: RwSignal<bool>,
    draggable: RwSignal<bool>,
}

/// Handle to a carousel: navigation, configuration updates, and teardown.
///
/// Clones refer to the same carousel.
#[derive(Clone)]
pub struct Carousel {
    inner: Rc<Inner>,
}

impl Carousel {
    /// Creates a carousel that listens to its own window's resize events.
    pub fn new(config: CarouselConfig) -> Self {
        let listeners = ResizeListeners::new();
        Self::build(config, Rc::new(listeners.clone()), Some(listeners))
    }

    /// Creates a carousel driven by an external resize source.
    pub fn with_resize_source(config: CarouselConfig, source: Rc<dyn ResizeSource>) -> Self {
        Self::build(config, source, None)
    }

    fn build(
        config: CarouselConfig,
        resize_source: Rc<dyn ResizeSource>,
        window_listeners: Option<ResizeListeners>,
    ) -> Self {
        let looping = RwSignal::new(config.looping);
        let draggable = RwSignal::new(config.draggable);
        let debouncer = Debouncer::new(config.resize_debounce());
        Self {
            inner: Rc::new(Inner {
                slider: RefCell::new(Slider::new(config)),
                resize_source,
                window_listeners,
                listener: Cell::new(None),
                debouncer: RefCell::new(debouncer),
                animation: RefCell::new(None),
                animation_generation: Cell::new(0),
                container_width: Cell::new(0.0),
                viewport_width: Cell::new(None),
                item_count: Cell::new(0),
                offset: RwSignal::new(0.0),
                frame_width: RwSignal::new(0.0),
                item_width_pct: RwSignal::new(0.0),
                current: RwSignal::new(0),
                page_count: RwSignal::new(1),
                looping,
                draggable,
            }),
        }
    }

    pub fn prev(&self) {
        self.inner.navigate(Slider::prev);
    }

    pub fn next(&self) {
        self.inner.navigate(Slider::next);
    }

    /// Jump to `index`, clamped to the range of slides.
    pub fn go_to(&self, index: isize) {
        self.inner.navigate(|slider| slider.go_to(index));
    }

    pub fn current_slide(&self) -> usize {
        self.inner.slider.borrow().current_slide()
    }

    pub fn per_page(&self) -> usize {
        self.inner.slider.borrow().per_page()
    }

    pub fn item_count(&self) -> usize {
        self.inner.slider.borrow().item_count()
    }

    /// Reactive current slide index.
    pub fn current_signal(&self) -> RwSignal<usize> {
        self.inner.current
    }

    /// Reactive number of reachable page starts.
    pub fn page_count_signal(&self) -> RwSignal<usize> {
        self.inner.page_count
    }

    /// Whether `prev` would move. Tracks signals when called reactively.
    pub fn can_prev(&self) -> bool {
        self.inner.looping.get() || self.inner.current.get() > 0
    }

    /// Whether `next` would move. Tracks signals when called reactively.
    ///
    /// After `go_to` past the last page start, `next` moves back onto it.
    pub fn can_next(&self) -> bool {
        let last_page_start = self.inner.page_count.get().saturating_sub(1);
        self.inner.looping.get() || self.inner.current.get() != last_page_start
    }

    /// Replace the configuration, re-laying out the mounted carousel.
    pub fn set_config(&self, config: CarouselConfig) {
        let inner = &self.inner;
        inner.looping.set(config.looping);
        inner.draggable.set(config.draggable);
        inner
            .debouncer
            .borrow_mut()
            .set_delay(config.resize_debounce());
        {
            let mut slider = inner.slider.borrow_mut();
            if slider.is_mounted() {
                slider.update(config, inner.measurements());
            } else {
                *slider = Slider::new(config);
            }
        }
        inner.sync();
        inner.dispatch();
    }

    /// Deregister the resize handler and stop pending timers. Safe to call
    /// more than once.
    pub fn unmount(&self) {
        let inner = &self.inner;
        if let Some(id) = inner.listener.take() {
            inner.resize_source.unsubscribe(id);
        }
        inner.debouncer.borrow_mut().cancel();
        inner.stop_animation();
        inner.slider.borrow_mut().unmount();
    }

    fn container_resized(&self, width: f64) {
        let inner = &self.inner;
        inner.container_width.set(width);
        if inner.slider.borrow().is_mounted() || inner.listener.get().is_some() {
            return;
        }
        inner.mount();
    }

    /// Record the window width and, when the carousel owns its resize
    /// source, forward it to the subscribed handler. The startup event can
    /// arrive before the first layout has subscribed anything.
    fn window_resized(&self, width: f64) {
        self.inner.viewport_width.set(Some(width));
        if let Some(listeners) = &self.inner.window_listeners {
            listeners.emit(width);
        }
    }

    /// Run a pointer handler; re-syncs only when the slider consumed it.
    fn pointer(&self, f: impl FnOnce(&mut Slider) -> bool) -> bool {
        let consumed = f(&mut self.inner.slider.borrow_mut());
        if consumed {
            self.inner.sync();
            self.inner.dispatch();
        }
        consumed
    }
}

impl Inner {
    fn measurements(&self) -> Measurements {
        let container_width = self.container_width.get();
        Measurements {
            container_width,
            viewport_width: self.viewport_width.get().unwrap_or(container_width),
            item_count: self.item_count.get(),
        }
    }

    fn mount(self: &Rc<Self>) {
        self.slider.borrow_mut().mount(self.measurements());
        // The first layout lands directly on the start slide.
        let offset = self.slider.borrow().frame().offset;
        self.offset.set(offset);
        self.sync();

        let weak = Rc::downgrade(self);
        let id = self.resize_source.subscribe(Rc::new(move |width: f64| {
            if let Some(inner) = weak.upgrade() {
                inner.schedule_resize(width);
            }
        }));
        self.listener.set(Some(id));
        self.dispatch();
    }

    fn schedule_resize(self: &Rc<Self>, viewport_width: f64) {
        self.viewport_width.set(Some(viewport_width));
        let (generation, delay) = {
            let mut debouncer = self.debouncer.borrow_mut();
            let generation = debouncer.trigger(Instant::now(), viewport_width);
            (generation, debouncer.delay())
        };
        let weak = Rc::downgrade(self);
        exec_after(delay, move |_| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let width = inner.debouncer.borrow_mut().fire(generation);
            if let Some(width) = width {
                inner.apply_resize(width);
            }
        });
    }

    fn apply_resize(self: &Rc<Self>, viewport_width: f64) {
        {
            let mut slider = self.slider.borrow_mut();
            if !slider.is_mounted() {
                return;
            }
            slider.resize(self.container_width.get(), viewport_width);
        }
        self.sync();
    }

    fn navigate(self: &Rc<Self>, f: impl FnOnce(&mut Slider)) {
        f(&mut self.slider.borrow_mut());
        self.sync();
        self.dispatch();
    }

    /// Fire queued callbacks with no borrow of the slider held, so they may
    /// call back into the carousel.
    fn dispatch(&self) {
        let (notifications, config) = {
            let mut slider = self.slider.borrow_mut();
            (slider.take_notifications(), slider.config().clone())
        };
        for notification in notifications {
            notification.dispatch(&config);
        }
    }

    /// Push slider state out to the view's signals.
    fn sync(self: &Rc<Self>) {
        let (frame, current, pages) = {
            let slider = self.slider.borrow();
            (
                slider.frame(),
                slider.current_slide(),
                slider.last_page_start() + 1,
            )
        };
        if self.frame_width.get_untracked() != frame.width {
            self.frame_width.set(frame.width);
        }
        if self.item_width_pct.get_untracked() != frame.item_width_pct {
            self.item_width_pct.set(frame.item_width_pct);
        }
        if self.current.get_untracked() != current {
            self.current.set(current);
        }
        if self.page_count.get_untracked() != pages {
            self.page_count.set(pages);
        }

        match frame.transition {
            Some(transition) if !transition.duration.is_zero() => {
                self.animate_to(frame.offset, transition)
            }
            _ => {
                self.stop_animation();
                self.offset.set(frame.offset);
            }
        }
    }

    fn animate_to(self: &Rc<Self>, target: f64, transition: Transition) {
        let running_target = self.animation.borrow().as_ref().map(SlideAnimation::target);
        if running_target == Some(target) {
            return;
        }
        let from = self.offset.get_untracked();
        if running_target.is_none() && from == target {
            return;
        }
        debug!(from, target, "animating slide");
        *self.animation.borrow_mut() =
            Some(SlideAnimation::new(from, target, Instant::now(), transition));
        let generation = self.animation_generation.get() + 1;
        self.animation_generation.set(generation);
        self.schedule_tick(generation);
    }

    fn schedule_tick(self: &Rc<Self>, generation: u64) {
        let weak: Weak<Self> = Rc::downgrade(self);
        exec_after(constants::FRAME_INTERVAL, move |_| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.animation_generation.get() != generation {
                return;
            }
            let sample = inner
                .animation
                .borrow()
                .as_ref()
                .map(|anim| anim.sample(Instant::now()));
            let Some((offset, finished)) = sample else {
                return;
            };
            inner.offset.set(offset);
            if finished {
                *inner.animation.borrow_mut() = None;
            } else {
                inner.schedule_tick(generation);
            }
        });
    }

    fn stop_animation(&self) {
        self.animation_generation
            .set(self.animation_generation.get() + 1);
        *self.animation.borrow_mut() = None;
    }
}

/// Creates the carousel view for `slides`, controlled through `handle`.
///
/// The carousel mounts on its first layout and unmounts when the view is
/// removed from the tree.
pub fn carousel<V, I>(handle: &Carousel, slides: I) -> impl IntoView
where
    I: IntoIterator<Item = V>,
    V: IntoView + 'static,
{
    let slides: Vec<AnyView> = slides.into_iter().map(IntoView::into_any).collect();
    handle.inner.item_count.set(slides.len());

    let item_width_pct = handle.inner.item_width_pct;
    let frame_width = handle.inner.frame_width;
    let offset = handle.inner.offset;
    let draggable = handle.inner.draggable;

    let frame = h_stack_from_iter(slides.into_iter().map(move |slide| {
        slide.style(move |s| s.width_pct(item_width_pct.get()).flex_shrink(0.0))
    }))
    .style(move |s| s.width(frame_width.get()).margin_left(-offset.get()));

    let (on_size, on_window, on_cleanup) = (handle.clone(), handle.clone(), handle.clone());
    let (down, moved, up, left) = (
        handle.clone(),
        handle.clone(),
        handle.clone(),
        handle.clone(),
    );

    clip(frame)
        .style(move |s| {
            let s = s.width_full();
            if draggable.get() {
                s.cursor(floem::style::CursorStyle::Pointer)
            } else {
                s
            }
        })
        .on_resize(move |rect| on_size.container_resized(rect.width()))
        .on_event_cont(EventListener::WindowResized, move |e| {
            if let Event::WindowResized(size) = e {
                on_window.window_resized(size.width);
            }
        })
        .on_event(EventListener::PointerDown, move |e| {
            if let Event::PointerDown(pe) = e {
                if down.pointer(|s| s.pointer_down(pe.pos.x, pe.pos.y)) {
                    return EventPropagation::Stop;
                }
            }
            EventPropagation::Continue
        })
        .on_event(EventListener::PointerMove, move |e| {
            if let Event::PointerMove(pe) = e {
                if moved.pointer(|s| s.pointer_move(pe.pos.x, pe.pos.y)) {
                    return EventPropagation::Stop;
                }
            }
            EventPropagation::Continue
        })
        .on_event(EventListener::PointerUp, move |_| {
            if up.pointer(Slider::pointer_up) {
                EventPropagation::Stop
            } else {
                EventPropagation::Continue
            }
        })
        .on_event_cont(EventListener::PointerLeave, move |_| {
            left.pointer(Slider::pointer_leave);
        })
        .on_cleanup(move || {
            debug!("carousel view removed");
            on_cleanup.unmount();
        })
}
