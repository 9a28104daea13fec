//! Navigation controls bound to a [`Carousel`]: chevron buttons and a
//! painted page-dot indicator.

use floem::kurbo::{Circle, Rect};
use floem::peniko::Color;
use floem::prelude::*;
use floem::reactive::{create_effect, SignalGet};
use floem::views::Decorators;
use floem::{
    context::{ComputeLayoutCx, EventCx, PaintCx, UpdateCx},
    event::{Event, EventPropagation},
    View, ViewId,
};
use floem_renderer::Renderer;
use lucide_icons::Icon;

use crate::constants;
use crate::view::Carousel;

const ACTIVE: Color = Color::rgb8(60, 60, 60);
const INACTIVE: Color = Color::rgb8(190, 190, 190);

/// Previous/next chevron buttons spread across the available width.
///
/// A button dims when a non-looping carousel cannot move that way.
pub fn nav_buttons(carousel: &Carousel) -> impl IntoView {
    crate::load_icon_font();

    let (back, back_state) = (carousel.clone(), carousel.clone());
    let (forward, forward_state) = (carousel.clone(), carousel.clone());

    h_stack((
        nav_button(Icon::ChevronLeft, move || back_state.can_prev(), move || {
            back.prev()
        }),
        empty().style(|s| s.flex_grow(1.0)),
        nav_button(Icon::ChevronRight, move || forward_state.can_next(), move || {
            forward.next()
        }),
    ))
    .style(|s| s.width_full().items_center().gap(constants::GAP))
}

fn nav_button(
    icon: Icon,
    enabled: impl Fn() -> bool + 'static,
    action: impl Fn() + 'static,
) -> impl IntoView {
    let glyph = icon.unicode().to_string();
    container(label(move || glyph.clone()).style(move |s| {
        let c = if enabled() {
            Color::rgb8(80, 80, 80)
        } else {
            Color::rgb8(200, 200, 200)
        };
        s.font_size(constants::ICON_FONT)
            .font_family("lucide".to_string())
            .color(c)
    }))
    .style(|s| {
        s.size(constants::BUTTON_SIZE, constants::BUTTON_SIZE)
            .items_center()
            .justify_center()
            .border_radius(constants::BUTTON_SIZE / 2.0)
            .cursor(floem::style::CursorStyle::Pointer)
            .hover(|s| s.background(Color::rgb8(230, 230, 230)))
    })
    .on_click_stop(move |_| action())
}

/// X coordinate of dot `index` when `count` dots are centered in `width`.
fn dot_center(index: usize, count: usize, width: f64) -> f64 {
    let span = count.saturating_sub(1) as f64 * constants::DOT_SPACING;
    (width - span) / 2.0 + index as f64 * constants::DOT_SPACING
}

/// Dot under horizontal position `x`, if any.
fn dot_at(x: f64, count: usize, width: f64) -> Option<usize> {
    if count == 0 {
        return None;
    }
    let first = dot_center(0, count, width);
    let slot = ((x - first) / constants::DOT_SPACING).round();
    if slot < 0.0 || slot >= count as f64 {
        return None;
    }
    let index = slot as usize;
    let hit = (x - dot_center(index, count, width)).abs() <= constants::DOT_SPACING / 2.0;
    hit.then_some(index)
}

/// Dot to highlight. Slides past the last page start light the last dot.
fn active_dot(current: usize, count: usize) -> usize {
    current.min(count.saturating_sub(1))
}

enum DotsUpdate {
    Current(usize),
    Count(usize),
}

pub struct PageDots {
    id: ViewId,
    current: usize,
    count: usize,
    carousel: Carousel,
    size: floem::taffy::prelude::Size<f32>,
}

/// Creates a row of page dots; pressing a dot jumps to that page.
pub fn page_dots(carousel: &Carousel) -> PageDots {
    let id = ViewId::new();
    let current = carousel.current_signal();
    let count = carousel.page_count_signal();

    create_effect(move |_| {
        let c = current.get();
        id.update_state(DotsUpdate::Current(c));
    });

    create_effect(move |_| {
        let n = count.get();
        id.update_state(DotsUpdate::Count(n));
    });

    PageDots {
        id,
        current: current.get_untracked(),
        count: count.get_untracked(),
        carousel: carousel.clone(),
        size: Default::default(),
    }
    .style(|s| {
        s.width_full()
            .height(constants::DOT_RADIUS as f32 * 4.0)
            .cursor(floem::style::CursorStyle::Pointer)
    })
}

impl View for PageDots {
    fn id(&self) -> ViewId {
        self.id
    }

    fn update(&mut self, _cx: &mut UpdateCx, state: Box<dyn std::any::Any>) {
        if let Ok(update) = state.downcast::<DotsUpdate>() {
            match *update {
                DotsUpdate::Current(c) => self.current = c,
                DotsUpdate::Count(n) => self.count = n,
            }
            self.id.request_layout();
        }
    }

    fn event_before_children(&mut self, _cx: &mut EventCx, event: &Event) -> EventPropagation {
        match event {
            Event::PointerDown(e) => {
                let width = self.size.width as f64;
                match dot_at(e.pos.x, self.count, width) {
                    Some(index) => {
                        self.carousel.go_to(index as isize);
                        EventPropagation::Stop
                    }
                    None => EventPropagation::Continue,
                }
            }
            _ => EventPropagation::Continue,
        }
    }

    fn compute_layout(&mut self, _cx: &mut ComputeLayoutCx) -> Option<Rect> {
        let layout = self.id.get_layout().unwrap_or_default();
        self.size = layout.size;
        None
    }

    fn paint(&mut self, cx: &mut PaintCx) {
        let w = self.size.width as f64;
        let h = self.size.height as f64;
        if w == 0.0 || h == 0.0 || self.count < 2 {
            return;
        }
        let cy = h / 2.0;
        let active = active_dot(self.current, self.count);
        for i in 0..self.count {
            let dot = Circle::new((dot_center(i, self.count, w), cy), constants::DOT_RADIUS);
            let color = if i == active { ACTIVE } else { INACTIVE };
            cx.fill(&dot, color, 0.0);
        }
    }
}
