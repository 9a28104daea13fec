//! # floem-siema
//!
//! A draggable, paged carousel widget for [Floem](https://github.com/lapce/floem).
//!
//! Slides are laid out in a horizontal frame that moves one slide per
//! navigation. Several slides can be visible at once, either as a fixed count
//! or per viewport-width breakpoint. Pointer drags move the frame 1:1 and
//! snap to the neighbouring slide once they pass a distance threshold.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use floem::prelude::*;
//! use floem_siema::{carousel, Carousel, CarouselConfig};
//!
//! let handle = Carousel::new(CarouselConfig::default().per_page(2usize).looping(true));
//! let slides = (1..=5).map(|i| label(move || format!("Slide {i}")));
//! // Use `carousel(&handle, slides)` in your Floem view tree and call
//! // `handle.next()` / `handle.prev()` / `handle.go_to(i)` to navigate.
//! ```
//!
//! The gesture and index logic lives in [`Slider`], which has no Floem
//! dependency and can be driven directly.

mod config;
mod constants;
#[cfg(feature = "controls")]
mod controls;
mod drag;
mod math;
mod resize;
mod slider;
mod view;

pub use config::{Callback, CarouselConfig, ConfigError, Easing, PerPage};
#[cfg(feature = "controls")]
pub use controls::{nav_buttons, page_dots, PageDots};
pub use drag::{AxisLock, DragState, Swipe};
pub use math::SlideAnimation;
pub use resize::{Debouncer, ListenerId, ResizeHandler, ResizeListeners, ResizeSource};
pub use slider::{Frame, Measurements, Notification, SlideInfo, Slider, Transition};
pub use view::{carousel, Carousel};

#[cfg(feature = "controls")]
static LOAD_LUCIDE_FONT: std::sync::Once = std::sync::Once::new();

#[cfg(feature = "controls")]
fn load_icon_font() {
    LOAD_LUCIDE_FONT.call_once(|| {
        floem::text::FONT_SYSTEM
            .lock()
            .db_mut()
            .load_font_data(lucide_icons::LUCIDE_FONT_BYTES.to_vec());
    });
}
