//! Standalone demo: opens a window with a three-up carousel and controls.
//!
//! Run with `RUST_LOG=floem_siema=debug` to see navigation logs.

use floem::prelude::*;
use floem::window::WindowConfig;
use floem_siema::{carousel, nav_buttons, page_dots, Carousel, CarouselConfig, PerPage};
use tracing_subscriber::EnvFilter;

const COLORS: [(u8, u8, u8); 6] = [
    (239, 68, 68),
    (249, 115, 22),
    (234, 179, 8),
    (34, 197, 94),
    (59, 130, 246),
    (168, 85, 247),
];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let per_page: PerPage = [(0, 1), (500, 2), (800, 3)].into_iter().collect();
    let handle = Carousel::new(
        CarouselConfig::default()
            .per_page(per_page)
            .looping(true)
            .on_change(|info| tracing::info!(slide = info.current_slide, "changed")),
    );

    floem::Application::new()
        .window(
            move |_| {
                let slides = COLORS.iter().enumerate().map(|(i, &(r, g, b))| {
                    container(label(move || format!("{}", i + 1)).style(|s| {
                        s.font_size(32.0).color(Color::WHITE)
                    }))
                    .style(move |s| {
                        s.height(200.0)
                            .items_center()
                            .justify_center()
                            .background(Color::rgb8(r, g, b))
                    })
                });

                v_stack((
                    carousel(&handle, slides),
                    nav_buttons(&handle),
                    page_dots(&handle),
                ))
                .style(|s| s.size_full().gap(8.0).padding(8.0))
                .on_event_stop(floem::event::EventListener::WindowClosed, |_| {
                    floem::quit_app()
                })
            },
            Some(
                WindowConfig::default()
                    .size((720.0, 320.0))
                    .title("floem-siema"),
            ),
        )
        .run();
}
