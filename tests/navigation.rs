use std::cell::RefCell;
use std::rc::Rc;

use floem_siema::{CarouselConfig, Measurements, Notification, SlideInfo, Slider};

fn five_slides_two_per_page() -> Slider {
    let mut slider = Slider::new(
        CarouselConfig::default()
            .per_page(2usize)
            .threshold(20.0)
            .looping(false)
            .start_index(0),
    );
    slider.mount(Measurements {
        container_width: 600.0,
        viewport_width: 1280.0,
        item_count: 5,
    });
    slider
}

#[test]
fn drag_then_go_to_past_end() {
    let mut slider = five_slides_two_per_page();

    slider.pointer_down(400.0, 200.0);
    slider.pointer_move(390.0, 201.0);
    slider.pointer_move(375.0, 202.0);
    slider.pointer_up();
    assert_eq!(slider.current_slide(), 1);
    assert_eq!(slider.frame().offset, 300.0);

    slider.go_to(10);
    assert_eq!(slider.current_slide(), 4);
    assert_eq!(slider.frame().offset, 1200.0);
}

#[test]
fn non_looping_navigation_never_leaves_page_range() {
    let mut slider = five_slides_two_per_page();
    let steps = [true, true, true, true, true, false, true, false, false, false, false];
    for forward in steps {
        if forward {
            slider.next();
        } else {
            slider.prev();
        }
        assert!(slider.current_slide() <= slider.last_page_start());
    }
    assert_eq!(slider.current_slide(), 0);
}

#[test]
fn callbacks_see_each_change() {
    let log: Rc<RefCell<Vec<String>>> = Rc::default();
    let (init_log, change_log) = (log.clone(), log.clone());
    let mut slider = Slider::new(
        CarouselConfig::default()
            .looping(true)
            .on_init(move |info: &SlideInfo| {
                init_log.borrow_mut().push(format!("init {}", info.current_slide))
            })
            .on_change(move |info: &SlideInfo| {
                change_log.borrow_mut().push(format!("change {}", info.current_slide))
            }),
    );
    slider.mount(Measurements {
        container_width: 300.0,
        viewport_width: 300.0,
        item_count: 3,
    });
    slider.prev();
    slider.next();

    let pending = slider.take_notifications();
    assert!(matches!(pending[0], Notification::Init(_)));
    for notification in &pending {
        notification.dispatch(slider.config());
    }
    assert_eq!(*log.borrow(), vec!["init 0", "change 2", "change 0"]);
}

#[test]
fn config_from_json_drives_slider() {
    let config = CarouselConfig::from_json(
        r#"{ "perPage": { "0": 1, "768": 3 }, "loop": true, "startIndex": 1 }"#,
    )
    .unwrap();
    let mut slider = Slider::new(config);
    slider.mount(Measurements {
        container_width: 900.0,
        viewport_width: 1024.0,
        item_count: 6,
    });
    assert_eq!(slider.per_page(), 3);
    assert_eq!(slider.current_slide(), 1);
    assert_eq!(slider.frame().offset, 300.0);

    slider.next();
    slider.next();
    assert_eq!(slider.current_slide(), 3);
    slider.next();
    assert_eq!(slider.current_slide(), 0);
}
