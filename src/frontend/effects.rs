//! Lazy images and decorative animations.

use super::elements::{clear_style, set_style};
use super::{App, Listener, Observer};
use crate::error::SetupError;
use crate::reveal::{animate_class, fade_in_delay, magnetic_transform, ANIMATE_THRESHOLD};
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, HtmlImageElement, MouseEvent};

const LAZY_IMAGES: &str = "img[data-src]";
const ANIMATED: &str = "[data-animate]";
const MAGNETIC: &str = ".btn";
const FADE_IN: &str = ".fade-in";

pub fn setup_lazy_images(app: &mut App) -> Result<(), SetupError> {
    let images: Vec<HtmlImageElement> = app.lookup().non_empty(LAZY_IMAGES)?;

    let observer = Observer::new(&[0.0], None, |target, observer| {
        let Ok(image) = target.dyn_into::<HtmlImageElement>() else {
            return;
        };
        if let Some(src) = image.get_attribute("data-src") {
            image.set_src(&src);
        }
        let _ = image.class_list().remove_1("lazy");
        observer.unobserve(&image);
    })?;

    for image in &images {
        observer.observe(image);
    }
    app.observe("lazy-images", observer);
    Ok(())
}

/// Scroll-triggered `animate-*` classes, magnetic buttons and fade-in
/// staggering. Each part is independent of the others' markup.
pub fn setup_animations(app: &mut App) -> Result<(), SetupError> {
    setup_scroll_triggered(app)?;
    setup_magnetic_buttons(app)?;
    stagger_fade_ins(app)
}

fn setup_scroll_triggered(app: &App) -> Result<(), SetupError> {
    let animated: Vec<Element> = app.lookup().all(ANIMATED)?;
    if animated.is_empty() {
        return Ok(());
    }

    let observer = Observer::new(&[ANIMATE_THRESHOLD], None, |target, _| {
        if let Some(class) = target.get_attribute("data-animate").as_deref().and_then(animate_class) {
            let _ = target.class_list().add_1(&class);
        }
    })?;

    for element in &animated {
        observer.observe(element);
    }
    app.observe("animate", observer);
    Ok(())
}

fn setup_magnetic_buttons(app: &App) -> Result<(), SetupError> {
    let buttons: Vec<HtmlElement> = app.lookup().all(MAGNETIC)?;

    for button in buttons {
        let moved = button.clone();
        app.listen(Listener::new(&button, "mousemove", move |event: Event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = moved.get_bounding_client_rect();
            let transform = magnetic_transform(
                (f64::from(event.client_x()), f64::from(event.client_y())),
                (rect.left(), rect.top()),
                (rect.width(), rect.height()),
            );
            set_style(&moved, "transform", &transform);
        })?);

        let left = button.clone();
        app.listen(Listener::new(&button, "mouseleave", move |_| {
            clear_style(&left, "transform");
        })?);
    }

    Ok(())
}

fn stagger_fade_ins(app: &App) -> Result<(), SetupError> {
    let faded: Vec<HtmlElement> = app.lookup().all(FADE_IN)?;
    for (index, element) in faded.iter().enumerate() {
        set_style(element, "animation-delay", &fade_in_delay(index));
    }
    Ok(())
}
