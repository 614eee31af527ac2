use super::elements::{all_within, set_style, within};
use super::schedule::{after, run_frames};
use super::{App, Listener, Observer};
use crate::error::SetupError;
use crate::loading::stagger_delay;
use crate::reveal::{
    parallax_transform, parse_percentage, CounterAnimation, REVEAL_CHILDREN, REVEAL_ROOT_MARGIN,
    REVEAL_TARGETS, REVEAL_THRESHOLDS, SKILL_THRESHOLD,
};
use crate::timing::throttled;
use web_sys::{Element, Event, HtmlElement};

const HERO: &str = ".hero-section";
const SKILL_ITEMS: &str = ".skill-item";
const SKILL_PROGRESS: &str = ".skill-progress";
const SKILL_PERCENTAGE: &str = ".skill-percentage";

pub fn setup_scroll_reveal(app: &mut App) -> Result<(), SetupError> {
    let targets: Vec<Element> = app.lookup().non_empty(REVEAL_TARGETS)?;
    let stagger_ms = app.config().reveal_stagger_ms;

    let observer = Observer::new(&REVEAL_THRESHOLDS, Some(REVEAL_ROOT_MARGIN), move |target, _| {
        let _ = target.class_list().add_1("visible");
        let children: Vec<Element> = all_within(&target, REVEAL_CHILDREN);
        for (index, child) in children.into_iter().enumerate() {
            after(stagger_delay(index, stagger_ms), move || {
                let _ = child.class_list().add_1("visible");
            });
        }
    })?;

    for target in &targets {
        let _ = target.class_list().add_1("fade-in");
        observer.observe(target);
    }
    app.observe("scroll", observer);

    setup_parallax(app)
}

/// Optional: pages without a hero keep the reveal effect.
fn setup_parallax(app: &App) -> Result<(), SetupError> {
    let Some(hero) = app.lookup().optional::<HtmlElement>(HERO)? else {
        return Ok(());
    };

    let window = app.window().clone();
    let rate = app.config().parallax_rate;
    let on_scroll = throttled(app.config().scroll_throttle_ms, move |_: Event| {
        let scroll_y = window.scroll_y().unwrap_or(0.0);
        set_style(&hero, "transform", &parallax_transform(scroll_y, rate));
    });
    app.listen(Listener::passive(app.window(), "scroll", on_scroll)?);
    Ok(())
}

pub fn setup_skill_bars(app: &mut App) -> Result<(), SetupError> {
    let items: Vec<Element> = app.lookup().non_empty(SKILL_ITEMS)?;
    let bar_delay_ms = app.config().skill_bar_delay_ms;
    let counter_ms = app.config().counter_duration_ms;

    let observer = Observer::new(&[SKILL_THRESHOLD], None, move |item, observer| {
        observer.unobserve(&item);
        animate_skill(&item, bar_delay_ms, counter_ms);
    })?;

    for item in &items {
        observer.observe(item);
    }
    app.observe("skills", observer);
    Ok(())
}

fn animate_skill(item: &Element, bar_delay_ms: u32, counter_ms: u32) {
    let Ok(progress) = within::<HtmlElement>(item, SKILL_PROGRESS) else {
        return;
    };
    let Some(target) = progress
        .get_attribute("data-width")
        .as_deref()
        .and_then(parse_percentage)
    else {
        return;
    };

    after(bar_delay_ms, move || {
        set_style(&progress, "width", &format!("{target}%"));
    });

    if let Ok(label) = within::<Element>(item, SKILL_PERCENTAGE) {
        let counter = CounterAnimation::new(0, target, counter_ms);
        run_frames(move |elapsed| {
            label.set_text_content(Some(&counter.label_at(elapsed)));
            !counter.is_done(elapsed)
        });
    }
}
