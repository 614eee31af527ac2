use super::elements::Lookup;
use super::{App, Listener};
use crate::error::SetupError;
use crate::menu::{MenuEffect, MenuState};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event, HtmlElement, KeyboardEvent, Node};

const TRIGGER: &str = ".hamburger";
const MENU: &str = ".nav-menu";
const ACTIVE_CLASS: &str = "active";

struct MenuView {
    trigger: HtmlElement,
    menu: HtmlElement,
}

impl MenuView {
    fn lookup(lookup: &Lookup<'_>) -> Result<Self, SetupError> {
        Ok(Self {
            trigger: lookup.one(TRIGGER)?,
            menu: lookup.one(MENU)?,
        })
    }

    /// The markup's `active` class is the source of truth.
    fn state(&self) -> MenuState {
        MenuState::with_open(self.menu.class_list().contains(ACTIVE_CLASS))
    }

    fn apply(&self, effect: MenuEffect, state: MenuState) {
        if effect == MenuEffect::None {
            return;
        }

        let open = state.is_open();
        let _ = self.trigger.class_list().toggle_with_force(ACTIVE_CLASS, open);
        let _ = self.menu.class_list().toggle_with_force(ACTIVE_CLASS, open);
        let _ = self.trigger.set_attribute("aria-expanded", state.aria_expanded());

        if effect == MenuEffect::ClosedAndRefocus {
            let _ = self.trigger.focus();
        }
    }

    fn update(&self, event: impl FnOnce(&mut MenuState) -> MenuEffect) {
        let mut state = self.state();
        let effect = event(&mut state);
        self.apply(effect, state);
    }

    fn contains(&self, target: Option<&Node>) -> bool {
        self.trigger.contains(target) || self.menu.contains(target)
    }
}

/// Closes the menu if the page has one. Used after in-page navigation.
pub fn close_menu(document: &Document) {
    if let Ok(view) = MenuView::lookup(&Lookup::new(document)) {
        view.update(MenuState::close);
    }
}

pub fn setup(app: &mut App) -> Result<(), SetupError> {
    let view = Rc::new(MenuView::lookup(&app.lookup())?);
    let _ = view
        .trigger
        .set_attribute("aria-expanded", view.state().aria_expanded());

    let on_toggle = Rc::clone(&view);
    app.listen(Listener::new(&view.trigger, "click", move |_| {
        on_toggle.update(MenuState::toggle);
    })?);

    let on_outside = Rc::clone(&view);
    app.listen(Listener::new(app.document(), "click", move |event: Event| {
        let target = event.target();
        let node = target.as_ref().and_then(|target| target.dyn_ref::<Node>());
        if !on_outside.contains(node) {
            on_outside.update(MenuState::click_outside);
        }
    })?);

    let on_key = Rc::clone(&view);
    app.listen(Listener::new(app.document(), "keydown", move |event: Event| {
        if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
            let key = event.key();
            on_key.update(|state| state.key(&key));
        }
    })?);

    Ok(())
}
