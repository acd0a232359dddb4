//! `VirtualKeyboard`: the browser-facing widget
//!
//! Owns the rendered elements and one `Keyboard`. Every gesture becomes one
//! `Action`; the resulting `Effect` is written back into the DOM. The shared
//! state is never borrowed while the DOM is being updated, because focusing
//! the input or dispatching `submit` re-enters our own listeners.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventInit, HtmlInputElement, KeyboardEvent};

use super::board::{build_board, build_input, caps_label};
use super::keys::{route_key, KeyRoute, Modifiers};
use crate::api::helpers::{deserialize, serialize};
use crate::config::KeyboardOptions;
use crate::engine::{Action, CapsToggle, Effect, EngineState};
use crate::error::KeyboardError;
use crate::keyboard::Keyboard;
use crate::layout::KeyId;
use crate::text::{char_pos_to_utf16, utf16_to_char_pos, Selection};

struct Widget {
    keyboard: Keyboard,
    input: HtmlInputElement,
    labels: HashMap<KeyId, Element>,
    caps_buttons: Vec<(KeyId, Element)>,
}

type Shared = Rc<RefCell<Widget>>;

type Listener = Closure<dyn FnMut(Event)>;

#[wasm_bindgen]
pub struct VirtualKeyboard {
    shared: Shared,
    // Listener closures must outlive the DOM elements they are attached to
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl VirtualKeyboard {
    /// Render a keyboard and its input field into the configured containers
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<VirtualKeyboard, JsValue> {
        let options: KeyboardOptions = if options.is_undefined() || options.is_null() {
            KeyboardOptions::default()
        } else {
            deserialize(options, "Invalid keyboard options")?
        };
        let keyboard = Keyboard::from_options(&options)?;

        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| KeyboardError::Dom("no document available".to_string()))?;
        let input_container = document
            .get_element_by_id(&options.input_container)
            .ok_or_else(|| KeyboardError::MissingElement(options.input_container.clone()))?;
        let board_container = document
            .get_element_by_id(&options.board_container)
            .ok_or_else(|| KeyboardError::MissingElement(options.board_container.clone()))?;

        let input_elements = build_input(&document, &input_container, &options)?;
        let board = build_board(&document, &board_container, &keyboard)?;
        let input = input_elements.input;

        let shared: Shared = Rc::new(RefCell::new(Widget {
            keyboard,
            input: input.clone(),
            labels: board.labels,
            caps_buttons: board.caps_buttons,
        }));

        let mut listeners = Vec::new();

        for (id, button) in &board.buttons {
            let id = *id;
            let state = shared.clone();
            listeners.push(listen(button, "click", move |_| {
                dispatch(&state, |keyboard| keyboard.activate(&id));
            })?);
        }

        let state = shared.clone();
        listeners.push(listen(&input_elements.clear_button, "click", move |_| {
            dispatch(&state, |keyboard| Some(keyboard.apply(&Action::Clear)));
        })?);

        for event in ["focus", "click", "select"] {
            let state = shared.clone();
            listeners.push(listen(&input, event, move |_| sync_focus(&state))?);
        }

        // Clipboard and drag edits bypass the engine
        for event in ["paste", "cut", "drop"] {
            listeners.push(listen(&input, event, |event| event.prevent_default())?);
        }

        let state = shared.clone();
        listeners.push(listen(&input, "input", move |_| restore(&state))?);

        let state = shared.clone();
        listeners.push(listen(&input, "keydown", move |event| {
            if let Some(event) = event.dyn_ref::<KeyboardEvent>() {
                on_keydown(&state, event);
            }
        })?);

        let initial = shared.borrow().keyboard.state();
        reflect(&input, &initial)?;
        log::info!("Virtual keyboard ready ({} keys)", board.buttons.len());

        Ok(VirtualKeyboard {
            shared,
            _listeners: listeners,
        })
    }

    pub fn text(&self) -> String {
        self.shared.borrow().keyboard.engine().text().to_string()
    }

    /// Cursor position in chars
    pub fn cursor(&self) -> usize {
        self.shared.borrow().keyboard.engine().cursor()
    }

    #[wasm_bindgen(js_name = capsLock)]
    pub fn caps_lock(&self) -> bool {
        self.shared.borrow().keyboard.engine().caps().is_upper()
    }

    /// Current engine state as `{text, cursor, selection, capsLock}`
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serialize(&self.shared.borrow().keyboard.state(), "Failed to serialize state")
    }

    /// Run an action given as `{kind, arg}`, exactly as a key press would
    pub fn apply(&self, action: JsValue) -> Result<(), JsValue> {
        let action: Action = deserialize(action, "Invalid action")?;
        dispatch(&self.shared, |keyboard| Some(keyboard.apply(&action)));
        Ok(())
    }
}

fn listen<F>(target: &Element, event: &str, handler: F) -> Result<Listener, JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

/// Apply one operation and present its effect
fn dispatch(shared: &Shared, operation: impl FnOnce(&mut Keyboard) -> Option<Effect>) {
    let (effect, input) = {
        let mut widget = shared.borrow_mut();
        let effect = operation(&mut widget.keyboard);
        (effect, widget.input.clone())
    };
    let Some(effect) = effect else {
        return;
    };
    if let Err(e) = present(shared, &input, &effect) {
        log::error!("Failed to update keyboard view: {:?}", e);
    }
}

fn present(shared: &Shared, input: &HtmlInputElement, effect: &Effect) -> Result<(), JsValue> {
    match effect {
        Effect::Edited(state) => reflect(input, state),
        Effect::Submitted(state) => {
            reflect(input, state)?;
            let init = EventInit::new();
            init.set_bubbles(true);
            let event = Event::new_with_event_init_dict("submit", &init)?;
            input.dispatch_event(&event)?;
            Ok(())
        }
        Effect::CapsToggled(toggle) => relabel(&shared.borrow(), toggle),
    }
}

/// Write engine state into the field and place the native caret
fn reflect(input: &HtmlInputElement, state: &EngineState) -> Result<(), JsValue> {
    if input.value() != state.text {
        input.set_value(&state.text);
    }
    let caret = char_pos_to_utf16(&state.text, state.cursor) as u32;
    input.set_selection_range(caret, caret)?;
    // Focus last: the focus listener reads the caret we just placed
    input.focus()
}

fn relabel(widget: &Widget, toggle: &CapsToggle) -> Result<(), JsValue> {
    for rebinding in &toggle.rebindings {
        if let Some(label) = widget.labels.get(&rebinding.key) {
            label.set_inner_html(&rebinding.label);
        }
    }

    for (id, button) in &widget.caps_buttons {
        let classes = button.class_list();
        if toggle.caps_lock {
            classes.remove_1("off")?;
        } else {
            classes.add_1("off")?;
        }
        if let (Some(label), Some(binding)) = (widget.labels.get(id), widget.keyboard.binding(id)) {
            label.set_inner_html(&caps_label(&binding.label, toggle.caps_lock));
        }
    }
    Ok(())
}

/// Pull the native caret/selection into the engine
fn sync_focus(shared: &Shared) {
    let mut widget = shared.borrow_mut();
    let text = widget.keyboard.engine().text().to_string();

    let start = widget.input.selection_start().ok().flatten();
    let end = widget.input.selection_end().ok().flatten();
    let Some(start) = start else {
        return;
    };
    let start = utf16_to_char_pos(&text, start as usize);
    let selection = end.map(|end| Selection::new(start, utf16_to_char_pos(&text, end as usize)));

    widget.keyboard.set_focus(start, selection);
}

/// Put the engine text back if anything edited the field behind its back
fn restore(shared: &Shared) {
    let (state, input) = {
        let widget = shared.borrow();
        (widget.keyboard.state(), widget.input.clone())
    };
    if input.value() == state.text {
        return;
    }
    log::warn!("input: field diverged from engine, restoring");
    if let Err(e) = reflect(&input, &state) {
        log::error!("Failed to restore keyboard field: {:?}", e);
    }
}

fn on_keydown(shared: &Shared, event: &KeyboardEvent) {
    let modifiers = Modifiers {
        command: event.ctrl_key() || event.meta_key(),
        alt: event.alt_key(),
    };
    match route_key(&event.key(), modifiers) {
        KeyRoute::Pass => {}
        KeyRoute::Block => event.prevent_default(),
        KeyRoute::Dispatch(action) => {
            event.prevent_default();
            dispatch(shared, |keyboard| Some(keyboard.apply(&action)));
        }
    }
}
