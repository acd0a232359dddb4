//! Board and input element construction
//!
//! Produces the markup:
//!
//! ```text
//! div.board
//!   div.character-set.<set name>
//!     div.flex-row
//!       div.button[.<style tag>]
//!         div.key  (label)
//! ```

use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

use crate::config::KeyboardOptions;
use crate::engine::Action;
use crate::keyboard::Keyboard;
use crate::layout::KeyId;

/// Elements created for the board, addressed by key
pub struct BoardElements {
    pub board: Element,
    /// The clickable `.button` of each key
    pub buttons: HashMap<KeyId, Element>,
    /// The `.key` label holder of each key
    pub labels: HashMap<KeyId, Element>,
    /// Buttons bound to the caps toggle
    pub caps_buttons: Vec<(KeyId, Element)>,
}

/// Elements created for the text field
pub struct InputElements {
    pub input: HtmlInputElement,
    pub clear_button: Element,
}

/// Caps key label for the given state
///
/// The caps-off icon replaces the caps icon; other labels are kept.
pub fn caps_label(declared: &str, caps_lock: bool) -> String {
    if caps_lock || declared.contains("icon-caps-off") {
        declared.to_string()
    } else {
        declared.replace("icon-caps", "icon-caps-off")
    }
}

fn div(document: &Document, class: &str) -> Result<Element, JsValue> {
    let element = document.create_element("div")?;
    element.set_class_name(class);
    Ok(element)
}

pub fn build_input(
    document: &Document,
    container: &Element,
    options: &KeyboardOptions,
) -> Result<InputElements, JsValue> {
    let input: HtmlInputElement = document.create_element("input")?.dyn_into()?;
    input.set_name(&options.input_name);
    input.set_type("text");
    input.set_placeholder(&options.placeholder);
    input.set_max_length(i32::try_from(options.max_length).unwrap_or(i32::MAX));

    let clear_button = document.create_element("i")?;
    clear_button.set_class_name("icon-clear");

    container.append_child(&input)?;
    container.append_child(&clear_button)?;

    Ok(InputElements {
        input,
        clear_button,
    })
}

pub fn build_board(
    document: &Document,
    container: &Element,
    keyboard: &Keyboard,
) -> Result<BoardElements, JsValue> {
    let board = div(document, "board")?;
    let mut buttons = HashMap::new();
    let mut labels = HashMap::new();
    let mut caps_buttons = Vec::new();
    let caps_lock = keyboard.state().caps_lock;

    for (set_idx, set) in keyboard.layout().sets.iter().enumerate() {
        let set_container = div(document, &format!("character-set {}", set.name))?;

        for (row_idx, row) in set.rows.iter().enumerate() {
            let row_element = div(document, "flex-row")?;

            for (idx, key) in row.keys.iter().enumerate() {
                let id = KeyId::new(set_idx, row_idx, idx);
                let Some(binding) = keyboard.binding(&id) else {
                    continue;
                };

                let button = div(document, "button")?;
                if let Some(style) = &key.style_tag {
                    button.class_list().add_1(style)?;
                }

                let label = div(document, "key")?;
                if binding.action == Action::ToggleCaps {
                    label.set_inner_html(&caps_label(&binding.label, caps_lock));
                    if !caps_lock {
                        button.class_list().add_1("off")?;
                    }
                    caps_buttons.push((id, button.clone()));
                } else {
                    label.set_inner_html(&binding.label);
                }

                button.append_child(&label)?;
                row_element.append_child(&button)?;
                buttons.insert(id, button);
                labels.insert(id, label);
            }

            set_container.append_child(&row_element)?;
        }

        board.append_child(&set_container)?;
    }

    container.append_child(&board)?;
    log::debug!("Rendered board with {} keys", buttons.len());

    Ok(BoardElements {
        board,
        buttons,
        labels,
        caps_buttons,
    })
}
