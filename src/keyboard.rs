//! Widget core without a DOM
//!
//! Pairs a validated layout with an editing engine and the live table of
//! what each key currently shows and does. The DOM adapter drives one of
//! these per rendered keyboard.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::config::KeyboardOptions;
use crate::engine::caps::rebindings;
use crate::engine::{Action, CapsState, EditingEngine, Effect, EngineState, KeyRebinding};
use crate::error::KeyboardError;
use crate::layout::{validate, KeyId, Layout};
use crate::text::Selection;

/// What a key currently shows and does
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binding {
    pub label: String,
    pub action: Action,
}

#[derive(Debug, Clone)]
pub struct Keyboard {
    layout: Layout,
    engine: EditingEngine,
    bindings: HashMap<KeyId, Binding>,
}

impl Keyboard {
    pub fn new(layout: Layout, caps: CapsState) -> Result<Self, KeyboardError> {
        validate(&layout)?;
        Ok(Self::with_engine(layout, EditingEngine::new().with_caps(caps)))
    }

    pub fn from_options(options: &KeyboardOptions) -> Result<Self, KeyboardError> {
        // resolve_layout hands back an already validated layout
        let layout = options.resolve_layout()?;
        let engine = EditingEngine::with_text(&options.initial_text).with_caps(options.caps());
        Ok(Self::with_engine(layout, engine))
    }

    /// `layout` must already have passed validation
    fn with_engine(layout: Layout, engine: EditingEngine) -> Self {
        let bindings = layout
            .keys()
            .map(|(id, key)| {
                let binding = Binding {
                    label: key.label.clone(),
                    action: Action::for_key(key),
                };
                (id, binding)
            })
            .collect();

        let mut keyboard = Self {
            layout,
            engine,
            bindings,
        };
        // Labels as declared may not match the starting caps state
        let initial = rebindings(&keyboard.layout, keyboard.engine.caps());
        keyboard.rebind(&initial);
        keyboard
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn engine(&self) -> &EditingEngine {
        &self.engine
    }

    pub fn state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn binding(&self, key: &KeyId) -> Option<&Binding> {
        self.bindings.get(key)
    }

    /// Run whatever the key is currently bound to
    ///
    /// Unknown keys do nothing.
    pub fn activate(&mut self, key: &KeyId) -> Option<Effect> {
        let Some(binding) = self.bindings.get(key) else {
            log::warn!("activate: no key at {:?}", key);
            return None;
        };
        let action = binding.action.clone();
        Some(self.apply(&action))
    }

    pub fn apply(&mut self, action: &Action) -> Effect {
        let effect = self.engine.apply(action, &self.layout);
        if let Effect::CapsToggled(toggle) = &effect {
            self.rebind(&toggle.rebindings);
        }
        effect
    }

    pub fn set_focus(&mut self, position: usize, selection: Option<Selection>) -> EngineState {
        self.engine.set_focus(position, selection)
    }

    fn rebind(&mut self, rebindings: &[KeyRebinding]) {
        for rebinding in rebindings {
            if let Some(binding) = self.bindings.get_mut(&rebinding.key) {
                binding.label = rebinding.label.clone();
                binding.action = rebinding.action.clone();
            }
        }
    }
}
