//! The algorithm builder core as a WASM module for the browser front end.
//!
//! The canvas, drag and drop and property panel live in JavaScript; this
//! module owns the program graph, runs it and validates levels. Block ids
//! cross the boundary as `block-N` strings, everything structured (graphs,
//! reports, level metadata) as plain JS objects.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { Playground, levels } from 'algo-wasm';
//!
//! await init();
//!
//! const pg = new Playground();
//! const d = pg.addBlock("declarer", { nom: "age", type: "entier", valeur: 0 });
//! const r = pg.addBlock("lire", { variable: "age" });
//! pg.connect(d, r);
//! const report = pg.run(["20"]);
//! // { state: "completed", console: [...], variables: { age: { type: "entier", value: 20 } }, steps: 2 }
//! const outcome = pg.validate(5);
//! // { passed: false, message: "Assurez-vous d'avoir déclaré 'age', ..." }
//! ```

use algo_engine::{EngineConfig, Session};
use algo_eval::VariableStore;
use algo_graph::{BlockId, BlockKind, BlockTag, Branch, Properties, PropertyValue};
use algo_levels::Attempt;
use log::debug;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Serialize maps as plain objects rather than `Map`s.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsError> {
    Ok(value.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?)
}

fn block_id(text: &str) -> Result<BlockId, JsError> {
    Ok(text.parse()?)
}

fn block_tag(text: &str) -> Result<BlockTag, JsError> {
    Ok(text.parse()?)
}

/// A live program and its last run.
#[wasm_bindgen]
#[derive(Default)]
pub struct Playground {
    session: Session,
}

#[wasm_bindgen]
impl Playground {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Playground {
        Playground::default()
    }

    // ── Graph edits ───────────────────────────────────────────────────────────

    /// Place a block. `properties` may be `undefined` for palette defaults.
    /// Returns the new block's id.
    #[wasm_bindgen(js_name = addBlock)]
    pub fn add_block(&mut self, tag: &str, properties: JsValue) -> Result<String, JsError> {
        let tag = block_tag(tag)?;
        let properties: Properties = if properties.is_undefined() || properties.is_null() {
            Properties::new()
        } else {
            serde_wasm_bindgen::from_value(properties)?
        };
        let id = self.session.graph_mut().add_block_with(tag, &properties)?;
        Ok(id.to_string())
    }

    #[wasm_bindgen(js_name = setProperty)]
    pub fn set_property(&mut self, id: &str, key: &str, value: JsValue) -> Result<(), JsError> {
        let id = block_id(id)?;
        let value: PropertyValue = serde_wasm_bindgen::from_value(value)?;
        self.session.graph_mut().set_property(id, key, value)?;
        Ok(())
    }

    /// Delete a block and every edge touching it.
    #[wasm_bindgen(js_name = removeBlock)]
    pub fn remove_block(&mut self, id: &str) -> Result<(), JsError> {
        self.session.graph_mut().remove_block(block_id(id)?)?;
        Ok(())
    }

    /// Connect two blocks; `branch` tags edges leaving conditionals and loops.
    pub fn connect(&mut self, from: &str, to: &str, branch: Option<bool>) -> Result<(), JsError> {
        let (from, to) = (block_id(from)?, block_id(to)?);
        self.session
            .graph_mut()
            .connect(from, to, branch.map(Branch::from))?;
        Ok(())
    }

    pub fn disconnect(&mut self, from: &str, to: &str) -> Result<(), JsError> {
        let (from, to) = (block_id(from)?, block_id(to)?);
        self.session.graph_mut().disconnect(from, to)?;
        Ok(())
    }

    /// The whole graph: `{ blocks, edges, nextId }`.
    pub fn graph(&self) -> Result<JsValue, JsError> {
        to_js(self.session.graph())
    }

    /// One block with its type and properties, for the property panel.
    pub fn block(&self, id: &str) -> Result<JsValue, JsError> {
        to_js(self.session.graph().get(block_id(id)?)?)
    }

    /// The text shown on a block's face.
    pub fn label(&self, id: &str) -> Result<String, JsError> {
        Ok(self.session.graph().get(block_id(id)?)?.kind.label())
    }

    // ── Runs ──────────────────────────────────────────────────────────────────

    /// Replace the run configuration; missing fields take their defaults.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config: JsValue) -> Result<(), JsError> {
        let config: EngineConfig = if config.is_undefined() || config.is_null() {
            EngineConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        self.session.set_config(config);
        Ok(())
    }

    /// Run the program, answering `read` blocks from `inputs` in order.
    /// Returns the run report.
    pub fn run(&mut self, inputs: JsValue) -> Result<JsValue, JsError> {
        let inputs: Vec<String> = if inputs.is_undefined() || inputs.is_null() {
            Vec::new()
        } else {
            serde_wasm_bindgen::from_value(inputs)?
        };
        debug!("playground run with {} queued inputs", inputs.len());
        to_js(self.session.run_with_inputs(inputs))
    }

    /// `idle`, `running`, `completed`, `failed` or `stopped`.
    pub fn state(&self) -> Result<JsValue, JsError> {
        to_js(&self.session.state())
    }

    /// The report of the last run, or `undefined`.
    #[wasm_bindgen(js_name = lastReport)]
    pub fn last_report(&self) -> Result<JsValue, JsError> {
        match self.session.last_report() {
            Some(report) => to_js(report),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    // ── Levels ────────────────────────────────────────────────────────────────

    /// Check the program and its last run against level `number`.
    pub fn validate(&self, number: u8) -> Result<JsValue, JsError> {
        let level = algo_levels::level(number)
            .ok_or_else(|| JsError::new(&format!("there is no level {number}")))?;
        let graph = self.session.graph();
        let empty = VariableStore::new();
        let attempt = match self.session.last_report() {
            Some(report) => Attempt::from_report(graph, report),
            None => Attempt::new(graph, &[], &empty),
        };
        to_js(&level.validate(&attempt))
    }
}

/// Metadata of every level, in teaching order.
#[wasm_bindgen]
pub fn levels() -> Result<JsValue, JsError> {
    to_js(algo_levels::levels())
}

/// Every block type of the palette, as canonical tag names.
#[wasm_bindgen]
pub fn palette() -> Result<JsValue, JsError> {
    to_js(&BlockTag::all())
}

/// The properties a freshly placed block of `tag` starts with.
#[wasm_bindgen(js_name = defaultProperties)]
pub fn default_properties(tag: &str) -> Result<JsValue, JsError> {
    to_js(&BlockKind::default_for(block_tag(tag)?).properties())
}

/// Return the crate version string.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
