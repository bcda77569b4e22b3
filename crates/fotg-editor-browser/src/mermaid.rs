//! Bridge to the page's Mermaid library.

use fotg_editor_core::fotg_renderer::{DiagramError, DiagramRenderer, Theme};
use js_sys::{Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use crate::dom::js_message;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = mermaid, js_name = initialize)]
    fn mermaid_initialize(config: &Object) -> Result<(), JsValue>;

    #[wasm_bindgen(catch, js_namespace = mermaid, js_name = render)]
    fn mermaid_render(id: &str, source: &str) -> Result<Promise, JsValue>;
}

/// Renders diagrams with `window.mermaid`, when the page loaded it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidRenderer;

impl DiagramRenderer for MermaidRenderer {
    fn is_available(&self) -> bool {
        Reflect::has(&gloo_utils::window(), &JsValue::from_str("mermaid")).unwrap_or(false)
    }

    fn initialize(&self, theme: Theme) {
        let config = Object::new();
        let set = |key: &str, value: JsValue| Reflect::set(&config, &JsValue::from_str(key), &value);
        if let Err(e) = set("startOnLoad", JsValue::FALSE)
            .and_then(|_| set("theme", JsValue::from_str(theme.diagram_palette())))
            .and_then(|_| mermaid_initialize(&config))
        {
            tracing::warn!("mermaid.initialize failed: {}", js_message(&e));
        }
    }

    async fn render(&self, id: &str, source: &str, _theme: Theme) -> Result<String, DiagramError> {
        let promise = mermaid_render(id, source).map_err(|e| DiagramError::Syntax(js_message(&e)))?;
        let result = JsFuture::from(promise)
            .await
            .map_err(|e| DiagramError::Syntax(js_message(&e)))?;
        Reflect::get(&result, &JsValue::from_str("svg"))
            .ok()
            .and_then(|svg| svg.as_string())
            .ok_or(DiagramError::MissingOutput)
    }
}
