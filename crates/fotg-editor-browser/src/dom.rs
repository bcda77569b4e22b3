//! Small DOM helpers shared by the page bindings.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlElement, SvgElement};

/// Element with `id`, cast to `T`. `None` if missing or of another type.
pub fn by_id<T: JsCast>(id: &str) -> Option<T> {
    gloo_utils::document()
        .get_element_by_id(id)?
        .dyn_into::<T>()
        .ok()
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    if let Err(e) = element.class_list().toggle_with_force(class, on) {
        tracing::debug!(class, "class toggle failed: {:?}", e);
    }
}

/// Set (or with `""`, clear) an inline style property on an HTML or SVG element.
pub fn set_style(element: &Element, property: &str, value: &str) {
    let style = if let Some(html) = element.dyn_ref::<HtmlElement>() {
        html.style()
    } else if let Some(svg) = element.dyn_ref::<SvgElement>() {
        svg.style()
    } else {
        return;
    };
    let result = if value.is_empty() {
        style.remove_property(property).map(|_| ())
    } else {
        style.set_property(property, value)
    };
    if let Err(e) = result {
        tracing::debug!(property, "style update failed: {:?}", e);
    }
}

/// Best-effort text of a thrown JS value (`Error.message` or the string itself).
pub fn js_message(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(value, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
