// Browser implementations of the branding DOM and watch driver.
use super::{has_inline_style, BrandingDom, WatchDriver};
use crate::error::BrandingError;
use gloo_timers::callback::Timeout;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Document, Element, HtmlElement, MutationObserver, MutationObserverInit, NodeList,
    ShadowRoot, SvgElement,
};

fn collect_elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|idx| list.item(idx))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

fn query_error(selector: &str, err: JsValue) -> BrandingError {
    BrandingError::Query {
        selector: selector.to_string(),
        reason: format!("{err:?}"),
    }
}

fn mutation_error(err: JsValue) -> BrandingError {
    BrandingError::Mutation {
        reason: format!("{err:?}"),
    }
}

pub struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    pub fn from_window() -> Option<Self> {
        Some(Self {
            document: window()?.document()?,
        })
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl BrandingDom for BrowserDom {
    type Node = Element;
    type Root = ShadowRoot;

    fn query_all(&self, selector: &str) -> Result<Vec<Element>, BrandingError> {
        let list = self
            .document
            .query_selector_all(selector)
            .map_err(|err| query_error(selector, err))?;
        Ok(collect_elements(&list))
    }

    fn shadow_root(&self, host: &Element) -> Result<Option<ShadowRoot>, BrandingError> {
        // Read through Reflect so a throwing accessor (cross-origin frames) becomes an error.
        let value = js_sys::Reflect::get(host, &JsValue::from_str("shadowRoot")).map_err(|err| {
            BrandingError::AccessRestricted {
                reason: format!("{err:?}"),
            }
        })?;
        if value.is_null() || value.is_undefined() {
            return Ok(None);
        }
        value
            .dyn_into::<ShadowRoot>()
            .map(Some)
            .map_err(|_| BrandingError::AccessRestricted {
                reason: "shadowRoot is not a ShadowRoot".to_string(),
            })
    }

    fn query_root(&self, root: &ShadowRoot, selector: &str) -> Result<Vec<Element>, BrandingError> {
        let list = root
            .query_selector_all(selector)
            .map_err(|err| query_error(selector, err))?;
        Ok(collect_elements(&list))
    }

    fn append_style(&self, root: &ShadowRoot, marker: &str, css: &str) -> Result<(), BrandingError> {
        let style = self
            .document
            .create_element("style")
            .map_err(mutation_error)?;
        style.set_attribute(marker, "").map_err(mutation_error)?;
        style.set_text_content(Some(css));
        root.append_child(&style).map_err(mutation_error)?;
        Ok(())
    }

    fn hide(&self, node: &Element, declarations: &[(&str, &str)]) -> Result<(), BrandingError> {
        let no_inline_style = || BrandingError::Mutation {
            reason: format!("<{}> has no inline style", node.tag_name().to_lowercase()),
        };
        if !has_inline_style(node.namespace_uri().as_deref()) {
            return Err(no_inline_style());
        }
        let style = if let Some(element) = node.dyn_ref::<HtmlElement>() {
            element.style()
        } else if let Some(element) = node.dyn_ref::<SvgElement>() {
            element.style()
        } else {
            return Err(no_inline_style());
        };
        for (property, value) in declarations {
            style
                .set_property(property, value)
                .map_err(mutation_error)?;
        }
        Ok(())
    }
}

/// `MutationObserver` on the document body, disconnected on drop.
pub struct SubtreeObserver {
    observer: MutationObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

impl Drop for SubtreeObserver {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

pub struct BrowserDriver {
    document: Document,
}

impl BrowserDriver {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl WatchDriver for BrowserDriver {
    type Timer = Timeout;
    type Observer = SubtreeObserver;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Timeout {
        Timeout::new(delay_ms, task)
    }

    fn observe(&self, mut task: Box<dyn FnMut()>) -> Option<SubtreeObserver> {
        let body = self.document.body()?;
        let callback = Closure::wrap(Box::new(move |_records: js_sys::Array, _observer: MutationObserver| {
            task();
        }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>);
        let observer = MutationObserver::new(callback.as_ref().unchecked_ref()).ok()?;

        let options = MutationObserverInit::new();
        options.set_child_list(true);
        options.set_subtree(true);
        observer.observe_with_options(&body, &options).ok()?;

        Some(SubtreeObserver {
            observer,
            _callback: callback,
        })
    }
}
