//! Branding suppression for the embedded voice widget.
//!
//! The widget renders inside its own shadow root and loads on its own schedule, so
//! every pass is best effort: elements that cannot be reached are skipped and the
//! routine never fails past its own boundary.
#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

use crate::config::WidgetConfig;
use crate::error::BrandingError;
use dioxus::logger::tracing::trace;

mod watcher;
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(test)]
pub(crate) mod testing;

pub use watcher::*;
#[cfg(target_arch = "wasm32")]
pub use web::*;

/// Attribute that marks the style element injected into the widget's shadow root.
pub const STYLE_MARKER: &str = "data-nova-suppressor";

/// Inline declarations applied to every matched branding element.
pub const HIDDEN_DECLARATIONS: &[(&str, &str)] = &[
    ("display", "none"),
    ("visibility", "hidden"),
    ("height", "0"),
    ("overflow", "hidden"),
];

pub const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";
pub const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Whether elements in `namespace` carry an inline `style` declaration (HTML and SVG do, MathML does not).
pub fn has_inline_style(namespace: Option<&str>) -> bool {
    matches!(namespace, Some(HTML_NAMESPACE | SVG_NAMESPACE))
}

/// Minimal DOM surface needed to find and hide the widget's branding.
pub trait BrandingDom {
    type Node;
    type Root;

    /// Elements in the host document matching `selector`.
    fn query_all(&self, selector: &str) -> Result<Vec<Self::Node>, BrandingError>;
    /// Encapsulated subtree of `host`, if it exposes one.
    fn shadow_root(&self, host: &Self::Node) -> Result<Option<Self::Root>, BrandingError>;
    fn query_root(&self, root: &Self::Root, selector: &str) -> Result<Vec<Self::Node>, BrandingError>;
    fn append_style(&self, root: &Self::Root, marker: &str, css: &str) -> Result<(), BrandingError>;
    fn hide(&self, node: &Self::Node, declarations: &[(&str, &str)]) -> Result<(), BrandingError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrandingRules {
    pub widget_tag: String,
    pub frame_tag: String,
    pub vendor_domain: String,
    pub style_markers: Vec<String>,
    pub inline_markers: Vec<String>,
}

impl BrandingRules {
    pub fn from_config(widget: &WidgetConfig) -> Self {
        Self {
            widget_tag: widget.tag.clone(),
            frame_tag: widget.frame_tag.clone(),
            vendor_domain: widget.vendor_domain.clone(),
            style_markers: widget.style_markers.clone(),
            inline_markers: widget.inline_markers.clone(),
        }
    }

    fn class_selectors<'a>(markers: &'a [String]) -> impl Iterator<Item = String> + 'a {
        markers
            .iter()
            .map(|marker| format!("[class*=\"{marker}\"]"))
    }

    fn vendor_link(&self) -> String {
        format!("a[href*=\"{}\"]", self.vendor_domain)
    }

    /// Widget and frame elements whose subtrees are patched inline.
    pub fn host_selector(&self) -> String {
        format!("{}, {}", self.widget_tag, self.frame_tag)
    }

    pub fn inline_selector(&self) -> String {
        Self::class_selectors(&self.inline_markers)
            .chain(std::iter::once(self.vendor_link()))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Containers wrapping a vendor link. Kept apart from the inline selector so an
    /// engine without `:has` only loses this pass.
    pub fn structural_selector(&self) -> String {
        format!("div:has({})", self.vendor_link())
    }

    pub fn stylesheet(&self) -> String {
        let selectors = Self::class_selectors(&self.style_markers)
            .chain([
                "div[style*=\"text-align: center\"]".to_string(),
                self.structural_selector(),
            ])
            .collect::<Vec<_>>()
            .join(",\n");
        let body = HIDDEN_DECLARATIONS
            .iter()
            .map(|(property, value)| format!("  {property}: {value} !important;"))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{selectors} {{\n{body}\n}}\n")
    }
}

/// What one suppression pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SuppressionReport {
    pub widget_found: bool,
    pub style_injected: bool,
    pub hosts_seen: usize,
    pub hidden: usize,
    pub skipped: usize,
}

/// Hide the widget's branding. Never fails; unreachable elements are counted as skipped.
pub fn suppress_branding<D: BrandingDom>(dom: &D, rules: &BrandingRules) -> SuppressionReport {
    let mut report = SuppressionReport::default();

    match dom.query_all(&rules.widget_tag) {
        Ok(widgets) => {
            if let Some(widget) = widgets.first() {
                report.widget_found = true;
                match dom.shadow_root(widget) {
                    Ok(Some(root)) => inject_stylesheet(dom, &root, rules, &mut report),
                    Ok(None) => {}
                    Err(err) => {
                        trace!("widget subtree unavailable: {err}");
                        report.skipped += 1;
                    }
                }
            }
        }
        Err(err) => trace!("widget lookup failed: {err}"),
    }

    let hosts = match dom.query_all(&rules.host_selector()) {
        Ok(hosts) => hosts,
        Err(err) => {
            trace!("host lookup failed: {err}");
            Vec::new()
        }
    };

    let selectors = [rules.inline_selector(), rules.structural_selector()];
    for host in &hosts {
        report.hosts_seen += 1;
        let root = match dom.shadow_root(host) {
            Ok(Some(root)) => root,
            Ok(None) => continue,
            Err(err) => {
                trace!("skipping host: {err}");
                report.skipped += 1;
                continue;
            }
        };

        for selector in &selectors {
            let matches = match dom.query_root(&root, selector) {
                Ok(matches) => matches,
                Err(err) => {
                    trace!("{err}");
                    report.skipped += 1;
                    continue;
                }
            };
            for node in &matches {
                match dom.hide(node, HIDDEN_DECLARATIONS) {
                    Ok(()) => report.hidden += 1,
                    Err(err) => {
                        trace!("{err}");
                        report.skipped += 1;
                    }
                }
            }
        }
    }

    report
}

fn inject_stylesheet<D: BrandingDom>(
    dom: &D,
    root: &D::Root,
    rules: &BrandingRules,
    report: &mut SuppressionReport,
) {
    let existing = dom
        .query_root(root, &format!("style[{STYLE_MARKER}]"))
        .map(|found| !found.is_empty());
    match existing {
        Ok(true) => {}
        Ok(false) => match dom.append_style(root, STYLE_MARKER, &rules.stylesheet()) {
            Ok(()) => report.style_injected = true,
            Err(err) => {
                trace!("style injection failed: {err}");
                report.skipped += 1;
            }
        },
        Err(err) => {
            trace!("style lookup failed: {err}");
            report.skipped += 1;
        }
    }
}
