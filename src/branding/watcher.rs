// Scheduled attempts plus a subtree observer, both owned by the watcher value.
use super::{suppress_branding, BrandingDom, BrandingRules};
use dioxus::logger::tracing::{debug, info, trace};
use std::rc::Rc;

/// Timers and mutation feeds the watcher runs on. Both handle types release their
/// resource when dropped: a dropped timer never fires, a dropped observer stops.
pub trait WatchDriver {
    type Timer;
    type Observer;

    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> Self::Timer;
    /// Run `task` whenever nodes are added or removed anywhere under the document body.
    fn observe(&self, task: Box<dyn FnMut()>) -> Option<Self::Observer>;
}

pub struct BrandingWatcher<W: WatchDriver> {
    timers: Vec<W::Timer>,
    observer: Option<W::Observer>,
}

impl<W: WatchDriver> BrandingWatcher<W> {
    pub fn start<D>(driver: &W, dom: Rc<D>, rules: Rc<BrandingRules>, delays_ms: &[u32]) -> Self
    where
        D: BrandingDom + 'static,
    {
        let timers = delays_ms
            .iter()
            .enumerate()
            .map(|(attempt, &delay)| {
                let dom = dom.clone();
                let rules = rules.clone();
                driver.schedule(
                    delay,
                    Box::new(move || {
                        let report = suppress_branding(&*dom, &rules);
                        debug!(attempt = attempt + 1, ?report, "branding attempt");
                    }),
                )
            })
            .collect();

        let observer = driver.observe(Box::new(move || {
            let report = suppress_branding(&*dom, &rules);
            trace!(?report, "branding pass after DOM change");
        }));
        if observer.is_none() {
            debug!("no document body to observe, relying on scheduled attempts");
        }

        info!(attempts = delays_ms.len(), "branding watcher started");
        Self { timers, observer }
    }

    #[allow(dead_code)]
    pub fn is_observing(&self) -> bool {
        self.observer.is_some()
    }

    #[allow(dead_code)]
    pub fn scheduled_attempts(&self) -> usize {
        self.timers.len()
    }
}

impl<W: WatchDriver> Drop for BrandingWatcher<W> {
    fn drop(&mut self) {
        self.timers.clear();
        self.observer.take();
        debug!("branding watcher stopped");
    }
}
