//! Scripted page and in-memory collaborators for tests.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use buildport_config::ExtractConfig;
use buildport_protocols::{
    Build, BuildCatalog, CatalogError, ElementHandle, PageDriver, PageError, PageSessionFactory,
    Selector,
};
use parking_lot::Mutex;

type LookupKey = (Option<u64>, Option<u64>, String);

#[derive(Default)]
struct FakeState {
    next_id: AtomicU64,
    texts: Mutex<HashMap<u64, String>>,
    hidden: Mutex<HashSet<u64>>,
    lookups: Mutex<HashMap<LookupKey, Vec<u64>>>,
    scene_switches: Mutex<HashSet<u64>>,
    scene: Mutex<Option<u64>>,
    failing: Mutex<HashSet<String>>,
    clicks: Mutex<Vec<u64>>,
    implicit_wait: Mutex<Duration>,
    implicit_wait_history: Mutex<Vec<Duration>>,
    lookup_log: Mutex<Vec<(String, Duration)>>,
    navigated: Mutex<Vec<String>>,
    closed: AtomicBool,
}

/// In-memory page answering lookups from a script.
///
/// Lookups are keyed by `(scope, selector)`. Clicking an element registered
/// as a scene switch makes that element's scene current; document-level
/// lookups check the current scene before the base script. Clones share
/// state.
#[derive(Clone, Default)]
pub struct FakePage {
    state: Arc<FakeState>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn element(&self, text: &str) -> ElementHandle {
        let id = self.state.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.texts.lock().insert(id, text.to_string());
        ElementHandle(id)
    }

    pub fn hidden_element(&self, text: &str) -> ElementHandle {
        let element = self.element(text);
        self.state.hidden.lock().insert(element.0);
        element
    }

    pub fn set_children(
        &self,
        scope: Option<ElementHandle>,
        selector: &Selector,
        elements: &[ElementHandle],
    ) {
        self.state.lookups.lock().insert(
            (None, scope.map(|s| s.0), selector.to_string()),
            elements.iter().map(|e| e.0).collect(),
        );
    }

    /// Document-level lookup that applies once `scene` was clicked.
    pub fn set_scene_children(
        &self,
        scene: ElementHandle,
        selector: &Selector,
        elements: &[ElementHandle],
    ) {
        self.state.scene_switches.lock().insert(scene.0);
        self.state.lookups.lock().insert(
            (Some(scene.0), None, selector.to_string()),
            elements.iter().map(|e| e.0).collect(),
        );
    }

    /// Lookups of `selector` fail as if the connection dropped.
    pub fn fail_selector(&self, selector: &Selector) {
        self.state.failing.lock().insert(selector.to_string());
    }

    pub fn clicks(&self) -> Vec<ElementHandle> {
        self.state.clicks.lock().iter().map(|id| ElementHandle(*id)).collect()
    }

    pub fn implicit_wait_history(&self) -> Vec<Duration> {
        self.state.implicit_wait_history.lock().clone()
    }

    /// Every `find_elements` call as (selector, implicit wait in force).
    pub fn lookup_log(&self) -> Vec<(String, Duration)> {
        self.state.lookup_log.lock().clone()
    }

    pub fn navigated(&self) -> Vec<String> {
        self.state.navigated.lock().clone()
    }

    pub fn is_closed(&self) -> bool {
        self.state.closed.load(Ordering::SeqCst)
    }

    fn check_open(&self) -> Result<(), PageError> {
        if self.is_closed() {
            Err(PageError::Closed)
        } else {
            Ok(())
        }
    }

    fn check_known(&self, element: &ElementHandle) -> Result<(), PageError> {
        if self.state.texts.lock().contains_key(&element.0) {
            Ok(())
        } else {
            Err(PageError::StaleElement(element.0))
        }
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn navigate(&self, url: &str) -> Result<(), PageError> {
        self.check_open()?;
        self.state.navigated.lock().push(url.to_string());
        Ok(())
    }

    async fn find_elements(
        &self,
        scope: Option<&ElementHandle>,
        selector: &Selector,
    ) -> Result<Vec<ElementHandle>, PageError> {
        self.check_open()?;
        let key = selector.to_string();
        self.state
            .lookup_log
            .lock()
            .push((key.clone(), self.implicit_wait()));
        if self.state.failing.lock().contains(&key) {
            return Err(PageError::Connection(format!("scripted failure for {}", key)));
        }

        let scope = scope.map(|s| s.0);
        let scene = *self.state.scene.lock();
        let lookups = self.state.lookups.lock();

        let found = scene
            .filter(|_| scope.is_none())
            .and_then(|scene| lookups.get(&(Some(scene), None, key.clone())))
            .or_else(|| lookups.get(&(None, scope, key)))
            .map(|ids| ids.iter().map(|id| ElementHandle(*id)).collect())
            .unwrap_or_default();
        Ok(found)
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), PageError> {
        self.check_open()?;
        self.check_known(element)?;
        self.state.clicks.lock().push(element.0);
        if self.state.scene_switches.lock().contains(&element.0) {
            *self.state.scene.lock() = Some(element.0);
        }
        Ok(())
    }

    async fn read_text(&self, element: &ElementHandle) -> Result<String, PageError> {
        self.check_open()?;
        self.state
            .texts
            .lock()
            .get(&element.0)
            .cloned()
            .ok_or(PageError::StaleElement(element.0))
    }

    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool, PageError> {
        self.check_open()?;
        self.check_known(element)?;
        Ok(!self.state.hidden.lock().contains(&element.0))
    }

    fn implicit_wait(&self) -> Duration {
        *self.state.implicit_wait.lock()
    }

    fn set_implicit_wait(&self, wait: Duration) {
        *self.state.implicit_wait.lock() = wait;
        self.state.implicit_wait_history.lock().push(wait);
    }

    async fn close(&self) -> Result<(), PageError> {
        self.state.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Hands out clones of one scripted page.
pub struct FakeSessionFactory {
    page: Option<FakePage>,
}

impl FakeSessionFactory {
    pub fn new(page: FakePage) -> Self {
        Self { page: Some(page) }
    }

    /// A factory whose sessions never open.
    pub fn unavailable() -> Self {
        Self { page: None }
    }
}

#[async_trait]
impl PageSessionFactory for FakeSessionFactory {
    async fn open(&self) -> Result<Box<dyn PageDriver>, PageError> {
        match &self.page {
            Some(page) => Ok(Box::new(page.clone())),
            None => Err(PageError::Connection("browser unavailable".to_string())),
        }
    }
}

/// One variant of a scripted build page.
#[derive(Debug, Clone, Default)]
pub struct VariantScript {
    pub name: String,
    /// Full text of each aspects panel entry.
    pub aspect_entries: Vec<String>,
    /// Gear groups: label and `(primary, value)` segments per item.
    pub gear: Vec<(String, Vec<(String, Option<String>)>)>,
}

impl VariantScript {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn aspect(mut self, entry: &str) -> Self {
        self.aspect_entries.push(entry.to_string());
        self
    }

    pub fn slot(mut self, label: &str, items: &[&str]) -> Self {
        self.gear.push((
            label.to_string(),
            items.iter().map(|i| (i.to_string(), None)).collect(),
        ));
        self
    }

    pub fn slot_with_values(mut self, label: &str, items: &[(&str, &str)]) -> Self {
        self.gear.push((
            label.to_string(),
            items
                .iter()
                .map(|(p, v)| (p.to_string(), Some(v.to_string())))
                .collect(),
        ));
        self
    }
}

/// A build page laid out the way the default selectors expect.
#[derive(Debug, Clone)]
pub struct PageScript {
    pub heading: Option<String>,
    pub footer: Option<String>,
    pub consent: bool,
    pub panel_tabs: bool,
    pub variants: Vec<VariantScript>,
}

/// Handles of interesting scripted elements.
#[derive(Debug, Clone, Default)]
pub struct ScriptHandles {
    pub consent_accept: Option<ElementHandle>,
    pub variant_tabs: Vec<ElementHandle>,
    pub panel_tabs: Vec<ElementHandle>,
}

impl PageScript {
    /// Page titled `name` with the given variants. More than one variant
    /// produces the variant selector layout.
    pub fn new(name: &str, variants: Vec<VariantScript>) -> Self {
        Self {
            heading: Some(format!("Diablo 4 Build\n{}", name)),
            footer: Some("Last Updated\n2024-05-01".to_string()),
            consent: false,
            panel_tabs: true,
            variants,
        }
    }

    pub fn build(&self, config: &ExtractConfig) -> (FakePage, ScriptHandles) {
        let page = FakePage::new();
        let s = &config.selectors;
        let mut handles = ScriptHandles::default();

        let container = page.element("");
        page.set_children(None, &s.title_container, &[container]);
        if let Some(heading) = &self.heading {
            let h1 = page.element(heading);
            page.set_children(Some(container), &s.title, &[h1]);
        }
        if let Some(footer) = &self.footer {
            let el = page.element(footer);
            page.set_children(Some(container), &s.footer, &[el]);
        }

        if self.consent {
            let dialog = page.element("");
            page.set_children(None, &s.consent_dialog, &[dialog]);
            let reject = page.element("Manage");
            let accept = page.element("Accept");
            page.set_children(Some(dialog), &s.consent_buttons, &[reject, accept]);
            handles.consent_accept = Some(accept);
        }

        if self.panel_tabs {
            let header = page.element("Aspects & Uniques");
            page.set_children(None, &s.panel_header_for(&config.aspects_header), &[header]);
            let aspects_tab = page.element("Aspects & Uniques");
            let gear_tab = page.element("Gear Stats");
            page.set_children(Some(header), &s.panel_tabs, &[aspects_tab, gear_tab]);
            handles.panel_tabs = vec![aspects_tab, gear_tab];
        }

        let main = page.element("");
        page.set_children(None, &s.main_content, &[main]);

        // A decoy candidate with a single child never qualifies.
        let decoy = page.element("");
        let decoy_child = page.element("Intro");
        page.set_children(Some(decoy), &s.variant_children, &[decoy_child]);
        page.set_children(Some(decoy), &s.variant_labelled_children, &[decoy_child]);

        if self.variants.len() > 1 {
            let selector = page.element("");
            let tabs: Vec<ElementHandle> =
                self.variants.iter().map(|v| page.element(&v.name)).collect();
            page.set_children(Some(selector), &s.variant_children, &tabs);
            page.set_children(Some(selector), &s.variant_labelled_children, &tabs);
            page.set_children(Some(main), &s.variant_candidates, &[decoy, selector]);

            for (tab, variant) in tabs.iter().zip(&self.variants) {
                self.register_variant(&page, config, Some(*tab), variant);
            }
            handles.variant_tabs = tabs;
        } else {
            page.set_children(Some(main), &s.variant_candidates, &[decoy]);
            if let Some(variant) = self.variants.first() {
                self.register_variant(&page, config, None, variant);
            }
        }

        (page, handles)
    }

    fn register_variant(
        &self,
        page: &FakePage,
        config: &ExtractConfig,
        scene: Option<ElementHandle>,
        variant: &VariantScript,
    ) {
        let s = &config.selectors;
        let set_document = |selector: &Selector, elements: &[ElementHandle]| match scene {
            Some(scene) => page.set_scene_children(scene, selector, elements),
            None => page.set_children(None, selector, elements),
        };

        let aspects = page.element("");
        set_document(&s.panel_container_for(&config.aspects_header), &[aspects]);
        let body = page.element("");
        page.set_children(Some(aspects), &s.panel_body, &[body]);
        let entries: Vec<ElementHandle> = variant
            .aspect_entries
            .iter()
            .map(|text| page.element(text))
            .collect();
        page.set_children(Some(body), &s.panel_entries, &entries);

        let gear = page.element("");
        set_document(&s.panel_container_for(&config.gear_stats_header), &[gear]);
        let body = page.element("");
        page.set_children(Some(gear), &s.panel_body, &[body]);

        let mut groups = Vec::new();
        for (label, items) in &variant.gear {
            let group = page.element("");
            let label_el = page.element(label);
            page.set_children(Some(group), &s.slot_label, &[label_el]);

            let mut lis = Vec::new();
            for (primary, value) in items {
                let li = page.element("");
                let mut spans = vec![page.element(primary)];
                if let Some(value) = value {
                    spans.push(page.element(value));
                }
                page.set_children(Some(li), &s.item_segments, &spans);
                lis.push(li);
            }
            page.set_children(Some(group), &s.slot_items, &lis);
            groups.push(group);
        }
        page.set_children(Some(body), &s.panel_entries, &groups);
    }
}

/// Build catalog kept in memory.
#[derive(Default)]
pub struct MemoryCatalog {
    builds: Mutex<BTreeMap<String, Build>>,
    fail_writes: AtomicBool,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let catalog = Self::default();
        catalog.fail_writes.store(true, Ordering::SeqCst);
        catalog
    }

    pub fn len(&self) -> usize {
        self.builds.lock().len()
    }
}

#[async_trait]
impl BuildCatalog for MemoryCatalog {
    async fn put(&self, id: &str, build: Build) -> Result<(), CatalogError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(CatalogError::Storage("read-only".to_string()));
        }
        self.builds.lock().insert(id.to_string(), build);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Build>, CatalogError> {
        Ok(self.builds.lock().get(id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Build>, CatalogError> {
        Ok(self.builds.lock().values().cloned().collect())
    }

    async fn delete(&self, id: &str) -> Result<(), CatalogError> {
        self.builds.lock().remove(id);
        Ok(())
    }
}
