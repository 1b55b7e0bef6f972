use std::collections::BTreeSet;

use anyhow::Context;

use crate::settings::DashboardSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle(usize);

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            id: None,
            classes: BTreeSet::new(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.insert(class.to_string());
        self
    }

    pub fn is_canvas(&self) -> bool {
        self.tag.eq_ignore_ascii_case("canvas")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawingContext {
    pub surface_id: String,
}

/// Resolves a surface identifier to a drawing context.
pub trait SurfaceLookup {
    fn drawing_context(&self, surface_id: &str) -> anyhow::Result<DrawingContext>;
}

#[derive(Debug, Clone, Default)]
pub struct ElementTree {
    elements: Vec<Element>,
}

impl ElementTree {
    pub fn insert(&mut self, element: Element) -> ElementHandle {
        self.elements.push(element);
        ElementHandle(self.elements.len() - 1)
    }

    pub fn element(&self, handle: ElementHandle) -> Option<&Element> {
        self.elements.get(handle.0)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementHandle> {
        self.elements
            .iter()
            .position(|el| el.id.as_deref() == Some(id))
            .map(ElementHandle)
    }

    /// First element matching `#id`, `.class` or a bare tag name.
    pub fn query_selector(&self, selector: &str) -> Option<ElementHandle> {
        let selector = selector.trim();
        if let Some(id) = selector.strip_prefix('#') {
            return self.get_element_by_id(id);
        }
        let position = if let Some(class) = selector.strip_prefix('.') {
            self.elements.iter().position(|el| el.classes.contains(class))
        } else {
            self.elements
                .iter()
                .position(|el| el.tag.eq_ignore_ascii_case(selector))
        };
        position.map(ElementHandle)
    }

    /// Flips `class` on the element; returns whether it is now present.
    pub fn toggle_class(&mut self, handle: ElementHandle, class: &str) -> bool {
        let Some(el) = self.elements.get_mut(handle.0) else {
            return false;
        };
        if el.classes.remove(class) {
            false
        } else {
            el.classes.insert(class.to_string());
            true
        }
    }

    pub fn has_class(&self, handle: ElementHandle, class: &str) -> bool {
        self.element(handle)
            .map(|el| el.classes.contains(class))
            .unwrap_or(false)
    }

    pub fn context_2d(&self, handle: ElementHandle) -> Option<DrawingContext> {
        let el = self.element(handle)?;
        if !el.is_canvas() {
            return None;
        }
        Some(DrawingContext {
            surface_id: el.id.clone().unwrap_or_default(),
        })
    }

    pub fn canvas_ids(&self) -> Vec<String> {
        self.elements
            .iter()
            .filter(|el| el.is_canvas())
            .filter_map(|el| el.id.clone())
            .collect()
    }
}

impl SurfaceLookup for ElementTree {
    fn drawing_context(&self, surface_id: &str) -> anyhow::Result<DrawingContext> {
        let handle = self
            .get_element_by_id(surface_id)
            .with_context(|| format!("drawing surface `{surface_id}` not found"))?;
        self.context_2d(handle)
            .with_context(|| format!("element `{surface_id}` has no 2d drawing context"))
    }
}

type ClickHandler = Box<dyn FnMut(&mut ElementTree)>;

struct ClickListener {
    target: ElementHandle,
    handler: ClickHandler,
}

#[derive(Default)]
pub struct Page {
    tree: ElementTree,
    listeners: Vec<ClickListener>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dashboard_layout(settings: &DashboardSettings) -> Self {
        let mut page = Self::new();
        let tree = page.tree_mut();
        tree.insert(Element::new("div").with_id(&settings.root_id));
        tree.insert(Element::new("button").with_id(&settings.toggle_id));
        tree.insert(sidebar_element(&settings.sidebar_selector));
        for surface in settings.surface_ids() {
            tree.insert(Element::new("canvas").with_id(surface));
        }
        page
    }

    pub fn tree(&self) -> &ElementTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ElementTree {
        &mut self.tree
    }

    pub fn add_click_listener<F>(&mut self, target: ElementHandle, handler: F)
    where
        F: FnMut(&mut ElementTree) + 'static,
    {
        self.listeners.push(ClickListener {
            target,
            handler: Box::new(handler),
        });
    }

    pub fn listener_count(&self, target: ElementHandle) -> usize {
        self.listeners.iter().filter(|l| l.target == target).count()
    }

    /// Dispatches a click to `target`; returns how many handlers ran.
    pub fn click(&mut self, target: ElementHandle) -> usize {
        let tree = &mut self.tree;
        let mut ran = 0;
        for listener in self.listeners.iter_mut().filter(|l| l.target == target) {
            (listener.handler)(&mut *tree);
            ran += 1;
        }
        ran
    }
}

impl SurfaceLookup for Page {
    fn drawing_context(&self, surface_id: &str) -> anyhow::Result<DrawingContext> {
        self.tree.drawing_context(surface_id)
    }
}

fn sidebar_element(selector: &str) -> Element {
    let selector = selector.trim();
    if let Some(id) = selector.strip_prefix('#') {
        Element::new("aside").with_id(id)
    } else if let Some(class) = selector.strip_prefix('.') {
        Element::new("aside").with_class(class)
    } else {
        Element::new(selector)
    }
}
