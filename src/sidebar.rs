use crate::page::{ElementHandle, Page};
use crate::settings::DashboardSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SidebarBinding {
    pub toggle: ElementHandle,
    pub sidebar: ElementHandle,
    pub root: Option<ElementHandle>,
}

/// Binds the collapse toggle. Returns `None`, binding nothing, when the toggle
/// control or the sidebar is missing from the page.
pub fn init_sidebar(page: &mut Page, settings: &DashboardSettings) -> Option<SidebarBinding> {
    let tree = page.tree();
    let toggle = tree.get_element_by_id(&settings.toggle_id);
    let sidebar = tree.query_selector(&settings.sidebar_selector);
    let (Some(toggle), Some(sidebar)) = (toggle, sidebar) else {
        tracing::debug!(
            toggle = %settings.toggle_id,
            sidebar = %settings.sidebar_selector,
            "sidebar controls not on page, toggle not bound"
        );
        return None;
    };

    let root = tree.get_element_by_id(&settings.root_id);
    if root.is_none() {
        tracing::warn!(
            root = %settings.root_id,
            "root container missing, only the sidebar will collapse"
        );
    }

    let sidebar_class = settings.sidebar_collapsed_class.clone();
    let root_class = settings.root_collapsed_class.clone();
    page.add_click_listener(toggle, move |tree| {
        tree.toggle_class(sidebar, &sidebar_class);
        if let Some(root) = root {
            tree.toggle_class(root, &root_class);
        }
    });

    Some(SidebarBinding {
        toggle,
        sidebar,
        root,
    })
}

impl SidebarBinding {
    pub fn is_collapsed(&self, page: &Page, settings: &DashboardSettings) -> bool {
        page.tree()
            .has_class(self.sidebar, &settings.sidebar_collapsed_class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Element;

    fn collapsed_markers(
        page: &Page,
        binding: &SidebarBinding,
        settings: &DashboardSettings,
    ) -> (bool, bool) {
        let tree = page.tree();
        let sidebar = tree.has_class(binding.sidebar, &settings.sidebar_collapsed_class);
        let root = binding
            .root
            .map(|root| tree.has_class(root, &settings.root_collapsed_class))
            .unwrap_or(false);
        (sidebar, root)
    }

    #[test]
    fn one_click_collapses_both_and_two_clicks_restore() {
        let settings = DashboardSettings::default();
        let mut page = Page::dashboard_layout(&settings);
        let binding = init_sidebar(&mut page, &settings).unwrap();

        assert_eq!(collapsed_markers(&page, &binding, &settings), (false, false));
        assert_eq!(page.click(binding.toggle), 1);
        assert_eq!(collapsed_markers(&page, &binding, &settings), (true, true));
        assert!(binding.is_collapsed(&page, &settings));
        page.click(binding.toggle);
        assert_eq!(collapsed_markers(&page, &binding, &settings), (false, false));
    }

    #[test]
    fn missing_toggle_binds_nothing() {
        let settings = DashboardSettings::default();
        let mut page = Page::new();
        let sidebar = page
            .tree_mut()
            .insert(Element::new("aside").with_class("admin-sidebar"));

        assert!(init_sidebar(&mut page, &settings).is_none());
        assert_eq!(page.listener_count(sidebar), 0);
    }

    #[test]
    fn missing_sidebar_binds_nothing() {
        let settings = DashboardSettings::default();
        let mut page = Page::new();
        let toggle = page
            .tree_mut()
            .insert(Element::new("button").with_id("sidebarToggle"));

        assert!(init_sidebar(&mut page, &settings).is_none());
        assert_eq!(page.listener_count(toggle), 0);
        assert_eq!(page.click(toggle), 0);
    }

    #[test]
    fn missing_root_still_collapses_sidebar() {
        let settings = DashboardSettings::default();
        let mut page = Page::new();
        page.tree_mut()
            .insert(Element::new("button").with_id("sidebarToggle"));
        page.tree_mut()
            .insert(Element::new("aside").with_class("admin-sidebar"));

        let binding = init_sidebar(&mut page, &settings).unwrap();
        assert_eq!(binding.root, None);
        page.click(binding.toggle);
        assert!(binding.is_collapsed(&page, &settings));
    }
}
