//! Render-tree model the engine mutates.
//!
//! The host page is represented as an id-indexed arena of nodes carrying the
//! marker attributes the original markup exposes (language buttons, content
//! blocks, sections, nav links, reveal targets, form parts). The engine only
//! ever addresses nodes through markers, so a tree missing an expected node
//! simply skips the step that would have touched it.

use std::collections::{BTreeSet, HashMap};

use crate::i18n::Language;

/// Identifier for a node in the page arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Marker attributes a node can carry, mirroring the selectors the page
/// exposes to its scripts.
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    /// Language selector control for one language
    LanguageButton(Language),
    /// Mutually-exclusive block tagged with exactly one language
    ContentBlock(Language),
    /// Named, vertically-ordered page region
    Section(String),
    /// Navigation link bound to a section identifier
    NavLink(String),
    /// The fixed navigation bar
    NavBar,
    /// Container holding the nav links (slides in on mobile)
    NavLinksContainer,
    /// Mobile hamburger control
    Hamburger,
    /// Click-to-close overlay behind the mobile menu
    NavOverlay,
    /// Target of the one-shot staggered entrance animation
    Reveal,
    /// Section label or title revealed without stagger
    SectionTitle,
    /// The contact form element
    ContactForm,
    /// An input or textarea inside the contact form
    FormField(String),
    /// Confirmation panel rendered after a simulated submission
    FormSuccess,
    /// Hero background receiving the parallax transform
    HeroBackdrop,
    /// Page-load splash
    Preloader,
}

/// Inline style flags the engine writes. `None` means the stylesheet value
/// is in effect.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeStyle {
    pub opacity: Option<f64>,
    pub translate_y: Option<f64>,
    pub scale: Option<f64>,
    pub transition: Option<String>,
}

/// One UI node: tree links, vertical layout, text, classes, style, markers.
#[derive(Debug, Clone)]
pub struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    removed: bool,
    pub top: f64,
    pub height: f64,
    text: String,
    classes: BTreeSet<String>,
    style: NodeStyle,
    markers: Vec<Marker>,
    translations: HashMap<Language, String>,
}

impl Node {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn has_marker(&self, pred: impl Fn(&Marker) -> bool) -> bool {
        self.markers.iter().any(pred)
    }

    /// Registered translation for a language, if any.
    pub fn translation_for(&self, language: Language) -> Option<&str> {
        self.translations.get(&language).map(String::as_str)
    }

    /// Whether this node carries any per-language text at all.
    pub fn is_translatable(&self) -> bool {
        !self.translations.is_empty()
    }

    pub fn language_button(&self) -> Option<Language> {
        self.markers.iter().find_map(|m| match m {
            Marker::LanguageButton(lang) => Some(*lang),
            _ => None,
        })
    }

    pub fn content_block_language(&self) -> Option<Language> {
        self.markers.iter().find_map(|m| match m {
            Marker::ContentBlock(lang) => Some(*lang),
            _ => None,
        })
    }

    pub fn section_id(&self) -> Option<&str> {
        self.markers.iter().find_map(|m| match m {
            Marker::Section(id) => Some(id.as_str()),
            _ => None,
        })
    }

    pub fn nav_link_target(&self) -> Option<&str> {
        self.markers.iter().find_map(|m| match m {
            Marker::NavLink(target) => Some(target.as_str()),
            _ => None,
        })
    }

    pub fn form_field_name(&self) -> Option<&str> {
        self.markers.iter().find_map(|m| match m {
            Marker::FormField(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// Construction parameters for a node.
#[derive(Debug, Clone, Default)]
pub struct NodeSpec {
    pub top: f64,
    pub height: f64,
    pub text: String,
    pub classes: Vec<String>,
    pub markers: Vec<Marker>,
    pub translations: Vec<(Language, String)>,
}

/// Scroll-position and viewport geometry shared by the scroll spy and the
/// reveal schedulers.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub scroll_y: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, height: f64) -> Self {
        Self { scroll_y, height }
    }

    /// Fraction of a node's vertical span inside the viewport, with the
    /// viewport's bottom edge pulled up by `bottom_margin` units.
    ///
    /// A zero-height node reports 1.0 when its top sits inside the shrunk
    /// region and 0.0 otherwise.
    pub fn intersection_ratio(&self, top: f64, height: f64, bottom_margin: f64) -> f64 {
        let window_top = self.scroll_y;
        let window_bottom = self.scroll_y + self.height - bottom_margin;
        if window_bottom <= window_top {
            return 0.0;
        }

        if height <= 0.0 {
            return if top >= window_top && top < window_bottom {
                1.0
            } else {
                0.0
            };
        }

        let overlap = (top + height).min(window_bottom) - top.max(window_top);
        (overlap / height).clamp(0.0, 1.0)
    }
}

/// The page: an arena of nodes plus the document-level flags the engine
/// publishes (declared language, body scroll lock).
#[derive(Debug, Clone)]
pub struct PageModel {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    page_lang: Language,
    scroll_locked: bool,
}

impl Default for PageModel {
    fn default() -> Self {
        Self::new()
    }
}

impl PageModel {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
            page_lang: Language::page_default(),
            scroll_locked: false,
        }
    }

    /// Insert a node under `parent` (or as a root). Children keep insertion
    /// order, which is the document order every query observes.
    pub fn insert(&mut self, parent: Option<NodeId>, spec: NodeSpec) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            removed: false,
            top: spec.top,
            height: spec.height,
            text: spec.text,
            classes: spec.classes.into_iter().collect(),
            style: NodeStyle::default(),
            markers: spec.markers,
            translations: spec.translations.into_iter().collect(),
        });

        match parent.and_then(|p| self.nodes.get_mut(p.0)) {
            Some(parent_node) => parent_node.children.push(id),
            None => self.roots.push(id),
        }

        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).filter(|n| !n.removed)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).filter(|n| !n.removed)
    }

    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Live children of a node, in document order.
    pub fn children_of(&self, id: NodeId) -> Vec<NodeId> {
        match self.get(id) {
            Some(node) => node
                .children
                .iter()
                .copied()
                .filter(|c| self.get(*c).is_some())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Live root-level nodes, in document order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.roots
            .iter()
            .copied()
            .filter(|r| self.get(*r).is_some())
            .collect()
    }

    /// All live nodes in document order (depth-first over the roots).
    pub fn document_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else { continue };
            order.push(id);
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
        }

        order
    }

    /// All live nodes carrying a marker matching `pred`, in document order.
    pub fn marked(&self, pred: impl Fn(&Marker) -> bool) -> Vec<NodeId> {
        self.document_order()
            .into_iter()
            .filter(|id| {
                self.get(*id)
                    .map(|n| n.markers.iter().any(&pred))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// First live node carrying a marker matching `pred`.
    pub fn first_marked(&self, pred: impl Fn(&Marker) -> bool) -> Option<NodeId> {
        self.marked(pred).into_iter().next()
    }

    // ---- mutations ----

    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) {
        if let Some(node) = self.get_mut(id) {
            node.text = text.into();
        }
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.get_mut(id) {
            node.classes.insert(class.to_string());
        }
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(node) = self.get_mut(id) {
            node.classes.remove(class);
        }
    }

    /// classList.toggle(class, on) equivalent.
    pub fn toggle_class(&mut self, id: NodeId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn style_mut(&mut self, id: NodeId) -> Option<&mut NodeStyle> {
        self.get_mut(id).map(|n| &mut n.style)
    }

    /// Detach a node and everything under it. Queries stop seeing the
    /// subtree; ids stay allocated.
    pub fn remove_subtree(&mut self, id: NodeId) {
        let children = match self.get(id) {
            Some(node) => node.children.clone(),
            None => return,
        };
        for child in children {
            self.remove_subtree(child);
        }

        if let Some(parent) = self.parent_of(id) {
            if let Some(parent_node) = self.get_mut(parent) {
                parent_node.children.retain(|c| *c != id);
            }
        } else {
            self.roots.retain(|r| *r != id);
        }

        if let Some(node) = self.nodes.get_mut(id.0) {
            node.removed = true;
        }
    }

    /// Remove all children of a node, keeping the node itself (innerHTML
    /// replacement).
    pub fn remove_children(&mut self, id: NodeId) {
        for child in self.children_of(id) {
            self.remove_subtree(child);
        }
    }

    // ---- document-level flags ----

    pub fn page_lang(&self) -> Language {
        self.page_lang
    }

    pub fn set_page_lang(&mut self, lang: Language) {
        self.page_lang = lang;
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    pub fn set_scroll_locked(&mut self, locked: bool) {
        self.scroll_locked = locked;
    }

    /// Height of the fixed navigation bar, if one is present.
    pub fn nav_height(&self) -> Option<f64> {
        self.first_marked(|m| matches!(m, Marker::NavBar))
            .and_then(|id| self.get(id))
            .map(|n| n.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_spec(top: f64, height: f64) -> NodeSpec {
        NodeSpec {
            top,
            height,
            ..Default::default()
        }
    }

    #[test]
    fn test_insert_and_document_order() {
        let mut page = PageModel::new();
        let root = page.insert(None, simple_spec(0.0, 100.0));
        let a = page.insert(Some(root), simple_spec(0.0, 50.0));
        let b = page.insert(Some(root), simple_spec(50.0, 50.0));
        let a1 = page.insert(Some(a), simple_spec(0.0, 10.0));

        assert_eq!(page.document_order(), vec![root, a, a1, b]);
        assert_eq!(page.children_of(root), vec![a, b]);
        assert_eq!(page.parent_of(a1), Some(a));
    }

    #[test]
    fn test_marked_query_in_document_order() {
        let mut page = PageModel::new();
        let root = page.insert(None, simple_spec(0.0, 100.0));
        let _plain = page.insert(Some(root), simple_spec(0.0, 10.0));
        let first = page.insert(
            Some(root),
            NodeSpec {
                markers: vec![Marker::Reveal],
                ..Default::default()
            },
        );
        let second = page.insert(
            Some(root),
            NodeSpec {
                markers: vec![Marker::Reveal],
                ..Default::default()
            },
        );

        assert_eq!(page.marked(|m| matches!(m, Marker::Reveal)), vec![first, second]);
        assert_eq!(
            page.first_marked(|m| matches!(m, Marker::Reveal)),
            Some(first)
        );
    }

    #[test]
    fn test_class_toggle() {
        let mut page = PageModel::new();
        let node = page.insert(None, simple_spec(0.0, 10.0));

        page.toggle_class(node, "active", true);
        assert!(page.get(node).unwrap().has_class("active"));

        page.toggle_class(node, "active", true);
        assert!(page.get(node).unwrap().has_class("active"));

        page.toggle_class(node, "active", false);
        assert!(!page.get(node).unwrap().has_class("active"));
    }

    #[test]
    fn test_remove_subtree_hides_descendants() {
        let mut page = PageModel::new();
        let root = page.insert(None, simple_spec(0.0, 100.0));
        let child = page.insert(Some(root), simple_spec(0.0, 50.0));
        let grandchild = page.insert(Some(child), simple_spec(0.0, 10.0));

        page.remove_subtree(child);

        assert!(page.get(child).is_none());
        assert!(page.get(grandchild).is_none());
        assert_eq!(page.children_of(root), Vec::<NodeId>::new());
        assert_eq!(page.document_order(), vec![root]);
    }

    #[test]
    fn test_remove_children_keeps_node() {
        let mut page = PageModel::new();
        let wrap = page.insert(None, simple_spec(0.0, 100.0));
        page.insert(Some(wrap), simple_spec(0.0, 50.0));
        page.insert(Some(wrap), simple_spec(50.0, 50.0));

        page.remove_children(wrap);

        assert!(page.get(wrap).is_some());
        assert!(page.children_of(wrap).is_empty());
    }

    #[test]
    fn test_mutations_on_missing_node_are_noops() {
        let mut page = PageModel::new();
        let node = page.insert(None, simple_spec(0.0, 10.0));
        page.remove_subtree(node);

        // None of these should panic or resurrect the node.
        page.set_text(node, "ghost");
        page.add_class(node, "active");
        page.toggle_class(node, "active", true);
        assert!(page.get(node).is_none());
    }

    #[test]
    fn test_translation_lookup() {
        let mut page = PageModel::new();
        let node = page.insert(
            None,
            NodeSpec {
                text: "Accueil".to_string(),
                translations: vec![
                    (Language::FRENCH, "Accueil".to_string()),
                    (Language::ENGLISH, "Home".to_string()),
                ],
                ..Default::default()
            },
        );

        let node_ref = page.get(node).unwrap();
        assert!(node_ref.is_translatable());
        assert_eq!(node_ref.translation_for(Language::ENGLISH), Some("Home"));
        assert_eq!(node_ref.translation_for(Language::GERMAN), None);
    }

    #[test]
    fn test_nav_height() {
        let mut page = PageModel::new();
        assert_eq!(page.nav_height(), None);

        page.insert(
            None,
            NodeSpec {
                height: 72.0,
                markers: vec![Marker::NavBar],
                ..Default::default()
            },
        );
        assert_eq!(page.nav_height(), Some(72.0));
    }

    #[test]
    fn test_intersection_ratio_basic() {
        let viewport = Viewport::new(0.0, 800.0);

        // Fully visible node
        assert_eq!(viewport.intersection_ratio(100.0, 200.0, 0.0), 1.0);

        // Fully below the fold
        assert_eq!(viewport.intersection_ratio(900.0, 200.0, 0.0), 0.0);

        // Half visible at the bottom edge
        let ratio = viewport.intersection_ratio(700.0, 200.0, 0.0);
        assert!((ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_intersection_ratio_respects_bottom_margin() {
        let viewport = Viewport::new(0.0, 800.0);

        // Node spanning 720..800 is fully visible against the raw viewport
        // but invisible once the bottom edge is pulled up by 80.
        assert_eq!(viewport.intersection_ratio(720.0, 80.0, 0.0), 1.0);
        assert_eq!(viewport.intersection_ratio(720.0, 80.0, 80.0), 0.0);
    }

    #[test]
    fn test_intersection_ratio_zero_height_node() {
        let viewport = Viewport::new(0.0, 800.0);

        assert_eq!(viewport.intersection_ratio(400.0, 0.0, 0.0), 1.0);
        assert_eq!(viewport.intersection_ratio(900.0, 0.0, 0.0), 0.0);
    }
}
