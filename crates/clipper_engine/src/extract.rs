use std::sync::LazyLock;

use ego_tree::NodeId;
use regex::{Regex, RegexSet, RegexSetBuilder};
use scraper::{Html, Node, Selector};

/// Tags removed wholesale before any other pass.
const NOISE_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "svg", "canvas", "form", "input", "button",
    "select", "nav", "aside", "header", "footer",
];

/// Structural tags removed a second time inside the chosen container, in
/// case earlier passes re-exposed nested occurrences.
const CONTAINER_NOISE_TAGS: &[&str] = &["nav", "aside", "form", "footer", "header"];

/// id/class fragments that mark an element as page chrome.
const ID_CLASS_HINTS: &[&str] = &[
    "cookie", "banner", "subscribe", "newsletter", "footer", "header", "nav", "menu",
    "login", "register", "otp", "advert", "ads", "promo", "comments", "sidebar",
    "social", "share", "modal",
];

/// Line-level noise: any match disqualifies the whole line.
const NOISE_LINE_PATTERNS: &[&str] = &[
    r"\benter\s+otp\b",
    r"\botp\b",
    r"\blogin\b",
    r"\bsign\s*in\b",
    r"\bregister\b",
    r"\bdownload app\b",
    r"\bsubscribe\b",
    r"\bnewsletter\b",
    r"\bcookie\b",
    r"\bprivacy policy\b",
    r"\bterms and conditions\b",
    r"^\s*(hi there|home|contact|site map|follow|accessibility)\b",
    r"\bcomments?\b",
    r"\bleave your comment\b",
    r"\brelated posts?\b",
    r"\btop searched\b",
    r"\bcoupon\b",
    r"\bavail\b",
    r"\bwhatsapp\b",
];

static HORIZONTAL_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("whitespace pattern"));
static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("newline pattern"));

/// Replaces non-breaking spaces, collapses horizontal whitespace runs to
/// one space and 3+ newlines to exactly two, and trims the ends.
pub fn normalize_text(text: &str) -> String {
    let text = text.replace('\u{00A0}', " ");
    let text = HORIZONTAL_WS.replace_all(&text, " ");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// The heuristic tables, compiled once. Swap the constants above to tune
/// behavior; the algorithm below never hard-codes them.
#[derive(Debug, Clone)]
pub struct ExtractorSettings {
    pub noise_tags: Vec<String>,
    pub container_noise_tags: Vec<String>,
    pub id_class_hints: Vec<String>,
    noise_lines: RegexSet,
    pub min_line_chars: usize,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            noise_tags: NOISE_TAGS.iter().map(|tag| tag.to_string()).collect(),
            container_noise_tags: CONTAINER_NOISE_TAGS
                .iter()
                .map(|tag| tag.to_string())
                .collect(),
            id_class_hints: ID_CLASS_HINTS.iter().map(|hint| hint.to_string()).collect(),
            noise_lines: RegexSetBuilder::new(NOISE_LINE_PATTERNS)
                .case_insensitive(true)
                .build()
                .expect("noise line patterns"),
            min_line_chars: 3,
        }
    }
}

impl ExtractorSettings {
    /// Drops blank lines, lines matching any noise pattern, and lines
    /// shorter than the minimum length.
    pub fn drop_noise_lines(&self, text: &str) -> String {
        let mut kept = Vec::new();
        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            if self.noise_lines.is_match(line) {
                continue;
            }
            if line.chars().count() < self.min_line_chars {
                continue;
            }
            kept.push(line);
        }
        kept.join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Document `<title>` text; empty when the page has none.
    pub title: String,
    pub content: String,
}

pub trait Extractor {
    fn extract(&self, html: &str) -> Extraction;
}

/// Layered boilerplate remover: structural tag stripping, then lexical
/// id/class hints, then container selection, then a lexical line filter.
/// No single layer is sufficient across heterogeneous sites; the stack of
/// all four trades precision for coverage and is allowed to over- or
/// under-strip.
#[derive(Debug, Clone, Default)]
pub struct HeuristicExtractor {
    settings: ExtractorSettings,
}

impl HeuristicExtractor {
    pub fn new(settings: ExtractorSettings) -> Self {
        Self { settings }
    }

    fn clean(&self, text: &str) -> String {
        self.settings.drop_noise_lines(&normalize_text(text))
    }
}

impl Extractor for HeuristicExtractor {
    fn extract(&self, html: &str) -> Extraction {
        let mut doc = Html::parse_document(html);
        let title = first_text(&doc, "title");

        detach_matching_tags(&mut doc, &self.settings.noise_tags);
        detach_by_attribute_hints(&mut doc, &self.settings.id_class_hints);

        let container = select_container(&doc);
        detach_within(&mut doc, container, &self.settings.container_noise_tags);

        let content = self.clean(&flatten_text(&doc, container));
        if !content.is_empty() {
            return Extraction { title, content };
        }

        // Container text filtered away entirely: fall back to a flat dump
        // of the whole (already stripped) document.
        let fallback = flatten_text(&doc, doc.tree.root().id());
        Extraction {
            title,
            content: self.clean(&fallback),
        }
    }
}

fn first_text(doc: &Html, css: &str) -> String {
    Selector::parse(css)
        .ok()
        .and_then(|selector| {
            doc.select(&selector)
                .next()
                .map(|element| element.text().collect::<String>())
        })
        .map(|text| text.trim().to_string())
        .unwrap_or_default()
}

/// First `<article>`, else first `<main>`, else `<body>`, else the root.
fn select_container(doc: &Html) -> NodeId {
    for css in ["article", "main", "body"] {
        if let Ok(selector) = Selector::parse(css) {
            if let Some(element) = doc.select(&selector).next() {
                return element.id();
            }
        }
    }
    doc.tree.root().id()
}

fn detach_matching_tags(doc: &mut Html, tags: &[String]) {
    let ids: Vec<NodeId> = doc
        .tree
        .root()
        .descendants()
        .filter(|node| match node.value() {
            Node::Element(element) => tags
                .iter()
                .any(|tag| element.name().eq_ignore_ascii_case(tag)),
            _ => false,
        })
        .map(|node| node.id())
        .collect();
    detach_all(doc, ids);
}

fn detach_by_attribute_hints(doc: &mut Html, hints: &[String]) {
    let ids: Vec<NodeId> = doc
        .tree
        .root()
        .descendants()
        .filter_map(|node| {
            let element = match node.value() {
                Node::Element(element) => element,
                _ => return None,
            };
            let id_attr = element.attr("id").unwrap_or_default();
            let class_attr = element.attr("class").unwrap_or_default();
            if id_attr.is_empty() && class_attr.is_empty() {
                return None;
            }
            let blob = format!("{id_attr} {class_attr}").to_lowercase();
            hints
                .iter()
                .any(|hint| blob.contains(hint.as_str()))
                .then(|| node.id())
        })
        .collect();
    detach_all(doc, ids);
}

fn detach_within(doc: &mut Html, container: NodeId, tags: &[String]) {
    let Some(root) = doc.tree.get(container) else {
        return;
    };
    let ids: Vec<NodeId> = root
        .descendants()
        .filter(|node| match node.value() {
            Node::Element(element) => tags
                .iter()
                .any(|tag| element.name().eq_ignore_ascii_case(tag)),
            _ => false,
        })
        .map(|node| node.id())
        .collect();
    detach_all(doc, ids);
}

/// Best-effort removal: a node that is already gone is skipped, never an
/// error, so one odd element cannot abort extraction.
fn detach_all(doc: &mut Html, ids: Vec<NodeId>) {
    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Flattens the text nodes under `container` in document order, trimming
/// each fragment and dropping empties.
fn flatten_text(doc: &Html, container: NodeId) -> String {
    let Some(root) = doc.tree.get(container) else {
        return String::new();
    };
    let mut fragments = Vec::new();
    for node in root.descendants() {
        if let Node::Text(text) = node.value() {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                fragments.push(trimmed.to_string());
            }
        }
    }
    fragments.join("\n")
}
