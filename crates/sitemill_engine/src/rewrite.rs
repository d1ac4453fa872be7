use ego_tree::NodeId;
use scraper::node::Node;
use scraper::Html;

/// Prefix every root-relative `href`/`src` attribute with `domain`.
///
/// Only values starting with `/` are touched; absolute and relative links,
/// fragments, and every other attribute pass through unchanged. No scheme is
/// added: `example.com` + `/docs/page` yields `example.com/docs/page`.
/// Returns the re-serialized document.
pub fn rewrite_links(html: &str, domain: &str) -> String {
    let mut document = Html::parse_document(html);

    let targets: Vec<NodeId> = document
        .tree
        .root()
        .descendants()
        .filter(|node| match node.value() {
            Node::Element(element) => matches!(element.name(), "a" | "img"),
            _ => false,
        })
        .map(|node| node.id())
        .collect();

    for id in targets {
        let Some(mut node) = document.tree.get_mut(id) else {
            continue;
        };
        let Node::Element(element) = node.value() else {
            continue;
        };
        let attr_name = if element.name() == "a" { "href" } else { "src" };
        for (name, value) in element.attrs.iter_mut() {
            if &*name.local == attr_name && value.starts_with('/') {
                let rewritten = format!("{domain}{value}");
                *value = rewritten.as_str().into();
            }
        }
    }

    document.root_element().html()
}
