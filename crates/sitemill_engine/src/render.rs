use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingStyle {
    /// `# Heading` prefixes.
    Atx,
    /// Underlined `===`/`---` headings for levels 1-2, ATX for the rest.
    Setext,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeBlockStyle {
    /// Triple-backtick fences.
    Fenced,
    /// Four-space indentation.
    Indented,
}

/// Renderer configuration. Built per run and passed by value; there is no
/// process-wide renderer state.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub heading_style: HeadingStyle,
    pub horizontal_rule: String,
    pub bullet: String,
    pub code_block_style: CodeBlockStyle,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            heading_style: HeadingStyle::Atx,
            horizontal_rule: "---".to_string(),
            bullet: "-".to_string(),
            code_block_style: CodeBlockStyle::Fenced,
        }
    }
}

/// Renders an HTML fragment to Markdown by walking the parsed DOM.
///
/// Block elements are separated by blank lines, inline whitespace is
/// collapsed, and non-content subtrees (`script`, `style`, `head`, ...) are
/// skipped. A paragraph whose text content is empty after trimming renders
/// as nothing at all.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, html: &str) -> String {
        let fragment = Html::parse_fragment(html);
        let mut ctx = RenderContext::new();
        for child in fragment.root_element().children() {
            self.visit_node(child, &mut ctx);
        }
        ctx.into_markdown()
    }

    fn visit_node<'a>(&self, node: NodeRef<'a, Node>, ctx: &mut RenderContext) {
        match node.value() {
            Node::Text(text) => ctx.append_text(text),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    self.visit_element(element, ctx);
                }
            }
            _ => {
                for child in node.children() {
                    self.visit_node(child, ctx);
                }
            }
        }
    }

    fn visit_element(&self, element: ElementRef, ctx: &mut RenderContext) {
        let tag = element.value().name().to_ascii_lowercase();
        match tag.as_str() {
            "script" | "style" | "noscript" | "iframe" | "template" | "head" => {}
            "br" => ctx.newline(),
            "hr" => {
                ctx.ensure_blank_line();
                ctx.push_raw(&self.options.horizontal_rule);
                ctx.ensure_blank_line();
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                let level = tag.as_bytes()[1] - b'0';
                self.render_heading(element, usize::from(level), ctx);
            }
            "p" | "div" | "section" | "article" | "header" | "footer" | "nav" | "figure"
            | "figcaption" | "address" | "table" | "thead" | "tbody" | "tfoot" => {
                self.render_block(element, ctx);
            }
            "tr" => {
                ctx.newline();
                self.visit_children(element, ctx);
                ctx.newline();
            }
            "td" | "th" => {
                self.visit_children(element, ctx);
                ctx.append_text(" ");
            }
            "ul" => self.render_list(element, ListKind::Bullet, ctx),
            "ol" => self.render_list(element, ListKind::Numbered(0), ctx),
            "li" => self.render_list_item(element, ctx),
            "pre" => self.render_code_block(element, ctx),
            "code" => self.render_delimited(element, "`", "`", ctx),
            "strong" | "b" => self.render_delimited(element, "**", "**", ctx),
            "em" | "i" => self.render_delimited(element, "*", "*", ctx),
            "blockquote" => self.render_blockquote(element, ctx),
            "a" => self.render_anchor(element, ctx),
            "img" => self.render_image(element, ctx),
            _ => self.visit_children(element, ctx),
        }
    }

    fn visit_children(&self, element: ElementRef, ctx: &mut RenderContext) {
        for child in element.children() {
            self.visit_node(child, ctx);
        }
    }

    /// Generic block container: blank lines around the content, and nothing
    /// at all when the content is only whitespace.
    fn render_block(&self, element: ElementRef, ctx: &mut RenderContext) {
        let mark = ctx.len();
        ctx.ensure_blank_line();
        self.visit_children(element, ctx);
        if ctx.only_whitespace_since(mark) {
            ctx.truncate(mark);
        } else {
            ctx.ensure_blank_line();
        }
    }

    fn render_heading(&self, element: ElementRef, level: usize, ctx: &mut RenderContext) {
        ctx.ensure_blank_line();
        if self.options.heading_style == HeadingStyle::Setext && level <= 2 {
            let start = ctx.len();
            self.visit_children(element, ctx);
            let width = ctx.trim_segment(start).chars().count().max(3);
            let underline = if level == 1 { "=" } else { "-" };
            ctx.newline();
            ctx.push_raw(&underline.repeat(width));
        } else {
            ctx.push_raw(&"#".repeat(level));
            ctx.push_raw(" ");
            self.visit_children(element, ctx);
        }
        ctx.ensure_blank_line();
    }

    fn render_list(&self, element: ElementRef, kind: ListKind, ctx: &mut RenderContext) {
        if ctx.list_depth() == 0 {
            ctx.ensure_blank_line();
        } else {
            ctx.newline();
        }
        ctx.push_list(kind);
        self.visit_children(element, ctx);
        ctx.pop_list();
        if ctx.list_depth() == 0 {
            ctx.ensure_blank_line();
        } else {
            ctx.newline();
        }
    }

    fn render_list_item(&self, element: ElementRef, ctx: &mut RenderContext) {
        ctx.newline();
        let indent = "  ".repeat(ctx.list_depth().saturating_sub(1));
        ctx.push_raw(&indent);
        match ctx.next_marker() {
            Some(n) => ctx.push_raw(&format!("{n}. ")),
            None => {
                ctx.push_raw(&self.options.bullet);
                ctx.push_raw(" ");
            }
        }
        self.visit_children(element, ctx);
        ctx.newline();
    }

    fn render_code_block(&self, element: ElementRef, ctx: &mut RenderContext) {
        // Literal text of the subtree, whitespace preserved.
        let code: String = element.text().collect();
        let code = code.trim_end_matches('\n');
        ctx.ensure_blank_line();
        match self.options.code_block_style {
            CodeBlockStyle::Fenced => {
                ctx.push_raw("```\n");
                ctx.push_raw(code);
                ctx.newline();
                ctx.push_raw("```");
            }
            CodeBlockStyle::Indented => {
                for line in code.lines() {
                    ctx.push_raw("    ");
                    ctx.push_raw(line);
                    ctx.newline();
                }
            }
        }
        ctx.ensure_blank_line();
    }

    /// Inline span wrapped in `open`/`close`, dropped entirely when empty.
    fn render_delimited(
        &self,
        element: ElementRef,
        open: &str,
        close: &str,
        ctx: &mut RenderContext,
    ) {
        let start = ctx.len();
        self.visit_children(element, ctx);
        let inner = ctx.trim_segment(start);
        if inner.is_empty() {
            return;
        }
        ctx.truncate(start);
        ctx.push_raw(open);
        ctx.push_raw(&inner);
        ctx.push_raw(close);
    }

    fn render_blockquote(&self, element: ElementRef, ctx: &mut RenderContext) {
        let mut inner_ctx = RenderContext::new();
        self.visit_children(element, &mut inner_ctx);
        let inner = inner_ctx.into_markdown();
        if inner.is_empty() {
            return;
        }
        ctx.ensure_blank_line();
        for line in inner.lines() {
            ctx.push_raw("> ");
            ctx.push_raw(line);
            ctx.newline();
        }
        ctx.ensure_blank_line();
    }

    fn render_anchor(&self, element: ElementRef, ctx: &mut RenderContext) {
        let href = element
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|h| !h.is_empty());
        let Some(href) = href else {
            self.visit_children(element, ctx);
            return;
        };
        let start = ctx.len();
        self.visit_children(element, ctx);
        let text = ctx.trim_segment(start);
        ctx.truncate(start);
        ctx.push_raw("[");
        ctx.push_raw(&text);
        ctx.push_raw("](");
        ctx.push_raw(href);
        ctx.push_raw(")");
    }

    fn render_image(&self, element: ElementRef, ctx: &mut RenderContext) {
        let Some(src) = element.value().attr("src").map(str::trim) else {
            return;
        };
        if src.is_empty() {
            return;
        }
        let alt = element.value().attr("alt").unwrap_or("").trim();
        ctx.push_raw(&format!("![{alt}]({src})"));
    }
}

/// Collapse any run of three or more newlines down to exactly two, then trim
/// the whole document. Applying this twice yields the same result as once.
pub fn collapse_blank_lines(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len());
    let mut newline_run = 0usize;
    for ch in markdown.chars() {
        if ch == '\n' {
            newline_run += 1;
            if newline_run <= 2 {
                out.push(ch);
            }
        } else {
            newline_run = 0;
            out.push(ch);
        }
    }
    out.trim().to_string()
}

enum ListKind {
    Bullet,
    Numbered(u64),
}

struct RenderContext {
    out: String,
    last_char: Option<char>,
    list_stack: Vec<ListKind>,
}

impl RenderContext {
    fn new() -> Self {
        Self {
            out: String::new(),
            last_char: None,
            list_stack: Vec::new(),
        }
    }

    fn into_markdown(self) -> String {
        self.out.trim().to_string()
    }

    fn len(&self) -> usize {
        self.out.len()
    }

    fn append_text(&mut self, text: &str) {
        for ch in text.chars() {
            if ch.is_whitespace() {
                if self.last_char == Some(' ') || self.last_char == Some('\n') {
                    continue;
                }
                self.push_char(' ');
            } else {
                self.push_char(ch);
            }
        }
    }

    fn push_raw(&mut self, text: &str) {
        for ch in text.chars() {
            self.push_char(ch);
        }
    }

    fn newline(&mut self) {
        if self.last_char == Some('\n') || self.out.is_empty() {
            return;
        }
        self.push_char('\n');
    }

    fn ensure_blank_line(&mut self) {
        if self.out.is_empty() {
            return;
        }
        while !self.out.ends_with("\n\n") {
            self.push_char('\n');
        }
        self.last_char = Some('\n');
    }

    fn push_char(&mut self, ch: char) {
        self.out.push(ch);
        self.last_char = Some(ch);
    }

    fn only_whitespace_since(&self, mark: usize) -> bool {
        self.out[mark..].trim().is_empty()
    }

    /// Trimmed copy of everything emitted since `mark`.
    fn trim_segment(&self, mark: usize) -> String {
        self.out[mark..].trim().to_string()
    }

    fn truncate(&mut self, mark: usize) {
        self.out.truncate(mark);
        self.last_char = self.out.chars().last();
    }

    fn list_depth(&self) -> usize {
        self.list_stack.len()
    }

    fn push_list(&mut self, kind: ListKind) {
        self.list_stack.push(kind);
    }

    fn pop_list(&mut self) {
        self.list_stack.pop();
    }

    /// Next ordered-list number, or `None` inside a bullet list.
    fn next_marker(&mut self) -> Option<u64> {
        match self.list_stack.last_mut() {
            Some(ListKind::Numbered(n)) => {
                *n += 1;
                Some(*n)
            }
            _ => None,
        }
    }
}
