use strum_macros::Display;

use mulga_common::warning::warn_once;
use mulga_tree::{Attribute, MarkupTree, NodeId};

use crate::tokenizer::split_tokens;

/// The two scanning modes, flipped by `<` and `>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScanState {
    /// Between tags; characters accumulate as element text.
    OutsideTag,
    /// Between `<` and `>`; characters accumulate as the tag body.
    InsideTag,
}

/// A recoverable problem found while scanning.
///
/// The scanner never aborts on malformed input. It repairs what it can and
/// records what it saw.
#[derive(Debug, Clone)]
pub struct ParseIssue {
    /// Description of the problem.
    pub message: String,
    /// Byte offset into the input just past where the problem was noticed.
    pub offset: usize,
}

/// Single-pass markup scanner and tree builder.
///
/// Walks the input character by character, flipping between
/// [`ScanState::OutsideTag`] and [`ScanState::InsideTag`], and grows a
/// [`MarkupTree`] as tags open and close. Nesting is tracked through a
/// single open-element cursor rather than a stack: opening a tag moves the
/// cursor down, a closing tag moves it to the parent, and no name matching
/// is required for the tree to take shape.
pub struct Scanner {
    state: ScanState,
    input: String,

    /// Byte position of the next character to consume.
    current_pos: usize,

    /// Tree under construction. `NodeId::ROOT` is the document node.
    tree: MarkupTree,

    /// Innermost element whose closing tag is still outstanding. `None`
    /// means new elements attach to the document node.
    open_element: Option<NodeId>,

    /// Characters collected since the last tag while outside any tag.
    text_buffer: String,

    /// Byte budget for `text_buffer`; characters past it are dropped.
    text_capacity: usize,

    /// Whether the current text run already overflowed the budget.
    text_overflowed: bool,

    /// Characters collected between `<` and `>`.
    tag_buffer: String,

    /// Problems recorded so far.
    issues: Vec<ParseIssue>,
}

impl Scanner {
    /// Create a scanner over `input`.
    ///
    /// The text budget defaults to the input length in bytes, so truncation
    /// only happens when a smaller budget is set through
    /// [`Self::with_text_capacity`].
    #[must_use]
    pub fn new(input: String) -> Self {
        let text_capacity = input.len();
        Self {
            state: ScanState::OutsideTag,
            input,
            current_pos: 0,
            tree: MarkupTree::new(),
            open_element: None,
            text_buffer: String::new(),
            text_capacity,
            text_overflowed: false,
            tag_buffer: String::new(),
            issues: Vec::new(),
        }
    }

    /// Override the element-text budget in bytes.
    #[must_use]
    pub const fn with_text_capacity(mut self, capacity: usize) -> Self {
        self.text_capacity = capacity;
        self
    }

    /// Get all issues recorded so far.
    #[must_use]
    pub fn get_issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Run the scanner and return the finished tree.
    #[must_use]
    pub fn run(mut self) -> MarkupTree {
        while let Some(c) = self.consume() {
            match self.state {
                ScanState::OutsideTag => self.handle_outside_tag_state(c),
                ScanState::InsideTag => self.handle_inside_tag_state(c),
            }
        }
        self.finish();
        self.tree
    }

    /// Run the scanner and return both the tree and the recorded issues.
    #[must_use]
    pub fn run_with_issues(mut self) -> (MarkupTree, Vec<ParseIssue>) {
        while let Some(c) = self.consume() {
            match self.state {
                ScanState::OutsideTag => self.handle_outside_tag_state(c),
                ScanState::InsideTag => self.handle_inside_tag_state(c),
            }
        }
        self.finish();
        let issues = std::mem::take(&mut self.issues);
        (self.tree, issues)
    }

    /// Consume the next input character, advancing the scan position.
    fn consume(&mut self) -> Option<char> {
        if let Some(c) = self.input[self.current_pos..].chars().next() {
            self.current_pos += c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    /// Outside any tag: text accumulates until `<` opens a tag.
    fn handle_outside_tag_state(&mut self, c: char) {
        if c == '<' {
            self.flush_text();
            self.tag_buffer.clear();
            self.state = ScanState::InsideTag;
        } else {
            // A stray '>' out here is ordinary text.
            self.buffer_text(c);
        }
    }

    /// Inside a tag: the body accumulates until `>` finishes the tag.
    fn handle_inside_tag_state(&mut self, c: char) {
        match c {
            '>' => {
                self.finish_tag();
                self.state = ScanState::OutsideTag;
            }
            '<' => {
                self.scan_warning("stray '<' inside a tag, restarting the tag");
                self.tag_buffer.clear();
            }
            _ => self.tag_buffer.push(c),
        }
    }

    /// Append a text character, honoring the text budget.
    fn buffer_text(&mut self, c: char) {
        if self.text_buffer.len() + c.len_utf8() > self.text_capacity {
            if !self.text_overflowed {
                self.text_overflowed = true;
                let message = format!(
                    "text run exceeds the {} byte budget, truncating it",
                    self.text_capacity
                );
                self.scan_warning(&message);
            }
            return;
        }
        self.text_buffer.push(c);
    }

    /// Attach the pending text run to the open element.
    ///
    /// Blank runs are discarded without a record. A non-blank run replaces
    /// any earlier text on the element.
    fn flush_text(&mut self) {
        let text = std::mem::take(&mut self.text_buffer);
        self.text_overflowed = false;
        if Self::is_blank(&text) {
            return;
        }
        let Some(open) = self.open_element else {
            self.scan_warning("text outside of any element, discarding it");
            return;
        };
        let overwritten = self
            .tree
            .as_element(open)
            .filter(|data| data.text.is_some())
            .map(|data| format!("element <{}> already has text, overwriting it", data.tag));
        if let Some(message) = overwritten {
            self.scan_warning(&message);
        }
        if let Some(data) = self.tree.as_element_mut(open) {
            data.text = Some(text);
        }
    }

    /// Blank means spaces, tabs, and newlines only; a carriage return counts
    /// as content. The empty string is blank.
    fn is_blank(text: &str) -> bool {
        text.chars().all(|c| matches!(c, ' ' | '\t' | '\n'))
    }

    /// Classify and apply the finished tag body.
    fn finish_tag(&mut self) {
        let body = std::mem::take(&mut self.tag_buffer);
        if body.starts_with('/') {
            self.close_tag(&body);
        } else {
            self.open_tag(&body);
        }
    }

    /// Open a new element (or a self-closing one) from a tag body.
    fn open_tag(&mut self, body: &str) {
        // The trailing '/' marks a self-closing tag. It is stripped before
        // tokenizing so neither the name nor an attribute carries it.
        let (body, self_closing) = match body.strip_suffix('/') {
            Some(stripped) => (stripped, true),
            None => (body, false),
        };

        let tokens = split_tokens(body, ' ', Some('"'));
        let Some((name, attr_fragments)) = tokens.split_first() else {
            self.scan_warning("empty tag, skipping it");
            return;
        };

        let element = self.tree.alloc_element(name.clone());
        let parent = self.open_element.unwrap_or(NodeId::ROOT);
        self.tree.append_child(parent, element);
        if !self_closing {
            self.open_element = Some(element);
        }

        for fragment in attr_fragments {
            self.parse_attribute(element, fragment);
        }
    }

    /// Extract one `key="value"` pair from an attribute fragment.
    ///
    /// The fragment splits on `=`; the first piece is the key and the second
    /// is the quoted value fragment, which in turn splits on `"` so that the
    /// second quote token is the bare value. Fragments missing any of those
    /// pieces are dropped.
    fn parse_attribute(&mut self, element: NodeId, fragment: &str) {
        let pieces = split_tokens(fragment, '=', None);
        let Some((key, rest)) = pieces.split_first() else {
            return;
        };
        if key.is_empty() {
            let message = format!("attribute fragment '{fragment}' has an empty key, dropping it");
            self.scan_warning(&message);
            return;
        }
        let Some(value_fragment) = rest.first() else {
            self.scan_warning(&format!("attribute '{key}' has no value, dropping it"));
            return;
        };
        let quoted = split_tokens(value_fragment, '"', None);
        let Some(value) = quoted.get(1).filter(|value| !value.is_empty()) else {
            let message = format!("attribute '{key}' has no quoted value, dropping it");
            self.scan_warning(&message);
            return;
        };
        if let Some(data) = self.tree.as_element_mut(element) {
            data.attributes.push(Attribute::new(key.clone(), value.clone()));
        }
    }

    /// Move the open-element cursor up for a closing tag.
    ///
    /// The pop is positional: whatever element is open gets closed, and a
    /// name mismatch is recorded but never changes the tree shape.
    fn close_tag(&mut self, body: &str) {
        let name = body[1..].trim();
        let Some(open) = self.open_element else {
            let message = format!("closing tag </{name}> with nothing open, ignoring it");
            self.scan_warning(&message);
            return;
        };
        let mismatch = self
            .tree
            .as_element(open)
            .filter(|data| data.tag != name)
            .map(|data| {
                format!(
                    "closing tag </{name}> does not match open element <{}>",
                    data.tag
                )
            });
        if let Some(message) = mismatch {
            self.scan_warning(&message);
        }
        self.open_element = self
            .tree
            .parent(open)
            .filter(|&parent| parent != NodeId::ROOT);
    }

    /// Handle end of input: pending tag and text buffers are discarded.
    fn finish(&mut self) {
        match self.state {
            ScanState::InsideTag => {
                self.scan_warning("input ended inside a tag, discarding it");
                self.tag_buffer.clear();
            }
            ScanState::OutsideTag => {
                let text = std::mem::take(&mut self.text_buffer);
                if !Self::is_blank(&text) {
                    self.scan_warning("text after the last tag, discarding it");
                }
            }
        }
    }

    /// Record a recoverable problem: once on the warning channel, always in
    /// the issue list.
    fn scan_warning(&mut self, message: &str) {
        warn_once("Scanner", message);
        self.issues.push(ParseIssue {
            message: message.to_string(),
            offset: self.current_pos,
        });
    }
}

/// Render a tree as an indented outline for debugging.
///
/// Each element prints as `depth - tag` behind one `--` marker per depth
/// level, attributes as `:key = value` lines, and element text between
/// triple quotes:
///
/// ```text
/// 0 - map
///     :width = 4
/// --1 - layer
///     """ 1,2,3 """
/// ```
#[must_use]
pub fn render_tree(tree: &MarkupTree) -> String {
    let mut out = String::new();
    for &child in tree.children(tree.root()) {
        render_node(tree, child, 0, &mut out);
    }
    out
}

/// Print a tree outline to stdout for debugging.
pub fn print_tree(tree: &MarkupTree) {
    print!("{}", render_tree(tree));
}

fn render_node(tree: &MarkupTree, id: NodeId, depth: usize, out: &mut String) {
    let Some(data) = tree.as_element(id) else {
        return;
    };
    out.push_str(&"--".repeat(depth));
    out.push_str(&format!("{depth} - {}\n", data.tag));
    let indent = "  ".repeat(depth);
    for attr in &data.attributes {
        out.push_str(&format!("{indent}    :{} = {}\n", attr.key, attr.value));
    }
    if let Some(text) = &data.text {
        let text_indent = "  ".repeat(depth + 1);
        out.push_str(&format!("{text_indent}\"\"\" {text} \"\"\"\n"));
    }
    for &child in tree.children(id) {
        render_node(tree, child, depth + 1, out);
    }
}
