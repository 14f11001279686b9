//! Tree construction from the token sequence.
//!
//! The parser maintains a single mutable stack of open nodes over the
//! arena tree. Text leaves are pushed onto the stack pending attachment
//! exactly like elements; a closing tag searches the stack from the top
//! for the nearest matching ancestor and absorbs everything above it as
//! that ancestor's children. Structural anomalies never fail the parse:
//! each is resolved by a lenient rule and recorded as a [`ParseIssue`].

use std::collections::HashSet;

use tern_dom::{AttrValue, BuildStage, DocTree, ElementData, NodeId, NodeKind};

use crate::token::{Token, TokenKind};

/// Tag names that are self-closing by definition, per the HTML living
/// standard's list of void elements. Matched ASCII case-insensitively.
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// A recoverable structural anomaly encountered while building the tree.
///
/// Issues never fail the pipeline; they exist so debugging surfaces (the
/// CLI's tree dump) can show what the lenient rules papered over.
#[derive(Debug, Clone)]
pub struct ParseIssue {
    /// Description of the anomaly and how it was resolved.
    pub message: String,
    /// 1-based line of the token that triggered it.
    pub line: u32,
    /// 1-based column of the token that triggered it.
    pub col: u32,
}

/// The markup parser: tokens in, arena document tree out.
pub struct Parser {
    tokens: Vec<Token>,
    tree: DocTree,
    /// The open-node stack. Entries are arena ids of elements under
    /// construction and text leaves pending attachment.
    stack: Vec<NodeId>,
    /// Elements whose closing tag has already matched. They stay on the
    /// stack (and may even re-match a later stray closer), but at end of
    /// input they no longer adopt the entries above them.
    closed: HashSet<NodeId>,
    issues: Vec<ParseIssue>,
}

impl Parser {
    /// Create a parser for the given token sequence.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            tree: DocTree::new(),
            stack: Vec::new(),
            closed: HashSet::new(),
            issues: Vec::new(),
        }
    }

    /// Run the parser and return the document tree.
    #[must_use]
    pub fn run(self) -> DocTree {
        self.run_with_issues().0
    }

    /// Run the parser and return the tree together with the recorded
    /// structural anomalies.
    #[must_use]
    pub fn run_with_issues(mut self) -> (DocTree, Vec<ParseIssue>) {
        let tokens = std::mem::take(&mut self.tokens);
        let mut i = 0;

        while i < tokens.len() {
            let token = &tokens[i];

            let Some(&top) = self.stack.last() else {
                i = self.handle_top_level(&tokens, i);
                continue;
            };
            let top_stage = self.tree.as_element(top).map(|data| data.stage);

            i = match (token.kind, top_stage) {
                (TokenKind::Identifier, Some(BuildStage::Naming)) => {
                    self.name_element(top, token);
                    i + 1
                }
                (TokenKind::Identifier, Some(BuildStage::CollectingAttributes)) => {
                    self.collect_attribute(top, &tokens, i)
                }
                // Body context, or a text leaf on top of the stack: any
                // textual token becomes a new pending leaf.
                (
                    TokenKind::Identifier | TokenKind::FreeText,
                    Some(BuildStage::CollectingBody) | None,
                ) => {
                    self.push_text(token.value.clone());
                    i + 1
                }
                (TokenKind::QuotedString, Some(BuildStage::CollectingBody) | None) => {
                    // Preserved verbatim as literal quoted content.
                    self.push_text(format!("\"{}\"", token.value));
                    i + 1
                }
                (TokenKind::Punctuation, _) => self.handle_punctuation(&tokens, i, top, top_stage),
                // A stray string or free text inside an opening tag has
                // no place to go; drop it.
                _ => i + 1,
            };
        }

        self.fold_remaining();

        (self.tree, self.issues)
    }

    /// Return the structural anomalies recorded so far.
    #[must_use]
    pub fn get_issues(&self) -> &[ParseIssue] {
        &self.issues
    }

    /// Stack-empty handling: textual tokens attach straight to the
    /// document root; `<` opens a new element.
    fn handle_top_level(&mut self, tokens: &[Token], i: usize) -> usize {
        let token = &tokens[i];
        match token.kind {
            TokenKind::Identifier | TokenKind::FreeText => {
                let leaf = self.tree.alloc(NodeKind::Text(token.value.clone()));
                self.tree.append_child(NodeId::ROOT, leaf);
            }
            TokenKind::QuotedString => {
                let leaf = self
                    .tree
                    .alloc(NodeKind::Text(format!("\"{}\"", token.value)));
                self.tree.append_child(NodeId::ROOT, leaf);
            }
            TokenKind::Punctuation => {
                if token.value == "<" {
                    self.open_element();
                }
                // Other punctuation at top level has no meaning; ignore.
            }
        }
        i + 1
    }

    /// Allocate an empty element in the naming stage and push it.
    fn open_element(&mut self) {
        let id = self.tree.alloc(NodeKind::Element(ElementData::unnamed()));
        self.stack.push(id);
    }

    /// Push a new text leaf onto the open stack.
    fn push_text(&mut self, value: String) {
        let id = self.tree.alloc(NodeKind::Text(value));
        self.stack.push(id);
    }

    /// The first identifier after `<` names the element. Known void
    /// names are sealed immediately so a later closing-tag search skips
    /// them.
    fn name_element(&mut self, top: NodeId, token: &Token) {
        if let Some(data) = self.tree.as_element_mut(top) {
            data.name = token.value.clone();
            data.void = VOID_ELEMENTS
                .iter()
                .any(|v| token.value.eq_ignore_ascii_case(v));
            data.stage = BuildStage::CollectingAttributes;
        }
    }

    /// An identifier in the attribute stage starts an attribute. With a
    /// following `=` and value token the attribute takes that value and
    /// both tokens are consumed; otherwise it becomes a bare flag.
    fn collect_attribute(&mut self, top: NodeId, tokens: &[Token], i: usize) -> usize {
        let name = tokens[i].value.clone();
        let has_equals = tokens.get(i + 1).is_some_and(|t| t.is_punctuation("="));
        let value = tokens.get(i + 2).filter(|t| {
            matches!(t.kind, TokenKind::QuotedString | TokenKind::Identifier)
        });

        let Some(data) = self.tree.as_element_mut(top) else {
            return i + 1;
        };

        if has_equals {
            if let Some(value) = value {
                let _ = data
                    .attributes
                    .insert(name, AttrValue::Value(value.value.clone()));
                return i + 3;
            }
            // `=` with nothing usable after it: fall back to a flag and
            // let the stray `=` be ignored on the next pass.
            let _ = data.attributes.insert(name, AttrValue::Flag);
            self.record(
                format!("malformed attribute assignment for {:?}", tokens[i].value),
                &tokens[i],
            );
            return i + 1;
        }

        let _ = data.attributes.insert(name, AttrValue::Flag);
        i + 1
    }

    /// Punctuation with a non-empty stack. Mirrors the three checks of
    /// the grammar: closing/opening tags in body context, `/>` sealing,
    /// and the bare `>` stage advance.
    fn handle_punctuation(
        &mut self,
        tokens: &[Token],
        i: usize,
        top: NodeId,
        top_stage: Option<BuildStage>,
    ) -> usize {
        let token = &tokens[i];
        let in_body = matches!(top_stage, Some(BuildStage::CollectingBody) | None);

        if token.value == "<" && in_body {
            if tokens.get(i + 1).is_some_and(|t| t.is_punctuation("/")) {
                return self.close_tag(tokens, i);
            }
            self.open_element();
            return i + 1;
        }

        if token.value == "/"
            && matches!(
                top_stage,
                Some(BuildStage::Naming | BuildStage::CollectingAttributes)
            )
            && tokens.get(i + 1).is_some_and(|t| t.is_punctuation(">"))
        {
            // Self-closing mark: seal as void, consume the `>` too.
            if let Some(data) = self.tree.as_element_mut(top) {
                data.void = true;
                data.stage = BuildStage::CollectingBody;
            }
            return i + 2;
        }

        if token.value == ">" && top_stage.is_some() {
            if let Some(data) = self.tree.as_element_mut(top) {
                data.stage = BuildStage::CollectingBody;
            }
            return i + 1;
        }

        i + 1
    }

    /// A `</name>` sequence. Search the stack from the top for the
    /// nearest non-void element with that name; absorb everything above
    /// it as children. An unmatched closer is a no-op.
    fn close_tag(&mut self, tokens: &[Token], i: usize) -> usize {
        let name = match (tokens.get(i + 2), tokens.get(i + 3)) {
            (Some(name), Some(end))
                if name.kind == TokenKind::Identifier && end.is_punctuation(">") =>
            {
                name.value.clone()
            }
            _ => {
                self.record("malformed closing tag".to_string(), &tokens[i]);
                // The closing sequence is consumed even when malformed.
                return (i + 4).min(tokens.len());
            }
        };
        let matched = self.stack.iter().rposition(|&id| {
            self.tree
                .as_element(id)
                .is_some_and(|data| !data.void && data.name == *name)
        });

        match matched {
            Some(index) => {
                let parent = self.stack[index];
                let absorbed = self.stack.split_off(index + 1);
                for id in absorbed {
                    self.tree.append_child(parent, id);
                }
                let _ = self.closed.insert(parent);
            }
            None => {
                self.record(format!("unmatched closing tag </{name}>"), &tokens[i]);
            }
        }

        i + 4
    }

    /// End of input: fold the remaining stack upward. Each entry
    /// attaches to the nearest still-open, non-void element below it on
    /// the stack; entries with no such element attach to the document
    /// root, in order, in whatever construction stage they reached.
    fn fold_remaining(&mut self) {
        let stack = std::mem::take(&mut self.stack);
        for (index, &id) in stack.iter().enumerate() {
            let parent = stack[..index]
                .iter()
                .rev()
                .copied()
                .find(|&candidate| {
                    !self.closed.contains(&candidate)
                        && self
                            .tree
                            .as_element(candidate)
                            .is_some_and(|data| !data.void)
                })
                .unwrap_or(NodeId::ROOT);
            self.tree.append_child(parent, id);
        }
    }

    fn record(&mut self, message: String, token: &Token) {
        self.issues.push(ParseIssue {
            message,
            line: token.line,
            col: token.col,
        });
    }
}

/// Print an indented rendering of the tree to stdout, for debugging.
pub fn print_tree(tree: &DocTree, id: NodeId, indent: usize) {
    let prefix = "  ".repeat(indent);
    if let Some(node) = tree.get(id) {
        match &node.kind {
            NodeKind::Document => {
                println!("{prefix}Document");
            }
            NodeKind::Element(data) => {
                if data.attributes.is_empty() {
                    println!("{prefix}<{}>", data.name);
                } else {
                    let attrs: Vec<String> = data
                        .attributes
                        .iter()
                        .map(|(k, v)| match v {
                            AttrValue::Value(text) => format!("{k}=\"{text}\""),
                            AttrValue::Flag => k.clone(),
                        })
                        .collect();
                    println!("{prefix}<{} {}>", data.name, attrs.join(" "));
                }
            }
            NodeKind::Text(data) => {
                let display = data.replace('\n', "\\n");
                println!("{prefix}\"{display}\"");
            }
        }
        for &child_id in tree.children(id) {
            print_tree(tree, child_id, indent + 1);
        }
    }
}
