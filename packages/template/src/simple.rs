//! The default template dialect.
//!
//! Supports `{NAME}` slot substitution, `{"message"}` translation literals
//! and `<!-- BEGIN name -->` / `<!-- END name -->` repeatable blocks. Block
//! rows accumulate in push order; pushing a row consumes the accumulated
//! rows of the blocks nested directly inside it, which is what lets a flat
//! push sequence reproduce nested loops.

use crate::ast::{BlockDef, TemplateNode};
use crate::error::{TemplateError, TemplateResult};
use crate::lexer::{block_name, tokenize, Token};
use crate::renderer::Template;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};
use weave_common::{FileSystem, RealFileSystem};

pub struct SimpleTemplate {
    fs: Arc<dyn FileSystem>,
    root: Vec<TemplateNode>,
    blocks: HashMap<String, BlockDef>,
    vars: HashMap<String, String>,
    /// Accumulated rendered rows per block name
    parsed: HashMap<String, String>,
}

impl SimpleTemplate {
    pub fn new() -> Self {
        Self::with_filesystem(Arc::new(RealFileSystem))
    }

    pub fn with_filesystem(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            fs,
            root: Vec::new(),
            blocks: HashMap::new(),
            vars: HashMap::new(),
            parsed: HashMap::new(),
        }
    }

    /// Parse a source string into a root node list and a block registry.
    /// Never fails: unbalanced markers degrade to a diagnostic.
    fn parse(source: &str) -> (Vec<TemplateNode>, HashMap<String, BlockDef>) {
        let mut blocks = HashMap::new();
        let mut stack: Vec<(String, Vec<TemplateNode>, Vec<String>)> = Vec::new();
        let mut nodes: Vec<TemplateNode> = Vec::new();
        let mut children: Vec<String> = Vec::new();

        for token in tokenize(source) {
            match token {
                Token::Text(text) => match nodes.last_mut() {
                    Some(TemplateNode::Text { content }) => content.push_str(text),
                    _ => nodes.push(TemplateNode::text(text)),
                },
                Token::Var(slice) => {
                    nodes.push(TemplateNode::var(&slice[1..slice.len() - 1]));
                }
                Token::Message(slice) => {
                    nodes.push(TemplateNode::message(&slice[2..slice.len() - 2]));
                }
                Token::BeginBlock(marker) => {
                    let name = block_name(marker).to_string();
                    nodes.push(TemplateNode::block(name.clone()));
                    children.push(name.clone());
                    stack.push((name, std::mem::take(&mut nodes), std::mem::take(&mut children)));
                }
                Token::EndBlock(marker) => {
                    let name = block_name(marker);
                    let closes_innermost = stack
                        .last()
                        .is_some_and(|(open, _, _)| open == name);
                    if closes_innermost {
                        let (block, outer_nodes, outer_children) =
                            stack.pop().unwrap_or_default();
                        blocks.insert(
                            block,
                            BlockDef {
                                nodes: std::mem::replace(&mut nodes, outer_nodes),
                                children: std::mem::replace(&mut children, outer_children),
                            },
                        );
                    } else {
                        warn!(block = name, "unbalanced END marker ignored");
                    }
                }
            }
        }

        while let Some((block, outer_nodes, outer_children)) = stack.pop() {
            warn!(block = %block, "unterminated block auto-closed");
            blocks.insert(
                block,
                BlockDef {
                    nodes: std::mem::replace(&mut nodes, outer_nodes),
                    children: std::mem::replace(&mut children, outer_children),
                },
            );
        }

        (nodes, blocks)
    }

    fn expand(
        nodes: &[TemplateNode],
        row: Option<&HashMap<String, String>>,
        vars: &HashMap<String, String>,
        parsed: &HashMap<String, String>,
    ) -> String {
        let lookup = |name: &str| {
            row.and_then(|r| r.get(name))
                .or_else(|| vars.get(name))
                .cloned()
        };

        let mut out = String::new();
        for node in nodes {
            match node {
                TemplateNode::Text { content } => out.push_str(content),
                TemplateNode::Var { name } => {
                    out.push_str(&lookup(name).unwrap_or_default());
                }
                TemplateNode::Message { key } => {
                    // Translation data is bound under the quote-wrapped key;
                    // the literal itself is the fallback.
                    let quoted = format!("\"{key}\"");
                    out.push_str(&lookup(&quoted).unwrap_or_else(|| key.clone()));
                }
                TemplateNode::Block { name } => {
                    out.push_str(parsed.get(name).map(String::as_str).unwrap_or_default());
                }
            }
        }
        out
    }
}

impl Default for SimpleTemplate {
    fn default() -> Self {
        Self::new()
    }
}

impl Template for SimpleTemplate {
    fn set_file(&mut self, path: &Path) -> TemplateResult<()> {
        if !self.fs.exists(path) {
            return Err(TemplateError::file_not_found(path));
        }
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|_| TemplateError::file_not_found(path))?;
        self.set_content(&content);
        Ok(())
    }

    fn set_content(&mut self, content: &str) {
        let (root, blocks) = Self::parse(content);
        self.root = root;
        self.blocks = blocks;
        self.parsed.clear();
    }

    fn set_var(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    fn set_block(&mut self, name: &str, vars: &HashMap<String, String>) {
        let Some(def) = self.blocks.get(name) else {
            debug!(block = name, "set_block on unknown block ignored");
            return;
        };
        let rendered = Self::expand(&def.nodes, Some(vars), &self.vars, &self.parsed);
        let children = def.children.clone();
        for child in &children {
            self.parsed.remove(child);
        }
        self.parsed.entry(name.to_string()).or_default().push_str(&rendered);
    }

    fn render(&self) -> String {
        Self::expand(&self.root, None, &self.vars, &self.parsed)
    }
}
