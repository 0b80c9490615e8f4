use serde::{Deserialize, Serialize};

/// One node of a parsed simple-dialect template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TemplateNode {
    /// Literal text emitted verbatim
    Text { content: String },

    /// `{NAME}` slot substitution
    Var { name: String },

    /// `{"message"}` translation literal
    Message { key: String },

    /// `<!-- BEGIN name --> ... <!-- END name -->` repeatable section,
    /// emitted as the block's accumulated rows
    Block { name: String },
}

impl TemplateNode {
    pub fn text(content: impl Into<String>) -> Self {
        TemplateNode::Text {
            content: content.into(),
        }
    }

    pub fn var(name: impl Into<String>) -> Self {
        TemplateNode::Var { name: name.into() }
    }

    pub fn message(key: impl Into<String>) -> Self {
        TemplateNode::Message { key: key.into() }
    }

    pub fn block(name: impl Into<String>) -> Self {
        TemplateNode::Block { name: name.into() }
    }
}

/// Body of a named repeatable block
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockDef {
    pub nodes: Vec<TemplateNode>,
    /// Names of blocks nested directly inside this one; their accumulated
    /// rows are consumed each time a row of this block is pushed
    pub children: Vec<String>,
}
