//! # Component tree model
//!
//! A `Component` owns a template, named slots, repeatable block rows,
//! lifecycle hooks and a translator chain. Rendering collapses the whole
//! tree into one string.
//!
//! ## Lifecycle contract
//!
//! **INVARIANT: every phase fires exactly once per node.**
//!
//! - `added` fires when the node is first stored as a slot value on another
//!   node, or at the node's own first render if it was never attached.
//! - `mount` fires at the start of the node's render, before any child is
//!   resolved.
//! - `mounted` fires after every child reachable through slots and block
//!   rows has been resolved to text, and before the node's template runs.
//!
//! For a chain root → child → grandchild the observed order is:
//! grandchild.added, child.added, root.added, root.mount, child.mount,
//! grandchild.mount, grandchild.mounted, child.mounted, root.mounted.
//!
//! A node renders at most once. The transition from `Building` to
//! `Resolved` is structural: once resolved, the cached string is returned
//! unconditionally and no callback can re-fire, so a node referenced from
//! two slots emits its lifecycle exactly once.
//!
//! ## Error posture
//!
//! A missing template file falls back to empty content with a diagnostic.
//! Nothing in this module returns an error to the caller; the only failure
//! surface is "renders as empty".

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use tracing::{error, instrument, warn};
use weave_template::{create_template, Template, TemplateError, DEFAULT_KIND};
use weave_translate::{create_translator, sprintf, Translator, TranslatorKind};

/// Value held by a named slot: resolved text, or a child component waiting
/// to be rendered in place.
#[derive(Clone)]
pub enum SlotValue {
    Text(String),
    Node(Component),
}

impl SlotValue {
    fn is_empty_text(&self) -> bool {
        matches!(self, SlotValue::Text(text) if text.is_empty())
    }
}

impl From<&str> for SlotValue {
    fn from(text: &str) -> Self {
        SlotValue::Text(text.to_string())
    }
}

impl From<String> for SlotValue {
    fn from(text: String) -> Self {
        SlotValue::Text(text)
    }
}

impl From<&String> for SlotValue {
    fn from(text: &String) -> Self {
        SlotValue::Text(text.clone())
    }
}

impl From<Component> for SlotValue {
    fn from(component: Component) -> Self {
        SlotValue::Node(component)
    }
}

impl From<&Component> for SlotValue {
    fn from(component: &Component) -> Self {
        SlotValue::Node(component.clone())
    }
}

type Callback = Box<dyn FnMut(&Component)>;

/// One pushed row of a repeatable block
struct BlockRow {
    name: String,
    vars: BTreeMap<String, SlotValue>,
}

enum RenderState {
    Building,
    Resolved(String),
}

struct Inner {
    template_kind: String,
    template: Box<dyn Template>,
    slots: BTreeMap<String, SlotValue>,
    blocks: Vec<BlockRow>,
    translators: Vec<Arc<dyn Translator>>,
    parent: Option<Weak<RefCell<Inner>>>,
    added_callbacks: Vec<Callback>,
    mount_callbacks: Vec<Callback>,
    mounted_callbacks: Vec<Callback>,
    added_fired: bool,
    rendering: bool,
    state: RenderState,
}

/// A renderable component. Cloning is cheap and clones share the same
/// underlying node, so a component stored in two slots is still one node
/// with one lifecycle.
#[derive(Clone)]
pub struct Component {
    inner: Rc<RefCell<Inner>>,
}

impl Component {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                template_kind: DEFAULT_KIND.to_string(),
                template: create_template(DEFAULT_KIND),
                slots: BTreeMap::new(),
                blocks: Vec::new(),
                translators: Vec::new(),
                parent: None,
                added_callbacks: Vec::new(),
                mount_callbacks: Vec::new(),
                mounted_callbacks: Vec::new(),
                added_fired: false,
                rendering: false,
                state: RenderState::Building,
            })),
        }
    }

    /// Build an anonymous component whose template is the ordered
    /// juxtaposition of the given items, one slot per item. No separator is
    /// injected between items. Zero items render to the empty string.
    pub fn concat<T: Into<SlotValue>>(items: Vec<T>) -> Component {
        let node = Component::new();
        let mut template = String::new();
        for (index, item) in items.into_iter().enumerate() {
            template.push('{');
            template.push_str(&index.to_string());
            template.push('}');
            node.set_var(index.to_string(), item);
        }
        node.set_template_content(&template);
        node
    }

    // ---- template ----------------------------------------------------

    pub fn template_kind(&self) -> String {
        self.inner.borrow().template_kind.clone()
    }

    /// Switch the template dialect. A no-op when the kind is unchanged;
    /// otherwise the renderer is recreated and previously set source is
    /// discarded.
    pub fn set_template_type(&self, kind: &str) {
        let mut inner = self.inner.borrow_mut();
        if inner.template_kind == kind {
            return;
        }
        inner.template_kind = kind.to_string();
        inner.template = create_template(kind);
    }

    /// Load the template from a file in the default dialect. A missing
    /// file falls back to empty content with a diagnostic.
    pub fn set_template_file(&self, file: impl AsRef<Path>) {
        self.set_template_file_typed(file, DEFAULT_KIND);
    }

    pub fn set_template_file_typed(&self, file: impl AsRef<Path>, kind: &str) {
        self.set_template_type(kind);
        let path = file.as_ref();
        let result = self.inner.borrow_mut().template.set_file(path);
        if let Err(e @ TemplateError::FileNotFound { .. }) = result {
            error!(error = %e, "template file missing, falling back to empty content");
            self.inner.borrow_mut().template.set_content("");
        }
    }

    /// Set the template source directly in the default dialect
    pub fn set_template_content(&self, content: &str) {
        self.set_template_content_typed(content, DEFAULT_KIND);
    }

    pub fn set_template_content_typed(&self, content: &str, kind: &str) {
        self.set_template_type(kind);
        self.inner.borrow_mut().template.set_content(content);
    }

    // ---- slots -------------------------------------------------------

    /// Bind a slot value, overwriting any previous value. Storing a
    /// component merges this node's translator chain into it, reparents it
    /// here and fires its `added` phase synchronously.
    pub fn set_var(&self, name: impl Into<String>, value: impl Into<SlotValue>) {
        self.store_slot(name.into(), value.into(), false);
    }

    /// Bind a slot value, combining with any existing value. Text appended
    /// to text concatenates in place; any combination involving a component
    /// builds a concatenation node preserving input order.
    pub fn append_var(&self, name: impl Into<String>, value: impl Into<SlotValue>) {
        self.store_slot(name.into(), value.into(), true);
    }

    /// Bind several slots at once, in iteration order
    pub fn set_vars<K, V, I>(&self, vars: I)
    where
        K: Into<String>,
        V: Into<SlotValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        for (name, value) in vars {
            self.set_var(name, value);
        }
    }

    pub fn set_component(&self, name: impl Into<String>, component: Component) {
        self.set_var(name, component);
    }

    pub fn append_component(&self, name: impl Into<String>, component: Component) {
        self.append_var(name, component);
    }

    fn store_slot(&self, name: String, value: SlotValue, append: bool) {
        if let SlotValue::Node(child) = &value {
            self.adopt(child, true);
        }
        let existing = if append {
            self.inner.borrow().slots.get(&name).cloned()
        } else {
            None
        };
        let stored = match existing {
            Some(previous) if !previous.is_empty_text() => self.combine(previous, value),
            _ => value,
        };
        self.inner.borrow_mut().slots.insert(name, stored);
    }

    fn combine(&self, previous: SlotValue, next: SlotValue) -> SlotValue {
        match (previous, next) {
            (SlotValue::Text(mut a), SlotValue::Text(b)) => {
                a.push_str(&b);
                SlotValue::Text(a)
            }
            (previous, next) => {
                let joined = Component::concat(vec![previous, next]);
                self.adopt(&joined, true);
                SlotValue::Node(joined)
            }
        }
    }

    /// Merge the current translator chain into `child` (appended after the
    /// child's own entries, so the child keeps priority), reparent it here
    /// and optionally fire its `added` phase. The merge happens exactly
    /// once, at attachment; translators this node gains later do not
    /// propagate.
    fn adopt(&self, child: &Component, fire_added: bool) {
        if !Rc::ptr_eq(&self.inner, &child.inner) {
            let chain: Vec<Arc<dyn Translator>> = self.inner.borrow().translators.clone();
            let mut child_inner = child.inner.borrow_mut();
            child_inner.translators.extend(chain);
            child_inner.parent = Some(Rc::downgrade(&self.inner));
        }
        if fire_added {
            child.fire_added();
        }
    }

    // ---- blocks ------------------------------------------------------

    /// Push one row of a repeatable block, snapshotting the current slot
    /// map as the row's variables. Later slot mutation does not touch the
    /// snapshot, but a component captured in it still resolves to its
    /// render-time value.
    pub fn set_block(&self, name: impl Into<String>) {
        let snapshot = self.inner.borrow().slots.clone();
        self.push_block(name.into(), snapshot);
    }

    /// Push one row of a repeatable block with explicit row variables.
    /// Components among the values are reparented here; their `added`
    /// phase fires lazily when the row resolves, not now.
    pub fn set_block_with<K, V, I>(&self, name: impl Into<String>, vars: I)
    where
        K: Into<String>,
        V: Into<SlotValue>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut row = BTreeMap::new();
        for (key, value) in vars {
            let value = value.into();
            if let SlotValue::Node(child) = &value {
                self.adopt(child, false);
            }
            row.insert(key.into(), value);
        }
        self.push_block(name.into(), row);
    }

    /// Expand a list of field maps into block rows:
    /// `{NAME}_COUNT`, then per row `{NAME}_INDEX` (1-based) and
    /// `{NAME}_{FIELD}` variables, one auxiliary `{NAME}_{FIELD}_BLOCK`
    /// push per non-empty field, and finally the aggregate `{NAME}_BLOCK`
    /// push. Field names are uppercased; empty fields skip the auxiliary
    /// block but stay in the aggregate row.
    pub fn set_blocks(&self, name: &str, rows: &[Vec<(&str, &str)>]) {
        let prefix = name.to_uppercase();
        self.set_var(format!("{prefix}_COUNT"), rows.len().to_string());

        for (index, fields) in rows.iter().enumerate() {
            let mut vars: BTreeMap<String, SlotValue> = BTreeMap::new();
            vars.insert(
                format!("{prefix}_INDEX"),
                SlotValue::Text((index + 1).to_string()),
            );
            for (field, value) in fields {
                vars.insert(
                    format!("{}_{}", prefix, field.to_uppercase()),
                    SlotValue::Text((*value).to_string()),
                );
            }
            for (field, value) in fields {
                if !value.is_empty() {
                    self.push_block(
                        format!("{}_{}_BLOCK", prefix, field.to_uppercase()),
                        vars.clone(),
                    );
                }
            }
            self.push_block(format!("{prefix}_BLOCK"), vars);
        }
    }

    fn push_block(&self, name: String, vars: BTreeMap<String, SlotValue>) {
        self.inner.borrow_mut().blocks.push(BlockRow { name, vars });
    }

    // ---- lifecycle ---------------------------------------------------

    /// Register a callback for the `added` phase. Callbacks fire in
    /// registration order; registering after the phase has fired is inert.
    pub fn on_added(&self, callback: impl FnMut(&Component) + 'static) {
        self.inner.borrow_mut().added_callbacks.push(Box::new(callback));
    }

    /// Register a callback for the `mount` phase
    pub fn on_mount(&self, callback: impl FnMut(&Component) + 'static) {
        self.inner.borrow_mut().mount_callbacks.push(Box::new(callback));
    }

    /// Register a callback for the `mounted` phase
    pub fn on_mounted(&self, callback: impl FnMut(&Component) + 'static) {
        self.inner.borrow_mut().mounted_callbacks.push(Box::new(callback));
    }

    fn fire_added(&self) {
        let callbacks = {
            let mut inner = self.inner.borrow_mut();
            if inner.added_fired {
                return;
            }
            inner.added_fired = true;
            std::mem::take(&mut inner.added_callbacks)
        };
        for mut callback in callbacks {
            callback(self);
        }
    }

    fn fire_mount(&self) {
        let callbacks = std::mem::take(&mut self.inner.borrow_mut().mount_callbacks);
        for mut callback in callbacks {
            callback(self);
        }
    }

    fn fire_mounted(&self) {
        let callbacks = std::mem::take(&mut self.inner.borrow_mut().mounted_callbacks);
        for mut callback in callbacks {
            callback(self);
        }
    }

    // ---- rendering ---------------------------------------------------

    /// Render the component to its output string. Memoized: the tree is
    /// walked once, lifecycle phases fire once, and every later call
    /// returns the cached text.
    #[instrument(skip(self))]
    pub fn render(&self) -> String {
        {
            let inner = self.inner.borrow();
            if let RenderState::Resolved(output) = &inner.state {
                return output.clone();
            }
            if inner.rendering {
                warn!("render cycle detected, resolving as empty");
                return String::new();
            }
        }
        self.inner.borrow_mut().rendering = true;

        self.fire_added();
        self.fire_mount();
        self.resolve_children();
        self.fire_mounted();
        // Values attached during `mounted` still have to land as text.
        self.resolve_children();
        self.merge_translation_data();

        let output = {
            let mut inner = self.inner.borrow_mut();
            let Inner {
                template,
                slots,
                blocks,
                ..
            } = &mut *inner;
            for (name, value) in slots.iter() {
                if let SlotValue::Text(text) = value {
                    template.set_var(name, text);
                }
            }
            for row in blocks.iter() {
                let mut vars = HashMap::new();
                for (key, value) in &row.vars {
                    if let SlotValue::Text(text) = value {
                        vars.insert(key.clone(), text.clone());
                    }
                }
                template.set_block(&row.name, &vars);
            }
            template.render()
        };

        let mut inner = self.inner.borrow_mut();
        inner.state = RenderState::Resolved(output.clone());
        inner.rendering = false;
        output
    }

    /// Resolve every child component reachable through slots, then through
    /// block rows, depth-first, replacing each in place with its rendered
    /// text. Loops until a sweep finds nothing, so children attached by a
    /// child's own callbacks are picked up too.
    fn resolve_children(&self) {
        loop {
            let pending: Vec<(String, Component)> = self
                .inner
                .borrow()
                .slots
                .iter()
                .filter_map(|(name, value)| match value {
                    SlotValue::Node(child) => Some((name.clone(), child.clone())),
                    SlotValue::Text(_) => None,
                })
                .collect();
            if pending.is_empty() {
                break;
            }
            for (name, child) in pending {
                let text = child.render();
                self.inner.borrow_mut().slots.insert(name, SlotValue::Text(text));
            }
        }

        loop {
            let pending: Vec<(usize, String, Component)> = self
                .inner
                .borrow()
                .blocks
                .iter()
                .enumerate()
                .flat_map(|(index, row)| {
                    row.vars
                        .iter()
                        .filter_map(move |(key, value)| match value {
                            SlotValue::Node(child) => {
                                Some((index, key.clone(), child.clone()))
                            }
                            SlotValue::Text(_) => None,
                        })
                        .collect::<Vec<_>>()
                })
                .collect();
            if pending.is_empty() {
                break;
            }
            for (index, key, child) in pending {
                let text = child.render();
                if let Some(row) = self.inner.borrow_mut().blocks.get_mut(index) {
                    row.vars.insert(key, SlotValue::Text(text));
                }
            }
        }
    }

    /// Merge every attached translator's bulk entries into the slot map
    /// under quote-wrapped keys, walking the chain front to back so a later
    /// entry in the chain overwrites an earlier one's key.
    fn merge_translation_data(&self) {
        let chain: Vec<Arc<dyn Translator>> = self.inner.borrow().translators.clone();
        if chain.is_empty() {
            return;
        }
        let mut inner = self.inner.borrow_mut();
        for translator in &chain {
            for (key, text) in translator.translation_data() {
                inner
                    .slots
                    .insert(format!("\"{key}\""), SlotValue::Text(text.clone()));
            }
        }
    }

    // ---- translation -------------------------------------------------

    /// Construct a translator and prepend it to the chain: the most
    /// recently added translator is tried first.
    pub fn add_translator(&self, location: impl AsRef<Path>, kind: TranslatorKind, lang: &str) {
        let translator = create_translator(location.as_ref(), kind, lang);
        self.inner.borrow_mut().translators.insert(0, translator);
    }

    /// Prepend an already constructed translator to the chain
    pub fn add_translator_instance(&self, translator: Arc<dyn Translator>) {
        self.inner.borrow_mut().translators.insert(0, translator);
    }

    /// Append translators to the end of the chain, below everything
    /// already present, preserving their relative order
    pub fn add_translators(&self, translators: Vec<Arc<dyn Translator>>) {
        self.inner.borrow_mut().translators.extend(translators);
    }

    /// Look a message up through the translator chain. The first
    /// translator returning a non-empty translation wins; an unmatched
    /// message is returned verbatim.
    pub fn translate(&self, message: &str) -> String {
        self.translate_args(message, &[])
    }

    /// Chain lookup with printf-style arguments. Each argument is
    /// independently looked up through the chain before substitution, so
    /// arguments can themselves be translated strings.
    pub fn translate_args(&self, message: &str, args: &[&str]) -> String {
        let chain: Vec<Arc<dyn Translator>> = self.inner.borrow().translators.clone();
        let format = lookup(&chain, message).unwrap_or_else(|| message.to_string());
        let resolved: Vec<String> = args
            .iter()
            .map(|arg| lookup(&chain, arg).unwrap_or_else(|| (*arg).to_string()))
            .collect();
        let resolved: Vec<&str> = resolved.iter().map(String::as_str).collect();
        sprintf(&format, &resolved)
    }

    // ---- tree --------------------------------------------------------

    /// The node this component was attached to, if any. Non-owning: the
    /// tree's ownership runs parent to child through slots and blocks.
    pub fn parent(&self) -> Option<Component> {
        self.inner
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(|inner| Component { inner })
    }
}

fn lookup(chain: &[Arc<dyn Translator>], key: &str) -> Option<String> {
    chain
        .iter()
        .find_map(|translator| translator.translate(key).map(str::to_string))
}

impl Default for Component {
    fn default() -> Self {
        Self::new()
    }
}

/// Identity comparison: two handles are equal when they share the node
impl PartialEq for Component {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Component {}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl fmt::Debug for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Component")
            .field("template_kind", &inner.template_kind)
            .field("slots", &inner.slots.len())
            .field("blocks", &inner.blocks.len())
            .field("translators", &inner.translators.len())
            .field("resolved", &matches!(inner.state, RenderState::Resolved(_)))
            .finish()
    }
}
