//! Test doubles for driving an [`Overlay`] without a browser.
//!
//! [`RecordingHost`] keeps the page as plain data: which bindings are live,
//! which nodes are highlighted, where the panel sits, what the readout fields
//! say and which deferred tasks are pending. Every call is also appended to a
//! shared log so tests can assert on ordering.

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet, HashMap},
    rc::Rc,
};

use crate::{
    Assets, Binding, Host, InspectorConfig, InspectorError, MemoryPositionStore, Overlay, Point,
    ReadoutField, StyleSnapshot, TaskId,
};

/// Assets used by tests; their content is never inspected.
pub const ASSETS: Assets = Assets {
    markup: "<div id=\"i_modal\"></div>",
    overlay_css: "#i_modal { position: fixed; }",
    host_css: ".i_pickerHover { outline: 1px solid; }",
};

/// A page element in a [`RecordingHost`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageNode(pub u32);

/// The panel's scope root; treated as part of the panel
pub const PANEL_ROOT: PageNode = PageNode(0);

/// First node id reserved for nodes inside the panel
pub const PANEL_NODES: u32 = 10_000;

/// An in-memory [`Host`] that records what the overlay asked of it.
#[derive(Debug, Clone)]
pub struct RecordingHost {
    /// Whether the panel is attached
    pub attached: bool,
    /// How many times `attach` succeeded
    pub attach_count: usize,
    /// When set, `attach` fails as if the markup lacked this element
    pub missing_part: Option<&'static str>,
    /// Live bindings
    pub bindings: BTreeSet<Binding>,
    /// Nodes carrying the highlight marker
    pub highlighted: BTreeSet<PageNode>,
    /// Current panel origin
    pub panel_origin: Point,
    /// Readout field contents
    pub fields: BTreeMap<ReadoutField, String>,
    /// Whether the toggle shows as active
    pub toggle_active: bool,
    /// Whether the body carries the no-select class
    pub no_select: bool,
    /// Resolved styles; nodes without an entry count as detached
    pub styles: HashMap<PageNode, StyleSnapshot>,
    /// Every call, in order
    pub log: Rc<RefCell<Vec<String>>>,
    tasks: BTreeMap<TaskId, u32>,
    next_task: u64,
}

impl Default for RecordingHost {
    fn default() -> Self {
        Self {
            attached: false,
            attach_count: 0,
            missing_part: None,
            bindings: BTreeSet::new(),
            highlighted: BTreeSet::new(),
            panel_origin: Point::default(),
            fields: BTreeMap::new(),
            toggle_active: false,
            no_select: false,
            styles: HashMap::new(),
            log: Rc::new(RefCell::new(Vec::new())),
            tasks: BTreeMap::new(),
            next_task: 1,
        }
    }
}

impl RecordingHost {
    /// Give `node` a resolved style
    pub fn with_style(mut self, node: PageNode, style: StyleSnapshot) -> Self {
        self.styles.insert(node, style);
        self
    }

    /// Give `node` a minimal text style
    pub fn with_text(self, node: PageNode, tag_name: &str, font_size: &str) -> Self {
        self.with_style(
            node,
            StyleSnapshot {
                tag_name: tag_name.into(),
                font_family: "serif".into(),
                font_size: font_size.into(),
                font_weight: "400".into(),
                line_height: "normal".into(),
                letter_spacing: "normal".into(),
                font_feature_settings: "normal".into(),
            },
        )
    }

    /// Fail the next `attach` as if `part` were missing from the markup
    pub fn missing(mut self, part: &'static str) -> Self {
        self.missing_part = Some(part);
        self
    }

    /// Ids of tasks scheduled and neither fired nor cancelled
    pub fn pending_tasks(&self) -> Vec<TaskId> {
        self.tasks.keys().copied().collect()
    }

    /// Number of log entries starting with `prefix`
    pub fn count(&self, prefix: &str) -> usize {
        self.log
            .borrow()
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .count()
    }

    /// Bindings registered on the document (as opposed to the panel)
    pub fn document_bindings(&self) -> BTreeSet<Binding> {
        self.bindings
            .iter()
            .copied()
            .filter(|binding| !Binding::PANEL.contains(binding))
            .collect()
    }

    fn record(&self, entry: String) {
        self.log.borrow_mut().push(entry);
    }
}

impl Host for RecordingHost {
    type Element = PageNode;

    fn attach(&mut self, _assets: &Assets) -> Result<(), InspectorError> {
        self.record("attach".into());
        if let Some(part) = self.missing_part {
            return Err(InspectorError::MissingElement(part.into()));
        }
        self.attached = true;
        self.attach_count += 1;
        self.fields = ReadoutField::ALL
            .into_iter()
            .map(|field| (field, String::new()))
            .collect();
        Ok(())
    }

    fn detach(&mut self) {
        self.record("detach".into());
        self.attached = false;
        self.fields.clear();
    }

    fn bind(&mut self, binding: Binding) {
        self.record(format!("bind {binding:?}"));
        self.bindings.insert(binding);
    }

    fn unbind(&mut self, binding: Binding) {
        self.record(format!("unbind {binding:?}"));
        self.bindings.remove(&binding);
    }

    fn panel_origin(&self) -> Point {
        self.panel_origin
    }

    fn move_panel(&mut self, position: Point) {
        self.panel_origin = position;
    }

    fn is_self(&self, element: &PageNode) -> bool {
        *element == PANEL_ROOT || element.0 >= PANEL_NODES
    }

    fn is_highlighted(&self, element: &PageNode) -> bool {
        self.highlighted.contains(element)
    }

    fn set_highlight(&mut self, element: &PageNode, on: bool) {
        self.record(format!("highlight {} {on}", element.0));
        if on {
            self.highlighted.insert(*element);
        } else {
            self.highlighted.remove(element);
        }
    }

    fn resolved_style(&self, element: &PageNode) -> Option<StyleSnapshot> {
        self.styles.get(element).cloned()
    }

    fn write_field(&mut self, field: ReadoutField, value: &str) {
        self.record(format!("write {field:?} {value}"));
        self.fields.insert(field, value.to_string());
    }

    fn set_toggle_active(&mut self, active: bool) {
        self.toggle_active = active;
    }

    fn set_no_select(&mut self, on: bool) {
        self.no_select = on;
    }

    fn schedule(&mut self, delay_ms: u32) -> TaskId {
        let task = TaskId(self.next_task);
        self.next_task += 1;
        self.tasks.insert(task, delay_ms);
        task
    }

    fn cancel(&mut self, task: TaskId) {
        self.tasks.remove(&task);
    }
}

/// An overlay over `host` with an empty in-memory store and test assets
pub fn overlay_with(
    host: RecordingHost,
    config: InspectorConfig,
) -> Overlay<RecordingHost, MemoryPositionStore> {
    Overlay::new(host, MemoryPositionStore::default(), config, ASSETS)
}
