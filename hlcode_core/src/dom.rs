//! Arena-backed element tree.
//!
//! The tree stands in for a live page: nodes are created once, moved around
//! with [`Document::append_child`] and [`Document::replace_children`], and
//! addressed through copyable [`NodeId`] handles. Detached nodes stay in the
//! arena but are no longer reachable from the document root.

use std::fmt::Write;

use derive_more::Deref;
use derive_more::DerefMut;

use crate::HlError;
use crate::HlResult;

/// Elements which never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
	"wbr",
];

/// Handle to a node in a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
	pub fn index(self) -> usize {
		self.0
	}
}

/// Ordered set of class names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct ClassList(
	#[deref]
	#[deref_mut]
	Vec<String>,
);

impl ClassList {
	pub fn has(&self, class: &str) -> bool {
		self.0.iter().any(|existing| existing == class)
	}

	/// Add `class` unless already present. Returns `true` when it was added.
	pub fn add(&mut self, class: &str) -> bool {
		if self.has(class) {
			return false;
		}

		self.0.push(class.to_string());
		true
	}

	/// Remove `class` if present. Returns `true` when it was removed.
	pub fn remove(&mut self, class: &str) -> bool {
		let before = self.0.len();
		self.0.retain(|existing| existing != class);
		self.0.len() != before
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
	name: String,
	classes: ClassList,
	attributes: Vec<(String, String)>,
}

impl Element {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into().to_ascii_lowercase(),
			classes: ClassList::default(),
			attributes: vec![],
		}
	}

	/// The lowercase tag name.
	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn is(&self, name: &str) -> bool {
		self.name.eq_ignore_ascii_case(name)
	}

	pub fn classes(&self) -> &ClassList {
		&self.classes
	}

	pub fn classes_mut(&mut self) -> &mut ClassList {
		&mut self.classes
	}

	pub fn attribute(&self, name: &str) -> Option<&str> {
		self.attributes
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	/// Set an attribute, replacing an existing value in place. `class` is
	/// routed to the class list.
	pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
		let value = value.into();

		if name == "class" {
			self.classes = ClassList(value.split_whitespace().map(String::from).collect());
			return;
		}

		if let Some(entry) = self.attributes.iter_mut().find(|(key, _)| key == name) {
			entry.1 = value;
		} else {
			self.attributes.push((name.to_string(), value));
		}
	}

	pub fn id(&self) -> Option<&str> {
		self.attribute("id")
	}

	pub fn is_void(&self) -> bool {
		VOID_ELEMENTS.contains(&self.name.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
	Element(Element),
	Text(String),
	/// Markup written through verbatim when serializing.
	Raw(String),
}

#[derive(Debug, Clone)]
struct NodeData {
	kind: NodeKind,
	parent: Option<NodeId>,
	children: Vec<NodeId>,
}

/// A page: `html` with a `head` and a `body`.
#[derive(Debug, Clone)]
pub struct Document {
	nodes: Vec<NodeData>,
	root: NodeId,
	head: NodeId,
	body: NodeId,
}

impl Default for Document {
	fn default() -> Self {
		Self::new()
	}
}

impl Document {
	pub fn new() -> Self {
		let mut document = Self {
			nodes: vec![],
			root: NodeId(0),
			head: NodeId(0),
			body: NodeId(0),
		};

		let root = document.push(NodeKind::Element(Element::new("html")));
		let head = document.push(NodeKind::Element(Element::new("head")));
		let body = document.push(NodeKind::Element(Element::new("body")));
		document.link(root, head);
		document.link(root, body);
		document.root = root;
		document.head = head;
		document.body = body;

		document
	}

	pub fn root(&self) -> NodeId {
		self.root
	}

	pub fn head(&self) -> NodeId {
		self.head
	}

	pub fn body(&self) -> NodeId {
		self.body
	}

	pub fn create_element(&mut self, name: impl Into<String>) -> NodeId {
		self.push(NodeKind::Element(Element::new(name)))
	}

	pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
		self.push(NodeKind::Text(text.into()))
	}

	pub fn create_raw(&mut self, html: impl Into<String>) -> NodeId {
		self.push(NodeKind::Raw(html.into()))
	}

	/// Append `child` as the last child of `parent`, detaching it from its
	/// current parent first.
	pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> HlResult<()> {
		self.ensure_element(parent)?;
		self.ensure_insertable(parent, child)?;
		self.detach(child);
		self.link(parent, child);

		Ok(())
	}

	/// Detach every child of `parent` and append `children` in their place.
	pub fn replace_children(&mut self, parent: NodeId, children: &[NodeId]) -> HlResult<()> {
		self.ensure_element(parent)?;

		for &child in children {
			self.ensure_insertable(parent, child)?;
		}

		for old in std::mem::take(&mut self.nodes[parent.0].children) {
			self.nodes[old.0].parent = None;
		}

		for &child in children {
			self.detach(child);
			self.link(parent, child);
		}

		Ok(())
	}

	/// Replace the children of `parent` with a single text node.
	pub fn set_text_content(&mut self, parent: NodeId, text: impl Into<String>) -> HlResult<()> {
		let text = self.create_text(text);
		self.replace_children(parent, &[text])
	}

	pub fn kind(&self, id: NodeId) -> &NodeKind {
		&self.nodes[id.0].kind
	}

	pub fn element(&self, id: NodeId) -> Option<&Element> {
		match &self.nodes[id.0].kind {
			NodeKind::Element(element) => Some(element),
			_ => None,
		}
	}

	pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
		match &mut self.nodes[id.0].kind {
			NodeKind::Element(element) => Some(element),
			_ => None,
		}
	}

	pub fn parent(&self, id: NodeId) -> Option<NodeId> {
		self.nodes[id.0].parent
	}

	pub fn children(&self, id: NodeId) -> &[NodeId] {
		&self.nodes[id.0].children
	}

	pub fn has_class(&self, id: NodeId, class: &str) -> bool {
		self.element(id)
			.is_some_and(|element| element.classes().has(class))
	}

	pub fn add_class(&mut self, id: NodeId, class: &str) -> HlResult<()> {
		self.element_mut(id)
			.ok_or(HlError::NotAnElement(id.0))?
			.classes_mut()
			.add(class);

		Ok(())
	}

	pub fn remove_class(&mut self, id: NodeId, class: &str) -> HlResult<()> {
		self.element_mut(id)
			.ok_or(HlError::NotAnElement(id.0))?
			.classes_mut()
			.remove(class);

		Ok(())
	}

	pub fn set_attribute(&mut self, id: NodeId, name: &str, value: impl Into<String>) -> HlResult<()> {
		self.element_mut(id)
			.ok_or(HlError::NotAnElement(id.0))?
			.set_attribute(name, value);

		Ok(())
	}

	/// Concatenated text of every text node under `id`. Raw markup does not
	/// contribute.
	pub fn text_content(&self, id: NodeId) -> String {
		let mut text = String::new();
		self.collect_text(id, &mut text);
		text
	}

	/// Every node under `id` in document order, `id` itself excluded.
	pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
		let mut nodes = vec![];
		let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();

		while let Some(next) = stack.pop() {
			nodes.push(next);
			stack.extend(self.children(next).iter().rev());
		}

		nodes
	}

	/// Elements under `root` with the tag `name`, in document order.
	pub fn elements_named(&self, root: NodeId, name: &str) -> Vec<NodeId> {
		self.descendants(root)
			.into_iter()
			.filter(|&id| self.element(id).is_some_and(|element| element.is(name)))
			.collect()
	}

	/// Parent chain of `id`, nearest first.
	pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
		std::iter::successors(self.parent(id), |&current| self.parent(current))
	}

	/// Whether any ancestor of `id` is an element named `name`. The whole
	/// parent chain is considered, not only the part under a scan root.
	pub fn has_ancestor_named(&self, id: NodeId, name: &str) -> bool {
		self.ancestors(id)
			.any(|ancestor| self.element(ancestor).is_some_and(|element| element.is(name)))
	}

	/// Whether `node` is `ancestor` or lives somewhere under it.
	pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
		node == ancestor || self.ancestors(node).any(|current| current == ancestor)
	}

	pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
		self.descendants(self.root)
			.into_iter()
			.find(|&node| self.element(node).and_then(Element::id) == Some(id))
	}

	/// Serialize the whole page, doctype included.
	pub fn to_html(&self) -> String {
		let mut html = String::from("<!DOCTYPE html>\n");
		self.write_node(self.root, &mut html);
		html.push('\n');
		html
	}

	pub fn outer_html(&self, id: NodeId) -> String {
		let mut html = String::new();
		self.write_node(id, &mut html);
		html
	}

	pub fn inner_html(&self, id: NodeId) -> String {
		let mut html = String::new();

		for &child in self.children(id) {
			self.write_node(child, &mut html);
		}

		html
	}

	fn push(&mut self, kind: NodeKind) -> NodeId {
		let id = NodeId(self.nodes.len());
		self.nodes.push(NodeData {
			kind,
			parent: None,
			children: vec![],
		});
		id
	}

	fn link(&mut self, parent: NodeId, child: NodeId) {
		self.nodes[child.0].parent = Some(parent);
		self.nodes[parent.0].children.push(child);
	}

	fn detach(&mut self, child: NodeId) {
		if let Some(parent) = self.nodes[child.0].parent.take() {
			self.nodes[parent.0].children.retain(|&id| id != child);
		}
	}

	fn ensure_element(&self, id: NodeId) -> HlResult<()> {
		self.element(id).map(|_| ()).ok_or(HlError::NotAnElement(id.0))
	}

	/// A node can never become its own ancestor.
	fn ensure_insertable(&self, parent: NodeId, child: NodeId) -> HlResult<()> {
		if self.contains(child, parent) {
			return Err(HlError::HierarchyRequest {
				parent: parent.0,
				child: child.0,
			});
		}

		Ok(())
	}

	fn collect_text(&self, id: NodeId, text: &mut String) {
		for &child in self.children(id) {
			match self.kind(child) {
				NodeKind::Text(value) => text.push_str(value),
				NodeKind::Element(_) => self.collect_text(child, text),
				NodeKind::Raw(_) => {}
			}
		}
	}

	fn write_node(&self, id: NodeId, html: &mut String) {
		match self.kind(id) {
			NodeKind::Text(text) => html.push_str(&escape_text(text)),
			NodeKind::Raw(raw) => html.push_str(raw),
			NodeKind::Element(element) => {
				html.push('<');
				html.push_str(element.name());

				if !element.classes().is_empty() {
					let _ = write!(html, " class=\"{}\"", escape_attribute(&element.classes().join(" ")));
				}

				for (name, value) in &element.attributes {
					let _ = write!(html, " {name}=\"{}\"", escape_attribute(value));
				}

				html.push('>');

				if element.is_void() {
					return;
				}

				for &child in self.children(id) {
					self.write_node(child, html);
				}

				let _ = write!(html, "</{}>", element.name());
			}
		}
	}
}

pub fn escape_text(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());

	for ch in text.chars() {
		match ch {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			_ => escaped.push(ch),
		}
	}

	escaped
}

pub fn escape_attribute(value: &str) -> String {
	escape_text(value).replace('"', "&quot;")
}
