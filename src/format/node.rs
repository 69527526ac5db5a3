//! Immutable AST produced by the reader
//!
//! A [`Node`] is one of five kinds. Containers keep their children in the
//! order they appear in the text. Nodes own all of their data; nothing
//! borrows from the input buffer.
//!
//! Lookups come in two flavors. Indexing (`node["key"]`, `node[0]`) and
//! [`Node::as_`] panic on a missing key, a bad index or the wrong kind. The
//! `get*` and `try_*` variants report the same conditions as `Option` or
//! [`AccessError`].

use std::fmt;
use std::ops::Index;

use ahash::RandomState;
use hashbrown::HashMap;

use super::error::AccessError;

/// The kind of a [`Node`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// [`NumberNode`]
    Number,
    /// [`StringNode`]
    String,
    /// [`BooleanNode`]
    Boolean,
    /// [`ObjectNode`]
    Object,
    /// [`ArrayNode`]
    Array,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Boolean => "boolean",
            NodeKind::Object => "object",
            NodeKind::Array => "array",
        };
        f.write_str(name)
    }
}

/// A number, stored in single precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct NumberNode(f32);

impl NumberNode {
    pub fn new(value: f32) -> Self {
        Self(value)
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.0
    }
}

/// A string with escapes already decoded
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct StringNode(String);

impl StringNode {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for StringNode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for StringNode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StringNode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for StringNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BooleanNode(bool);

impl BooleanNode {
    pub fn new(value: bool) -> Self {
        Self(value)
    }

    #[inline]
    pub fn value(&self) -> bool {
        self.0
    }
}

/// Key/value pairs in textual order
///
/// Keys may be any node. Duplicate keys are kept; string lookups through
/// [`ObjectNode::get`] return the first pair with that key.
#[derive(Clone, Default)]
pub struct ObjectNode {
    pairs: Vec<(Node, Node)>,
    /// First pair index for every string key
    index: HashMap<String, usize, RandomState>,
}

impl ObjectNode {
    /// Build an object from pairs already in textual order
    pub fn new(pairs: Vec<(Node, Node)>) -> Self {
        let mut index = HashMap::with_capacity_and_hasher(pairs.len(), RandomState::new());
        for (i, (key, _)) in pairs.iter().enumerate() {
            if let Node::String(key) = key {
                index.entry(key.as_str().to_owned()).or_insert(i);
            }
        }
        Self { pairs, index }
    }

    /// Value of the first pair whose key is the string `key`
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.index.get(key).map(|&i| &self.pairs[i].1)
    }

    /// Value of the first pair whose key equals `key`, of any kind
    pub fn get_by(&self, key: &Node) -> Option<&Node> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Pairs in textual order
    pub fn iter(&self) -> impl Iterator<Item = (&Node, &Node)> + '_ {
        self.pairs.iter().map(|(k, v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &Node> + '_ {
        self.pairs.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &Node> + '_ {
        self.pairs.iter().map(|(_, v)| v)
    }

    pub fn pairs(&self) -> &[(Node, Node)] {
        &self.pairs
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl PartialEq for ObjectNode {
    fn eq(&self, other: &Self) -> bool {
        self.pairs == other.pairs
    }
}

impl fmt::Debug for ObjectNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl FromIterator<(Node, Node)> for ObjectNode {
    fn from_iter<I: IntoIterator<Item = (Node, Node)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Elements in textual order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrayNode {
    elements: Vec<Node>,
}

impl ArrayNode {
    pub fn new(elements: Vec<Node>) -> Self {
        Self { elements }
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.elements.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.elements.iter()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.elements
    }

    pub fn into_vec(self) -> Vec<Node> {
        self.elements
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl FromIterator<Node> for ArrayNode {
    fn from_iter<I: IntoIterator<Item = Node>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ArrayNode {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl IntoIterator for ArrayNode {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

/// A node of the scene markup AST
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(NumberNode),
    String(StringNode),
    Boolean(BooleanNode),
    Object(ObjectNode),
    Array(ArrayNode),
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::NumberNode {}
    impl Sealed for super::StringNode {}
    impl Sealed for super::BooleanNode {}
    impl Sealed for super::ObjectNode {}
    impl Sealed for super::ArrayNode {}
}

/// Node payload types usable with [`Node::as_`] and [`Node::try_as`]
pub trait NodeType: sealed::Sealed {
    /// The kind this type represents
    const KIND: NodeKind;

    /// Borrow the payload if `node` is of this kind
    fn from_node(node: &Node) -> Option<&Self>;
}

macro_rules! impl_node_type {
    ($ty:ident, $variant:ident) => {
        impl NodeType for $ty {
            const KIND: NodeKind = NodeKind::$variant;

            #[inline]
            fn from_node(node: &Node) -> Option<&Self> {
                match node {
                    Node::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Node {
            fn from(inner: $ty) -> Self {
                Node::$variant(inner)
            }
        }
    };
}

impl_node_type!(NumberNode, Number);
impl_node_type!(StringNode, String);
impl_node_type!(BooleanNode, Boolean);
impl_node_type!(ObjectNode, Object);
impl_node_type!(ArrayNode, Array);

impl Node {
    #[inline]
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Number(_) => NodeKind::Number,
            Node::String(_) => NodeKind::String,
            Node::Boolean(_) => NodeKind::Boolean,
            Node::Object(_) => NodeKind::Object,
            Node::Array(_) => NodeKind::Array,
        }
    }

    /// Borrow the payload as `T`
    ///
    /// # Panics
    ///
    /// Panics if the node is not of kind `T::KIND`.
    ///
    /// ```rust
    /// use scenemark::{NumberNode, Reader};
    ///
    /// let reader = Reader::parse(b"{\"size\": 2.5}", "inline").unwrap();
    /// assert_eq!(reader[0]["size"].as_::<NumberNode>().value(), 2.5);
    /// ```
    pub fn as_<T: NodeType>(&self) -> &T {
        match self.try_as::<T>() {
            Ok(inner) => inner,
            Err(err) => panic!("{}", err),
        }
    }

    /// Borrow the payload as `T`, or report the kind mismatch
    pub fn try_as<T: NodeType>(&self) -> Result<&T, AccessError> {
        T::from_node(self).ok_or(AccessError::KindMismatch {
            expected: T::KIND,
            found: self.kind(),
        })
    }

    pub fn as_number(&self) -> Option<f32> {
        NumberNode::from_node(self).map(NumberNode::value)
    }

    pub fn as_str(&self) -> Option<&str> {
        StringNode::from_node(self).map(StringNode::as_str)
    }

    pub fn as_bool(&self) -> Option<bool> {
        BooleanNode::from_node(self).map(BooleanNode::value)
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        ObjectNode::from_node(self)
    }

    pub fn as_array(&self) -> Option<&ArrayNode> {
        ArrayNode::from_node(self)
    }

    /// Value for a string key, if this is an object that has it
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.as_object().and_then(|object| object.get(key))
    }

    /// Element at `index`, if this is an array long enough
    pub fn get_index(&self, index: usize) -> Option<&Node> {
        self.as_array().and_then(|array| array.get(index))
    }

    pub fn try_get(&self, key: &str) -> Result<&Node, AccessError> {
        self.try_as::<ObjectNode>()?
            .get(key)
            .ok_or_else(|| AccessError::MissingKey(key.to_owned()))
    }

    pub fn try_get_index(&self, index: usize) -> Result<&Node, AccessError> {
        let array = self.try_as::<ArrayNode>()?;
        array.get(index).ok_or(AccessError::IndexOutOfRange {
            index,
            len: array.len(),
        })
    }
}

impl From<f32> for Node {
    fn from(value: f32) -> Self {
        Node::Number(NumberNode(value))
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(StringNode::new(value))
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(StringNode(value))
    }
}

impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Boolean(BooleanNode(value))
    }
}

impl From<Vec<Node>> for Node {
    fn from(elements: Vec<Node>) -> Self {
        Node::Array(ArrayNode::new(elements))
    }
}

impl Index<&str> for Node {
    type Output = Node;

    fn index(&self, key: &str) -> &Node {
        match self.try_get(key) {
            Ok(node) => node,
            Err(err) => panic!("{}", err),
        }
    }
}

impl Index<usize> for Node {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        match self.try_get_index(index) {
            Ok(node) => node,
            Err(err) => panic!("{}", err),
        }
    }
}

impl Index<&str> for ObjectNode {
    type Output = Node;

    fn index(&self, key: &str) -> &Node {
        match self.get(key) {
            Some(node) => node,
            None => panic!("{}", AccessError::MissingKey(key.to_owned())),
        }
    }
}

impl Index<usize> for ArrayNode {
    type Output = Node;

    fn index(&self, index: usize) -> &Node {
        match self.get(index) {
            Some(node) => node,
            None => panic!(
                "{}",
                AccessError::IndexOutOfRange {
                    index,
                    len: self.len()
                }
            ),
        }
    }
}
