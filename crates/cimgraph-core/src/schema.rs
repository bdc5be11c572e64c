//! Graph schema definitions.
//!
//! Provides the store-facing type system derived from a CIM profile: typed
//! predicates and node types grouping them. Both maps of a [`Schema`] are
//! name-ordered so that rendering is deterministic.
//!
//! # Type Mapping
//!
//! | Profile type   | Store type |
//! |----------------|------------|
//! | String         | string     |
//! | Float          | float      |
//! | Simple_Float   | float      |
//! | Boolean        | bool       |
//! | Integer        | int        |
//! | DateTime       | dateTime   |
//! | Date           | dateTime   |
//! | anything else  | uid        |

use std::{collections::BTreeMap, fmt};

use log::debug;

/// Name of the identity predicate unless configured otherwise.
pub const DEFAULT_IDENTITY_PREDICATE: &str = "rdf.about";

/// Scalar store type of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarType {
    String,
    Float,
    Bool,
    Int,
    DateTime,
    /// Reference to another node.
    Uid,
}

impl ScalarType {
    /// Maps a resolved profile type name to its store type.
    ///
    /// Names outside the primitive table, including enumerations, classes and
    /// unresolved references, map to [`ScalarType::Uid`].
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "String" => ScalarType::String,
            "Float" | "Simple_Float" => ScalarType::Float,
            "Boolean" => ScalarType::Bool,
            "Integer" => ScalarType::Int,
            "DateTime" | "Date" => ScalarType::DateTime,
            _ => ScalarType::Uid,
        }
    }

    /// Returns the store's name for this type.
    pub fn store_name(&self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Float => "float",
            ScalarType::Bool => "bool",
            ScalarType::Int => "int",
            ScalarType::DateTime => "dateTime",
            ScalarType::Uid => "uid",
        }
    }
}

/// Store type of a predicate: a scalar, optionally wrapped as a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PredicateType {
    scalar: ScalarType,
    list: bool,
}

impl PredicateType {
    /// Creates a single-valued predicate type.
    pub fn scalar(scalar: ScalarType) -> Self {
        Self {
            scalar,
            list: false,
        }
    }

    /// Creates a list predicate type.
    pub fn list(scalar: ScalarType) -> Self {
        Self { scalar, list: true }
    }

    /// Returns the wrapped scalar type.
    pub fn scalar_type(&self) -> ScalarType {
        self.scalar
    }

    /// Returns `true` if the type is list-wrapped.
    pub fn is_list(&self) -> bool {
        self.list
    }
}

impl fmt::Display for PredicateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.list {
            write!(f, "[{}]", self.scalar.store_name())
        } else {
            f.write_str(self.scalar.store_name())
        }
    }
}

/// A named, typed predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaPredicate {
    name: String,
    type_: PredicateType,
    index: bool,
}

impl SchemaPredicate {
    /// Creates an unindexed predicate.
    pub fn new(name: impl Into<String>, type_: PredicateType) -> Self {
        Self {
            name: name.into(),
            type_,
            index: false,
        }
    }

    /// Sets whether the predicate carries an exact-match index.
    pub fn with_index(mut self, index: bool) -> Self {
        self.index = index;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_(&self) -> PredicateType {
        self.type_
    }

    pub fn is_indexed(&self) -> bool {
        self.index
    }
}

/// A node type grouping predicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaNode {
    name: String,
    predicates: BTreeMap<String, SchemaPredicate>,
}

impl SchemaNode {
    /// Creates a node type holding only the given identity predicate.
    pub fn new(name: impl Into<String>, identity: SchemaPredicate) -> Self {
        let mut predicates = BTreeMap::new();
        predicates.insert(identity.name().to_string(), identity);
        Self {
            name: name.into(),
            predicates,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the predicates of this node, ordered by name.
    pub fn predicates(&self) -> impl Iterator<Item = &SchemaPredicate> {
        self.predicates.values()
    }

    /// Looks up a predicate of this node by name.
    pub fn predicate(&self, name: &str) -> Option<&SchemaPredicate> {
        self.predicates.get(name)
    }

    /// Adds a predicate unless one with the same name is already present.
    pub fn add_predicate(&mut self, predicate: SchemaPredicate) {
        self.predicates
            .entry(predicate.name().to_string())
            .or_insert(predicate);
    }

    /// Returns the number of predicates, identity included.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Returns `true` if the node holds no predicates.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

/// The complete graph schema: global predicates and node types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    identity: SchemaPredicate,
    predicates: BTreeMap<String, SchemaPredicate>,
    nodes: BTreeMap<String, SchemaNode>,
}

impl Schema {
    /// Creates a schema holding only the identity predicate.
    pub fn new(identity: SchemaPredicate) -> Self {
        let mut predicates = BTreeMap::new();
        predicates.insert(identity.name().to_string(), identity.clone());
        Self {
            identity,
            predicates,
            nodes: BTreeMap::new(),
        }
    }

    /// Returns the identity predicate every node carries.
    pub fn identity(&self) -> &SchemaPredicate {
        &self.identity
    }

    /// Registers a predicate globally.
    ///
    /// The first registration of a name fixes its type; later registrations of the
    /// same name are ignored. Returns the registered predicate.
    pub fn register_predicate(&mut self, predicate: SchemaPredicate) -> &SchemaPredicate {
        let name = predicate.name().to_string();
        if let Some(existing) = self.predicates.get(&name) {
            if existing.type_() != predicate.type_() {
                debug!(
                    predicate = name,
                    kept = existing.type_().to_string(),
                    ignored = predicate.type_().to_string();
                    "Predicate already registered with a different type"
                );
            }
        }
        self.predicates.entry(name).or_insert(predicate)
    }

    /// Returns the node type with the given name, creating it if necessary.
    pub fn node_entry(&mut self, name: &str) -> &mut SchemaNode {
        let identity = &self.identity;
        self.nodes
            .entry(name.to_string())
            .or_insert_with(|| SchemaNode::new(name, identity.clone()))
    }

    /// Returns all predicates, ordered by name.
    pub fn predicates(&self) -> impl Iterator<Item = &SchemaPredicate> {
        self.predicates.values()
    }

    /// Looks up a global predicate by name.
    pub fn predicate(&self, name: &str) -> Option<&SchemaPredicate> {
        self.predicates.get(name)
    }

    /// Returns all node types, ordered by name.
    pub fn nodes(&self) -> impl Iterator<Item = &SchemaNode> {
        self.nodes.values()
    }

    /// Looks up a node type by name.
    pub fn node(&self, name: &str) -> Option<&SchemaNode> {
        self.nodes.get(name)
    }

    pub fn predicate_count(&self) -> usize {
        self.predicates.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::new(SchemaPredicate::new(
            DEFAULT_IDENTITY_PREDICATE,
            PredicateType::scalar(ScalarType::String),
        ))
    }
}
