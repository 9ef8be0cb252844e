//! Named relations: link relations under `_links` and resource relations
//! under `_embedded`.

use std::borrow::Cow;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::ArgumentError;
use crate::link::LinkObject;
use crate::relation_type;
use crate::resource::Resource;

/// A value that can be the target of a relation.
pub trait RelationTarget {
    /// Flattened form of the target as emitted inside its relation.
    fn to_value(&self) -> Value;
}

impl RelationTarget for LinkObject {
    fn to_value(&self) -> Value {
        LinkObject::to_value(self)
    }
}

impl RelationTarget for Resource {
    fn to_value(&self) -> Value {
        Value::Object(self.to_map().content)
    }
}

/// What a relation currently points to.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Targets<T> {
    /// Nothing set yet; flattens to `null`.
    #[default]
    Empty,
    /// Single-valued relation; flattens to an object.
    One(T),
    /// Multi-valued relation; flattens to an array, even with one element.
    Many(Vec<T>),
}

impl<T> Targets<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Targets::Empty)
    }

    /// All targets in order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        match self {
            Targets::Empty => &[],
            Targets::One(target) => std::slice::from_ref(target),
            Targets::Many(targets) => targets,
        }
    }
}

/// A named relation holding one target or an ordered list of them,
/// optionally qualified by a CURIE.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation<T> {
    relation: String,
    targets: Targets<T>,
    curie: Option<Arc<LinkObject>>,
}

/// A relation between a resource and one or more hyperlinks.
pub type LinkRelation = Relation<LinkObject>;

/// A relation between a resource and one or more embedded resources.
pub type ResourceRelation = Relation<Resource>;

impl<T: RelationTarget> Relation<T> {
    /// Create a relation with no target.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::EmptyRelationName`] if `name` is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ArgumentError> {
        let relation = name.into();
        if relation.is_empty() {
            return Err(ArgumentError::EmptyRelationName);
        }

        Ok(Self {
            relation,
            targets: Targets::Empty,
            curie: None,
        })
    }

    /// Infallible constructor for the non-empty well-known names.
    pub(crate) fn well_known(relation: &'static str) -> Self {
        Self {
            relation: relation.to_string(),
            targets: Targets::Empty,
            curie: None,
        }
    }

    /// Key under which the relation is published: `curie:relation` when a
    /// CURIE is attached, the bare relation otherwise.
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        match &self.curie {
            Some(curie) => Cow::Owned(format!("{}:{}", curie.name(), self.relation)),
            None => Cow::Borrowed(&self.relation),
        }
    }

    /// The relation name without CURIE prefix.
    #[must_use]
    pub fn relation(&self) -> &str {
        &self.relation
    }

    #[must_use]
    pub fn targets(&self) -> &Targets<T> {
        &self.targets
    }

    /// Replace the targets with a single one.
    pub fn set(&mut self, target: T) {
        self.targets = Targets::One(target);
    }

    /// Replace the targets with a list, making the relation multi-valued.
    pub fn set_many(&mut self, targets: Vec<T>) {
        self.targets = Targets::Many(targets);
    }

    /// Attach or replace the CURIE that qualifies this relation's name.
    pub fn set_curie_link(&mut self, curie: Arc<LinkObject>) {
        self.curie = Some(curie);
    }

    #[must_use]
    pub fn curie_link(&self) -> Option<&LinkObject> {
        self.curie.as_deref()
    }

    /// Flattened form: `null`, an object, or an array of objects.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match &self.targets {
            Targets::Empty => Value::Null,
            Targets::One(target) => target.to_value(),
            Targets::Many(targets) => {
                Value::Array(targets.iter().map(RelationTarget::to_value).collect())
            }
        }
    }
}

impl LinkRelation {
    /// A `self` relation with no link set yet.
    #[must_use]
    pub fn self_relation() -> Self {
        Self::well_known(relation_type::SELF)
    }

    pub fn set_link(&mut self, link: LinkObject) {
        self.set(link);
    }

    pub fn set_links(&mut self, links: Vec<LinkObject>) {
        self.set_many(links);
    }
}

impl ResourceRelation {
    pub fn set_resource(&mut self, resource: Resource) {
        self.set(resource);
    }

    pub fn set_resources(&mut self, resources: Vec<Resource>) {
        self.set_many(resources);
    }
}

impl<T: RelationTarget> Serialize for Relation<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn link(href: &str) -> LinkObject {
        LinkObject::new(href, "GET").unwrap()
    }

    #[test]
    fn relation_rejects_empty_name() {
        assert_eq!(
            LinkRelation::new("").unwrap_err(),
            ArgumentError::EmptyRelationName
        );
        assert_eq!(
            ResourceRelation::new("").unwrap_err(),
            ArgumentError::EmptyRelationName
        );
    }

    #[test]
    fn unset_relation_flattens_to_null() {
        let rel = LinkRelation::new("next").unwrap();
        assert!(rel.targets().is_empty());
        assert_eq!(rel.to_value(), Value::Null);
    }

    #[test]
    fn single_link_flattens_to_object() {
        let mut rel = LinkRelation::self_relation();
        rel.set_link(link("http://api/"));

        assert_eq!(rel.name(), "self");
        assert_eq!(
            rel.to_value(),
            json!({"href": "http://api/", "method": "GET", "templated": false})
        );
    }

    #[test]
    fn set_links_switches_to_multi_valued() {
        let mut rel = LinkRelation::new("item").unwrap();
        rel.set_link(link("http://api/1"));
        rel.set_links(vec![link("http://api/2")]);

        let value = rel.to_value();
        let items = value.as_array().expect("array");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["href"], "http://api/2");
        assert_eq!(rel.targets().as_slice().len(), 1);

        rel.set_link(link("http://api/3"));
        assert_eq!(rel.to_value()["href"], "http://api/3");
    }

    #[test]
    fn curie_qualifies_name() {
        let curie = Arc::new(LinkObject::curie("doc", "http://docs/{rel}", "GET").unwrap());
        let mut rel = LinkRelation::new("orders").unwrap();
        assert_eq!(rel.name(), "orders");

        rel.set_curie_link(Arc::clone(&curie));
        assert_eq!(rel.name(), "doc:orders");
        assert_eq!(rel.relation(), "orders");
        assert_eq!(rel.curie_link().map(LinkObject::name), Some("doc"));
    }

    #[test]
    fn resource_relation_flattens_embedded_resources() {
        let mut embedded = Resource::new();
        let mut self_rel = LinkRelation::self_relation();
        self_rel.set_link(link("http://api/orders/1"));
        embedded.add_link(self_rel);

        let mut rel = ResourceRelation::new("orders").unwrap();
        rel.set_resources(vec![embedded.clone(), embedded]);

        let value = rel.to_value();
        let orders = value.as_array().expect("array");
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0]["_links"]["self"]["href"], "http://api/orders/1");
    }

    #[test]
    fn relation_serializes_as_flattened_value() {
        let mut rel = LinkRelation::new("next").unwrap();
        rel.set_link(link("http://api/?page=2"));
        let json = serde_json::to_value(&rel).expect("serialize");
        assert_eq!(json, rel.to_value());
    }
}
