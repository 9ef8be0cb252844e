//! The root element of a HAL document.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{trace, warn};

use crate::data::{read_data_fields, DataValue};
use crate::link::LinkObject;
use crate::map::{NamedMap, PropertyMap};
use crate::relation::{LinkRelation, ResourceRelation};
use crate::relation_type;

/// Key of the link relations in the flattened view.
pub const LINKS_KEY: &str = "_links";

/// Key of the embedded resource relations in the flattened view.
pub const EMBEDDED_KEY: &str = "_embedded";

/// A HAL resource: properties, link relations and embedded resources.
///
/// Relations are keyed by their published [`name`](crate::Relation::name);
/// adding a relation with a name already present replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resource {
    data: PropertyMap,
    links: BTreeMap<String, LinkRelation>,
    embedded: BTreeMap<String, ResourceRelation>,
}

impl Resource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn data(&self) -> &PropertyMap {
        &self.data
    }

    /// Link relations flattened under `_links`.
    #[must_use]
    pub fn links(&self) -> NamedMap {
        let content = self
            .links
            .iter()
            .map(|(name, rel)| (name.clone(), rel.to_value()))
            .collect();
        NamedMap::new(LINKS_KEY, content)
    }

    /// Embedded resource relations flattened under `_embedded`.
    #[must_use]
    pub fn embedded_resources(&self) -> NamedMap {
        let content = self
            .embedded
            .iter()
            .map(|(name, rel)| (name.clone(), rel.to_value()))
            .collect();
        NamedMap::new(EMBEDDED_KEY, content)
    }

    #[must_use]
    pub fn link_relation(&self, name: &str) -> Option<&LinkRelation> {
        self.links.get(name)
    }

    #[must_use]
    pub fn resource_relation(&self, name: &str) -> Option<&ResourceRelation> {
        self.embedded.get(name)
    }

    /// Merge the fields of a typed value into the properties.
    ///
    /// Unset, empty and non-record values are ignored. Fields are stored under
    /// their directive names, overwriting earlier values.
    pub fn add_data<T: DataValue>(&mut self, data: &T) {
        read_data_fields(&mut self.data, data);
    }

    /// Set a single property directly.
    pub fn insert_property(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    pub fn add_link(&mut self, rel: LinkRelation) {
        let name = rel.name().into_owned();
        if self.links.insert(name.clone(), rel).is_some() {
            trace!(relation = %name, "replaced link relation");
        }
    }

    pub fn add_resource(&mut self, rel: ResourceRelation) {
        let name = rel.name().into_owned();
        if self.embedded.insert(name.clone(), rel).is_some() {
            trace!(relation = %name, "replaced embedded relation");
        }
    }

    /// Publish CURIE links as a multi-valued `curies` relation.
    pub fn add_curie_links(&mut self, links: Vec<LinkObject>) {
        let mut rel = LinkRelation::well_known(relation_type::CURIES);
        rel.set_links(links);
        self.add_link(rel);
    }

    /// The whole resource as one property map named `root`.
    ///
    /// `_links` and `_embedded` are present only when non-empty and always
    /// take precedence over properties with the same key.
    #[must_use]
    pub fn to_map(&self) -> NamedMap {
        let mut properties = Map::new();

        for (key, value) in &self.data {
            if key == LINKS_KEY || key == EMBEDDED_KEY {
                warn!(key = %key, "property uses a reserved key and is left out");
                continue;
            }
            properties.insert(key.clone(), value.clone());
        }

        for named in [self.links(), self.embedded_resources()] {
            if !named.is_empty() {
                properties.insert(named.name, Value::Object(named.content));
            }
        }

        NamedMap::new("root", properties)
    }
}

impl Serialize for Resource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}
