//! Resource factory: builds resources and relations sharing one CURIE set.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::FactoryConfig;
use crate::error::Result;
use crate::link::LinkObject;
use crate::relation::{LinkRelation, Relation, RelationTarget, ResourceRelation};
use crate::resource::Resource;

/// Creates root and embedded resources with self links, and relations
/// qualified by the CURIEs the factory was built with.
///
/// The CURIE set is fixed at construction, so a factory can be shared
/// between threads and used concurrently.
#[derive(Debug, Clone, Default)]
pub struct ResourceFactory {
    curie_links: BTreeMap<String, Arc<LinkObject>>,
}

impl ResourceFactory {
    /// Build a factory from CURIE links. A later link replaces an earlier
    /// one with the same name.
    #[must_use]
    pub fn new(curie_links: impl IntoIterator<Item = LinkObject>) -> Self {
        let curie_links = curie_links
            .into_iter()
            .map(|link| (link.name().to_string(), Arc::new(link)))
            .collect();
        Self { curie_links }
    }

    /// Build a factory from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::InvalidArgument`](crate::HalError::InvalidArgument)
    /// for the first CURIE with an empty name or href.
    pub fn from_config(config: &FactoryConfig) -> Result<Self> {
        Ok(Self::new(config.curie_links()?))
    }

    /// CURIE links ordered by name.
    pub fn curie_links(&self) -> impl Iterator<Item = &LinkObject> {
        self.curie_links.values().map(|link| &**link)
    }

    #[must_use]
    pub fn curie_link(&self, name: &str) -> Option<&LinkObject> {
        self.curie_links.get(name).map(|link| &**link)
    }

    /// Create a link relation targeting `href`, qualified by the CURIE named
    /// `curie_link_name` when the factory knows it.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::InvalidArgument`](crate::HalError::InvalidArgument)
    /// if `href` or `relation_name` is empty.
    pub fn try_create_link(
        &self,
        relation_name: &str,
        href: &str,
        method: &str,
        curie_link_name: Option<&str>,
    ) -> Result<LinkRelation> {
        let link = LinkObject::new(href, method)?;
        let mut relation = LinkRelation::new(relation_name)?;
        relation.set_link(link);
        self.attach_curie(&mut relation, curie_link_name);
        Ok(relation)
    }

    /// Like [`try_create_link`](Self::try_create_link), but returns `None`
    /// on failure. The reason is logged.
    #[must_use]
    pub fn create_link(
        &self,
        relation_name: &str,
        href: &str,
        method: &str,
        curie_link_name: Option<&str>,
    ) -> Option<LinkRelation> {
        self.try_create_link(relation_name, href, method, curie_link_name)
            .map_err(|e| warn!(relation = relation_name, href, error = %e, "cannot create link"))
            .ok()
    }

    /// Create an embedding relation, qualified by the CURIE named
    /// `curie_link_name` when the factory knows it.
    ///
    /// # Errors
    ///
    /// Returns [`HalError::InvalidArgument`](crate::HalError::InvalidArgument)
    /// if `relation_name` is empty.
    pub fn try_create_resource_link(
        &self,
        relation_name: &str,
        curie_link_name: Option<&str>,
    ) -> Result<ResourceRelation> {
        let mut relation = ResourceRelation::new(relation_name)?;
        self.attach_curie(&mut relation, curie_link_name);
        Ok(relation)
    }

    /// Like [`try_create_resource_link`](Self::try_create_resource_link), but
    /// returns `None` on failure. The reason is logged.
    #[must_use]
    pub fn create_resource_link(
        &self,
        relation_name: &str,
        curie_link_name: Option<&str>,
    ) -> Option<ResourceRelation> {
        self.try_create_resource_link(relation_name, curie_link_name)
            .map_err(|e| warn!(relation = relation_name, error = %e, "cannot create resource link"))
            .ok()
    }

    /// A resource with a `self` link and every CURIE of the factory.
    #[must_use]
    pub fn create_root_resource(&self, href: &str, method: &str) -> Resource {
        let mut resource = self.create_resource(href, method);
        if !self.curie_links.is_empty() {
            resource.add_curie_links(self.curie_links().cloned().collect());
        }
        resource
    }

    /// A resource with a `self` link. CURIEs belong to the root only.
    #[must_use]
    pub fn create_embedded_resource(&self, href: &str, method: &str) -> Resource {
        self.create_resource(href, method)
    }

    fn create_resource(&self, href: &str, method: &str) -> Resource {
        let mut resource = Resource::new();

        match LinkObject::new(href, method) {
            Ok(link) => {
                let mut self_relation = LinkRelation::self_relation();
                self_relation.set_link(link);
                resource.add_link(self_relation);
            }
            Err(e) => warn!(error = %e, "resource created without self link"),
        }

        resource
    }

    fn attach_curie<T: RelationTarget>(
        &self,
        relation: &mut Relation<T>,
        curie_link_name: Option<&str>,
    ) {
        let Some(name) = curie_link_name.filter(|name| !name.is_empty()) else {
            return;
        };

        match self.curie_links.get(name) {
            Some(curie) => relation.set_curie_link(Arc::clone(curie)),
            None => debug!(curie = name, "unknown CURIE, relation left unqualified"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc_curie() -> LinkObject {
        LinkObject::curie("doc", "http://docs/{rel}", "GET").unwrap()
    }

    fn factory() -> ResourceFactory {
        ResourceFactory::new([doc_curie()])
    }

    #[test]
    fn factory_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResourceFactory>();
        assert_send_sync::<Resource>();
    }

    #[test]
    fn later_curie_with_same_name_wins() {
        let replacement = LinkObject::curie("doc", "http://v2/docs/{rel}", "GET").unwrap();
        let factory = ResourceFactory::new([doc_curie(), replacement]);
        assert_eq!(factory.curie_links().count(), 1);
        assert_eq!(factory.curie_link("doc").map(LinkObject::href), Some("http://v2/docs/{rel}"));
    }

    #[test]
    fn create_link_attaches_known_curie() {
        let rel = factory()
            .create_link("orders", "http://api/orders", "GET", Some("doc"))
            .expect("relation");
        assert_eq!(rel.name(), "doc:orders");
        assert_eq!(rel.to_value()["href"], "http://api/orders");
    }

    #[test]
    fn create_link_ignores_unknown_or_empty_curie() {
        let factory = factory();
        let rel = factory
            .create_link("orders", "http://api/orders", "GET", Some("nope"))
            .expect("relation");
        assert_eq!(rel.name(), "orders");

        let rel = factory
            .create_link("orders", "http://api/orders", "GET", Some(""))
            .expect("relation");
        assert!(rel.curie_link().is_none());
    }

    #[test]
    fn create_link_returns_none_on_invalid_input() {
        let factory = factory();
        assert!(factory.create_link("orders", "", "GET", None).is_none());
        assert!(factory.create_link("", "http://api/", "GET", None).is_none());

        let err = factory.try_create_link("", "http://api/", "GET", None).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("relation name"));
    }

    #[test]
    fn create_resource_link_has_no_target() {
        let factory = factory();
        let rel = factory
            .create_resource_link("items", Some("doc"))
            .expect("relation");
        assert_eq!(rel.name(), "doc:items");
        assert!(rel.targets().is_empty());

        assert!(factory.create_resource_link("", None).is_none());
        assert!(factory.try_create_resource_link("", None).is_err());
    }

    #[test]
    fn root_resource_has_self_and_curies() {
        let root = factory().create_root_resource("http://api/", "GET");
        let links = root.links().content;

        assert_eq!(
            links["self"],
            json!({"href": "http://api/", "method": "GET", "templated": false})
        );
        assert_eq!(
            links["curies"],
            json!([{"name": "doc", "href": "http://docs/{rel}", "method": "GET", "templated": true}])
        );
    }

    #[test]
    fn root_resource_without_curies_has_only_self() {
        let root = ResourceFactory::default().create_root_resource("http://api/", "GET");
        let links = root.links().content;
        assert!(links.contains_key("self"));
        assert!(!links.contains_key("curies"));
    }

    #[test]
    fn embedded_resource_never_has_curies() {
        let embedded = factory().create_embedded_resource("http://api/orders/1", "GET");
        let links = embedded.links().content;
        assert_eq!(links.len(), 1);
        assert_eq!(links["self"]["href"], "http://api/orders/1");
    }

    #[test]
    fn resource_with_invalid_href_has_no_self_link() {
        let resource = factory().create_embedded_resource("", "GET");
        assert!(resource.links().is_empty());
    }
}
