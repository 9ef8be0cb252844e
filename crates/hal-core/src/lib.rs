//! # hal-core
//!
//! In-memory HAL (Hypertext Application Language) documents.
//!
//! - [`LinkObject`]: a validated hyperlink, templated when its href holds a `{...}` placeholder
//! - [`LinkRelation`] / [`ResourceRelation`]: named, optionally CURIE-qualified relations
//! - [`Resource`]: properties, `_links` and `_embedded`, flattened with [`Resource::to_map`]
//! - [`ResourceFactory`]: resources with self links and a shared CURIE set
//! - Typed data flattening ([`data`]): [`HalData`], [`DataValue`], [`IsEmpty`]
//!   and `#[derive(HalData)]`
//! - Factory configuration ([`FactoryConfig`])
//! - Error hierarchy ([`HalError`], [`ArgumentError`])
//!
//! Encoding is left to serde: every flattened view implements `Serialize`.
//!
//! ```
//! use hal_core::{LinkObject, ResourceFactory};
//!
//! let curie = LinkObject::curie("doc", "http://docs/{rel}", "GET").unwrap();
//! let factory = ResourceFactory::new([curie]);
//!
//! let mut root = factory.create_root_resource("http://api/", "GET");
//! root.insert_property("name", "alpha");
//! if let Some(orders) = factory.create_link("orders", "http://api/orders", "GET", Some("doc")) {
//!     root.add_link(orders);
//! }
//!
//! let json = serde_json::to_value(&root).unwrap();
//! assert_eq!(json["_links"]["doc:orders"]["href"], "http://api/orders");
//! assert_eq!(json["_links"]["curies"][0]["name"], "doc");
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod factory;
pub mod link;
pub mod map;
pub mod relation;
pub mod relation_type;
pub mod resource;

pub use config::{CurieConfig, FactoryConfig};
pub use data::{DataValue, Directive, Field, HalData, Indirection, IsEmpty};
pub use error::{ArgumentError, HalError, Result};
pub use factory::ResourceFactory;
#[cfg(feature = "derive")]
pub use hal_derive::HalData;
pub use link::LinkObject;
pub use map::{NamedMap, PropertyMap};
pub use relation::{LinkRelation, Relation, RelationTarget, ResourceRelation, Targets};
pub use resource::Resource;
pub use serde_json::Value;
