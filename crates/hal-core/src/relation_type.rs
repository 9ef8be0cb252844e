//! Well-known link relation types.
//!
//! `SELF` and `CURIES` are the two relations HAL itself relies on; the rest
//! are a selection from the IANA link relations registry.

pub const SELF: &str = "self";
pub const CURIES: &str = "curies";

pub const ABOUT: &str = "about";
pub const ALTERNATE: &str = "alternate";
pub const AUTHOR: &str = "author";
pub const CANONICAL: &str = "canonical";
pub const COLLECTION: &str = "collection";
pub const DESCRIBEDBY: &str = "describedby";
pub const EDIT: &str = "edit";
pub const EDIT_FORM: &str = "edit-form";
pub const FIRST: &str = "first";
pub const HELP: &str = "help";
pub const ITEM: &str = "item";
pub const LAST: &str = "last";
pub const LATEST_VERSION: &str = "latest-version";
pub const NEXT: &str = "next";
pub const PREV: &str = "prev";
pub const PREVIOUS: &str = "previous";
pub const PROFILE: &str = "profile";
pub const RELATED: &str = "related";
pub const SEARCH: &str = "search";
pub const START: &str = "start";
pub const UP: &str = "up";
pub const VIA: &str = "via";
