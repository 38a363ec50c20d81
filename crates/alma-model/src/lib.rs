//! ALMA relationship model.
//!
//! This crate holds the pure part of the lookup tool: turning raw cell text
//! into ALMA IDs, the validated [`RelationshipRecord`], the derived
//! [`RelationshipIndex`] and the bidirectional [`lookup`] over it.
//!
//! # Example
//!
//! ```
//! use alma_model::{IdPolicy, RelationshipIndex, RelationshipRecord, lookup};
//!
//! let record = RelationshipRecord::from_cells("1001", "2002|||2003", IdPolicy::Exact)
//!     .expect("valid row");
//! let index = RelationshipIndex::from_records(&[record]);
//!
//! let result = lookup(&index, " 2002 ");
//! assert!(result.as_child_parents.is_empty());
//! assert!(result.as_parent_children.contains("1001"));
//! ```

mod derived;
mod ids;
mod index;
mod list;
mod lookup;
mod record;
mod role;

pub use derived::{ChildParents, ParentCount, ParentSummary, derive_parents};
pub use ids::{
    IdPolicy, MIN_ALMA_DIGITS, PARENT_SEPARATOR, clean_id, extract_alma_ids, split_parent_field,
};
pub use index::{IndexStats, RelationshipIndex};
pub use list::{IdList, Membership};
pub use lookup::{LookupResult, lookup};
pub use record::RelationshipRecord;
pub use role::{Classification, Role, classify};
