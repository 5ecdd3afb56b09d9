//! Language dataset model and the logic that applies it.
//!
//! # Architecture
//!
//! - `language`: `LanguageSet` / `LanguageEntry` and default/by-code resolution
//! - `descriptor`: field descriptors, their kinds and payloads
//! - `applicator`: mutates a `Document` according to a language's descriptors
//! - `validator`: dataset invariant checks, logged after each load
//! - `metrics`: per-manager load and apply counters
//!
//! # Example
//!
//! ```rust,ignore
//! use langswap::i18n::{apply, LanguageSet};
//!
//! let set = LanguageSet::from_json(&body)?;
//! let entry = set.resolve_by_code("fr")?;
//! apply(&mut document, &entry.data);
//! ```

mod applicator;
mod descriptor;
mod language;
mod metrics;
mod validator;

pub use applicator::{apply, ApplyReport};
pub use descriptor::{Content, FieldDescriptor, FieldKind, FieldMap};
pub use language::{LanguageEntry, LanguageSet};
pub use metrics::{LoaderMetrics, MetricsReport};
pub use validator::{DatasetValidator, ValidationReport};
