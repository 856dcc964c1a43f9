//! Tree transformation passes
//!
//! Each pass walks the whole output tree once and mutates it in place.

mod file_ops;
pub mod normalize;
pub mod prettify;
pub mod rewrite;

pub use normalize::{ExtensionRule, normalize_extensions};
pub use prettify::{pretty_dir_name, prettify_urls};
pub use rewrite::{FileOutcome, ReferenceRule, rewrite_file, rewrite_references};
