//! Editor artifacts generated from Makepad widget sources.
//!
//! This crate scans a Makepad checkout's `widgets/src` directory for widget
//! structs (`#[derive(Live, Widget)] pub struct ...`) and their `#[live]`
//! fields, then emits:
//! - VS Code snippets (JSON)
//! - a Markdown widget reference
//! - a go-to-definition location index (JSON)
//! - hover documentation (JSON)
//!
//! # Example
//!
//! In your `build.rs`:
//!
//! ```ignore
//! fn main() {
//!     widgetdex_build::generate_artifacts()
//!         .makepad_root("../makepad")
//!         .snippets_file("snippets/makepad.json")
//!         .locations_file("src/locations.json")
//!         .run()
//!         .expect("Failed to generate Makepad artifacts");
//!
//!     println!("cargo:rerun-if-changed=../makepad/widgets/src");
//! }
//! ```

pub mod catalog;
pub mod emitter;
mod error;
pub mod generator;
pub mod layout;
pub mod scanner;

pub use catalog::{Catalog, LocationIndex, LocationRecord, Widget, WidgetProperty};
pub use error::{Error, Result};
pub use generator::{ArtifactGenerator, GenerationReport, write_if_changed};
pub use layout::{LocateHints, Located, MakepadLayout, RootSource, locate_or_default, locate_widgets_src};
pub use scanner::{ExclusionPolicy, ScanOptions, index_locations, scan_widgets};

/// Create a new artifact generator with default settings.
///
/// # Example
///
/// ```ignore
/// let report = widgetdex_build::generate_artifacts()
///     .widgets_src("/opt/makepad/widgets/src")
///     .docs_file("docs/WIDGETS.md")
///     .run()?;
/// println!("{} widgets", report.widgets);
/// ```
pub fn generate_artifacts() -> ArtifactGenerator {
    ArtifactGenerator::new()
}
