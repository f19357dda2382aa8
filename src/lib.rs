//! filmpack - Pack capacitor part spreadsheets into an embeddable data script
//!
//! This crate reads a spreadsheet of electronic-component (capacitor) part data and
//! produces a compact `const packedData = {"h":[...],"d":[[...],...]};` script for a
//! browser-side part viewer.
//!
//! The pipeline runs in a single pass over one in-memory table:
//!
//! 1. load the first worksheet (first row = headers)
//! 2. forward-fill columns that the source sheet presents as merged cells
//! 3. clean numeric and dimension columns (`"31,5"` → `31.5`, `315` mm → `31.5`)
//! 4. drop rows without a part number and normalize every remaining cell
//! 5. serialize header and rows as compact JSON
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use filmpack::PackerBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let packer = PackerBuilder::new().build()?;
//!     let summary = packer.pack_file("Film All Data PQ.xlsx", "film_data.js")?;
//!     println!("{} records", summary.records);
//!     Ok(())
//! }
//! ```
//!
//! # Packing an in-memory table
//!
//! ```rust
//! use filmpack::{PackerBuilder, RawCell, RawTable, Scalar};
//!
//! # fn main() -> Result<(), filmpack::FilmPackError> {
//! let table = RawTable::new(
//!     vec!["PartNumber".to_string(), "Height\n(mm)".to_string()],
//!     vec![
//!         vec![RawCell::from("ECWFD2W105JC"), RawCell::from("31,5")],
//!         vec![RawCell::Empty, RawCell::Number(12.0)],
//!     ],
//! )?;
//!
//! let data = PackerBuilder::new().build()?.pack(table)?;
//! assert_eq!(data.d.len(), 1);
//! assert_eq!(data.d[0][1], Scalar::Float(31.5));
//! # Ok(())
//! # }
//! ```
//!
//! # Custom column profile
//!
//! ```rust,no_run
//! use filmpack::{ColumnProfile, PackerBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let profile = ColumnProfile::load("profiles/panasonic_film.toml")?;
//!     let packer = PackerBuilder::new().with_profile(profile).build()?;
//!     packer.pack_file("input.xlsx", "film_data.js")?;
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod error;
pub mod logging;
mod output;
mod parser;
mod profile;
mod security;
pub mod transform;
mod types;

// 公開API
pub use api::PartNumberPolicy;
pub use builder::{Packer, PackerBuilder};
pub use error::FilmPackError;
pub use output::{is_valid_identifier, parse_script, ScriptWriter, DEFAULT_CONSTANT_NAME};
pub use profile::{ColumnProfile, PartNumberRule};
pub use types::{PackSummary, PackedData, PackedRow, RawCell, RawTable, Scalar};
