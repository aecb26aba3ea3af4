//! Photo date services
//!
//! - `date_resolver`: override / EXIF / filesystem date priority chain
//! - `exif_date`: EXIF capture date reader
//! - `photo_listing`: sorted photo listing
//! - `date_updates`: batch date corrections

pub mod date_resolver;
pub mod date_updates;
pub mod exif_date;
pub mod photo_listing;

pub use date_resolver::{DateResolver, DateSource, ResolvedDate};
pub use date_updates::{DateUpdate, DateUpdater};
pub use exif_date::{read_capture_date, MetadataError};
pub use photo_listing::{PhotoEntry, PhotoLister};
