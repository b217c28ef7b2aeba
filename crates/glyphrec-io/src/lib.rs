//! glyphrec-io - Image and table I/O
//!
//! - [`read_image`] / [`write_image`]: image files via the `image` crate
//! - [`list_images`]: scan a directory for images by extension
//! - [`table`]: whitespace-delimited numeric tables used to persist the
//!   knowledge base

mod error;
mod listing;
mod pixio;
pub mod table;

pub use error::{IoError, IoResult};
pub use listing::{has_extension, list_images};
pub use pixio::{pix_to_dynamic, read_image, read_image_mem, write_image};
pub use table::{read_table, read_table_file, write_table, write_table_file};
