/// Open Packaging Conventions (OPC) layer.
///
/// This module covers the package-level plumbing a presentation parser needs:
///
/// - Byte access to package members (`PartSource` over ZIP or memory)
/// - Content type management (`[Content_Types].xml`)
/// - Relationship parsing and POSIX-style target resolution
/// - Part name helpers
///
/// # Performance Features
///
/// - Uses `atoi_simd` for fast integer parsing
/// - Uses `quick-xml` for efficient zero-copy XML parsing
/// - Uses hash maps for O(1) lookups
pub mod constants;
pub mod content_types;
pub mod error;
pub mod packuri;
pub mod phys_pkg;
pub mod rel;

// Re-export commonly used types
pub use content_types::ContentTypeMap;
pub use error::OpcError;
pub use phys_pkg::{MemoryPartSource, PartSource, ZipPartSource};
pub use rel::{Relationship, Relationships};
