//! Office Open XML (OOXML) presentation support.
//!
//! The implementation follows the layering of the Open Packaging Conventions:
//!
//! 1. **OPC Layer** (`opc`): Package member access, content types, relationships
//! 2. **Markup Layer** (`xml`): Parsed part trees with namespace-insensitive lookup
//! 3. **DrawingML** (`drawings`): Colors, fills, lines, effects, geometry, transforms
//! 4. **PresentationML** (`pptx`): Slides, layouts, masters, themes, timing
//! 5. **Metadata** (`metadata`): Core and extended document properties
//!
//! # Example
//!
//! ```rust,no_run
//! use pptx_resolve::ooxml::opc::ZipPartSource;
//! use pptx_resolve::ooxml::pptx::PresentationParser;
//!
//! let source = ZipPartSource::open("presentation.pptx")?;
//! let output = PresentationParser::default().parse(&source)?;
//! println!("{} slides", output.presentation.slides.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod drawings;
pub mod error;
pub mod metadata;
pub mod opc;
pub mod pptx;
pub mod xml;

// Re-export commonly used types from OPC layer
pub use opc::{MemoryPartSource, PartSource, ZipPartSource};

pub use metadata::Metadata;

// Re-export error types
pub use error::{OoxmlError, Result};
