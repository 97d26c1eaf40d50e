//! pptx-resolve - Parse PowerPoint (.pptx) packages into a resolved model
//!
//! This library reads an Office Open XML presentation package and produces a
//! renderer-neutral model of it: slide masters with their themes, color maps, text
//! styles and layouts; slides with their shape trees, text, backgrounds,
//! transitions, animation timing and notes; and the binary resources the package
//! carries.
//!
//! # Features
//!
//! - **Resolved part graph**: presentation → masters → layouts → slides → notes,
//!   with relationship targets resolved to package paths
//! - **Raw values**: EMU lengths and color modifiers are carried unconverted, see
//!   [`common::unit`] for conversions
//! - **Recoverable gaps as data**: missing relationships, themes or layouts are
//!   reported in [`Diagnostics`] next to the model instead of failing the parse
//! - **Parallel slide building**: slides are built on the `rayon` pool once their
//!   parts are loaded
//!
//! # Example - Reading a PPTX file
//!
//! ```no_run
//! use pptx_resolve::{ParseOptions, PresentationParser};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let data = std::fs::read("presentation.pptx")?;
//! let parser = PresentationParser::new(ParseOptions::default().with_notes(false));
//! let output = parser.parse_bytes(data)?;
//!
//! for slide in &output.presentation.slides {
//!     println!("Slide {}: {}", slide.index, slide.text());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Parsing unpacked parts
//!
//! ```no_run
//! use pptx_resolve::ooxml::opc::MemoryPartSource;
//! use pptx_resolve::PresentationParser;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut source = MemoryPartSource::new();
//! source.insert("[Content_Types].xml", std::fs::read("unpacked/[Content_Types].xml")?);
//! source.insert("ppt/presentation.xml", std::fs::read("unpacked/ppt/presentation.xml")?);
//!
//! let output = PresentationParser::default().parse(&source)?;
//! for warning in &output.diagnostics.warnings {
//!     eprintln!("{}", warning);
//! }
//! # Ok(())
//! # }
//! ```

/// Unit conversion helpers for the raw values kept in the model
pub mod common;

/// OOXML (Office Open XML) presentation parser
///
/// This module provides the package layer, the markup layer, DrawingML and
/// PresentationML support.
pub mod ooxml;

// Re-export commonly used types for convenience
pub use ooxml::error::{OoxmlError, Result};
pub use ooxml::pptx::{
    Diagnostics, IssueCode, ParseOptions, ParseOutput, Presentation, PresentationParser, Slide,
    SlideElement, SlideLayout, SlideMaster,
};
