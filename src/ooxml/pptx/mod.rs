//! PowerPoint (.pptx) presentation parsing.
//!
//! This module turns a presentation package into a resolved, renderer-neutral
//! model: masters with their themes and layouts, slides with their shape trees,
//! text, backgrounds, transitions, animation timing and notes.
//!
//! The work is split by part kind. [`presentation`] drives the parse and is the
//! only place that reads from the package; every other module is a pure builder
//! from a parsed [`XmlNode`](crate::ooxml::xml::XmlNode) tree to model values,
//! reporting recoverable gaps through a [`PartContext`](session::PartContext).
//!
//! # Example
//!
//! ```rust,no_run
//! use pptx_resolve::ooxml::opc::ZipPartSource;
//! use pptx_resolve::ooxml::pptx::{ParseOptions, PresentationParser};
//!
//! let source = ZipPartSource::open("presentation.pptx")?;
//! let output = PresentationParser::new(ParseOptions::default()).parse(&source)?;
//! let pres = &output.presentation;
//!
//! for slide in &pres.slides {
//!     println!("Slide {}: {}", slide.index, slide.text());
//!     if let Some(timing) = &slide.timing {
//!         println!("  {} animation steps", timing.steps().len());
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod animations;
pub mod backgrounds;
pub mod charts;
pub mod diagnostics;
pub mod media;
pub mod presentation;
pub mod session;
pub mod shapes;
pub mod slide;
pub mod smartart;
pub mod text;
pub mod theme;
pub mod transitions;


pub use animations::{AnimationNode, AnimationStep, SlideTiming, flatten_steps};
pub use backgrounds::Background;
pub use diagnostics::{Diagnostics, IssueCode, ParseIssue, ParseWarning};
pub use presentation::{ParseOutput, Presentation, PresentationParser, Properties, Resources};
pub use session::{ParseOptions, PartContext};
pub use shapes::{Group, SlideElement};
pub use slide::{ColorMap, Notes, Slide, SlideLayout, SlideMaster, TextStyles};
pub use text::{Paragraph, TextBody, TextRun};
pub use theme::Theme;
pub use transitions::SlideTransition;
