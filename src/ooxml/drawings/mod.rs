//! DrawingML (DML) support shared by presentation parts.
//!
//! DrawingML defines the graphical vocabulary that PresentationML builds on:
//! colors, fills, outlines, effects, geometry and transforms. Each submodule turns
//! one of those element families into plain model values.

pub mod color;
pub mod effects;
pub mod fill;
pub mod geometry;
pub mod line;
pub mod xfrm;

pub use color::{Color, ColorKind, ColorModifiers, parse_color};
pub use effects::Effects;
pub use fill::{Fill, GradientKind, GradientStop, PictureFill, RelativeRect, parse_fill};
pub use geometry::{Geometry, PathCommand};
pub use line::Line;
pub use xfrm::{ChildTransform, Point, Size, Transform};
