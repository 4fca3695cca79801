//! Document model: element tree, field layout, synthesis and parsing.

pub mod element;
pub mod layout;
pub mod parser;
pub mod synthesizer;

pub use element::Element;
pub use parser::{ParseOutcome, parse_document};
pub use synthesizer::{RenderContext, build_document, permit_required, synthesize};
