//! Terminal collaborators: a ratatui drawing surface and a host region.

mod host;
mod surface;

pub use host::TerminalHost;
pub use surface::{Affine, CanvasSurface, Span, rounded_rect_spans};
