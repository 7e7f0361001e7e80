//! Renderer trait definitions for polymorphic table sinks.

use crate::table::RenderTable;
use storegraph_common::Result;

/// Trait for renderers that consume a finished scenario table.
///
/// Rendering itself (charts, maps, bubbles) lives outside this crate;
/// implementations only ever receive the ordered, named, typed rows of a
/// [`RenderTable`].
pub trait TableRenderer {
    /// Renders a finished table.
    fn render(&self, table: &RenderTable) -> Result<()>;

    /// Gets the name of this renderer.
    fn name(&self) -> &'static str;

    /// Gets the description of this renderer.
    fn description(&self) -> &'static str;
}
