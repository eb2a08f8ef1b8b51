pub mod map_renderer;
pub mod svg_map_renderer;
