use crate::{MapRenderer, Result, RobotError};

use std::fmt::Write;

use bytes::Bytes;
use serde_json::Value;

const FLOOR_COLOR: &str = "#0076ff";
const WALL_COLOR: &str = "#242424";
const ROBOT_COLOR: &str = "#ffffff";
const SEGMENT_COLORS: [&str; 4] = ["#19a1a1", "#7ac037", "#df5618", "#f7c841"];

/// Plain SVG renderer for maps in the layer/entity format.
///
/// Layers are drawn as one path each, using either the flat `pixels` list
/// (`x, y` pairs) or run-length `compressedPixels` (`x, y, count` triples).
/// Entity coordinates are in map units and get scaled down by `pixelSize`.
#[derive(Debug, Clone, Default)]
pub struct SvgMapRenderer;

impl SvgMapRenderer {
    pub fn new() -> Self {
        Self
    }

    fn layer_path(layer: &Value) -> String {
        let mut path = String::new();

        if let Some(runs) = layer["compressedPixels"].as_array() {
            for run in runs.chunks_exact(3) {
                let (Some(x), Some(y), Some(count)) =
                    (run[0].as_u64(), run[1].as_u64(), run[2].as_u64())
                else {
                    continue;
                };
                let _ = write!(path, "M{x} {y}h{count}v1h-{count}z");
            }
        } else if let Some(pixels) = layer["pixels"].as_array() {
            for pixel in pixels.chunks_exact(2) {
                let (Some(x), Some(y)) = (pixel[0].as_u64(), pixel[1].as_u64()) else {
                    continue;
                };
                let _ = write!(path, "M{x} {y}h1v1h-1z");
            }
        }

        path
    }
}

impl MapRenderer for SvgMapRenderer {
    fn render(&self, map: &Value) -> Result<Bytes> {
        if !map.is_object() {
            return Err(RobotError::render("map is not an object"));
        }

        let pixel_size = map["pixelSize"]
            .as_u64()
            .filter(|size| *size > 0)
            .ok_or_else(|| RobotError::render("map.pixelSize is missing or zero"))?;
        let width = map["size"]["x"].as_u64().unwrap_or(0) / pixel_size;
        let height = map["size"]["y"].as_u64().unwrap_or(0) / pixel_size;

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}" shape-rendering="crispEdges">"#
        );

        let mut segment_index = 0;
        for layer in map["layers"].as_array().into_iter().flatten() {
            let color = match layer["type"].as_str() {
                Some("floor") => FLOOR_COLOR,
                Some("wall") => WALL_COLOR,
                Some("segment") => {
                    let color = SEGMENT_COLORS[segment_index % SEGMENT_COLORS.len()];
                    segment_index += 1;
                    color
                }
                _ => continue,
            };

            let path = Self::layer_path(layer);
            if !path.is_empty() {
                let _ = write!(svg, r#"<path fill="{color}" d="{path}"/>"#);
            }
        }

        for entity in map["entities"].as_array().into_iter().flatten() {
            if entity["type"] != "robot_position" {
                continue;
            }
            let (Some(x), Some(y)) = (entity["points"][0].as_f64(), entity["points"][1].as_f64())
            else {
                continue;
            };
            let scale = pixel_size as f64;
            let _ = write!(
                svg,
                r#"<circle cx="{}" cy="{}" r="3" fill="{ROBOT_COLOR}" stroke="{WALL_COLOR}"/>"#,
                x / scale,
                y / scale
            );
        }

        svg.push_str("</svg>");
        Ok(Bytes::from(svg))
    }

    fn content_type(&self) -> &'static str {
        "image/svg+xml"
    }
}
