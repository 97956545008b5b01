//! PLY format support

use cloudalign_core::{Color, Error, Point3d, PointCloud, Result};
use ply_rs::parser::Parser;
use ply_rs::ply::{DefaultElement, Property};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Vertices converted between two progress reports.
const PROGRESS_CHUNK: usize = 8_192;

/// Read a point cloud from a PLY file.
///
/// `progress` receives fractions in `0.0..=1.0` as the file is decoded.
/// Any parse failure surfaces as an error with no cloud constructed.
pub fn read_point_cloud<P, F>(path: P, mut progress: F) -> Result<PointCloud>
where
    P: AsRef<Path>,
    F: FnMut(f64),
{
    let file = File::open(&path)?;
    let mut reader = BufReader::new(file);

    let parser = Parser::<DefaultElement>::new();
    let header = parser.read_header(&mut reader)?;

    if !header.elements.contains_key("vertex") {
        return Err(Error::InvalidData(
            "PLY file contains no vertex element".to_string(),
        ));
    }

    progress(0.0);

    // Payloads must be decoded in header order; non-vertex elements
    // (faces and the like) are read past and discarded.
    let mut vertices = Vec::new();
    for (_, element) in &header.elements {
        let payload = parser.read_payload_for_element(&mut reader, element, &header)?;
        if element.name == "vertex" {
            vertices = payload;
        }
    }

    let total = vertices.len().max(1);
    let mut points = Vec::with_capacity(vertices.len());
    let mut colors = Vec::with_capacity(vertices.len());

    for (i, vertex) in vertices.iter().enumerate() {
        let x = extract_scalar(vertex, "x")?;
        let y = extract_scalar(vertex, "y")?;
        let z = extract_scalar(vertex, "z")?;
        points.push(Point3d::new(x, y, z));

        if let Some(color) = extract_color(vertex) {
            colors.push(color);
        }

        if (i + 1) % PROGRESS_CHUNK == 0 {
            progress((i + 1) as f64 / total as f64);
        }
    }

    // Colors count only when every vertex carries one.
    if colors.len() != points.len() {
        colors.clear();
    }

    progress(1.0);

    let cloud = PointCloud::from_points_and_colors(points, colors)?;
    log::debug!(
        "loaded {} points from {}",
        cloud.len(),
        path.as_ref().display()
    );
    Ok(cloud)
}

fn extract_scalar(element: &DefaultElement, name: &str) -> Result<f64> {
    match element.get(name) {
        Some(Property::Float(val)) => Ok(*val as f64),
        Some(Property::Double(val)) => Ok(*val),
        Some(Property::Int(val)) => Ok(*val as f64),
        Some(Property::UInt(val)) => Ok(*val as f64),
        _ => Err(Error::InvalidData(format!(
            "property '{}' not found or invalid type",
            name
        ))),
    }
}

fn extract_color(element: &DefaultElement) -> Option<Color> {
    let channel = |name: &str| match element.get(name) {
        Some(Property::UChar(val)) => Some(*val),
        Some(Property::Float(val)) => Some((val.clamp(0.0, 1.0) * 255.0) as u8),
        Some(Property::Double(val)) => Some((val.clamp(0.0, 1.0) * 255.0) as u8),
        _ => None,
    };

    Some([channel("red")?, channel("green")?, channel("blue")?])
}
