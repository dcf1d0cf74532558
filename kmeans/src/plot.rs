use std::path::Path;

use crate::{
    point::{Coordinate, Point},
    Clustering, ClusteringError,
};

const IMAGE_SIZE: u32 = 1000;

/// Renders the points projected on two coordinate axes into a PNG.
///
/// Points are drawn in the color of their cluster center, read from its first three
/// coordinates, and centers are marked with red squares.
pub fn dump_scatter<P: Point>(
    points: &[P],
    clustering: &Clustering<P>,
    axes: (usize, usize),
    path: &Path,
) -> Result<(), ClusteringError> {
    if points.is_empty() {
        return Err(ClusteringError::EmptyInput);
    }
    if clustering.assignment().len() != points.len() {
        return Err(ClusteringError::PointCountMismatch {
            expected: clustering.assignment().len(),
            found: points.len(),
        });
    }
    let max_axis = axes.0.max(axes.1);
    if let Some(point) = points
        .iter()
        .chain(clustering.centers().iter())
        .find(|point| point.dim() <= max_axis)
    {
        return Err(ClusteringError::InvalidAxis {
            axis: max_axis,
            dim: point.dim(),
        });
    }

    let (min, max) = find_min_max(points, axes);
    let span = (max - min).max(1.0);
    let project = |point: &P, margin: f32| -> (u32, u32) {
        let coords = point.coords();
        let scale = |value: f32| {
            (((value - min) / span) * IMAGE_SIZE as f32).clamp(0., IMAGE_SIZE as f32 - margin)
                as u32
        };
        (
            scale(coords[axes.0].as_f64() as f32),
            scale(coords[axes.1].as_f64() as f32),
        )
    };

    let mut imgbuf = image::ImageBuffer::new(IMAGE_SIZE, IMAGE_SIZE);
    for (_x, _y, pixel) in imgbuf.enumerate_pixels_mut() {
        *pixel = image::Rgb([255u8, 255u8, 255u8]);
    }

    let colors: Vec<_> = clustering.centers().iter().map(center_color).collect();
    for (point, &cluster) in points.iter().zip(clustering.assignment().iter()) {
        let (x, y) = project(point, 1.0);
        *imgbuf.get_pixel_mut(x, y) = colors[cluster];
    }

    for center in clustering.centers() {
        let (x, y) = project(center, 2.0);
        *imgbuf.get_pixel_mut(x, y) = image::Rgb([255u8, 0u8, 0u8]);
        *imgbuf.get_pixel_mut(x + 1, y) = image::Rgb([255u8, 0u8, 0u8]);
        *imgbuf.get_pixel_mut(x + 1, y + 1) = image::Rgb([255u8, 0u8, 0u8]);
        *imgbuf.get_pixel_mut(x, y + 1) = image::Rgb([255u8, 0u8, 0u8]);
    }

    path.parent().map(std::fs::create_dir_all);
    imgbuf.save(path)?;
    Ok(())
}

fn find_min_max<P: Point>(points: &[P], axes: (usize, usize)) -> (f32, f32) {
    points.iter().fold((f32::MAX, f32::MIN), |(min, max), point| {
        let coords = point.coords();
        let a = coords[axes.0].as_f64() as f32;
        let b = coords[axes.1].as_f64() as f32;
        (min.min(a).min(b), max.max(a).max(b))
    })
}

fn center_color<P: Point>(center: &P) -> image::Rgb<u8> {
    let mut rgb = [0u8; 3];
    for (channel, &value) in rgb.iter_mut().zip(center.coords()) {
        *channel = value.as_f64().clamp(0.0, 255.0) as u8;
    }
    image::Rgb(rgb)
}
