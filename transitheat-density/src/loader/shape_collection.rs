use std::collections::BTreeMap;
use std::path::Path;

use geo::Point;
use kdam::tqdm;

use crate::error::DensityError;
use crate::geometry::BoundingBox;

use super::{RouteShape, ShapeRow};

/// every shape of a city along with the extent of all of their points.
/// shapes iterate in lexicographic shape id order.
#[derive(Clone, Debug)]
pub struct ShapeCollection {
    shapes: BTreeMap<String, RouteShape>,
    bbox: BoundingBox,
    n_points: usize,
}

impl ShapeCollection {
    /// reads a GTFS `shapes.txt` file.
    ///
    /// # Arguments
    ///
    /// * `shapes_file` - path to the shapes table
    ///
    /// # Returns
    ///
    /// * the collection, or an error if the file is missing, unreadable,
    ///   empty, or contains a non-finite coordinate
    pub fn try_from_csv(shapes_file: &Path) -> Result<ShapeCollection, DensityError> {
        let filepath = shapes_file.to_str().unwrap_or_default().to_string();
        if !shapes_file.is_file() {
            return Err(DensityError::InputMissing(shapes_file.to_path_buf()));
        }
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(shapes_file)
            .map_err(|source| DensityError::CsvError {
                filepath: filepath.clone(),
                source,
            })?;
        let row_iter = tqdm!(
            reader.into_deserialize::<ShapeRow>(),
            desc = format!("reading {filepath}")
        );
        let rows = row_iter
            .map(|r| {
                r.map_err(|source| DensityError::CsvError {
                    filepath: filepath.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<ShapeRow>, DensityError>>()?;
        log::debug!("read {} shape rows from {filepath}", rows.len());
        ShapeCollection::try_from_rows(rows, &filepath)
    }

    /// groups rows by shape id and orders each shape by point sequence.
    ///
    /// # Arguments
    ///
    /// * `rows` - shape rows in any order
    /// * `source` - name of the row source, used in error messages
    pub fn try_from_rows(rows: Vec<ShapeRow>, source: &str) -> Result<ShapeCollection, DensityError> {
        let n_points = rows.len();
        let mut grouped: BTreeMap<String, Vec<(u32, Point<f64>)>> = BTreeMap::new();
        for row in rows {
            if !row.shape_pt_lat.is_finite() || !row.shape_pt_lon.is_finite() {
                return Err(DensityError::NonFiniteCoordinate {
                    shape_id: row.shape_id,
                    sequence: row.shape_pt_sequence,
                    lat: row.shape_pt_lat,
                    lon: row.shape_pt_lon,
                });
            }
            let point = Point::new(row.shape_pt_lon, row.shape_pt_lat);
            grouped
                .entry(row.shape_id)
                .or_default()
                .push((row.shape_pt_sequence, point));
        }
        let shapes: BTreeMap<String, RouteShape> = grouped
            .into_iter()
            .map(|(shape_id, seq)| {
                let shape = RouteShape::from_sequenced(shape_id.clone(), seq);
                (shape_id, shape)
            })
            .collect();
        let bbox = BoundingBox::from_points(shapes.values().flat_map(|s| s.points.iter()))
            .ok_or_else(|| DensityError::EmptyGeometry(source.to_string()))?;
        if bbox.is_degenerate() {
            log::warn!("bounding box of {source} collapses on at least one axis: {bbox:?}");
        }
        Ok(ShapeCollection {
            shapes,
            bbox,
            n_points,
        })
    }

    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// total number of shape points across all shapes
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    pub fn n_shapes(&self) -> usize {
        self.shapes.len()
    }

    pub fn shapes(&self) -> impl Iterator<Item = &RouteShape> {
        self.shapes.values()
    }

    pub fn get(&self, shape_id: &str) -> Option<&RouteShape> {
        self.shapes.get(shape_id)
    }

    /// every point of every shape, in shape order
    pub fn points(&self) -> impl Iterator<Item = &Point<f64>> {
        self.shapes.values().flat_map(|s| s.points.iter())
    }
}
