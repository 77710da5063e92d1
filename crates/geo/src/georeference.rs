use approx::{AbsDiffEq, RelativeEq};
use num::{NumCast, ToPrimitive};

use crate::{
    ArrayMetadata, Cell, Columns, Point, RasterSize, Rows,
    crs::Epsg,
};

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct CellSize {
    x: f64,
    y: f64,
}

impl AbsDiffEq for CellSize {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> <f64 as AbsDiffEq>::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: <f64 as AbsDiffEq>::Epsilon) -> bool {
        f64::abs_diff_eq(&self.x, &other.x, epsilon) && f64::abs_diff_eq(&self.y, &other.y, epsilon)
    }
}

impl RelativeEq for CellSize {
    fn default_max_relative() -> <f64 as AbsDiffEq>::Epsilon {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &Self, epsilon: <f64 as AbsDiffEq>::Epsilon, max_relative: <f64 as AbsDiffEq>::Epsilon) -> bool {
        f64::relative_eq(&self.x, &other.x, epsilon, max_relative) && f64::relative_eq(&self.y, &other.y, epsilon, max_relative)
    }
}

impl CellSize {
    pub fn new(x: f64, y: f64) -> Self {
        CellSize { x, y }
    }

    /// Square cells for a north up raster (negative y size)
    pub fn square(size: f64) -> Self {
        CellSize::new(size, -size)
    }

    pub fn is_valid(&self) -> bool {
        self.x != 0.0 && self.y != 0.0
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Bounding extent of a raster in the units of its coordinate reference system
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Extent {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
}

impl Extent {
    /// The extent as `[left, right, bottom, top]`, the order plotting libraries expect
    pub fn to_array(&self) -> [f64; 4] {
        [self.left, self.right, self.bottom, self.top]
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }
}

impl AbsDiffEq for Extent {
    type Epsilon = <f64 as AbsDiffEq>::Epsilon;

    fn default_epsilon() -> <f64 as AbsDiffEq>::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: <f64 as AbsDiffEq>::Epsilon) -> bool {
        f64::abs_diff_eq(&self.left, &other.left, epsilon)
            && f64::abs_diff_eq(&self.right, &other.right, epsilon)
            && f64::abs_diff_eq(&self.bottom, &other.bottom, epsilon)
            && f64::abs_diff_eq(&self.top, &other.top, epsilon)
    }
}

/// Represents the metadata associated with a raster so it can be georeferenced.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, PartialEq, Default)]
pub struct GeoReference {
    /// The projection definition (`EPSG:<code>` or a WKT string)
    projection: String,
    /// The size of the image in pixels
    size: RasterSize,
    /// The affine transformation.
    geo_transform: [f64; 6],
    /// The nodata value.
    nodata: Option<f64>,
}

impl GeoReference {
    pub fn new<S: Into<String>>(projection: S, size: RasterSize, geo_transform: [f64; 6], nodata: Option<f64>) -> Self {
        GeoReference {
            projection: projection.into(),
            size,
            geo_transform,
            nodata,
        }
    }

    pub fn without_spatial_reference(size: RasterSize, nodata: Option<f64>) -> Self {
        GeoReference {
            size,
            nodata,
            geo_transform: [0.0, 1.0, 0.0, 0.0, 0.0, -1.0],
            ..Default::default()
        }
    }

    pub fn with_origin<S: Into<String>, T: NumCast>(
        projection: S,
        size: RasterSize,
        lower_left_coordinate: Point,
        cell_size: CellSize,
        nodata: Option<T>,
    ) -> Self {
        let geo_transform = [
            lower_left_coordinate.x(),
            cell_size.x(),
            0.0,
            lower_left_coordinate.y() - (cell_size.y() * size.rows.count() as f64),
            0.0,
            cell_size.y(),
        ];

        GeoReference {
            projection: projection.into(),
            size,
            geo_transform,
            nodata: nodata.and_then(|nod| nod.to_f64()),
        }
    }

    pub fn projection(&self) -> &str {
        &self.projection
    }

    /// The EPSG code of the projection, if the projection is defined as an EPSG code
    pub fn epsg(&self) -> Option<Epsg> {
        self.projection.parse().ok()
    }

    pub fn raster_size(&self) -> RasterSize {
        self.size
    }

    pub fn rows(&self) -> Rows {
        self.size.rows
    }

    pub fn columns(&self) -> Columns {
        self.size.cols
    }

    pub fn geo_transform(&self) -> [f64; 6] {
        self.geo_transform
    }

    pub fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    pub fn set_nodata(&mut self, nodata: Option<f64>) {
        self.nodata = nodata;
    }

    pub fn copy_with_nodata<T: ToPrimitive>(&self, nodata: Option<T>) -> Self {
        GeoReference {
            nodata: nodata.and_then(|x| x.to_f64()),
            ..self.clone()
        }
    }

    pub fn cell_size(&self) -> CellSize {
        CellSize::new(self.cell_size_x(), self.cell_size_y())
    }

    /// The horizontal cell size of the image.
    pub fn cell_size_x(&self) -> f64 {
        self.geo_transform[1]
    }

    /// The vertical cell size of the image.
    pub fn cell_size_y(&self) -> f64 {
        self.geo_transform[5]
    }

    pub fn is_north_up(&self) -> bool {
        self.cell_size_y() < 0.0
    }

    /// Translates a cell to a point in the raster.
    /// Cell (0, 0) is the top left corner of the raster.
    fn coordinate_for_cell_fraction(&self, col: f64, row: f64) -> Point<f64> {
        let x = self.geo_transform[0] + self.geo_transform[1] * col + self.geo_transform[2] * row;
        let y = self.geo_transform[3] + self.geo_transform[4] * col + self.geo_transform[5] * row;

        Point::new(x, y)
    }

    pub fn cell_center(&self, cell: Cell) -> Point<f64> {
        self.coordinate_for_cell_fraction(cell.col as f64 + 0.5, cell.row as f64 + 0.5)
    }

    pub fn top_left(&self) -> Point<f64> {
        self.coordinate_for_cell_fraction(0.0, 0.0)
    }

    pub fn bottom_right(&self) -> Point<f64> {
        self.coordinate_for_cell_fraction(self.size.cols.count() as f64, self.size.rows.count() as f64)
    }

    /// The bounding extent of the raster
    pub fn extent(&self) -> Extent {
        let top_left = self.top_left();
        let bottom_right = self.bottom_right();

        Extent {
            left: top_left.x().min(bottom_right.x()),
            right: top_left.x().max(bottom_right.x()),
            bottom: top_left.y().min(bottom_right.y()),
            top: top_left.y().max(bottom_right.y()),
        }
    }
}

impl ArrayMetadata for GeoReference {
    fn size(&self) -> RasterSize {
        self.size
    }

    fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    fn sized(size: RasterSize) -> Self {
        GeoReference::without_spatial_reference(size, None)
    }

    fn sized_with_nodata(size: RasterSize, nodata: Option<f64>) -> Self {
        GeoReference::without_spatial_reference(size, nodata)
    }

    fn window(&self, top_left: Cell, size: RasterSize) -> Self {
        let origin = self.coordinate_for_cell_fraction(top_left.col as f64, top_left.row as f64);

        let mut geo_transform = self.geo_transform;
        geo_transform[0] = origin.x();
        geo_transform[3] = origin.y();

        GeoReference {
            projection: self.projection.clone(),
            size,
            geo_transform,
            nodata: self.nodata,
        }
    }
}
