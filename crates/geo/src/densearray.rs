use num::NumCast;

use crate::{ArrayMetadata, ArrayNum, Cell, Columns, Error, RasterSize, Result, Rows};

/// Array implementation using a dense data structure.
/// The nodata values are stored as the [`crate::Nodata::NODATA`] value for the type T in the same array data structure
/// So no additional data is allocated for tracking nodata cells.
#[derive(Debug, Clone)]
pub struct DenseArray<T: ArrayNum, Metadata: ArrayMetadata = RasterSize> {
    meta: Metadata,
    data: Vec<T>,
}

impl<T: ArrayNum, Metadata: ArrayMetadata> DenseArray<T, Metadata> {
    pub fn new(meta: Metadata, data: Vec<T>) -> Result<Self> {
        if meta.size().cell_count() != data.len() {
            return Err(Error::InvalidArgument(format!(
                "Data length ({}) does not match the array size {}",
                data.len(),
                meta.size()
            )));
        }

        Ok(DenseArray { meta, data })
    }

    /// Creates the array and converts the nodata value declared in the metadata to [`crate::Nodata::NODATA`]
    pub fn new_init_nodata(meta: Metadata, mut data: Vec<T>) -> Result<Self> {
        if let Some(nodata) = meta.nodata().and_then(|nod| <T as NumCast>::from(nod)) {
            if !nodata.is_nodata() {
                data.iter_mut().for_each(|v| v.init_nodata(nodata));
            }
        }

        DenseArray::new(meta, data)
    }

    pub fn filled_with(val: T, meta: Metadata) -> Self {
        let cell_count = meta.size().cell_count();
        DenseArray {
            meta,
            data: vec![val; cell_count],
        }
    }

    pub fn filled_with_nodata(meta: Metadata) -> Self {
        DenseArray::filled_with(T::NODATA, meta)
    }

    pub fn zeros(meta: Metadata) -> Self {
        DenseArray::filled_with(T::default(), meta)
    }

    pub fn empty() -> Self {
        DenseArray {
            meta: Metadata::sized(RasterSize::empty()),
            data: Vec::new(),
        }
    }

    pub fn into_raw_parts(self) -> (Metadata, Vec<T>) {
        (self.meta, self.data)
    }

    pub fn metadata(&self) -> &Metadata {
        &self.meta
    }

    /// Replace the metadata, the size of the new metadata must match the data
    pub fn with_metadata(self, meta: Metadata) -> Result<Self> {
        DenseArray::new(meta, self.data)
    }

    pub fn size(&self) -> RasterSize {
        self.meta.size()
    }

    pub fn rows(&self) -> Rows {
        self.meta.size().rows
    }

    pub fn columns(&self) -> Columns {
        self.meta.size().cols
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.data.iter_mut()
    }

    /// Iterate over the cells, nodata cells are returned as `None`
    pub fn iter_opt(&self) -> impl Iterator<Item = Option<T>> + '_ {
        self.data.iter().map(|&v| if v.is_nodata() { None } else { Some(v) })
    }

    /// Iterate over the cells that contain data
    pub fn iter_values(&self) -> impl Iterator<Item = T> + '_ {
        self.data.iter().copied().filter(|v| !v.is_nodata())
    }

    pub fn value(&self, index: usize) -> Option<T> {
        self.data.get(index).copied().filter(|v| !v.is_nodata())
    }

    pub fn cell_value(&self, cell: Cell) -> Option<T> {
        self.cell_index(cell).and_then(|index| self.value(index))
    }

    pub fn nodata_count(&self) -> usize {
        self.data.iter().filter(|v| v.is_nodata()).count()
    }

    pub fn contains_data(&self) -> bool {
        self.data.iter().any(|v| !v.is_nodata())
    }

    pub fn unary<U: ArrayNum, F: Fn(T) -> U>(&self, op: F) -> DenseArray<U, Metadata> {
        DenseArray {
            meta: self.meta.clone(),
            data: self.data.iter().map(|&a| op(a)).collect(),
        }
    }

    pub fn unary_mut<F: Fn(T) -> T>(mut self, op: F) -> Self {
        self.data.iter_mut().for_each(|x| *x = op(*x));
        self
    }

    /// Combine the cells of two arrays of identical size, the metadata of `self` is retained
    pub fn binary<U: ArrayNum, R: ArrayNum, M: ArrayMetadata, F: Fn(T, U) -> R>(
        &self,
        other: &DenseArray<U, M>,
        op: F,
    ) -> Result<DenseArray<R, Metadata>> {
        if self.size() != other.size() {
            return Err(Error::SizeMismatch {
                size1: self.size(),
                size2: other.size(),
            });
        }

        Ok(DenseArray {
            meta: self.meta.clone(),
            data: self.data.iter().zip(other.data.iter()).map(|(&a, &b)| op(a, b)).collect(),
        })
    }

    /// Copy the sub window of `size` cells that starts at the `top_left` cell
    pub fn window(&self, top_left: Cell, size: RasterSize) -> Result<Self> {
        let array_size = self.size();
        if top_left.row < 0
            || top_left.col < 0
            || size.rows.count() < 0
            || size.cols.count() < 0
            || top_left.row + size.rows.count() > array_size.rows.count()
            || top_left.col + size.cols.count() > array_size.cols.count()
        {
            return Err(Error::InvalidArgument(format!(
                "Window {size} at ({}, {}) exceeds the array size {array_size}",
                top_left.row, top_left.col
            )));
        }

        let cols = array_size.cols.count() as usize;
        let mut data = Vec::with_capacity(size.cell_count());
        for row in top_left.row..top_left.row + size.rows.count() {
            let start = row as usize * cols + top_left.col as usize;
            data.extend_from_slice(&self.data[start..start + size.cols.count() as usize]);
        }

        Ok(DenseArray {
            meta: self.meta.window(top_left, size),
            data,
        })
    }

    fn cell_index(&self, cell: Cell) -> Option<usize> {
        let size = self.size();
        if cell.row < 0 || cell.col < 0 || cell.row >= size.rows.count() || cell.col >= size.cols.count() {
            return None;
        }

        Some(cell.row as usize * size.cols.count() as usize + cell.col as usize)
    }
}

impl<T: ArrayNum, Metadata: ArrayMetadata> AsRef<[T]> for DenseArray<T, Metadata> {
    fn as_ref(&self) -> &[T] {
        self.data.as_ref()
    }
}

impl<T: ArrayNum, Metadata: ArrayMetadata> std::ops::Index<Cell> for DenseArray<T, Metadata> {
    type Output = T;

    fn index(&self, cell: Cell) -> &Self::Output {
        let cols = self.size().cols.count() as usize;
        &self.data[cell.row as usize * cols + cell.col as usize]
    }
}

/// Nodata cells compare equal to each other, also for floating point arrays
impl<T: ArrayNum, Metadata: ArrayMetadata> PartialEq for DenseArray<T, Metadata> {
    fn eq(&self, other: &Self) -> bool {
        self.meta == other.meta
            && self.data.len() == other.data.len()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(&a, &b)| (a.is_nodata() && b.is_nodata()) || a == b)
    }
}

impl<'a, T: ArrayNum, Metadata: ArrayMetadata> IntoIterator for &'a DenseArray<T, Metadata> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
