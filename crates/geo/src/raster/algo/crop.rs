use crate::{ArrayMetadata, ArrayNum, Cell, DenseArray, Result};

/// Crop both arrays to their common size (the smallest row count and the smallest column count).
/// The bottom right corners of the arrays are kept aligned, so the excess rows and columns are removed from the top and the left.
pub fn align_bottom_right<T, U, M1, M2>(a: &DenseArray<T, M1>, b: &DenseArray<U, M2>) -> Result<(DenseArray<T, M1>, DenseArray<U, M2>)>
where
    T: ArrayNum,
    U: ArrayNum,
    M1: ArrayMetadata,
    M2: ArrayMetadata,
{
    let size = a.size().min_dimensions(&b.size());
    if a.size() != b.size() {
        log::debug!("Align array sizes {} and {} to {size}", a.size(), b.size());
    }

    let top_left = |array_size: crate::RasterSize| {
        Cell::from_row_col(
            array_size.rows.count() - size.rows.count(),
            array_size.cols.count() - size.cols.count(),
        )
    };

    Ok((a.window(top_left(a.size()), size)?, b.window(top_left(b.size()), size)?))
}

#[cfg(test)]
#[generic_tests::define]
mod generictests {
    use super::*;
    use crate::{CellSize, Columns, GeoReference, Point, RasterSize, Rows, testutils::*};

    #[test]
    fn align_different_sizes<T: ArrayNum>() -> Result<()> {
        #[rustfmt::skip]
        let a = DenseArray::<T>::new(RasterSize::square(5), create_vec(&[
             1.0,  2.0,  3.0,  4.0,  5.0,
             6.0,  7.0,  8.0,  9.0, 10.0,
            11.0, 12.0, 13.0, 14.0, 15.0,
            16.0, 17.0, 18.0, 19.0, 20.0,
            21.0, 22.0, 23.0, 24.0,  NOD,
        ]))?;

        #[rustfmt::skip]
        let b = DenseArray::<T>::new(RasterSize::with_rows_cols(Rows(4), Columns(6)), create_vec(&[
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0,
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0,
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0,
            1.0, 2.0, 3.0, 4.0, 5.0, 6.0,
        ]))?;

        let (a, b) = align_bottom_right(&a, &b)?;
        let expected_size = RasterSize::with_rows_cols(Rows(4), Columns(5));
        assert_eq!(a.size(), expected_size);
        assert_eq!(b.size(), expected_size);

        #[rustfmt::skip]
        let expected = DenseArray::<T>::new(expected_size, create_vec(&[
             6.0,  7.0,  8.0,  9.0, 10.0,
            11.0, 12.0, 13.0, 14.0, 15.0,
            16.0, 17.0, 18.0, 19.0, 20.0,
            21.0, 22.0, 23.0, 24.0,  NOD,
        ]))?;
        assert_eq!(a, expected);

        assert!(b.iter().step_by(5).all(|&v| v == T::from_num(2)));
        Ok(())
    }

    #[test]
    fn align_identical_sizes<T: ArrayNum>() -> Result<()> {
        let a = DenseArray::<T>::new(RasterSize::square(2), create_vec(&[1.0, 2.0, 3.0, 4.0]))?;
        let (a2, b2) = align_bottom_right(&a, &a)?;
        assert_eq!(a2, a);
        assert_eq!(b2, a);
        Ok(())
    }

    #[test]
    fn align_keeps_bottom_right_georeference<T: ArrayNum>() -> Result<()> {
        let georef = GeoReference::with_origin(
            "EPSG:2056",
            RasterSize::with_rows_cols(Rows(3), Columns(3)),
            Point::new(0.0, 0.0),
            CellSize::square(10.0),
            Some(NOD),
        );

        let a = DenseArray::<T, _>::filled_with(T::from_num(1), georef);
        let b = DenseArray::<T>::filled_with(T::from_num(1), RasterSize::square(2));

        let (a, _) = align_bottom_right(&a, &b)?;
        assert_eq!(a.metadata().extent().to_array(), [10.0, 30.0, 0.0, 20.0]);
        Ok(())
    }

    #[instantiate_tests(<u8>)]
    mod u8 {}

    #[instantiate_tests(<i32>)]
    mod i32 {}

    #[instantiate_tests(<f32>)]
    mod f32 {}

    #[instantiate_tests(<f64>)]
    mod f64 {}
}
