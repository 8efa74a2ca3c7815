use ndarray::{Array2, Array3, ArrayD, ArrayView2, Axis, Ix2, Ix3};

use super::{ModelError, Pixel, PixelType, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum StackData {
    Single(Array2<f64>),
    Sequence(Array3<f64>),
}

/// Image data held by the viewer, converted to `f64` on load so frames can
/// carry fractional intensities regardless of the source element type.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageStack {
    data: StackData,
    pixel_type: PixelType,
}

impl ImageStack {
    pub fn from_array<T: Pixel>(data: ArrayD<T>) -> Result<Self> {
        let ndim = data.ndim();
        let converted = data.mapv(Pixel::to_f64);
        let data = match ndim {
            2 => StackData::Single(converted.into_dimensionality::<Ix2>()?),
            3 => {
                if converted.len_of(Axis(0)) == 0 {
                    return Err(ModelError::EmptyStack);
                }
                StackData::Sequence(converted.into_dimensionality::<Ix3>()?)
            }
            _ => return Err(ModelError::UnsupportedRank { ndim }),
        };
        Ok(Self {
            data,
            pixel_type: T::PIXEL_TYPE,
        })
    }

    pub fn data(&self) -> &StackData {
        &self.data
    }

    pub fn pixel_type(&self) -> PixelType {
        self.pixel_type
    }

    pub fn ndim(&self) -> usize {
        match &self.data {
            StackData::Single(_) => 2,
            StackData::Sequence(_) => 3,
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self.data, StackData::Sequence(_))
    }

    pub fn frame_count(&self) -> usize {
        match &self.data {
            StackData::Single(_) => 1,
            StackData::Sequence(frames) => frames.len_of(Axis(0)),
        }
    }

    /// `(rows, columns)` of every frame.
    pub fn frame_shape(&self) -> (usize, usize) {
        match &self.data {
            StackData::Single(frame) => frame.dim(),
            StackData::Sequence(frames) => {
                let (_, rows, columns) = frames.dim();
                (rows, columns)
            }
        }
    }

    /// A single frame ignores `index`.
    pub fn frame(&self, index: usize) -> Option<ArrayView2<'_, f64>> {
        match &self.data {
            StackData::Single(frame) => Some(frame.view()),
            StackData::Sequence(frames) => {
                (index < frames.len_of(Axis(0))).then(|| frames.index_axis(Axis(0), index))
            }
        }
    }

    pub fn min_max(&self) -> Option<(f64, f64)> {
        let mut iter: Box<dyn Iterator<Item = f64> + '_> = match &self.data {
            StackData::Single(frame) => Box::new(frame.iter().copied()),
            StackData::Sequence(frames) => Box::new(frames.iter().copied()),
        };
        let first = iter.next()?;
        let mut min = first;
        let mut max = first;
        for value in iter {
            if value < min {
                min = value;
            }
            if value > max {
                max = value;
            }
        }
        Some((min, max))
    }
}
