use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PixelType {
    U8,
    U16,
    U32,
    I8,
    I16,
    I32,
    F32,
    #[default]
    F64,
}

impl PixelType {
    /// Intrinsic representable range of the element type, used as the
    /// display range when the caller does not override it.
    pub fn natural_range(self) -> (f64, f64) {
        match self {
            Self::U8 => (u8::MIN as f64, u8::MAX as f64),
            Self::U16 => (u16::MIN as f64, u16::MAX as f64),
            Self::U32 => (u32::MIN as f64, u32::MAX as f64),
            Self::I8 => (i8::MIN as f64, i8::MAX as f64),
            Self::I16 => (i16::MIN as f64, i16::MAX as f64),
            Self::I32 => (i32::MIN as f64, i32::MAX as f64),
            Self::F32 => (f32::MIN as f64, f32::MAX as f64),
            Self::F64 => (f64::MIN, f64::MAX),
        }
    }
}

/// Element types a stack can be loaded from.
pub trait Pixel: Copy {
    const PIXEL_TYPE: PixelType;

    fn to_f64(self) -> f64;

    /// Float-to-int `as` casts saturate, so out-of-range values pin to the
    /// type bounds and NaN becomes zero.
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_pixel {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Pixel for $ty {
                const PIXEL_TYPE: PixelType = PixelType::$variant;

                fn to_f64(self) -> f64 {
                    self as f64
                }

                fn from_f64(value: f64) -> Self {
                    value as $ty
                }
            }
        )*
    };
}

impl_pixel!(
    u8 => U8,
    u16 => U16,
    u32 => U32,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    f32 => F32,
    f64 => F64,
);
