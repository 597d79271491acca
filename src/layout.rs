use crate::{ViewError, plane_decs::PlaneDesc};
use std::fmt;

/// One of the planes addressed by a [`Yuv420View`](crate::Yuv420View)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Plane {
    /// Luma, one sample per pixel
    Y,

    /// Blue difference chroma, one sample per 2x2 pixel block
    U,

    /// Red difference chroma, one sample per 2x2 pixel block
    V,

    /// Separate alpha buffer, same geometry and stride as [`Plane::Y`]
    Alpha,
}

impl Plane {
    pub fn variants() -> impl IntoIterator<Item = Self> {
        [Plane::Y, Plane::U, Plane::V, Plane::Alpha]
    }
}

impl fmt::Display for Plane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Plane::Y => "Y",
            Plane::U => "U",
            Plane::V => "V",
            Plane::Alpha => "alpha",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoundsCheckError {
    #[error("invalid stride at plane {plane}, expected it to be at least {minimum}, but got {got}")]
    InvalidStride {
        plane: Plane,
        minimum: usize,
        got: usize,
    },

    #[error("negative stride at plane {plane}: {got}")]
    NegativeStride { plane: Plane, got: i64 },

    #[error(
        "invalid plane size at plane {plane}, expected it to be at least {minimum}, but got {got}"
    )]
    InvalidPlaneSize {
        plane: Plane,
        minimum: usize,
        got: usize,
    },

    #[error("invalid buffer size, expected it to be at least {minimum}, but got {got}")]
    InvalidBufferSize { minimum: usize, got: usize },

    #[error("image size overflows the address space")]
    Overflow,
}

/// Dimensions and strides of an I420 buffer.
///
/// The Y plane is followed by the U plane and then the V plane inside one contiguous buffer.
/// Each chroma plane has `height / 2` rows of `uv_stride` bytes, the Y plane has `height` rows of
/// `y_stride` bytes. An optional alpha plane lives in a separate buffer and shares the Y plane's
/// stride.
///
/// A layout can only be constructed in a valid state: dimensions are non-zero, the height is even,
/// the strides fit the plane widths and the total buffer size does not overflow `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Yuv420Layout {
    width: usize,
    height: usize,
    y_stride: usize,
    uv_stride: usize,
}

impl Yuv420Layout {
    pub fn new(
        width: usize,
        height: usize,
        y_stride: usize,
        uv_stride: usize,
    ) -> Result<Self, ViewError> {
        if width == 0 || height == 0 {
            return Err(ViewError::InvalidDimensions);
        }

        if height % 2 != 0 {
            return Err(ViewError::OddHeight { height });
        }

        let this = Self {
            width,
            height,
            y_stride,
            uv_stride,
        };

        this.stride_check()?;
        this.buffer_size()?;

        Ok(this)
    }

    /// Layout without any row padding
    pub fn packed(width: usize, height: usize) -> Result<Self, ViewError> {
        Self::new(
            width,
            height,
            Plane::Y.desc().packed_stride(width),
            Plane::U.desc().packed_stride(width),
        )
    }

    /// Build a layout from the signed integer fields a host runtime hands out
    ///
    /// Non-positive dimensions are reported as [`ViewError::InvalidDimensions`], negative strides as
    /// [`BoundsCheckError::NegativeStride`].
    pub fn from_host(
        width: i64,
        height: i64,
        y_stride: i64,
        uv_stride: i64,
    ) -> Result<Self, ViewError> {
        if width <= 0 || height <= 0 {
            return Err(ViewError::InvalidDimensions);
        }

        fn stride(plane: Plane, got: i64) -> Result<usize, BoundsCheckError> {
            if got < 0 {
                return Err(BoundsCheckError::NegativeStride { plane, got });
            }

            usize::try_from(got).map_err(|_| BoundsCheckError::Overflow)
        }

        let y_stride = stride(Plane::Y, y_stride)?;
        let uv_stride = stride(Plane::U, uv_stride)?;

        let width = usize::try_from(width).map_err(|_| BoundsCheckError::Overflow)?;
        let height = usize::try_from(height).map_err(|_| BoundsCheckError::Overflow)?;

        Self::new(width, height, y_stride, uv_stride)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn y_stride(&self) -> usize {
        self.y_stride
    }

    pub fn uv_stride(&self) -> usize {
        self.uv_stride
    }

    /// Width of the U and V planes in samples, `ceil(width / 2)`
    pub fn chroma_width(&self) -> usize {
        Plane::U.desc().width_op.op(self.width)
    }

    /// Height of the U and V planes in rows, `height / 2`
    pub fn chroma_height(&self) -> usize {
        Plane::U.desc().height_op.op(self.height)
    }

    /// Strides of the Y, U and V planes
    pub fn strides(&self) -> [usize; 3] {
        [self.y_stride, self.uv_stride, self.uv_stride]
    }

    pub fn stride(&self, plane: Plane) -> usize {
        match plane {
            Plane::Y | Plane::Alpha => self.y_stride,
            Plane::U | Plane::V => self.uv_stride,
        }
    }

    /// Minimum length of the Y|U|V buffer, `y_stride * height + 2 * uv_stride * (height / 2)`
    #[deny(clippy::arithmetic_side_effects)]
    pub fn buffer_size(&self) -> Result<usize, BoundsCheckError> {
        let luma = self
            .y_stride
            .checked_mul(self.height)
            .ok_or(BoundsCheckError::Overflow)?;

        let chroma = self
            .uv_stride
            .checked_mul(self.chroma_height())
            .and_then(|plane| plane.checked_mul(2))
            .ok_or(BoundsCheckError::Overflow)?;

        luma.checked_add(chroma).ok_or(BoundsCheckError::Overflow)
    }

    /// Minimum length of a separate alpha buffer, `y_stride * height`
    #[deny(clippy::arithmetic_side_effects)]
    pub fn alpha_size(&self) -> Result<usize, BoundsCheckError> {
        self.y_stride
            .checked_mul(self.height)
            .ok_or(BoundsCheckError::Overflow)
    }

    /// Length of a single plane in bytes
    pub fn plane_len(&self, plane: Plane) -> usize {
        // Cannot overflow, buffer_size was checked on construction
        let desc = plane.desc();
        self.stride(plane) * desc.height_op.op(self.height)
    }

    /// Offset of the first byte of a plane inside its buffer
    ///
    /// [`Plane::Alpha`] lives in its own buffer and therefore always starts at 0.
    pub fn plane_start(&self, plane: Plane) -> usize {
        match plane {
            Plane::Y | Plane::Alpha => 0,
            Plane::U => self.plane_len(Plane::Y),
            Plane::V => self.plane_len(Plane::Y) + self.plane_len(Plane::U),
        }
    }

    /// Returns `true` if the pixel coordinate lies inside the image
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// Byte offset of the sample covering pixel (`x`, `y`) inside the plane's buffer
    pub fn offset(&self, plane: Plane, x: usize, y: usize) -> Result<usize, ViewError> {
        if !self.contains(x, y) {
            return Err(ViewError::OutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }

        Ok(self.offset_unchecked(plane, x, y))
    }

    pub fn y_offset(&self, x: usize, y: usize) -> Result<usize, ViewError> {
        self.offset(Plane::Y, x, y)
    }

    pub fn u_offset(&self, x: usize, y: usize) -> Result<usize, ViewError> {
        self.offset(Plane::U, x, y)
    }

    pub fn v_offset(&self, x: usize, y: usize) -> Result<usize, ViewError> {
        self.offset(Plane::V, x, y)
    }

    pub fn alpha_offset(&self, x: usize, y: usize) -> Result<usize, ViewError> {
        self.offset(Plane::Alpha, x, y)
    }

    /// Same as [`Yuv420Layout::offset`] without the coordinate check.
    ///
    /// For coordinates outside of the image the result is meaningless and may exceed the buffer.
    #[inline(always)]
    pub(crate) fn offset_unchecked(&self, plane: Plane, x: usize, y: usize) -> usize {
        match plane {
            Plane::Y | Plane::Alpha => y * self.y_stride + x,
            Plane::U => self.height * self.y_stride + (y / 2) * self.uv_stride + (x / 2),
            Plane::V => {
                self.height * self.y_stride
                    + (self.height / 2 + y / 2) * self.uv_stride
                    + (x / 2)
            }
        }
    }

    /// Check if buffers of the given lengths can hold this layout
    pub fn bounds_check(
        &self,
        data_len: usize,
        alpha_len: Option<usize>,
    ) -> Result<(), BoundsCheckError> {
        let minimum = self.buffer_size()?;

        if minimum > data_len {
            return Err(BoundsCheckError::InvalidBufferSize {
                minimum,
                got: data_len,
            });
        }

        if let Some(got) = alpha_len {
            let minimum = self.alpha_size()?;

            if minimum > got {
                return Err(BoundsCheckError::InvalidPlaneSize {
                    plane: Plane::Alpha,
                    minimum,
                    got,
                });
            }
        }

        Ok(())
    }

    fn stride_check(&self) -> Result<(), BoundsCheckError> {
        fn check(
            plane: Plane,
            desc: PlaneDesc,
            width: usize,
            stride: usize,
        ) -> Result<(), BoundsCheckError> {
            // Ensure stride is not smaller than the width would allow
            let minimum = desc.packed_stride(width);

            if minimum > stride {
                return Err(BoundsCheckError::InvalidStride {
                    plane,
                    minimum,
                    got: stride,
                });
            }

            Ok(())
        }

        check(Plane::Y, Plane::Y.desc(), self.width, self.y_stride)?;
        check(Plane::U, Plane::U.desc(), self.width, self.uv_stride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert_eq!(
            Yuv420Layout::new(0, 2, 4, 2),
            Err(ViewError::InvalidDimensions)
        );
        assert_eq!(
            Yuv420Layout::new(4, 0, 4, 2),
            Err(ViewError::InvalidDimensions)
        );
    }

    #[test]
    fn rejects_odd_height() {
        assert_eq!(
            Yuv420Layout::new(4, 3, 4, 2),
            Err(ViewError::OddHeight { height: 3 })
        );
    }

    #[test]
    fn rejects_short_strides() {
        assert_eq!(
            Yuv420Layout::new(4, 2, 3, 2),
            Err(ViewError::BoundsCheck(BoundsCheckError::InvalidStride {
                plane: Plane::Y,
                minimum: 4,
                got: 3,
            }))
        );

        // odd widths need ceil(width / 2) chroma samples per row
        assert_eq!(
            Yuv420Layout::new(5, 2, 5, 2),
            Err(ViewError::BoundsCheck(BoundsCheckError::InvalidStride {
                plane: Plane::U,
                minimum: 3,
                got: 2,
            }))
        );
    }

    #[test]
    fn rejects_overflowing_size() {
        assert_eq!(
            Yuv420Layout::new(usize::MAX / 2, 4, usize::MAX / 2, usize::MAX / 2),
            Err(ViewError::BoundsCheck(BoundsCheckError::Overflow))
        );
    }

    #[test]
    fn host_values() {
        assert_eq!(
            Yuv420Layout::from_host(-4, 2, 4, 2),
            Err(ViewError::InvalidDimensions)
        );
        assert_eq!(
            Yuv420Layout::from_host(4, 2, -4, 2),
            Err(ViewError::BoundsCheck(BoundsCheckError::NegativeStride {
                plane: Plane::Y,
                got: -4,
            }))
        );
        assert_eq!(
            Yuv420Layout::from_host(4, 2, 4, -1),
            Err(ViewError::BoundsCheck(BoundsCheckError::NegativeStride {
                plane: Plane::U,
                got: -1,
            }))
        );

        let layout = Yuv420Layout::from_host(4, 2, 8, 4).unwrap();
        assert_eq!(layout, Yuv420Layout::new(4, 2, 8, 4).unwrap());
    }

    #[test]
    fn packed_layout() {
        let layout = Yuv420Layout::packed(5, 4).unwrap();

        assert_eq!(layout.y_stride(), 5);
        assert_eq!(layout.uv_stride(), 3);
        assert_eq!(layout.chroma_width(), 3);
        assert_eq!(layout.chroma_height(), 2);
        assert_eq!(layout.buffer_size(), Ok(5 * 4 + 2 * 3 * 2));
        assert_eq!(layout.alpha_size(), Ok(20));
    }

    #[test]
    fn plane_ranges() {
        let layout = Yuv420Layout::new(4, 4, 6, 3).unwrap();

        assert_eq!(layout.plane_start(Plane::Y), 0);
        assert_eq!(layout.plane_len(Plane::Y), 24);
        assert_eq!(layout.plane_start(Plane::U), 24);
        assert_eq!(layout.plane_len(Plane::U), 6);
        assert_eq!(layout.plane_start(Plane::V), 30);
        assert_eq!(layout.plane_len(Plane::V), 6);
        assert_eq!(layout.plane_start(Plane::Alpha), 0);
        assert_eq!(layout.plane_len(Plane::Alpha), 24);
        assert_eq!(
            layout.plane_start(Plane::V) + layout.plane_len(Plane::V),
            layout.buffer_size().unwrap()
        );
    }

    #[test]
    fn offsets() {
        let layout = Yuv420Layout::new(4, 2, 4, 2).unwrap();

        assert_eq!(layout.y_offset(2, 1), Ok(6));
        assert_eq!(layout.u_offset(2, 0), Ok(9));
        assert_eq!(layout.u_offset(3, 1), Ok(9));
        assert_eq!(layout.v_offset(0, 1), Ok(10));
        assert_eq!(layout.alpha_offset(3, 1), Ok(7));
        assert_eq!(
            layout.y_offset(4, 0),
            Err(ViewError::OutOfRange {
                x: 4,
                y: 0,
                width: 4,
                height: 2,
            })
        );
    }

    #[test]
    fn v_plane_follows_u_plane() {
        for width in 1..12 {
            let layout = Yuv420Layout::packed(width, 6).unwrap();

            for uv_stride in layout.chroma_width()..layout.chroma_width() + 5 {
                let layout = Yuv420Layout::new(width, 6, width, uv_stride).unwrap();

                for y in 0..6 {
                    for x in 0..width {
                        let u = layout.u_offset(x, y).unwrap();
                        let v = layout.v_offset(x, y).unwrap();

                        assert_eq!(v - u, 3 * uv_stride);
                    }
                }
            }
        }
    }

    #[test]
    fn bounds_check() {
        let layout = Yuv420Layout::new(4, 2, 4, 2).unwrap();

        assert_eq!(layout.bounds_check(12, None), Ok(()));
        assert_eq!(layout.bounds_check(64, Some(8)), Ok(()));
        assert_eq!(
            layout.bounds_check(11, None),
            Err(BoundsCheckError::InvalidBufferSize {
                minimum: 12,
                got: 11,
            })
        );
        assert_eq!(
            layout.bounds_check(12, Some(7)),
            Err(BoundsCheckError::InvalidPlaneSize {
                plane: Plane::Alpha,
                minimum: 8,
                got: 7,
            })
        );
    }
}
