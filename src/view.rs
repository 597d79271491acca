use crate::{
    AnySlice, AnySliceMut, BoundsCheckError, Plane, Yuv420Layout, planes::split_i420,
};

/// Non-owning view over an I420 buffer and an optional separate alpha buffer
///
/// `S` is either `&[u8]` for read-only access or `&mut [u8]` to also allow writing samples.
/// The buffers are bounds checked once on construction, every accessor additionally checks the pixel
/// coordinate unless the `*_unchecked` variants are used.
#[derive(Debug, Clone)]
pub struct Yuv420View<S> {
    layout: Yuv420Layout,
    data: S,
    alpha: Option<S>,
}

/// Everything that can go wrong when constructing or accessing a [`Yuv420View`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    #[error("width or height must not be zero")]
    InvalidDimensions,

    #[error("height must be even for 4:2:0 sub sampling, but got {height}")]
    OddHeight { height: usize },

    #[error("image has no alpha plane")]
    NoAlphaChannel,

    #[error("pixel ({x}, {y}) is out of range for an image of {width}x{height}")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error(transparent)]
    BoundsCheck(#[from] BoundsCheckError),
}

impl<S: AnySlice> Yuv420View<S> {
    pub fn new(
        data: S,
        y_stride: usize,
        uv_stride: usize,
        width: usize,
        height: usize,
        alpha: Option<S>,
    ) -> Result<Self, ViewError> {
        let layout = Yuv420Layout::new(width, height, y_stride, uv_stride)?;

        Self::with_layout(layout, data, alpha)
    }

    /// Construct a view from the signed fields of a host runtime value, see [`Yuv420Layout::from_host`]
    pub fn from_host(
        data: S,
        y_stride: i64,
        uv_stride: i64,
        width: i64,
        height: i64,
        alpha: Option<S>,
    ) -> Result<Self, ViewError> {
        let layout = Yuv420Layout::from_host(width, height, y_stride, uv_stride)?;

        Self::with_layout(layout, data, alpha)
    }

    pub fn with_layout(
        layout: Yuv420Layout,
        data: S,
        alpha: Option<S>,
    ) -> Result<Self, ViewError> {
        layout.bounds_check(data.slice_len(), alpha.as_ref().map(AnySlice::slice_len))?;

        Ok(Self {
            layout,
            data,
            alpha,
        })
    }

    pub fn layout(&self) -> &Yuv420Layout {
        &self.layout
    }

    pub fn width(&self) -> usize {
        self.layout.width()
    }

    pub fn height(&self) -> usize {
        self.layout.height()
    }

    pub fn y_stride(&self) -> usize {
        self.layout.y_stride()
    }

    pub fn uv_stride(&self) -> usize {
        self.layout.uv_stride()
    }

    pub fn has_alpha(&self) -> bool {
        self.alpha.is_some()
    }

    /// Returns the borrowed buffers
    pub fn into_inner(self) -> (S, Option<S>) {
        (self.data, self.alpha)
    }

    /// Sample of the given plane covering pixel (`x`, `y`)
    pub fn sample(&self, plane: Plane, x: usize, y: usize) -> Result<u8, ViewError> {
        let buf = self.buffer(plane)?;
        let offset = self.layout.offset(plane, x, y)?;

        Ok(buf[offset])
    }

    pub fn y(&self, x: usize, y: usize) -> Result<u8, ViewError> {
        self.sample(Plane::Y, x, y)
    }

    pub fn u(&self, x: usize, y: usize) -> Result<u8, ViewError> {
        self.sample(Plane::U, x, y)
    }

    pub fn v(&self, x: usize, y: usize) -> Result<u8, ViewError> {
        self.sample(Plane::V, x, y)
    }

    pub fn alpha(&self, x: usize, y: usize) -> Result<u8, ViewError> {
        self.sample(Plane::Alpha, x, y)
    }

    /// # Safety
    ///
    /// `x` must be smaller than the width, `y` smaller than the height and if `plane` is
    /// [`Plane::Alpha`] the view must have an alpha buffer.
    #[inline(always)]
    pub unsafe fn sample_unchecked(&self, plane: Plane, x: usize, y: usize) -> u8 {
        debug_assert!(self.layout.contains(x, y));
        debug_assert!(plane != Plane::Alpha || self.has_alpha());

        let offset = self.layout.offset_unchecked(plane, x, y);

        // Safety: buffers passed the bounds check on construction, caller guarantees the rest
        unsafe {
            let buf = match plane {
                Plane::Y | Plane::U | Plane::V => self.data.bytes(),
                Plane::Alpha => self.alpha.as_ref().unwrap_unchecked().bytes(),
            };

            *buf.get_unchecked(offset)
        }
    }

    /// # Safety
    ///
    /// See [`Yuv420View::sample_unchecked`]
    pub unsafe fn y_unchecked(&self, x: usize, y: usize) -> u8 {
        unsafe { self.sample_unchecked(Plane::Y, x, y) }
    }

    /// # Safety
    ///
    /// See [`Yuv420View::sample_unchecked`]
    pub unsafe fn u_unchecked(&self, x: usize, y: usize) -> u8 {
        unsafe { self.sample_unchecked(Plane::U, x, y) }
    }

    /// # Safety
    ///
    /// See [`Yuv420View::sample_unchecked`]
    pub unsafe fn v_unchecked(&self, x: usize, y: usize) -> u8 {
        unsafe { self.sample_unchecked(Plane::V, x, y) }
    }

    /// # Safety
    ///
    /// See [`Yuv420View::sample_unchecked`]
    pub unsafe fn alpha_unchecked(&self, x: usize, y: usize) -> u8 {
        unsafe { self.sample_unchecked(Plane::Alpha, x, y) }
    }

    /// A single plane with its stride
    pub fn plane(&self, plane: Plane) -> Result<(&[u8], usize), ViewError> {
        let start = self.layout.plane_start(plane);
        let end = start + self.layout.plane_len(plane);

        Ok((&self.buffer(plane)?[start..end], self.layout.stride(plane)))
    }

    /// Returns an iterator yielding the Y, U, V and (if present) alpha planes with their associated stride
    pub fn planes(&self) -> impl Iterator<Item = (&[u8], usize)> + '_ {
        let [y_stride, u_stride, v_stride] = self.layout.strides();
        let [y, u, v] = split_i420(&self.layout, self.data.bytes());

        let alpha = self.alpha.as_ref().map(|alpha| {
            let len = self.layout.plane_len(Plane::Alpha);
            (&alpha.bytes()[..len], y_stride)
        });

        [(y, y_stride), (u, u_stride), (v, v_stride)]
            .into_iter()
            .chain(alpha)
    }

    fn buffer(&self, plane: Plane) -> Result<&[u8], ViewError> {
        match plane {
            Plane::Y | Plane::U | Plane::V => Ok(self.data.bytes()),
            Plane::Alpha => self
                .alpha
                .as_ref()
                .map(AnySlice::bytes)
                .ok_or(ViewError::NoAlphaChannel),
        }
    }
}

impl<S: AnySliceMut> Yuv420View<S> {
    /// Overwrite the sample of the given plane covering pixel (`x`, `y`)
    ///
    /// Chroma samples are shared by 2x2 pixel blocks, writing U or V affects all four pixels.
    pub fn set_sample(
        &mut self,
        plane: Plane,
        x: usize,
        y: usize,
        value: u8,
    ) -> Result<(), ViewError> {
        let offset = self.layout.offset(plane, x, y);
        let buf = self.buffer_mut(plane)?;

        buf[offset?] = value;

        Ok(())
    }

    pub fn set_y(&mut self, x: usize, y: usize, value: u8) -> Result<(), ViewError> {
        self.set_sample(Plane::Y, x, y, value)
    }

    pub fn set_u(&mut self, x: usize, y: usize, value: u8) -> Result<(), ViewError> {
        self.set_sample(Plane::U, x, y, value)
    }

    pub fn set_v(&mut self, x: usize, y: usize, value: u8) -> Result<(), ViewError> {
        self.set_sample(Plane::V, x, y, value)
    }

    pub fn set_alpha(&mut self, x: usize, y: usize, value: u8) -> Result<(), ViewError> {
        self.set_sample(Plane::Alpha, x, y, value)
    }

    /// # Safety
    ///
    /// Same requirements as [`Yuv420View::sample_unchecked`]
    #[inline(always)]
    pub unsafe fn set_sample_unchecked(&mut self, plane: Plane, x: usize, y: usize, value: u8) {
        debug_assert!(self.layout.contains(x, y));
        debug_assert!(plane != Plane::Alpha || self.has_alpha());

        let offset = self.layout.offset_unchecked(plane, x, y);

        // Safety: buffers passed the bounds check on construction, caller guarantees the rest
        unsafe {
            let buf = match plane {
                Plane::Y | Plane::U | Plane::V => self.data.bytes_mut(),
                Plane::Alpha => self.alpha.as_mut().unwrap_unchecked().bytes_mut(),
            };

            *buf.get_unchecked_mut(offset) = value;
        }
    }

    /// # Safety
    ///
    /// See [`Yuv420View::sample_unchecked`]
    pub unsafe fn set_y_unchecked(&mut self, x: usize, y: usize, value: u8) {
        unsafe { self.set_sample_unchecked(Plane::Y, x, y, value) }
    }

    /// # Safety
    ///
    /// See [`Yuv420View::sample_unchecked`]
    pub unsafe fn set_u_unchecked(&mut self, x: usize, y: usize, value: u8) {
        unsafe { self.set_sample_unchecked(Plane::U, x, y, value) }
    }

    /// # Safety
    ///
    /// See [`Yuv420View::sample_unchecked`]
    pub unsafe fn set_v_unchecked(&mut self, x: usize, y: usize, value: u8) {
        unsafe { self.set_sample_unchecked(Plane::V, x, y, value) }
    }

    /// # Safety
    ///
    /// See [`Yuv420View::sample_unchecked`]
    pub unsafe fn set_alpha_unchecked(&mut self, x: usize, y: usize, value: u8) {
        unsafe { self.set_sample_unchecked(Plane::Alpha, x, y, value) }
    }

    /// Mutable version of [`Yuv420View::plane`]
    pub fn plane_mut(&mut self, plane: Plane) -> Result<(&mut [u8], usize), ViewError> {
        let start = self.layout.plane_start(plane);
        let end = start + self.layout.plane_len(plane);
        let stride = self.layout.stride(plane);

        Ok((&mut self.buffer_mut(plane)?[start..end], stride))
    }

    /// Mutable version of [`Yuv420View::planes`]
    pub fn planes_mut(&mut self) -> impl Iterator<Item = (&mut [u8], usize)> + '_ {
        let layout = self.layout;
        let [y_stride, u_stride, v_stride] = layout.strides();
        let [y, u, v] = split_i420(&layout, self.data.bytes_mut());

        let alpha = self.alpha.as_mut().map(|alpha| {
            let len = layout.plane_len(Plane::Alpha);
            (&mut alpha.bytes_mut()[..len], y_stride)
        });

        [(y, y_stride), (u, u_stride), (v, v_stride)]
            .into_iter()
            .chain(alpha)
    }

    fn buffer_mut(&mut self, plane: Plane) -> Result<&mut [u8], ViewError> {
        match plane {
            Plane::Y | Plane::U | Plane::V => Ok(self.data.bytes_mut()),
            Plane::Alpha => self
                .alpha
                .as_mut()
                .map(AnySliceMut::bytes_mut)
                .ok_or(ViewError::NoAlphaChannel),
        }
    }
}
