use crate::{BoundsCheckError, Plane, Yuv420Layout};

/// Split a contiguous I420 buffer into its Y, U and V planes
///
/// Every returned plane is exactly [`Yuv420Layout::plane_len`] bytes long, trailing bytes after the
/// V plane are dropped.
pub fn infer_planes<S: AnySlice>(
    layout: &Yuv420Layout,
    buf: S,
) -> Result<[S; 3], BoundsCheckError> {
    layout.bounds_check(buf.slice_len(), None)?;

    Ok(split_i420(layout, buf))
}

/// # Panics
///
/// If `buf` is smaller than the layout's buffer size
pub(crate) fn split_i420<S: AnySlice>(layout: &Yuv420Layout, mut buf: S) -> [S; 3] {
    let mut out: [S; 3] = Default::default();

    for (plane, out) in [Plane::Y, Plane::U, Plane::V].into_iter().zip(out.iter_mut()) {
        let (prev, rem) = buf.slice_split_at(layout.plane_len(plane));

        *out = prev;
        buf = rem;
    }

    out
}

/// Helper trait implemented on &[u8] and &mut [u8]
///
/// Views only ever borrow their buffers, so owned storage has to be borrowed before constructing one.
#[diagnostic::on_unimplemented(message = "AnySlice is only implemented for &[u8] and &mut [u8].\n\
               When using or Vec<u8> or similar try .as_slice() or .as_mut_slice()")]
pub trait AnySlice: sealed::Sealed + Default + Sized {
    fn slice_len(&self) -> usize;
    fn slice_split_at(self, at: usize) -> (Self, Self);
    fn bytes(&self) -> &[u8];
}

/// [`AnySlice`] which allows writing, implemented on &mut [u8]
pub trait AnySliceMut: AnySlice {
    fn bytes_mut(&mut self) -> &mut [u8];
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for &[u8] {}
    impl Sealed for &mut [u8] {}
}

impl AnySlice for &[u8] {
    fn slice_len(&self) -> usize {
        self.len()
    }

    fn slice_split_at(self, at: usize) -> (Self, Self) {
        self.split_at(at)
    }

    fn bytes(&self) -> &[u8] {
        self
    }
}

impl AnySlice for &mut [u8] {
    fn slice_len(&self) -> usize {
        self.len()
    }

    fn slice_split_at(self, at: usize) -> (Self, Self) {
        self.split_at_mut(at)
    }

    fn bytes(&self) -> &[u8] {
        self
    }
}

impl AnySliceMut for &mut [u8] {
    fn bytes_mut(&mut self) -> &mut [u8] {
        self
    }
}
