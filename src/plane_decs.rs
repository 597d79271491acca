use crate::Plane;

/// Description for a Plane which can be used to implement bounds checks, stride calculation and buffer sizes.
///
/// Not used for sample addressing, only for the utility functions of [`Yuv420Layout`](crate::Yuv420Layout).
#[derive(Clone, Copy)]
pub(crate) struct PlaneDesc {
    pub(crate) width_op: Op,
    pub(crate) height_op: Op,
}

impl PlaneDesc {
    pub(crate) fn packed_stride(&self, width: usize) -> usize {
        self.width_op.op(width)
    }
}

/// Plane's number of samples in relation to width / height
#[derive(Clone, Copy)]
pub(crate) enum Op {
    /// Rounds down, odd chroma rows are not representable
    Div(usize),
    /// Rounds up, the last chroma column covers a single luma column on odd widths
    DivCeil(usize),
    Identity,
}

impl Op {
    pub(crate) fn op(self, lhs: usize) -> usize {
        match self {
            Op::Div(rhs) => lhs / rhs,
            Op::DivCeil(rhs) => lhs.div_ceil(rhs),
            Op::Identity => lhs,
        }
    }
}

pub(crate) const LUMA_PLANE: PlaneDesc = PlaneDesc {
    width_op: Op::Identity,
    height_op: Op::Identity,
};

pub(crate) const CHROMA_PLANE: PlaneDesc = PlaneDesc {
    width_op: Op::DivCeil(2),
    height_op: Op::Div(2),
};

impl Plane {
    pub(crate) fn desc(self) -> PlaneDesc {
        match self {
            Plane::Y | Plane::Alpha => LUMA_PLANE,
            Plane::U | Plane::V => CHROMA_PLANE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chroma_width_rounds_up() {
        assert_eq!(CHROMA_PLANE.packed_stride(4), 2);
        assert_eq!(CHROMA_PLANE.packed_stride(5), 3);
        assert_eq!(CHROMA_PLANE.packed_stride(1), 1);
    }

    #[test]
    fn chroma_height_rounds_down() {
        assert_eq!(CHROMA_PLANE.height_op.op(2), 1);
        assert_eq!(CHROMA_PLANE.height_op.op(6), 3);
    }

    #[test]
    fn alpha_shares_luma_geometry() {
        let alpha = Plane::Alpha.desc();

        assert_eq!(alpha.packed_stride(7), 7);
        assert_eq!(alpha.height_op.op(8), 8);
    }
}
