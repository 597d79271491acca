//! Pixel level access to I420 buffers.
//!
//! A [`Yuv420View`] borrows a buffer containing the Y, U and V planes back to back plus an optional
//! separate alpha buffer and hands out the sample covering any pixel coordinate.
//!
//! ```
//! use yuv420_view::Yuv420View;
//!
//! // 4x2 image: Y plane, then one row of U, then one row of V
//! let data: [u8; 12] = [0, 1, 2, 3, 4, 5, 6, 7, 10, 11, 20, 21];
//! let view = Yuv420View::new(&data[..], 4, 2, 4, 2, None)?;
//!
//! assert_eq!(view.y(2, 1)?, 6);
//! assert_eq!(view.u(2, 0)?, 11);
//! assert_eq!(view.v(0, 1)?, 20);
//! # Ok::<(), yuv420_view::ViewError>(())
//! ```

pub use layout::{BoundsCheckError, Plane, Yuv420Layout};
pub use planes::{AnySlice, AnySliceMut, infer_planes};
pub use view::{ViewError, Yuv420View};

mod layout;
mod plane_decs;
mod planes;
mod view;
