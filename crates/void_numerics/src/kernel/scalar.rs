//! Scalar kernels: a one-lane register, always available

use super::{BinaryOp, Lanes, UnaryOp};

impl Lanes for f32 {
    const WIDTH: usize = 1;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        *ptr
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        *ptr = self;
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        value
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        0.0
    }

    #[inline(always)]
    unsafe fn add(self, other: Self) -> Self {
        self + other
    }

    #[inline(always)]
    unsafe fn sub(self, other: Self) -> Self {
        self - other
    }

    #[inline(always)]
    unsafe fn mul(self, other: Self) -> Self {
        self * other
    }

    #[inline(always)]
    unsafe fn div(self, other: Self) -> Self {
        self / other
    }

    #[inline(always)]
    unsafe fn min(self, other: Self) -> Self {
        super::Min::scalar(self, other)
    }

    #[inline(always)]
    unsafe fn max(self, other: Self) -> Self {
        super::Max::scalar(self, other)
    }

    #[inline(always)]
    unsafe fn abs(self) -> Self {
        super::Abs::scalar(self)
    }

    #[inline(always)]
    unsafe fn reduce_sum(self) -> f32 {
        self
    }
}

pub(crate) unsafe fn binary<O: BinaryOp>(a: *const f32, b: *const f32, out: *mut f32, n: usize) {
    super::binary::<f32, O>(a, b, out, n)
}

pub(crate) unsafe fn binary_scalar<O: BinaryOp>(a: *const f32, s: f32, out: *mut f32, n: usize) {
    super::binary_scalar::<f32, O>(a, s, out, n)
}

pub(crate) unsafe fn unary<O: UnaryOp>(a: *const f32, out: *mut f32, n: usize) {
    super::unary::<f32, O>(a, out, n)
}

pub(crate) unsafe fn sum(a: *const f32, n: usize) -> f32 {
    super::sum::<f32>(a, n)
}

/// Rotate the four corners one at a time and take a linear min/max.
pub(crate) unsafe fn rotated_bounds(
    xs: [f32; 4],
    ys: [f32; 4],
    cos: f32,
    sin: f32,
    ox: f32,
    oy: f32,
) -> [f32; 4] {
    let mut bounds = [f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY];

    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let dx = x - ox;
        let dy = y - oy;
        let rx = cos * dx - sin * dy + ox;
        let ry = cos * dy + sin * dx + oy;

        bounds[0] = super::Min::scalar(bounds[0], rx);
        bounds[1] = super::Min::scalar(bounds[1], ry);
        bounds[2] = super::Max::scalar(bounds[2], rx);
        bounds[3] = super::Max::scalar(bounds[3], ry);
    }

    bounds
}
