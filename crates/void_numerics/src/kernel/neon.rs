//! NEON kernels (aarch64, 4 lanes)

use std::arch::aarch64::*;

use super::{BinaryOp, Lanes, Quad, UnaryOp};

#[derive(Clone, Copy)]
pub(crate) struct F32x4(float32x4_t);

impl Lanes for F32x4 {
    const WIDTH: usize = 4;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self(vld1q_f32(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        vst1q_f32(ptr, self.0)
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self(vdupq_n_f32(value))
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self(vdupq_n_f32(0.0))
    }

    #[inline(always)]
    unsafe fn add(self, other: Self) -> Self {
        Self(vaddq_f32(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn sub(self, other: Self) -> Self {
        Self(vsubq_f32(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn mul(self, other: Self) -> Self {
        Self(vmulq_f32(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn div(self, other: Self) -> Self {
        Self(vdivq_f32(self.0, other.0))
    }

    // vminq/vminnmq treat NaN differently from minps; compare and select instead.
    #[inline(always)]
    unsafe fn min(self, other: Self) -> Self {
        Self(vbslq_f32(vcltq_f32(self.0, other.0), self.0, other.0))
    }

    #[inline(always)]
    unsafe fn max(self, other: Self) -> Self {
        Self(vbslq_f32(vcgtq_f32(self.0, other.0), self.0, other.0))
    }

    #[inline(always)]
    unsafe fn abs(self) -> Self {
        Self(vabsq_f32(self.0))
    }

    /// `(l0 + l2) + (l1 + l3)`, the same order as the SSE fold.
    #[inline(always)]
    unsafe fn reduce_sum(self) -> f32 {
        let pairs = vadd_f32(vget_low_f32(self.0), vget_high_f32(self.0));
        vget_lane_f32::<0>(pairs) + vget_lane_f32::<1>(pairs)
    }
}

impl Quad for F32x4 {
    #[inline(always)]
    unsafe fn from_array(values: [f32; 4]) -> Self {
        Self::load(values.as_ptr())
    }

    #[inline(always)]
    unsafe fn mul_add(self, b: Self, c: Self) -> Self {
        Self(vfmaq_f32(c.0, self.0, b.0))
    }

    #[inline(always)]
    unsafe fn mul_sub(self, b: Self, c: Self) -> Self {
        Self(vfmaq_f32(vnegq_f32(c.0), self.0, b.0))
    }

    #[inline(always)]
    unsafe fn reduce_min(self) -> f32 {
        let low = vget_low_f32(self.0);
        let high = vget_high_f32(self.0);
        let pairs = vbsl_f32(vclt_f32(low, high), low, high);
        super::Min::scalar(vget_lane_f32::<0>(pairs), vget_lane_f32::<1>(pairs))
    }

    #[inline(always)]
    unsafe fn reduce_max(self) -> f32 {
        let low = vget_low_f32(self.0);
        let high = vget_high_f32(self.0);
        let pairs = vbsl_f32(vcgt_f32(low, high), low, high);
        super::Max::scalar(vget_lane_f32::<0>(pairs), vget_lane_f32::<1>(pairs))
    }
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn binary<O: BinaryOp>(a: *const f32, b: *const f32, out: *mut f32, n: usize) {
    super::binary::<F32x4, O>(a, b, out, n)
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn binary_scalar<O: BinaryOp>(a: *const f32, s: f32, out: *mut f32, n: usize) {
    super::binary_scalar::<F32x4, O>(a, s, out, n)
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn unary<O: UnaryOp>(a: *const f32, out: *mut f32, n: usize) {
    super::unary::<F32x4, O>(a, out, n)
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn sum(a: *const f32, n: usize) -> f32 {
    super::sum::<F32x4>(a, n)
}

#[target_feature(enable = "neon")]
pub(crate) unsafe fn rotated_bounds(
    xs: [f32; 4],
    ys: [f32; 4],
    cos: f32,
    sin: f32,
    ox: f32,
    oy: f32,
) -> [f32; 4] {
    super::rotated_bounds::<F32x4>(xs, ys, cos, sin, ox, oy)
}
