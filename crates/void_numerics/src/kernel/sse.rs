//! SSE/SSE2 kernels (x86, 4 lanes)

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{BinaryOp, Lanes, Quad, UnaryOp};

#[derive(Clone, Copy)]
pub(crate) struct F32x4(__m128);

impl Lanes for F32x4 {
    const WIDTH: usize = 4;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self(_mm_loadu_ps(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        _mm_storeu_ps(ptr, self.0)
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self(_mm_set1_ps(value))
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self(_mm_setzero_ps())
    }

    #[inline(always)]
    unsafe fn add(self, other: Self) -> Self {
        Self(_mm_add_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn sub(self, other: Self) -> Self {
        Self(_mm_sub_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn mul(self, other: Self) -> Self {
        Self(_mm_mul_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn div(self, other: Self) -> Self {
        Self(_mm_div_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn min(self, other: Self) -> Self {
        Self(_mm_min_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn max(self, other: Self) -> Self {
        Self(_mm_max_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn abs(self) -> Self {
        Self(_mm_andnot_ps(_mm_set1_ps(-0.0), self.0))
    }

    #[inline(always)]
    unsafe fn reduce_sum(self) -> f32 {
        hsum(self.0)
    }
}

impl Quad for F32x4 {
    #[inline(always)]
    unsafe fn from_array(values: [f32; 4]) -> Self {
        Self::load(values.as_ptr())
    }

    #[inline(always)]
    unsafe fn reduce_min(self) -> f32 {
        let pairs = _mm_min_ps(self.0, _mm_movehl_ps(self.0, self.0));
        _mm_cvtss_f32(_mm_min_ss(pairs, _mm_shuffle_ps::<0b01>(pairs, pairs)))
    }

    #[inline(always)]
    unsafe fn reduce_max(self) -> f32 {
        let pairs = _mm_max_ps(self.0, _mm_movehl_ps(self.0, self.0));
        _mm_cvtss_f32(_mm_max_ss(pairs, _mm_shuffle_ps::<0b01>(pairs, pairs)))
    }
}

/// Same lanes as [`F32x4`], with fused multiply-add/sub for transforms.
#[derive(Clone, Copy)]
pub(crate) struct F32x4Fma(F32x4);

impl Lanes for F32x4Fma {
    const WIDTH: usize = 4;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self(F32x4::load(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        self.0.store(ptr)
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self(F32x4::splat(value))
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self(F32x4::zero())
    }

    #[inline(always)]
    unsafe fn add(self, other: Self) -> Self {
        Self(self.0.add(other.0))
    }

    #[inline(always)]
    unsafe fn sub(self, other: Self) -> Self {
        Self(self.0.sub(other.0))
    }

    #[inline(always)]
    unsafe fn mul(self, other: Self) -> Self {
        Self(self.0.mul(other.0))
    }

    #[inline(always)]
    unsafe fn div(self, other: Self) -> Self {
        Self(self.0.div(other.0))
    }

    #[inline(always)]
    unsafe fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    #[inline(always)]
    unsafe fn max(self, other: Self) -> Self {
        Self(self.0.max(other.0))
    }

    #[inline(always)]
    unsafe fn abs(self) -> Self {
        Self(self.0.abs())
    }

    #[inline(always)]
    unsafe fn reduce_sum(self) -> f32 {
        self.0.reduce_sum()
    }
}

impl Quad for F32x4Fma {
    #[inline(always)]
    unsafe fn from_array(values: [f32; 4]) -> Self {
        Self(F32x4::from_array(values))
    }

    #[inline(always)]
    unsafe fn mul_add(self, b: Self, c: Self) -> Self {
        Self(F32x4(_mm_fmadd_ps((self.0).0, (b.0).0, (c.0).0)))
    }

    #[inline(always)]
    unsafe fn mul_sub(self, b: Self, c: Self) -> Self {
        Self(F32x4(_mm_fmsub_ps((self.0).0, (b.0).0, (c.0).0)))
    }

    #[inline(always)]
    unsafe fn reduce_min(self) -> f32 {
        self.0.reduce_min()
    }

    #[inline(always)]
    unsafe fn reduce_max(self) -> f32 {
        self.0.reduce_max()
    }
}

/// `(l0 + l2) + (l1 + l3)`
#[inline(always)]
pub(crate) unsafe fn hsum(v: __m128) -> f32 {
    let pairs = _mm_add_ps(v, _mm_movehl_ps(v, v));
    _mm_cvtss_f32(_mm_add_ss(pairs, _mm_shuffle_ps::<0b01>(pairs, pairs)))
}

#[target_feature(enable = "sse,sse2")]
pub(crate) unsafe fn binary<O: BinaryOp>(a: *const f32, b: *const f32, out: *mut f32, n: usize) {
    super::binary::<F32x4, O>(a, b, out, n)
}

#[target_feature(enable = "sse,sse2")]
pub(crate) unsafe fn binary_scalar<O: BinaryOp>(a: *const f32, s: f32, out: *mut f32, n: usize) {
    super::binary_scalar::<F32x4, O>(a, s, out, n)
}

#[target_feature(enable = "sse,sse2")]
pub(crate) unsafe fn unary<O: UnaryOp>(a: *const f32, out: *mut f32, n: usize) {
    super::unary::<F32x4, O>(a, out, n)
}

#[target_feature(enable = "sse,sse2")]
pub(crate) unsafe fn sum(a: *const f32, n: usize) -> f32 {
    super::sum::<F32x4>(a, n)
}

#[target_feature(enable = "sse,sse2")]
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

#[target_feature(enable = "sse,sse2,fma")]
pub(crate) unsafe fn rotated_bounds_fused(
    xs: [f32; 4],
    ys: [f32; 4],
    cos: f32,
    sin: f32,
    ox: f32,
    oy: f32,
) -> [f32; 4] {
    super::rotated_bounds::<F32x4Fma>(xs, ys, cos, sin, ox, oy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::{Abs, Add, Min};

    fn has_sse() -> bool {
        is_x86_feature_detected!("sse") && is_x86_feature_detected!("sse2")
    }

    #[test]
    fn test_hsum_fold_order() {
        if !has_sse() {
            return;
        }
        let v = [1.0e8f32, 1.0, -1.0e8, 1.0];
        let expected = (v[0] + v[2]) + (v[1] + v[3]);
        let got = unsafe { hsum(_mm_loadu_ps(v.as_ptr())) };
        assert_eq!(got, expected);
    }

    #[test]
    fn test_reduce_min_max() {
        if !has_sse() {
            return;
        }
        let (lo, hi) = unsafe {
            let v = F32x4::from_array([3.0, -1.0, 7.0, 2.0]);
            (v.reduce_min(), v.reduce_max())
        };
        assert_eq!(lo, -1.0);
        assert_eq!(hi, 7.0);
    }

    #[test]
    fn test_binary_with_tail() {
        if !has_sse() {
            return;
        }
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let mut out = [0.0; 6];
        unsafe {
            binary::<Add>(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), 6);
        }
        assert_eq!(out, [7.0; 6]);

        unsafe {
            binary::<Min>(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), 6);
        }
        assert_eq!(out, [1.0, 2.0, 3.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_abs_negative_zero() {
        if !has_sse() {
            return;
        }
        let a = [-0.0, -1.5, 2.0, f32::NEG_INFINITY];
        let mut out = [1.0; 4];
        unsafe { unary::<Abs>(a.as_ptr(), out.as_mut_ptr(), 4) };
        assert_eq!(out[0].to_bits(), 0.0f32.to_bits());
        assert_eq!(&out[1..], &[1.5, 2.0, f32::INFINITY]);
    }
}
