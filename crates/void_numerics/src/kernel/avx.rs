//! AVX kernels (x86, 8 lanes)
//!
//! Only reachable when the CPU reports AVX and the process opted in.

#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

use super::{BinaryOp, Lanes, UnaryOp};

#[derive(Clone, Copy)]
pub(crate) struct F32x8(__m256);

impl Lanes for F32x8 {
    const WIDTH: usize = 8;

    #[inline(always)]
    unsafe fn load(ptr: *const f32) -> Self {
        Self(_mm256_loadu_ps(ptr))
    }

    #[inline(always)]
    unsafe fn store(self, ptr: *mut f32) {
        _mm256_storeu_ps(ptr, self.0)
    }

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self(_mm256_set1_ps(value))
    }

    #[inline(always)]
    unsafe fn zero() -> Self {
        Self(_mm256_setzero_ps())
    }

    #[inline(always)]
    unsafe fn add(self, other: Self) -> Self {
        Self(_mm256_add_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn sub(self, other: Self) -> Self {
        Self(_mm256_sub_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn mul(self, other: Self) -> Self {
        Self(_mm256_mul_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn div(self, other: Self) -> Self {
        Self(_mm256_div_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn min(self, other: Self) -> Self {
        Self(_mm256_min_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn max(self, other: Self) -> Self {
        Self(_mm256_max_ps(self.0, other.0))
    }

    #[inline(always)]
    unsafe fn abs(self) -> Self {
        Self(_mm256_andnot_ps(_mm256_set1_ps(-0.0), self.0))
    }

    /// Low and high halves added lane-wise, then the 4-lane fold.
    #[inline(always)]
    unsafe fn reduce_sum(self) -> f32 {
        let low = _mm256_castps256_ps128(self.0);
        let high = _mm256_extractf128_ps::<1>(self.0);
        super::sse::hsum(_mm_add_ps(low, high))
    }
}

#[target_feature(enable = "avx")]
pub(crate) unsafe fn binary<O: BinaryOp>(a: *const f32, b: *const f32, out: *mut f32, n: usize) {
    super::binary::<F32x8, O>(a, b, out, n)
}

#[target_feature(enable = "avx")]
pub(crate) unsafe fn binary_scalar<O: BinaryOp>(a: *const f32, s: f32, out: *mut f32, n: usize) {
    super::binary_scalar::<F32x8, O>(a, s, out, n)
}

#[target_feature(enable = "avx")]
pub(crate) unsafe fn unary<O: UnaryOp>(a: *const f32, out: *mut f32, n: usize) {
    super::unary::<F32x8, O>(a, out, n)
}

#[target_feature(enable = "avx")]
pub(crate) unsafe fn sum(a: *const f32, n: usize) -> f32 {
    super::sum::<F32x8>(a, n)
}
