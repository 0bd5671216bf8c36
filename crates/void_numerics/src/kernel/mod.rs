//! Buffer kernels
//!
//! Every operation is written once as a generic driver over a register type
//! ([`Lanes`]) and an operation ([`BinaryOp`] / [`UnaryOp`]). Each instruction
//! set module instantiates the drivers inside its own `#[target_feature]`
//! entry points, and the dispatcher stores those entry points as plain
//! function pointers.
//!
//! A driver splits a buffer of `n` elements into a vector prefix of
//! `n - n % WIDTH` elements and a scalar remainder. The prefix loads a whole
//! register from every input before storing to the output, so the output may
//! be the same memory as the first input.

pub(crate) mod scalar;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod sse;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub(crate) mod avx;

#[cfg(target_arch = "aarch64")]
pub(crate) mod neon;

/// A register of `WIDTH` f32 lanes.
///
/// All methods are `unsafe` because vector implementations call intrinsics
/// that require their instruction set; callers must only use a register type
/// inside an entry point that enables it.
pub(crate) trait Lanes: Copy {
    const WIDTH: usize;

    /// Load `WIDTH` elements from `ptr` (no alignment requirement)
    unsafe fn load(ptr: *const f32) -> Self;
    /// Store `WIDTH` elements to `ptr` (no alignment requirement)
    unsafe fn store(self, ptr: *mut f32);
    unsafe fn splat(value: f32) -> Self;
    unsafe fn zero() -> Self;

    unsafe fn add(self, other: Self) -> Self;
    unsafe fn sub(self, other: Self) -> Self;
    unsafe fn mul(self, other: Self) -> Self;
    unsafe fn div(self, other: Self) -> Self;
    /// Lane-wise `if a < b { a } else { b }`
    unsafe fn min(self, other: Self) -> Self;
    /// Lane-wise `if a > b { a } else { b }`
    unsafe fn max(self, other: Self) -> Self;
    /// Clear every sign bit
    unsafe fn abs(self) -> Self;

    /// Fold all lanes into one sum using pairwise adds
    unsafe fn reduce_sum(self) -> f32;
}

/// A 4-lane register used for batched 2D point transforms
pub(crate) trait Quad: Lanes {
    unsafe fn from_array(values: [f32; 4]) -> Self;

    /// `self * b + c`
    #[inline(always)]
    unsafe fn mul_add(self, b: Self, c: Self) -> Self {
        self.mul(b).add(c)
    }

    /// `self * b - c`
    #[inline(always)]
    unsafe fn mul_sub(self, b: Self, c: Self) -> Self {
        self.mul(b).sub(c)
    }

    unsafe fn reduce_min(self) -> f32;
    unsafe fn reduce_max(self) -> f32;
}

/// An elementwise operation with two operands
pub(crate) trait BinaryOp {
    /// The scalar formula every path must reproduce
    fn scalar(a: f32, b: f32) -> f32;

    unsafe fn lanes<L: Lanes>(a: L, b: L) -> L;
}

/// An elementwise operation with one operand
pub(crate) trait UnaryOp {
    fn scalar(a: f32) -> f32;

    unsafe fn lanes<L: Lanes>(a: L) -> L;
}

pub(crate) struct Add;
pub(crate) struct Sub;
pub(crate) struct Mul;
pub(crate) struct Div;
pub(crate) struct Min;
pub(crate) struct Max;
pub(crate) struct Abs;

impl BinaryOp for Add {
    #[inline(always)]
    fn scalar(a: f32, b: f32) -> f32 {
        a + b
    }

    #[inline(always)]
    unsafe fn lanes<L: Lanes>(a: L, b: L) -> L {
        L::add(a, b)
    }
}

impl BinaryOp for Sub {
    #[inline(always)]
    fn scalar(a: f32, b: f32) -> f32 {
        a - b
    }

    #[inline(always)]
    unsafe fn lanes<L: Lanes>(a: L, b: L) -> L {
        L::sub(a, b)
    }
}

impl BinaryOp for Mul {
    #[inline(always)]
    fn scalar(a: f32, b: f32) -> f32 {
        a * b
    }

    #[inline(always)]
    unsafe fn lanes<L: Lanes>(a: L, b: L) -> L {
        L::mul(a, b)
    }
}

impl BinaryOp for Div {
    #[inline(always)]
    fn scalar(a: f32, b: f32) -> f32 {
        a / b
    }

    #[inline(always)]
    unsafe fn lanes<L: Lanes>(a: L, b: L) -> L {
        L::div(a, b)
    }
}

impl BinaryOp for Min {
    // Matches minps: the second operand wins on NaN and on -0.0 == 0.0.
    #[inline(always)]
    fn scalar(a: f32, b: f32) -> f32 {
        if a < b { a } else { b }
    }

    #[inline(always)]
    unsafe fn lanes<L: Lanes>(a: L, b: L) -> L {
        L::min(a, b)
    }
}

impl BinaryOp for Max {
    #[inline(always)]
    fn scalar(a: f32, b: f32) -> f32 {
        if a > b { a } else { b }
    }

    #[inline(always)]
    unsafe fn lanes<L: Lanes>(a: L, b: L) -> L {
        L::max(a, b)
    }
}

impl UnaryOp for Abs {
    #[inline(always)]
    fn scalar(a: f32) -> f32 {
        f32::from_bits(a.to_bits() & 0x7fff_ffff)
    }

    #[inline(always)]
    unsafe fn lanes<L: Lanes>(a: L) -> L {
        L::abs(a)
    }
}

/// `out[i] = O(a[i], b[i])` for `i < n`. `out` may equal `a`.
///
/// # Safety
/// `a`, `b` and `out` must be valid for `n` elements and the instruction set
/// behind `L` must be enabled in the calling context.
#[inline(always)]
pub(crate) unsafe fn binary<L: Lanes, O: BinaryOp>(
    a: *const f32,
    b: *const f32,
    out: *mut f32,
    n: usize,
) {
    let remainder = n % L::WIDTH;
    let length = n - remainder;

    let mut i = 0;
    while i < length {
        let x = L::load(a.add(i));
        let y = L::load(b.add(i));
        O::lanes(x, y).store(out.add(i));
        i += L::WIDTH;
    }

    for i in length..n {
        *out.add(i) = O::scalar(*a.add(i), *b.add(i));
    }
}

/// `out[i] = O(a[i], s)` for `i < n`. `out` may equal `a`.
///
/// # Safety
/// Same as [`binary`].
#[inline(always)]
pub(crate) unsafe fn binary_scalar<L: Lanes, O: BinaryOp>(
    a: *const f32,
    s: f32,
    out: *mut f32,
    n: usize,
) {
    let remainder = n % L::WIDTH;
    let length = n - remainder;
    let y = L::splat(s);

    let mut i = 0;
    while i < length {
        let x = L::load(a.add(i));
        O::lanes(x, y).store(out.add(i));
        i += L::WIDTH;
    }

    for i in length..n {
        *out.add(i) = O::scalar(*a.add(i), s);
    }
}

/// `out[i] = O(a[i])` for `i < n`. `out` may equal `a`.
///
/// # Safety
/// Same as [`binary`].
#[inline(always)]
pub(crate) unsafe fn unary<L: Lanes, O: UnaryOp>(a: *const f32, out: *mut f32, n: usize) {
    let remainder = n % L::WIDTH;
    let length = n - remainder;

    let mut i = 0;
    while i < length {
        O::lanes(L::load(a.add(i))).store(out.add(i));
        i += L::WIDTH;
    }

    for i in length..n {
        *out.add(i) = O::scalar(*a.add(i));
    }
}

/// Sum of `a[..n]`.
///
/// Lane-major accumulation over the vector prefix, one pairwise fold, then
/// the remainder added left to right.
///
/// # Safety
/// Same as [`binary`].
#[inline(always)]
pub(crate) unsafe fn sum<L: Lanes>(a: *const f32, n: usize) -> f32 {
    let remainder = n % L::WIDTH;
    let length = n - remainder;

    let mut acc = L::zero();
    let mut i = 0;
    while i < length {
        acc = acc.add(L::load(a.add(i)));
        i += L::WIDTH;
    }

    let mut total = acc.reduce_sum();
    for i in length..n {
        total += *a.add(i);
    }
    total
}

/// Rotate four points about `(ox, oy)` and return `[min_x, min_y, max_x, max_y]`.
///
/// `x' = cos * dx - sin * dy`, `y' = cos * dy + sin * dx` with `d = p - o`.
///
/// # Safety
/// The instruction set behind `Q` must be enabled in the calling context.
#[inline(always)]
pub(crate) unsafe fn rotated_bounds<Q: Quad>(
    xs: [f32; 4],
    ys: [f32; 4],
    cos: f32,
    sin: f32,
    ox: f32,
    oy: f32,
) -> [f32; 4] {
    let origin_x = Q::splat(ox);
    let origin_y = Q::splat(oy);
    let c = Q::splat(cos);
    let s = Q::splat(sin);

    let dx = Q::from_array(xs).sub(origin_x);
    let dy = Q::from_array(ys).sub(origin_y);

    let rx = c.mul_sub(dx, s.mul(dy)).add(origin_x);
    let ry = c.mul_add(dy, s.mul(dx)).add(origin_y);

    [rx.reduce_min(), ry.reduce_min(), rx.reduce_max(), ry.reduce_max()]
}
