//! Kernel dispatch
//!
//! A [`Dispatcher`] resolves function pointers for every kernel once, from a
//! [`Capabilities`] value, and keeps up to three tables: 256-bit, 128-bit and
//! scalar. Each call only picks a table by buffer length; nothing is probed
//! per call.
//!
//! ```text
//! n >= 8 && avx enabled  -> AVX table
//! n >= 4 && simd enabled -> SSE / NEON table
//! otherwise              -> scalar table
//! ```

use std::sync::OnceLock;

use crate::capability::{Capabilities, SimdLevel};
use crate::error::{check_len, Result};
use crate::kernel::{scalar, Abs, Add, Div, Max, Min, Mul, Sub};

static GLOBAL: OnceLock<Dispatcher> = OnceLock::new();

type BinaryFn = unsafe fn(*const f32, *const f32, *mut f32, usize);
type BinaryScalarFn = unsafe fn(*const f32, f32, *mut f32, usize);
type UnaryFn = unsafe fn(*const f32, *mut f32, usize);
type SumFn = unsafe fn(*const f32, usize) -> f32;
type BoundsFn = unsafe fn([f32; 4], [f32; 4], f32, f32, f32, f32) -> [f32; 4];

/// Entry points for one instruction set
#[derive(Clone, Copy)]
pub struct KernelTable {
    level: SimdLevel,
    add: BinaryFn,
    sub: BinaryFn,
    mul: BinaryFn,
    div: BinaryFn,
    min: BinaryFn,
    max: BinaryFn,
    add_scalar: BinaryScalarFn,
    sub_scalar: BinaryScalarFn,
    mul_scalar: BinaryScalarFn,
    div_scalar: BinaryScalarFn,
    min_scalar: BinaryScalarFn,
    max_scalar: BinaryScalarFn,
    abs: UnaryFn,
    sum: SumFn,
}

macro_rules! kernel_table {
    ($level:expr, $isa:ident) => {
        KernelTable {
            level: $level,
            add: $isa::binary::<Add>,
            sub: $isa::binary::<Sub>,
            mul: $isa::binary::<Mul>,
            div: $isa::binary::<Div>,
            min: $isa::binary::<Min>,
            max: $isa::binary::<Max>,
            add_scalar: $isa::binary_scalar::<Add>,
            sub_scalar: $isa::binary_scalar::<Sub>,
            mul_scalar: $isa::binary_scalar::<Mul>,
            div_scalar: $isa::binary_scalar::<Div>,
            min_scalar: $isa::binary_scalar::<Min>,
            max_scalar: $isa::binary_scalar::<Max>,
            abs: $isa::unary::<Abs>,
            sum: $isa::sum,
        }
    };
}

impl KernelTable {
    /// Instruction set these entry points run on
    #[inline]
    pub fn level(&self) -> SimdLevel {
        self.level
    }

    /// Lanes processed per vector instruction
    #[inline]
    pub fn lanes(&self) -> usize {
        self.level.lanes()
    }
}

impl std::fmt::Debug for KernelTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KernelTable").field("level", &self.level).finish()
    }
}

/// Per-process kernel selection
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    capabilities: Capabilities,
    wide: Option<KernelTable>,
    narrow: Option<KernelTable>,
    scalar: KernelTable,
    bounds: BoundsFn,
    bounds_level: SimdLevel,
}

macro_rules! binary_ops {
    ($( $name:ident, $name_to:ident, $name_scalar:ident, $name_scalar_to:ident, $field:ident, $field_scalar:ident, $doc:literal; )*) => {
        $(
            #[doc = concat!("`a[i] = ", $doc, "` in place.")]
            pub fn $name(&self, a: &mut [f32], b: &[f32]) -> Result<()> {
                check_len(stringify!($name), a.len(), b.len())?;
                let n = a.len();
                let ptr = a.as_mut_ptr();
                // SAFETY: both buffers hold n elements; the kernel loads a lane batch before storing it.
                unsafe { (self.select(n).$field)(ptr, b.as_ptr(), ptr, n) }
                Ok(())
            }

            #[doc = concat!("`out[i] = ", $doc, "`.")]
            pub fn $name_to(&self, a: &[f32], b: &[f32], out: &mut [f32]) -> Result<()> {
                check_len(stringify!($name_to), a.len(), b.len())?;
                check_len(stringify!($name_to), a.len(), out.len())?;
                let n = a.len();
                // SAFETY: all three buffers hold n elements.
                unsafe { (self.select(n).$field)(a.as_ptr(), b.as_ptr(), out.as_mut_ptr(), n) }
                Ok(())
            }

            #[doc = concat!("`a[i] = ", $doc, "` with `b` broadcast, in place.")]
            pub fn $name_scalar(&self, a: &mut [f32], b: f32) {
                let n = a.len();
                let ptr = a.as_mut_ptr();
                // SAFETY: the buffer holds n elements.
                unsafe { (self.select(n).$field_scalar)(ptr, b, ptr, n) }
            }

            #[doc = concat!("`out[i] = ", $doc, "` with `b` broadcast.")]
            pub fn $name_scalar_to(&self, a: &[f32], b: f32, out: &mut [f32]) -> Result<()> {
                check_len(stringify!($name_scalar_to), a.len(), out.len())?;
                let n = a.len();
                // SAFETY: both buffers hold n elements.
                unsafe { (self.select(n).$field_scalar)(a.as_ptr(), b, out.as_mut_ptr(), n) }
                Ok(())
            }
        )*
    };
}

impl Dispatcher {
    /// Resolve every kernel for `capabilities`
    pub fn new(capabilities: Capabilities) -> Self {
        #[allow(unused_mut)]
        let mut dispatcher = Self {
            capabilities,
            wide: None,
            narrow: None,
            scalar: kernel_table!(SimdLevel::Scalar, scalar),
            bounds: scalar::rotated_bounds,
            bounds_level: SimdLevel::Scalar,
        };

        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            use crate::kernel::{avx, sse};

            if capabilities.narrow_level() == Some(SimdLevel::Sse) {
                dispatcher.narrow = Some(kernel_table!(SimdLevel::Sse, sse));
                dispatcher.bounds = if capabilities.fma_enabled() {
                    sse::rotated_bounds_fused as BoundsFn
                } else {
                    sse::rotated_bounds as BoundsFn
                };
                dispatcher.bounds_level = SimdLevel::Sse;
            }
            if capabilities.avx_enabled() {
                dispatcher.wide = Some(kernel_table!(SimdLevel::Avx, avx));
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            use crate::kernel::neon;

            if capabilities.narrow_level() == Some(SimdLevel::Neon) {
                dispatcher.narrow = Some(kernel_table!(SimdLevel::Neon, neon));
                dispatcher.bounds = neon::rotated_bounds;
                dispatcher.bounds_level = SimdLevel::Neon;
            }
        }

        dispatcher
    }

    /// Scalar kernels only
    pub fn scalar() -> Self {
        Self::new(Capabilities::scalar())
    }

    /// The process-wide dispatcher over [`Capabilities::global`]
    pub fn global() -> &'static Dispatcher {
        GLOBAL.get_or_init(|| Self::new(*Capabilities::global()))
    }

    /// Capabilities this dispatcher was built from
    #[inline]
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// The table a call over `n` elements runs on
    #[inline]
    pub fn select(&self, n: usize) -> &KernelTable {
        if let Some(wide) = &self.wide {
            if n >= wide.lanes() {
                return wide;
            }
        }
        if let Some(narrow) = &self.narrow {
            if n >= narrow.lanes() {
                return narrow;
            }
        }
        &self.scalar
    }

    /// Instruction set used by the 4-corner box transform
    #[inline]
    pub fn bounds_level(&self) -> SimdLevel {
        self.bounds_level
    }

    binary_ops! {
        add, add_to, add_scalar, add_scalar_to, add, add_scalar, "a[i] + b[i]";
        sub, sub_to, sub_scalar, sub_scalar_to, sub, sub_scalar, "a[i] - b[i]";
        mul, mul_to, mul_scalar, mul_scalar_to, mul, mul_scalar, "a[i] * b[i]";
        div, div_to, div_scalar, div_scalar_to, div, div_scalar, "a[i] / b[i]";
        min, min_to, min_scalar, min_scalar_to, min, min_scalar, "min(a[i], b[i])";
        max, max_to, max_scalar, max_scalar_to, max, max_scalar, "max(a[i], b[i])";
    }

    /// `a[i] = |a[i]|` in place, clearing the sign bit (`-0.0` becomes `0.0`).
    pub fn abs(&self, a: &mut [f32]) {
        let n = a.len();
        let ptr = a.as_mut_ptr();
        // SAFETY: the buffer holds n elements.
        unsafe { (self.select(n).abs)(ptr, ptr, n) }
    }

    /// `out[i] = |a[i]|`.
    pub fn abs_to(&self, a: &[f32], out: &mut [f32]) -> Result<()> {
        check_len("abs_to", a.len(), out.len())?;
        let n = a.len();
        // SAFETY: both buffers hold n elements.
        unsafe { (self.select(n).abs)(a.as_ptr(), out.as_mut_ptr(), n) }
        Ok(())
    }

    /// Sum of every element.
    ///
    /// Vector paths accumulate per lane and fold once, so the result may
    /// differ from a left-to-right sum in the last bits, and differs between
    /// the 128-bit and 256-bit paths. Pin [`NumericsConfig`](crate::NumericsConfig)
    /// where bit-exact agreement across machines matters.
    pub fn sum(&self, a: &[f32]) -> f32 {
        // SAFETY: the buffer holds a.len() elements.
        unsafe { (self.select(a.len()).sum)(a.as_ptr(), a.len()) }
    }

    /// Rotate four corners about `origin` and return `[left, bottom, right, top]`.
    pub(crate) fn rotated_bounds(
        &self,
        xs: [f32; 4],
        ys: [f32; 4],
        cos: f32,
        sin: f32,
        origin: (f32, f32),
    ) -> [f32; 4] {
        // SAFETY: `bounds` was resolved for an instruction set the CPU supports.
        unsafe { (self.bounds)(xs, ys, cos, sin, origin.0, origin.1) }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        *Self::global()
    }
}
