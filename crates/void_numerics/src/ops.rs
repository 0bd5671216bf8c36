//! Free functions over the process-wide [`Dispatcher`]
//!
//! ```ignore
//! use void_numerics::ops;
//!
//! let mut a = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! let b = vec![0.5; 5];
//!
//! ops::mul(&mut a, &b)?;
//! assert_eq!(ops::sum(&a), 7.5);
//! ```

use crate::dispatch::Dispatcher;
use crate::error::Result;

macro_rules! global_binary_ops {
    ($( $name:ident, $name_to:ident, $name_scalar:ident, $name_scalar_to:ident; )*) => {
        $(
            #[doc = concat!("See [`Dispatcher::", stringify!($name), "`].")]
            #[inline]
            pub fn $name(a: &mut [f32], b: &[f32]) -> Result<()> {
                Dispatcher::global().$name(a, b)
            }

            #[doc = concat!("See [`Dispatcher::", stringify!($name_to), "`].")]
            #[inline]
            pub fn $name_to(a: &[f32], b: &[f32], out: &mut [f32]) -> Result<()> {
                Dispatcher::global().$name_to(a, b, out)
            }

            #[doc = concat!("See [`Dispatcher::", stringify!($name_scalar), "`].")]
            #[inline]
            pub fn $name_scalar(a: &mut [f32], b: f32) {
                Dispatcher::global().$name_scalar(a, b)
            }

            #[doc = concat!("See [`Dispatcher::", stringify!($name_scalar_to), "`].")]
            #[inline]
            pub fn $name_scalar_to(a: &[f32], b: f32, out: &mut [f32]) -> Result<()> {
                Dispatcher::global().$name_scalar_to(a, b, out)
            }
        )*
    };
}

global_binary_ops! {
    add, add_to, add_scalar, add_scalar_to;
    sub, sub_to, sub_scalar, sub_scalar_to;
    mul, mul_to, mul_scalar, mul_scalar_to;
    div, div_to, div_scalar, div_scalar_to;
    min, min_to, min_scalar, min_scalar_to;
    max, max_to, max_scalar, max_scalar_to;
}

/// See [`Dispatcher::abs`].
#[inline]
pub fn abs(a: &mut [f32]) {
    Dispatcher::global().abs(a)
}

/// See [`Dispatcher::abs_to`].
#[inline]
pub fn abs_to(a: &[f32], out: &mut [f32]) -> Result<()> {
    Dispatcher::global().abs_to(a, out)
}

/// See [`Dispatcher::sum`].
#[inline]
pub fn sum(a: &[f32]) -> f32 {
    Dispatcher::global().sum(a)
}
