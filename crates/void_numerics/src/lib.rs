//! # void_numerics - SIMD-Dispatched Buffer Kernels
//!
//! Elementwise arithmetic over `f32` buffers and the rotated-box bounding
//! transform, each with AVX, SSE/NEON and scalar implementations.
//!
//! ```text
//! NumericsConfig ──► Capabilities ──► Dispatcher ──► KernelTable (AVX | SSE/NEON | scalar)
//!   (env, once)      (probe, once)     (per call:       │
//!                                       by length)      ├─ add/sub/mul/div/min/max/abs
//!                                                       ├─ sum (lane fold)
//!                                                       └─ Box2Rotated bounds
//! ```
//!
//! Every path produces the same bits for elementwise operations. Set
//! `VOID_NUMERICS_AVX=true` to allow 256-bit kernels on hardware that has
//! them, or `VOID_NUMERICS_DISABLED=true` to force scalar code.
//!
//! # Example
//!
//! ```ignore
//! use void_numerics::prelude::*;
//!
//! let mut positions = vec![0.0f32; 1024];
//! let velocities = vec![1.5f32; 1024];
//!
//! ops::add(&mut positions, &velocities)?;
//!
//! let rotated = Box2Rotated::about_center(Box2::new(0.0, 0.0, 4.0, 2.0), consts::FRAC_PI_2);
//! let aabb = rotated.calc_bounding_box();
//! ```

pub mod capability;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod ops;

mod kernel;

pub use capability::*;
pub use config::*;
pub use dispatch::*;
pub use error::*;
pub use geometry::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const FRAC_PI_2: f32 = PI / 2.0;
    pub const FRAC_PI_4: f32 = PI / 4.0;
}

pub mod prelude {
    pub use crate::capability::{Capabilities, HardwareFeatures, SimdLevel};
    pub use crate::config::NumericsConfig;
    pub use crate::consts;
    pub use crate::dispatch::{Dispatcher, KernelTable};
    pub use crate::error::{NumericsError, Result};
    pub use crate::geometry::{Box2, Box2Rotated, Vec2};
    pub use crate::ops;
}
