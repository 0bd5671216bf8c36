//! Runtime SIMD capability detection
//!
//! The hardware probe runs once per process. Its result is masked by
//! [`NumericsConfig`] so that 256-bit execution only happens on hosts that both
//! support it and explicitly opt in; a fleet of mixed hardware otherwise sees
//! the same 128-bit results everywhere.

use std::fmt;
use std::sync::OnceLock;

use crate::config::NumericsConfig;

static GLOBAL: OnceLock<Capabilities> = OnceLock::new();

/// Instruction set a kernel table runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimdLevel {
    /// One element at a time
    Scalar,
    /// SSE/SSE2, 4 lanes
    Sse,
    /// ARM NEON, 4 lanes
    Neon,
    /// AVX, 8 lanes
    Avx,
}

impl SimdLevel {
    /// Number of f32 lanes processed per instruction
    #[inline]
    pub const fn lanes(self) -> usize {
        match self {
            SimdLevel::Scalar => 1,
            SimdLevel::Sse | SimdLevel::Neon => 4,
            SimdLevel::Avx => 8,
        }
    }

    /// Register width in bits (scalar counts as one f32)
    #[inline]
    pub const fn bits(self) -> usize {
        self.lanes() * 32
    }
}

impl fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimdLevel::Scalar => write!(f, "Scalar"),
            SimdLevel::Sse => write!(f, "SSE"),
            SimdLevel::Neon => write!(f, "NEON"),
            SimdLevel::Avx => write!(f, "AVX"),
        }
    }
}

/// Raw instruction-set support reported by the CPU
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HardwareFeatures {
    pub sse: bool,
    pub sse2: bool,
    pub avx: bool,
    pub fma: bool,
    pub neon: bool,
}

impl HardwareFeatures {
    /// Probe the running CPU
    pub fn probe() -> Self {
        #[allow(unused_mut)]
        let mut features = Self::default();

        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            features.sse = std::arch::is_x86_feature_detected!("sse");
            features.sse2 = std::arch::is_x86_feature_detected!("sse2");
            features.avx = std::arch::is_x86_feature_detected!("avx");
            features.fma = std::arch::is_x86_feature_detected!("fma");
        }

        #[cfg(target_arch = "aarch64")]
        {
            features.neon = std::arch::is_aarch64_feature_detected!("neon");
            // NEON on aarch64 always has fused multiply-add
            features.fma = features.neon;
        }

        features
    }
}

/// Which vector paths kernels may take in this process
///
/// Only obtainable through detection, so a value never claims an instruction
/// set the CPU lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    hardware: HardwareFeatures,
    narrow: Option<SimdLevel>,
    wide: bool,
    fused: bool,
}

impl Capabilities {
    /// Probe the hardware and apply `config`
    pub fn detect(config: &NumericsConfig) -> Self {
        Self::from_parts(HardwareFeatures::probe(), config)
    }

    /// Scalar only, regardless of hardware
    pub fn scalar() -> Self {
        Self::from_parts(HardwareFeatures::default(), &NumericsConfig::scalar())
    }

    /// Process-wide capabilities, detected from the environment on first use
    pub fn global() -> &'static Capabilities {
        GLOBAL.get_or_init(|| {
            let config = NumericsConfig::from_env();
            let caps = Self::detect(&config);
            log::info!(
                "Numerics kernels: 128-bit {}, 256-bit {} (hardware avx: {}, opt-in: {})",
                caps.narrow.map_or_else(|| "disabled".to_string(), |l| l.to_string()),
                if caps.wide { "enabled" } else { "disabled" },
                caps.hardware.avx,
                config.allows_avx(),
            );
            caps
        })
    }

    fn from_parts(hardware: HardwareFeatures, config: &NumericsConfig) -> Self {
        let narrow = if !config.enabled {
            None
        } else if hardware.sse && hardware.sse2 {
            Some(SimdLevel::Sse)
        } else if hardware.neon {
            Some(SimdLevel::Neon)
        } else {
            None
        };

        let wide = narrow == Some(SimdLevel::Sse) && hardware.avx && config.allows_avx();
        let fused = narrow.is_some() && hardware.fma;

        Self {
            hardware,
            narrow,
            wide,
            fused,
        }
    }

    /// The capability flag: 256-bit kernels are both supported and opted into
    #[inline]
    pub fn avx_enabled(&self) -> bool {
        self.wide
    }

    /// Any vector path is available
    #[inline]
    pub fn simd_enabled(&self) -> bool {
        self.narrow.is_some()
    }

    /// The 128-bit instruction set in use, if any
    #[inline]
    pub fn narrow_level(&self) -> Option<SimdLevel> {
        self.narrow
    }

    /// 4-lane transforms may use fused multiply-add
    #[inline]
    pub fn fma_enabled(&self) -> bool {
        self.fused
    }

    /// What the CPU reported, before configuration was applied
    #[inline]
    pub fn hardware(&self) -> HardwareFeatures {
        self.hardware
    }

    /// The widest level calls of sufficient length will run on
    pub fn best_level(&self) -> SimdLevel {
        if self.wide {
            SimdLevel::Avx
        } else {
            self.narrow.unwrap_or(SimdLevel::Scalar)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X86_AVX: HardwareFeatures = HardwareFeatures {
        sse: true,
        sse2: true,
        avx: true,
        fma: true,
        neon: false,
    };

    const X86_SSE_ONLY: HardwareFeatures = HardwareFeatures {
        sse: true,
        sse2: true,
        avx: false,
        fma: false,
        neon: false,
    };

    const ARM: HardwareFeatures = HardwareFeatures {
        sse: false,
        sse2: false,
        avx: false,
        fma: true,
        neon: true,
    };

    #[test]
    fn test_avx_requires_opt_in() {
        let caps = Capabilities::from_parts(X86_AVX, &NumericsConfig::default());
        assert!(!caps.avx_enabled());
        assert_eq!(caps.best_level(), SimdLevel::Sse);

        let caps = Capabilities::from_parts(X86_AVX, &NumericsConfig::widest());
        assert!(caps.avx_enabled());
        assert_eq!(caps.best_level(), SimdLevel::Avx);
        assert!(caps.fma_enabled());
    }

    #[test]
    fn test_avx_requires_hardware() {
        let caps = Capabilities::from_parts(X86_SSE_ONLY, &NumericsConfig::widest());
        assert!(!caps.avx_enabled());
        assert!(!caps.fma_enabled());
        assert_eq!(caps.narrow_level(), Some(SimdLevel::Sse));
    }

    #[test]
    fn test_disabled_config() {
        let caps = Capabilities::from_parts(X86_AVX, &NumericsConfig::scalar());
        assert!(!caps.simd_enabled());
        assert!(!caps.avx_enabled());
        assert!(!caps.fma_enabled());
        assert_eq!(caps.best_level(), SimdLevel::Scalar);
    }

    #[test]
    fn test_neon_never_wide() {
        let caps = Capabilities::from_parts(ARM, &NumericsConfig::widest());
        assert_eq!(caps.narrow_level(), Some(SimdLevel::Neon));
        assert!(!caps.avx_enabled());
        assert!(caps.fma_enabled());
    }

    #[test]
    fn test_scalar_capabilities() {
        let caps = Capabilities::scalar();
        assert_eq!(caps.best_level(), SimdLevel::Scalar);
        assert_eq!(caps.hardware(), HardwareFeatures::default());
    }

    #[test]
    fn test_detect_respects_config() {
        let caps = Capabilities::detect(&NumericsConfig::scalar());
        assert!(!caps.simd_enabled());

        let caps = Capabilities::detect(&NumericsConfig::default());
        assert!(!caps.avx_enabled());
    }

    #[test]
    fn test_level_lanes() {
        assert_eq!(SimdLevel::Scalar.lanes(), 1);
        assert_eq!(SimdLevel::Sse.lanes(), 4);
        assert_eq!(SimdLevel::Neon.bits(), 128);
        assert_eq!(SimdLevel::Avx.bits(), 256);
        assert_eq!(SimdLevel::Avx.to_string(), "AVX");
    }
}
