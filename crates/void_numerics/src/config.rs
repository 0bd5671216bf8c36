//! Numerics configuration
//!
//! Two process-wide toggles decide which vector paths may run:
//!
//! - `VOID_NUMERICS_DISABLED=true` forces every kernel onto the scalar path.
//! - `VOID_NUMERICS_AVX=true` opts into the 256-bit path on hardware that has it.
//!
//! Both are read once when the global capabilities are first needed. Absent or
//! unparseable values mean `false`.

/// Environment variable that disables all SIMD paths when `true`
pub const DISABLED_ENV_VAR: &str = "VOID_NUMERICS_DISABLED";

/// Environment variable that opts into 256-bit execution when `true`
pub const AVX_ENV_VAR: &str = "VOID_NUMERICS_AVX";

/// Which vector paths the kernels are allowed to use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NumericsConfig {
    /// Allow any SIMD path (128-bit or wider)
    pub enabled: bool,

    /// Allow the 256-bit path. Ignored when `enabled` is false.
    pub avx_enabled: bool,
}

impl Default for NumericsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            avx_enabled: false,
        }
    }
}

impl NumericsConfig {
    /// Scalar kernels only
    pub fn scalar() -> Self {
        Self {
            enabled: false,
            avx_enabled: false,
        }
    }

    /// Every path the hardware supports, 256-bit included
    pub fn widest() -> Self {
        Self {
            enabled: true,
            avx_enabled: true,
        }
    }

    /// Read the toggles from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read the toggles through `lookup`, which maps a variable name to its value
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let disabled = parse_flag(DISABLED_ENV_VAR, lookup(DISABLED_ENV_VAR).as_deref());
        let avx = parse_flag(AVX_ENV_VAR, lookup(AVX_ENV_VAR).as_deref());

        Self {
            enabled: !disabled,
            avx_enabled: !disabled && avx,
        }
    }

    /// Whether the 256-bit path is permitted by configuration alone
    #[inline]
    pub fn allows_avx(&self) -> bool {
        self.enabled && self.avx_enabled
    }
}

/// `true` (any ASCII case, surrounding whitespace ignored) is the only value that sets a flag.
fn parse_flag(key: &str, value: Option<&str>) -> bool {
    let Some(raw) = value else {
        return false;
    };

    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        true
    } else {
        if !trimmed.eq_ignore_ascii_case("false") {
            log::debug!("Ignoring {}={:?}: expected true or false", key, raw);
        }
        false
    }
}
