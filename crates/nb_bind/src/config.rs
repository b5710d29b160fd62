// -----------------------------------------------------------------------------
// UnknownKeys

/// What the decoder does with an object key that matches no field of a
/// non-hybrid POJO.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownKeys {
    /// Discard the value without decoding it.
    #[default]
    Skip,
    /// Fail with [`BindError::UnknownKey`](crate::BindError::UnknownKey).
    Reject,
}

// -----------------------------------------------------------------------------
// BindConfig

/// Options for one decode or encode call.
///
/// The value is handed to the drivers explicitly and read-only during the
/// traversal, so concurrent calls with different settings never interfere.
///
/// # Examples
///
/// ```
/// use nb_bind::{BindConfig, UnknownKeys};
///
/// let config = BindConfig::new()
///     .with_path_tracking(false)
///     .with_unknown_keys(UnknownKeys::Reject);
///
/// assert!(!config.path_tracking);
/// assert_eq!(BindConfig::default().unknown_keys, UnknownKeys::Skip);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindConfig {
    /// Record the location of every nested step so errors can render it.
    ///
    /// When `false`, no path segment is ever created.
    pub path_tracking: bool,
    pub unknown_keys: UnknownKeys,
}

impl BindConfig {
    pub const fn new() -> Self {
        Self {
            path_tracking: true,
            unknown_keys: UnknownKeys::Skip,
        }
    }

    #[inline]
    pub const fn with_path_tracking(mut self, enabled: bool) -> Self {
        self.path_tracking = enabled;
        self
    }

    #[inline]
    pub const fn with_unknown_keys(mut self, policy: UnknownKeys) -> Self {
        self.unknown_keys = policy;
        self
    }
}

impl Default for BindConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
