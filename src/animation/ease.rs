/// Easing functions used to shape normalized animation progress.
///
/// Every variant maps `[0, 1]` onto `[0, 1]` with `apply(0) == 0` and `apply(1) == 1`, and is
/// monotonic non-decreasing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Ease {
    /// `t`.
    Linear,
    /// `1 - (1 - t)^2`.
    OutQuad,
    /// `1 - (1 - t)^3`; fast start, gentle landing.
    #[default]
    OutCubic,
}

impl Ease {
    /// Apply this easing function to normalized progress `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }

    /// Resolve a named easing. Unknown names fall back to [`Ease::OutCubic`].
    pub fn from_name(name: &str) -> Self {
        match Self::lookup(name) {
            Some(ease) => ease,
            None => {
                tracing::debug!(name, "unknown easing, falling back to cubic-out");
                Self::OutCubic
            }
        }
    }

    /// Strict lookup; `None` for unknown names.
    pub fn lookup(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "linear" => Some(Self::Linear),
            "quad" | "quadratic-out" | "out-quad" => Some(Self::OutQuad),
            "cubic" | "cubic-out" | "out-cubic" => Some(Self::OutCubic),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::OutQuad => "quadratic-out",
            Self::OutCubic => "cubic-out",
        }
    }

    pub const ALL: [Self; 3] = [Self::Linear, Self::OutQuad, Self::OutCubic];
}

impl From<String> for Ease {
    fn from(value: String) -> Self {
        Self::from_name(&value)
    }
}

impl From<Ease> for String {
    fn from(value: Ease) -> Self {
        value.name().to_owned()
    }
}

impl std::fmt::Display for Ease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
