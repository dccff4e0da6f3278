use std::fmt;

/// Whether out-of-range results clamp to the destination's limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Saturation {
    None,
    Saturating,
}

/// Floating point rounding applied by a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RoundingMode {
    /// Whatever the conversion does by default; carries no name suffix.
    Default,
    /// Round to nearest even.
    Rte,
    /// Round toward zero.
    Rtz,
    /// Round toward positive infinity.
    Rtp,
    /// Round toward negative infinity.
    Rtn,
}

impl Saturation {
    /// Enumeration order.
    pub const ALL: [Saturation; 2] = [Saturation::None, Saturation::Saturating];

    pub fn suffix(self) -> &'static str {
        match self {
            Saturation::None => "",
            Saturation::Saturating => "_sat",
        }
    }

    pub fn is_saturating(self) -> bool {
        self == Saturation::Saturating
    }
}

impl RoundingMode {
    /// Explicit modes in the order they are emitted, after the default pass.
    pub const EXPLICIT: [RoundingMode; 4] = [
        RoundingMode::Rtz,
        RoundingMode::Rte,
        RoundingMode::Rtp,
        RoundingMode::Rtn,
    ];

    /// Enumeration order: the default first, then [`RoundingMode::EXPLICIT`].
    pub const ALL: [RoundingMode; 5] = [
        RoundingMode::Default,
        RoundingMode::Rtz,
        RoundingMode::Rte,
        RoundingMode::Rtp,
        RoundingMode::Rtn,
    ];

    pub fn suffix(self) -> &'static str {
        match self {
            RoundingMode::Default => "",
            RoundingMode::Rte => "_rte",
            RoundingMode::Rtz => "_rtz",
            RoundingMode::Rtp => "_rtp",
            RoundingMode::Rtn => "_rtn",
        }
    }

    pub fn is_explicit(self) -> bool {
        self != RoundingMode::Default
    }
}

impl fmt::Display for Saturation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Saturation::None => write!(f, "non-saturating"),
            Saturation::Saturating => write!(f, "saturating"),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundingMode::Default => write!(f, "default rounding"),
            RoundingMode::Rte => write!(f, "round to nearest even"),
            RoundingMode::Rtz => write!(f, "round toward zero"),
            RoundingMode::Rtp => write!(f, "round toward +inf"),
            RoundingMode::Rtn => write!(f, "round toward -inf"),
        }
    }
}
