//! Terminal styling for listings and traces.
//!
//! Fields are named by what they mark, not by color, so listing and trace code
//! never pick raw escape codes.

/// Escape sequences per output role. Empty strings when styling is off.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    /// Section headers (`[labels]`, `[code]`).
    pub heading: &'static str,
    pub mnemonic: &'static str,
    /// Literal operands.
    pub literal: &'static str,
    /// Offsets, opcode bytes, annotations and trace sub-lines.
    pub muted: &'static str,
    /// Resolution failures shown inside a listing.
    pub error: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        heading: "\x1b[1m",
        mnemonic: "\x1b[34m",
        literal: "\x1b[32m",
        muted: "\x1b[2m",
        error: "\x1b[31m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        heading: "",
        mnemonic: "",
        literal: "",
        muted: "",
        error: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Colors;

    #[test]
    fn new_selects_palette() {
        assert_eq!(Colors::new(true), Colors::ON);
        assert_eq!(Colors::new(false), Colors::OFF);
        assert!(Colors::ON.is_enabled());
        assert!(!Colors::default().is_enabled());
    }

    #[test]
    fn roles_are_distinct_when_enabled() {
        let c = Colors::ON;
        let roles = [c.heading, c.mnemonic, c.literal, c.muted, c.error];
        for (i, a) in roles.iter().enumerate() {
            for b in &roles[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
