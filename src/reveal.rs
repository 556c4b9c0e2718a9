#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealStyle {
    pub opacity: &'static str,
    pub transform: &'static str,
}

pub const HIDDEN: RevealStyle = RevealStyle {
    opacity: "0",
    transform: "translateY(30px)",
};

pub const SETTLED: RevealStyle = RevealStyle {
    opacity: "1",
    transform: "translateY(0)",
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Reveal {
    #[default]
    Hidden,
    Revealed,
}

impl Reveal {
    pub fn style(self) -> RevealStyle {
        match self {
            Self::Hidden => HIDDEN,
            Self::Revealed => SETTLED,
        }
    }

    /// Feeds one intersection report. Returns the style to apply only on the
    /// first transition into view; the caller stops observing after that.
    pub fn observe(&mut self, is_intersecting: bool) -> Option<RevealStyle> {
        if *self == Self::Revealed || !is_intersecting {
            return None;
        }

        *self = Self::Revealed;
        Some(SETTLED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveals_once_and_never_reverts() {
        let mut block = Reveal::default();
        assert_eq!(block.style().opacity, "0");

        assert_eq!(block.observe(false), None);
        assert_eq!(block.observe(true).map(|style| style.opacity), Some("1"));
        assert_eq!(block.observe(false), None);
        assert_eq!(block.observe(true), None);
        assert_eq!(block.style().opacity, "1");
    }
}
