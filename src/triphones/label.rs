use std::fmt::{Display, Formatter};

use crate::triphones::{Result, TriphoneError};

/// Labels HVite emits for silence, short pause and empty slots. Never modelled.
pub const SENTINEL_LABELS: [&str; 3] = ["", "sil", "sp"];

pub fn is_sentinel(label: &str) -> bool {
    SENTINEL_LABELS.contains(&label)
}

/// A triphone split into its left context, centre phone and right context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhoneTriplet<'a> {
    pub left: &'a str,
    pub center: &'a str,
    pub right: &'a str,
}

impl<'a> PhoneTriplet<'a> {
    /// Splits an `L-C+R` label on `-` and `+`.
    pub fn parse(label: &'a str) -> Result<Self> {
        let components = label.split(['-', '+']).count();
        let structural = |message: String| TriphoneError::Structural {
            label: label.to_string(),
            message,
        };
        if components != 3 {
            return Err(structural(format!(
                "expected 3 components, found {components}"
            )));
        }
        // Three components can still have the markers swapped or repeated, e.g. `a+b-c`.
        let (left, rest) = label
            .split_once('-')
            .ok_or_else(|| structural("missing left context marker".to_string()))?;
        let (center, right) = rest
            .split_once('+')
            .ok_or_else(|| structural("missing right context marker".to_string()))?;
        if left.is_empty() || center.is_empty() || right.is_empty() {
            return Err(structural("empty phone component".to_string()));
        }
        Ok(Self {
            left,
            center,
            right,
        })
    }
}

impl Display for PhoneTriplet<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}+{}", self.left, self.center, self.right)
    }
}
