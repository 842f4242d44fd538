// Copyright 2025 the AMChart Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::format;
use alloc::string::String;

/// Number of fractional digits shown on axis value labels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DecimalPlaces {
    /// `"%.0f"`: `200`.
    #[default]
    Zero,
    /// `"%.1f"`: `200.0`.
    One,
    /// `"%.2f"`: `200.00`.
    Two,
}

impl DecimalPlaces {
    /// Digit count after the decimal point.
    pub const fn digits(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
        }
    }

    /// Formats `value` as fixed-point text.
    pub fn format(self, value: f64) -> String {
        let text = format!("{value:.prec$}", prec = self.digits());
        // `-0` is not a useful tick label.
        if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
            return String::from(&text[1..]);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_fixed_point() {
        assert_eq!(DecimalPlaces::Zero.format(200.0), "200");
        assert_eq!(DecimalPlaces::One.format(0.5), "0.5");
        assert_eq!(DecimalPlaces::Two.format(1.0), "1.00");
        assert_eq!(DecimalPlaces::Zero.format(1.4), "1");
    }

    #[test]
    fn negative_zero_drops_sign() {
        assert_eq!(DecimalPlaces::Zero.format(-0.2), "0");
        assert_eq!(DecimalPlaces::One.format(-0.01), "0.0");
        assert_eq!(DecimalPlaces::One.format(-2.5), "-2.5");
    }
}
