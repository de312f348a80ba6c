// Fixed-point display formatting for report values.

use num_format::{Locale, ToFormattedString};
use serde::Deserialize;

/// Largest fraction digit count that still round-trips through f64 formatting.
pub const MAX_FRACTION_DIGITS: usize = 15;

/// How a metric is rendered: exactly `fraction_digits` digits after the point,
/// optional thousands grouping with `,`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct NumberFormat {
    #[serde(default = "default_fraction_digits")]
    pub fraction_digits: usize,
    #[serde(default)]
    pub grouping_used: bool,
}

fn default_fraction_digits() -> usize {
    2
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self {
            fraction_digits: default_fraction_digits(),
            grouping_used: false,
        }
    }
}

impl NumberFormat {
    /// Response times are always shown as seconds with 4 digits.
    pub const RESPONSE_TIME: NumberFormat = NumberFormat {
        fraction_digits: 4,
        grouping_used: false,
    };

    pub const fn fixed(fraction_digits: usize) -> Self {
        Self {
            fraction_digits,
            grouping_used: false,
        }
    }

    pub const fn with_grouping(mut self, grouping_used: bool) -> Self {
        self.grouping_used = grouping_used;
        self
    }

    pub fn format(&self, value: f64) -> String {
        let rendered = format!("{:.*}", self.fraction_digits, value);
        let (negative, digits) = match rendered.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, rendered.as_str()),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits, None),
        };

        // "-0.00" after rounding is zero
        let is_zero = int_part.bytes().all(|b| b == b'0')
            && frac_part.is_none_or(|f| f.bytes().all(|b| b == b'0'));

        let mut out = String::with_capacity(rendered.len() + int_part.len() / 3 + 1);
        if negative && !is_zero {
            out.push('-');
        }
        if self.grouping_used {
            match int_part.parse::<u128>() {
                Ok(n) => out.push_str(&n.to_formatted_string(&Locale::en)),
                // beyond u128 the digits are printed ungrouped
                Err(_) => out.push_str(int_part),
            }
        } else {
            out.push_str(int_part);
        }
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        out
    }
}
