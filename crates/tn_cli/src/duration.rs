use std::iter::Peekable;
use std::str::{Chars, FromStr};
use std::time::Duration;

/// Durations like `90`, `2m`, `24h` or `1h15m30s`; a bare number is seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

fn unit_seconds(unit: char) -> Option<u64> {
    match unit {
        's' => Some(1),
        'm' => Some(60),
        'h' => Some(3600),
        'd' => Some(86400),
        _ => None,
    }
}

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let too_large = || format!("Duration too large: {}", s);
        let mut chars = s.chars().peekable();
        let skip_blanks = |chars: &mut Peekable<Chars<'_>>| {
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
        };

        skip_blanks(&mut chars);
        if chars.peek().is_none() {
            return Err("Duration must include a number".to_string());
        }

        let mut total: u64 = 0;
        while chars.peek().is_some() {
            let mut digits = String::new();
            while let Some(d) = chars.next_if(char::is_ascii_digit) {
                digits.push(d);
            }
            if digits.is_empty() {
                let found = chars.peek().copied().unwrap_or(' ');
                return Err(format!("Expected a number before '{}'", found));
            }
            let amount: u64 = digits.parse().map_err(|_| too_large())?;

            skip_blanks(&mut chars);
            // A trailing number without a unit counts as seconds.
            let scale = match chars.next() {
                None => 1,
                Some(unit) => unit_seconds(unit).ok_or_else(|| {
                    format!("Invalid duration unit: '{}' (use s, m, h or d)", unit)
                })?,
            };

            total = amount
                .checked_mul(scale)
                .and_then(|secs| total.checked_add(secs))
                .ok_or_else(too_large)?;
            skip_blanks(&mut chars);
        }

        Ok(HumanDuration(Duration::from_secs(total)))
    }
}
