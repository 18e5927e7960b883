use super::field::Parsed;
use serde::{Deserialize, Serialize};

/// AM/PM designator of a 12-hour time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn flipped(self) -> Self {
        match self {
            Meridiem::Am => Meridiem::Pm,
            Meridiem::Pm => Meridiem::Am,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

/// A clock time on the 12-hour dial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeOfDay {
    /// 1..=12
    pub hour12: u32,
    /// 0..=59
    pub minute: u32,
    pub meridiem: Meridiem,
}

impl TimeOfDay {
    pub fn new(hour12: u32, minute: u32, meridiem: Meridiem) -> Self {
        Self {
            hour12: hour12.clamp(1, 12),
            minute: minute.min(59),
            meridiem,
        }
    }

    /// Parse either canonical "HH:MM AM|PM" or 24-hour "HH:MM".
    ///
    /// Out-of-range hours and minutes are clamped rather than rejected;
    /// anything structurally off is `Invalid`.
    pub fn parse(text: &str) -> Parsed<Self> {
        let s = text.trim();
        if s.is_empty() {
            return Parsed::Empty;
        }

        // "HH:MM AM" / "HH:MMpm" - meridiem suffix, optional space
        if s.len() >= 2 && s.is_char_boundary(s.len() - 2) {
            let (head, tail) = s.split_at(s.len() - 2);
            let meridiem = match tail.to_ascii_uppercase().as_str() {
                "AM" => Some(Meridiem::Am),
                "PM" => Some(Meridiem::Pm),
                _ => None,
            };
            if let Some(meridiem) = meridiem {
                return match parse_hhmm(head.trim_end()) {
                    Some((h, m)) => Parsed::Value(Self::new(h.max(1), m, meridiem)),
                    None => Parsed::Invalid,
                };
            }
        }

        // Bare 24-hour "HH:MM"
        match parse_hhmm(s) {
            Some((h24, m)) => Parsed::Value(Self::from_24h(h24.min(23), m.min(59))),
            None => Parsed::Invalid,
        }
    }

    /// Convert a 24-hour clock reading onto the 12-hour dial
    pub fn from_24h(hour24: u32, minute: u32) -> Self {
        let meridiem = if hour24 >= 12 { Meridiem::Pm } else { Meridiem::Am };
        let hour12 = match hour24 % 12 {
            0 => 12,
            h => h,
        };
        Self::new(hour12, minute, meridiem)
    }

    /// Canonical display/storage form, e.g. "08:00 AM"
    pub fn format(&self) -> String {
        format!("{:02}:{:02} {}", self.hour12, self.minute, self.meridiem.label())
    }

    /// Minutes past midnight, 0..=1439
    pub fn to_minutes(&self) -> u32 {
        let hour24 = match (self.meridiem, self.hour12) {
            (Meridiem::Am, 12) => 0,
            (Meridiem::Am, h) => h,
            (Meridiem::Pm, 12) => 12,
            (Meridiem::Pm, h) => h + 12,
        };
        hour24 * 60 + self.minute
    }

    /// Same hour and minute, opposite meridiem
    pub fn toggled(&self) -> Self {
        Self {
            meridiem: self.meridiem.flipped(),
            ..*self
        }
    }
}

/// Flip the meridiem of a time field's text, substituting `default`
/// when the current text does not parse (including empty)
pub fn toggle_text(text: &str, default: TimeOfDay) -> String {
    match TimeOfDay::parse(text) {
        Parsed::Value(t) => t.toggled().format(),
        Parsed::Empty | Parsed::Invalid => default.format(),
    }
}

/// Default day start, 08:00 AM
pub fn default_day_start() -> TimeOfDay {
    TimeOfDay::new(8, 0, Meridiem::Am)
}

/// Default day end, 09:00 PM
pub fn default_day_end() -> TimeOfDay {
    TimeOfDay::new(9, 0, Meridiem::Pm)
}

/// Parse "H:MM" with 1-2 hour digits and exactly 2 minute digits
fn parse_hhmm(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.split_once(':')?;
    if h.is_empty() || h.len() > 2 || !h.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if m.len() != 2 || !m.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((h.parse().ok()?, m.parse().ok()?))
}
