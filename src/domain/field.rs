/// Outcome of parsing a free-text field
///
/// Keeps "the field is blank" and "the field holds garbage" distinct:
/// an empty field means unset, an invalid one is flagged in the UI and
/// excluded from computation until corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parsed<T> {
    /// Empty or whitespace-only input (unset, not an error)
    Empty,
    /// Non-empty input matching no accepted grammar
    Invalid,
    /// Successfully parsed value
    Value(T),
}

impl<T> Parsed<T> {
    /// Get the parsed value, if any
    pub fn value(self) -> Option<T> {
        match self {
            Parsed::Value(v) => Some(v),
            Parsed::Empty | Parsed::Invalid => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Parsed::Invalid)
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Parsed::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_extraction() {
        assert_eq!(Parsed::Value(7).value(), Some(7));
        assert_eq!(Parsed::<u64>::Empty.value(), None);
        assert_eq!(Parsed::<u64>::Invalid.value(), None);
    }

    #[test]
    fn test_flags() {
        assert!(Parsed::<u64>::Invalid.is_invalid());
        assert!(!Parsed::Value(1).is_invalid());
        assert!(Parsed::<u64>::Empty.is_empty());
        assert!(!Parsed::<u64>::Invalid.is_empty());
    }
}
