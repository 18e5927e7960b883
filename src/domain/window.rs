/// The planned time-of-day span the day's work is measured against
///
/// Bounds are minutes past midnight; either may be unset (or invalid
/// upstream, which reaches here as unset).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DayWindow {
    pub start: Option<u32>,
    pub end: Option<u32>,
}

impl DayWindow {
    pub fn new(start: Option<u32>, end: Option<u32>) -> Self {
        Self { start, end }
    }

    /// Planned span in minutes, wrapping past midnight when end < start
    pub fn planned_minutes(&self) -> Option<u32> {
        let (start, end) = (self.start?, self.end?);
        if end < start {
            Some(end + 1440 - start)
        } else {
            Some(end - start)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_planned_minutes_same_day() {
        // 08:00 AM .. 09:00 PM
        let window = DayWindow::new(Some(480), Some(1260));
        assert_eq!(window.planned_minutes(), Some(780));
    }

    #[test]
    fn test_planned_minutes_overnight_wrap() {
        // 10:00 PM .. 06:00 AM
        let window = DayWindow::new(Some(1320), Some(360));
        assert_eq!(window.planned_minutes(), Some(480));
    }

    #[test]
    fn test_planned_minutes_zero_span() {
        let window = DayWindow::new(Some(600), Some(600));
        assert_eq!(window.planned_minutes(), Some(0));
    }

    #[test]
    fn test_planned_minutes_missing_bound() {
        assert_eq!(DayWindow::new(None, Some(360)).planned_minutes(), None);
        assert_eq!(DayWindow::new(Some(480), None).planned_minutes(), None);
        assert_eq!(DayWindow::default().planned_minutes(), None);
    }
}
