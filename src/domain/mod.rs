pub mod duration;
pub mod field;
pub mod summary;
pub mod task;
pub mod timeofday;
pub mod window;

pub use field::Parsed;
pub use summary::Summary;
pub use task::{Phase, Task, Timer};
pub use timeofday::{default_day_end, default_day_start, toggle_text, Meridiem, TimeOfDay};
pub use window::DayWindow;
