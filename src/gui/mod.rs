mod dashboard;
mod device_selector;
mod error;

pub use dashboard::draw_dashboard;
pub use device_selector::device_selector;
pub use error::MonitorError;
