use chrono::Local;

pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

pub trait Clock: Send + Sync {
    /// Current local time as `HH:MM:SS`.
    fn timestamp(&self) -> String;
}

pub struct LocalClock;

impl Clock for LocalClock {
    fn timestamp(&self) -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}
