pub mod datastruct;
pub mod log_duration;
