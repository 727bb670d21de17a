// src/config/mod.rs
pub mod consts;
pub mod options;

pub use options::{
    EmailOptions, MonitorOptions, ScheduleOptions, TargetOptions, TelegramOptions,
};
