mod temperature_scheduler;

pub use temperature_scheduler::TemperatureScheduler;
