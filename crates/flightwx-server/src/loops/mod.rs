//! Background loops for continuous processing.

pub mod weather_collect_loop;
