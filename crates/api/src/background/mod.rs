//! Background tasks spawned by the server at startup.

pub mod daily_reset;
