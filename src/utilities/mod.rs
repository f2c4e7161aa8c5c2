pub mod car;
pub mod debug;
pub mod door;
pub mod inputs;
pub mod lamps;
pub mod overwrite;
pub mod requests;
pub mod status_log;
pub mod telemetry;
