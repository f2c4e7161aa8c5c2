pub mod call;
pub mod car_input;
pub mod config;
pub mod door_message;
pub mod request;
pub mod status_event;
