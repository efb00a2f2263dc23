pub mod bridge;
pub mod command;
pub mod controller;
pub mod message_log;
