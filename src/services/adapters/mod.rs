pub mod process_command;

pub use process_command::SystemProcessRunner;
