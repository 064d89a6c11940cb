//! Main-loop event and bridge-request handling.

pub mod dispatcher;

pub use dispatcher::tick;
