pub mod aggregate;
pub mod classify;
pub mod discovery;
pub mod network;
pub mod probe;
pub mod scan;
pub mod scanner;
pub mod system;
pub mod topology;
pub mod vendors;
