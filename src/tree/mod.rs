pub mod navigator;
pub mod node;
pub mod outline;
pub mod path;
pub mod resolve;
