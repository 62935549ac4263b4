//! Memory store port.

pub mod gateway;

pub use gateway::MemoryGateway;
