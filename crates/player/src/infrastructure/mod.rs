//! Infrastructure adapters for the player ports.

pub mod clock;
pub mod http_client;

#[cfg(test)]
pub mod testing;
