#[macro_use]
extern crate tracing;

use redis::aio::MultiplexedConnection;

mod error;

pub use error::*;

/// A redis connection
pub type RedisConn = MultiplexedConnection;
