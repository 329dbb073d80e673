//! casedb-adapter-postgres - PostgreSQL 适配器（客户端/服务端引擎）

mod config;
mod connection;
mod migration;
pub mod schema;
mod storage;

pub use config::*;
pub use connection::*;
pub use migration::*;
pub use storage::*;
