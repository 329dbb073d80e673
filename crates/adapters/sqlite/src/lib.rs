//! casedb-adapter-sqlite - SQLite 适配器（嵌入式文件引擎）

mod config;
mod connection;
mod migration;
pub mod schema;
mod storage;

pub use config::*;
pub use connection::*;
pub use migration::*;
pub use storage::*;
