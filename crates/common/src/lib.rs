//! casedb-common - 案件领域类型与通用工具

pub mod migration;
pub mod projection;
pub mod row;
pub mod statement;
pub mod types;
pub mod utils;

pub use migration::*;
pub use projection::*;
pub use statement::*;
pub use types::*;
