//! casedb-bootstrap - 存储服务装配
//!
//! 根据配置选择后端引擎，构造进程内唯一的案件存储服务

mod module;
mod runtime;

pub use module::*;
pub use runtime::*;
