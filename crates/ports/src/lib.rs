//! ports - 抽象 trait 层
//!
//! 定义存储服务的抽象接口

mod case_storage;

pub use case_storage::*;
