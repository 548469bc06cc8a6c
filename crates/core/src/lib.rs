// Catalog Core - 核心数据模型
//!
//! 包含：
//! - Product: 商品记录与 id
//! - NewProduct / ProductPatch: 创建输入与逐字段更新
//! - StoreConfig: 存储配置

mod product;
mod config;

pub use product::*;
pub use config::*;
