//! Catalog Persistence - 持久化层
//!
//! 商品记录存储：
//! - 整个集合存为一个 JSON 数组文件
//! - 每次操作重新读取完整文件，修改后整体重写
//! - 所有失败统一通过 `StoreError` 返回
//!
//! 设计原则：
//! - 无缓存：文件是唯一事实来源
//! - 先校验后写入：失败时文件保持原样

pub mod store;
pub mod json;

pub use store::{StoreError, Result};
pub use json::{ProductStore, open_json_store};
