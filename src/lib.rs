//! 库存管理系统库
//!
//! 提供库存映射的增删改查、JSON文件持久化、命令解析和消息日志
//! 遵循MVVM架构模式，界面无关的逻辑都在这里，便于独立测试

pub mod model;
pub mod utils;
pub mod vm;

// 重新导出主要类型
pub use model::inventory::{Inventory, InventoryRecord, InventoryView, ItemSummary, ViewEntry};
pub use model::persistence::{JsonFileStorage, MemoryStorage, Persistence, PersistenceError};
pub use model::store::{InventoryError, InventoryStore};
pub use vm::controller::{AlertLevel, ConfirmKind, FormAction, FormInput, InventoryController, Prompter};
