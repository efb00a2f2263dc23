//! 持久化后端：加载/保存整个库存映射

use std::cell::{Cell, RefCell};
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::inventory::Inventory;
use crate::utils::fs::{read_json_file, write_json_file};

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("IO失败: {0}")]
    Io(#[from] io::Error),
    #[error("JSON解析失败: {0}")]
    Json(#[from] serde_json::Error),
}

/// 库存存储后端（整表读写）
pub trait Persistence {
    fn load(&self) -> Result<Inventory, PersistenceError>;
    fn save(&self, inventory: &Inventory) -> Result<(), PersistenceError>;
}

/// JSON 文件后端：每次保存都完整重写文件
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Persistence for JsonFileStorage {
    /// 文件不存在视为空库存，不算错误
    fn load(&self) -> Result<Inventory, PersistenceError> {
        if !self.path.exists() {
            tracing::info!("数据文件不存在，使用空库存: {}", self.path.display());
            return Ok(Inventory::new());
        }
        let inventory: Inventory = read_json_file(&self.path)?;
        tracing::info!("已加载 {} 个物品: {}", inventory.len(), self.path.display());
        Ok(inventory)
    }

    fn save(&self, inventory: &Inventory) -> Result<(), PersistenceError> {
        write_json_file(&self.path, inventory)?;
        tracing::info!("库存已保存到: {} ({} 个物品)", self.path.display(), inventory.len());
        Ok(())
    }
}

/// 内存后端：用于替换存储实现和隔离测试
#[derive(Debug, Default)]
pub struct MemoryStorage {
    saved: RefCell<Inventory>,
    save_count: Cell<usize>,
    fail_writes: Cell<bool>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以已有数据初始化（模拟磁盘上已存在的文件）
    pub fn with_inventory(inventory: Inventory) -> Self {
        Self {
            saved: RefCell::new(inventory),
            ..Self::default()
        }
    }

    /// 最近一次保存的快照
    pub fn snapshot(&self) -> Inventory {
        self.saved.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.save_count.get()
    }

    /// 打开后所有写入都返回 IO 错误
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl Persistence for MemoryStorage {
    fn load(&self) -> Result<Inventory, PersistenceError> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, inventory: &Inventory) -> Result<(), PersistenceError> {
        if self.fail_writes.get() {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "写入被拒绝").into());
        }
        *self.saved.borrow_mut() = inventory.clone();
        self.save_count.set(self.save_count.get() + 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::inventory::InventoryRecord;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    /// 创建临时JSON文件用于测试
    fn create_test_json_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("创建临时文件失败");
        file.write_all(content.as_bytes()).expect("写入临时文件失败");
        file
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("inventory_data.json"));
        let inventory = storage.load().expect("缺失文件不应报错");
        assert!(inventory.is_empty());
    }

    #[test]
    fn test_load_existing_file() {
        let file = create_test_json_file(r#"{"钢笔": {"quantity": 10, "price": 1.5}}"#);
        let storage = JsonFileStorage::new(file.path());

        let inventory = storage.load().expect("加载应该成功");
        assert_eq!(inventory.get("钢笔"), Some(&InventoryRecord::new(10.0, 1.5)));
    }

    #[test]
    fn test_invalid_json_is_error() {
        let file = create_test_json_file(r#"{"钢笔": {"quantity": "多"}}"#);
        let storage = JsonFileStorage::new(file.path());
        assert!(matches!(storage.load(), Err(PersistenceError::Json(_))));
    }

    #[test]
    fn test_save_then_load_is_lossless() {
        let dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("inventory_data.json"));

        let mut inventory = Inventory::new();
        inventory.insert("pen".into(), InventoryRecord::new(15.0, 1.5));
        inventory.insert("纸".into(), InventoryRecord::new(0.1 + 0.2, 3.333333333333333));
        storage.save(&inventory).expect("保存应该成功");

        assert_eq!(storage.load().unwrap(), inventory);
    }

    #[test]
    fn test_memory_storage_failure_switch() {
        let storage = MemoryStorage::new();
        let inventory = Inventory::new();
        storage.save(&inventory).unwrap();
        assert_eq!(storage.save_count(), 1);

        storage.set_fail_writes(true);
        assert!(matches!(storage.save(&inventory), Err(PersistenceError::Io(_))));
        assert_eq!(storage.save_count(), 1);
    }
}
