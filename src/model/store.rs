//! InventoryStore：库存核心状态与增删改查

use thiserror::Error;

use crate::model::inventory::{Inventory, InventoryRecord, InventoryView};
use crate::model::persistence::{Persistence, PersistenceError};
use crate::model::validation::{
    check_finite, check_name, check_non_negative, check_positive, Field, ValidationError,
};

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}不在库存中。")]
    NotFound(String),
    #[error("保存数据失败：{0}")]
    Persistence(#[from] PersistenceError),
}

/// 添加物品的结果
#[derive(Debug, Clone, PartialEq)]
pub struct AddOutcome {
    /// 本次增加的数量
    pub added: f64,
    /// 添加后的库存数量
    pub quantity: f64,
    /// 已有物品且价格不同：(保留的原价, 被忽略的新价)
    pub price_conflict: Option<(f64, f64)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpdateOutcome {
    Updated(InventoryRecord),
    /// 未提供任何字段，没有写入
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeleteOutcome {
    Removed(InventoryRecord),
    Cancelled,
}

/// 库存存储：内存映射 + 注入的持久化后端
///
/// 每次成功修改后立即整表写回后端。写入是最后一步，
/// 写入失败时内存中的修改保留，错误返回给调用方。
#[derive(Debug)]
pub struct InventoryStore<P: Persistence> {
    inventory: Inventory,
    persistence: P,
}

impl<P: Persistence> InventoryStore<P> {
    /// 创建空库存（尚未从后端加载）
    pub fn new(persistence: P) -> Self {
        Self {
            inventory: Inventory::new(),
            persistence,
        }
    }

    /// 从后端加载；失败时保持空库存
    pub fn load(&mut self) -> Result<usize, PersistenceError> {
        match self.persistence.load() {
            Ok(inventory) => {
                self.inventory = inventory;
                Ok(self.inventory.len())
            }
            Err(e) => {
                tracing::error!("加载库存失败: {}", e);
                self.inventory.clear();
                Err(e)
            }
        }
    }

    /// 添加物品；已存在则累加数量并保留原价
    pub fn add(&mut self, name: &str, quantity: f64, price: f64) -> Result<AddOutcome, InventoryError> {
        check_name(name)?;
        // 先确认两个字段都是数字，再检查范围
        check_finite(Field::Quantity, quantity)?;
        check_finite(Field::Price, price)?;
        check_positive(Field::Quantity, quantity)?;
        check_positive(Field::Price, price)?;

        let outcome = match self.inventory.get_mut(name) {
            Some(record) => {
                // 累加结果溢出为无穷大时拒绝，映射保持不变
                record.quantity = check_finite(Field::Quantity, record.quantity + quantity)?;
                let price_conflict = (record.price != price).then_some((record.price, price));
                if let Some((kept, ignored)) = price_conflict {
                    tracing::warn!("{} 价格不一致，保留原价 {}，忽略 {}", name, kept, ignored);
                }
                AddOutcome {
                    added: quantity,
                    quantity: record.quantity,
                    price_conflict,
                }
            }
            None => {
                self.inventory
                    .insert(name.to_string(), InventoryRecord::new(quantity, price));
                AddOutcome {
                    added: quantity,
                    quantity,
                    price_conflict: None,
                }
            }
        };

        tracing::info!("添加 {} x{}，当前库存 {}", name, quantity, outcome.quantity);
        self.persist()?;
        Ok(outcome)
    }

    /// 更新物品的数量和/或价格；所有字段校验通过后才写入
    pub fn update(
        &mut self,
        name: &str,
        quantity: Option<f64>,
        price: Option<f64>,
    ) -> Result<UpdateOutcome, InventoryError> {
        check_name(name)?;
        if !self.inventory.contains_key(name) {
            return Err(InventoryError::NotFound(name.to_string()));
        }

        let quantity = quantity
            .map(|q| check_non_negative(Field::Quantity, q))
            .transpose()?;
        let price = price.map(|p| check_positive(Field::Price, p)).transpose()?;

        if quantity.is_none() && price.is_none() {
            return Ok(UpdateOutcome::Unchanged);
        }

        let record = self
            .inventory
            .get_mut(name)
            .ok_or_else(|| InventoryError::NotFound(name.to_string()))?;
        if let Some(q) = quantity {
            record.quantity = q;
        }
        if let Some(p) = price {
            record.price = p;
        }
        let updated = *record;

        tracing::info!("更新 {}: 数量 {}，单价 {}", name, updated.quantity, updated.price);
        self.persist()?;
        Ok(UpdateOutcome::Updated(updated))
    }

    /// 删除物品；`confirm` 返回 false 时不做任何修改
    pub fn delete<F>(&mut self, name: &str, confirm: F) -> Result<DeleteOutcome, InventoryError>
    where
        F: FnOnce(&str) -> bool,
    {
        if !self.inventory.contains_key(name) {
            return Err(InventoryError::NotFound(name.to_string()));
        }
        if !confirm(name) {
            tracing::info!("用户取消删除: {}", name);
            return Ok(DeleteOutcome::Cancelled);
        }

        let removed = self
            .inventory
            .remove(name)
            .ok_or_else(|| InventoryError::NotFound(name.to_string()))?;
        tracing::info!("已删除 {}", name);
        self.persist()?;
        Ok(DeleteOutcome::Removed(removed))
    }

    /// 只读库存视图
    pub fn view(&self) -> InventoryView<'_> {
        InventoryView::new(&self.inventory)
    }

    /// 无条件整表写回（退出时调用）
    pub fn flush(&self) -> Result<(), PersistenceError> {
        self.persistence.save(&self.inventory)
    }

    pub fn get(&self, name: &str) -> Option<&InventoryRecord> {
        self.inventory.get(name)
    }

    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    fn persist(&self) -> Result<(), PersistenceError> {
        self.persistence.save(&self.inventory).map_err(|e| {
            tracing::error!("保存库存失败: {}", e);
            e
        })
    }
}
