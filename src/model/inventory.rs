//! 库存数据模型：物品记录与只读视图

use std::collections::{btree_map, BTreeMap};

use serde::{Deserialize, Serialize};

/// 单个物品的库存记录
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub quantity: f64,
    pub price: f64,
}

impl InventoryRecord {
    pub fn new(quantity: f64, price: f64) -> Self {
        Self { quantity, price }
    }

    /// 该物品的库存价值（数量 × 单价）
    pub fn value(&self) -> f64 {
        self.quantity * self.price
    }
}

/// 物品名称 → 库存记录
pub type Inventory = BTreeMap<String, InventoryRecord>;

/// 视图中的单行物品摘要
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemSummary<'a> {
    pub name: &'a str,
    pub quantity: f64,
    pub price: f64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewEntry<'a> {
    Item(ItemSummary<'a>),
    /// 最后一项：所有物品价值之和
    Total(f64),
}

/// 惰性库存视图：逐个产出物品摘要，最后产出一次总值
#[derive(Debug)]
pub struct InventoryView<'a> {
    items: btree_map::Iter<'a, String, InventoryRecord>,
    running_total: f64,
    finished: bool,
}

impl<'a> InventoryView<'a> {
    pub fn new(inventory: &'a Inventory) -> Self {
        Self {
            items: inventory.iter(),
            running_total: 0.0,
            finished: false,
        }
    }

    /// 消费视图，只返回库存总值
    pub fn total_value(self) -> f64 {
        self.fold(0.0, |_, entry| match entry {
            ViewEntry::Total(total) => total,
            ViewEntry::Item(_) => 0.0,
        })
    }
}

impl<'a> Iterator for InventoryView<'a> {
    type Item = ViewEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.items.next() {
            Some((name, record)) => {
                let value = record.value();
                self.running_total += value;
                Some(ViewEntry::Item(ItemSummary {
                    name,
                    quantity: record.quantity,
                    price: record.price,
                    value,
                }))
            }
            None => {
                self.finished = true;
                Some(ViewEntry::Total(self.running_total))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Inventory {
        let mut inv = Inventory::new();
        inv.insert("铅笔".into(), InventoryRecord::new(10.0, 1.5));
        inv.insert("笔记本".into(), InventoryRecord::new(4.0, 12.25));
        inv
    }

    #[test]
    fn test_view_yields_items_then_total() {
        let inv = sample();
        let entries: Vec<ViewEntry> = InventoryView::new(&inv).collect();

        assert_eq!(entries.len(), 3, "两个物品加一行总值");
        assert!(matches!(entries[0], ViewEntry::Item(_)));
        assert!(matches!(entries[1], ViewEntry::Item(_)));
        assert_eq!(entries[2], ViewEntry::Total(10.0 * 1.5 + 4.0 * 12.25));
    }

    #[test]
    fn test_view_item_values() {
        let inv = sample();
        let pencil = InventoryView::new(&inv)
            .find_map(|e| match e {
                ViewEntry::Item(item) if item.name == "铅笔" => Some(item),
                _ => None,
            })
            .expect("应该包含铅笔");

        assert_eq!(pencil.quantity, 10.0);
        assert_eq!(pencil.price, 1.5);
        assert_eq!(pencil.value, 15.0);
    }

    #[test]
    fn test_empty_view_only_total() {
        let inv = Inventory::new();
        let mut view = InventoryView::new(&inv);
        assert_eq!(view.next(), Some(ViewEntry::Total(0.0)));
        assert_eq!(view.next(), None);
    }

    #[test]
    fn test_total_value() {
        let inv = sample();
        assert_eq!(InventoryView::new(&inv).total_value(), 64.0);
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(InventoryRecord::new(2.0, 3.5)).unwrap();
        assert_eq!(json, serde_json::json!({"quantity": 2.0, "price": 3.5}));
    }
}
