//! 库存控制器：把表单输入和命令文本翻译成库存操作，并把结果写入消息区
//!
//! 控制器不依赖任何界面库。确认框和提示框通过 [`Prompter`] 注入，
//! 测试时可以用脚本化实现替换。

use crate::model::persistence::Persistence;
use crate::model::store::{DeleteOutcome, InventoryError, InventoryStore, UpdateOutcome};
use crate::model::inventory::ViewEntry;
use crate::model::validation::{parse_amount, parse_optional_amount, Field, ValidationError};
use crate::vm::bridge::*;
use crate::vm::command::{parse_command, Command};
use crate::vm::message_log::MessageLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Warning,
    Error,
}

/// 确认框的按钮组合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    /// 是/否（删除物品）
    YesNo,
    /// 确定/取消（退出程序）
    OkCancel,
}

/// 界面层提供的模态交互能力
pub trait Prompter {
    /// 返回 true 表示用户选择了“是”或“确定”
    fn confirm(&mut self, kind: ConfirmKind, title: &str, text: &str) -> bool;
    fn alert(&mut self, level: AlertLevel, title: &str, text: &str);
}

/// 表单三个输入框的原始文本
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub quantity: String,
    pub price: String,
}

impl FormInput {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
            price: price.into(),
        }
    }
}

/// 操作完成后表单应如何处理
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Clear,
    Keep,
}

pub struct InventoryController<P: Persistence> {
    store: InventoryStore<P>,
    log: MessageLog,
}

impl<P: Persistence> InventoryController<P> {
    pub fn new(store: InventoryStore<P>) -> Self {
        Self {
            store,
            log: MessageLog::new(),
        }
    }

    /// 启动：加载数据并输出欢迎信息
    pub fn start(&mut self, ui: &mut dyn Prompter) {
        match self.store.load() {
            Ok(count) => tracing::info!("启动加载完成: {} 个物品", count),
            Err(e) => ui.alert(AlertLevel::Error, TITLE_ERROR, &format!("加载数据失败：{}", e)),
        }
        self.log.system(MSG_WELCOME);
        self.log.system(MSG_COMMANDS);
    }

    /// “添加物品”按钮
    pub fn add_item(&mut self, form: &FormInput, ui: &mut dyn Prompter) -> FormAction {
        let name = form.name.trim();
        if name.is_empty() {
            ui.alert(AlertLevel::Warning, TITLE_WARNING, &ValidationError::EmptyName.to_string());
            return FormAction::Keep;
        }

        let parsed = parse_amount(Field::Quantity, &form.quantity)
            .and_then(|q| parse_amount(Field::Price, &form.price).map(|p| (q, p)));
        let (quantity, price) = match parsed {
            Ok(values) => values,
            Err(e) => {
                tracing::warn!("添加 {} 输入无效: {}", name, e);
                ui.alert(AlertLevel::Error, TITLE_ERROR, MSG_ADD_NOT_NUMBER);
                return FormAction::Keep;
            }
        };

        match self.store.add(name, quantity, price) {
            Ok(outcome) => {
                if let Some((kept, _)) = outcome.price_conflict {
                    self.log.system(format!(
                        "警告：{}存在不同价格，已保留原价{}。",
                        name,
                        format_amount(kept)
                    ));
                }
                self.log.system(format!(
                    "成功添加{}个{}，当前库存：{}。",
                    format_amount(outcome.added),
                    name,
                    format_amount(outcome.quantity)
                ));
                FormAction::Clear
            }
            Err(e) => self.report_error(e, "添加", name, ui),
        }
    }

    /// “更新物品”按钮：数量和价格留空表示不修改
    pub fn update_item(&mut self, form: &FormInput, ui: &mut dyn Prompter) -> FormAction {
        let name = form.name.trim();
        if name.is_empty() {
            ui.alert(AlertLevel::Warning, TITLE_WARNING, &ValidationError::EmptyName.to_string());
            return FormAction::Keep;
        }
        if self.store.get(name).is_none() {
            self.log.system(InventoryError::NotFound(name.to_string()).to_string());
            return FormAction::Keep;
        }

        let parsed = parse_optional_amount(Field::Quantity, &form.quantity)
            .and_then(|q| parse_optional_amount(Field::Price, &form.price).map(|p| (q, p)));
        let (quantity, price) = match parsed {
            Ok(values) => values,
            Err(e) => {
                ui.alert(AlertLevel::Error, TITLE_ERROR, &e.to_string());
                return FormAction::Keep;
            }
        };

        match self.store.update(name, quantity, price) {
            Ok(UpdateOutcome::Updated(_)) => self.log.system(format!("已更新{}的信息。", name)),
            Ok(UpdateOutcome::Unchanged) => self.log.system(MSG_NO_UPDATE),
            Err(e) => return self.report_error(e, "更新", name, ui),
        }
        FormAction::Clear
    }

    /// 命令框回车/发送；空白输入不产生任何消息，返回 false
    pub fn handle_command(&mut self, input: &str, ui: &mut dyn Prompter) -> bool {
        let Some(command) = parse_command(input) else {
            return false;
        };
        self.log.user(input.trim());

        match command {
            Command::View => self.show_inventory(),
            Command::Delete(name) => self.delete_item(&name, ui),
            Command::Unknown(text) => {
                tracing::warn!("未知命令: {}", text);
                self.log.system(MSG_UNKNOWN_COMMAND);
            }
        }
        true
    }

    /// 关闭窗口前确认；确认后做最后一次保存，返回 true 表示可以退出
    pub fn request_exit(&mut self, ui: &mut dyn Prompter) -> bool {
        if !ui.confirm(ConfirmKind::OkCancel, TITLE_EXIT, MSG_EXIT_CONFIRM) {
            return false;
        }
        if let Err(e) = self.store.flush() {
            tracing::error!("退出时保存失败: {}", e);
            ui.alert(AlertLevel::Error, TITLE_ERROR, &format!("保存数据失败：{}", e));
        }
        true
    }

    /// 状态栏摘要
    pub fn status_line(&self) -> String {
        format!(
            "物品种类：{} | 库存总值：￥{:.2}",
            self.store.len(),
            self.store.view().total_value()
        )
    }

    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    pub fn store(&self) -> &InventoryStore<P> {
        &self.store
    }

    fn show_inventory(&mut self) {
        self.log.system(MSG_VIEW_HEADER);
        if self.store.is_empty() {
            self.log.system(MSG_VIEW_EMPTY);
            return;
        }

        for entry in self.store.view() {
            match entry {
                ViewEntry::Item(item) => self.log.system(format!(
                    "物品：{}\n  数量：{:.2}\n  单价：￥{:.2}\n  总值：￥{:.2}",
                    item.name, item.quantity, item.price, item.value
                )),
                ViewEntry::Total(total) => self.log.system(format!("\n库存总值：￥{:.2}", total)),
            }
        }
    }

    fn delete_item(&mut self, name: &str, ui: &mut dyn Prompter) {
        let result = self
            .store
            .delete(name, |n| {
                ui.confirm(ConfirmKind::YesNo, TITLE_CONFIRM, &format!("确定要删除{}吗？", n))
            });
        match result {
            Ok(DeleteOutcome::Removed(_)) => self.log.system(format!("已移除{}。", name)),
            Ok(DeleteOutcome::Cancelled) => {}
            Err(e) => {
                self.report_error(e, "删除", name, ui);
            }
        }
    }

    /// 错误分流：名称为空、非数字、保存失败弹对话框，其余写入消息区
    ///
    /// 保存失败时修改已在内存中生效，返回 `Clear` 防止同一表单被重复提交。
    fn report_error(
        &mut self,
        err: InventoryError,
        action: &str,
        name: &str,
        ui: &mut dyn Prompter,
    ) -> FormAction {
        match err {
            InventoryError::Validation(ValidationError::EmptyName) => {
                ui.alert(AlertLevel::Warning, TITLE_WARNING, &ValidationError::EmptyName.to_string());
            }
            InventoryError::Validation(e @ ValidationError::NotANumber(_)) => {
                ui.alert(AlertLevel::Error, TITLE_ERROR, &e.to_string());
            }
            InventoryError::Validation(e) => {
                tracing::warn!("{} {} 被拒绝: {}", action, name, e);
                self.log.system(format!("错误：{}，{}{}失败。", e, action, name));
            }
            e @ InventoryError::NotFound(_) => self.log.system(e.to_string()),
            e @ InventoryError::Persistence(_) => {
                self.log.system(format!("{}{}已在内存中生效，但未能写入磁盘。", action, name));
                ui.alert(AlertLevel::Error, TITLE_ERROR, &e.to_string());
                return FormAction::Clear;
            }
        }
        FormAction::Keep
    }
}

/// 消息中的数量/价格：整数值保留一位小数（10 → "10.0"），其余按最短形式输出
fn format_amount(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{:.1}", value)
    } else {
        value.to_string()
    }
}
