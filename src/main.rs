//! 程序入口：初始化日志、加载库存数据、创建 Slint 窗口并绑定 VM

use std::{cell::RefCell, rc::Rc};

use anyhow::Context;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use slint::{CloseRequestResponse, ComponentHandle};
use tracing_subscriber::fmt::SubscriberBuilder;

use kucun_guanli::utils::fs::default_data_file;
use kucun_guanli::vm::bridge::*;
use kucun_guanli::{
    AlertLevel, ConfirmKind, FormAction, FormInput, InventoryController, InventoryStore, JsonFileStorage, Prompter,
};

slint::include_modules!();

type Controller = InventoryController<JsonFileStorage>;

/// 原生模态对话框（rfd）
struct DialogPrompter;

impl Prompter for DialogPrompter {
    fn confirm(&mut self, kind: ConfirmKind, title: &str, text: &str) -> bool {
        let buttons = match kind {
            ConfirmKind::YesNo => MessageButtons::YesNo,
            ConfirmKind::OkCancel => MessageButtons::OkCancel,
        };
        let result = MessageDialog::new()
            .set_level(MessageLevel::Info)
            .set_title(title)
            .set_description(text)
            .set_buttons(buttons)
            .show();
        matches!(result, MessageDialogResult::Yes | MessageDialogResult::Ok)
    }

    fn alert(&mut self, level: AlertLevel, title: &str, text: &str) {
        let level = match level {
            AlertLevel::Warning => MessageLevel::Warning,
            AlertLevel::Error => MessageLevel::Error,
        };
        let _ = MessageDialog::new()
            .set_level(level)
            .set_title(title)
            .set_description(text)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

/// VM桥接器：管理UI与控制器的交互
struct ViewModelBridge {
    controller: Rc<RefCell<Controller>>,
}

impl ViewModelBridge {
    /// 创建新的VM桥接器并绑定所有回调
    fn new(app_window: &AppWindow, controller: Rc<RefCell<Controller>>) -> Self {
        let bridge = Self { controller };
        bridge.setup_callbacks(app_window);
        bridge
    }

    /// 设置所有UI回调函数
    fn setup_callbacks(&self, app_window: &AppWindow) {
        // === 添加物品 ===
        {
            let controller = self.controller.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_add_item(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_form(&app_window, &controller, Controller::add_item);
                }
            });
        }

        // === 更新物品 ===
        {
            let controller = self.controller.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_update_item(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_form(&app_window, &controller, Controller::update_item);
                }
            });
        }

        // === 清空输入 ===
        {
            let app_window_weak = app_window.as_weak();
            app_window.on_clear_form(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::clear_form(&app_window);
                }
            });
        }

        // === 命令框 ===
        {
            let controller = self.controller.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_submit_command(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_command(&app_window, &controller);
                }
            });
        }

        // === 关闭窗口：确认后保存 ===
        {
            let controller = self.controller.clone();
            app_window.window().on_close_requested(move || {
                let Ok(mut ctl) = controller.try_borrow_mut() else {
                    return CloseRequestResponse::KeepWindowShown;
                };
                if ctl.request_exit(&mut DialogPrompter) {
                    tracing::info!("用户确认退出");
                    CloseRequestResponse::HideWindow
                } else {
                    CloseRequestResponse::KeepWindowShown
                }
            });
        }
    }

    /// 初始化UI状态
    fn initialize_ui(&self, app_window: &AppWindow) {
        app_window.set_window_title(WINDOW_TITLE.into());
        app_window.set_help_text(HELP_TEXT.into());
        app_window.set_status_message(STATUS_READY.into());
        app_window.set_message_log("".into());
        Self::clear_form(app_window);
    }

    /// 表单按钮公共流程：读取输入 → 控制器处理 → 刷新界面
    fn handle_form(
        app_window: &AppWindow,
        controller: &Rc<RefCell<Controller>>,
        action: fn(&mut Controller, &FormInput, &mut dyn Prompter) -> FormAction,
    ) {
        // 模态对话框期间可能再次触发回调
        let Ok(mut ctl) = controller.try_borrow_mut() else {
            tracing::warn!("上一个操作尚未完成，忽略本次点击");
            return;
        };
        let form = FormInput::new(
            app_window.get_name_text().as_str(),
            app_window.get_quantity_text().as_str(),
            app_window.get_price_text().as_str(),
        );

        let result = action(&mut ctl, &form, &mut DialogPrompter);
        Self::refresh(app_window, &ctl);
        if result == FormAction::Clear {
            Self::clear_form(app_window);
        }
    }

    /// 处理命令框输入
    fn handle_command(app_window: &AppWindow, controller: &Rc<RefCell<Controller>>) {
        let Ok(mut ctl) = controller.try_borrow_mut() else {
            tracing::warn!("上一个操作尚未完成，忽略本次命令");
            return;
        };
        let input = app_window.get_command_text();
        if ctl.handle_command(input.as_str(), &mut DialogPrompter) {
            app_window.set_command_text("".into());
            Self::refresh(app_window, &ctl);
        }
    }

    /// 清空三个输入框并把焦点放回物品名称
    fn clear_form(app_window: &AppWindow) {
        app_window.set_name_text("".into());
        app_window.set_quantity_text("".into());
        app_window.set_price_text("".into());
        app_window.invoke_focus_name_input();
    }

    /// 将控制器状态同步到界面
    fn refresh(app_window: &AppWindow, ctl: &Controller) {
        app_window.set_message_log(ctl.log().render().into());
        app_window.set_status_message(ctl.status_line().into());
    }
}

fn main() -> anyhow::Result<()> {
    // 初始化日志输出
    let _ = SubscriberBuilder::default()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let data_file = default_data_file();
    tracing::info!("数据文件: {}", data_file.display());

    let app = AppWindow::new().context("UI 初始化失败")?;
    let controller = Rc::new(RefCell::new(InventoryController::new(InventoryStore::new(
        JsonFileStorage::new(data_file),
    ))));

    // 创建VM桥接器并绑定UI回调
    let bridge = ViewModelBridge::new(&app, controller.clone());
    bridge.initialize_ui(&app);

    {
        let mut ctl = controller.borrow_mut();
        ctl.start(&mut DialogPrompter);
        ViewModelBridge::refresh(&app, &ctl);
    }

    tracing::info!("应用启动成功，UI已初始化");
    app.run().context("事件循环异常退出")?;
    Ok(())
}
