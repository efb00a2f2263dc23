//! VM桥接层：连接Slint UI与库存控制器
//!
//! 注意：窗口绑定在main.rs中，因为依赖于Slint生成的类型
//! 这里只提供界面文案常量

// === 常量定义（消除魔法值） ===
pub const WINDOW_TITLE: &str = "库存管理系统 v1.0";

pub const STATUS_READY: &str = "就绪";

pub const TITLE_WARNING: &str = "警告";
pub const TITLE_ERROR: &str = "错误";
pub const TITLE_CONFIRM: &str = "确认";
pub const TITLE_EXIT: &str = "退出";

pub const MSG_WELCOME: &str = "欢迎使用库存管理系统！";
pub const MSG_COMMANDS: &str = "可用命令：view(查看库存), delete 物品名(删除物品)";
pub const MSG_EXIT_CONFIRM: &str = "确定要退出吗？";
pub const MSG_ADD_NOT_NUMBER: &str = "数量和价格必须为数字！";
pub const MSG_NO_UPDATE: &str = "未提供更新内容。";
pub const MSG_VIEW_HEADER: &str = "当前库存：";
pub const MSG_VIEW_EMPTY: &str = "库存为空";
pub const MSG_UNKNOWN_COMMAND: &str = "未知命令。请使用以下命令：\n- view/查看：查看库存\n- delete [物品名]/删除 [物品名]：删除物品";

pub const HELP_TEXT: &str = "使用说明：\n\n\
1. 添加物品：填写信息后点击'添加物品'\n\
2. 更新物品：输入物品名和新的信息\n\
3. 查看库存：在命令框输入'view'或'查看'\n\
4. 删除物品：在命令框输入'delete 物品名'";
