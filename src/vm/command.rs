//! 命令框文本解析

/// 查看库存的命令词
pub const VIEW_KEYWORDS: [&str; 2] = ["view", "查看"];
/// 删除物品的命令词（后跟空格和物品名）
pub const DELETE_KEYWORDS: [&str; 2] = ["delete", "删除"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    View,
    Delete(String),
    Unknown(String),
}

/// 解析一行命令；空白输入返回 None
///
/// 只有命令词不区分大小写。删除命令的参数是第一个空格之后的全部内容（去掉首尾空白），
/// 有意不做小写转换：物品名区分大小写，整行转小写会让含大写字母的物品无法删除。
/// 回显到消息区的也是用户原始输入，而不是转小写后的文本。
pub fn parse_command(input: &str) -> Option<Command> {
    let text = input.trim();
    if text.is_empty() {
        return None;
    }

    let lowered = text.to_lowercase();
    if VIEW_KEYWORDS.contains(&lowered.as_str()) {
        return Some(Command::View);
    }

    if let Some((head, rest)) = text.split_once(' ') {
        let name = rest.trim();
        if !name.is_empty() && DELETE_KEYWORDS.contains(&head.to_lowercase().as_str()) {
            return Some(Command::Delete(name.to_string()));
        }
    }

    Some(Command::Unknown(text.to_string()))
}
