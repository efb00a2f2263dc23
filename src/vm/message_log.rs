//! 系统消息区：只追加的带时间戳日志

use std::fmt;

use chrono::{Local, NaiveTime};

/// 消息来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    System,
}

impl Origin {
    pub fn label(self) -> &'static str {
        match self {
            Origin::User => "用户",
            Origin::System => "系统",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub time: NaiveTime,
    pub origin: Origin,
    pub text: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.time.format("%H:%M:%S"),
            self.origin.label(),
            self.text
        )
    }
}

#[derive(Debug, Default)]
pub struct MessageLog {
    entries: Vec<LogEntry>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system(&mut self, text: impl Into<String>) {
        self.push(Origin::System, text);
    }

    pub fn user(&mut self, text: impl Into<String>) {
        self.push(Origin::User, text);
    }

    /// 以当前本地时间追加一条消息
    pub fn push(&mut self, origin: Origin, text: impl Into<String>) {
        self.push_at(Local::now().time(), origin, text);
    }

    pub fn push_at(&mut self, time: NaiveTime, origin: Origin, text: impl Into<String>) {
        let entry = LogEntry {
            time,
            origin,
            text: text.into(),
        };
        tracing::debug!("消息: {}", entry);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 渲染为消息区显示的文本，每条一行
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_entry_format() {
        let mut log = MessageLog::new();
        log.push_at(at(9, 5, 7), Origin::User, "view");
        log.push_at(at(9, 5, 8), Origin::System, "当前库存：");

        assert_eq!(log.entries()[0].to_string(), "[09:05:07] 用户: view");
        assert_eq!(
            log.render(),
            "[09:05:07] 用户: view\n[09:05:08] 系统: 当前库存："
        );
    }

    #[test]
    fn test_append_only_order() {
        let mut log = MessageLog::new();
        assert!(log.is_empty());
        log.system("一");
        log.user("二");
        log.system("三");

        let texts: Vec<&str> = log.entries().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, ["一", "二", "三"]);
        assert_eq!(log.entries()[1].origin, Origin::User);
        assert_eq!(log.len(), 3);
    }
}
