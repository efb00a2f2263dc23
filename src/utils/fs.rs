//! IO helper: safe file read/write for JSON

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::model::persistence::PersistenceError;

/// 数据文件名（与可执行文件放在同一目录）
pub const DATA_FILE_NAME: &str = "inventory_data.json";

/// 从文件读取JSON数据
pub fn read_json_file<T: DeserializeOwned>(p: &Path) -> Result<T, PersistenceError> {
    let f = File::open(p)?;
    let rdr = BufReader::new(f);
    let v: T = serde_json::from_reader(rdr)?;
    Ok(v)
}

/// 将JSON数据保存到文件（格式化输出，两空格缩进）
pub fn write_json_file<T: Serialize + ?Sized>(p: &Path, value: &T) -> Result<(), PersistenceError> {
    let f = File::create(p)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, value)?;
    w.flush()?;
    Ok(())
}

/// 默认数据文件路径：可执行文件所在目录，取不到时退回当前目录
pub fn default_data_file() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read() {
        let dir = tempdir().expect("创建临时目录失败");
        let path = dir.path().join("data.json");

        let mut map = BTreeMap::new();
        map.insert("键".to_string(), 1.25_f64);
        write_json_file(&path, &map).expect("写入应该成功");

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"键\""), "非ASCII字符应原样写出");
        assert!(text.contains("\n  \"键\""), "应该使用两空格缩进");

        let back: BTreeMap<String, f64> = read_json_file(&path).expect("读取应该成功");
        assert_eq!(back, map);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result: Result<BTreeMap<String, f64>, _> = read_json_file(&dir.path().join("none.json"));
        assert!(matches!(result, Err(PersistenceError::Io(_))));
    }

    #[test]
    fn test_default_data_file_name() {
        let path = default_data_file();
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some(DATA_FILE_NAME));
    }
}
