//! 输入校验：物品名称、数量与价格

use std::fmt;

use thiserror::Error;

/// 需要校验的数值字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Quantity,
    Price,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Quantity => f.write_str("数量"),
            Field::Price => f.write_str("价格"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("请输入物品名称！")]
    EmptyName,
    #[error("{0}必须为数字！")]
    NotANumber(Field),
    #[error("{0}必须为正数")]
    NotPositive(Field),
    #[error("{0}不能为负数")]
    Negative(Field),
}

/// 校验物品名称（调用方负责去除首尾空白）
pub fn check_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

/// 数值必须是有限数；NaN 与无穷大按“非数字”处理
pub fn check_finite(field: Field, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::NotANumber(field))
    }
}

/// 严格正数（添加物品时的数量与价格、任何时候的价格）
pub fn check_positive(field: Field, value: f64) -> Result<f64, ValidationError> {
    let value = check_finite(field, value)?;
    if value <= 0.0 {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(value)
}

/// 非负数（更新物品时的数量，允许清零）
pub fn check_non_negative(field: Field, value: f64) -> Result<f64, ValidationError> {
    let value = check_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::Negative(field));
    }
    Ok(value)
}

/// 将输入框文本解析为数值
pub fn parse_amount(field: Field, raw: &str) -> Result<f64, ValidationError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::NotANumber(field))?;
    check_finite(field, value)
}

/// 可选字段：空白输入表示“不修改”
pub fn parse_optional_amount(field: Field, raw: &str) -> Result<Option<f64>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_amount(field, raw).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_accepts_decimals_and_whitespace() {
        assert_eq!(parse_amount(Field::Quantity, " 12.5 "), Ok(12.5));
        assert_eq!(parse_amount(Field::Price, "3"), Ok(3.0));
    }

    #[test]
    fn test_parse_amount_rejects_text() {
        assert_eq!(
            parse_amount(Field::Quantity, "十个"),
            Err(ValidationError::NotANumber(Field::Quantity))
        );
        assert_eq!(
            parse_amount(Field::Price, ""),
            Err(ValidationError::NotANumber(Field::Price))
        );
    }

    #[test]
    fn test_parse_amount_rejects_non_finite() {
        for raw in ["nan", "inf", "-inf", "NaN"] {
            assert_eq!(
                parse_amount(Field::Price, raw),
                Err(ValidationError::NotANumber(Field::Price)),
                "{} 应该被视为非数字",
                raw
            );
        }
    }

    #[test]
    fn test_parse_optional_amount() {
        assert_eq!(parse_optional_amount(Field::Quantity, "   "), Ok(None));
        assert_eq!(parse_optional_amount(Field::Quantity, "0"), Ok(Some(0.0)));
        assert!(parse_optional_amount(Field::Quantity, "abc").is_err());
    }

    #[test]
    fn test_range_checks() {
        assert!(check_positive(Field::Quantity, 0.0).is_err());
        assert!(check_positive(Field::Price, -1.0).is_err());
        assert_eq!(check_positive(Field::Price, 0.01), Ok(0.01));
        assert_eq!(check_non_negative(Field::Quantity, 0.0), Ok(0.0));
        assert_eq!(
            check_non_negative(Field::Quantity, -1.0),
            Err(ValidationError::Negative(Field::Quantity))
        );
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(ValidationError::EmptyName.to_string(), "请输入物品名称！");
        assert_eq!(
            ValidationError::NotPositive(Field::Price).to_string(),
            "价格必须为正数"
        );
        assert_eq!(
            ValidationError::NotANumber(Field::Quantity).to_string(),
            "数量必须为数字！"
        );
    }
}
