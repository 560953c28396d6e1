//! 时间码规范化模块。
//!
//! 把多种不一致的时间文本统一为规范的 `MM:SS.fff`：
//!
//! - `47.243` -> `00:47.243`
//! - `04:24.638` -> `04:24.638`
//! - `1:2:3.4` -> `62:03.400`

use std::sync::LazyLock;

use regex::Regex;

use crate::converter::types::{ConvertError, TimeValue};

/// 匹配数字、小数点、冒号以外的所有字符。
static NON_TIME_CHARS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9.:]").expect("未能编译 NON_TIME_CHARS_REGEX"));

/// 将一个宽松格式的时间字符串解析为 [`TimeValue`]。
///
/// 先剔除数字、`.`、`:` 以外的字符，再按冒号分段：
/// 一段视为 `SS[.fff]`，两段视为 `MM:SS[.fff]`，
/// 三段视为 `HH:MM:SS[.fff]`（小时折算进分钟）。
/// 其它段数视为无效输入。
pub fn normalize(raw: &str) -> Result<TimeValue, ConvertError> {
    let sanitized = NON_TIME_CHARS_REGEX.replace_all(raw, "");
    let fields: Vec<&str> = sanitized.split(':').collect();

    let (hours, minutes, seconds_field) = match fields.as_slice() {
        [s] => (0, 0, *s),
        [m, s] => (0, parse_component(m, raw)?, *s),
        [h, m, s] => (parse_component(h, raw)?, parse_component(m, raw)?, *s),
        _ => {
            return Err(ConvertError::InvalidTime(format!(
                "时间字段数应为 1 到 3 个，实际为 {} 个: '{raw}'",
                fields.len()
            )));
        }
    };

    let (seconds_str, fraction) = match seconds_field.split_once('.') {
        Some((sec, frac)) => (sec, Some(frac)),
        None => (seconds_field, None),
    };
    let seconds = parse_component(seconds_str, raw)?;
    let milliseconds = match fraction {
        Some(frac) => parse_fraction(frac, raw)?,
        None => 0,
    };

    // 小时折算与秒进位在 u64 中完成，折算结果装不进 u32 分钟时报错而不是回绕
    let total_minutes = u64::from(hours) * 60 + u64::from(minutes) + u64::from(seconds) / 60;
    let total_minutes = u32::try_from(total_minutes)
        .map_err(|_| ConvertError::InvalidTime(format!("时间值超出可表示范围: '{raw}'")))?;

    Ok(TimeValue::new(total_minutes, seconds % 60, milliseconds))
}

/// 解析小数部分并按位数折算为毫秒。
///
/// 一位数字乘以 100（`.4` -> 400），两位乘以 10（`.45` -> 450），
/// 三位及以上只取前三位，直接截断不做四舍五入。
fn parse_fraction(fraction: &str, raw: &str) -> Result<u32, ConvertError> {
    if fraction.is_empty() {
        return Ok(0);
    }
    match fraction.len() {
        1 => Ok(parse_component(fraction, raw)? * 100),
        2 => Ok(parse_component(fraction, raw)? * 10),
        _ => parse_component(&fraction[..3], raw),
    }
}

fn parse_component(component: &str, raw: &str) -> Result<u32, ConvertError> {
    component
        .parse::<u32>()
        .map_err(|_| ConvertError::InvalidTime(format!("无法解析时间分量 '{component}': '{raw}'")))
}
