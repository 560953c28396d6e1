//! 定义了歌词转码中使用的核心数据类型。

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

//=============================================================================
// 1. 错误枚举
//=============================================================================

/// 定义歌词转码过程中可能发生的各种错误。
#[derive(Error, Debug)]
pub enum ConvertError {
    /// TTML 文档本身无法解析为 XML 树，来自 `roxmltree` 库。
    #[error("TTML 解析失败: {0}")]
    Xml(#[from] roxmltree::Error),
    /// 文档能解析，但即使回退到非限定名查找也找不到 body 标签。
    #[error("在 TTML 中找不到 body 标签")]
    MissingBody,
    /// 无效的时间格式字符串。
    #[error("无效的时间格式: {0}")]
    InvalidTime(String),
    /// 字符串格式化错误。
    #[error("格式错误: {0}")]
    Format(#[from] fmt::Error),
    /// 内部逻辑错误或未明确分类的错误。
    #[error("错误: {0}")]
    Internal(String),
}

//=============================================================================
// 2. 时间值
//=============================================================================

/// 一个非负的歌词时间值。
///
/// 秒和毫秒始终通过进位规范化到合法区间，小时在构造时折算进分钟，
/// 因此分钟允许超过 59。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimeValue {
    /// 分钟数，不设上限。
    pub minutes: u32,
    /// 秒数，0 到 59。
    pub seconds: u32,
    /// 毫秒数，0 到 999。
    pub milliseconds: u32,
}

impl TimeValue {
    /// 由分、秒、毫秒构造一个时间值，溢出部分逐级进位。
    ///
    /// 进位在 `u64` 中完成，进位后分钟超出 `u32` 上限时饱和到上限。
    #[must_use]
    pub fn new(minutes: u32, seconds: u32, milliseconds: u32) -> Self {
        let seconds = u64::from(seconds) + u64::from(milliseconds / 1000);
        let milliseconds = milliseconds % 1000;
        let minutes = u64::from(minutes) + seconds / 60;
        let seconds = (seconds % 60) as u32;
        Self {
            minutes: u32::try_from(minutes).unwrap_or(u32::MAX),
            seconds,
            milliseconds,
        }
    }

    /// 返回总毫秒数。
    #[must_use]
    pub fn total_ms(&self) -> u64 {
        (u64::from(self.minutes) * 60 + u64::from(self.seconds)) * 1000
            + u64::from(self.milliseconds)
    }
}

impl fmt::Display for TimeValue {
    /// 格式化为规范的 `MM:SS.fff`，分钟至少补齐到两位。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}.{:03}",
            self.minutes, self.seconds, self.milliseconds
        )
    }
}

//=============================================================================
// 3. 歌词事件与文档
//=============================================================================

/// 文档的时间标记模式，对整个文档只判定一次。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimingMode {
    /// 每行都带起止时间戳的歌词。
    Timed,
    /// 被标记为无时间信息的歌词，按纯文本顺序输出。
    Untimed,
}

/// 按文档顺序产出的单个歌词事件。
///
/// 封闭的和类型，渲染端做穷尽匹配，
/// 取代了原始实现里用 `type` 字符串区分的字典。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LyricEvent {
    /// 结构性段落标记（主歌、副歌等），不携带时间。
    SectionMarker {
        /// 段落标签的原始文本。
        label: String,
    },
    /// 一行带起止时间的同步歌词。
    ///
    /// `text` 是该行所有后代文本的拼接结果，已去除首尾空白；
    /// 嵌套逐字 span 的各自时间会被丢弃，只保留行级起止时间。
    TimedLine {
        /// 行开始时间。
        begin: TimeValue,
        /// 行结束时间，保留在数据模型中但默认渲染不输出。
        end: TimeValue,
        /// 行文本，可能为空。
        text: String,
    },
    /// 一行不带时间的文本，仅出现在无时间标记模式。
    PlainLine {
        /// 行文本。
        text: String,
    },
}

/// 一次解析产出的完整歌词文档。
///
/// 事件顺序与文档顺序一致；文档与事件都是调用内的临时数据，
/// 渲染之后即可丢弃。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricDocument {
    /// 文档的时间标记模式。
    pub mode: TimingMode,
    /// 按文档顺序排列的歌词事件。
    pub events: Vec<LyricEvent>,
    /// 解析过程中产生的非致命警告，例如被跳过的无效时间戳行。
    pub warnings: Vec<String>,
}
