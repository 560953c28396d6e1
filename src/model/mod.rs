//! 库的核心数据模型。

pub mod generic;
pub mod track;
