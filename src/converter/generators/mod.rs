//! 汇集各种歌词目标格式的生成器。

pub mod lrc_generator;
