//! 汇集各种歌词源格式的解析器。

pub mod ttml_parser;
