//! 定义了与搜索功能相关的输入数据结构。

/// 代表一个可搜索的歌曲元数据，用作搜索函数的输入参数。
#[derive(Default, Debug, Clone)]
pub struct Track<'a> {
    /// 歌曲标题。
    pub title: Option<&'a str>,
    /// 艺术家名。
    pub artist: Option<&'a str>,
    /// 专辑名。
    pub album: Option<&'a str>,
}

impl Track<'_> {
    /// 把标题、艺术家、专辑中非空的部分拼为一个搜索关键词。
    #[must_use]
    pub fn keyword(&self) -> String {
        [self.title, self.artist, self.album]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<&str>>()
            .join(" ")
    }
}
