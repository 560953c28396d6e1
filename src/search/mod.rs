//! 综合搜索的编排逻辑。
//!
//! 先发起一次综合搜索拿到按相关度排序的资源引用，
//! 再按引用类型并发取回各自的详情，结果保持引用的相对顺序。

use futures::future::{BoxFuture, join_all};
use tracing::{debug, warn};

use crate::{
    error::Result,
    model::{generic::CatalogEntry, track::Track},
    providers::apple_music::AppleMusicClient,
};

/// 用标题和艺术家做一次综合搜索，返回歌曲、专辑、艺术家混排的结果。
///
/// 关键词只取元数据中前两个非空的部分，过多的限定词反而会
/// 稀释相关度排序。未知类型的资源引用会被跳过；单个详情请求
/// 失败不影响其余条目。
pub async fn search(client: &AppleMusicClient, track: &Track<'_>) -> Result<Vec<CatalogEntry>> {
    let keyword = [track.title, track.artist, track.album]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .take(2)
        .collect::<Vec<&str>>()
        .join(" ");
    if keyword.is_empty() {
        return Ok(vec![]);
    }

    let refs = client.search_top(&keyword).await?;
    debug!("[搜索] '{keyword}' 返回 {} 条资源引用。", refs.len());

    let mut futures: Vec<BoxFuture<'_, Result<CatalogEntry>>> = Vec::with_capacity(refs.len());
    for resource_ref in &refs {
        let id = resource_ref.id.clone();
        match resource_ref.kind.as_str() {
            "songs" => futures.push(Box::pin(async move {
                client.get_song(&id).await.map(CatalogEntry::Song)
            })),
            "albums" => futures.push(Box::pin(async move {
                client.get_album(&id).await.map(CatalogEntry::Album)
            })),
            "artists" => futures.push(Box::pin(async move {
                client.get_artist(&id).await.map(CatalogEntry::Artist)
            })),
            other => {
                debug!("[搜索] 跳过未知类型的资源引用: {other} ({id})");
            }
        }
    }

    let entries = join_all(futures)
        .await
        .into_iter()
        .filter_map(|result| match result {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("[搜索] 获取条目详情失败: {e}");
                None
            }
        })
        .collect();

    Ok(entries)
}
