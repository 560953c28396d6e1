//! 负责处理应用的持久化配置。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

/// Apple Music 的配置项。
///
/// `authorization` 与 `media_user_token` 需要从已登录的网页会话中取得，
/// 两者为空时目录接口大多仍可访问，但逐字歌词接口会拒绝请求。
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppleMusicConfig {
    /// `Authorization` 请求头的完整值 (`Bearer ...`)。
    #[serde(default)]
    pub authorization: String,
    /// `music-user-token` 请求头的值。
    #[serde(default)]
    pub media_user_token: String,
    /// 响应本地化语言，作为 `l` 查询参数发送。
    #[serde(default = "default_language")]
    pub language: String,
    /// 目录所属的店面，拼接在目录接口路径中。
    #[serde(default = "default_storefront")]
    pub storefront: String,
}

fn default_language() -> String {
    "zh-Hans-CN".to_string()
}

fn default_storefront() -> String {
    "us".to_string()
}

impl Default for AppleMusicConfig {
    fn default() -> Self {
        Self {
            authorization: String::new(),
            media_user_token: String::new(),
            language: default_language(),
            storefront: default_storefront(),
        }
    }
}

/// 获取应用配置目录下指定文件的完整路径。
///
/// # 参数
/// * `filename` - 目标配置文件的名称，例如 "apple_music_config.json"。
pub(crate) fn get_config_file_path(filename: &str) -> Result<PathBuf, std::io::Error> {
    if let Some(mut config_dir) = dirs::config_dir() {
        config_dir.push("apple-music-api");
        fs::create_dir_all(&config_dir)?;
        config_dir.push(filename);
        Ok(config_dir)
    } else {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "无法找到用户配置目录",
        ))
    }
}

fn read_config(path: &Path) -> Result<AppleMusicConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn write_config(path: &Path, config: &AppleMusicConfig) -> Result<(), Box<dyn std::error::Error>> {
    fs::write(path, serde_json::to_string_pretty(config)?)?;
    Ok(())
}

/// 从文件加载 Apple Music 的配置。
pub fn load_config() -> Result<AppleMusicConfig, Box<dyn std::error::Error>> {
    let config_path = get_config_file_path("apple_music_config.json")?;
    let config = read_config(&config_path)?;
    info!("已从本地加载 Apple Music 配置。");
    Ok(config)
}

/// 将配置实例序列化为 JSON 并保存到文件。
pub fn save_config(config: &AppleMusicConfig) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = get_config_file_path("apple_music_config.json")?;
    write_config(&config_path, config)?;
    info!("Apple Music 配置已保存到本地。");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // 配置写入文件后能原样读回
    #[test]
    fn test_config_round_trip() {
        let mut path = std::env::temp_dir();
        path.push("apple_music_config_round_trip_test.json");

        let config = AppleMusicConfig {
            authorization: "Bearer test-token".to_string(),
            media_user_token: "user-token".to_string(),
            language: "ja-JP".to_string(),
            storefront: "jp".to_string(),
        };
        write_config(&path, &config).unwrap();
        let loaded = read_config(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded.authorization, "Bearer test-token");
        assert_eq!(loaded.media_user_token, "user-token");
        assert_eq!(loaded.language, "ja-JP");
        assert_eq!(loaded.storefront, "jp");
    }

    // 缺失字段在反序列化时取各自的默认值
    #[test]
    fn test_config_missing_fields_take_defaults() {
        let config: AppleMusicConfig = serde_json::from_str("{}").unwrap();

        assert!(config.authorization.is_empty());
        assert!(config.media_user_token.is_empty());
        assert_eq!(config.language, "zh-Hans-CN");
        assert_eq!(config.storefront, "us");
    }
}
