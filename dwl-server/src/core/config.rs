use std::path::PathBuf;
use std::time::Duration;

use crate::classify::{DEFAULT_ENDPOINT, DEFAULT_MODEL, GeminiConfig};

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 (数据库、上传图片) |
/// | DATABASE_PATH | {WORK_DIR}/dwl.db | SQLite 数据库文件 |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | LOG_LEVEL | info | 日志级别 (`RUST_LOG` 优先) |
/// | LOG_DIR | (unset) | 日志目录，未设置时输出到 stdout |
/// | LOG_JSON | false | JSON 日志格式 |
/// | GEMINI_API_KEY | (unset) | 远程分类服务密钥，未设置时只用本地分类 |
/// | GEMINI_MODEL | gemini-1.5-flash | 模型名称 |
/// | GEMINI_ENDPOINT | https://generativelanguage.googleapis.com | 服务地址 |
/// | CLASSIFY_TIMEOUT_MS | 15000 | 远程分类超时(毫秒) |
/// | COLLECTORS_FILE | (unset) | 回收商 JSON 列表，未设置时使用内置列表 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/dwl HTTP_PORT=8080 cargo run -p dwl-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录
    pub work_dir: String,
    /// 数据库文件路径；`None` 时位于工作目录下
    pub database_path: Option<String>,
    /// HTTP API 服务端口
    pub http_port: u16,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub log_json: bool,
    /// 远程分类配置
    pub gemini: GeminiConfig,
    /// 回收商列表文件
    pub collectors_file: Option<String>,
    /// 运行环境: development | staging | production
    pub environment: String,
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: env_opt("WORK_DIR").unwrap_or_else(|| "./data".into()),
            database_path: env_opt("DATABASE_PATH"),
            http_port: env_opt("HTTP_PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: env_opt("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: env_opt("LOG_DIR"),
            log_json: env_opt("LOG_JSON")
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            gemini: GeminiConfig {
                api_key: env_opt("GEMINI_API_KEY"),
                model: env_opt("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
                endpoint: env_opt("GEMINI_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.into()),
                timeout: Duration::from_millis(
                    env_opt("CLASSIFY_TIMEOUT_MS")
                        .and_then(|v| v.parse().ok())
                        .unwrap_or(15000),
                ),
            },
            collectors_file: env_opt("COLLECTORS_FILE"),
            environment: env_opt("ENVIRONMENT").unwrap_or_else(|| "development".into()),
        }
    }

    /// 测试配置：临时工作目录，不读取环境变量
    pub fn for_work_dir(work_dir: impl Into<String>) -> Self {
        Self {
            work_dir: work_dir.into(),
            database_path: None,
            http_port: 0,
            log_level: "info".into(),
            log_dir: None,
            log_json: false,
            gemini: GeminiConfig::default(),
            collectors_file: None,
            environment: "development".into(),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        match &self.database_path {
            Some(p) => PathBuf::from(p),
            None => PathBuf::from(&self.work_dir).join("dwl.db"),
        }
    }

    /// 上传图片目录 (classify 的 photo_ref 相对于此目录)
    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("uploads")
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
