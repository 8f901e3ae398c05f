use std::path::PathBuf;
use std::sync::Arc;

use crate::classify::FallbackClassifier;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::ledger::SettlementService;
use crate::matching::CollectorDirectory;
use crate::pickups::{PickupFlow, Scheduler};
use crate::rewards::RewardService;

/// 服务器状态 - 所有处理器共享
///
/// 服务在启动时显式构造并注入同一个数据库连接池；克隆只复制 `Arc`/池句柄。
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub db: DbService,
    pub collectors: Arc<CollectorDirectory>,
    pub classifier: Arc<FallbackClassifier>,
    pub scheduler: Scheduler,
    pub settlement: SettlementService,
    pub rewards: RewardService,
    pub flow: PickupFlow,
}

impl ServerState {
    /// Wire the services around an already opened database
    pub fn new(
        config: Config,
        db: DbService,
        collectors: CollectorDirectory,
        classifier: FallbackClassifier,
    ) -> Self {
        let collectors = Arc::new(collectors);
        let pool = db.pool.clone();
        Self {
            scheduler: Scheduler::new(pool.clone()),
            settlement: SettlementService::new(pool.clone()),
            rewards: RewardService::new(pool.clone()),
            flow: PickupFlow::new(pool, collectors.clone()),
            classifier: Arc::new(classifier),
            collectors,
            db,
            config,
        }
    }

    /// 初始化服务器状态
    ///
    /// 1. 创建工作目录和上传目录
    /// 2. 打开数据库并执行迁移
    /// 3. 加载回收商列表
    /// 4. 组装分类器链
    pub async fn initialize(config: &Config) -> Result<Self> {
        tokio::fs::create_dir_all(&config.work_dir).await?;
        tokio::fs::create_dir_all(config.upload_dir()).await?;

        let db_path = config.database_path();
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let db_path = db_path
            .to_str()
            .ok_or_else(|| ServerError::Config(format!("Database path is not UTF-8: {}", db_path.display())))?;
        let db = DbService::open(db_path).await?;

        let collectors_file = config.collectors_file.as_ref().map(PathBuf::from);
        let collectors = CollectorDirectory::load(collectors_file.as_deref())?;

        let classifier = FallbackClassifier::standard(&config.gemini);
        tracing::info!(chain = ?classifier.names(), "Classifier chain ready");

        Ok(Self::new(config.clone(), db, collectors, classifier))
    }

    pub fn upload_dir(&self) -> PathBuf {
        self.config.upload_dir()
    }
}
