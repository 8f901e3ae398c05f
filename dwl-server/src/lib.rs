//! Direct Waste Link Server - 住户与回收商直连的回收预约服务
//!
//! # 架构概述
//!
//! - **预约** (`pickups`): 创建预约、回收商接单 (OPEN -> ASSIGNED)
//! - **匹配** (`matching`): 按材料筛选回收商，价格升序
//! - **账本** (`ledger`): 结算记录，`tx_id` 为规范 JSON 的 SHA-256
//! - **积分** (`rewards`): 按重量发放积分
//! - **识别** (`classify`): 远程 / 启发式 / 随机三级降级
//! - **HTTP API** (`api`): RESTful JSON 接口
//!
//! # 模块结构
//!
//! ```text
//! dwl-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # SQLite 连接池与仓储
//! ├── pickups/       # 预约调度、完整流程
//! ├── ledger/        # 账本哈希与结算
//! ├── classify/      # 图片识别
//! └── utils/         # 日志、校验
//! ```

pub mod api;
pub mod classify;
pub mod core;
pub mod db;
pub mod ledger;
pub mod matching;
pub mod pickups;
pub mod rewards;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use ledger::SettlementService;
pub use matching::CollectorDirectory;
pub use pickups::{PickupFlow, Scheduler};
pub use rewards::RewardService;
pub use utils::{AppError, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 加载 .env 并初始化日志
///
/// 日志配置来自环境变量 (见 [`Config`])，需在其他初始化之前调用。
pub fn setup_environment() -> Config {
    if let Err(e) = dotenv::dotenv() {
        // .env 可选
        eprintln!("No .env loaded: {e}");
    }
    let config = Config::from_env();
    // 生产环境总是输出 JSON
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json || config.is_production(),
        config.log_dir.as_deref(),
    );
    config
}

pub fn print_banner() {
    println!(
        r#"
 ____  __        __ _
|  _ \ \ \      / /| |
| | | | \ \ /\ / / | |
| |_| |  \ V  V /  | |___
|____/    \_/\_/   |_____|
   Direct Waste Link
    "#
    );
}
