use anyhow::Result;
use dotenvy::dotenv;

use dme_lookup::config::{get_config, init_config};
use dme_lookup::runtime::run_server;
use dme_lookup::system::init_logging;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();

    // 配置先于日志：日志格式 / 级别来自配置
    init_config();
    let config = get_config();

    // guard 持有到进程结束，保证异步日志刷盘
    let _log_guard = init_logging(&config);

    run_server().await
}
