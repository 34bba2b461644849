use cgi_fetch::utils::{logger, validation::Validate};
use cgi_fetch::{
    bust_cache, CliConfig, FetchError, FetchGateway, PollControl, Poller, ReqwestTransport,
    RunPlan,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    // 解析並驗證配置
    let plan = match config.resolve().and_then(|plan| plan.validate().map(|_| plan)) {
        Ok(plan) => plan,
        Err(e) => exit_with(e),
    };

    let gateway = match FetchGateway::from_config(&plan.settings) {
        Ok(gateway) => gateway,
        Err(e) => exit_with(e),
    };

    let result = if plan.watch {
        watch(gateway, &plan).await
    } else {
        fetch_once(&gateway, &plan).await
    };

    match result {
        Ok(()) | Err(FetchError::Cancelled) => Ok(()),
        Err(e) => exit_with(e),
    }
}

async fn fetch_once(gateway: &FetchGateway<ReqwestTransport>, plan: &RunPlan) -> cgi_fetch::Result<()> {
    let url = if plan.settings.cache_bust {
        bust_cache(&plan.request.url)
    } else {
        plan.request.url.clone()
    };

    let body = match plan.settings.timeout_ms {
        Some(timeout_ms) => {
            gateway
                .fetch_text_with_timeout(&url, &plan.request.action, timeout_ms)
                .await?
        }
        None => gateway.fetch_text(&url, &plan.request.action).await?,
    };

    print!("{}", body);
    Ok(())
}

async fn watch(gateway: FetchGateway<ReqwestTransport>, plan: &RunPlan) -> cgi_fetch::Result<()> {
    let poller = Poller::from_config(gateway, &plan.settings);

    // Ctrl-C 取消輪詢
    let token = poller.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupted, stopping");
            token.cancel();
        }
    });

    tracing::info!(
        "Polling {} every {}ms",
        plan.request.url,
        plan.settings.poll_interval_ms
    );

    let summary = poller
        .poll(&plan.request.url, &plan.request.action, |result| {
            match result {
                Ok(body) => println!("{}", body),
                Err(e) => tracing::warn!("{}", e),
            }
            PollControl::Continue
        })
        .await?;

    tracing::info!(
        "Finished after {} attempts ({} ok, {} failed)",
        summary.attempts,
        summary.successes,
        summary.failures
    );
    Ok(())
}

fn exit_with(e: FetchError) -> ! {
    tracing::error!("❌ {} (status: {:?})", e, e.status());
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e);
    std::process::exit(e.exit_code());
}
