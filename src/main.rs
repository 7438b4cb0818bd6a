use clap::Parser;
use iso7000_etl::utils::{logger, validation::Validate};
use iso7000_etl::{CliConfig, EtlEngine, IconPipeline, LocalStorage, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(cli.debug);
    tracing::debug!("CLI config: {:?}", cli);

    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(".".to_string());
    let engine = EtlEngine::new(IconPipeline::new(storage, settings));

    let result = if cli.pack_only {
        engine.pack_only().await
    } else {
        engine.run().await
    };

    match result {
        Ok(output_path) => {
            println!("✅ ISO 7000 icons packed into {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Pipeline failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            std::process::exit(e.severity().exit_code());
        }
    }

    Ok(())
}
