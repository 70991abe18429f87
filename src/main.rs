use clap::Parser;
use sauna_directory::config::cli::{ImportCli, LogFormat};
use sauna_directory::config::load_file_config;
use sauna_directory::core::DirectoryDataset;
use sauna_directory::utils::{logger, validation::Validate};
use sauna_directory::{DirectoryError, EtlEngine, ImportConfig, ImportPipeline, LocalStorage};

#[tokio::main]
async fn main() {
    let args = ImportCli::parse();

    // 初始化日誌
    match args.log_format {
        LogFormat::Compact => logger::init_cli_logger(args.verbose),
        LogFormat::Json => logger::init_json_logger(),
    }

    tracing::info!("Starting sauna-import");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    if let Err(e) = run(args).await {
        report_failure(&e);
        std::process::exit(e.exit_code());
    }
}

async fn run(args: ImportCli) -> Result<(), DirectoryError> {
    let file_config = load_file_config(args.config.as_deref())?;
    let config = ImportConfig::resolve(args.input, args.sheet, args.output_dir, &file_config);

    // 驗證配置
    config.validate()?;

    if args.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(".");
    let pipeline = ImportPipeline::new(storage, config.clone());
    let engine = EtlEngine::new_with_monitoring(pipeline, args.monitor);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no files will be written");
        let dataset = engine.preview().await?;
        print_dry_run(&config, &dataset);
        return Ok(());
    }

    let summary = engine.run().await?;
    println!("✅ Import completed successfully!");
    println!("📁 Output saved to: {}", summary.output_dir);
    println!("  provinces.json: {} provinces", summary.provinces);
    println!("  cities.json:    {} cities", summary.cities);
    println!("  saunas.json:    {} saunas", summary.saunas);
    if summary.rows_dropped > 0 {
        println!("⚠️  {} rows skipped for missing required data", summary.rows_dropped);
    }

    Ok(())
}

fn print_dry_run(config: &ImportConfig, dataset: &DirectoryDataset) {
    println!("🔍 Dry Run Analysis:");
    println!("  Input: {}", config.input.display());
    if let Some(sheet) = &config.sheet {
        println!("  Worksheet: {}", sheet);
    }
    println!("  Rows read: {}", dataset.rows_read);
    println!("  Rows dropped: {}", dataset.rows_dropped);
    println!();
    println!("💾 Would write to {}:", config.output_dir.display());
    println!("  provinces.json: {} provinces", dataset.provinces.len());
    for province in &dataset.provinces {
        println!(
            "    {} ({}): {} cities, {} saunas",
            province.name, province.slug, province.city_count, province.sauna_count
        );
    }
    println!("  cities.json:    {} cities", dataset.cities.len());
    println!("  saunas.json:    {} saunas", dataset.saunas.len());
}

fn report_failure(e: &DirectoryError) {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Import failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    // 輸出用戶友好的錯誤信息
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}
