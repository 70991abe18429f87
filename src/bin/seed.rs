use clap::Parser;
use sauna_directory::config::cli::{LogFormat, SeedCli};
use sauna_directory::config::{load_file_config, settings::load_env_files};
use sauna_directory::core::SeedReport;
use sauna_directory::utils::{logger, validation::Validate};
use sauna_directory::{
    DatabaseSettings, DirectoryError, LocalStorage, MemoryStore, MongoStore, SeedConfig, Seeder,
};

#[tokio::main]
async fn main() {
    let args = SeedCli::parse();

    match args.log_format {
        LogFormat::Compact => logger::init_cli_logger(args.verbose),
        LogFormat::Json => logger::init_json_logger(),
    }

    tracing::info!("🚀 Starting sauna-seed");

    if let Err(e) = run(args).await {
        tracing::error!(
            "❌ Error seeding database: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }
}

async fn run(args: SeedCli) -> Result<(), DirectoryError> {
    load_env_files();
    let file_config = load_file_config(args.config.as_deref())?;
    let config = SeedConfig::resolve(args.data_dir, &file_config);
    config.validate()?;

    let seeder = Seeder::new_with_monitoring(LocalStorage::new("."), config, args.monitor);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - seeding an in-memory store");
        let store = MemoryStore::new();
        let report = seeder.run(&store).await?;
        print_report(&report, true);
        return Ok(());
    }

    // 缺少連線字串時在連線前即中止
    let settings = DatabaseSettings::resolve(args.database, &file_config)?;
    let store = MongoStore::connect(&settings.uri, settings.database.as_deref()).await?;

    let result = seeder.run(&store).await;
    // 成功或失敗都要關閉連線
    store.close().await;

    let report = result?;
    print_report(&report, false);
    Ok(())
}

fn print_report(report: &SeedReport, dry_run: bool) {
    if dry_run {
        println!("🔍 Dry run complete (nothing written to the database)");
    } else {
        println!("✅ Database seeded successfully");
    }
    println!("  Provinces: {}", report.provinces);
    println!(
        "  Cities:    {} of {} ({} merged by slug)",
        report.cities_seeded, report.cities_attempted, report.cities_merged
    );
    println!(
        "  Saunas:    {} of {}",
        report.saunas_seeded, report.saunas_attempted
    );
}
