use anyhow::Context;
use clap::Parser;
use sauna_directory::config::cli::{LookupCli, LookupQuery};
use sauna_directory::config::{load_file_config, settings::load_env_files};
use sauna_directory::utils::logger;
use sauna_directory::{DatabaseSettings, DirectoryLookup, MongoStore};
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = LookupCli::parse();
    logger::init_cli_logger(args.verbose);

    load_env_files();
    let file_config = load_file_config(args.config.as_deref())?;
    let settings = DatabaseSettings::resolve(args.database.clone(), &file_config)?;
    let store = MongoStore::connect(&settings.uri, settings.database.as_deref())
        .await
        .context("connecting to MongoDB")?;

    let output = query(&DirectoryLookup::new(&store), &args.query).await;
    store.close().await;

    match output? {
        Some(json) => {
            println!("{}", json);
            Ok(())
        }
        None => {
            eprintln!("Not found: {:?}", args.query);
            std::process::exit(4);
        }
    }
}

fn render<T: Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string_pretty(value).context("rendering JSON")
}

async fn query(lookup: &DirectoryLookup<'_>, query: &LookupQuery) -> anyhow::Result<Option<String>> {
    let json = match query {
        LookupQuery::Provinces => Some(render(&lookup.provinces().await?)?),
        LookupQuery::Province { slug } => lookup.province(slug).await?.map(|p| render(&p)).transpose()?,
        LookupQuery::Cities { province_slug } => Some(render(&lookup.cities(province_slug).await?)?),
        LookupQuery::City { slug } => lookup.city(slug).await?.map(|c| render(&c)).transpose()?,
        LookupQuery::Saunas { city_slug } => Some(render(&lookup.saunas(city_slug).await?)?),
        LookupQuery::Sauna { id } => lookup
            .sauna(id)
            .await
            .with_context(|| format!("looking up sauna {}", id))?
            .map(|s| render(&s))
            .transpose()?,
    };
    Ok(json)
}
