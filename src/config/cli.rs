use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "sauna-import")]
#[command(about = "Convert the sauna spreadsheet into provinces/cities/saunas JSON fixtures")]
pub struct ImportCli {
    /// Spreadsheet to read (.xlsx, .xls, .ods or .csv) [default: data/sauna-data.xlsx]
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Worksheet to read instead of the first one
    #[arg(long)]
    pub sheet: Option<String>,

    /// Directory the JSON files are written to [default: data]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Read and transform only; print what would be written
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log process CPU and memory between phases
    #[arg(long)]
    pub monitor: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "sauna-seed")]
#[command(about = "Replace the directory database contents with the JSON fixtures")]
pub struct SeedCli {
    /// Directory holding provinces.json, cities.json and saunas.json [default: data]
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,

    /// Database name; defaults to the one in the connection string
    #[arg(long)]
    pub database: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seed an in-memory store instead of the database
    #[arg(long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Log process CPU and memory between phases
    #[arg(long)]
    pub monitor: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Parser)]
#[command(name = "sauna-lookup")]
#[command(about = "Query the directory database the way the site pages do")]
pub struct LookupCli {
    #[command(subcommand)]
    pub query: LookupQuery,

    /// Database name; defaults to the one in the connection string
    #[arg(long, global = true)]
    pub database: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Subcommand)]
pub enum LookupQuery {
    /// All provinces, by name
    Provinces,
    /// One province by slug
    Province { slug: String },
    /// Cities of a province, by name
    Cities { province_slug: String },
    /// One city by slug
    City { slug: String },
    /// Saunas in a city, by name
    Saunas { city_slug: String },
    /// One sauna by id
    Sauna { id: String },
}
