use chrono::Local;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use log::{LevelFilter, info};
use usher_tools::{
    ClassifiedSheet, Colour, ListingsScraper, ScrapingContext, SheetsClient, TimetableReader,
    config::{LoadFromEnv, TimetableEnv},
    sheets_auth::ServiceAccountKey,
    timetable_reader::DEFAULT_RANGE,
};

#[derive(Parser)]
#[command(version, about = "Tools for the cinema's volunteer ushers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the ids of the films on the cinema's listings page
    Movies,
    /// Read the usher timetable and decode each cell's shift category
    Timetable {
        /// Worksheet to read; defaults to this month's and next month's
        #[arg(long = "sheet")]
        sheets: Vec<String>,
        /// Cell range to read, in A1 notation
        #[arg(long, default_value = DEFAULT_RANGE)]
        range: String,
    },
    /// Classify a background colour given as red, green and blue in [0, 1]
    Classify { red: f64, green: f64, blue: f64 },
}

async fn run_movies_job(ctx: &ScrapingContext) -> anyhow::Result<()> {
    let scraper = ListingsScraper::new(ctx.listings_env.listings_url.clone(), &ctx.request_client);
    for movie_id in scraper.scrape().await? {
        println!("{movie_id}");
    }
    Ok(())
}

async fn run_timetable_job(
    ctx: &ScrapingContext,
    sheet_names: Vec<String>,
    range: &str,
) -> anyhow::Result<()> {
    let timetable_env = TimetableEnv::load_from_env()?;
    let key = ServiceAccountKey::from_file(&timetable_env.credentials_json_path)?;
    let sheets_client =
        SheetsClient::connect(&ctx.request_client, &timetable_env.gft_timetable_url, &key).await?;
    let reader = TimetableReader::new(sheets_client, ctx.classifier.clone());

    let sheets = if sheet_names.is_empty() {
        reader
            .read_month_sheets(Local::now().date_naive(), range)
            .await?
    } else {
        reader.read_sheets(&sheet_names, range).await?
    };
    for sheet in &sheets {
        print_sheet(sheet);
    }
    Ok(())
}

fn print_sheet(sheet: &ClassifiedSheet) {
    println!("# {}", sheet.title);
    for cell in &sheet.cells {
        let Some(category) = &cell.category else {
            continue;
        };
        let category = match category {
            Ok(category) => category.to_string(),
            Err(_) => "?".to_string(),
        };
        println!("{}\t{}\t{}", cell.reference, category, cell.text);
    }
}

fn run_classify_job(ctx: &ScrapingContext, red: f64, green: f64, blue: f64) -> anyhow::Result<()> {
    let colour = Colour::new(red, green, blue)?;
    let category = ctx.classifier.classify(colour)?;
    println!("{category}");
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::Builder::new()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let ctx = ScrapingContext::new()?;
    info!("Classifying with tolerance {}", ctx.classifier.tolerance().get());

    match cli.command {
        Command::Movies => run_movies_job(&ctx).await,
        Command::Timetable { sheets, range } => run_timetable_job(&ctx, sheets, &range).await,
        Command::Classify { red, green, blue } => run_classify_job(&ctx, red, green, blue),
    }
}
