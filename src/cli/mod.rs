use crate::{
    config::{parse_bind_addr, Config},
    core::ItineraryParameters,
    server,
    types::{deserialize_structured_response, Itinerary},
};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn provider_args() -> [Arg; 5] {
    [
        Arg::new("api-key")
            .short('k')
            .long("api-key")
            .value_name("KEY")
            .global(true)
            .help("Completion provider API key (or set OPENAI_API_KEY env var)"),
        Arg::new("base-url")
            .short('u')
            .long("base-url")
            .value_name("URL")
            .global(true)
            .help("OpenAI-compatible base URL (or set OPENAI_BASE_URL env var)"),
        Arg::new("model")
            .short('m')
            .long("model")
            .value_name("MODEL")
            .global(true)
            .help("Model identifier (or set OPENAI_MODEL env var)"),
        Arg::new("timeout")
            .short('t')
            .long("timeout")
            .value_name("SECONDS")
            .global(true)
            .help("Outbound request timeout in seconds (transport default when unset)"),
        Arg::new("validate-schema")
            .long("validate-schema")
            .action(ArgAction::SetTrue)
            .global(true)
            .help("Reject provider output that does not match the itinerary schema"),
    ]
}

fn command() -> Command {
    Command::new("local-living")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Local Living Maldives itinerary endpoint backed by an LLM completion API")
        .subcommand_required(true)
        .args(provider_args())
        .subcommand(
            Command::new("serve")
                .about("Run the HTTP itinerary endpoint")
                .arg(
                    Arg::new("bind")
                        .short('b')
                        .long("bind")
                        .value_name("ADDR")
                        .help("Listen address (or set BIND_ADDR / PORT env vars)"),
                )
                .arg(
                    Arg::new("allowed-origin")
                        .long("allowed-origin")
                        .value_name("ORIGIN")
                        .help("Access-Control-Allow-Origin value (or set ALLOWED_ORIGIN env var)"),
                ),
        )
        .subcommand(
            Command::new("plan")
                .about("Compose a single itinerary and print it")
                .arg(
                    Arg::new("request")
                        .help("Free-text travel request")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("style")
                        .short('s')
                        .long("style")
                        .value_name("STYLE")
                        .help("Budget, Adventurous, Photography, Culture, Auto or free text"),
                )
                .arg(
                    Arg::new("summary")
                        .long("summary")
                        .action(ArgAction::SetTrue)
                        .help("Print a readable summary instead of raw JSON"),
                ),
        )
}

/// Overlay command-line flags on the environment configuration.
///
/// Takes the subcommand matches; global provider flags are visible there.
fn load_config(matches: &ArgMatches) -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();
    let api_key = matches.get_one::<String>("api-key").cloned();

    let mut config = match api_key {
        Some(key) => Config::from_lookup(|name| match name {
            "OPENAI_API_KEY" => Some(key.clone()),
            other => std::env::var(other).ok(),
        })?,
        None => Config::from_env()?,
    };

    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.base_url = base_url.clone();
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config.model = model.clone();
    }
    if let Some(timeout) = matches.get_one::<String>("timeout") {
        config.timeout = Some(Duration::from_secs(timeout.parse()?));
    }
    if matches.get_flag("validate-schema") {
        config.validate_schema = true;
    }

    Ok(config)
}

/// CLI entry point for the local-living binary
pub async fn run() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    let matches = command().get_matches();
    let Some((name, sub)) = matches.subcommand() else {
        return Ok(());
    };
    let mut config = load_config(sub)?;

    match name {
        "serve" => {
            if let Some(bind) = sub.get_one::<String>("bind") {
                config.bind_addr = parse_bind_addr(bind)?;
            }
            if let Some(origin) = sub.get_one::<String>("allowed-origin") {
                config.allowed_origin = origin.clone();
            }
            config.validate()?;
            server::run_serve(&config).await
        }
        "plan" => {
            config.validate()?;
            plan(&config, sub).await
        }
        _ => Ok(()),
    }
}

async fn plan(config: &Config, matches: &ArgMatches) -> anyhow::Result<()> {
    let request = matches
        .get_one::<String>("request")
        .cloned()
        .unwrap_or_default();
    let style = matches.get_one::<String>("style").cloned();
    let params = ItineraryParameters::new(request, style);

    info!("Using model: {}", config.model);
    info!("Base URL: {}", config.base_url);

    let composer = config.build_composer();
    let itinerary = match composer.compose(&params).await {
        Ok(itinerary) => itinerary,
        Err(e) => {
            error!("Itinerary composition failed: {}", e);
            return Err(e.into());
        }
    };

    if !matches.get_flag("summary") {
        println!("{}", serde_json::to_string_pretty(&itinerary)?);
        return Ok(());
    }

    let summary: Itinerary = deserialize_structured_response(&itinerary)?;
    println!("{} ({} days, {})", summary.title, summary.trip_length_days, summary.style_used);
    println!("Stay: {} on {} [{}]", summary.hotel_name, summary.island, summary.price_level);
    println!("\nItinerary:");
    for day in &summary.days {
        println!("  {} - {}", day.title, day.desc);
    }
    if !summary.transfers.is_empty() {
        println!("\nTransfers:");
        for transfer in &summary.transfers {
            println!(
                "  {} {} ({})",
                display_value(&transfer.day),
                transfer.route,
                transfer.mode
            );
        }
    }
    println!(
        "\nEstimated cost: {:.0} {} per person",
        summary.estimated_cost.approx_total_per_person, summary.estimated_cost.currency
    );
    for item in &summary.estimated_cost.breakdown {
        println!("  {}: {}", item.label, display_value(&item.amount));
    }
    println!("\nMap: {}", summary.map_query);

    Ok(())
}

fn display_value(value: &serde_json::Value) -> String {
    value
        .as_str()
        .map(str::to_string)
        .unwrap_or_else(|| value.to_string())
}
