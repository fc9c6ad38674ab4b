mod error;
mod paths;
mod render;

use std::fs::File;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clap::Subcommand;
use contracts_lib::ContractsClient;
use contracts_lib::api::ContractQuery;
use contracts_lib::auth::StaticTokenProvider;
use contracts_lib::config::Environment;
use contracts_lib::model::Contract;
use contracts_lib::model::ContractDetail;
use contracts_lib::model::ContractStats;
use contracts_lib::model::ContractStatus;
use contracts_lib::model::contract_columns;
use contracts_lib::model::contract_filters;
use contracts_lib::model::contract_pagination;
use contracts_lib::model::format;
use contracts_lib::table::TableView;
use log::debug;
use log::info;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;

use crate::error::CliError;

#[derive(Parser)]
#[command(name = "contracts", about = "Browse contracts from the ERP contracts API")]
struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the contracts API. Overrides API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Bearer token sent with API requests.
    #[arg(long, env = "API_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List contracts, one page at a time.
    List {
        /// Read contracts from a JSON file instead of the API.
        #[arg(long)]
        file: Option<PathBuf>,
        /// Only contracts in this status (e.g. activo, pendiente_firma).
        #[arg(long)]
        status: Option<String>,
        /// Only contracts ending on this date (YYYY-MM-DD).
        #[arg(long)]
        end_date: Option<String>,
        /// Case-insensitive text matched against number and title.
        #[arg(long)]
        search: Option<String>,
        /// Column to sort by (id, titulo, estado, fecha_inicio, fecha_fin, valor).
        #[arg(long)]
        sort: Option<String>,
        /// Sort descending.
        #[arg(long, requires = "sort")]
        desc: bool,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Show one contract.
    Show {
        id: String,
        #[arg(long)]
        file: Option<PathBuf>,
        /// Show the status history tab.
        #[arg(long)]
        history: bool,
    },
    /// Print contract counts by status.
    Stats {
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

fn init_logging(verbose: bool) {
    let Some(path) = paths::log_file() else { return };
    if let Some(dir) = path.parent() {
        if std::fs::create_dir_all(dir).is_err() {
            return;
        }
    }
    paths::rotate_logs();
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(level, Config::default(), file);
    }
}

fn read_contracts(path: &Path) -> Result<Vec<Contract>, CliError> {
    let text = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let contracts: Vec<Contract> =
        serde_json::from_str(&text).map_err(|source| CliError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    info!("Loaded {} contracts from {}", contracts.len(), path.display());
    Ok(contracts)
}

fn client(cli: &Cli) -> Result<ContractsClient, CliError> {
    let mut env = Environment::from_env()?;
    if let Some(url) = &cli.api_url {
        env = env.with_api_url(url.clone());
    }
    debug!("Using contracts API at {}", env.api_url);
    let builder = ContractsClient::builder().url(env.api_url);
    let builder = match &cli.token {
        Some(token) => builder.token_provider(StaticTokenProvider::new(token.clone())),
        None => builder,
    };
    Ok(builder.build())
}

fn parse_status(status: Option<&str>) -> Result<Option<ContractStatus>, CliError> {
    match status.filter(|s| !s.is_empty()) {
        Some(s) => ContractStatus::parse(s)
            .map(Some)
            .ok_or_else(|| CliError::InvalidStatus(s.to_string())),
        None => Ok(None),
    }
}

fn parse_end_date(date: Option<&str>) -> Result<Option<&str>, CliError> {
    match date.filter(|d| !d.is_empty()) {
        Some(d) if format::is_valid_date(d) => Ok(Some(d)),
        Some(d) => Err(CliError::InvalidDate(d.to_string())),
        None => Ok(None),
    }
}

struct ListArgs<'a> {
    file: Option<&'a Path>,
    status: Option<&'a str>,
    end_date: Option<&'a str>,
    search: Option<&'a str>,
    sort: Option<&'a str>,
    desc: bool,
    page: usize,
    page_size: Option<usize>,
}

async fn list(cli: &Cli, args: ListArgs<'_>) -> Result<String, CliError> {
    let status = parse_status(args.status)?;
    let end_date = parse_end_date(args.end_date)?;

    let mut query = ContractQuery::new();
    if let Some(status) = status {
        query = query.status(status);
    }
    if let Some(date) = end_date {
        query = query.end_date(date);
    }
    if let Some(text) = args.search {
        query = query.search(text);
    }

    let contracts = match args.file {
        Some(path) => query.apply_search(read_contracts(path)?),
        None => client(cli)?.list(&query).await?,
    };

    let mut view = TableView::new(contract_columns())
        .with_pagination(contract_pagination())
        .with_filters(contract_filters(
            status.map(|s| s.as_str()),
            end_date,
        ))
        .with_data(contracts.iter().map(Contract::to_record).collect());

    if let Some(field) = args.sort {
        let presses = if args.desc { 2 } else { 1 };
        for _ in 0..presses {
            let event = view
                .handle_sort(field)
                .ok_or_else(|| CliError::NotSortable(field.to_string()))?;
            if let Ok(json) = serde_json::to_string(&event.sorter) {
                debug!("Sort changed: {}", json);
            }
        }
    }

    let page_size = args.page_size.unwrap_or_else(|| view.page_size());
    let event = view.handle_page_change(args.page, page_size);
    debug!(
        "Showing page {} ({} rows)",
        args.page,
        event.extra.current_data_source.len()
    );

    Ok(render::contract_list(&view))
}

async fn show(cli: &Cli, id: &str, file: Option<&Path>, history: bool) -> Result<String, CliError> {
    let contract = match file {
        Some(path) => read_contracts(path)?
            .into_iter()
            .find(|c| c.id == id)
            .ok_or_else(|| CliError::NotFound(id.to_string()))?,
        None => client(cli)?.get(id).await?,
    };
    let mut detail = ContractDetail::new(contract);
    if history {
        detail.select_tab("history");
    }
    Ok(render::contract_detail(&detail))
}

async fn stats(cli: &Cli, file: Option<&Path>) -> Result<String, CliError> {
    let stats = match file {
        Some(path) => ContractStats::from_contracts(&read_contracts(path)?),
        None => client(cli)?.stats().await?,
    };
    Ok(render::stats(&stats))
}

async fn run(cli: &Cli) -> Result<String, CliError> {
    match &cli.command {
        Command::List {
            file,
            status,
            end_date,
            search,
            sort,
            desc,
            page,
            page_size,
        } => {
            let args = ListArgs {
                file: file.as_deref(),
                status: status.as_deref(),
                end_date: end_date.as_deref(),
                search: search.as_deref(),
                sort: sort.as_deref(),
                desc: *desc,
                page: *page,
                page_size: *page_size,
            };
            list(cli, args).await
        }
        Command::Show { id, file, history } => show(cli, id, file.as_deref(), *history).await,
        Command::Stats { file } => stats(cli, file.as_deref()).await,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
