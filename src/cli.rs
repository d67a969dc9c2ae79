//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::html_report_adapter::HtmlReportAdapter;
use crate::domain::dashboard::Dashboard;
use crate::domain::error::DashboardError;
use crate::domain::sales;
use crate::domain::segmentation;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "retaildash", about = "Retail sales dashboard renderer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a dashboard HTML page from the CSV inputs
    Render {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        sales: Option<PathBuf>,
        #[arg(long)]
        segmentation: Option<PathBuf>,
        #[arg(long)]
        forecast: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check the supplied inputs against the expected column schemas
    Validate {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        sales: Option<PathBuf>,
        #[arg(long)]
        segmentation: Option<PathBuf>,
        #[arg(long)]
        forecast: Option<PathBuf>,
    },
    /// Print summary statistics for the supplied inputs
    Info {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        sales: Option<PathBuf>,
        #[arg(long)]
        segmentation: Option<PathBuf>,
        #[arg(long)]
        forecast: Option<PathBuf>,
    },
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Render {
            config,
            sales,
            segmentation,
            forecast,
            output,
        } => run_render(
            config.as_ref(),
            sales,
            segmentation,
            forecast,
            output.as_ref(),
        ),
        Command::Validate {
            config,
            sales,
            segmentation,
            forecast,
        } => run_validate(config.as_ref(), sales, segmentation, forecast),
        Command::Info {
            config,
            sales,
            segmentation,
            forecast,
        } => run_info(config.as_ref(), sales, segmentation, forecast),
        Command::Serve { config } => run_serve(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = DashboardError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// A flag wins over the config file's `[inputs]` key of the same name.
pub fn resolve_input(
    flag: Option<PathBuf>,
    config: Option<&dyn ConfigPort>,
    key: &str,
) -> Option<PathBuf> {
    flag.or_else(|| {
        config
            .and_then(|c| c.get_string("inputs", key))
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
    })
}

pub fn resolve_output(flag: Option<&PathBuf>, config: Option<&dyn ConfigPort>) -> String {
    flag.map(|p| p.display().to_string())
        .or_else(|| config.and_then(|c| c.get_string("report", "output")))
        .unwrap_or_else(|| "dashboard.html".to_string())
}

/// Load whatever inputs are present, assemble the dashboard, write the page.
pub fn render_pipeline(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    output_path: &str,
) -> Result<(), DashboardError> {
    let sales = data_port.load_sales()?;
    let segmentation = data_port.load_segmentation()?;
    let forecast = data_port.load_forecast()?;

    if let Some(records) = &sales {
        eprintln!("Loaded {} sales rows", records.len());
    }
    if let Some(records) = &segmentation {
        eprintln!("Loaded {} segmentation rows", records.len());
    }
    if let Some(records) = &forecast {
        eprintln!("Loaded {} forecast rows", records.len());
    }

    let dashboard = Dashboard::build(sales, segmentation, forecast);
    if dashboard.is_empty() {
        eprintln!("warning: no inputs supplied; the page will contain no views");
    }

    report_port.write(&dashboard, output_path)
}

struct ResolvedInputs {
    sales: Option<PathBuf>,
    segmentation: Option<PathBuf>,
    forecast: Option<PathBuf>,
}

fn resolve_all(
    config: Option<&FileConfigAdapter>,
    sales: Option<PathBuf>,
    segmentation: Option<PathBuf>,
    forecast: Option<PathBuf>,
) -> ResolvedInputs {
    let config = config.map(|c| c as &dyn ConfigPort);
    ResolvedInputs {
        sales: resolve_input(sales, config, "sales"),
        segmentation: resolve_input(segmentation, config, "segmentation"),
        forecast: resolve_input(forecast, config, "forecast"),
    }
}

fn load_optional_config(path: Option<&PathBuf>) -> Result<Option<FileConfigAdapter>, ExitCode> {
    match path {
        Some(p) => {
            eprintln!("Loading config from {}", p.display());
            load_config(p).map(Some)
        }
        None => Ok(None),
    }
}

fn run_render(
    config_path: Option<&PathBuf>,
    sales: Option<PathBuf>,
    segmentation: Option<PathBuf>,
    forecast: Option<PathBuf>,
    output: Option<&PathBuf>,
) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let inputs = resolve_all(config.as_ref(), sales, segmentation, forecast);
    let output = resolve_output(output, config.as_ref().map(|c| c as &dyn ConfigPort));

    let data_port = CsvAdapter::new(inputs.sales, inputs.segmentation, inputs.forecast);
    let report_port = HtmlReportAdapter::new();

    match render_pipeline(&data_port, &report_port, &output) {
        Ok(()) => {
            eprintln!("Dashboard written to: {output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(
    config_path: Option<&PathBuf>,
    sales: Option<PathBuf>,
    segmentation: Option<PathBuf>,
    forecast: Option<PathBuf>,
) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let inputs = resolve_all(config.as_ref(), sales, segmentation, forecast);
    if inputs.sales.is_none() && inputs.segmentation.is_none() && inputs.forecast.is_none() {
        eprintln!("error: no input files supplied");
        return ExitCode::from(2);
    }

    let data_port = CsvAdapter::new(inputs.sales, inputs.segmentation, inputs.forecast);

    let checks = [
        ("sales", data_port.load_sales().map(|r| r.map(|v| v.len()))),
        (
            "segmentation",
            data_port.load_segmentation().map(|r| r.map(|v| v.len())),
        ),
        (
            "forecast",
            data_port.load_forecast().map(|r| r.map(|v| v.len())),
        ),
    ];

    for (name, outcome) in checks {
        match outcome {
            Ok(Some(rows)) => eprintln!("{name}: ok ({rows} rows)"),
            Ok(None) => eprintln!("{name}: not supplied"),
            Err(e) => {
                eprintln!("{name}: error: {e}");
                return (&e).into();
            }
        }
    }

    eprintln!("All supplied inputs are valid.");
    ExitCode::SUCCESS
}

fn run_info(
    config_path: Option<&PathBuf>,
    sales: Option<PathBuf>,
    segmentation: Option<PathBuf>,
    forecast: Option<PathBuf>,
) -> ExitCode {
    let config = match load_optional_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let inputs = resolve_all(config.as_ref(), sales, segmentation, forecast);
    let data_port = CsvAdapter::new(inputs.sales, inputs.segmentation, inputs.forecast);

    match data_port.load_sales() {
        Ok(Some(records)) => {
            let daily = sales::daily_revenue(&records);
            let total: f64 = daily.iter().map(|(_, t)| t).sum();
            let products = sales::top_products(&records, usize::MAX);
            eprintln!("sales: {} rows, {} distinct products", records.len(), products.len());
            if let (Some(first), Some(last)) = (daily.first(), daily.last()) {
                eprintln!("  dates: {} to {}", first.0, last.0);
            }
            eprintln!("  total revenue: {total:.2}");
        }
        Ok(None) => eprintln!("sales: not supplied"),
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    match data_port.load_segmentation() {
        Ok(Some(records)) => {
            eprintln!("segmentation: {} rows", records.len());
            for slice in segmentation::segment_distribution(&records) {
                eprintln!("  {}: {} ({:.1}%)", slice.label, slice.count, slice.share);
            }
        }
        Ok(None) => eprintln!("segmentation: not supplied"),
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    match data_port.load_forecast() {
        Ok(Some(records)) => {
            eprintln!("forecast: {} rows", records.len());
            if let (Some(first), Some(last)) = (records.first(), records.last()) {
                eprintln!("  dates: {} to {}", first.date.date(), last.date.date());
            }
        }
        Ok(None) => eprintln!("forecast: not supplied"),
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    }

    ExitCode::SUCCESS
}

fn run_serve(config_path: &PathBuf) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::build_router;
        use std::net::SocketAddr;
        use std::sync::Arc;

        eprintln!("Loading config from {}", config_path.display());
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(code) => return code,
        };

        let inputs = resolve_all(Some(&config), None, None, None);
        let data_port = Arc::new(CsvAdapter::new(
            inputs.sales,
            inputs.segmentation,
            inputs.forecast,
        )) as Arc<dyn DataPort + Send + Sync>;

        let addr: SocketAddr = config
            .get_string("web", "listen")
            .unwrap_or_else(|| "127.0.0.1:3000".to_string())
            .parse()
            .unwrap_or_else(|_| "127.0.0.1:3000".parse().unwrap());

        eprintln!("Starting web server on {addr}");

        let state = crate::adapters::web::AppState {
            data_port,
            config: Arc::new(config),
        };

        let router = build_router(state);

        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(async {
                let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
                axum::serve(listener, router).await.unwrap();
            });

        ExitCode::SUCCESS
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}
