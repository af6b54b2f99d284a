use super::Host;
use super::common::{CommonArgs, init_logging};
use super::config::Config;
use crate::Result;
use crate::catalog::Catalog;
use crate::output::{generate_console, generate_csv, generate_json};
use crate::reporting::{DateSpec, HttpExecutor, OrderBy, Report, ReportQuery, ReportingApi, SamplingLevel, SortOrder};
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::Write;
use tokio_util::sync::CancellationToken;

const LOG_TARGET: &str = "    report";

#[derive(Parser, Debug, Clone)]
pub struct ReportArgs {
    /// Reporting view to query (default is `view_id` from the configuration)
    #[arg(long, value_name = "ID")]
    pub view_id: Option<String>,

    /// Metrics to fetch, as catalog keys or `ga:` names, optionally combined with `+ - * /`
    #[arg(long, short = 'm', value_name = "METRICS", value_delimiter = ',', required = true)]
    pub metrics: Vec<String>,

    /// Dimensions to group by, as catalog keys or `ga:` names (default is the date)
    #[arg(long, short = 'd', value_name = "DIMENSIONS", value_delimiter = ',')]
    pub dimensions: Vec<String>,

    /// First day of the report (`YYYY-MM-DD`, `today`, `yesterday` or `NdaysAgo`)
    #[arg(long, value_name = "DATE", default_value = "7daysAgo")]
    pub start: DateSpec,

    /// Last day of the report
    #[arg(long, value_name = "DATE", default_value = "today")]
    pub end: DateSpec,

    /// Sort key, a metric or dimension optionally suffixed with `:asc` or `:desc`
    #[arg(long = "order-by", value_name = "KEY[:asc|desc]")]
    pub order_by: Vec<String>,

    /// Sampling level (default is `sampling_level` from the configuration)
    #[arg(long, value_name = "LEVEL", value_enum, ignore_case = true)]
    pub sampling_level: Option<SamplingLevel>,

    /// Name shown above the report
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// OAuth access token sent as a bearer credential
    #[arg(long, value_name = "TOKEN", env = "GA_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// Output the report to a CSV file instead of to the terminal
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Output the report to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn process_report<H: Host>(host: &mut H, args: &ReportArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let config = Config::load(Utf8Path::new("."), args.common.config.as_ref())?;
    let catalog = config.catalog();
    let query = build_query(&catalog, args, &config)?;

    let Some(view_id) = args.view_id.as_ref().or(config.view_id.as_ref()) else {
        bail!("no view id given; pass --view-id or set `view_id` in the configuration file");
    };

    let executor = HttpExecutor::new(args.access_token.as_deref(), config.endpoint.as_str())?;
    let api = ReportingApi::new(executor, view_id.as_str())
        .with_options(config.fetch_options())
        .with_page_size(config.page_size);

    let cancel = CancellationToken::new();
    let interrupt = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                log::warn!(target: LOG_TARGET, "interrupted, cancelling the report");
                cancel.cancel();
            }
        }
    });

    let result = api.get_report_cancellable(&query, &cancel).await;
    interrupt.abort();

    let report = match result {
        Ok(report) => report,
        Err(e) => {
            let _ = writeln!(host.error(), "❌ {e}");
            return Err(e).into_app_err_with(|| format!("fetching report for view {view_id}"));
        }
    };

    write_report(host, &report, args)
}

/// Turn the command line into a query, resolving keys through the catalog.
fn build_query(catalog: &Catalog, args: &ReportArgs, config: &Config) -> Result<ReportQuery> {
    let metrics = args.metrics.iter().map(|spec| catalog.resolve_metric(spec)).collect::<Result<Vec<_>>>()?;
    let dimensions = args
        .dimensions
        .iter()
        .map(|spec| catalog.resolve_dimension(spec))
        .collect::<Result<Vec<_>>>()?;
    let order_by = args.order_by.iter().map(|spec| resolve_order_by(catalog, spec)).collect::<Result<Vec<_>>>()?;

    let mut query = ReportQuery::new(metrics)
        .with_dates(args.start, args.end)
        .with_dimensions(dimensions)
        .with_order_by(order_by)
        .with_sampling_level(args.sampling_level.unwrap_or(config.sampling_level));

    if let Some(name) = &args.name {
        query = query.with_name(name.as_str());
    }

    Ok(query)
}

/// Resolve `key[:asc|desc]` to an ordering on the metric expression or dimension name the key stands for.
fn resolve_order_by(catalog: &Catalog, spec: &str) -> Result<OrderBy> {
    let (key, sort_order) = match spec.rsplit_once(':') {
        Some((key, suffix)) => match suffix.parse::<SortOrder>() {
            Ok(order) => (key, order),
            Err(_) => (spec, SortOrder::default()),
        },
        None => (spec, SortOrder::default()),
    };

    let key = key.trim();
    if key.is_empty() {
        bail!("invalid order-by '{spec}': missing key");
    }

    let order_by = if let Ok(metric) = catalog.resolve_metric(key) {
        OrderBy::metric(&metric)
    } else if let Ok(dimension) = catalog.resolve_dimension(key) {
        OrderBy::dimension(&dimension)
    } else {
        bail!("unknown order-by key '{key}'; it must name a metric or a dimension");
    };

    Ok(order_by.with_sort_order(sort_order))
}

fn write_report<H: Host>(host: &mut H, report: &Report, args: &ReportArgs) -> Result<()> {
    if let Some(filename) = &args.csv {
        let mut csv_output = String::new();
        generate_csv(report, &mut csv_output)?;
        fs::write(filename, csv_output).into_app_err_with(|| format!("writing CSV report to {filename}"))?;
    }

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(report, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to {filename}"))?;
    }

    if args.csv.is_none() && args.json.is_none() {
        let use_colors = args.common.color.use_colors(host.output_is_terminal());
        let mut console_output = String::new();
        generate_console(report, use_colors, &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    Ok(())
}
