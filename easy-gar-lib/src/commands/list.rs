use super::Host;
use super::common::{CommonArgs, init_logging};
use super::config::Config;
use crate::Result;
use camino::Utf8Path;
use clap::Parser;
use core::fmt::Display;
use owo_colors::OwoColorize;
use std::io::Write;

#[derive(Parser, Debug, Clone)]
pub struct ListArgs {
    /// Only show entries whose key, wire name or alias contains this text (case-insensitive)
    #[arg(value_name = "FILTER")]
    pub filter: Option<String>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// One printable catalog line.
#[derive(Debug)]
struct Line<C> {
    category: C,
    key: String,
    wire_name: String,
    alias: String,
}

pub fn list_metrics<H: Host>(host: &mut H, args: &ListArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let config = Config::load(Utf8Path::new("."), args.common.config.as_ref())?;
    let catalog = config.catalog();

    let lines = catalog
        .metrics()
        .map(|e| Line {
            category: e.category,
            key: e.key.clone(),
            wire_name: e.metric.expression().to_string(),
            alias: e.metric.alias().unwrap_or_default().to_string(),
        })
        .collect();

    let use_colors = args.common.color.use_colors(host.output_is_terminal());
    print_lines(host, filter_lines(lines, args.filter.as_deref()), use_colors);
    Ok(())
}

pub fn list_dimensions<H: Host>(host: &mut H, args: &ListArgs) -> Result<()> {
    init_logging(args.common.log_level);

    let config = Config::load(Utf8Path::new("."), args.common.config.as_ref())?;
    let catalog = config.catalog();

    let lines = catalog
        .dimensions()
        .map(|e| Line {
            category: e.category,
            key: e.key.clone(),
            wire_name: e.dimension.name().to_string(),
            alias: e.dimension.alias().unwrap_or_default().to_string(),
        })
        .collect();

    let use_colors = args.common.color.use_colors(host.output_is_terminal());
    print_lines(host, filter_lines(lines, args.filter.as_deref()), use_colors);
    Ok(())
}

fn filter_lines<C>(lines: Vec<Line<C>>, filter: Option<&str>) -> Vec<Line<C>> {
    let Some(filter) = filter.map(str::to_lowercase) else {
        return lines;
    };

    lines
        .into_iter()
        .filter(|l| {
            l.key.to_lowercase().contains(&filter)
                || l.wire_name.to_lowercase().contains(&filter)
                || l.alias.to_lowercase().contains(&filter)
        })
        .collect()
}

fn print_lines<H: Host, C: Display + PartialEq + Copy>(host: &mut H, lines: Vec<Line<C>>, use_colors: bool) {
    if lines.is_empty() {
        let _ = writeln!(host.output(), "No matching entries");
        return;
    }

    let key_width = lines.iter().map(|l| l.key.len()).max().unwrap_or(0);
    let wire_width = lines.iter().map(|l| l.wire_name.len()).max().unwrap_or(0);

    let mut current = None;
    for line in &lines {
        if current != Some(line.category) {
            if current.is_some() {
                let _ = writeln!(host.output());
            }

            if use_colors {
                let _ = writeln!(host.output(), "{}", line.category.to_string().bold());
            } else {
                let _ = writeln!(host.output(), "{}", line.category);
            }
            current = Some(line.category);
        }

        let text = format!("  {:<key_width$}  {:<wire_width$}  {}", line.key, line.wire_name, line.alias);
        let _ = writeln!(host.output(), "{}", text.trim_end());
    }
}
