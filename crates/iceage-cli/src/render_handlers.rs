//! `iceage render` subcommands: write a dashboard figure to disk.

use std::path::{Path, PathBuf};

use iceage_api::views::{shapes, statistics};
use iceage_api::AppState;
use iceage_catalog::{load_distribution, load_melt_table, melt_table_path};
use iceage_core::{DateRange, Error, IceageConfig, Result};
use iceage_render::{render, Chart, DistributionChart, Format};

use crate::cli::RenderCommand;

/// Render the requested figure and return the path written.
pub fn handle_render_command(config: IceageConfig, figure: RenderCommand) -> Result<PathBuf> {
    let out = figure.out().clone();
    let format = Format::from_path(&out)?;
    match figure {
        RenderCommand::Distribution { .. } => {
            let rows = load_distribution(&config.catalog.distribution_path())?;
            let chart = DistributionChart::new(rows.into_iter().map(|r| (r.official_name, r.icebergs)))?;
            write_figure(&chart, format, &out)?;
        }
        RenderCommand::Correlogram { site, early, later, .. } => {
            let range = DateRange::parse(&early, &later)?;
            let table = load_melt_table(&melt_table_path(&config.catalog.melt_rate_dir(), &site, &range)?)?;
            write_figure(&statistics::correlogram(&table)?, format, &out)?;
        }
        RenderCommand::Quartiles { site, range, .. } => {
            let range = DateRange::from_folder_name(&range)?;
            let state = AppState::new(config);
            let outlines = shapes::load_range_shapes(&state, &site, &range)?;
            write_figure(&shapes::quartile_figure(&outlines)?, format, &out)?;
        }
    }
    log::info!("Wrote {}", out.display());
    Ok(out)
}

fn write_figure<C: Chart>(chart: &C, format: Format, out: &Path) -> Result<()> {
    let bytes = render(chart, format)?;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }
    std::fs::write(out, bytes).map_err(|e| Error::io_with_path(e, out))
}
