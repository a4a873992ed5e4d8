//! Itinerary CLI Application
//!
//! Command-line interface for the day-by-day trip itinerary planner.

mod args;
mod cli;
mod optimizer;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use itinerary_core::PlannerBuilder;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        day_start,
        command,
    } = Args::parse();

    let renderer = TerminalRenderer::new(!no_color);

    if let Some(Hours(args)) = &command {
        cli::handle_hours(args, &renderer);
        return Ok(());
    }

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .with_day_start(day_start.map(Into::into))
        .build()
        .await
        .context("Failed to initialize planner")?;

    info!("Using database at {}", planner.database_path().display());
    let cli = Cli::new(planner, renderer);

    match command {
        Some(Trip { command }) => cli.handle_trip_command(command).await,
        Some(Place { command }) => cli.handle_place_command(command).await,
        Some(Accommodation { command }) => cli.handle_accommodation_command(command).await,
        Some(Item { command }) => cli.handle_item_command(command).await,
        Some(Day { command }) => cli.handle_day_command(command).await,
        Some(Optimize(args)) => cli.handle_optimize(&args).await,
        Some(Hours(_)) | None => cli.list_trips().await,
    }
}
