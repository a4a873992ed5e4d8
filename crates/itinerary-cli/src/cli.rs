//! Command handlers for the itinerary CLI.
//!
//! Each handler converts its clap arguments into core parameters, calls the
//! planner and renders the markdown result.

use anyhow::{bail, Context, Result};
use itinerary_core::{
    classify, AppliedPlan, BusinessHours, CreateResult, DeleteResult, DryRun, ItineraryError,
    Planner, Rejections, UpdateResult,
};
use log::info;

use crate::{
    args::{
        AccommodationCommands, DayCommands, HoursArgs, ItemCommands, OptimizeArgs, PlaceCommands,
        TripCommands,
    },
    optimizer::FileOptimizer,
    renderer::TerminalRenderer,
};

/// CLI handler that owns the planner and the renderer.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn handle_trip_command(&self, command: TripCommands) -> Result<()> {
        match command {
            TripCommands::Create(args) => {
                let trip = self
                    .planner
                    .create_trip(&args.into())
                    .await
                    .context("Failed to create trip")?;
                self.renderer.show(&CreateResult::new(trip));
            }
            TripCommands::List => self.list_trips().await?,
            TripCommands::Show(args) => {
                let itinerary = self
                    .planner
                    .trip_itinerary(&args.into())
                    .await
                    .context("Failed to load trip")?;
                self.renderer.show(&itinerary);
            }
            TripCommands::Update(args) => {
                let result = self
                    .planner
                    .update_trip(&args.into())
                    .await
                    .context("Failed to update trip")?;
                self.renderer.show(&result);
            }
            TripCommands::Delete(args) => {
                let trip = self
                    .planner
                    .delete_trip(&args.into())
                    .await
                    .context("Failed to delete trip")?;
                self.renderer.show(&DeleteResult::new(trip));
            }
        }
        Ok(())
    }

    pub async fn handle_place_command(&self, command: PlaceCommands) -> Result<()> {
        match command {
            PlaceCommands::Add(args) => {
                let place = self
                    .planner
                    .add_place(&args.into())
                    .await
                    .context("Failed to add place")?;
                self.renderer.show(&CreateResult::new(place));
            }
            PlaceCommands::List => {
                let places = self
                    .planner
                    .list_places()
                    .await
                    .context("Failed to list places")?;
                self.renderer.show(&places);
            }
            PlaceCommands::Show(args) => {
                let id = args.id.clone();
                match self
                    .planner
                    .get_place(&args.into())
                    .await
                    .context("Failed to get place")?
                {
                    Some(place) => self.renderer.show(&place),
                    None => bail!("Place {id} not found"),
                }
            }
            PlaceCommands::Update(args) => {
                let result = self
                    .planner
                    .update_place(&args.into())
                    .await
                    .context("Failed to update place")?;
                self.renderer.show(&result);
            }
            PlaceCommands::Remove(args) => {
                let place = self
                    .planner
                    .remove_place(&args.into())
                    .await
                    .context("Failed to remove place")?;
                self.renderer.show(&DeleteResult::new(place));
            }
        }
        Ok(())
    }

    pub async fn handle_accommodation_command(
        &self,
        command: AccommodationCommands,
    ) -> Result<()> {
        match command {
            AccommodationCommands::Add(args) => {
                let stay = self
                    .planner
                    .add_accommodation(&args.into())
                    .await
                    .context("Failed to add accommodation")?;
                self.renderer.show(&CreateResult::new(stay));
            }
            AccommodationCommands::List(args) => {
                let stays = self
                    .planner
                    .list_accommodations(&args.into())
                    .await
                    .context("Failed to list accommodations")?;
                self.renderer.show(&stays);
            }
            AccommodationCommands::Remove(args) => {
                let stay = self
                    .planner
                    .remove_accommodation(&args.into())
                    .await
                    .context("Failed to remove accommodation")?;
                self.renderer.show(&DeleteResult::new(stay));
            }
        }
        Ok(())
    }

    pub async fn handle_item_command(&self, command: ItemCommands) -> Result<()> {
        match command {
            ItemCommands::Add(args) => {
                let item = self
                    .planner
                    .add_item(&args.into())
                    .await
                    .context("Failed to add item")?;
                self.renderer.show(&CreateResult::new(item));
            }
            ItemCommands::Update(args) => {
                let result = self
                    .planner
                    .update_item(&args.into())
                    .await
                    .context("Failed to update item")?;
                self.renderer.show(&result);
            }
            ItemCommands::Remove(args) => {
                let item = self
                    .planner
                    .remove_item(&args.into())
                    .await
                    .context("Failed to remove item")?;
                self.renderer.show(&DeleteResult::new(item));
            }
            ItemCommands::Move(args) => {
                let item = self
                    .planner
                    .move_item(&args.into())
                    .await
                    .context("Failed to move item")?;
                let changes = vec![format!("Day: {}", item.day_number)];
                self.renderer.show(&UpdateResult::with_changes(item, changes));
            }
            ItemCommands::Nudge(args) => {
                let day = self
                    .planner
                    .nudge_item(&args.into())
                    .await
                    .context("Failed to move item")?;
                self.renderer.show(&day);
            }
        }
        Ok(())
    }

    pub async fn handle_day_command(&self, command: DayCommands) -> Result<()> {
        let day = match command {
            DayCommands::Show(args) => self
                .planner
                .day_timeline(&args.into())
                .await
                .context("Failed to load day")?,
            DayCommands::Reorder(args) => self
                .planner
                .reorder_day(&args.into())
                .await
                .context("Failed to reorder day")?,
        };
        self.renderer.show(&day);
        Ok(())
    }

    pub async fn handle_optimize(&self, args: &OptimizeArgs) -> Result<()> {
        let optimizer = FileOptimizer::new(args.result.clone());
        let outcome = match self.planner.optimize(&args.into(), &optimizer).await {
            Ok(outcome) => outcome,
            Err(ItineraryError::Validation { rejections }) => {
                self.renderer.show(&Rejections(&rejections));
                bail!("Optimizer result for trip {} was rejected", args.trip_id);
            }
            Err(e) => return Err(e).context("Failed to optimize trip"),
        };

        match &outcome.applied {
            Some(summary) => {
                info!("Applied {} suggestion(s) to trip {}", summary.total(), args.trip_id);
                self.renderer.show(&AppliedPlan {
                    summary,
                    result: &outcome.result,
                });
            }
            None => {
                self.renderer.show(&DryRun {
                    result: &outcome.result,
                    edits: outcome.plan.len(),
                });
            }
        }
        Ok(())
    }

    pub async fn list_trips(&self) -> Result<()> {
        let trips = self
            .planner
            .list_trips()
            .await
            .context("Failed to list trips")?;
        self.renderer.show(&trips);
        Ok(())
    }
}

/// Classifies a visit without touching the database.
pub fn handle_hours(args: &HoursArgs, renderer: &TerminalRenderer) {
    let hours = BusinessHours::new(args.open, args.close);
    let status = classify(args.visit, &hours);
    renderer.render(&format!(
        "Visit at **{}** with hours {hours}: {}\n",
        args.visit,
        status.with_icon()
    ));
}
