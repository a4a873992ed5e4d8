//! Command-line arguments using clap's derive API.
//!
//! Each command has its own argument struct carrying the clap attributes and
//! a `From` conversion into the matching core parameter type, so the core
//! stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use itinerary_core::{
    models::{ItemPatch, OptimizationConstraints, OptimizationMode, PlaceCategory, TravelMode},
    params::{
        AddItem, CreateAccommodation, CreatePlace, CreateTrip, DayQuery, Id, MoveItem, NudgeItem,
        Optimize, ReorderDay, TripAccommodation, TripItem, UpdateItem, UpdatePlace, UpdateTrip,
    },
    BusinessHours, ClockTime, MoveDirection,
};
use jiff::civil::{Date, DateTime};

/// Day-by-day trip itinerary planner
///
/// Plan trips as ordered visits per day, reorder them, check visits against
/// opening hours and apply optimizer suggestions all at once or not at all.
#[derive(Parser)]
#[command(version, about, name = "itin")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/itinerary/itinerary.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Start time (HH:MM) for suggested places on a day with no other items
    #[arg(long, global = true, value_name = "HH:MM")]
    pub day_start: Option<ClockTime>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the itinerary CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage trips
    #[command(alias = "t")]
    Trip {
        #[command(subcommand)]
        command: TripCommands,
    },
    /// Manage the place catalog
    #[command(alias = "p")]
    Place {
        #[command(subcommand)]
        command: PlaceCommands,
    },
    /// Manage where a trip stays
    #[command(aliases = ["a", "stay"])]
    Accommodation {
        #[command(subcommand)]
        command: AccommodationCommands,
    },
    /// Manage itinerary items
    #[command(alias = "i")]
    Item {
        #[command(subcommand)]
        command: ItemCommands,
    },
    /// Show or reorder one day of a trip
    #[command(alias = "d")]
    Day {
        #[command(subcommand)]
        command: DayCommands,
    },
    /// Apply an optimizer result to a trip
    #[command(alias = "o")]
    Optimize(OptimizeArgs),
    /// Check a visit time against opening hours
    Hours(HoursArgs),
}

// ============================================================================
// Trips
// ============================================================================

/// Create a new trip
#[derive(ClapArgs)]
pub struct CreateTripArgs {
    /// Name of the trip
    pub name: String,
    #[arg(long, help = "First day of the trip (YYYY-MM-DD)")]
    pub start: Date,
    #[arg(long, help = "Last day of the trip, inclusive (YYYY-MM-DD)")]
    pub end: Date,
    #[arg(long, help = "Country code of the destination")]
    pub country: Option<String>,
    #[arg(
        short,
        long,
        default_value = "walking",
        help = "Preferred transport (walking, driving, transit, cycling)"
    )]
    pub transport: TravelMode,
}

impl From<CreateTripArgs> for CreateTrip {
    fn from(val: CreateTripArgs) -> Self {
        CreateTrip {
            name: val.name,
            country_id: val.country,
            start_date: val.start,
            end_date: val.end,
            preferred_transport: val.transport,
        }
    }
}

/// Show a trip day by day
#[derive(ClapArgs)]
pub struct ShowTripArgs {
    #[arg(help = "Unique identifier of the trip to show")]
    pub id: String,
}

impl From<ShowTripArgs> for Id {
    fn from(val: ShowTripArgs) -> Self {
        Id { id: val.id }
    }
}

/// Change a trip's name, dates or transport
///
/// A new start date moves every item along so it keeps its day number.
#[derive(ClapArgs)]
pub struct UpdateTripArgs {
    #[arg(help = "Unique identifier of the trip to update")]
    pub id: String,
    #[arg(long, help = "New name")]
    pub name: Option<String>,
    #[arg(long, help = "New first day (YYYY-MM-DD)")]
    pub start: Option<Date>,
    #[arg(long, help = "New last day, inclusive (YYYY-MM-DD)")]
    pub end: Option<Date>,
    #[arg(long, help = "New country code")]
    pub country: Option<String>,
    #[arg(short, long, help = "New preferred transport")]
    pub transport: Option<TravelMode>,
}

impl From<UpdateTripArgs> for UpdateTrip {
    fn from(val: UpdateTripArgs) -> Self {
        UpdateTrip {
            id: val.id,
            name: val.name,
            country_id: val.country,
            start_date: val.start,
            end_date: val.end,
            preferred_transport: val.transport,
        }
    }
}

/// Delete a trip with its items and accommodations
#[derive(ClapArgs)]
pub struct DeleteTripArgs {
    #[arg(help = "Unique identifier of the trip to delete")]
    pub id: String,
}

impl From<DeleteTripArgs> for Id {
    fn from(val: DeleteTripArgs) -> Self {
        Id { id: val.id }
    }
}

#[derive(Subcommand)]
pub enum TripCommands {
    /// Create a new trip
    #[command(alias = "c")]
    Create(CreateTripArgs),
    /// List all trips
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show a trip day by day
    #[command(alias = "s")]
    Show(ShowTripArgs),
    /// Change a trip's name, dates or transport
    #[command(alias = "u")]
    Update(UpdateTripArgs),
    /// Delete a trip with its items and accommodations
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteTripArgs),
}

// ============================================================================
// Places
// ============================================================================

/// Add a place to the catalog
#[derive(ClapArgs)]
pub struct AddPlaceArgs {
    /// Name of the place
    pub name: String,
    #[arg(long, allow_negative_numbers = true, help = "Latitude in degrees")]
    pub lat: f64,
    #[arg(long, allow_negative_numbers = true, help = "Longitude in degrees")]
    pub lon: f64,
    #[arg(
        short,
        long,
        default_value = "other",
        help = "Category (restaurant, museum, attraction, shopping, nature, accommodation, transport, other)"
    )]
    pub category: PlaceCategory,
    #[arg(long, requires = "closes", help = "Opening time (HH:MM)")]
    pub opens: Option<ClockTime>,
    #[arg(long, requires = "opens", help = "Closing time (HH:MM); earlier than opening wraps past midnight")]
    pub closes: Option<ClockTime>,
    #[arg(long, help = "Typical visit length in minutes (default 60)")]
    pub duration: Option<u32>,
    #[arg(long, help = "Estimated cost of a visit")]
    pub cost: Option<f64>,
    #[arg(short, long, value_delimiter = ',', help = "Tags as comma-separated list")]
    pub tags: Vec<String>,
    #[arg(short, long, help = "Optional description of the place")]
    pub description: Option<String>,
}

impl From<AddPlaceArgs> for CreatePlace {
    fn from(val: AddPlaceArgs) -> Self {
        let business_hours = match (val.opens, val.closes) {
            (Some(open), Some(close)) => Some(BusinessHours::new(open, close)),
            _ => None,
        };
        CreatePlace {
            name: val.name,
            description: val.description,
            latitude: val.lat,
            longitude: val.lon,
            category: val.category,
            business_hours,
            estimated_duration: val.duration,
            estimated_cost: val.cost,
            tags: val.tags,
        }
    }
}

/// Identify one catalog place
#[derive(ClapArgs)]
pub struct PlaceIdArgs {
    #[arg(help = "Unique identifier of the place")]
    pub id: String,
}

impl From<PlaceIdArgs> for Id {
    fn from(val: PlaceIdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Change a catalog place
#[derive(ClapArgs)]
pub struct UpdatePlaceArgs {
    #[arg(help = "Unique identifier of the place to update")]
    pub id: String,
    #[arg(long, help = "New name")]
    pub name: Option<String>,
    #[arg(long, allow_negative_numbers = true, help = "New latitude in degrees")]
    pub lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true, help = "New longitude in degrees")]
    pub lon: Option<f64>,
    #[arg(short, long, help = "New category")]
    pub category: Option<PlaceCategory>,
    #[arg(long, requires = "closes", help = "New opening time (HH:MM)")]
    pub opens: Option<ClockTime>,
    #[arg(long, requires = "opens", help = "New closing time (HH:MM)")]
    pub closes: Option<ClockTime>,
    #[arg(long, conflicts_with_all = ["opens", "closes"], help = "Remove the opening hours")]
    pub no_hours: bool,
    #[arg(long, help = "New typical visit length in minutes")]
    pub duration: Option<u32>,
    #[arg(long, help = "New estimated cost")]
    pub cost: Option<f64>,
    #[arg(short, long, value_delimiter = ',', help = "Replace the tags (comma-separated)")]
    pub tags: Option<Vec<String>>,
    #[arg(short, long, help = "New description")]
    pub description: Option<String>,
}

impl From<UpdatePlaceArgs> for UpdatePlace {
    fn from(val: UpdatePlaceArgs) -> Self {
        let business_hours = match (val.opens, val.closes) {
            (Some(open), Some(close)) => Some(BusinessHours::new(open, close)),
            _ => None,
        };
        UpdatePlace {
            id: val.id,
            name: val.name,
            description: val.description,
            latitude: val.lat,
            longitude: val.lon,
            category: val.category,
            business_hours,
            clear_hours: val.no_hours,
            estimated_duration: val.duration,
            estimated_cost: val.cost,
            tags: val.tags,
        }
    }
}

#[derive(Subcommand)]
pub enum PlaceCommands {
    /// Add a place to the catalog
    #[command(alias = "a")]
    Add(AddPlaceArgs),
    /// List the place catalog
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show one place
    #[command(alias = "s")]
    Show(PlaceIdArgs),
    /// Change a catalog place
    #[command(alias = "u")]
    Update(UpdatePlaceArgs),
    /// Remove a place no item uses
    #[command(aliases = ["r", "rm"])]
    Remove(PlaceIdArgs),
}

// ============================================================================
// Accommodations
// ============================================================================

/// Add an accommodation to a trip
#[derive(ClapArgs)]
pub struct AddAccommodationArgs {
    #[arg(help = "Unique identifier of the trip")]
    pub trip_id: String,
    /// Name of the accommodation
    pub name: String,
    #[arg(long, allow_negative_numbers = true, help = "Latitude in degrees")]
    pub lat: f64,
    #[arg(long, allow_negative_numbers = true, help = "Longitude in degrees")]
    pub lon: f64,
    #[arg(long, help = "Check-in (YYYY-MM-DDTHH:MM)")]
    pub check_in: DateTime,
    #[arg(long, help = "Check-out (YYYY-MM-DDTHH:MM)")]
    pub check_out: DateTime,
}

impl From<AddAccommodationArgs> for CreateAccommodation {
    fn from(val: AddAccommodationArgs) -> Self {
        CreateAccommodation {
            trip_id: val.trip_id,
            name: val.name,
            latitude: val.lat,
            longitude: val.lon,
            check_in: val.check_in,
            check_out: val.check_out,
        }
    }
}

/// List a trip's accommodations
#[derive(ClapArgs)]
pub struct ListAccommodationsArgs {
    #[arg(help = "Unique identifier of the trip")]
    pub trip_id: String,
}

impl From<ListAccommodationsArgs> for Id {
    fn from(val: ListAccommodationsArgs) -> Self {
        Id { id: val.trip_id }
    }
}

/// Remove an accommodation no item uses
#[derive(ClapArgs)]
pub struct RemoveAccommodationArgs {
    #[arg(help = "Unique identifier of the trip")]
    pub trip_id: String,
    #[arg(help = "Unique identifier of the accommodation")]
    pub accommodation_id: String,
}

impl From<RemoveAccommodationArgs> for TripAccommodation {
    fn from(val: RemoveAccommodationArgs) -> Self {
        TripAccommodation {
            trip_id: val.trip_id,
            accommodation_id: val.accommodation_id,
        }
    }
}

#[derive(Subcommand)]
pub enum AccommodationCommands {
    /// Add an accommodation to a trip
    #[command(alias = "a")]
    Add(AddAccommodationArgs),
    /// List a trip's accommodations
    #[command(aliases = ["l", "ls"])]
    List(ListAccommodationsArgs),
    /// Remove an accommodation no item uses
    #[command(aliases = ["r", "rm"])]
    Remove(RemoveAccommodationArgs),
}

// ============================================================================
// Items
// ============================================================================

/// Add an item to a trip day
///
/// Without --end the visit lasts the place's typical visit length. Without
/// --position the item is appended to the day.
#[derive(ClapArgs)]
pub struct AddItemArgs {
    #[arg(help = "Unique identifier of the trip")]
    pub trip_id: String,
    #[arg(help = "Day of the trip, starting at 1")]
    pub day: u32,
    #[arg(long, help = "Start of the visit (YYYY-MM-DDTHH:MM)")]
    pub start: DateTime,
    #[arg(long, help = "End of the visit (YYYY-MM-DDTHH:MM)")]
    pub end: Option<DateTime>,
    #[arg(long, conflicts_with = "accommodation", help = "Place to visit")]
    pub place: Option<String>,
    #[arg(long, help = "Accommodation to stay at")]
    pub accommodation: Option<String>,
    #[arg(short, long, help = "Travel mode to reach the item; defaults to the trip's")]
    pub mode: Option<TravelMode>,
    #[arg(long, help = "Travel time to reach the item in minutes")]
    pub travel_minutes: Option<u32>,
    #[arg(short, long, help = "Free-form notes")]
    pub notes: Option<String>,
    #[arg(long, help = "0-based position to insert at instead of appending")]
    pub position: Option<u32>,
}

impl From<AddItemArgs> for AddItem {
    fn from(val: AddItemArgs) -> Self {
        AddItem {
            trip_id: val.trip_id,
            day_number: val.day,
            place_id: val.place,
            accommodation_id: val.accommodation,
            start_time: val.start,
            end_time: val.end,
            travel_mode: val.mode,
            travel_duration: val.travel_minutes,
            notes: val.notes,
            position: val.position,
        }
    }
}

/// Update an item's times or details
#[derive(ClapArgs)]
pub struct UpdateItemArgs {
    #[arg(help = "Unique identifier of the trip")]
    pub trip_id: String,
    #[arg(help = "Unique identifier of the item to update")]
    pub item_id: String,
    #[arg(long, help = "New start of the visit (YYYY-MM-DDTHH:MM)")]
    pub start: Option<DateTime>,
    #[arg(long, help = "New end of the visit (YYYY-MM-DDTHH:MM)")]
    pub end: Option<DateTime>,
    #[arg(long, conflicts_with = "accommodation", help = "Visit this place instead")]
    pub place: Option<String>,
    #[arg(long, help = "Stay at this accommodation instead")]
    pub accommodation: Option<String>,
    #[arg(short, long, help = "New travel mode")]
    pub mode: Option<TravelMode>,
    #[arg(long, help = "New travel time in minutes")]
    pub travel_minutes: Option<u32>,
    #[arg(short, long, help = "New notes")]
    pub notes: Option<String>,
}

impl From<UpdateItemArgs> for UpdateItem {
    fn from(val: UpdateItemArgs) -> Self {
        UpdateItem {
            trip_id: val.trip_id,
            item_id: val.item_id,
            patch: ItemPatch {
                place_id: val.place,
                accommodation_id: val.accommodation,
                start_time: val.start,
                end_time: val.end,
                travel_mode: val.mode,
                travel_duration: val.travel_minutes,
                notes: val.notes,
            },
        }
    }
}

/// Remove an item from its day
#[derive(ClapArgs)]
pub struct RemoveItemArgs {
    #[arg(help = "Unique identifier of the trip")]
    pub trip_id: String,
    #[arg(help = "Unique identifier of the item to remove")]
    pub item_id: String,
}

impl From<RemoveItemArgs> for TripItem {
    fn from(val: RemoveItemArgs) -> Self {
        TripItem {
            trip_id: val.trip_id,
            item_id: val.item_id,
        }
    }
}

/// Move an item to the end of another day
#[derive(ClapArgs)]
pub struct MoveItemArgs {
    #[arg(help = "Unique identifier of the trip")]
    pub trip_id: String,
    #[arg(help = "Unique identifier of the item to move")]
    pub item_id: String,
    #[arg(help = "Target day of the trip, starting at 1")]
    pub day: u32,
}

impl From<MoveItemArgs> for MoveItem {
    fn from(val: MoveItemArgs) -> Self {
        MoveItem {
            trip_id: val.trip_id,
            item_id: val.item_id,
            day_number: val.day,
        }
    }
}

/// Move an item one step up or down within its day
#[derive(ClapArgs)]
pub struct NudgeItemArgs {
    #[arg(help = "Unique identifier of the trip")]
    pub trip_id: String,
    #[arg(help = "Unique identifier of the item to move")]
    pub item_id: String,
    #[arg(value_enum, help = "Direction to move the item")]
    pub direction: DirectionArg,
}

impl From<NudgeItemArgs> for NudgeItem {
    fn from(val: NudgeItemArgs) -> Self {
        NudgeItem {
            trip_id: val.trip_id,
            item_id: val.item_id,
            direction: val.direction.into(),
        }
    }
}

#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add an item to a trip day
    #[command(alias = "a")]
    Add(AddItemArgs),
    /// Update an item's times or details
    #[command(alias = "u")]
    Update(UpdateItemArgs),
    /// Remove an item from its day
    #[command(aliases = ["r", "rm"])]
    Remove(RemoveItemArgs),
    /// Move an item to the end of another day
    #[command(alias = "m")]
    Move(MoveItemArgs),
    /// Move an item one step up or down within its day
    #[command(alias = "n")]
    Nudge(NudgeItemArgs),
}

/// Command-line representation of a one-step move.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    /// Towards the start of the day
    Up,
    /// Towards the end of the day
    Down,
}

impl From<DirectionArg> for MoveDirection {
    fn from(val: DirectionArg) -> Self {
        match val {
            DirectionArg::Up => MoveDirection::Up,
            DirectionArg::Down => MoveDirection::Down,
        }
    }
}

// ============================================================================
// Days
// ============================================================================

/// Show one day of a trip
#[derive(ClapArgs)]
pub struct ShowDayArgs {
    #[arg(help = "Unique identifier of the trip")]
    pub trip_id: String,
    #[arg(help = "Day of the trip, starting at 1")]
    pub day: u32,
}

impl From<ShowDayArgs> for DayQuery {
    fn from(val: ShowDayArgs) -> Self {
        DayQuery {
            trip_id: val.trip_id,
            day_number: val.day,
        }
    }
}

/// Replace the order of a day
///
/// Every item of the day must be listed exactly once.
#[derive(ClapArgs)]
pub struct ReorderDayArgs {
    #[arg(help = "Unique identifier of the trip")]
    pub trip_id: String,
    #[arg(help = "Day of the trip, starting at 1")]
    pub day: u32,
    #[arg(required = true, help = "Item ids in the new order")]
    pub item_ids: Vec<String>,
}

impl From<ReorderDayArgs> for ReorderDay {
    fn from(val: ReorderDayArgs) -> Self {
        ReorderDay {
            trip_id: val.trip_id,
            day_number: val.day,
            item_ids: val.item_ids,
        }
    }
}

#[derive(Subcommand)]
pub enum DayCommands {
    /// Show one day of a trip
    #[command(alias = "s")]
    Show(ShowDayArgs),
    /// Replace the order of a day
    #[command(alias = "r")]
    Reorder(ReorderDayArgs),
}

// ============================================================================
// Optimize and hours
// ============================================================================

/// Apply an optimizer result to a trip
///
/// The result file holds the optimizer's JSON response. Every suggestion is
/// validated first; if any is rejected nothing is applied.
#[derive(ClapArgs)]
pub struct OptimizeArgs {
    #[arg(help = "Unique identifier of the trip")]
    pub trip_id: String,
    #[arg(short, long, help = "Path to the optimizer's JSON result")]
    pub result: PathBuf,
    #[arg(
        short,
        long,
        default_value = "optimize-only",
        help = "Request mode (optimize-only, suggest-and-optimize)"
    )]
    pub mode: OptimizationMode,
    #[arg(long, value_delimiter = ',', help = "Place ids whose relative order must be kept")]
    pub preserve_order: Vec<String>,
    #[arg(long, value_delimiter = ',', help = "Place ids that must stay in the trip")]
    pub must_visit: Vec<String>,
    #[arg(long, help = "Validate and preview without applying")]
    pub dry_run: bool,
}

impl From<&OptimizeArgs> for Optimize {
    fn from(val: &OptimizeArgs) -> Self {
        let constraints = if val.preserve_order.is_empty() && val.must_visit.is_empty() {
            None
        } else {
            Some(OptimizationConstraints {
                preserve_order: val.preserve_order.clone(),
                must_visit: val.must_visit.clone(),
            })
        };
        Optimize {
            trip_id: val.trip_id.clone(),
            mode: val.mode,
            constraints,
            dry_run: val.dry_run,
        }
    }
}

/// Check a visit time against opening hours
#[derive(ClapArgs)]
pub struct HoursArgs {
    #[arg(help = "Visit time (HH:MM)")]
    pub visit: ClockTime,
    #[arg(help = "Opening time (HH:MM)")]
    pub open: ClockTime,
    #[arg(help = "Closing time (HH:MM)")]
    pub close: ClockTime,
}
