//! Result wrapper types for displaying operation outcomes.
//!
//! This module provides wrapper types that format the results of create,
//! update and delete operations, and of optimization runs, with consistent
//! messaging.

use std::fmt;

use crate::models::{
    Accommodation, AppliedSummary, ItineraryItem, OptimizationResult, OptimizationSuggestion, Place,
    SuggestionKind, SuggestionRejection, Trip,
};

/// Wrapper type for displaying the result of create operations.
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for CreateResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created trip with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Place> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created place with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<Accommodation> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created accommodation with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for CreateResult<ItineraryItem> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Created item with ID: {}", self.resource.id)?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, with an
/// optional list of the changes made.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: fmt::Display> UpdateResult<T> {
    fn fmt_with_heading(&self, kind: &str, id: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Updated {kind} with ID: {id}")?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

impl fmt::Display for UpdateResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_heading("trip", &self.resource.id, f)
    }
}

impl fmt::Display for UpdateResult<Place> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_heading("place", &self.resource.id, f)
    }
}

impl fmt::Display for UpdateResult<ItineraryItem> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_heading("item", &self.resource.id, f)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl fmt::Display for DeleteResult<ItineraryItem> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Removed item {} from day {}",
            self.resource.id, self.resource.day_number
        )
    }
}

impl fmt::Display for DeleteResult<Trip> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted trip '{}' (ID: {}) with its items and accommodations",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<Place> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Removed place '{}' (ID: {}) from the catalog",
            self.resource.name, self.resource.id
        )
    }
}

impl fmt::Display for DeleteResult<Accommodation> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Removed accommodation '{}' (ID: {})",
            self.resource.name, self.resource.id
        )
    }
}

fn fmt_estimates(result: &OptimizationResult, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Some(minutes) = result.estimated_time_saved {
        writeln!(f, "- **Time saved**: {minutes} min")?;
    }
    if let Some(meters) = result.estimated_distance_saved {
        if meters >= 1000 {
            writeln!(f, "- **Distance saved**: {:.1} km", f64::from(meters) / 1000.0)?;
        } else {
            writeln!(f, "- **Distance saved**: {meters} m")?;
        }
    }
    Ok(())
}

fn fmt_suggestion(
    index: usize,
    suggestion: &OptimizationSuggestion,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let target = match suggestion.kind {
        SuggestionKind::Add => suggestion
            .new_place
            .as_ref()
            .and_then(|place| place.name.clone())
            .unwrap_or_else(|| "unnamed place".to_string()),
        _ => suggestion
            .item_id
            .clone()
            .unwrap_or_else(|| "no item".to_string()),
    };
    write!(f, "{}. **{}** {target}", index + 1, suggestion.kind)?;
    if let Some(day) = suggestion.new_day {
        write!(f, ", day {day}")?;
    }
    if let Some(order) = suggestion.new_order {
        write!(f, ", position {}", order + 1)?;
    }
    if let Some(start) = suggestion.new_start_time {
        write!(f, ", starting {start}")?;
    }
    writeln!(f)?;
    writeln!(f, "   {}", suggestion.reasoning)
}

/// An optimization result awaiting a decision.
pub struct SuggestionPreview<'a>(pub &'a OptimizationResult);

impl fmt::Display for SuggestionPreview<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Suggestions")?;
        writeln!(f)?;
        if !self.0.reasoning.is_empty() {
            writeln!(f, "{}", self.0.reasoning)?;
            writeln!(f)?;
        }
        fmt_estimates(self.0, f)?;
        if self.0.suggestions.is_empty() {
            return writeln!(f, "No changes suggested.");
        }
        writeln!(f)?;
        for (index, suggestion) in self.0.suggestions.iter().enumerate() {
            fmt_suggestion(index, suggestion, f)?;
        }
        Ok(())
    }
}

/// A previewed optimization that was validated but not applied.
pub struct DryRun<'a> {
    pub result: &'a OptimizationResult,
    /// Number of edits the validated plan holds
    pub edits: usize,
}

impl fmt::Display for DryRun<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", SuggestionPreview(self.result))?;
        writeln!(f)?;
        writeln!(
            f,
            "Dry run: {} edit(s) would be applied. Nothing was saved.",
            self.edits
        )
    }
}

/// Outcome of an applied optimization.
pub struct AppliedPlan<'a> {
    pub summary: &'a AppliedSummary,
    pub result: &'a OptimizationResult,
}

impl fmt::Display for AppliedPlan<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;
        writeln!(f, "Applied {} suggestion(s)", summary.total())?;
        writeln!(f)?;
        writeln!(f, "- **Added**: {}", summary.added)?;
        writeln!(f, "- **Removed**: {}", summary.removed)?;
        writeln!(f, "- **Reordered**: {}", summary.reordered)?;
        writeln!(f, "- **Modified**: {}", summary.modified)?;
        fmt_estimates(self.result, f)?;
        if !summary.new_places.is_empty() {
            writeln!(f)?;
            writeln!(f, "New places:")?;
            for place in &summary.new_places {
                writeln!(f, "- {} (ID: {})", place.name, place.id)?;
            }
        }
        Ok(())
    }
}

/// Suggestions rejected by validation.
pub struct Rejections<'a>(pub &'a [SuggestionRejection]);

impl fmt::Display for Rejections<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Nothing was applied; {} suggestion(s) were rejected:",
            self.0.len()
        )?;
        writeln!(f)?;
        for rejection in self.0 {
            writeln!(f, "- {rejection}")?;
        }
        Ok(())
    }
}
