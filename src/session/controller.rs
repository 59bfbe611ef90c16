//! Interaction controller.
//!
//! Turns UI events (map clicks, form submits, list buttons) into changes of the
//! workout store, and keeps the markers, the list and the persisted value in
//! step with it. Every operation runs to completion before the next event is
//! handled.

use std::time::Duration;
use thiserror::Error;

use crate::map::{acquire_position, GeolocationError, GeolocationProvider, MapView};
use crate::storage::config::MapSettings;
use crate::storage::durable::DurableStore;
use crate::storage::persistence::{PersistenceAdapter, PersistenceError};
use crate::ui::form::{ValidationError, WorkoutForm};
use crate::ui::list::ListRenderer;
use crate::ui::prompt::{
    invalid_input_message, Prompter, ALL_WORKOUTS_DELETED, CONFIRM_DELETE, CONFIRM_DELETE_ALL,
    POSITION_UNAVAILABLE, WORKOUT_DELETED,
};
use crate::workouts::{
    Coordinates, SortDirection, SortField, Workout, WorkoutId, WorkoutKind, WorkoutStore,
};

use super::context::WorkoutContext;

/// Where the controller is in the create-workout flow.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InteractionState {
    /// Form hidden
    #[default]
    Idle,
    /// Form visible; the next submit creates a workout at `pending`
    FormOpen { pending: Coordinates },
}

/// Errors from submitting the form.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("No location selected; click the map first")]
    NoPendingLocation,

    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Workout added but not saved: {0}")]
    Persistence(#[from] PersistenceError),
}

/// Drives a session's workouts through map, list and storage.
pub struct Controller<M, L, P, D>
where
    M: MapView,
    L: ListRenderer,
    P: Prompter,
    D: DurableStore,
{
    context: WorkoutContext,
    persistence: PersistenceAdapter<D>,
    map: M,
    map_ready: bool,
    list: L,
    prompter: P,
    form: WorkoutForm,
    state: InteractionState,
    settings: MapSettings,
}

impl<M, L, P, D> Controller<M, L, P, D>
where
    M: MapView,
    L: ListRenderer,
    P: Prompter,
    D: DurableStore,
{
    /// Create a controller owning `context`. The map stays unused until
    /// [`initialize_map`](Self::initialize_map) or a successful
    /// [`locate`](Self::locate).
    pub fn new(
        context: WorkoutContext,
        persistence: PersistenceAdapter<D>,
        map: M,
        list: L,
        prompter: P,
        settings: MapSettings,
    ) -> Self {
        Self {
            context,
            persistence,
            map,
            map_ready: false,
            list,
            prompter,
            form: WorkoutForm::new(),
            state: InteractionState::Idle,
            settings,
        }
    }

    /// Replace the store with the persisted workouts and render them.
    ///
    /// Returns how many workouts were restored.
    pub fn restore(&mut self) -> usize {
        let workouts = self.persistence.load();

        self.context.markers.clear_all(&mut self.map);
        self.list.clear_all_entries();
        self.context.store = WorkoutStore::from(workouts);

        for workout in self.context.store.all() {
            self.list.render_entry(workout);
        }
        if self.map_ready {
            self.place_all_markers();
        }

        self.context.store.len()
    }

    /// Look up the user's position and bring up the map there.
    ///
    /// On failure the user is warned and the session keeps running without a
    /// map; list and storage operations still work.
    pub async fn locate<G: GeolocationProvider>(
        &mut self,
        provider: &G,
        timeout: Duration,
    ) -> Result<Coordinates, GeolocationError> {
        match acquire_position(provider, timeout).await {
            Ok(center) => {
                self.initialize_map(center);
                Ok(center)
            }
            Err(e) => {
                tracing::warn!("Could not get position: {}", e);
                self.prompter.warn(POSITION_UNAVAILABLE);
                Err(e)
            }
        }
    }

    /// Create the map at `center` and place a marker for every stored workout.
    pub fn initialize_map(&mut self, center: Coordinates) {
        self.context.markers.clear_all(&mut self.map);
        self.map.create_map(center, self.settings.zoom_level);
        self.map_ready = true;
        self.place_all_markers();

        tracing::info!(
            "Map ready at {} with {} markers",
            center,
            self.context.markers.len()
        );
    }

    fn place_all_markers(&mut self) {
        for workout in self.context.store.all() {
            self.context
                .markers
                .place(&mut self.map, workout, &self.settings);
        }
    }

    /// A click on the map opens the form for a workout at `coords`.
    pub fn on_map_click(&mut self, coords: Coordinates) {
        self.state = InteractionState::FormOpen { pending: coords };
        self.form.show();
        tracing::debug!("Form opened at {}", coords);
    }

    /// Change the form's kind selector.
    pub fn select_kind(&mut self, kind: WorkoutKind) {
        self.form.set_kind(kind);
    }

    /// Close the form without creating anything.
    pub fn cancel(&mut self) {
        self.form.hide();
        self.state = InteractionState::Idle;
    }

    /// Create a workout from the form at the pending location.
    ///
    /// Invalid input warns the user and leaves the form open with nothing
    /// changed. A save failure is reported after the workout has been added
    /// everywhere else.
    pub fn submit(&mut self) -> Result<WorkoutId, SubmitError> {
        let InteractionState::FormOpen { pending } = self.state else {
            return Err(SubmitError::NoPendingLocation);
        };

        let input = self.form.input();
        let kind = input.kind;
        let draft = match input.validate() {
            Ok(draft) => draft,
            Err(e) => {
                tracing::warn!("Rejected {} workout: {}", kind, e);
                self.prompter.warn(invalid_input_message(kind));
                return Err(e.into());
            }
        };

        let workout = draft.build(pending);
        let id = workout.id().clone();
        if self.map_ready {
            self.context
                .markers
                .place(&mut self.map, &workout, &self.settings);
        }
        self.list.render_entry(&workout);
        self.context.store.add(workout);

        self.form.hide();
        self.state = InteractionState::Idle;
        tracing::info!("Added {} workout {}", kind, id);

        self.save()?;
        Ok(id)
    }

    /// Delete one workout after the user confirms.
    ///
    /// Returns `false` when the id is unknown or the user declines.
    pub fn delete(&mut self, id: &WorkoutId) -> Result<bool, PersistenceError> {
        if !self.context.store.contains(id) {
            tracing::debug!("Ignoring delete of unknown workout {}", id);
            return Ok(false);
        }
        if !self.prompter.confirm(CONFIRM_DELETE) {
            tracing::debug!("Delete of workout {} declined", id);
            return Ok(false);
        }

        self.context.store.remove(id);
        self.context.markers.remove_for(&mut self.map, id);
        self.list.remove_entry(id);
        tracing::info!("Deleted workout {}", id);

        self.save()?;
        self.prompter.inform(WORKOUT_DELETED);
        Ok(true)
    }

    /// Load a workout into the form at its location, then delete it.
    ///
    /// The next submit creates a new workout with a new id and timestamp.
    /// If the user declines the deletion the original stays and the form
    /// remains open. Returns `false` when the id is unknown.
    pub fn edit(&mut self, id: &WorkoutId) -> Result<bool, PersistenceError> {
        let Some(workout) = self.context.store.find(id) else {
            tracing::debug!("Ignoring edit of unknown workout {}", id);
            return Ok(false);
        };

        let pending = workout.coords();
        self.form.load(workout);
        self.state = InteractionState::FormOpen { pending };

        self.delete(id)?;
        Ok(true)
    }

    /// Reorder by `field`, largest first, and redraw the list.
    pub fn sort(&mut self, field: SortField) -> Result<(), PersistenceError> {
        self.context
            .store
            .sort_by(field, SortDirection::Descending);

        self.list.clear_all_entries();
        for workout in self.context.store.all() {
            self.list.render_entry(workout);
        }
        tracing::info!("Sorted workouts by {}", field);

        self.save()
    }

    /// Delete every workout after the user confirms.
    pub fn delete_all(&mut self) -> Result<bool, PersistenceError> {
        if !self.prompter.confirm(CONFIRM_DELETE_ALL) {
            tracing::debug!("Delete all declined");
            return Ok(false);
        }

        self.context.markers.clear_all(&mut self.map);
        let removed = self.context.store.clear();
        self.list.clear_all_entries();
        tracing::info!("Deleted all {} workouts", removed.len());

        self.save()?;
        self.prompter.inform(ALL_WORKOUTS_DELETED);
        Ok(true)
    }

    /// Center the map on a workout. Returns whether the view moved.
    pub fn focus(&mut self, id: &WorkoutId) -> bool {
        if !self.map_ready {
            return false;
        }
        let Some(workout) = self.context.store.find(id) else {
            tracing::debug!("Ignoring focus on unknown workout {}", id);
            return false;
        };

        self.map.pan_to(workout.coords(), self.settings.zoom_level);
        true
    }

    /// Fit the map to every workout. Returns whether the view moved.
    pub fn show_all(&mut self) -> bool {
        if !self.map_ready || self.context.store.is_empty() {
            return false;
        }

        let coords: Vec<Coordinates> = self.context.store.all().iter().map(Workout::coords).collect();
        self.map.fit_bounds(&coords, self.settings.fit_padding_px);
        true
    }

    /// Drop the persisted value and start over with nothing.
    pub fn reset(&mut self) -> Result<(), PersistenceError> {
        self.persistence.reset()?;

        self.context.markers.clear_all(&mut self.map);
        self.context.store.clear();
        self.list.clear_all_entries();
        self.form.hide();
        self.state = InteractionState::Idle;
        tracing::info!("Session reset");

        Ok(())
    }

    fn save(&mut self) -> Result<(), PersistenceError> {
        self.persistence.save(self.context.store.all()).map_err(|e| {
            tracing::error!("Failed to save workouts: {}", e);
            e
        })
    }

    /// Whether the marker registry mirrors the store for the current map state.
    ///
    /// With a live map both id sets are equal. Without one the registry is
    /// empty and markers are placed once the map comes up.
    pub fn views_consistent(&self) -> bool {
        if self.map_ready {
            self.context.markers_match_store()
        } else {
            self.context.markers.is_empty()
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn context(&self) -> &WorkoutContext {
        &self.context
    }

    pub fn workouts(&self) -> &[Workout] {
        self.context.store.all()
    }

    pub fn form(&self) -> &WorkoutForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut WorkoutForm {
        &mut self.form
    }

    pub fn is_map_ready(&self) -> bool {
        self.map_ready
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn prompter_mut(&mut self) -> &mut P {
        &mut self.prompter
    }

    pub fn persistence(&self) -> &PersistenceAdapter<D> {
        &self.persistence
    }

    pub fn settings(&self) -> &MapSettings {
        &self.settings
    }
}
