//! Interaction controller: the editor session.
//!
//! [`Editor`] owns the observation list, the derived available blocks, and
//! the selection, and is the only component allowed to mutate them; the
//! rendering surface reads, never writes, so the partition invariant
//! (§`services::availability`) survives every gesture. Every completed
//! mutation funnels through one recompute choke point that re-derives the
//! available blocks and bumps a revision counter the renderer polls.

pub mod events;
pub mod layout;

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::api::{
    AvailableBlock, AvailableBlockId, MoonRecord, Observation, ObservationId, ObservationRecord,
    TwilightRecord,
};
use crate::config::EditorConfig;
use crate::error::EditError;
use crate::form::FormEdit;
use crate::models::{NightHour, NightInterval};
use crate::selection::Selection;
use crate::services::documents::{self, Documents};
use crate::services::navigation::{self, Direction};
use crate::services::{availability, partition_holds};

use events::{DragState, GestureOutcome, Key, KeyResponse, Modifiers, Point, Rect};
use layout::Layout;

/// Which edge of the selected observation a nudge control adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeEdge {
    Start,
    End,
}

/// An item on the timeline: an observation or an available block.
///
/// Arrow-key navigation walks the union of both kinds, sorted by start time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineItem {
    Observation(ObservationId),
    Available(AvailableBlockId),
}

/// The editor session.
pub struct Editor {
    config: EditorConfig,
    twilight: Vec<TwilightRecord>,
    moon: Vec<MoonRecord>,
    /// Cached twilight segments; only changes when twilight data changes.
    twilight_segments: Vec<NightInterval>,
    observations: Vec<Observation>,
    available: Vec<AvailableBlock>,
    selection: Selection,
    drag: DragState,
    next_observation_id: u64,
    next_block_id: u64,
    revision: u64,
}

impl Editor {
    /// Build a session from the loaded input documents.
    ///
    /// Records outside the configured date range are dropped (filtering, not
    /// erroring); records with degenerate intervals are skipped with a
    /// warning; overlapping observations on one night are an input
    /// precondition violation and reject the whole document.
    pub fn new(config: EditorConfig, documents: Documents) -> Result<Self, EditError> {
        let twilight = documents::filter_to_range(documents.twilight, &config, |r| r.date);
        let moon = documents::filter_to_range(documents.moon, &config, |r| r.date);
        let records = documents::filter_to_range(documents.observations, &config, |r| r.date);

        let mut editor = Editor {
            twilight_segments: availability::initialize(&twilight),
            config,
            twilight,
            moon,
            observations: Vec::new(),
            available: Vec::new(),
            selection: Selection::Empty,
            drag: DragState::Idle,
            next_observation_id: 1,
            next_block_id: 1,
            revision: 0,
        };
        editor.observations = editor.adopt_records(records)?;
        editor.recompute();
        Ok(editor)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn available_blocks(&self) -> &[AvailableBlock] {
        &self.available
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn moon(&self) -> &[MoonRecord] {
        &self.moon
    }

    pub fn twilight(&self) -> &[TwilightRecord] {
        &self.twilight
    }

    /// Bumped once per completed recompute-and-notify cycle; the renderer
    /// redraws when it observes a change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn observation(&self, id: ObservationId) -> Option<&Observation> {
        self.observations.iter().find(|o| o.id == id)
    }

    pub fn available_block(&self, id: AvailableBlockId) -> Option<&AvailableBlock> {
        self.available.iter().find(|b| b.id == id)
    }

    /// Live lasso rectangle for the renderer, while a drag is in progress.
    pub fn lasso_rect(&self) -> Option<Rect> {
        self.drag.live_rect()
    }

    /// Tooltip text for an observation, including the night's moon
    /// illumination.
    pub fn tooltip_for(&self, id: ObservationId) -> Option<String> {
        let obs = self.observation(id)?;
        let record = &obs.record;
        let illumination = self
            .moon
            .iter()
            .find(|m| m.date == record.date)
            .map(|m| m.illumination)
            .unwrap_or(0.0);
        Some(format!(
            "{}\n{}\nStart: {}\nEnd: {}\nDuration: {}\nMoon Illumination: {:.2}%",
            record.date,
            record.tooltip,
            record.start_time.format_hhmm(),
            record.end_time.format_hhmm(),
            crate::models::format_duration_hhmm(record.duration()),
            illumination * 100.0
        ))
    }

    // ------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------

    pub fn pointer_down(&mut self, at: Point, modifiers: Modifiers) {
        self.drag.pointer_down(at, modifiers);
    }

    /// Returns the live lasso rectangle while dragging.
    pub fn pointer_move(&mut self, at: Point) -> Option<Rect> {
        self.drag.pointer_move(at)
    }

    /// Complete a pointer gesture against the given layout.
    pub fn pointer_up(&mut self, at: Point, layout: &dyn Layout) {
        let threshold = self.config.lasso_threshold_px;
        match self.drag.pointer_up(at, threshold) {
            Some(GestureOutcome::Click { at, shift }) => self.resolve_click(at, shift, layout),
            Some(GestureOutcome::Lasso { rect, shift }) => self.resolve_lasso(rect, shift, layout),
            None => {}
        }
    }

    fn resolve_click(&mut self, at: Point, shift: bool, layout: &dyn Layout) {
        // Observations draw on top of available blocks; test them first,
        // topmost (last drawn) first.
        let hit_observation = self
            .observations
            .iter()
            .rev()
            .find(|o| {
                o.interval()
                    .and_then(|i| layout.bounds(&i))
                    .is_some_and(|b| b.contains(at))
            })
            .map(|o| o.id);

        if let Some(id) = hit_observation {
            if shift {
                self.selection.shift_click_observation(id);
            } else {
                self.selection.click_observation(id);
            }
            self.notify();
            return;
        }

        let hit_block = self
            .available
            .iter()
            .rev()
            .find(|b| layout.bounds(&b.interval).is_some_and(|r| r.contains(at)))
            .map(|b| b.id);

        if let Some(id) = hit_block {
            // Available blocks are single-select; shift does not extend.
            self.selection.click_available(id);
            self.notify();
        } else if !shift {
            // Plain click on empty background clears; shift-click keeps the
            // selection being built.
            self.selection.clear();
            self.notify();
        }
    }

    fn resolve_lasso(&mut self, rect: Rect, shift: bool, layout: &dyn Layout) {
        let enclosed: Vec<ObservationId> = self
            .observations
            .iter()
            .filter(|o| {
                o.interval()
                    .and_then(|i| layout.center(&i))
                    .is_some_and(|c| rect.contains(c))
            })
            .map(|o| o.id)
            .collect();

        if shift {
            self.selection.union_observations(enclosed);
        } else {
            self.selection.replace_observations(enclosed);
        }
        self.notify();
    }

    // ------------------------------------------------------------------
    // Keyboard events
    // ------------------------------------------------------------------

    /// Handle a key press. `typing` is true while a text field holds focus;
    /// everything but Escape is suppressed then so normal caret movement and
    /// character entry still work.
    pub fn key(&mut self, key: Key, typing: bool) -> KeyResponse {
        if key == Key::Escape {
            return if self.abort_lasso() {
                KeyResponse::Handled
            } else {
                KeyResponse::Ignored
            };
        }
        if typing {
            return KeyResponse::Ignored;
        }

        match key {
            Key::Add => {
                if self.add_observation().is_some() {
                    KeyResponse::Handled
                } else {
                    KeyResponse::Ignored
                }
            }
            Key::Delete => {
                if self.delete_selected() > 0 {
                    KeyResponse::Handled
                } else {
                    KeyResponse::Ignored
                }
            }
            Key::ArrowLeft => {
                self.navigate_horizontal(Direction::Earlier);
                KeyResponse::Handled
            }
            Key::ArrowRight => {
                self.navigate_horizontal(Direction::Later);
                KeyResponse::Handled
            }
            Key::ArrowUp => {
                self.navigate_vertical(true);
                KeyResponse::Handled
            }
            Key::ArrowDown => {
                self.navigate_vertical(false);
                KeyResponse::Handled
            }
            // Escape was handled above.
            Key::Escape => KeyResponse::Ignored,
        }
    }

    /// Abort an in-progress lasso, leaving the pre-drag selection intact.
    pub fn abort_lasso(&mut self) -> bool {
        self.drag.abort()
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Create an observation at the start of the selected available block.
    ///
    /// Duration is the configured default capped to the block; the new
    /// observation becomes the sole selection. No-op unless exactly one
    /// available block is selected.
    pub fn add_observation(&mut self) -> Option<ObservationId> {
        let block_id = self.selection.single_available()?;
        let block = self.available_block(block_id)?;

        let start = block.interval.start;
        let end = NightHour::new(
            (start.value() + self.config.default_duration_hours).min(block.interval.end.value()),
        );

        let record = ObservationRecord {
            date: block.interval.date,
            start_time: start,
            end_time: end,
            category: self.config.default_category.clone(),
            label: self.config.default_label.clone(),
            tooltip: self.config.default_category.clone(),
            notes: None,
            filters: self.config.default_filters.clone(),
        };

        let id = self.assign_id();
        info!(
            "Added observation {} on {} [{} – {}]",
            id,
            record.date,
            record.start_time.format_hhmm(),
            record.end_time.format_hhmm()
        );
        self.observations.push(Observation { id, record });
        self.selection.click_observation(id);
        self.recompute();
        Some(id)
    }

    /// Delete every selected observation. Returns how many were removed.
    pub fn delete_selected(&mut self) -> usize {
        let ids = self.selection.observation_ids();
        if ids.is_empty() {
            return 0;
        }
        let before = self.observations.len();
        self.observations.retain(|o| !ids.contains(&o.id));
        let removed = before - self.observations.len();
        info!("Deleted {} observation(s)", removed);
        self.selection.clear();
        self.recompute();
        removed
    }

    /// Nudge the selected observation's start or end time toward the nearest
    /// stopping point (twilight or observation boundary), falling back to a
    /// fixed step. No-op without a single observation selected; rejected if
    /// the interval would invert.
    pub fn nudge_time(&mut self, edge: TimeEdge, dir: Direction) -> Result<(), EditError> {
        let Some(id) = self.selection.single_observation() else {
            return Ok(());
        };
        let Some(record) = self.observation(id).map(|o| o.record.clone()) else {
            return Ok(());
        };

        let stops = navigation::stopping_points(
            self.twilight_for(record.date),
            &self.observations,
            id,
        );
        let current = match edge {
            TimeEdge::Start => record.start_time.value(),
            TimeEdge::End => record.end_time.value(),
        };
        let nudged = navigation::nudge(
            current,
            dir,
            &stops,
            self.config.nudge_step_hours,
            self.config.time_min,
            self.config.time_max,
        );

        let (start, end) = match edge {
            TimeEdge::Start => (NightHour::new(nudged), record.end_time),
            TimeEdge::End => (record.start_time, NightHour::new(nudged)),
        };
        self.set_observation_times(id, record.date, start, end)
    }

    /// Apply one edit-form field write to the selected observation.
    ///
    /// Invalid input is rejected and the previous value kept; fields that
    /// affect geometry or availability trigger a full recompute.
    pub fn apply_edit(&mut self, edit: FormEdit) -> Result<(), EditError> {
        let Some(id) = self.selection.single_observation() else {
            return Ok(());
        };
        let Some(record) = self.observation(id).map(|o| o.record.clone()) else {
            return Ok(());
        };

        match edit {
            FormEdit::Date(text) => {
                let date: NaiveDate = text
                    .parse()
                    .map_err(|_| EditError::InvalidDateText(text.clone()))?;
                if !self.config.in_date_range(date) {
                    return Err(EditError::DateOutOfRange(date));
                }
                self.set_observation_times(id, date, record.start_time, record.end_time)
            }
            FormEdit::StartTime(text) => {
                let start = NightHour::parse_hhmm(&text)?;
                self.set_observation_times(id, record.date, start, record.end_time)
            }
            FormEdit::EndTime(text) => {
                let end = NightHour::parse_hhmm(&text)?;
                self.set_observation_times(id, record.date, record.start_time, end)
            }
            FormEdit::Category(category) => {
                self.config.validate_category(&category)?;
                self.mutate_record(id, |r| r.category = category);
                self.recompute();
                Ok(())
            }
            FormEdit::Label(label) => {
                self.mutate_record(id, |r| r.label = label);
                self.notify();
                Ok(())
            }
            FormEdit::Notes(notes) => {
                self.mutate_record(id, |r| {
                    r.notes = if notes.is_empty() { None } else { Some(notes) }
                });
                self.notify();
                Ok(())
            }
            FormEdit::Filters(filters) => {
                self.config.validate_filters(&filters)?;
                self.mutate_record(id, |r| r.filters = filters);
                self.notify();
                Ok(())
            }
        }
    }

    /// Replace the observation list from a user-supplied document.
    ///
    /// Records outside the date range are filtered out; overlapping
    /// observations reject the import and leave the session unchanged.
    /// Returns the number of records adopted.
    pub fn import(&mut self, json: &str) -> Result<usize, EditError> {
        let records = documents::parse_observations(json)?;
        let records = documents::filter_to_range(records, &self.config, |r| r.date);
        let adopted = self.adopt_records(records)?;
        let count = adopted.len();

        info!("Imported {} observation(s)", count);
        self.observations = adopted;
        self.selection.clear();
        self.recompute();
        Ok(count)
    }

    /// Serialize the current observation list to the input document shape.
    pub fn export(&self) -> anyhow::Result<String> {
        let records: Vec<ObservationRecord> =
            self.observations.iter().map(|o| o.record.clone()).collect();
        documents::export_observations(&records)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    fn navigate_horizontal(&mut self, dir: Direction) {
        let Some((item, interval)) = self.selected_item() else {
            return;
        };
        let items = self.night_items(interval.date);
        let Some(current) = items.iter().position(|(i, _)| *i == item) else {
            return;
        };
        if let Some(next) = navigation::horizontal_neighbor(items.len(), current, dir) {
            self.select_item(items[next].0);
        }
    }

    fn navigate_vertical(&mut self, up: bool) {
        let Some((_, interval)) = self.selected_item() else {
            return;
        };
        let adjacent = if up {
            self.config.previous_date(interval.date)
        } else {
            self.config.next_date(interval.date)
        };
        let Some(date) = adjacent else {
            return;
        };

        let items = self.night_items(date);
        let midpoints: Vec<f64> = items.iter().map(|(_, i)| i.midpoint().value()).collect();
        if let Some(index) = navigation::nearest_by_midpoint(&midpoints, interval.midpoint().value())
        {
            self.select_item(items[index].0);
        }
    }

    /// The single selected item of either kind, with its interval.
    fn selected_item(&self) -> Option<(TimelineItem, NightInterval)> {
        if let Some(id) = self.selection.single_observation() {
            let interval = self.observation(id)?.interval()?;
            return Some((TimelineItem::Observation(id), interval));
        }
        if let Some(id) = self.selection.single_available() {
            let interval = self.available_block(id)?.interval;
            return Some((TimelineItem::Available(id), interval));
        }
        None
    }

    /// Observations and available blocks of one night, sorted by start time.
    fn night_items(&self, date: NaiveDate) -> Vec<(TimelineItem, NightInterval)> {
        let mut items: Vec<(TimelineItem, NightInterval)> = Vec::new();
        for obs in &self.observations {
            if obs.record.date == date {
                if let Some(interval) = obs.interval() {
                    items.push((TimelineItem::Observation(obs.id), interval));
                }
            }
        }
        for block in &self.available {
            if block.interval.date == date {
                items.push((TimelineItem::Available(block.id), block.interval));
            }
        }
        items.sort_by(|(_, a), (_, b)| {
            a.start
                .value()
                .partial_cmp(&b.start.value())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        items
    }

    fn select_item(&mut self, item: TimelineItem) {
        match item {
            TimelineItem::Observation(id) => self.selection.click_observation(id),
            TimelineItem::Available(id) => self.selection.click_available(id),
        }
        self.notify();
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn assign_id(&mut self) -> ObservationId {
        let id = ObservationId::new(self.next_observation_id);
        self.next_observation_id += 1;
        id
    }

    fn twilight_for(&self, date: NaiveDate) -> Option<&TwilightRecord> {
        self.twilight.iter().find(|t| t.date == date)
    }

    fn mutate_record(&mut self, id: ObservationId, f: impl FnOnce(&mut ObservationRecord)) {
        if let Some(obs) = self.observations.iter_mut().find(|o| o.id == id) {
            f(&mut obs.record);
        }
    }

    /// Validate and write new date/times for one observation, then recompute.
    fn set_observation_times(
        &mut self,
        id: ObservationId,
        date: NaiveDate,
        start: NightHour,
        end: NightHour,
    ) -> Result<(), EditError> {
        if start.value() >= end.value() {
            return Err(EditError::InvertedInterval);
        }
        for t in [start, end] {
            if !self.config.in_time_domain(t) {
                return Err(EditError::TimeOutOfDomain(t.value()));
            }
        }
        let interval = NightInterval::new(date, start, end).ok_or(EditError::InvertedInterval)?;
        if self.overlaps_other(id, &interval) {
            return Err(EditError::OverlappingObservation { date });
        }

        self.mutate_record(id, |r| {
            r.date = date;
            r.start_time = start;
            r.end_time = end;
        });
        self.recompute();
        Ok(())
    }

    fn overlaps_other(&self, id: ObservationId, interval: &NightInterval) -> bool {
        self.observations.iter().any(|o| {
            o.id != id
                && o.interval()
                    .is_some_and(|existing| existing.overlaps(interval))
        })
    }

    /// Assign ids to incoming records, skipping degenerate intervals and
    /// rejecting same-night overlaps.
    fn adopt_records(
        &mut self,
        records: Vec<ObservationRecord>,
    ) -> Result<Vec<Observation>, EditError> {
        let mut adopted: Vec<Observation> = Vec::with_capacity(records.len());
        for record in records {
            let Some(interval) = record.interval() else {
                warn!(
                    "Skipping observation on {} with degenerate interval",
                    record.date
                );
                continue;
            };
            for existing in &adopted {
                if existing
                    .interval()
                    .is_some_and(|other| other.overlaps(&interval))
                {
                    return Err(EditError::OverlappingObservation { date: record.date });
                }
            }
            let id = self.assign_id();
            adopted.push(Observation { id, record });
        }
        Ok(adopted)
    }

    /// The recompute-and-notify choke point: every completed mutation lands
    /// here so the partition invariant is re-established in exactly one
    /// place.
    fn recompute(&mut self) {
        let remainders = availability::prune(&self.twilight_segments, &self.observations);
        debug_assert!(partition_holds(&remainders, &self.observations));

        let mut blocks = Vec::with_capacity(remainders.len());
        for interval in remainders {
            let id = AvailableBlockId::new(self.next_block_id);
            self.next_block_id += 1;
            blocks.push(AvailableBlock { id, interval });
        }
        self.available = blocks;

        // Available-block ids do not survive recomputation; a stale
        // selection falls back to empty.
        if let Selection::Available(id) = self.selection {
            if self.available_block(id).is_none() {
                self.selection.clear();
            }
        }

        debug!(
            "Recomputed availability: {} observation(s), {} available block(s)",
            self.observations.len(),
            self.available.len()
        );
        self.notify();
    }

    /// Selection-only changes still need a redraw.
    fn notify(&mut self) {
        self.revision += 1;
    }
}
