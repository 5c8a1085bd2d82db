//! Timeline model built from an event's command lists

use crate::category::Category;
use crate::classify::{classify, AUDIO_CATEGORY};
use crate::command::TimelineCommand;
use crate::frame::Frame;
use evt_core::{CommandHeader, CommandKind, CommandSource};
use std::fmt;

/// Display state change reported to a subscriber
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimelineChange {
    ActiveFrame(i64),
    CategoryOpen { index: usize, open: bool },
}

type Subscriber = Box<dyn FnMut(&TimelineChange)>;

/// Frames and categorized commands of one event
///
/// Built in a single pass. Afterwards only the display state (active frame,
/// category open flags) changes.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Timeline {
    frame_count: usize,
    frames: Vec<Frame>,
    categories: Vec<Category>,
    active_frame: i64,
    #[cfg_attr(feature = "serde", serde(skip))]
    subscriber: Option<Subscriber>,
}

/// Start frame as an index, if it lies within the timeline
fn frame_in_range(frame_start: i32, frame_count: usize) -> Option<usize> {
    usize::try_from(frame_start)
        .ok()
        .filter(|&frame| frame < frame_count)
}

impl Timeline {
    /// Builds a timeline from general and audio command headers
    ///
    /// Commands starting outside `[0, frame_count)` are left out.
    pub fn new(frame_count: usize, commands: &[CommandHeader], audio_commands: &[CommandHeader]) -> Self {
        Self::build(frame_count, commands.iter(), audio_commands.iter())
    }

    /// Builds a timeline from the headers of a command source
    pub fn from_source<S: CommandSource + ?Sized>(source: &S) -> Self {
        Self::build(
            source.frame_count(),
            source.headers(CommandKind::General),
            source.headers(CommandKind::Audio),
        )
    }

    fn build<'a>(
        frame_count: usize,
        commands: impl IntoIterator<Item = &'a CommandHeader>,
        audio_commands: impl IntoIterator<Item = &'a CommandHeader>,
    ) -> Self {
        let mut timeline = Self {
            frame_count,
            frames: (0..frame_count).map(Frame::new).collect(),
            categories: Category::standard_set(frame_count),
            active_frame: 0,
            subscriber: None,
        };

        let mut skipped = 0usize;
        for (index, header) in audio_commands.into_iter().enumerate() {
            if !timeline.place(header, CommandKind::Audio, index, AUDIO_CATEGORY) {
                skipped += 1;
            }
        }
        for (index, header) in commands.into_iter().enumerate() {
            let category = classify(&header.code);
            if !timeline.place(header, CommandKind::General, index, category) {
                skipped += 1;
            }
        }

        tracing::debug!(
            frame_count,
            placed = timeline.total_commands(),
            skipped,
            "built timeline"
        );
        timeline
    }

    fn place(&mut self, header: &CommandHeader, kind: CommandKind, index: usize, category: usize) -> bool {
        let Some(frame) = frame_in_range(header.frame_start, self.frame_count) else {
            tracing::trace!(
                %kind,
                index,
                code = %header.code,
                frame_start = header.frame_start,
                "command starts outside the timeline, skipping"
            );
            return false;
        };
        self.categories[category].add_command(TimelineCommand::new(header, kind, index, frame));
        true
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    /// Number of commands placed on the timeline
    pub fn total_commands(&self) -> usize {
        self.categories.iter().map(|c| c.commands().len()).sum()
    }

    /// Commands starting on `frame`, in category order
    pub fn commands_at(&self, frame: usize) -> Vec<&TimelineCommand> {
        self.categories
            .iter()
            .flat_map(|c| c.commands())
            .filter(|c| c.frame == frame)
            .collect()
    }

    /// Timeline entry for a command of the source, if it was placed
    pub fn find(&self, kind: CommandKind, source_index: usize) -> Option<&TimelineCommand> {
        self.categories
            .iter()
            .flat_map(|c| c.commands())
            .find(|c| c.kind == kind && c.source_index == source_index)
    }

    pub fn active_frame(&self) -> i64 {
        self.active_frame
    }

    /// Moves the frame cursor; the value is not bounds checked
    pub fn set_active_frame(&mut self, frame: i64) {
        if self.active_frame != frame {
            self.active_frame = frame;
            self.notify(TimelineChange::ActiveFrame(frame));
        }
    }

    /// Opens or closes a category row; returns false for an unknown index
    pub fn set_category_open(&mut self, index: usize, open: bool) -> bool {
        let Some(category) = self.categories.get_mut(index) else {
            return false;
        };
        if category.set_open(open) {
            self.notify(TimelineChange::CategoryOpen { index, open });
        }
        true
    }

    /// Flips a category's open flag, returning the new value
    pub fn toggle_category(&mut self, index: usize) -> Option<bool> {
        let open = !self.categories.get(index)?.is_open();
        self.set_category_open(index, open);
        Some(open)
    }

    /// Registers the callback receiving display state changes, replacing any previous one
    pub fn subscribe(&mut self, subscriber: impl FnMut(&TimelineChange) + 'static) {
        self.subscriber = Some(Box::new(subscriber));
    }

    pub fn unsubscribe(&mut self) {
        self.subscriber = None;
    }

    fn notify(&mut self, change: TimelineChange) {
        if let Some(subscriber) = self.subscriber.as_mut() {
            subscriber(&change);
        }
    }
}

impl fmt::Debug for Timeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Timeline")
            .field("frame_count", &self.frame_count)
            .field("categories", &self.categories)
            .field("active_frame", &self.active_frame)
            .field("subscribed", &self.subscriber.is_some())
            .finish_non_exhaustive()
    }
}
