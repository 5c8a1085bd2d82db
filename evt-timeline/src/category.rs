//! Timeline categories and per-frame stacking

use crate::command::TimelineCommand;
use std::collections::HashMap;

/// Display names of the categories, in index order
pub const CATEGORY_NAMES: [&str; 17] = [
    "Field", "Env", "Camera", "Model", "Effect", "Crowd", "Image", "Movie", "Dialogue",
    "Texture", "UI", "Post", "Audio", "Script", "Timing", "Hardware", "Other",
];

/// Number of categories on every timeline
pub const CATEGORY_COUNT: usize = CATEGORY_NAMES.len();

/// A row group of the timeline holding the commands of one kind
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Category {
    name: &'static str,
    index: usize,
    frame_count: usize,
    commands: Vec<TimelineCommand>,
    max_in_one_frame: usize,
    frame_counts: HashMap<usize, usize>,
    is_open: bool,
}

impl Category {
    /// Creates an empty, open category
    pub fn new(name: &'static str, index: usize, frame_count: usize) -> Self {
        Self {
            name,
            index,
            frame_count,
            commands: Vec::new(),
            max_in_one_frame: 0,
            frame_counts: HashMap::new(),
            is_open: true,
        }
    }

    /// Builds the fixed set of categories for a timeline
    pub fn standard_set(frame_count: usize) -> Vec<Self> {
        CATEGORY_NAMES
            .into_iter()
            .enumerate()
            .map(|(index, name)| Self::new(name, index, frame_count))
            .collect()
    }

    /// Appends a command, assigning its stacking slot within its start frame
    ///
    /// Slots are handed out in insertion order and never reassigned.
    pub fn add_command(&mut self, mut command: TimelineCommand) -> usize {
        let count = self.frame_counts.entry(command.frame).or_insert(0);
        let position = *count;
        *count += 1;
        self.max_in_one_frame = self.max_in_one_frame.max(*count);

        command.position_within_frame = position;
        self.commands.push(command);
        position
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Commands in insertion order
    pub fn commands(&self) -> &[TimelineCommand] {
        &self.commands
    }

    /// Largest number of commands starting on any single frame
    pub fn max_in_one_frame(&self) -> usize {
        self.max_in_one_frame
    }

    /// Number of commands starting on `frame`
    pub fn occupancy(&self, frame: usize) -> usize {
        self.frame_counts.get(&frame).copied().unwrap_or(0)
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Sets the open flag, returning true if it changed
    pub(crate) fn set_open(&mut self, open: bool) -> bool {
        let changed = self.is_open != open;
        self.is_open = open;
        changed
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evt_core::{CommandHeader, CommandKind};

    fn command(code: &str, index: usize, frame: usize) -> TimelineCommand {
        let header = CommandHeader::new(code, frame as i32, 1);
        TimelineCommand::new(&header, CommandKind::General, index, frame)
    }

    #[test]
    fn test_standard_set() {
        let categories = Category::standard_set(100);
        assert_eq!(categories.len(), CATEGORY_COUNT);
        for (i, category) in categories.iter().enumerate() {
            assert_eq!(category.index(), i);
            assert_eq!(category.frame_count(), 100);
            assert!(category.is_open());
            assert!(category.is_empty());
            assert_eq!(category.max_in_one_frame(), 0);
        }
        assert_eq!(categories[0].name(), "Field");
        assert_eq!(categories[12].name(), "Audio");
        assert_eq!(categories[16].name(), "Other");
    }

    #[test]
    fn test_stacking_same_frame() {
        let mut category = Category::new("Model", 3, 10);
        assert_eq!(category.add_command(command("MAB_", 0, 5)), 0);
        assert_eq!(category.add_command(command("MAB_", 1, 5)), 1);
        assert_eq!(category.add_command(command("MAB_", 2, 5)), 2);

        let positions: Vec<usize> = category
            .commands()
            .iter()
            .map(|c| c.position_within_frame)
            .collect();
        assert_eq!(positions, vec![0, 1, 2]);
        assert_eq!(category.max_in_one_frame(), 3);
        assert_eq!(category.occupancy(5), 3);
        assert_eq!(category.occupancy(4), 0);
    }

    #[test]
    fn test_stacking_is_per_frame() {
        let mut category = Category::new("Model", 3, 10);
        category.add_command(command("MAB_", 0, 1));
        category.add_command(command("MAB_", 1, 2));
        category.add_command(command("MAB_", 2, 1));
        category.add_command(command("MAB_", 3, 2));
        category.add_command(command("MAB_", 4, 9));

        let slots: Vec<(usize, usize)> = category
            .commands()
            .iter()
            .map(|c| (c.source_index, c.position_within_frame))
            .collect();
        assert_eq!(slots, vec![(0, 0), (1, 0), (2, 1), (3, 1), (4, 0)]);
        assert_eq!(category.max_in_one_frame(), 2);
    }
}
