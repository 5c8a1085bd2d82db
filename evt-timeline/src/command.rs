//! Commands placed on the timeline

use evt_core::{CommandHeader, CommandKind};

/// A command as shown on the timeline
///
/// Points back to its entry in the event's command lists through `kind` and
/// `source_index`; the parameter block itself stays with the source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimelineCommand {
    pub code: String,
    pub kind: CommandKind,
    /// Index into the general or audio command list
    pub source_index: usize,
    /// Start frame, always within the timeline
    pub frame: usize,
    pub duration: i32,
    /// Stacking slot among commands of the same category starting on the same frame
    pub position_within_frame: usize,
}

impl TimelineCommand {
    /// Creates a timeline command from a header whose start frame is already range checked
    pub fn new(header: &CommandHeader, kind: CommandKind, source_index: usize, frame: usize) -> Self {
        Self {
            code: header.code.clone(),
            kind,
            source_index,
            frame,
            duration: header.frame_duration,
            position_within_frame: 0,
        }
    }

    pub fn is_audio(&self) -> bool {
        self.kind == CommandKind::Audio
    }

    /// Last frame covered by the command (equal to `frame` for zero or negative durations)
    pub fn end_frame(&self) -> usize {
        let span = usize::try_from(self.duration).unwrap_or(0).saturating_sub(1);
        self.frame.saturating_add(span)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_frame() {
        let header = CommandHeader::new("MAB_", 4, 3);
        let command = TimelineCommand::new(&header, CommandKind::General, 0, 4);
        assert_eq!(command.end_frame(), 6);
        assert!(!command.is_audio());

        let header = CommandHeader::new("Snd_", 4, 0);
        let command = TimelineCommand::new(&header, CommandKind::Audio, 1, 4);
        assert_eq!(command.end_frame(), 4);
        assert!(command.is_audio());
    }
}
