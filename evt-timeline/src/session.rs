//! Command editing session
//!
//! Holds the event's command source alongside its timeline and lets one
//! command at a time be opened, edited as a decoded record, and written back.

use crate::command::TimelineCommand;
use crate::timeline::Timeline;
use crate::{Error, Result};
use evt_core::{CommandCatalog, CommandHeader, CommandSource, Record};

/// Session configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionOptions {
    /// Never write records back to the source
    pub read_only: bool,
}

/// The command currently open for editing
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveCommand {
    pub command: TimelineCommand,
    pub header: CommandHeader,
    pub record: Record,
}

/// A loaded event together with its timeline
pub struct Session<'c, S> {
    source: S,
    catalog: &'c CommandCatalog,
    timeline: Timeline,
    options: SessionOptions,
    active: Option<ActiveCommand>,
}

impl<'c, S: CommandSource> Session<'c, S> {
    /// Builds the timeline for `source` and starts a session over it
    pub fn new(source: S, catalog: &'c CommandCatalog, options: SessionOptions) -> Self {
        let timeline = Timeline::from_source(&source);
        Self {
            source,
            catalog,
            timeline,
            options,
            active: None,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    pub fn options(&self) -> SessionOptions {
        self.options
    }

    pub fn active(&self) -> Option<&ActiveCommand> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveCommand> {
        self.active.as_mut()
    }

    /// Decodes a command's parameter block and makes it the active command
    ///
    /// A previously open command is discarded without saving. On failure the
    /// previous active command is left untouched.
    pub fn open(&mut self, command: &TimelineCommand) -> Result<&ActiveCommand> {
        let kind = command.kind;
        let index = command.source_index;
        let not_found = || evt_core::Error::CommandNotFound { kind, index };

        let header = self.source.header(kind, index).ok_or_else(not_found)?.clone();
        let bytes = self.source.parameter_block(kind, index).ok_or_else(not_found)?;
        let record = self.catalog.decode(&header.code, bytes)?;

        tracing::debug!(%kind, index, code = %header.code, opaque = record.is_opaque(), "opened command");
        Ok(&*self.active.insert(ActiveCommand {
            command: command.clone(),
            header,
            record,
        }))
    }

    /// Re-encodes the active record and stores it in the source
    ///
    /// Returns false without writing when the session is read-only.
    pub fn save(&mut self) -> Result<bool> {
        let active = self.active.as_ref().ok_or(Error::NoActiveCommand)?;
        if self.options.read_only {
            return Ok(false);
        }

        let bytes = self.catalog.encode(&active.record)?;
        let (kind, index) = (active.command.kind, active.command.source_index);
        self.source.store_parameter_block(kind, index, bytes)?;
        tracing::debug!(%kind, index, code = %active.header.code, "saved command");
        Ok(true)
    }

    /// Closes the active command, saving it first if requested
    ///
    /// Returns whether the record was written back. If the save fails the
    /// command stays open.
    pub fn close(&mut self, save_first: bool) -> Result<bool> {
        let saved = if save_first { self.save()? } else { false };
        self.active = None;
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evt_core::command_types::Mab;
    use evt_core::{CommandKind, CommandRecord, Event, RawCommand};

    fn mab_block(last_frame: i32) -> Vec<u8> {
        let mab = Mab {
            primary_animation_index: 4,
            primary_animation_speed: 1.0,
            last_frame,
            unk_i32: [1, 2, 3, 4, 5],
            ..Mab::default()
        };
        mab.encode().unwrap()
    }

    fn event() -> Event {
        let mut event = Event::new(20);
        event.push(
            CommandKind::General,
            RawCommand::new(CommandHeader::new("MAB_", 3, 12), mab_block(30)),
        );
        event.push(
            CommandKind::Audio,
            RawCommand::new(CommandHeader::new("Snd_", 3, 1), vec![7, 7, 7, 7]),
        );
        event
    }

    #[test]
    fn test_edit_and_save() {
        let catalog = CommandCatalog::new();
        let mut session = Session::new(event(), &catalog, SessionOptions::default());

        let command = session.timeline().category(3).unwrap().commands()[0].clone();
        let active = session.open(&command).unwrap();
        assert_eq!(active.header.frame_duration, 12);

        match &mut session.active_mut().unwrap().record {
            Record::Mab(mab) => mab.last_frame = 45,
            other => panic!("expected MAB_, got {other:?}"),
        }
        assert!(session.close(true).unwrap());
        assert!(session.active().is_none());

        let event = session.into_source();
        assert_eq!(
            event.parameter_block(CommandKind::General, 0),
            Some(mab_block(45).as_slice())
        );
    }

    #[test]
    fn test_read_only_never_writes() {
        let catalog = CommandCatalog::new();
        let options = SessionOptions { read_only: true };
        let mut session = Session::new(event(), &catalog, options);

        let command = session.timeline().category(3).unwrap().commands()[0].clone();
        session.open(&command).unwrap();
        if let Record::Mab(mab) = &mut session.active_mut().unwrap().record {
            mab.last_frame = 99;
        }
        assert!(!session.close(true).unwrap());
        assert_eq!(session.source().commands[0].data, mab_block(30));
    }

    #[test]
    fn test_unknown_code_opens_opaque() {
        let catalog = CommandCatalog::new();
        let mut session = Session::new(event(), &catalog, SessionOptions::default());

        let command = session.timeline().commands_at(3)[1].clone();
        assert!(command.is_audio());
        let active = session.open(&command).unwrap();
        assert!(active.record.is_opaque());

        assert!(session.save().unwrap());
        assert_eq!(session.source().audio_commands[0].data, vec![7, 7, 7, 7]);
    }

    #[test]
    fn test_invalid_record_fails_open_only() {
        let mut source = event();
        source.commands[0].data[60] = 1;
        let catalog = CommandCatalog::new();
        let mut session = Session::new(source, &catalog, SessionOptions::default());

        // the header is still on the timeline
        let command = session.timeline().category(3).unwrap().commands()[0].clone();
        let err = session.open(&command).unwrap_err();
        assert!(matches!(err, Error::Core(ref e) if e.is_validation_error()));
        assert!(session.active().is_none());
        assert_eq!(session.timeline().total_commands(), 2);
    }

    #[test]
    fn test_close_without_active() {
        let catalog = CommandCatalog::new();
        let mut session = Session::new(event(), &catalog, SessionOptions::default());
        assert!(!session.close(false).unwrap());
        assert!(matches!(session.close(true), Err(Error::NoActiveCommand)));
    }
}
