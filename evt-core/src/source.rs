//! Raw command lists of an event
//!
//! An event carries two ordered lists of commands, general and audio. Each
//! command has a header (code, start frame, duration) and an undecoded
//! parameter block. The timeline only reads headers; the catalog decodes
//! blocks on demand.

use crate::{Error, Result};
use std::fmt;

/// Which of the two command lists a command lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandKind {
    General,
    Audio,
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::General => write!(f, "general"),
            CommandKind::Audio => write!(f, "audio"),
        }
    }
}

/// Timing header of a command
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandHeader {
    /// Four-character command code
    pub code: String,
    /// First frame the command is active on (may lie outside the event)
    pub frame_start: i32,
    /// Length of the command in frames
    pub frame_duration: i32,
}

impl CommandHeader {
    /// Creates a new command header
    pub fn new(code: impl Into<String>, frame_start: i32, frame_duration: i32) -> Self {
        Self {
            code: code.into(),
            frame_start,
            frame_duration,
        }
    }
}

/// A command header together with its undecoded parameter block
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawCommand {
    pub header: CommandHeader,
    #[cfg_attr(feature = "serde", serde(default))]
    pub data: Vec<u8>,
}

impl RawCommand {
    pub fn new(header: CommandHeader, data: Vec<u8>) -> Self {
        Self { header, data }
    }
}

/// Supplier of command headers and parameter blocks
///
/// Implemented by whatever owns the loaded event file. The core never
/// persists anything itself; it only hands re-encoded blocks back here.
pub trait CommandSource {
    /// Duration of the event in frames
    fn frame_count(&self) -> usize;

    /// Number of commands in one list
    fn command_count(&self, kind: CommandKind) -> usize;

    /// Header of a command, by list and index
    fn header(&self, kind: CommandKind, index: usize) -> Option<&CommandHeader>;

    /// Parameter block of a command, by list and index
    fn parameter_block(&self, kind: CommandKind, index: usize) -> Option<&[u8]>;

    /// Replaces the parameter block of a command
    fn store_parameter_block(&mut self, kind: CommandKind, index: usize, bytes: Vec<u8>) -> Result<()>;

    /// All headers of one list, in source order
    fn headers(&self, kind: CommandKind) -> Vec<&CommandHeader> {
        (0..self.command_count(kind))
            .filter_map(|i| self.header(kind, i))
            .collect()
    }
}

/// An event held fully in memory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Event {
    /// Duration in frames
    pub frame_count: usize,
    /// General commands
    #[cfg_attr(feature = "serde", serde(default))]
    pub commands: Vec<RawCommand>,
    /// Audio commands
    #[cfg_attr(feature = "serde", serde(default))]
    pub audio_commands: Vec<RawCommand>,
}

impl Event {
    /// Creates an event with no commands
    pub fn new(frame_count: usize) -> Self {
        Self {
            frame_count,
            commands: Vec::new(),
            audio_commands: Vec::new(),
        }
    }

    /// Appends a command to one list, returning its index
    pub fn push(&mut self, kind: CommandKind, command: RawCommand) -> usize {
        let list = self.list_mut(kind);
        list.push(command);
        list.len() - 1
    }

    pub fn list(&self, kind: CommandKind) -> &[RawCommand] {
        match kind {
            CommandKind::General => &self.commands,
            CommandKind::Audio => &self.audio_commands,
        }
    }

    fn list_mut(&mut self, kind: CommandKind) -> &mut Vec<RawCommand> {
        match kind {
            CommandKind::General => &mut self.commands,
            CommandKind::Audio => &mut self.audio_commands,
        }
    }
}

impl CommandSource for Event {
    fn frame_count(&self) -> usize {
        self.frame_count
    }

    fn command_count(&self, kind: CommandKind) -> usize {
        self.list(kind).len()
    }

    fn header(&self, kind: CommandKind, index: usize) -> Option<&CommandHeader> {
        self.list(kind).get(index).map(|c| &c.header)
    }

    fn parameter_block(&self, kind: CommandKind, index: usize) -> Option<&[u8]> {
        self.list(kind).get(index).map(|c| c.data.as_slice())
    }

    fn store_parameter_block(&mut self, kind: CommandKind, index: usize, bytes: Vec<u8>) -> Result<()> {
        let command = self
            .list_mut(kind)
            .get_mut(index)
            .ok_or(Error::CommandNotFound { kind, index })?;
        command.data = bytes;
        Ok(())
    }
}
