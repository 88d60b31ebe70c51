//! Recorded notifications of a session, as JSON Lines.
//!
//! Each line is one [`GameEvent`], tagged by `event`:
//! ```text
//! {"event":"tile_inserted","at":[0,3],"value":2}
//! {"event":"tiles_merged","from":[[0,1],[0,3]],"to":[0,0],"value":4}
//! {"event":"score_changed","score":4}
//! ```
//! Replaying a transcript onto an empty board of the same dimension
//! reproduces the session's board and score.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::{Board, Cell, Coord, GameObserver, Score, Tile};
use crate::error::TranscriptError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    ScoreChanged { score: Score },
    TileRelocated { from: Coord, to: Coord, value: Tile },
    TilesMerged { from: [Coord; 2], to: Coord, value: Tile },
    TileInserted { at: Coord, value: Tile },
}

/// Observer that keeps every event in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    events: Vec<GameEvent>,
}

impl GameObserver for Transcript {
    fn score_changed(&mut self, score: Score) { self.events.push(GameEvent::ScoreChanged { score }) }

    fn tile_relocated(&mut self, from: Coord, to: Coord, value: Tile) {
        self.events.push(GameEvent::TileRelocated { from, to, value })
    }

    fn tiles_merged(&mut self, from: (Coord, Coord), to: Coord, value: Tile) {
        self.events.push(GameEvent::TilesMerged { from: [from.0, from.1], to, value })
    }

    fn tile_inserted(&mut self, at: Coord, value: Tile) { self.events.push(GameEvent::TileInserted { at, value }) }
}

impl Transcript {
    pub fn new() -> Self { Self::default() }

    #[inline]
    pub fn events(&self) -> &[GameEvent] { &self.events }

    #[inline]
    pub fn len(&self) -> usize { self.events.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.events.is_empty() }

    pub fn clear(&mut self) { self.events.clear() }

    /// Rebuild the board and final score from the events alone.
    pub fn replay(&self, dimension: usize) -> Result<(Board, Score), TranscriptError> {
        if dimension < 2 {
            return Err(TranscriptError::Dimension(dimension));
        }
        let mut board = Board::new(dimension);
        let mut score = 0;
        let mut put = |at: Coord, cell: Cell| -> Result<(), TranscriptError> {
            if at.0 >= dimension || at.1 >= dimension {
                return Err(TranscriptError::OutOfBounds { at, dimension });
            }
            board.set(at.0, at.1, cell);
            Ok(())
        };
        for event in &self.events {
            match *event {
                GameEvent::ScoreChanged { score: s } => score = s,
                GameEvent::TileRelocated { from, to, value } => {
                    put(from, Cell::Empty)?;
                    put(to, Cell::Tile(value))?;
                }
                GameEvent::TilesMerged { from: [a, b], to, value } => {
                    put(a, Cell::Empty)?;
                    put(b, Cell::Empty)?;
                    put(to, Cell::Tile(value))?;
                }
                GameEvent::TileInserted { at, value } => put(at, Cell::Tile(value))?,
            }
        }
        Ok((board, score))
    }

    pub fn write_jsonl<W: Write>(&self, mut writer: W) -> Result<(), TranscriptError> {
        for (idx, event) in self.events.iter().enumerate() {
            serde_json::to_writer(&mut writer, event).map_err(|source| TranscriptError::Json { line: idx + 1, source })?;
            writer.write_all(b"\n")?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn write_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), TranscriptError> {
        let file = File::create(path)?;
        self.write_jsonl(BufWriter::new(file))
    }

    /// Parse JSON Lines; blank lines are skipped.
    pub fn read_jsonl<R: BufRead>(reader: R) -> Result<Self, TranscriptError> {
        let mut events = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let event = serde_json::from_str(&line).map_err(|source| TranscriptError::Json { line: idx + 1, source })?;
            events.push(event);
        }
        Ok(Transcript { events })
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, TranscriptError> {
        let file = File::open(path)?;
        Self::read_jsonl(BufReader::new(file))
    }
}
