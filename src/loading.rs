//! CSV input and output.
//!
//! | File | Header | Rows |
//! |------|--------|------|
//! | Rooms | any | `number,type,[quality,]release,process` |
//! | Guests | any | `id,type,arrival` |
//! | Weights | label, then room numbers | `guest,w1,w2,...` aligned to the header |
//!
//! Whether a rooms file carries the quality column is decided by its
//! header width (five columns with quality, four without). Fields are
//! trimmed. Parse failures report the CSV line.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{Assignment, Guest, Hotel, Instance, Room, Schedule};
use crate::validation::validate_input;

fn reader<R: Read>(input: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(input)
}

fn line(record: &StringRecord) -> u64 {
    record.position().map_or(0, |p| p.line())
}

fn field<T: FromStr>(record: &StringRecord, index: usize, name: &'static str) -> Result<T> {
    let raw = record.get(index).unwrap_or("");
    raw.parse().map_err(|_| Error::Parse {
        line: line(record),
        field: name,
        value: raw.to_string(),
    })
}

/// Reads rooms, with or without the quality column.
pub fn read_rooms<R: Read>(input: R) -> Result<Vec<Room>> {
    let mut rdr = reader(input);
    let with_quality = match rdr.headers()?.len() {
        4 => false,
        5 => true,
        n => {
            return Err(Error::invalid(
                "rooms header",
                format!("expected 4 or 5 columns, found {n}"),
            ))
        }
    };

    let mut rooms = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let offset = usize::from(with_quality);
        let room = Room::new(
            field(&record, 0, "room number")?,
            field(&record, 1, "room type")?,
            field(&record, 2 + offset, "release")?,
            field(&record, 3 + offset, "process")?,
        )?;
        let room = if with_quality {
            room.with_quality(field(&record, 2, "quality")?)?
        } else {
            room
        };
        rooms.push(room);
    }
    Ok(rooms)
}

/// Reads guests.
pub fn read_guests<R: Read>(input: R) -> Result<Vec<Guest>> {
    let mut rdr = reader(input);
    let mut guests = Vec::new();
    for record in rdr.records() {
        let record = record?;
        guests.push(Guest::new(
            field(&record, 0, "guest id")?,
            field(&record, 1, "guest type")?,
            field(&record, 2, "arrival")?,
        )?);
    }
    Ok(guests)
}

/// Reads a weight matrix as `(guest, room, weight)` triples.
pub fn read_weights<R: Read>(input: R) -> Result<Vec<(u32, u32, f64)>> {
    let mut rdr = reader(input);
    let header = rdr.headers()?.clone();
    let rooms = (1..header.len())
        .map(|i| field::<u32>(&header, i, "room number"))
        .collect::<Result<Vec<_>>>()?;

    let mut weights = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let guest: u32 = field(&record, 0, "guest id")?;
        for (i, &room) in rooms.iter().enumerate() {
            weights.push((guest, room, field(&record, i + 1, "weight")?));
        }
    }
    Ok(weights)
}

/// Validates raw data as a whole and builds the instance.
///
/// # Errors
/// [`Error::Validation`] listing every problem found.
pub fn assemble(
    rooms: Vec<Room>,
    guests: Vec<Guest>,
    weights: &[(u32, u32, f64)],
    crew_size: u32,
) -> Result<Instance> {
    validate_input(&rooms, &guests, weights, crew_size).map_err(Error::Validation)?;

    let hotel = Hotel::builder(crew_size).with_rooms(rooms)?.build()?;
    let mut builder = Instance::builder(hotel).with_guests(guests)?;
    for &(guest, room, weight) in weights {
        builder.set_weight(guest, room, weight)?;
    }
    builder.build()
}

/// Loads an instance from CSV files. Without a weights file every weight
/// is `0.0`.
pub fn load_instance(
    rooms: impl AsRef<Path>,
    guests: impl AsRef<Path>,
    weights: Option<&Path>,
    crew_size: u32,
) -> Result<Instance> {
    let rooms = read_rooms(File::open(rooms)?)?;
    let guests = read_guests(File::open(guests)?)?;
    let weights = match weights {
        Some(path) => read_weights(File::open(path)?)?,
        None => Vec::new(),
    };
    debug!(
        rooms = rooms.len(),
        guests = guests.len(),
        weights = weights.len(),
        "loaded instance data"
    );
    assemble(rooms, guests, &weights, crew_size)
}

#[derive(Serialize)]
struct AssignmentRow {
    guest: u32,
    room: u32,
    upgrade: u32,
    satisfaction: f64,
}

#[derive(Serialize)]
struct ScheduleRow {
    room: u32,
    housekeeper: u32,
    start: i64,
    completion: i64,
}

/// Writes `guest,room,upgrade,satisfaction` rows by guest id.
pub fn write_assignment<W: Write>(assignment: &Assignment, output: W) -> Result<()> {
    let instance = assignment.instance();
    let mut wtr = WriterBuilder::new().from_writer(output);
    for (guest, room) in assignment.matching() {
        let requested = instance.guest(guest).map_or(0, Guest::guest_type);
        let offered = instance.room(room).map_or(0, Room::room_type);
        wtr.serialize(AssignmentRow {
            guest,
            room,
            upgrade: offered.saturating_sub(requested),
            satisfaction: instance.weight(guest, room),
        })?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes `room,housekeeper,start,completion` rows by room number.
pub fn write_schedule<W: Write>(schedule: &Schedule, output: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_writer(output);
    for (room, entry) in schedule.entries() {
        wtr.serialize(ScheduleRow {
            room,
            housekeeper: entry.housekeeper,
            start: entry.start,
            completion: entry.completion,
        })?;
    }
    wtr.flush()?;
    Ok(())
}
