use crate::constants::{SEAT_HEADERS, TABLE_HEADERS};
use crate::error::{Result, SeatPlanError};
use crate::model::{FloorPlan, Rect, Seat, SeatAttributes, Table};

use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use serde::{Deserialize, Deserializer, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// One line of `tables.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct TableRow {
    id: u32,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    capacity: u32,
}

/// One line of `seats.csv`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct SeatRow {
    id: u32,
    x: f64,
    y: f64,
    table_id: Option<u32>,
    #[serde(default, deserialize_with = "flag")]
    near_window: bool,
    #[serde(default, deserialize_with = "flag")]
    near_entry: bool,
    #[serde(default, deserialize_with = "flag")]
    corner: bool,
    #[serde(default, deserialize_with = "flag")]
    quiet_zone: bool,
    #[serde(default, deserialize_with = "flag")]
    accessible: bool,
    #[serde(default, deserialize_with = "flag")]
    premium: bool,
}

impl From<TableRow> for Table {
    fn from(r: TableRow) -> Self {
        Table::new(r.id, Rect::new(r.x, r.y, r.width, r.height), r.capacity)
    }
}

impl From<&Table> for TableRow {
    fn from(t: &Table) -> Self {
        Self {
            id: t.id.0,
            x: t.rect.x,
            y: t.rect.y,
            width: t.rect.width,
            height: t.rect.height,
            capacity: t.capacity,
        }
    }
}

impl From<SeatRow> for Seat {
    fn from(r: SeatRow) -> Self {
        Seat::new(r.id, r.x, r.y, r.table_id).with_attributes(SeatAttributes {
            near_window: r.near_window,
            near_entry: r.near_entry,
            corner: r.corner,
            quiet_zone: r.quiet_zone,
            accessible: r.accessible,
            premium: r.premium,
        })
    }
}

impl From<&Seat> for SeatRow {
    fn from(s: &Seat) -> Self {
        let a = s.attributes;
        Self {
            id: s.id.0,
            x: s.position.x,
            y: s.position.y,
            table_id: s.table.map(|t| t.0),
            near_window: a.near_window,
            near_entry: a.near_entry,
            corner: a.corner,
            quiet_zone: a.quiet_zone,
            accessible: a.accessible,
            premium: a.premium,
        }
    }
}

/// Accepts `true/false`, `1/0`, `yes/no` and an empty cell (false)
fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" | "n" => Ok(false),
        "1" | "true" | "yes" | "y" => Ok(true),
        other => Err(serde::de::Error::custom(format!("invalid flag: {other}"))),
    }
}

/// Header row must start with the expected columns, in order
fn check_headers(headers: &StringRecord, expected: &[&str]) -> Result<()> {
    for (i, want) in expected.iter().enumerate() {
        match headers.get(i) {
            Some(got) if got.eq_ignore_ascii_case(want) => {}
            Some(got) => {
                return Err(SeatPlanError::CsvRow {
                    row: 1,
                    message: format!("column {} should be '{want}', found '{got}'", i + 1),
                });
            }
            None => {
                return Err(SeatPlanError::CsvRow {
                    row: 1,
                    message: format!("missing column '{want}'"),
                });
            }
        }
    }
    Ok(())
}

fn read_rows<R, T>(reader: R, expected: &[&str]) -> Result<Vec<T>>
where
    R: Read,
    T: for<'de> Deserialize<'de>,
{
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    check_headers(rdr.headers()?, expected)?;

    let mut rows = Vec::new();
    for (i, record) in rdr.deserialize().enumerate() {
        // header is row 1
        let row: T = record.map_err(|e| SeatPlanError::CsvRow {
            row: i + 2,
            message: e.to_string(),
        })?;
        rows.push(row);
    }
    Ok(rows)
}

pub fn read_tables_from_reader<R: Read>(reader: R) -> Result<Vec<Table>> {
    let rows: Vec<TableRow> = read_rows(reader, &TABLE_HEADERS)?;
    Ok(rows.into_iter().map(Table::from).collect())
}

pub fn read_seats_from_reader<R: Read>(reader: R) -> Result<Vec<Seat>> {
    let rows: Vec<SeatRow> = read_rows(reader, &SEAT_HEADERS)?;
    Ok(rows.into_iter().map(Seat::from).collect())
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| SeatPlanError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Reads `id,x,y,width,height,capacity` rows
pub fn read_tables<P: AsRef<Path>>(path: P) -> Result<Vec<Table>> {
    read_tables_from_reader(open(path.as_ref())?)
}

/// Reads seat rows; an empty `table_id` cell means a free-standing seat
pub fn read_seats<P: AsRef<Path>>(path: P) -> Result<Vec<Seat>> {
    read_seats_from_reader(open(path.as_ref())?)
}

/// Reads both files and builds the floor plan
pub fn read_floor_plan<P: AsRef<Path>>(tables: P, seats: P) -> Result<FloorPlan> {
    let tables = read_tables(tables)?;
    let seats = read_seats(seats)?;
    FloorPlan::new(seats, tables)
}

fn write_rows<W: Write, T: Serialize>(writer: W, rows: impl IntoIterator<Item = T>) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn create(path: &Path) -> Result<File> {
    File::create(path).map_err(|e| SeatPlanError::CreateFile {
        path: path.to_path_buf(),
        source: e,
    })
}

pub fn write_tables<P: AsRef<Path>>(path: P, tables: &[Table]) -> Result<()> {
    write_rows(create(path.as_ref())?, tables.iter().map(TableRow::from))
}

pub fn write_seats<P: AsRef<Path>>(path: P, seats: &[Seat]) -> Result<()> {
    write_rows(create(path.as_ref())?, seats.iter().map(SeatRow::from))
}
