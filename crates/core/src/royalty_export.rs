//! Royalty-registration spreadsheet exports.
//!
//! Each registry format maps project metadata to a header row and data
//! rows. The column layouts follow the bulk-upload templates the registries
//! publish; nothing here talks to a registry, it only produces CSV text for
//! the artist to upload themselves.

use std::fmt;
use std::str::FromStr;

use crate::metadata::{format_share, ProjectMetadata, Publisher, Writer};

/// One project as seen by the exporters.
#[derive(Debug, Clone)]
pub struct ExportRecord {
    pub title: String,
    /// Performer name used when the metadata carries no `artist`.
    pub performer: String,
    pub metadata: ProjectMetadata,
}

impl ExportRecord {
    fn recording_artist(&self) -> String {
        self.metadata
            .artist
            .clone()
            .unwrap_or_else(|| self.performer.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Bmi,
    Ascap,
    Mlc,
    SoundExchange,
}

pub const ALL_FORMATS: &[ExportFormat] = &[
    ExportFormat::Bmi,
    ExportFormat::Ascap,
    ExportFormat::Mlc,
    ExportFormat::SoundExchange,
];

impl ExportFormat {
    pub fn name(self) -> &'static str {
        match self {
            Self::Bmi => "bmi",
            Self::Ascap => "ascap",
            Self::Mlc => "mlc",
            Self::SoundExchange => "soundexchange",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Bmi => "BMI work registration (one row per writer)",
            Self::Ascap => "ASCAP work registration (one row per interested party)",
            Self::Mlc => "The MLC bulk work registration with recording links",
            Self::SoundExchange => "SoundExchange recording (ISRC) registration",
        }
    }

    pub fn headers(self) -> &'static [&'static str] {
        match self {
            Self::Bmi => &[
                "Work Title",
                "ISWC",
                "Writer Name",
                "Writer IPI",
                "Writer PRO",
                "Writer Share",
                "Publisher Name",
                "Publisher IPI",
                "Publisher Share",
            ],
            Self::Ascap => &[
                "Work Title",
                "ISWC",
                "Party Name",
                "Party Role",
                "IPI Name Number",
                "Society",
                "Ownership Share",
            ],
            Self::Mlc => &[
                "Primary Title",
                "ISWC",
                "Writer Last Name",
                "Writer First Name",
                "Writer IPI",
                "Writer Role",
                "Writer Share",
                "Publisher Name",
                "Publisher IPI",
                "Recording ISRC",
                "Recording Title",
                "Recording Artist",
            ],
            Self::SoundExchange => &[
                "ISRC",
                "Track Title",
                "Featured Artist",
                "Album Title",
                "UPC",
                "Label",
                "Release Date",
                "Duration",
                "Genre",
            ],
        }
    }

    fn rows(self, record: &ExportRecord) -> Vec<Vec<String>> {
        match self {
            Self::Bmi => bmi_rows(record),
            Self::Ascap => ascap_rows(record),
            Self::Mlc => mlc_rows(record),
            Self::SoundExchange => vec![soundexchange_row(record)],
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ALL_FORMATS
            .iter()
            .copied()
            .find(|f| f.name() == lower)
            .ok_or_else(|| {
                let names: Vec<&str> = ALL_FORMATS.iter().map(|f| f.name()).collect();
                format!(
                    "Unknown export format '{s}'. Must be one of: {}",
                    names.join(", ")
                )
            })
    }
}

/// A header row plus data rows, ready for CSV serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Serialize with RFC 4180 quoting, one record per line.
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        push_csv_line(&mut out, &self.headers);
        for row in &self.rows {
            push_csv_line(&mut out, row);
        }
        out
    }
}

/// Build the export sheet for the given projects.
///
/// Fails if any project's ownership shares are unusable; the error names the
/// offending project.
pub fn build_export(format: ExportFormat, records: &[ExportRecord]) -> Result<Sheet, String> {
    let mut rows = Vec::new();
    for record in records {
        record
            .metadata
            .validate_shares()
            .map_err(|e| format!("{}: {e}", record.title))?;
        rows.extend(format.rows(record));
    }
    Ok(Sheet {
        headers: format.headers().iter().map(|h| h.to_string()).collect(),
        rows,
    })
}

// ---------------------------------------------------------------------------
// Per-format row builders
// ---------------------------------------------------------------------------

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn share(value: Option<f64>) -> String {
    value.map(format_share).unwrap_or_default()
}

/// Number of rows needed to list every writer and publisher side by side.
fn party_rows(meta: &ProjectMetadata) -> usize {
    meta.writers.len().max(meta.publishers.len()).max(1)
}

fn bmi_rows(record: &ExportRecord) -> Vec<Vec<String>> {
    let meta = &record.metadata;
    (0..party_rows(meta))
        .map(|i| {
            let writer = meta.writers.get(i).cloned().unwrap_or_default();
            let publisher = meta.publishers.get(i).cloned().unwrap_or_default();
            vec![
                record.title.clone(),
                opt(&meta.iswc),
                writer.name.clone(),
                opt(&writer.ipi),
                opt(&writer.pro),
                share(writer.share),
                publisher.name.clone(),
                opt(&publisher.ipi),
                share(publisher.share),
            ]
        })
        .collect()
}

/// ASCAP party role codes: `C` composer, `A` author (lyricist), `CA` both,
/// `E` original publisher.
fn ascap_writer_role(writer: &Writer) -> &'static str {
    let role = writer.role.as_deref().unwrap_or("").to_ascii_lowercase();
    let composes = role.contains("compos") || role.contains("music");
    let writes_lyrics = role.contains("lyric") || role.contains("author");
    match (composes, writes_lyrics) {
        (true, false) => "C",
        (false, true) => "A",
        _ => "CA",
    }
}

fn ascap_rows(record: &ExportRecord) -> Vec<Vec<String>> {
    let meta = &record.metadata;
    let mut rows: Vec<Vec<String>> = meta
        .writers
        .iter()
        .map(|w| {
            vec![
                record.title.clone(),
                opt(&meta.iswc),
                w.name.clone(),
                ascap_writer_role(w).to_string(),
                opt(&w.ipi),
                opt(&w.pro),
                share(w.share),
            ]
        })
        .collect();

    rows.extend(meta.publishers.iter().map(|p: &Publisher| {
        vec![
            record.title.clone(),
            opt(&meta.iswc),
            p.name.clone(),
            "E".to_string(),
            opt(&p.ipi),
            opt(&p.pro),
            share(p.share),
        ]
    }));

    if rows.is_empty() {
        rows.push(vec![
            record.title.clone(),
            opt(&meta.iswc),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
            String::new(),
        ]);
    }
    rows
}

fn mlc_rows(record: &ExportRecord) -> Vec<Vec<String>> {
    let meta = &record.metadata;
    let artist = record.recording_artist();
    (0..party_rows(meta))
        .map(|i| {
            let writer = meta.writers.get(i).cloned().unwrap_or_default();
            let publisher = meta.publishers.get(i).cloned().unwrap_or_default();
            let (first, last) = writer.split_name();
            vec![
                record.title.clone(),
                opt(&meta.iswc),
                last,
                first,
                opt(&writer.ipi),
                opt(&writer.role),
                share(writer.share),
                publisher.name.clone(),
                opt(&publisher.ipi),
                opt(&meta.isrc),
                record.title.clone(),
                artist.clone(),
            ]
        })
        .collect()
}

fn soundexchange_row(record: &ExportRecord) -> Vec<String> {
    let meta = &record.metadata;
    vec![
        opt(&meta.isrc),
        record.title.clone(),
        record.recording_artist(),
        opt(&meta.album),
        opt(&meta.upc),
        opt(&meta.label),
        opt(&meta.release_date),
        opt(&meta.duration),
        opt(&meta.genre),
    ]
}

// ---------------------------------------------------------------------------
// CSV helpers
// ---------------------------------------------------------------------------

/// Escape a value for CSV: wrap in quotes if it contains comma, quote, or newline.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r')
    {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn push_csv_line(out: &mut String, fields: &[String]) {
    let escaped: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
    out.push_str(&escaped.join(","));
    out.push('\n');
}
