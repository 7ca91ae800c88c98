//! read access to the tables inside a GTFS zip archive. tables are located
//! by exact name or by a `/`-suffixed match since some feeds nest their
//! tables inside a folder. row deserialization is per-row recoverable: a
//! structurally malformed row is skipped and counted, never fatal.

use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use kdam::tqdm;
use serde::de::DeserializeOwned;
use zip::ZipArchive;

use super::convert_error::ConvertError;
use super::summary::ConvertSummary;

const UTF8_BOM: &[u8] = &[0xef, 0xbb, 0xbf];

pub struct FeedArchive<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl FeedArchive<File> {
    pub fn open(path: &Path) -> Result<FeedArchive<File>, ConvertError> {
        let file = File::open(path).map_err(|e| ConvertError::ArchiveOpenError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let archive = ZipArchive::new(file).map_err(|e| ConvertError::ArchiveOpenError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(FeedArchive { archive })
    }
}

impl<R: Read + Seek> FeedArchive<R> {
    /// wraps an already-open reader; used with in-memory archives in tests
    pub fn new(reader: R) -> Result<FeedArchive<R>, ConvertError> {
        let archive = ZipArchive::new(reader).map_err(|e| ConvertError::ArchiveOpenError {
            path: "<reader>".into(),
            message: e.to_string(),
        })?;
        Ok(FeedArchive { archive })
    }

    /// reads a table that must be present; its absence aborts the run.
    pub fn read_required<T: DeserializeOwned>(
        &mut self,
        table: &str,
        summary: &mut ConvertSummary,
    ) -> Result<Vec<T>, ConvertError> {
        match self.locate(table) {
            Some(entry_name) => self.read_rows(&entry_name, table, summary),
            None => Err(ConvertError::MissingRequiredTable(table.to_string())),
        }
    }

    /// reads a table whose absence is non-fatal; the matching output
    /// section stays empty.
    pub fn read_optional<T: DeserializeOwned>(
        &mut self,
        table: &str,
        summary: &mut ConvertSummary,
    ) -> Result<Option<Vec<T>>, ConvertError> {
        match self.locate(table) {
            Some(entry_name) => self.read_rows(&entry_name, table, summary).map(Some),
            None => {
                log::warn!("optional table {table} not found in archive; skipping");
                Ok(None)
            }
        }
    }

    fn locate(&mut self, table: &str) -> Option<String> {
        let nested = format!("/{table}");
        (0..self.archive.len()).find_map(|i| {
            let name = self.archive.by_index(i).ok()?.name().to_string();
            if name == table || name.ends_with(&nested) {
                Some(name)
            } else {
                None
            }
        })
    }

    fn read_rows<T: DeserializeOwned>(
        &mut self,
        entry_name: &str,
        table: &str,
        summary: &mut ConvertSummary,
    ) -> Result<Vec<T>, ConvertError> {
        let mut raw = Vec::new();
        {
            let mut entry =
                self.archive
                    .by_name(entry_name)
                    .map_err(|e| ConvertError::TableReadError {
                        table: table.to_string(),
                        message: e.to_string(),
                    })?;
            entry
                .read_to_end(&mut raw)
                .map_err(|e| ConvertError::TableReadError {
                    table: table.to_string(),
                    message: e.to_string(),
                })?;
        }
        let bytes = raw.strip_prefix(UTF8_BOM).unwrap_or(&raw);

        let reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(bytes);
        let row_iter = tqdm!(
            reader.into_deserialize::<T>(),
            desc = format!("reading {table}")
        );
        let mut rows = Vec::new();
        for result in row_iter {
            match result {
                Ok(row) => rows.push(row),
                Err(e) => {
                    log::warn!("skipping malformed {table} row: {e}");
                    summary.skipped_rows += 1;
                }
            }
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::convert::rows::{RouteRow, StopRow};
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;

    fn archive_with(entries: &[(&str, &str)]) -> FeedArchive<Cursor<Vec<u8>>> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, body) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .expect("start_file failed");
            writer.write_all(body.as_bytes()).expect("write failed");
        }
        let cursor = writer.finish().expect("finish failed");
        FeedArchive::new(cursor).expect("archive failed to open")
    }

    #[test]
    fn test_missing_required_table_is_fatal() {
        let mut archive = archive_with(&[("stops.txt", "stop_id,stop_name\nS1,Main\n")]);
        let mut summary = ConvertSummary::default();
        let result = archive.read_required::<RouteRow>("routes.txt", &mut summary);
        assert!(matches!(
            result,
            Err(ConvertError::MissingRequiredTable(ref t)) if t == "routes.txt"
        ));
    }

    #[test]
    fn test_missing_optional_table_is_none() {
        let mut archive = archive_with(&[("stops.txt", "stop_id\nS1\n")]);
        let mut summary = ConvertSummary::default();
        let result = archive
            .read_optional::<RouteRow>("shapes.txt", &mut summary)
            .expect("optional read failed");
        assert!(result.is_none());
    }

    #[test]
    fn test_folder_nested_table_is_found() {
        let mut archive = archive_with(&[(
            "feed/routes.txt",
            "route_id,route_type\nR1,3\n",
        )]);
        let mut summary = ConvertSummary::default();
        let rows = archive
            .read_required::<RouteRow>("routes.txt", &mut summary)
            .expect("read failed");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].route_id, "R1");
        assert_eq!(rows[0].route_type, 3);
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let body = "\u{feff}stop_id,stop_lat,stop_lon\nS1,47.6,-122.3\n";
        let mut archive = archive_with(&[("stops.txt", body)]);
        let mut summary = ConvertSummary::default();
        let rows = archive
            .read_required::<StopRow>("stops.txt", &mut summary)
            .expect("read failed");
        assert_eq!(rows[0].stop_id, "S1");
    }

    #[test]
    fn test_malformed_row_is_skipped_and_counted() {
        // second row is ragged and cannot deserialize
        let body = "route_id,route_type\nR1,3\nR2,3,extra,fields\nR3,1\n";
        let mut archive = archive_with(&[("routes.txt", body)]);
        let mut summary = ConvertSummary::default();
        let rows = archive
            .read_required::<RouteRow>("routes.txt", &mut summary)
            .expect("read failed");
        assert_eq!(rows.len(), 2);
        assert_eq!(summary.skipped_rows, 1);
        assert_eq!(rows[1].route_id, "R3");
    }
}
