use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{ReferenceError, Result};
use crate::lookup::{CongregationEntry, CountyEntry, DistrictEntry, ParishEntry, ReferenceLookup};
use crate::manifest::{MANIFEST_SCHEMA, MANIFEST_SCHEMA_VERSION, Manifest, TableKind};

/// Row counts per table after loading.
#[derive(Debug, Clone, Serialize)]
pub struct LoadSummary {
    pub reference_dir: PathBuf,
    pub table_counts: BTreeMap<TableKind, usize>,
}

/// In-memory reference tables loaded from CSV files.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    districts: Vec<DistrictEntry>,
    parishes: Vec<ParishEntry>,
    counties: Vec<CountyEntry>,
    rc_parishes: Vec<CongregationEntry>,
    other_parishes: Vec<CongregationEntry>,
}

impl ReferenceTables {
    /// Tables with no entries; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn new(
        districts: Vec<DistrictEntry>,
        parishes: Vec<ParishEntry>,
        counties: Vec<CountyEntry>,
        rc_parishes: Vec<CongregationEntry>,
        other_parishes: Vec<CongregationEntry>,
    ) -> Self {
        Self {
            districts,
            parishes,
            counties,
            rc_parishes,
            other_parishes,
        }
    }

    /// Load every table listed in `<reference_dir>/manifest.toml`.
    ///
    /// Tables the manifest does not list are left empty.
    pub fn load(reference_dir: &Path) -> Result<(Self, LoadSummary)> {
        let manifest = load_manifest(&reference_dir.join("manifest.toml"))?;
        validate_manifest(&manifest)?;

        let mut tables = Self::empty();
        for entry in &manifest.tables {
            let path = reference_dir.join(validate_path(&entry.path)?);
            if !path.is_file() {
                return Err(ReferenceError::MissingFile { path });
            }
            match entry.table {
                TableKind::Districts => tables.districts = read_rows(&path)?,
                TableKind::Parishes => tables.parishes = read_rows(&path)?,
                TableKind::Counties => tables.counties = read_rows(&path)?,
                TableKind::RcParishes => tables.rc_parishes = read_rows(&path)?,
                TableKind::OtherParishes => tables.other_parishes = read_rows(&path)?,
            }
            debug!(table = %entry.table, path = %path.display(), "loaded reference table");
        }

        let summary = LoadSummary {
            reference_dir: reference_dir.to_path_buf(),
            table_counts: TableKind::ALL
                .iter()
                .map(|kind| (*kind, tables.count(*kind)))
                .collect(),
        };
        Ok((tables, summary))
    }

    pub fn count(&self, kind: TableKind) -> usize {
        match kind {
            TableKind::Districts => self.districts.len(),
            TableKind::Parishes => self.parishes.len(),
            TableKind::Counties => self.counties.len(),
            TableKind::RcParishes => self.rc_parishes.len(),
            TableKind::OtherParishes => self.other_parishes.len(),
        }
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

fn match_congregations(
    entries: &[CongregationEntry],
    parish: &str,
    congregation: &str,
) -> Vec<CongregationEntry> {
    let parish = parish.trim();
    entries
        .iter()
        .filter(|entry| parish.is_empty() || same_name(&entry.parish, parish))
        .filter(|entry| same_name(&entry.congregation, congregation))
        .cloned()
        .collect()
}

impl ReferenceLookup for ReferenceTables {
    fn lookup_district(
        &self,
        rd_no: &str,
        name: Option<&str>,
        year: Option<i32>,
    ) -> Vec<DistrictEntry> {
        let rd_no = rd_no.trim().trim_end_matches('/');
        let by_number: Vec<&DistrictEntry> = self
            .districts
            .iter()
            .filter(|district| district.rd_no == rd_no)
            .filter(|district| district.is_valid_in(year))
            .collect();

        // Narrow by name only when that leaves something.
        let by_name: Vec<&DistrictEntry> = match name {
            Some(name) => by_number
                .iter()
                .copied()
                .filter(|district| same_name(&district.name, name))
                .collect(),
            None => Vec::new(),
        };
        let chosen = if by_name.is_empty() { by_number } else { by_name };
        chosen.into_iter().cloned().collect()
    }

    fn lookup_parish(&self, name: &str, year: Option<i32>) -> Vec<ParishEntry> {
        self.parishes
            .iter()
            .filter(|parish| same_name(&parish.name, name))
            .filter(|parish| parish.is_valid_in(year))
            .cloned()
            .collect()
    }

    fn lookup_county(&self, name: &str) -> Option<CountyEntry> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        self.counties
            .iter()
            .find(|county| same_name(&county.name, name) || same_name(&county.display_county, name))
            .cloned()
    }

    fn lookup_rc_parish(&self, parish: &str, congregation: &str) -> Vec<CongregationEntry> {
        match_congregations(&self.rc_parishes, parish, congregation)
    }

    fn lookup_other_parish(&self, parish: &str, congregation: &str) -> Vec<CongregationEntry> {
        match_congregations(&self.other_parishes, parish, congregation)
    }
}

fn load_manifest(path: &Path) -> Result<Manifest> {
    let contents = std::fs::read_to_string(path).map_err(|e| ReferenceError::io(path, e))?;
    toml::from_str(&contents).map_err(|e| ReferenceError::Toml {
        path: path.to_path_buf(),
        source: e,
    })
}

fn validate_manifest(manifest: &Manifest) -> Result<()> {
    if manifest.manifest.schema != MANIFEST_SCHEMA {
        return Err(ReferenceError::InvalidManifest {
            message: format!("unsupported schema: {}", manifest.manifest.schema),
        });
    }
    if manifest.manifest.schema_version != MANIFEST_SCHEMA_VERSION {
        return Err(ReferenceError::InvalidManifest {
            message: format!(
                "unsupported schema_version: {}",
                manifest.manifest.schema_version
            ),
        });
    }

    let mut seen = BTreeSet::new();
    for entry in &manifest.tables {
        if !seen.insert(entry.table) {
            return Err(ReferenceError::DuplicateTable {
                table: entry.table.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<PathBuf> {
    if path.contains('\\') {
        return Err(ReferenceError::InvalidPath {
            path: PathBuf::from(path),
            message: "manifest path must use '/' separators".to_string(),
        });
    }

    let p = PathBuf::from(path);
    if p.is_absolute() {
        return Err(ReferenceError::InvalidPath {
            path: p,
            message: "manifest path must be relative".to_string(),
        });
    }
    if p.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ReferenceError::InvalidPath {
            path: p,
            message: "manifest path must not traverse out of the reference directory".to_string(),
        });
    }
    Ok(p)
}

fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_path(path)
        .map_err(|e| ReferenceError::csv(path, e))?;

    let mut rows = Vec::new();
    for row in reader.deserialize() {
        rows.push(row.map_err(|e| ReferenceError::csv(path, e))?);
    }
    Ok(rows)
}
