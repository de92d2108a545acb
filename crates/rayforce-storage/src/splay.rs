// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 RayforceDB contributors

//! Splayed table directories (§4.7): one file per column plus `.d` (the
//! column-name vector) and `sym` (the shared symbol domain for every
//! SYMBOL column in the directory). Symbol columns merge into `sym` on
//! write so repeated writes preserve earlier ids, and read back as
//! `ENUM` pairs referencing the mapped domain directly.

use crate::mmap;
use rayforce_core::{ErrorKind, RayError, SymbolId, Tag, SYMBOLS};
use rayforce_value::{Enum, MapList, Table, Value, Vector};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

const DOMAIN_FILE_NAME: &str = "sym";
const NAMES_FILE_NAME: &str = ".d";

/// Suffix for a heterogeneous column's auxiliary offset-table file
/// (§6.3's `<name>#`).
const MAPLIST_SUFFIX: &str = "#";

/// Writes `table` as a splayed directory at `dir`, creating it if
/// needed. Symbol columns are merged into the shared `sym` domain
/// (existing ids preserved) and rewritten as `ENUM` index files; every
/// other column is written `SIMPLE`. Each file is written atomically.
pub fn write_table(dir: &Path, table: &Table) -> Result<(), RayError> {
    std::fs::create_dir_all(dir).map_err(|e| RayError::io(dir.display().to_string(), &e))?;

    let mut domain = load_domain_if_present(dir)?;
    let mut present: HashSet<SymbolId> = domain.iter().copied().collect();

    for column in table.columns() {
        let Value::Vector(v) = column else {
            continue;
        };
        if v.tag() != Tag::VecSymbol {
            continue;
        }
        for &sym in v.as_symbols() {
            if sym != rayforce_core::NULL_SYMBOL && present.insert(sym) {
                domain.push(sym);
            }
        }
    }

    if !domain.is_empty() {
        let domain_vector = Vector::symbol(&domain).ok_or_else(|| RayError::new(ErrorKind::Memory, "failed to allocate symbol domain vector"))?;
        mmap::write_simple(&dir.join(DOMAIN_FILE_NAME), &domain_vector)?;
    }
    let index_of: HashMap<SymbolId, i64> = domain.iter().enumerate().map(|(i, &s)| (s, i as i64)).collect();

    for (name, column) in table.names().as_symbols().iter().zip(table.columns()) {
        let file_name = SYMBOLS
            .resolve(*name)
            .ok_or_else(|| RayError::new(ErrorKind::Domain, "column name symbol is not interned"))?;
        let path = dir.join(file_name.as_ref());
        match column {
            Value::Vector(v) if v.tag() == Tag::VecSymbol => {
                let ids: Vec<i64> = v
                    .as_symbols()
                    .iter()
                    .map(|&s| if s == rayforce_core::NULL_SYMBOL { i64::MIN } else { index_of[&s] })
                    .collect();
                let ids_vector = Vector::i64(&ids).ok_or_else(|| RayError::new(ErrorKind::Memory, "failed to allocate enum index vector"))?;
                mmap::write_compound(&path, &ids_vector, DOMAIN_FILE_NAME)?;
            }
            Value::Vector(v) => mmap::write_simple(&path, v)?,
            Value::MapList(m) => {
                mmap::write_simple(&path, m.bytes())?;
                let aux_path = dir.join(format!("{}{MAPLIST_SUFFIX}", file_name.as_ref()));
                mmap::write_simple(&aux_path, m.offsets())?;
            }
            _ => return Err(RayError::new(ErrorKind::Type, "splayed table columns must be vectors or maplists")),
        }
    }

    mmap::write_simple(&dir.join(NAMES_FILE_NAME), table.names())
}

/// Reads a splayed directory back into a `TABLE`, referencing the mapped
/// column files directly (no bulk copy). Symbol columns come back as
/// `ENUM` values wrapping the mapped `sym` domain.
pub fn read_table(dir: &Path) -> Result<Table, RayError> {
    let names = mmap::map_simple(&dir.join(NAMES_FILE_NAME))?;
    if names.tag() != Tag::VecSymbol {
        return Err(RayError::new(ErrorKind::Parse, "`.d` file must be a symbol vector"));
    }

    let mut domain_cache: HashMap<String, Vector> = HashMap::new();
    let mut columns = Vec::with_capacity(names.len());
    for &name in names.as_symbols() {
        let file_name = SYMBOLS
            .resolve(name)
            .ok_or_else(|| RayError::new(ErrorKind::Domain, "column name symbol is not interned"))?;
        let path = dir.join(file_name.as_ref());
        columns.push(read_column(&path, &mut domain_cache)?);
    }

    Table::new(names, columns)
}

fn read_column(path: &Path, domain_cache: &mut HashMap<String, Vector>) -> Result<Value, RayError> {
    let aux_path = aux_path_for(path);
    if aux_path.exists() {
        let bytes = mmap::map_simple(path)?;
        let offsets = mmap::map_simple(&aux_path)?;
        return Ok(Value::MapList(MapList::new(bytes, offsets)));
    }
    match mmap::map_simple(path) {
        Ok(v) => Ok(Value::Vector(v)),
        Err(_) => {
            let ids = mmap::map_compound(path)?;
            let key = mmap::compound_key(path)?;
            let domain = load_domain_cached(path, &key, domain_cache)?;
            let domain_key = SYMBOLS.intern(&key);
            Ok(Value::Enum(Enum::new(domain_key, domain, ids)?))
        }
    }
}

fn aux_path_for(column_path: &Path) -> PathBuf {
    let mut name = column_path.file_name().unwrap_or_else(|| std::ffi::OsStr::new("")).to_os_string();
    name.push(MAPLIST_SUFFIX);
    column_path.with_file_name(name)
}

fn load_domain_cached(column_path: &Path, key: &str, cache: &mut HashMap<String, Vector>) -> Result<Vector, RayError> {
    if let Some(v) = cache.get(key) {
        return Ok(v.clone());
    }
    let dir = column_path.parent().unwrap_or_else(|| Path::new("."));
    let v = mmap::map_simple(&dir.join(key))?;
    cache.insert(key.to_string(), v.clone());
    Ok(v)
}

fn load_domain_if_present(dir: &Path) -> Result<Vec<SymbolId>, RayError> {
    let path: PathBuf = dir.join(DOMAIN_FILE_NAME);
    if !path.exists() {
        return Ok(Vec::new());
    }
    let v = mmap::map_simple(&path)?;
    Ok(v.as_symbols().to_vec())
}

#[cfg(test)]
mod splay_test;
