use crate::utils::encoding::{read_u32_le, write_u32_le};
use ahash::AHashMap;
use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Bidirectional mapping between strings (terms or document paths) and dense
/// integer ids, assigned in first-seen order starting at 0.
///
/// The forward map answers "what is the id of this string", the backward list
/// answers "what string owns this id". Both sides stay consistent because the
/// only mutation is [`IdMap::get_or_insert`], which grows them together.
#[derive(Debug, Default)]
pub struct IdMap {
    forward: AHashMap<String, u32>,
    backward: Vec<String>,
}

impl IdMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ids assigned so far
    pub fn len(&self) -> usize {
        self.backward.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backward.is_empty()
    }

    /// Get the id for `key`, assigning the next dense id on first sight.
    ///
    /// Repeated calls with the same key return the same id without side
    /// effects. Used only while building an index.
    pub fn get_or_insert(&mut self, key: &str) -> u32 {
        if let Some(&id) = self.forward.get(key) {
            return id;
        }

        let id = self.backward.len() as u32;
        self.backward.push(key.to_string());
        self.forward.insert(key.to_string(), id);
        id
    }

    /// Non-mutating lookup for the query side: a key never seen at index
    /// time stays unknown instead of being assigned an id.
    pub fn get(&self, key: &str) -> Option<u32> {
        self.forward.get(key).copied()
    }

    /// Map an id back to its string.
    ///
    /// An id that was never assigned is an internal consistency error, not a
    /// normal query outcome.
    pub fn key_of(&self, id: u32) -> Result<&str> {
        match self.backward.get(id as usize) {
            Some(key) => Ok(key),
            None => bail!("id {} not present in map of {} entries", id, self.backward.len()),
        }
    }

    /// Persist the map: count, then each key length-prefixed, in id order.
    pub fn save(&self, path: &Path) -> Result<()> {
        let mut file = BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        );

        write_u32_le(&mut file, self.backward.len() as u32)?;
        for key in &self.backward {
            let bytes = key.as_bytes();
            write_u32_le(&mut file, bytes.len() as u32)?;
            file.write_all(bytes)?;
        }

        file.flush()?;
        Ok(())
    }

    /// Load a map previously written by [`IdMap::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let mut file = BufReader::new(
            File::open(path).with_context(|| format!("opening {}", path.display()))?,
        );

        let count = read_u32_le(&mut file)
            .with_context(|| format!("reading entry count from {}", path.display()))? as usize;

        let mut map = IdMap {
            forward: AHashMap::with_capacity(count),
            backward: Vec::with_capacity(count),
        };

        for id in 0..count {
            let len = read_u32_le(&mut file)? as usize;
            let mut bytes = vec![0u8; len];
            file.read_exact(&mut bytes)
                .with_context(|| format!("reading entry {} from {}", id, path.display()))?;
            let key = String::from_utf8(bytes)
                .with_context(|| format!("entry {} in {} is not valid utf-8", id, path.display()))?;

            map.forward.insert(key.clone(), id as u32);
            map.backward.push(key);
        }

        Ok(map)
    }
}
