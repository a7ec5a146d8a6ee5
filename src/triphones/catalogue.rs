use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::triphones::label::{is_sentinel, PhoneTriplet};
use crate::triphones::trace::TraceRecord;
use crate::triphones::{active_frames, Result};

/// Every non-sentinel triphone observed for a word list, in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    triphones: BTreeSet<String>,
}

impl Catalogue {
    pub fn contains(&self, label: &str) -> bool {
        self.triphones.contains(label)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.triphones.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.triphones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triphones.is_empty()
    }
}

impl FromIterator<String> for Catalogue {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            triphones: iter.into_iter().filter(|label| !is_sentinel(label)).collect(),
        }
    }
}

/// Catalogue triphones grouped by centre phone. The position of a triphone in
/// its phone's list is its feature column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CataloguePartition {
    by_phone: BTreeMap<String, Vec<String>>,
}

impl CataloguePartition {
    /// Columns for `phone`; empty when nothing centred on it was observed.
    pub fn columns(&self, phone: &str) -> &[String] {
        self.by_phone.get(phone).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_phone(&self, phone: &str) -> bool {
        self.by_phone.contains_key(phone)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.by_phone
            .iter()
            .map(|(phone, columns)| (phone.as_str(), columns.as_slice()))
    }
}

/// Collects the triphones active in frames `2..=frame_cap` of the requested words.
pub fn collect_extant<S: AsRef<str>>(
    record: &TraceRecord,
    words: &[S],
    frame_cap: u32,
) -> Result<Catalogue> {
    info!(words = words.len(), "counting extant triphones");
    let mut triphones = BTreeSet::new();
    for word in words {
        let word = word.as_ref();
        let frames = record.require_word(word)?;
        debug!(word, "scanning word for extant triphones");
        for frame in active_frames(frame_cap) {
            triphones.extend(
                frames
                    .active(frame)
                    .iter()
                    .filter(|label| !is_sentinel(label))
                    .cloned(),
            );
        }
    }
    info!(triphones = triphones.len(), "catalogue complete");
    Ok(Catalogue { triphones })
}

/// Groups the catalogue by centre phone. Each phone in `phones` gets an entry
/// even when no triphone is centred on it.
pub fn partition_by_center<S: AsRef<str>>(
    catalogue: &Catalogue,
    phones: &[S],
) -> Result<CataloguePartition> {
    let mut by_phone: BTreeMap<String, Vec<String>> = phones
        .iter()
        .map(|phone| (phone.as_ref().to_string(), Vec::new()))
        .collect();
    // The catalogue iterates in order, so every column list comes out sorted.
    for label in catalogue.iter() {
        let triplet = PhoneTriplet::parse(label)?;
        by_phone
            .entry(triplet.center.to_string())
            .or_default()
            .push(label.to_string());
    }
    Ok(CataloguePartition { by_phone })
}
