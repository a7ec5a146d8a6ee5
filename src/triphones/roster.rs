use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::triphones::{Result, TriphoneError};

/// Centre phones with enough training data for per-triphone columns.
///
/// Left out of the full inventory: `sil`, `sp`, `ax`, `dh`, `ua`, `zh`.
pub const SUFFICIENT_DATA_V1: [&str; 40] = [
    "aa", "ae", "ah", "ao", "aw", "ay", "b", "ch", "d", "ea", "eh", "er", "ey", "f", "g", "hh",
    "ia", "ih", "iy", "jh", "k", "l", "m", "n", "ng", "oh", "ow", "oy", "p", "r", "s", "sh", "t",
    "th", "uh", "uw", "v", "w", "y", "z",
];

/// A named, versioned list of centre phones that drives feature allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneRoster {
    name: String,
    version: u32,
    phones: Vec<String>,
}

impl PhoneRoster {
    pub const SUFFICIENT_DATA: &'static str = "sufficient-data";

    /// The curated roster used by the vector model.
    pub fn sufficient_data() -> Self {
        Self {
            name: Self::SUFFICIENT_DATA.to_string(),
            version: 1,
            phones: SUFFICIENT_DATA_V1.iter().map(|p| p.to_string()).collect(),
        }
    }

    pub fn from_phones<I, S>(name: impl Into<String>, version: u32, phones: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let mut seen = HashSet::new();
        let mut list = Vec::new();
        for phone in phones {
            let phone = phone.into();
            if phone.is_empty() || phone.contains(char::is_whitespace) {
                return Err(TriphoneError::config(format!(
                    "roster {name} contains an invalid phone \"{phone}\""
                )));
            }
            if !seen.insert(phone.clone()) {
                return Err(TriphoneError::config(format!(
                    "roster {name} lists phone \"{phone}\" twice"
                )));
            }
            list.push(phone);
        }
        Ok(Self {
            name,
            version,
            phones: list,
        })
    }

    /// Reads one phone per line. Blank lines and `#` comments are skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path).map_err(|err| TriphoneError::io(path, err))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());
        let phones = data
            .lines()
            .map(|line| line.split('#').next().unwrap_or_default().trim())
            .filter(|line| !line.is_empty());
        Self::from_phones(name, 1, phones)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn phones(&self) -> &[String] {
        &self.phones
    }

    pub fn contains(&self, phone: &str) -> bool {
        self.phones.iter().any(|p| p == phone)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phones.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.phones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phones.is_empty()
    }
}

impl Default for PhoneRoster {
    fn default() -> Self {
        Self::sufficient_data()
    }
}
