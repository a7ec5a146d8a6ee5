pub mod count;
pub mod vector;

use std::collections::BTreeMap;

/// Per-phone features: phone → word → feature for that word.
#[derive(Debug, Clone, PartialEq)]
pub struct PhoneFeatureSet<T> {
    phones: BTreeMap<String, BTreeMap<String, T>>,
}

impl<T> PhoneFeatureSet<T> {
    /// Allocates `init()` for every (phone, word) pair.
    pub(crate) fn allocate<P, W, F>(phones: &[P], words: &[W], mut init: F) -> Self
    where
        P: AsRef<str>,
        W: AsRef<str>,
        F: FnMut(&str) -> T,
    {
        let phones = phones
            .iter()
            .map(|phone| {
                let phone = phone.as_ref();
                let per_word = words
                    .iter()
                    .map(|word| (word.as_ref().to_string(), init(phone)))
                    .collect();
                (phone.to_string(), per_word)
            })
            .collect();
        Self { phones }
    }

    pub(crate) fn get_mut(&mut self, phone: &str, word: &str) -> Option<&mut T> {
        self.phones.get_mut(phone).and_then(|words| words.get_mut(word))
    }

    pub fn get(&self, phone: &str, word: &str) -> Option<&T> {
        self.phones.get(phone).and_then(|words| words.get(word))
    }

    /// Features of every word for one phone.
    pub fn phone(&self, phone: &str) -> Option<&BTreeMap<String, T>> {
        self.phones.get(phone)
    }

    pub fn phones(&self) -> impl Iterator<Item = &str> {
        self.phones.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, T>)> {
        self.phones.iter().map(|(phone, words)| (phone.as_str(), words))
    }

    pub fn len(&self) -> usize {
        self.phones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phones.is_empty()
    }
}
