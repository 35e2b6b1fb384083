use indexmap::IndexMap;

/// What happened to a phrase during merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// New phrase, inserted as its own translation.
    Added,
    /// Phrase already in the catalog; its translation was left alone.
    Existing,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub added: usize,
    pub existing: usize,
}

impl MergeStats {
    pub fn record(&mut self, outcome: MergeOutcome) {
        match outcome {
            MergeOutcome::Added => self.added += 1,
            MergeOutcome::Existing => self.existing += 1,
        }
    }
}

/// Ordered `source -> target` phrase mapping.
///
/// Insertion order is the output order, and entries are never removed: a
/// catalog only grows across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    entries: IndexMap<String, String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, source: &str) -> Option<&str> {
        self.entries.get(source).map(String::as_str)
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Insert a stored translation. The first occurrence of a source wins.
    ///
    /// Returns `false` if the source was already present.
    pub fn insert_translation(&mut self, source: String, target: String) -> bool {
        if self.entries.contains_key(&source) {
            return false;
        }
        self.entries.insert(source, target);
        true
    }

    /// Reconcile one scanned phrase with the catalog.
    ///
    /// A known phrase keeps its translation. An unknown one is appended with
    /// itself as the target, marking it as untranslated.
    pub fn merge(&mut self, phrase: &str) -> MergeOutcome {
        if self.entries.contains_key(phrase) {
            return MergeOutcome::Existing;
        }
        self.entries.insert(phrase.to_string(), phrase.to_string());
        MergeOutcome::Added
    }
}

impl FromIterator<(String, String)> for Catalog {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        let mut catalog = Catalog::new();
        for (source, target) in iter {
            catalog.insert_translation(source, target);
        }
        catalog
    }
}
