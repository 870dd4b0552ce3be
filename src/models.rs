use std::collections::{BTreeMap, HashMap};

/// Field name to raw field value for a single line of `show table` output.
///
/// Values are kept as text; numeric interpretation is left to whoever renders them.
pub type Record = HashMap<String, String>;

/// One stick table and its entries, indexed by the entry's `key` field.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Table {
    pub name: String,
    pub records: BTreeMap<String, Record>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: BTreeMap::new(),
        }
    }

    /// Index a record under its `key` field. Records without one are dropped; a repeated key
    /// replaces the earlier record.
    pub fn insert(&mut self, record: Record) {
        if let Some(key) = record.get("key") {
            self.records.insert(key.clone(), record);
        }
    }
}

/// Every table read during one scrape, in the order HAProxy listed them.
pub type ScrapeResult = Vec<Table>;
