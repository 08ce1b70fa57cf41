use crate::errors::WheelError;
use serde::{Deserialize, Serialize};

/// Stable identifier of a wheel entry.
pub type EntryId = String;

/// Display colors offered to new entries, cycled by list length.
pub const PALETTE: &[&str] = &[
    "#008080", "#000080", "#4169E1", "#1E3A8A", "#5F9EA0", "#6495ED", "#4682B4", "#0066CC",
    "#4ECDC4", "#20B2AA", "#48CAE4", "#40E0D0", "#228B22", "#32CD32", "#3CB371", "#FFD700",
    "#FFA500", "#FF6347", "#FF6B6B", "#FF1493", "#DC143C", "#8A2BE2", "#9370DB", "#BA55D3",
    "#C71585", "#2C3E50", "#34495E", "#708090",
];

/// A named, colored candidate on the wheel.
/// Position in the owning [`EntryList`] determines its slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique, never reused within a list
    pub id: EntryId,
    /// Trimmed, non-empty display name
    pub name: String,
    /// Display color token (e.g. `#008080`)
    pub color: String,
}

impl Entry {
    pub fn new(id: impl Into<EntryId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Ordered, in-memory entry collection with name validation.
///
/// Names are unique ignoring ASCII and Unicode case; the check runs on every
/// add and edit so the spin logic can treat index → entry as unambiguous.
///
/// # Examples
///
/// ```
/// use namewheel_engine::entry::EntryList;
/// use namewheel_engine::errors::WheelError;
///
/// let mut entries = EntryList::new();
/// entries.add("  Alice ", None).unwrap();
/// assert_eq!(entries.entries()[0].name, "Alice");
///
/// assert_eq!(
///     entries.add("alice", None),
///     Err(WheelError::DuplicateName("alice".to_string()))
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct EntryList {
    entries: Vec<Entry>,
    next_id: u64,
}

impl EntryList {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// The six starter entries shown on first load.
    pub fn with_defaults() -> Self {
        let mut list = Self::new();
        for (name, color) in [
            ("Alice", "#008080"),
            ("Bob", "#000080"),
            ("Charlie", "#FFFFFF"),
            ("Diana", "#4ECDC4"),
            ("Eve", "#2C3E50"),
            ("Frank", "#F8F9FA"),
        ] {
            let id = list.allocate_id();
            list.entries.push(Entry::new(id, name, color));
        }
        list
    }

    pub fn from_names<I, S>(names: I) -> Result<Self, WheelError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::new();
        for name in names {
            list.add(name.as_ref(), None)?;
        }
        Ok(list)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Color offered for the next entry when the caller picks none.
    pub fn suggested_color(&self) -> &'static str {
        PALETTE[(self.entries.len() + 1) % PALETTE.len()]
    }

    pub fn add(&mut self, name: &str, color: Option<&str>) -> Result<&Entry, WheelError> {
        let name = Self::validate_name(name)?;
        if self.name_taken(&name, None) {
            return Err(WheelError::DuplicateName(name));
        }
        let color = match color.map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => self.suggested_color().to_string(),
        };
        let id = self.allocate_id();
        self.entries.push(Entry::new(id, name, color));
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub fn update(&mut self, id: &str, name: &str, color: &str) -> Result<&Entry, WheelError> {
        let name = Self::validate_name(name)?;
        let pos = self
            .position(id)
            .ok_or_else(|| WheelError::EntryNotFound(id.to_string()))?;
        if self.name_taken(&name, Some(id)) {
            return Err(WheelError::DuplicateName(name));
        }
        let entry = &mut self.entries[pos];
        entry.name = name;
        let color = color.trim();
        if !color.is_empty() {
            entry.color = color.to_string();
        }
        Ok(&self.entries[pos])
    }

    pub fn remove(&mut self, id: &str) -> Result<Entry, WheelError> {
        let pos = self
            .position(id)
            .ok_or_else(|| WheelError::EntryNotFound(id.to_string()))?;
        Ok(self.entries.remove(pos))
    }

    /// Copy of the current order, used to pin a spin to what was drawn.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }

    fn name_taken(&self, name: &str, except: Option<&str>) -> bool {
        let wanted = name.to_lowercase();
        self.entries
            .iter()
            .filter(|e| Some(e.id.as_str()) != except)
            .any(|e| e.name.to_lowercase() == wanted)
    }

    fn validate_name(name: &str) -> Result<String, WheelError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(WheelError::EmptyName);
        }
        Ok(trimmed.to_string())
    }

    fn allocate_id(&mut self) -> EntryId {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id.to_string()
    }
}
