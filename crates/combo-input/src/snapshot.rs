//! Capture-window snapshots.
//!
//! A [`KeyIndexTable`] assigns every monitored button a bit position, and a
//! [`Snapshot`] is the `u64` bitmask of the buttons seen pressed during one
//! capture window. Snapshots share their table through an [`Arc`], so
//! building a fresh empty snapshot never copies the name mapping.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::ComboError;

/// Immutable name→bit mapping for the monitored buttons.
///
/// Bit positions follow the order the names were given in, so the layout is
/// the dense range `0..len()`.
#[derive(Debug)]
pub struct KeyIndexTable {
    names: Vec<String>,
    index: HashMap<String, usize>,
}

impl KeyIndexTable {
    /// Widest table a `u64` state can represent.
    pub const MAX_KEYS: usize = 64;

    /// Build a table from an ordered list of button names.
    ///
    /// Fails with [`ComboError::InvalidConfiguration`] if the list is empty,
    /// contains duplicates, or exceeds [`Self::MAX_KEYS`].
    pub fn new<I, S>(names: I) -> Result<Self, ComboError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.is_empty() {
            return Err(ComboError::invalid("button list is empty"));
        }
        if names.len() > Self::MAX_KEYS {
            return Err(ComboError::invalid(format!(
                "{} buttons given, at most {} are supported",
                names.len(),
                Self::MAX_KEYS
            )));
        }

        let mut index = HashMap::with_capacity(names.len());
        for (i, name) in names.iter().enumerate() {
            if index.insert(name.clone(), i).is_some() {
                return Err(ComboError::invalid(format!("duplicate button: {name}")));
            }
        }

        Ok(Self { names, index })
    }

    /// Number of monitored buttons (the snapshot width).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always `false` for a constructed table; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Button names in bit order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Bit position of `name`, if monitored.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Single-bit mask for `name`.
    pub fn mask_of(&self, name: &str) -> Result<u64, ComboError> {
        self.index_of(name)
            .map(|i| 1u64 << i)
            .ok_or_else(|| ComboError::unknown_key(name))
    }

    /// Mask with every valid bit set.
    pub fn full_mask(&self) -> u64 {
        if self.names.len() == Self::MAX_KEYS {
            u64::MAX
        } else {
            (1u64 << self.names.len()) - 1
        }
    }
}

impl PartialEq for KeyIndexTable {
    fn eq(&self, other: &Self) -> bool {
        // The index map is derived from the name order.
        self.names == other.names
    }
}

impl Eq for KeyIndexTable {}

/// Buttons pressed at least once during one capture window.
#[derive(Debug, Clone)]
pub struct Snapshot {
    table: Arc<KeyIndexTable>,
    state: u64,
}

impl Snapshot {
    /// Idle snapshot over `table`.
    pub fn empty(table: &Arc<KeyIndexTable>) -> Self {
        Self {
            table: Arc::clone(table),
            state: 0,
        }
    }

    /// Snapshot with an explicit bitmask. Bits outside the table width are
    /// rejected.
    pub fn from_state(table: &Arc<KeyIndexTable>, state: u64) -> Result<Self, ComboError> {
        if state & !table.full_mask() != 0 {
            return Err(ComboError::invalid(format!(
                "state {state:#b} does not fit in {} buttons",
                table.len()
            )));
        }
        Ok(Self {
            table: Arc::clone(table),
            state,
        })
    }

    /// Snapshot with the given buttons set.
    pub fn from_names<'a, I>(table: &Arc<KeyIndexTable>, names: I) -> Result<Self, ComboError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut snapshot = Self::empty(table);
        for name in names {
            snapshot.set(name)?;
        }
        Ok(snapshot)
    }

    pub fn set(&mut self, name: &str) -> Result<(), ComboError> {
        self.state |= self.table.mask_of(name)?;
        Ok(())
    }

    pub fn clear(&mut self, name: &str) -> Result<(), ComboError> {
        self.state &= !self.table.mask_of(name)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<bool, ComboError> {
        Ok(self.state & self.table.mask_of(name)? != 0)
    }

    /// OR `other` into this snapshot.
    ///
    /// Both snapshots must come from equal key tables, otherwise the bits
    /// would mean different buttons.
    pub fn merge(&mut self, other: &Snapshot) -> Result<(), ComboError> {
        if !self.is_compatible(other) {
            return Err(ComboError::IncompatibleSnapshot);
        }
        self.state |= other.state;
        Ok(())
    }

    /// Whether `other` was built from an equal key table.
    pub fn is_compatible(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.table, &other.table) || *self.table == *other.table
    }

    /// Idle snapshot: no button was pressed during the window.
    pub fn is_empty(&self) -> bool {
        self.state == 0
    }

    /// Compare bit patterns only, regardless of which table produced them.
    pub fn equals_by_state(&self, other: &Snapshot) -> bool {
        self.state == other.state
    }

    /// Raw bitmask. Stable for a fixed press pattern and key table.
    pub fn state(&self) -> u64 {
        self.state
    }

    pub fn width(&self) -> usize {
        self.table.len()
    }

    pub fn key_table(&self) -> &Arc<KeyIndexTable> {
        &self.table
    }

    /// Names of the set bits, in bit order.
    pub fn pressed_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.table
            .names()
            .iter()
            .enumerate()
            .filter(|(i, _)| self.state & (1u64 << i) != 0)
            .map(|(_, name)| name.as_str())
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }
        let mut first = true;
        for name in self.pressed_names() {
            if !first {
                f.write_str("+")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}
