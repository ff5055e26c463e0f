use serde::{Deserialize, Serialize};

/// The semantic roles a spreadsheet column can be assigned to.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Date,
    Description,
    Amount,
    Category,
}

serde_plain::derive_display_from_serialize!(Slot);
serde_plain::derive_fromstr_from_deserialize!(Slot);

impl Slot {
    /// All slots, in the order they are written into an append row.
    pub const ALL: [Slot; 4] = [Slot::Date, Slot::Description, Slot::Amount, Slot::Category];
}

/// The inferred schema of one spreadsheet tab: which column index holds each [`Slot`], plus the
/// header row exactly as it was read.
///
/// A column index is never held by two slots. `ColumnMapping` values are built by
/// [`crate::infer_schema`] and are not meant to be edited afterwards; re-run inference instead.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ColumnMapping {
    date_column: Option<usize>,
    description_column: Option<usize>,
    amount_column: Option<usize>,
    category_column: Option<usize>,
    headers: Vec<String>,
}

impl ColumnMapping {
    /// Creates a mapping with every slot unassigned.
    pub fn new<S, I>(headers: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Creates a mapping with explicit indices. Indices claimed by an earlier slot (in
    /// [`Slot::ALL`] order) are dropped from later ones so that the mapping stays one-to-one.
    pub fn with_columns<S, I>(
        headers: I,
        date: Option<usize>,
        description: Option<usize>,
        amount: Option<usize>,
        category: Option<usize>,
    ) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        let mut mapping = Self::new(headers);
        for (slot, column) in Slot::ALL.into_iter().zip([date, description, amount, category]) {
            if let Some(column) = column {
                mapping.claim(slot, column);
            }
        }
        mapping
    }

    pub fn date_column(&self) -> Option<usize> {
        self.date_column
    }

    pub fn description_column(&self) -> Option<usize> {
        self.description_column
    }

    pub fn amount_column(&self) -> Option<usize> {
        self.amount_column
    }

    pub fn category_column(&self) -> Option<usize> {
        self.category_column
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The width of the sheet as described by its header row.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Returns the column index assigned to `slot`.
    pub fn get(&self, slot: Slot) -> Option<usize> {
        match slot {
            Slot::Date => self.date_column,
            Slot::Description => self.description_column,
            Slot::Amount => self.amount_column,
            Slot::Category => self.category_column,
        }
    }

    /// Returns the slot that holds `column`, if any.
    pub fn slot_of(&self, column: usize) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|&slot| self.get(slot) == Some(column))
    }

    pub fn is_assigned(&self, column: usize) -> bool {
        self.slot_of(column).is_some()
    }

    /// True when every slot has a column.
    pub fn is_complete(&self) -> bool {
        Slot::ALL.into_iter().all(|slot| self.get(slot).is_some())
    }

    /// Assigns `column` to `slot` if the slot is free and the column is not held by another slot.
    /// Returns whether the assignment happened.
    pub(crate) fn claim(&mut self, slot: Slot, column: usize) -> bool {
        if self.get(slot).is_some() || self.is_assigned(column) {
            return false;
        }
        let target = match slot {
            Slot::Date => &mut self.date_column,
            Slot::Description => &mut self.description_column,
            Slot::Amount => &mut self.amount_column,
            Slot::Category => &mut self.category_column,
        };
        *target = Some(column);
        true
    }
}
