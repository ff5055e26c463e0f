use uuid::Uuid;

/// Supplies the id of the transaction parsed from data row `row` (zero-based, header excluded).
pub trait IdGenerator {
    fn id_for(&self, row: usize) -> String;
}

impl<F> IdGenerator for F
where
    F: Fn(usize) -> String,
{
    fn id_for(&self, row: usize) -> String {
        self(row)
    }
}

/// Deterministic ids of the form `{prefix}-{row}`. Only unique within one import.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RowIndexIds {
    prefix: String,
}

impl RowIndexIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl IdGenerator for RowIndexIds {
    fn id_for(&self, row: usize) -> String {
        format!("{}-{row}", self.prefix)
    }
}

/// Globally unique ids: a random batch key shared by one import, followed by the row index.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct UniqueIds {
    batch: String,
}

impl UniqueIds {
    pub fn new() -> Self {
        Self {
            batch: Uuid::new_v4().simple().to_string(),
        }
    }
}

impl Default for UniqueIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for UniqueIds {
    fn id_for(&self, row: usize) -> String {
        format!("{}-{row}", self.batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_index_ids() {
        let ids = RowIndexIds::new("txn");
        assert_eq!(ids.id_for(0), "txn-0");
        assert_eq!(ids.id_for(12), "txn-12");
    }

    #[test]
    fn test_unique_ids_differ_across_batches() {
        let a = UniqueIds::new();
        let b = UniqueIds::new();
        assert_ne!(a.id_for(0), b.id_for(0));
        assert_ne!(a.id_for(0), a.id_for(1));
        assert!(a.id_for(3).ends_with("-3"));
    }

    #[test]
    fn test_closure_ids() {
        let ids = |row: usize| format!("sheet1:{}", row + 2);
        assert_eq!(ids.id_for(0), "sheet1:2");
    }
}
