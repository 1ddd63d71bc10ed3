use serde::{Deserialize, Serialize};

use jewelbill_core::{DomainError, DomainResult, ItemId};

use crate::item::{ItemDetails, LineItem};

/// Ordered line items of a bill.
///
/// Invariants:
/// - ids are unique within the list
/// - order is presentation order; edits never reorder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemList {
    items: Vec<LineItem>,
}

impl ItemList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new line with a fresh id.
    pub fn add(&mut self, details: ItemDetails) -> DomainResult<ItemId> {
        let item = LineItem::new(ItemId::new(), details)?;
        let id = item.id_typed();
        self.push(item)?;
        Ok(id)
    }

    /// Append an already-built line; its id must not be in the list yet.
    pub fn push(&mut self, item: LineItem) -> DomainResult<()> {
        if self.contains(item.id_typed()) {
            return Err(DomainError::invariant(format!(
                "item ids must be unique; {} is already on the bill",
                item.id_typed()
            )));
        }
        self.items.push(item);
        Ok(())
    }

    /// Replace the line with `id`, keeping its position and id.
    pub fn update(&mut self, id: ItemId, details: ItemDetails) -> DomainResult<&LineItem> {
        let idx = self.position(id).ok_or_else(DomainError::not_found)?;
        self.items[idx] = LineItem::new(id, details)?;
        Ok(&self.items[idx])
    }

    /// Remove the line with `id`, returning it.
    pub fn remove(&mut self, id: ItemId) -> DomainResult<LineItem> {
        let idx = self.position(id).ok_or_else(DomainError::not_found)?;
        Ok(self.items.remove(idx))
    }

    pub fn get(&self, id: ItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| i.id_typed() == id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id_typed() == id)
    }
}

impl From<ItemList> for Vec<LineItem> {
    fn from(list: ItemList) -> Self {
        list.items
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a LineItem;
    type IntoIter = core::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
