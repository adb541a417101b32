//! Domain types for the todo list.
//!
//! A todo list is an ordered collection of items. Order is meaningful: it
//! drives the CLI's position numbering and is what the reorder action
//! rewrites.

use serde::{Deserialize, Serialize};

/// Numeric identifier of a todo item created through the HTTP API
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoId(i64);

impl TodoId {
    /// Creates a `TodoId` from its raw value
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw value
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// Parses an id the lenient way path segments are read
    ///
    /// See [`parse_leading_integer`].
    #[must_use]
    pub fn parse_lenient(input: &str) -> Option<Self> {
        parse_leading_integer(input).map(Self)
    }
}

impl From<i64> for TodoId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for TodoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single todo item
///
/// Serialized with a stable field order: `id`, `text`, `done`. Items created
/// by the CLI have no id and the field is omitted entirely.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Identifier, present only for items created over HTTP
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoId>,
    /// Task description
    pub text: String,
    /// Whether the task is completed
    #[serde(default)]
    pub done: bool,
}

impl TodoItem {
    /// Creates an open item without an id, the way the CLI does
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            done: false,
        }
    }

    /// Creates an open item with an id, the way the HTTP API does
    #[must_use]
    pub fn with_id(id: TodoId, text: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            text: text.into(),
            done: false,
        }
    }

    /// Returns true if this item carries the given id
    #[must_use]
    pub fn has_id(&self, id: TodoId) -> bool {
        self.id == Some(id)
    }
}

/// The ordered todo collection, the unit of persistence
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TodoList {
    items: Vec<TodoItem>,
}

impl TodoList {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the items in order
    #[must_use]
    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    /// Consumes the list, returning its items
    #[must_use]
    pub fn into_items(self) -> Vec<TodoItem> {
        self.items
    }

    /// Returns the number of items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of completed items
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.items.iter().filter(|t| t.done).count()
    }

    /// Appends an item at the end
    pub fn push(&mut self, item: TodoItem) {
        self.items.push(item);
    }

    /// Returns the item at a 1-based position
    #[must_use]
    pub fn get_position(&self, position: usize) -> Option<&TodoItem> {
        position.checked_sub(1).and_then(|i| self.items.get(i))
    }

    /// Returns the item at a 1-based position, mutably
    pub fn get_position_mut(&mut self, position: usize) -> Option<&mut TodoItem> {
        position.checked_sub(1).and_then(|i| self.items.get_mut(i))
    }

    /// Removes and returns the item at a 0-based index
    pub fn remove_index(&mut self, index: usize) -> Option<TodoItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Removes and returns the item at a 1-based position
    pub fn remove_position(&mut self, position: usize) -> Option<TodoItem> {
        self.remove_index(position.checked_sub(1)?)
    }

    /// Returns the 0-based index of the first item with this id
    #[must_use]
    pub fn index_of(&self, id: TodoId) -> Option<usize> {
        self.items.iter().position(|t| t.has_id(id))
    }

    /// Returns the first item with this id, mutably
    pub fn find_mut(&mut self, id: TodoId) -> Option<&mut TodoItem> {
        self.items.iter_mut().find(|t| t.has_id(id))
    }

    /// Removes every item, returning how many were dropped
    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    /// Removes all completed items, returning how many were dropped
    pub fn remove_completed(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|t| !t.done);
        before - self.items.len()
    }

    /// Picks an id for a new item
    ///
    /// The candidate (a millisecond timestamp) is used unless an item already
    /// carries it, in which case the id is one past the largest id present.
    #[must_use]
    pub fn next_id(&self, candidate: i64) -> TodoId {
        let taken = self.items.iter().any(|t| t.has_id(TodoId(candidate)));
        if !taken {
            return TodoId(candidate);
        }
        let max = self
            .items
            .iter()
            .filter_map(|t| t.id)
            .map(TodoId::get)
            .max()
            .unwrap_or(candidate);
        TodoId(max.saturating_add(1))
    }

    /// Reorders the list following `order`
    ///
    /// For each id in `order`, every not-yet-placed item with that id moves
    /// to the front section, in the order given. Unknown and repeated ids are
    /// skipped. Items never mentioned, including items without an id, follow
    /// in their original relative order. No item is dropped or duplicated.
    pub fn reorder(&mut self, order: &[TodoId]) {
        let mut pending: Vec<Option<TodoItem>> =
            std::mem::take(&mut self.items).into_iter().map(Some).collect();
        let mut reordered = Vec::with_capacity(pending.len());

        for &id in order {
            for slot in &mut pending {
                if slot.as_ref().is_some_and(|t| t.has_id(id)) {
                    reordered.extend(slot.take());
                }
            }
        }

        reordered.extend(pending.into_iter().flatten());
        self.items = reordered;
    }
}

impl From<Vec<TodoItem>> for TodoList {
    fn from(items: Vec<TodoItem>) -> Self {
        Self { items }
    }
}

impl FromIterator<TodoItem> for TodoList {
    fn from_iter<I: IntoIterator<Item = TodoItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TodoList {
    type Item = &'a TodoItem;
    type IntoIter = std::slice::Iter<'a, TodoItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Actions accepted by the todo reducer
///
/// Positional variants serve the CLI (1-based positions); id variants serve
/// the HTTP API. `Clear` is shared.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    // ========== Positional (CLI) ==========
    /// Append an item without an id
    Add {
        /// Task text, stored as given
        text: String,
    },

    /// Mark the item at a 1-based position as done
    CompleteAt {
        /// 1-based position
        position: usize,
    },

    /// Remove the item at a 1-based position
    RemoveAt {
        /// 1-based position
        position: usize,
    },

    // ========== Shared ==========
    /// Remove every item
    Clear,

    // ========== Id-based (HTTP) ==========
    /// Append an item with a fresh id
    Create {
        /// Task text, stored as given
        text: String,
    },

    /// Mark the item with this id as done
    Complete {
        /// Item to complete
        id: TodoId,
    },

    /// Replace the text of the item with this id
    UpdateText {
        /// Item to update
        id: TodoId,
        /// New text, trimmed before storing
        text: String,
    },

    /// Remove the item with this id
    Delete {
        /// Item to delete
        id: TodoId,
    },

    /// Remove every completed item
    ClearCompleted,

    /// Rearrange items following a client-supplied id order
    Reorder {
        /// Desired order; may be partial or mention unknown ids
        order: Vec<TodoId>,
    },
}

/// What an applied action did
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoOutcome {
    /// An item was appended by the CLI
    Added(TodoItem),
    /// An item was appended by the HTTP API
    Created(TodoItem),
    /// An item was marked done
    Completed(TodoItem),
    /// An item's text was replaced
    Updated(TodoItem),
    /// An item was removed
    Removed(TodoItem),
    /// The list was emptied
    Cleared {
        /// Number of items dropped
        removed: usize,
    },
    /// Completed items were dropped
    CompletedCleared {
        /// Number of items dropped
        removed: usize,
    },
    /// The list was reordered; carries the new order
    Reordered(TodoList),
}

/// Reads an integer the way a lenient number parser does
///
/// Leading whitespace is skipped, an optional sign is accepted, and the
/// longest run of decimal digits that follows is taken; anything after it is
/// ignored. Returns `None` when no digit is found. Values beyond `i64`
/// saturate.
///
/// ```
/// use tasklist_core::types::parse_leading_integer;
///
/// assert_eq!(parse_leading_integer("  42"), Some(42));
/// assert_eq!(parse_leading_integer("3rd"), Some(3));
/// assert_eq!(parse_leading_integer("-2"), Some(-2));
/// assert_eq!(parse_leading_integer("abc"), None);
/// ```
#[must_use]
pub fn parse_leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for byte in digits.bytes().take_while(u8::is_ascii_digit) {
        seen_digit = true;
        let digit = i64::from(byte - b'0');
        value = value.saturating_mul(10).saturating_add(digit);
    }

    if !seen_digit {
        return None;
    }
    Some(if negative { value.saturating_neg() } else { value })
}
