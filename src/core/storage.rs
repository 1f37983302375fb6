use std::collections::BTreeMap;
use crate::core::BodyId;
use crate::error::PhysicsError;
use crate::Result;

/// First id handed out by automatic allocation
pub const AUTO_ID_START: i32 = -1000;

/// Generic storage trait for physics objects
pub trait Storage<T> {
    /// Creates a new empty storage
    fn new() -> Self;

    /// Adds an item under the next free automatic id and returns that id
    fn add(&mut self, item: T) -> Result<BodyId>;

    /// Adds an item under a caller-chosen id. Fails without modifying the storage if the id is taken.
    fn insert(&mut self, id: BodyId, item: T) -> Result<()>;

    /// Gets a reference to an item by its id
    fn get(&self, id: BodyId) -> Option<&T>;

    /// Gets a mutable reference to an item by its id
    fn get_mut(&mut self, id: BodyId) -> Option<&mut T>;

    /// Returns the number of items in the storage
    fn len(&self) -> usize;

    /// Returns whether the storage is empty
    fn is_empty(&self) -> bool;

    /// Returns all ids in ascending order
    fn ids(&self) -> Vec<BodyId>;

    /// Returns an iterator over all items in ascending id order
    fn iter<'a>(&'a self) -> impl Iterator<Item = (BodyId, &'a T)> + 'a where T: 'a;

    /// Returns a mutable iterator over all items in ascending id order
    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (BodyId, &'a mut T)> + 'a where T: 'a;
}

/// Id-ordered storage for bodies of one kind.
///
/// Automatic ids are allocated by scanning upward from a watermark that only ever increases, so an
/// auto id is never reissued and explicit ids are skipped over.
#[derive(Debug, Clone)]
pub struct BodyStorage<T> {
    items: BTreeMap<BodyId, T>,
    next_auto_id: i32,
}

impl<T> Storage<T> for BodyStorage<T> {
    fn new() -> Self {
        Self {
            items: BTreeMap::new(),
            next_auto_id: AUTO_ID_START,
        }
    }

    fn add(&mut self, item: T) -> Result<BodyId> {
        let mut id = self.next_auto_id;
        while self.items.contains_key(&BodyId(id)) {
            id = id.checked_add(1).ok_or(PhysicsError::IdSpaceExhausted)?;
        }

        let id = BodyId(id);
        self.next_auto_id = id.0.saturating_add(1);
        self.items.insert(id, item);
        Ok(id)
    }

    fn insert(&mut self, id: BodyId, item: T) -> Result<()> {
        if self.items.contains_key(&id) {
            return Err(PhysicsError::IdOccupied(id));
        }
        self.items.insert(id, item);
        Ok(())
    }

    fn get(&self, id: BodyId) -> Option<&T> {
        self.items.get(&id)
    }

    fn get_mut(&mut self, id: BodyId) -> Option<&mut T> {
        self.items.get_mut(&id)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn ids(&self) -> Vec<BodyId> {
        self.items.keys().copied().collect()
    }

    fn iter<'a>(&'a self) -> impl Iterator<Item = (BodyId, &'a T)> + 'a where T: 'a {
        self.items.iter().map(|(id, item)| (*id, item))
    }

    fn iter_mut<'a>(&'a mut self) -> impl Iterator<Item = (BodyId, &'a mut T)> + 'a where T: 'a {
        self.items.iter_mut().map(|(id, item)| (*id, item))
    }
}

impl<T> BodyStorage<T> {
    /// Gets a body by its id, returning an error if not found
    pub fn get_body(&self, id: BodyId) -> Result<&T> {
        self.get(id).ok_or(PhysicsError::BodyNotFound(id))
    }

    /// Gets a mutable reference to a body by its id, returning an error if not found
    pub fn get_body_mut(&mut self, id: BodyId) -> Result<&mut T> {
        self.get_mut(id).ok_or(PhysicsError::BodyNotFound(id))
    }

    /// Returns whether an id is taken
    pub fn contains(&self, id: BodyId) -> bool {
        self.items.contains_key(&id)
    }

    /// Returns the id the next automatic allocation starts scanning from
    pub fn next_auto_id(&self) -> i32 {
        self.next_auto_id
    }
}

impl<T> Default for BodyStorage<T> {
    fn default() -> Self {
        <Self as Storage<T>>::new()
    }
}
