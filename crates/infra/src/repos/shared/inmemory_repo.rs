use subex_domain::{Entity, ID};
use std::sync::{Mutex, MutexGuard};

/// Useful functions for creating inmemory repositories

pub fn lock<T>(collection: &Mutex<Vec<T>>) -> MutexGuard<'_, Vec<T>> {
    collection
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub fn insert<T: Clone>(val: &T, collection: &Mutex<Vec<T>>) {
    lock(collection).push(val.clone());
}

pub fn find<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    lock(collection)
        .iter()
        .find(|item| item.id() == val_id)
        .cloned()
}

pub fn find_many<T: Clone + Entity>(val_ids: &[ID], collection: &Mutex<Vec<T>>) -> Vec<T> {
    find_by(collection, |item| val_ids.contains(item.id()))
}

pub fn find_by<T: Clone, F: FnMut(&T) -> bool>(collection: &Mutex<Vec<T>>, mut compare: F) -> Vec<T> {
    lock(collection)
        .iter()
        .filter(|item| compare(item))
        .cloned()
        .collect()
}

pub fn delete<T: Clone + Entity>(val_id: &ID, collection: &Mutex<Vec<T>>) -> Option<T> {
    let mut collection = lock(collection);
    let index = collection.iter().position(|item| item.id() == val_id)?;
    Some(collection.remove(index))
}

pub fn find_and_delete_by<T: Clone, F: Fn(&T) -> bool>(
    collection: &Mutex<Vec<T>>,
    compare: F,
) -> Vec<T> {
    let mut collection = lock(collection);
    let mut deleted_items = Vec::new();
    collection.retain(|item| {
        if compare(item) {
            deleted_items.push(item.clone());
            false
        } else {
            true
        }
    });
    deleted_items
}

/// Applies `update` to the item with the given id. Returns the result of
/// `update` or `None` if the item was not found.
pub fn update_one<T: Entity, R, U: FnOnce(&mut T) -> R>(
    val_id: &ID,
    collection: &Mutex<Vec<T>>,
    update: U,
) -> Option<R> {
    let mut collection = lock(collection);
    collection
        .iter_mut()
        .find(|item| item.id() == val_id)
        .map(update)
}
