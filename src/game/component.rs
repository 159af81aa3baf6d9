//! Component Storage
//!
//! `ComponentStorage<T>` is a sparse array keyed by entity slot. Each occupied
//! slot remembers the full handle it was inserted under, so iteration hands
//! back live handles and a stale handle (same slot, older generation) never
//! reads another entity's data.
//!
//! A fish bowl holds at most a few hundred entities, so a flat `Vec<Option<_>>`
//! is plenty.

use super::entity::Entity;

#[derive(Debug)]
pub struct ComponentStorage<T> {
    data: Vec<Option<(Entity, T)>>,
}

impl<T> ComponentStorage<T> {
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Insert or replace the component for an entity.
    pub fn insert(&mut self, entity: Entity, component: T) {
        let idx = entity.index() as usize;
        if idx >= self.data.len() {
            self.data.resize_with(idx + 1, || None);
        }
        self.data[idx] = Some((entity, component));
    }

    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let slot = self.data.get_mut(entity.index() as usize)?;
        if matches!(slot, Some((owner, _)) if *owner == entity) {
            slot.take().map(|(_, c)| c)
        } else {
            None
        }
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        match self.data.get(entity.index() as usize)? {
            Some((owner, component)) if *owner == entity => Some(component),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        match self.data.get_mut(entity.index() as usize)? {
            Some((owner, component)) if *owner == entity => Some(component),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn contains(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    /// Iterate `(handle, component)` pairs in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.data
            .iter()
            .filter_map(|slot| slot.as_ref().map(|(entity, c)| (*entity, c)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.data
            .iter_mut()
            .filter_map(|slot| slot.as_mut().map(|(entity, c)| (*entity, c)))
    }

    /// Handles of every entity that carries this component.
    #[cfg(test)]
    pub fn entities(&self) -> Vec<Entity> {
        self.iter().map(|(entity, _)| entity).collect()
    }

    pub fn len(&self) -> usize {
        self.data.iter().filter(|slot| slot.is_some()).count()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut storage: ComponentStorage<f32> = ComponentStorage::new();
        let fish = Entity::new(5, 0);

        storage.insert(fish, 2.5);
        assert_eq!(storage.get(fish), Some(&2.5));
        assert!(storage.contains(fish));
        assert!(!storage.contains(Entity::new(4, 0)));
    }

    #[test]
    fn test_stale_handle_is_rejected() {
        let mut storage: ComponentStorage<&str> = ComponentStorage::new();
        let old = Entity::new(3, 0);
        let new = Entity::new(3, 1);

        storage.insert(new, "trout");
        assert_eq!(storage.get(old), None);
        assert_eq!(storage.remove(old), None);
        assert_eq!(storage.get(new), Some(&"trout"));
    }

    #[test]
    fn test_remove() {
        let mut storage: ComponentStorage<i32> = ComponentStorage::new();
        let fish = Entity::new(1, 0);

        storage.insert(fish, 3);
        assert_eq!(storage.remove(fish), Some(3));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_iteration_yields_handles() {
        let mut storage: ComponentStorage<u8> = ComponentStorage::new();
        let a = Entity::new(0, 2);
        let b = Entity::new(7, 0);
        storage.insert(a, 1);
        storage.insert(b, 3);

        let items: Vec<_> = storage.iter().map(|(e, v)| (e, *v)).collect();
        assert_eq!(items, vec![(a, 1), (b, 3)]);
        assert_eq!(storage.entities(), vec![a, b]);
        assert_eq!(storage.len(), 2);
    }
}
