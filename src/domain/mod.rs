// Domain model: cards, columns, and the board aggregate they live in.
mod board;
mod card;
mod column;
mod event;

pub use board::Board;
pub use card::Card;
pub use column::Column;
pub use event::BoardEvent;

use uuid::Uuid;

/// Implemented by anything that lives in an id-addressed collection
/// (cards within a column, columns within a board).
pub trait HasId {
    fn item_id(&self) -> Uuid;
}

pub fn find_by_id<T: HasId>(items: &[T], id: Uuid) -> Option<&T> {
    items.iter().find(|item| item.item_id() == id)
}

pub fn find_by_id_mut<T: HasId>(items: &mut [T], id: Uuid) -> Option<&mut T> {
    items.iter_mut().find(|item| item.item_id() == id)
}

/// Removes the item with `id`, panicking if it is absent. Only safe to call
/// once presence has already been confirmed by the caller (a command
/// validates first; event replay trusts a well-formed log).
pub fn remove_by_id<T: HasId>(items: &mut Vec<T>, id: Uuid) -> T {
    let index = items
        .iter()
        .position(|item| item.item_id() == id)
        .expect("item present in collection (log invariant)");
    items.remove(index)
}

/// Moves the item with `id` to `new_index`, clipping silently to the length
/// of the collection once the item has been removed.
pub fn move_by_id<T: HasId>(items: &mut Vec<T>, id: Uuid, new_index: usize) {
    let index = items
        .iter()
        .position(|item| item.item_id() == id)
        .expect("item present in collection (log invariant)");
    let item = items.remove(index);
    let clipped = new_index.min(items.len());
    items.insert(clipped, item);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Item(Uuid);
    impl HasId for Item {
        fn item_id(&self) -> Uuid {
            self.0
        }
    }

    #[test]
    fn move_clips_to_post_removal_length() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let mut items = vec![Item(a), Item(b), Item(c)];
        move_by_id(&mut items, a, 50);
        assert_eq!(items, vec![Item(b), Item(c), Item(a)]);
    }

    #[test]
    fn move_to_zero_goes_first() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let mut items = vec![Item(a), Item(b)];
        move_by_id(&mut items, b, 0);
        assert_eq!(items, vec![Item(b), Item(a)]);
    }
}
