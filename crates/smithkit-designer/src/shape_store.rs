//! Z-ordered storage of canvas objects.

use crate::canvas::DrawingObject;

/// Objects kept in paint order: index 0 is drawn first (bottom).
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    objects: Vec<DrawingObject>,
    next_id: u64,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
        }
    }

    pub fn generate_id(&mut self) -> u64 {
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        id
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Push on top of the paint order.
    pub fn insert(&mut self, obj: DrawingObject) {
        self.objects.push(obj);
    }

    pub fn remove(&mut self, id: u64) -> Option<DrawingObject> {
        let index = self.index_of(id)?;
        Some(self.objects.remove(index))
    }

    pub fn get(&self, id: u64) -> Option<&DrawingObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut DrawingObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.index_of(id).is_some()
    }

    /// Bottom to top.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &DrawingObject> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut DrawingObject> {
        self.objects.iter_mut()
    }

    /// Move an object to the bottom of the paint order.
    pub fn send_to_back(&mut self, id: u64) -> bool {
        match self.index_of(id) {
            Some(index) => {
                let obj = self.objects.remove(index);
                self.objects.insert(0, obj);
                true
            }
            None => false,
        }
    }

    /// Remove every object matching `pred`, returning the removed objects.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&DrawingObject) -> bool) -> Vec<DrawingObject> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.objects.len());
        for obj in self.objects.drain(..) {
            if pred(&obj) {
                removed.push(obj);
            } else {
                kept.push(obj);
            }
        }
        self.objects = kept;
        removed
    }

    fn index_of(&self, id: u64) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }
}
