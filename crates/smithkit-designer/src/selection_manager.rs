use crate::canvas::DrawingObject;
use crate::model::{DesignerShape, Point};
use crate::shape_store::ShapeStore;

/// Manages shape selection state and selection operations.
///
/// `SelectionManager` is responsible for:
/// - Tracking which shape is the "primary" selected shape
/// - Handling point-based selection (clicking on shapes)
/// - Handling rectangle-based selection (rubber-band drag)
/// - Multi-select operations (Shift+click)
///
/// # Selection Model
///
/// - **Primary Selection**: One shape is designated as the "primary" selection (stored in `selected_id`)
/// - **Active Selection**: Every shape whose `selected` flag is `true`
/// - **Eligibility**: Only interactive, non-permanent shapes can be selected. The
///   chart and anything drawn while a drawing tool is active are skipped.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    /// The ID of the primary selected shape, if any
    selected_id: Option<u64>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use smithkit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.selected_id(), None);
    /// ```
    pub fn new() -> Self {
        Self { selected_id: None }
    }

    /// Returns the ID of the primary selected shape.
    pub fn selected_id(&self) -> Option<u64> {
        self.selected_id
    }

    /// Deselects all shapes and clears the primary selection.
    pub fn deselect_all(&mut self, store: &mut ShapeStore) {
        for obj in store.iter_mut() {
            obj.selected = false;
        }
        self.selected_id = None;
    }

    /// Selects the topmost eligible shape at the given point.
    ///
    /// # Multi-select Behavior
    ///
    /// - If `multi` is `false`: Deselects all other shapes before selecting
    /// - If `multi` is `true`: Toggles selection without affecting other shapes
    ///
    /// # Returns
    ///
    /// The primary selected shape after the operation, or `None`.
    pub fn select_at(
        &mut self,
        store: &mut ShapeStore,
        point: &Point,
        tolerance: f64,
        multi: bool,
    ) -> Option<u64> {
        let found_id = store
            .iter()
            .rev()
            .find(|obj| obj.is_selectable() && obj.contains_point(point, tolerance))
            .map(|obj| obj.id);

        if !multi {
            self.deselect_all(store);
        }

        if let Some(id) = found_id {
            let was_selected = store.get(id).map(|o| o.selected).unwrap_or(false);
            let should_select = if multi { !was_selected } else { true };

            if let Some(obj) = store.get_mut(id) {
                obj.selected = should_select;
            }

            if should_select {
                self.selected_id = Some(id);
            } else if self.selected_id == Some(id) {
                self.selected_id = store.iter().find(|o| o.selected).map(|o| o.id);
            }
        } else if !multi {
            self.selected_id = None;
        }

        self.selected_id
    }

    /// Selects all eligible shapes whose bounds intersect the given rectangle.
    ///
    /// The rectangle is normalized, so negative width/height are accepted.
    pub fn select_in_rect(
        &mut self,
        store: &mut ShapeStore,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        multi: bool,
    ) {
        if !multi {
            self.deselect_all(store);
        }

        let (rx, rw) = if width < 0.0 { (x + width, -width) } else { (x, width) };
        let (ry, rh) = if height < 0.0 { (y + height, -height) } else { (y, height) };

        for obj in store.iter_mut() {
            if !obj.is_selectable() {
                continue;
            }
            let (sx1, sy1, sx2, sy2) = obj.shape.bounds();
            if sx1 <= rx + rw && sx2 >= rx && sy1 <= ry + rh && sy2 >= ry {
                obj.selected = true;
                if self.selected_id.is_none() {
                    self.selected_id = Some(obj.id);
                }
            }
        }
    }

    /// Selects a shape by ID if it is eligible.
    pub fn select_id(&mut self, store: &mut ShapeStore, id: u64, multi: bool) {
        if !multi {
            self.deselect_all(store);
        }
        if let Some(obj) = store.get_mut(id).filter(|o| o.is_selectable()) {
            obj.selected = true;
            self.selected_id = Some(id);
        }
    }

    /// IDs of every selected shape in paint order.
    pub fn selected_ids(&self, store: &ShapeStore) -> Vec<u64> {
        store.iter().filter(|o| o.selected).map(|o| o.id).collect()
    }

    /// Returns the number of currently selected shapes.
    pub fn selected_count(&self, store: &ShapeStore) -> usize {
        store.iter().filter(|o| o.selected).count()
    }

    /// Drops `id` from the selection bookkeeping after it left the store.
    pub fn forget(&mut self, store: &ShapeStore, id: u64) {
        if self.selected_id == Some(id) {
            self.selected_id = store.iter().find(|o| o.selected).map(|o| o.id);
        }
    }
}
