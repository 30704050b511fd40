//! Retained object model of the drawing surface.
//!
//! The canvas owns every object in paint order together with its style and
//! the flags that govern interaction: `permanent` marks the background chart,
//! which no user operation may delete, and `interactive` marks objects that
//! can currently be picked by the selection tool.

use crate::model::{DesignerShape, Point, Shape};
use crate::selection_manager::SelectionManager;
use crate::shape_store::ShapeStore;
use crate::style::ShapeStyle;
use crate::viewport::Viewport;

/// Drawing object on the canvas that can be selected and manipulated.
#[derive(Debug, Clone)]
pub struct DrawingObject {
    pub id: u64,
    pub name: String,
    pub shape: Shape,
    pub style: ShapeStyle,
    pub permanent: bool,
    pub interactive: bool,
    pub selected: bool,
}

impl DrawingObject {
    /// Creates a new non-interactive user object.
    pub fn new(id: u64, shape: Shape, style: ShapeStyle) -> Self {
        Self {
            id,
            name: shape.shape_type().name().to_string(),
            shape,
            style,
            permanent: false,
            interactive: false,
            selected: false,
        }
    }

    /// Hit test widened by half the stroke width.
    pub fn contains_point(&self, point: &Point, tolerance: f64) -> bool {
        self.shape
            .contains_point(*point, tolerance + self.style.stroke_width.px() / 2.0)
    }

    pub fn is_selectable(&self) -> bool {
        self.interactive && !self.permanent
    }
}

/// Canvas state managing shapes, selection and the viewport.
#[derive(Debug, Clone)]
pub struct Canvas {
    pub shape_store: ShapeStore,
    pub selection_manager: SelectionManager,
    viewport: Viewport,
    width: f64,
    height: f64,
}

impl Canvas {
    /// Creates a canvas with specified dimensions.
    pub fn with_size(width: f64, height: f64) -> Self {
        Self {
            shape_store: ShapeStore::new(),
            selection_manager: SelectionManager::new(),
            viewport: Viewport::new(width, height),
            width,
            height,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Sets the canvas size (and the viewport surface size).
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.viewport.set_canvas_size(width, height);
    }

    /// Returns the number of objects on the canvas.
    pub fn shape_count(&self) -> usize {
        self.shape_store.len()
    }

    /// Adds a user object on top of the paint order.
    pub fn add(&mut self, shape: Shape, style: ShapeStyle) -> u64 {
        let id = self.shape_store.generate_id();
        let obj = DrawingObject::new(id, shape, style);
        tracing::debug!("Added {} #{}", obj.name, id);
        self.shape_store.insert(obj);
        id
    }

    /// Adds a permanent, non-interactive object on top of the paint order.
    pub fn add_permanent(&mut self, shape: Shape, style: ShapeStyle) -> u64 {
        let id = self.shape_store.generate_id();
        let mut obj = DrawingObject::new(id, shape, style);
        obj.permanent = true;
        self.shape_store.insert(obj);
        id
    }

    pub fn get_shape(&self, id: u64) -> Option<&DrawingObject> {
        self.shape_store.get(id)
    }

    pub fn get_shape_mut(&mut self, id: u64) -> Option<&mut DrawingObject> {
        self.shape_store.get_mut(id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.shape_store.contains(id)
    }

    /// Replaces the geometry of an existing object.
    pub fn set_shape(&mut self, id: u64, shape: Shape) -> bool {
        match self.shape_store.get_mut(id) {
            Some(obj) => {
                obj.shape = shape;
                true
            }
            None => false,
        }
    }

    /// Removes an object by ID, permanent or not.
    ///
    /// User-facing deletion goes through [`Canvas::remove_user_shape`].
    pub fn remove_shape(&mut self, id: u64) -> Option<DrawingObject> {
        let obj = self.shape_store.remove(id)?;
        self.selection_manager.forget(&self.shape_store, id);
        Some(obj)
    }

    /// Removes a non-permanent object; permanent objects are left in place.
    pub fn remove_user_shape(&mut self, id: u64) -> Option<DrawingObject> {
        if self.shape_store.get(id)?.permanent {
            return None;
        }
        self.remove_shape(id)
    }

    /// Removes every non-permanent object and returns how many were removed.
    pub fn clear_user_shapes(&mut self) -> usize {
        let removed = self.shape_store.remove_where(|o| !o.permanent);
        self.selection_manager.deselect_all(&mut self.shape_store);
        removed.len()
    }

    /// Removes every object matching `pred`.
    pub fn remove_where(&mut self, pred: impl FnMut(&DrawingObject) -> bool) -> Vec<DrawingObject> {
        let removed = self.shape_store.remove_where(pred);
        for obj in &removed {
            self.selection_manager.forget(&self.shape_store, obj.id);
        }
        removed
    }

    /// Gets all objects in paint order.
    pub fn shapes(&self) -> impl DoubleEndedIterator<Item = &DrawingObject> {
        self.shape_store.iter()
    }

    pub fn shapes_mut(&mut self) -> impl Iterator<Item = &mut DrawingObject> {
        self.shape_store.iter_mut()
    }

    pub fn send_to_back(&mut self, id: u64) -> bool {
        self.shape_store.send_to_back(id)
    }

    /// Topmost object under `point`, regardless of interactivity.
    pub fn hit_test(&self, point: &Point, tolerance: f64) -> Option<u64> {
        self.shape_store
            .iter()
            .rev()
            .find(|obj| obj.contains_point(point, tolerance))
            .map(|obj| obj.id)
    }

    /// With `user_shapes` set, every non-permanent object becomes interactive;
    /// otherwise nothing is.
    pub fn set_interactive(&mut self, user_shapes: bool) {
        for obj in self.shape_store.iter_mut() {
            obj.interactive = user_shapes && !obj.permanent;
        }
    }

    /// Selects a shape at the given point.
    /// If multi is true, toggles selection of the shape at point while keeping others.
    /// If multi is false, clears other selections and selects the shape at point.
    pub fn select_at(&mut self, point: &Point, tolerance: f64, multi: bool) -> Option<u64> {
        self.selection_manager
            .select_at(&mut self.shape_store, point, tolerance, multi)
    }

    /// Selects shapes intersecting the given rectangle.
    pub fn select_in_rect(&mut self, x: f64, y: f64, width: f64, height: f64, multi: bool) {
        self.selection_manager
            .select_in_rect(&mut self.shape_store, x, y, width, height, multi);
    }

    pub fn select_shape(&mut self, id: u64, multi: bool) {
        self.selection_manager
            .select_id(&mut self.shape_store, id, multi);
    }

    pub fn deselect_all(&mut self) {
        self.selection_manager.deselect_all(&mut self.shape_store);
    }

    /// IDs of the active selection in paint order.
    pub fn selected_ids(&self) -> Vec<u64> {
        self.selection_manager.selected_ids(&self.shape_store)
    }

    pub fn selected_count(&self) -> usize {
        self.selection_manager.selected_count(&self.shape_store)
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.selection_manager.selected_id()
    }

    /// Checks whether `point` lies on any selected shape.
    pub fn is_point_in_selection(&self, point: &Point, tolerance: f64) -> bool {
        self.shape_store
            .iter()
            .any(|o| o.selected && o.contains_point(point, tolerance))
    }

    /// Moves every selected shape by (dx, dy).
    pub fn move_selected(&mut self, dx: f64, dy: f64) {
        for obj in self.shape_store.iter_mut() {
            if obj.selected && !obj.permanent {
                obj.shape.translate(dx, dy);
            }
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Converts host pixel coordinates to canvas coordinates.
    pub fn pixel_to_canvas(&self, pixel_x: f64, pixel_y: f64) -> Point {
        self.viewport.pixel_to_canvas(pixel_x, pixel_y)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::with_size(1200.0, 800.0)
    }
}
