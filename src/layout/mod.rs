//! Coordinates and default appearance.
//!
//! Layout runs after construction: elements are created unpositioned, then
//! given a default look and a position. Arc labels are placed last, once
//! every endpoint on the page has settled.

mod arcs;
mod spacing;
pub mod style;

pub use arcs::{arc_annotation_position, position_all_arcs};
pub use spacing::{Spacer, distribute_horizontally};

use crate::model::graphics::Point;
use crate::model::net::{Arc, Place, Transition};

pub trait Positioned {
    fn position(&self) -> Option<Point>;

    fn set_default_layout(&mut self);

    /// Moves the element together with the labels attached to it.
    fn set_position(&mut self, at: Point);

    fn set_layout_and_position(&mut self, at: Point) {
        self.set_default_layout();
        self.set_position(at);
    }
}

impl Positioned for Place {
    fn position(&self) -> Option<Point> {
        self.position
    }

    fn set_default_layout(&mut self) {
        (style::place_layout(self.kind()).default_layout)(self)
    }

    fn set_position(&mut self, at: Point) {
        (style::place_layout(self.kind()).set_position)(self, at)
    }
}

impl Positioned for Transition {
    fn position(&self) -> Option<Point> {
        self.position
    }

    fn set_default_layout(&mut self) {
        (style::transition_layout(self.kind()).default_layout)(self)
    }

    fn set_position(&mut self, at: Point) {
        (style::transition_layout(self.kind()).set_position)(self, at)
    }
}

/// An arc's position is its label's; the arc element itself stays at the
/// origin.
impl Positioned for Arc {
    fn position(&self) -> Option<Point> {
        self.annotation.position
    }

    fn set_default_layout(&mut self) {
        style::arc_layout(self)
    }

    fn set_position(&mut self, at: Point) {
        self.annotation.position = Some(at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdGenerator;
    use pretty_assertions::assert_eq;

    #[test]
    fn odd_count_centres_first_element() {
        let mut ids = IdGenerator::new();
        let mut ts: Vec<Transition> = (0..3)
            .map(|i| Transition::basic(&mut ids, &format!("t{}", i)))
            .collect();
        distribute_horizontally(ts.iter_mut(), 252, 126);

        let xs: Vec<i32> = ts.iter().filter_map(|t| t.position).map(|p| p.x).collect();
        assert_eq!(xs, vec![0, 126, -126]);
        assert!(ts.iter().all(|t| t.position.map(|p| p.y) == Some(252)));
    }

    #[test]
    fn even_count_is_mirrored_without_centre() {
        let mut ids = IdGenerator::new();
        let mut ps: Vec<Place> = (0..4)
            .map(|i| Place::basic(&mut ids, &format!("p{}", i), "UNIT", ""))
            .collect();
        distribute_horizontally(ps.iter_mut(), 0, 100);

        let mut xs: Vec<i32> = ps.iter().filter_map(|p| p.position).map(|p| p.x).collect();
        assert!(!xs.contains(&0));
        xs.sort();
        assert_eq!(xs, vec![-150, -50, 50, 150]);
    }

    #[test]
    fn layout_and_position_dispatches_on_kind() {
        let mut ids = IdGenerator::new();
        let mut t = Transition::substitution(&mut ids, "sub");
        t.set_layout_and_position(Point::new(0, 252));
        assert_eq!(t.shape, Some(style::TRANSITION_BOX));
        assert_eq!(
            t.substitution.as_ref().and_then(|s| s.info.position),
            Some(Point::new(0, 227))
        );
    }
}
