use crate::layout::Positioned;
use crate::model::graphics::Point;

/// One-dimensional coordinates oscillating around an axis.
///
/// With `start = 0` the sequence is `0, step, -step, 2*step, -2*step, ...`;
/// with `start = step / 2` it is `step/2, -step/2, 3*step/2, ...`. A non-zero
/// translation is added after every reflection. The sequence ends at the
/// first value that would not fit in an `i32`.
#[derive(Debug, Clone)]
pub struct Spacer {
    step: i32,
    current: Option<i32>,
    translation: i32,
}

impl Spacer {
    pub fn new(step: i32, start: i32) -> Self {
        Self::with_translation(step, start, 0)
    }

    pub fn with_translation(step: i32, start: i32, translation: i32) -> Self {
        Self {
            step,
            current: Some(start),
            translation,
        }
    }

    fn reflect(&self, value: i32) -> Option<i32> {
        let mirrored = if value <= 0 {
            value.checked_sub(self.step)?.checked_neg()?
        } else {
            value.checked_neg()?
        };
        mirrored.checked_add(self.translation)
    }
}

impl Iterator for Spacer {
    type Item = i32;

    fn next(&mut self) -> Option<i32> {
        let value = self.current?;
        self.current = self.reflect(value);
        Some(value)
    }
}

/// Places `elements` on the line `y`, `spacing` apart and symmetric about
/// `x = 0`. An odd count puts the first element on the axis. Elements
/// whose coordinate would overflow keep their previous position.
pub fn distribute_horizontally<'a, T, I>(elements: I, y: i32, spacing: i32)
where
    T: Positioned + 'a,
    I: IntoIterator<Item = &'a mut T>,
{
    let elements: Vec<&mut T> = elements.into_iter().collect();
    let start = if elements.len() % 2 == 0 { spacing / 2 } else { 0 };
    for (element, x) in elements.into_iter().zip(Spacer::new(spacing, start)) {
        element.set_position(Point::new(x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn spacer_oscillates_from_zero() {
        let seq: Vec<i32> = Spacer::new(10, 0).take(5).collect();
        assert_eq!(seq, vec![0, 10, -10, 20, -20]);
    }

    #[test]
    fn spacer_from_half_step() {
        let seq: Vec<i32> = Spacer::new(126, 63).take(4).collect();
        assert_eq!(seq, vec![63, -63, 189, -189]);
    }

    #[test]
    fn translation_shifts_after_reflection() {
        let seq: Vec<i32> = Spacer::with_translation(10, 0, 100).take(3).collect();
        assert_eq!(seq, vec![0, 110, -10]);
    }

    #[test]
    fn spacer_stops_before_overflowing() {
        let seq: Vec<i32> = Spacer::new(i32::MAX, 0).collect();
        assert_eq!(seq, vec![0, i32::MAX, -i32::MAX]);
    }

    #[test]
    fn wide_spacing_assigns_every_fitting_coordinate() {
        use crate::ids::IdGenerator;
        use crate::model::net::Transition;

        let mut ids = IdGenerator::new();
        let mut ts: Vec<Transition> = (0..3)
            .map(|i| Transition::basic(&mut ids, &format!("t{}", i)))
            .collect();
        distribute_horizontally(ts.iter_mut(), 0, 1_500_000_000);

        let xs: Vec<i32> = ts.iter().filter_map(|t| t.position).map(|p| p.x).collect();
        assert_eq!(xs, vec![0, 1_500_000_000, -1_500_000_000]);
    }
}
