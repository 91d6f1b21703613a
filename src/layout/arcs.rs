use crate::diagnostics::{self, ArcSkip, Diagnostic};
use crate::model::graphics::Point;
use crate::model::net::{Arc, Place, Transition};
use crate::model::page::Page;

/// Midpoint between the arc's place and transition.
///
/// Fails with the reason the label cannot be placed: an endpoint missing
/// from `places`/`transitions`, or present without a position.
pub fn arc_annotation_position(
    arc: &Arc,
    places: &[Place],
    transitions: &[Transition],
) -> Result<Point, ArcSkip> {
    let place = places
        .iter()
        .find(|p| p.id == arc.place)
        .ok_or_else(|| ArcSkip::PlaceNotFound(arc.place.clone()))?;
    let trans = transitions
        .iter()
        .find(|t| t.id == arc.transition)
        .ok_or_else(|| ArcSkip::TransitionNotFound(arc.transition.clone()))?;
    let from = place
        .position
        .ok_or_else(|| ArcSkip::PlaceUnpositioned(place.id.clone()))?;
    let to = trans
        .position
        .ok_or_else(|| ArcSkip::TransitionUnpositioned(trans.id.clone()))?;
    Ok(from.midpoint(to))
}

/// Positions every arc label on `page`. Arcs whose endpoints cannot be
/// resolved keep their previous label position and are reported.
pub fn position_all_arcs(page: &mut Page) -> Vec<Diagnostic> {
    let Page {
        places,
        transitions,
        arcs,
        ..
    } = page;

    let mut skipped = Vec::new();
    for arc in arcs.iter_mut() {
        match arc_annotation_position(arc, places, transitions) {
            Ok(pos) => arc.annotation.position = Some(pos),
            Err(reason) => skipped.push(diagnostics::warn(Diagnostic::UnpositionedArc {
                arc: arc.id.clone(),
                reason,
            })),
        }
    }
    skipped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::IdGenerator;
    use crate::layout::Positioned;
    use pretty_assertions::assert_eq;

    fn page_with_arc(ids: &mut IdGenerator) -> Page {
        let mut page = Page::new(ids.next_id(), "p");
        let place = Place::basic(ids, "a", "UNIT", "");
        let trans = Transition::basic(ids, "t");
        let arc = Arc::place_to_transition(ids, &place.id, &trans.id, "1`()");
        page.arcs.push(arc);
        page.places.push(place);
        page.transitions.push(trans);
        page
    }

    #[test]
    fn label_sits_at_floored_midpoint_and_is_stable() {
        let mut ids = IdGenerator::new();
        let mut page = page_with_arc(&mut ids);
        page.places[0].set_position(Point::new(-3, 10));
        page.transitions[0].set_position(Point::new(0, 15));

        assert!(position_all_arcs(&mut page).is_empty());
        let first = page.arcs[0].annotation.position;
        assert_eq!(first, Some(Point::new(-2, 12)));

        position_all_arcs(&mut page);
        assert_eq!(page.arcs[0].annotation.position, first);
    }

    #[test]
    fn unpositioned_endpoint_is_skipped() {
        let mut ids = IdGenerator::new();
        let mut page = page_with_arc(&mut ids);
        page.places[0].set_position(Point::new(0, 0));
        let trans = page.transitions[0].id.clone();

        let skipped = position_all_arcs(&mut page);
        assert_eq!(
            skipped,
            vec![Diagnostic::UnpositionedArc {
                arc: page.arcs[0].id.clone(),
                reason: ArcSkip::TransitionUnpositioned(trans),
            }]
        );
        assert_eq!(page.arcs[0].annotation.position, None);
    }

    #[test]
    fn missing_place_is_skipped() {
        let mut ids = IdGenerator::new();
        let mut page = page_with_arc(&mut ids);
        let gone = page.places.remove(0).id;
        let err = arc_annotation_position(&page.arcs[0], &page.places, &page.transitions);
        assert_eq!(err, Err(ArcSkip::PlaceNotFound(gone)));
    }
}
