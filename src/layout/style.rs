//! Per-kind default appearance and position propagation.
//!
//! Each element kind maps to a pair of plain functions: one that attaches the
//! default presentation attributes, one that moves the element and the labels
//! hanging off it. Dispatch goes through [`place_layout`] and
//! [`transition_layout`].

use crate::model::graphics::{Arrow, BoxShape, Graphics, PlaceShape, Point};
use crate::model::net::{Arc, Inscription, Place, PlaceKind, Transition, TransitionKind};

pub const PLACE_GRAPHICS: Graphics = Graphics::new("", 1);
pub const TAG_GRAPHICS: Graphics = Graphics::new("Solid", 0);
pub const TRANSITION_GRAPHICS: Graphics = Graphics::new("", 1);
pub const LABEL_GRAPHICS: Graphics = Graphics::new("solid", 0);
pub const ARC_GRAPHICS: Graphics = Graphics::new("", 1);

pub const PLACE_SHAPE: PlaceShape = PlaceShape {
    width: 60.0,
    height: 40.0,
    token: (-10.0, 0.0),
    marking: (0.0, 0.0),
    marking_hidden: false,
};
pub const TRANSITION_BOX: BoxShape = BoxShape {
    width: 60.0,
    height: 40.0,
};
pub const ARC_ARROW: Arrow = Arrow {
    headsize: 1.2,
    current_cycle: 2,
};

/// Label offsets relative to the owning element.
pub const TYPE_OFFSET: (i32, i32) = (50, -25);
pub const INITMARK_OFFSET: (i32, i32) = (50, 25);
pub const FUSION_TAG_OFFSET: (i32, i32) = (0, -20);
pub const PORT_TAG_OFFSET: (i32, i32) = (-25, -20);
pub const GUARD_OFFSET: (i32, i32) = (0, 25);
pub const SUBPAGE_INFO_OFFSET: (i32, i32) = (0, -25);

#[derive(Clone, Copy)]
pub struct PlaceLayout {
    pub default_layout: fn(&mut Place),
    pub set_position: fn(&mut Place, Point),
}

#[derive(Clone, Copy)]
pub struct TransitionLayout {
    pub default_layout: fn(&mut Transition),
    pub set_position: fn(&mut Transition, Point),
}

pub fn place_layout(kind: PlaceKind) -> PlaceLayout {
    match kind {
        PlaceKind::Basic => PlaceLayout {
            default_layout: basic_place_layout,
            set_position: basic_place_position,
        },
        PlaceKind::Port => PlaceLayout {
            default_layout: port_place_layout,
            set_position: port_place_position,
        },
        PlaceKind::Fusion => PlaceLayout {
            default_layout: fusion_place_layout,
            set_position: fusion_place_position,
        },
        PlaceKind::FusedPort => PlaceLayout {
            default_layout: fused_port_place_layout,
            set_position: fused_port_place_position,
        },
    }
}

pub fn transition_layout(kind: TransitionKind) -> TransitionLayout {
    match kind {
        TransitionKind::Basic => TransitionLayout {
            default_layout: basic_transition_layout,
            set_position: basic_transition_position,
        },
        TransitionKind::Condition => TransitionLayout {
            default_layout: condition_transition_layout,
            set_position: condition_transition_position,
        },
        TransitionKind::Substitution => TransitionLayout {
            default_layout: substitution_transition_layout,
            set_position: substitution_transition_position,
        },
    }
}

fn at(origin: Point, (dx, dy): (i32, i32)) -> Point {
    origin.offset(dx, dy)
}

fn label_layout(label: &mut Inscription, graphics: Graphics) {
    label.graphics = Some(graphics);
}

fn basic_place_layout(place: &mut Place) {
    place.graphics = Some(PLACE_GRAPHICS);
    place.shape = Some(PLACE_SHAPE);
    label_layout(&mut place.color_set, TAG_GRAPHICS);
    label_layout(&mut place.init_mark, TAG_GRAPHICS);
}

fn basic_place_position(place: &mut Place, pos: Point) {
    place.position = Some(pos);
    place.color_set.position = Some(at(pos, TYPE_OFFSET));
    place.init_mark.position = Some(at(pos, INITMARK_OFFSET));
}

fn port_tag_layout(place: &mut Place) {
    if let Some(port) = place.port.as_mut() {
        port.graphics = Some(TAG_GRAPHICS);
    }
}

fn port_tag_position(place: &mut Place, pos: Point) {
    if let Some(port) = place.port.as_mut() {
        port.position = Some(at(pos, PORT_TAG_OFFSET));
    }
}

fn fusion_tag_layout(place: &mut Place) {
    if let Some(fusion) = place.fusion.as_mut() {
        fusion.graphics = Some(TAG_GRAPHICS);
    }
}

fn fusion_tag_position(place: &mut Place, pos: Point) {
    if let Some(fusion) = place.fusion.as_mut() {
        fusion.position = Some(at(pos, FUSION_TAG_OFFSET));
    }
}

fn port_place_layout(place: &mut Place) {
    basic_place_layout(place);
    port_tag_layout(place);
}

fn port_place_position(place: &mut Place, pos: Point) {
    basic_place_position(place, pos);
    port_tag_position(place, pos);
}

fn fusion_place_layout(place: &mut Place) {
    basic_place_layout(place);
    fusion_tag_layout(place);
}

fn fusion_place_position(place: &mut Place, pos: Point) {
    basic_place_position(place, pos);
    fusion_tag_position(place, pos);
}

fn fused_port_place_layout(place: &mut Place) {
    basic_place_layout(place);
    port_tag_layout(place);
    fusion_tag_layout(place);
}

fn fused_port_place_position(place: &mut Place, pos: Point) {
    basic_place_position(place, pos);
    port_tag_position(place, pos);
    fusion_tag_position(place, pos);
}

fn basic_transition_layout(trans: &mut Transition) {
    trans.graphics = Some(TRANSITION_GRAPHICS);
    trans.shape = Some(TRANSITION_BOX);
}

fn basic_transition_position(trans: &mut Transition, pos: Point) {
    trans.position = Some(pos);
}

fn condition_transition_layout(trans: &mut Transition) {
    basic_transition_layout(trans);
    if let Some(guard) = trans.guard.as_mut() {
        label_layout(guard, LABEL_GRAPHICS);
    }
}

fn condition_transition_position(trans: &mut Transition, pos: Point) {
    basic_transition_position(trans, pos);
    if let Some(guard) = trans.guard.as_mut() {
        guard.position = Some(at(pos, GUARD_OFFSET));
    }
}

fn substitution_transition_layout(trans: &mut Transition) {
    basic_transition_layout(trans);
    if let Some(subst) = trans.substitution.as_mut() {
        label_layout(&mut subst.info, LABEL_GRAPHICS);
    }
}

fn substitution_transition_position(trans: &mut Transition, pos: Point) {
    basic_transition_position(trans, pos);
    if let Some(subst) = trans.substitution.as_mut() {
        subst.info.position = Some(at(pos, SUBPAGE_INFO_OFFSET));
    }
}

/// The arc itself always sits at the origin; only its label moves.
pub fn arc_layout(arc: &mut Arc) {
    arc.graphics = Some(ARC_GRAPHICS);
    arc.arrow = Some(ARC_ARROW);
    arc.position = Some(Point::default());
}
