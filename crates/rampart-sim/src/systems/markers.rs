//! Visual effect markers: creation helpers and per-tick ageing.

use glam::Vec2;

use rampart_core::constants::*;
use rampart_core::state::{EffectMarker, MarkerShape};

pub fn text(position: Vec2, text: &str) -> EffectMarker {
    EffectMarker {
        shape: MarkerShape::Text { text: text.into() },
        position,
        remaining_secs: TEXT_MARKER_SECS,
    }
}

pub fn circle(position: Vec2, radius: f32) -> EffectMarker {
    EffectMarker {
        shape: MarkerShape::Circle { radius },
        position,
        remaining_secs: CIRCLE_MARKER_SECS,
    }
}

pub fn line(from: Vec2, to: Vec2) -> EffectMarker {
    EffectMarker {
        shape: MarkerShape::Line { to },
        position: from,
        remaining_secs: LINE_MARKER_SECS,
    }
}

/// Age all markers by `dt` and drop expired ones.
pub fn run(markers: &mut Vec<EffectMarker>, dt: f32) {
    for marker in markers.iter_mut() {
        marker.remaining_secs -= dt;
    }
    markers.retain(|m| m.remaining_secs > 0.0);
}
