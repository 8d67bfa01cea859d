use crate::types::{Envelope2D, Interval, Prism, ZRange};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::debug;

/// Margin added on both sides of each lateral axis unless configured otherwise.
pub const DEFAULT_LATERAL_MARGIN: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Above,
    Below,
    Front,
    Behind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The prism starts at the reference's upper bound and grows upward.
    Positive,
    /// The prism ends at the reference's lower bound and grows downward.
    Negative,
}

/// Output field names for one relation kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldNames {
    pub boundary: &'static str,
    pub extent: &'static str,
    pub threshold: &'static str,
    pub flag: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSpec {
    pub primary: Axis,
    pub direction: Direction,
    pub widen_z: bool,
    pub phrase: &'static str,
    pub fields: FieldNames,
}

const ABOVE: KindSpec = KindSpec {
    primary: Axis::Z,
    direction: Direction::Positive,
    widen_z: false,
    phrase: "above",
    fields: FieldNames {
        boundary: "top_z",
        extent: "height",
        threshold: "above_threshold",
        flag: "above_flag",
    },
};

const BELOW: KindSpec = KindSpec {
    primary: Axis::Z,
    direction: Direction::Negative,
    widen_z: false,
    phrase: "below",
    fields: FieldNames {
        boundary: "bottom_z",
        extent: "height",
        threshold: "below_threshold",
        flag: "below_flag",
    },
};

// Front faces the camera: the prism sits between the camera and the reference.
const FRONT: KindSpec = KindSpec {
    primary: Axis::Y,
    direction: Direction::Negative,
    widen_z: true,
    phrase: "in front of",
    fields: FieldNames {
        boundary: "front_y",
        extent: "depth",
        threshold: "front_threshold",
        flag: "front_flag",
    },
};

const BEHIND: KindSpec = KindSpec {
    primary: Axis::Y,
    direction: Direction::Positive,
    widen_z: true,
    phrase: "behind",
    fields: FieldNames {
        boundary: "back_y",
        extent: "depth",
        threshold: "behind_threshold",
        flag: "behind_flag",
    },
};

impl RelationKind {
    pub const ALL: [RelationKind; 4] = [
        RelationKind::Above,
        RelationKind::Below,
        RelationKind::Front,
        RelationKind::Behind,
    ];

    pub fn spec(&self) -> &'static KindSpec {
        match self {
            RelationKind::Above => &ABOVE,
            RelationKind::Below => &BELOW,
            RelationKind::Front => &FRONT,
            RelationKind::Behind => &BEHIND,
        }
    }

    pub fn opposite(&self) -> RelationKind {
        match self {
            RelationKind::Above => RelationKind::Below,
            RelationKind::Below => RelationKind::Above,
            RelationKind::Front => RelationKind::Behind,
            RelationKind::Behind => RelationKind::Front,
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().phrase)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown relation kind `{0}` (expected above, below, front or behind)")]
pub struct ParseKindError(String);

impl FromStr for RelationKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "above" => Ok(RelationKind::Above),
            "below" => Ok(RelationKind::Below),
            "front" | "in_front" | "in-front-of" => Ok(RelationKind::Front),
            "behind" => Ok(RelationKind::Behind),
            _ => Err(ParseKindError(s.to_string())),
        }
    }
}

/// Numbers that define the primary axis of a prism.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrimaryBounds {
    /// Reference face the prism starts from.
    pub boundary: f64,
    /// Reference size along the primary axis.
    pub extent: f64,
    /// Outer edge of the prism.
    pub threshold: f64,
}

/// Build the half-space prism for `kind` around a reference with the given
/// camera-frame envelope and world Z range.
///
/// The primary axis protrudes by `scale * extent`; the lateral axes are the
/// reference bounds widened by `margin` on each side.
pub fn build_prism(
    kind: RelationKind,
    scale: f64,
    envelope: &Envelope2D,
    z: &ZRange,
    margin: f64,
) -> (Prism, PrimaryBounds) {
    let spec = kind.spec();
    let x = Interval::new(envelope.min_x, envelope.max_x);
    let y = Interval::new(envelope.min_y, envelope.max_y);
    let zi = Interval::new(z.min_z, z.max_z);

    let reference = match spec.primary {
        Axis::Z => zi,
        Axis::Y => y,
        Axis::X => x,
    };
    let extent = reference.hi - reference.lo;
    let (primary, bounds) = match spec.direction {
        Direction::Positive => {
            let threshold = reference.hi + scale * extent;
            (
                Interval::new(reference.hi, threshold),
                PrimaryBounds {
                    boundary: reference.hi,
                    extent,
                    threshold,
                },
            )
        }
        Direction::Negative => {
            let threshold = reference.lo - scale * extent;
            (
                Interval::new(threshold, reference.lo),
                PrimaryBounds {
                    boundary: reference.lo,
                    extent,
                    threshold,
                },
            )
        }
    };

    let lateral = |axis: Axis, interval: Interval| {
        if axis == spec.primary {
            primary
        } else if axis == Axis::Z && !spec.widen_z {
            interval
        } else {
            interval.widen(margin)
        }
    };
    let prism = Prism {
        x: lateral(Axis::X, x),
        y: lateral(Axis::Y, y),
        z: lateral(Axis::Z, zi),
    };
    debug!(?kind, scale, ?prism, "built half-space prism");

    (prism, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const ENV: Envelope2D = Envelope2D {
        min_x: -1.0,
        max_x: 1.0,
        min_y: 10.0,
        max_y: 12.0,
    };
    const Z: ZRange = ZRange {
        min_z: 0.0,
        max_z: 2.0,
    };

    #[test]
    fn above_extends_upward_and_widens_xy() {
        let (prism, b) = build_prism(RelationKind::Above, 1.0, &ENV, &Z, 0.5);
        assert_eq!(prism.z, Interval::new(2.0, 4.0));
        assert_eq!(prism.x, Interval::new(-1.5, 1.5));
        assert_eq!(prism.y, Interval::new(9.5, 12.5));
        assert_relative_eq!(b.boundary, 2.0);
        assert_relative_eq!(b.extent, 2.0);
        assert_relative_eq!(b.threshold, 4.0);
    }

    #[test]
    fn below_extends_downward() {
        let (prism, b) = build_prism(RelationKind::Below, 0.5, &ENV, &Z, 0.5);
        assert_eq!(prism.z, Interval::new(-1.0, 0.0));
        assert_relative_eq!(b.threshold, -1.0);
    }

    #[test]
    fn front_and_behind_widen_x_and_z() {
        let (front, fb) = build_prism(RelationKind::Front, 2.0, &ENV, &Z, 0.5);
        assert_eq!(front.y, Interval::new(6.0, 10.0));
        assert_eq!(front.x, Interval::new(-1.5, 1.5));
        assert_eq!(front.z, Interval::new(-0.5, 2.5));
        assert_relative_eq!(fb.boundary, 10.0);

        let (behind, bb) = build_prism(RelationKind::Behind, 2.0, &ENV, &Z, 0.5);
        assert_eq!(behind.y, Interval::new(12.0, 16.0));
        assert_eq!(behind.z, Interval::new(-0.5, 2.5));
        assert_relative_eq!(bb.extent, 2.0);
    }

    #[test]
    fn flat_reference_gives_zero_width_primary_range() {
        let flat = ZRange {
            min_z: 3.0,
            max_z: 3.0,
        };
        let (prism, b) = build_prism(RelationKind::Above, 5.0, &ENV, &flat, 0.5);
        assert_eq!(prism.z, Interval::new(3.0, 3.0));
        assert!(prism.z.contains(3.0));
        assert_relative_eq!(b.extent, 0.0);
    }

    #[test]
    fn parses_kind_names() {
        assert_eq!("ABOVE".parse::<RelationKind>(), Ok(RelationKind::Above));
        assert_eq!("in_front".parse::<RelationKind>(), Ok(RelationKind::Front));
        assert!("left".parse::<RelationKind>().is_err());
    }
}
