use serde::{Deserialize, Serialize};

use geom::{Envelope, GeomError, Line, Polygon, Pt2D};

/// How deep a stop marking is, measured along the direction of travel.
pub const STOP_MARKING_HEIGHT: f64 = 18.0;

/// A painted stop line across one travel lane.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StopMarking {
    pub center: Pt2D,
    /// Unit vector of travel
    pub direction: Pt2D,
    /// Across the lane
    pub width: f64,
    /// Along the lane
    pub height: f64,
    /// Runs along the direction of travel through the center
    pub support: Line,
    pub poly: Polygon,
}

impl StopMarking {
    pub fn new(
        center: Pt2D,
        direction: Pt2D,
        width: f64,
        height: f64,
    ) -> Result<StopMarking, GeomError> {
        let angle = direction.angle();
        let support = Line::new(
            center.project_away(height / 2.0, angle),
            center.project_away(-height / 2.0, angle),
        )?;
        let poly = Envelope::new(support, width, 1)?.poly;
        Ok(StopMarking {
            center,
            direction: direction.normalize(),
            width,
            height,
            support,
            poly,
        })
    }

    /// The edge across the lane that approaching traffic reaches first.
    pub fn border(&self) -> Option<Line> {
        self.poly.segments().get(2).cloned()
    }
}
