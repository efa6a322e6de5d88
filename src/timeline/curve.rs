//! Monotone cubic interpolation for the series line.
//!
//! Tangents follow Fritsch-Carlson, so each segment stays between its two
//! endpoints' values: no bumps above a peak or dips below a trough.

use egui::Pos2;

/// Points emitted per segment
const SEGMENT_SAMPLES: usize = 8;

/// Sample a monotone cubic through `points` (x strictly increasing).
///
/// The result starts with the first point and then holds
/// `SEGMENT_SAMPLES` points per segment, each segment ending exactly on the
/// next input point. Fewer than three points are returned as-is.
pub fn monotone_curve(points: &[Pos2]) -> Vec<Pos2> {
    if points.len() < 3 {
        return points.to_vec();
    }
    let tangents = tangents(points);

    let mut out = Vec::with_capacity(1 + (points.len() - 1) * SEGMENT_SAMPLES);
    out.push(points[0]);
    for (k, pair) in points.windows(2).enumerate() {
        let (p0, p1) = (pair[0], pair[1]);
        let third = (p1.x - p0.x) / 3.0;
        let c0 = Pos2::new(p0.x + third, p0.y + tangents[k] * third);
        let c1 = Pos2::new(p1.x - third, p1.y - tangents[k + 1] * third);
        for i in 1..SEGMENT_SAMPLES {
            out.push(bezier(p0, c0, c1, p1, i as f32 / SEGMENT_SAMPLES as f32));
        }
        out.push(p1);
    }
    out
}

fn tangents(points: &[Pos2]) -> Vec<f32> {
    let n = points.len();
    let slopes: Vec<f32> = points
        .windows(2)
        .map(|w| {
            let dx = w[1].x - w[0].x;
            if dx == 0.0 {
                0.0
            } else {
                (w[1].y - w[0].y) / dx
            }
        })
        .collect();

    let mut m = vec![0.0; n];
    m[0] = slopes[0];
    m[n - 1] = slopes[n - 2];
    for k in 1..n - 1 {
        let (a, b) = (slopes[k - 1], slopes[k]);
        // Zero at local extrema
        m[k] = if a * b <= 0.0 { 0.0 } else { (a + b) / 2.0 };
    }

    for k in 0..n - 1 {
        let d = slopes[k];
        if d == 0.0 {
            m[k] = 0.0;
            m[k + 1] = 0.0;
            continue;
        }
        let a = m[k] / d;
        let b = m[k + 1] / d;
        let s = a * a + b * b;
        if s > 9.0 {
            let t = 3.0 / s.sqrt();
            m[k] = t * a * d;
            m[k + 1] = t * b * d;
        }
    }
    m
}

fn bezier(p0: Pos2, c0: Pos2, c1: Pos2, p1: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    let w0 = u * u * u;
    let w1 = 3.0 * u * u * t;
    let w2 = 3.0 * u * t * t;
    let w3 = t * t * t;
    Pos2::new(
        w0 * p0.x + w1 * c0.x + w2 * c1.x + w3 * p1.x,
        w0 * p0.y + w1 * c0.y + w2 * c1.y + w3 * p1.y,
    )
}
