//! Sequential color scales used by the bar charts, heatmap and map.

/// RGB triple, converted to a toolkit color by the plotter.
pub type Rgb = [u8; 3];

const BLUES: [Rgb; 9] = [
    [247, 251, 255],
    [222, 235, 247],
    [198, 219, 239],
    [158, 202, 225],
    [107, 174, 214],
    [66, 146, 198],
    [33, 113, 181],
    [8, 81, 156],
    [8, 48, 107],
];

const YL_GN_BU: [Rgb; 9] = [
    [255, 255, 217],
    [237, 248, 177],
    [199, 233, 180],
    [127, 205, 187],
    [65, 182, 196],
    [29, 145, 192],
    [34, 94, 168],
    [37, 52, 148],
    [8, 29, 88],
];

const VIRIDIS: [Rgb; 10] = [
    [68, 1, 84],
    [72, 40, 120],
    [62, 74, 137],
    [49, 104, 142],
    [38, 130, 142],
    [31, 158, 137],
    [53, 183, 121],
    [109, 205, 89],
    [180, 222, 44],
    [253, 231, 37],
];

/// Sequential color scale, low to high.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    Blues,
    YlGnBu,
    Viridis,
}

impl ColorScale {
    fn stops(&self) -> &'static [Rgb] {
        match self {
            ColorScale::Blues => &BLUES,
            ColorScale::YlGnBu => &YL_GN_BU,
            ColorScale::Viridis => &VIRIDIS,
        }
    }

    /// Color at position `t` in `[0, 1]`; out-of-range and NaN inputs are clamped.
    pub fn sample(&self, t: f64) -> Rgb {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let pos = t * (stops.len() - 1) as f64;
        let lower = pos.floor() as usize;
        let upper = (lower + 1).min(stops.len() - 1);
        let frac = pos - lower as f64;

        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
        let (a, b) = (stops[lower], stops[upper]);
        [lerp(a[0], b[0]), lerp(a[1], b[1]), lerp(a[2], b[2])]
    }

    /// Color for `value` on a scale spanning `min..=max`.
    pub fn sample_value(&self, value: f64, min: f64, max: f64) -> Rgb {
        let span = max - min;
        if span <= 0.0 {
            return self.sample(1.0);
        }
        self.sample((value - min) / span)
    }

    /// `n` evenly spaced colors along the scale, one per category.
    pub fn discrete(&self, n: usize) -> Vec<Rgb> {
        match n {
            0 => Vec::new(),
            1 => vec![self.sample(0.5)],
            _ => (0..n)
                .map(|i| self.sample(i as f64 / (n - 1) as f64))
                .collect(),
        }
    }
}
