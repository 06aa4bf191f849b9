//! Places a [`TelemetryRecord`] can end up: a per-field text readout, the
//! projected box, or several of those at once.

use crate::record_output::OutputError;
use crate::telemetry_record::{TelemetryRecord, Value};

/// Width and height of the square drawing surface the box lives on.
pub const CANVAS_SIZE: f64 = 400.0;

/// Consumes records, one per update.
pub trait DisplaySink {
    /// Shows `record`, replacing whatever this sink showed before.
    fn update(&mut self, record: &TelemetryRecord) -> Result<(), OutputError>;
}

impl<T: DisplaySink + ?Sized> DisplaySink for &mut T {
    fn update(&mut self, record: &TelemetryRecord) -> Result<(), OutputError> {
        (**self).update(record)
    }
}

/// Feeds every record to two sinks, left first.
#[derive(Debug)]
pub struct Tee<A, B>(pub A, pub B);

impl<A: DisplaySink, B: DisplaySink> DisplaySink for Tee<A, B> {
    fn update(&mut self, record: &TelemetryRecord) -> Result<(), OutputError> {
        self.0.update(record)?;
        self.1.update(record)
    }
}

/// One labelled value per field ever seen, in the order fields first
/// appeared. Later records update labels in place.
#[derive(Debug, Clone, Default)]
pub struct Readout {
    fields: Vec<(String, Value)>,
}

impl Readout {
    /// An empty readout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or refreshes a label for every field in `record`.
    pub fn apply(&mut self, record: &TelemetryRecord) {
        for (name, value) in record.iter() {
            match self.fields.iter_mut().find(|(k, _)| k == name) {
                Some((_, v)) => *v = value,
                None => self.fields.push((name.to_owned(), value)),
            }
        }
    }

    /// The labels, oldest first.
    pub fn fields(&self) -> impl Iterator<Item = (&str, Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl DisplaySink for Readout {
    fn update(&mut self, record: &TelemetryRecord) -> Result<(), OutputError> {
        self.apply(record);
        Ok(())
    }
}

/// The single box drawn on the canvas. `x`/`y` are in screen coordinates
/// (y grows downwards) and name the corner the box grows from: it spans
/// `size` to the right and `size` upwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    /// Horizontal position
    pub x: f64,
    /// Vertical position, growing downwards
    pub y: f64,
    /// Edge length
    pub size: f64,
}

impl Glyph {
    /// `(left, top, right, bottom)` in screen coordinates. A negative size
    /// flips the box to the other side of its corner.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        let far_x = self.x + self.size;
        let far_y = self.y - self.size;
        (
            self.x.min(far_x),
            self.y.min(far_y),
            self.x.max(far_x),
            self.y.max(far_y),
        )
    }
}

/// A labelled axis arrow drawn behind the box, in screen coordinates.
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLine {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub label: &'static str,
    pub label_at: (f64, f64),
}

/// X across, Y up, and Z as an oblique line out of the centre.
pub const AXES: [AxisLine; 3] = [
    AxisLine {
        from: (50.0, 200.0),
        to: (350.0, 200.0),
        label: "X-axis",
        label_at: (355.0, 200.0),
    },
    AxisLine {
        from: (200.0, 350.0),
        to: (200.0, 50.0),
        label: "Y-axis",
        label_at: (200.0, 45.0),
    },
    AxisLine {
        from: (200.0, 200.0),
        to: (350.0, 50.0),
        label: "Z-axis",
        label_at: (355.0, 45.0),
    },
];

/// Turns `Xval`, `Yval` and `Zval` into a [`Glyph`].
///
/// X moves the box right, Y moves it up, and Z stands in for depth: a larger
/// Z pushes the box away so it shrinks, a negative Z pulls it closer so it
/// grows. Missing coordinates count as 0.
#[derive(Debug, Clone)]
pub struct BoxProjection {
    center_x: f64,
    center_y: f64,
    base_size: f64,
    glyph: Glyph,
}

impl Default for BoxProjection {
    fn default() -> Self {
        Self::new(CANVAS_SIZE / 2.0, CANVAS_SIZE / 2.0, 50.0)
    }
}

impl BoxProjection {
    /// A projection around `(center_x, center_y)` whose box is `base_size`
    /// wide at Z = 0. The box starts out at the centre.
    pub fn new(center_x: f64, center_y: f64, base_size: f64) -> Self {
        Self {
            center_x,
            center_y,
            base_size,
            glyph: Glyph {
                x: center_x,
                y: center_y,
                size: base_size,
            },
        }
    }

    /// Where a box at `(x, y, z)` lands.
    pub fn project(&self, x: f64, y: f64, z: f64) -> Glyph {
        Glyph {
            x: self.center_x + x,
            y: self.center_y - y,
            size: self.base_size - z,
        }
    }

    /// Replaces the glyph with the one for `record`.
    pub fn apply(&mut self, record: &TelemetryRecord) {
        let coord = |name: &str| record.get(name).map_or(0.0, Value::as_f64);
        self.glyph = self.project(coord("Xval"), coord("Yval"), coord("Zval"));
    }

    /// The glyph currently on the canvas.
    pub fn glyph(&self) -> Glyph {
        self.glyph
    }
}

impl DisplaySink for BoxProjection {
    fn update(&mut self, record: &TelemetryRecord) -> Result<(), OutputError> {
        self.apply(record);
        Ok(())
    }
}
