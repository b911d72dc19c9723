use iced_core::{Point, Rectangle, Size};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use source::{Feature, Geometry, Ring};

const LON_RANGE: (f64, f64) = (-125.0, -66.0);
// north first: canvas y grows downward
const LAT_RANGE: (f64, f64) = (49.0, 25.0);

const MARGIN: f64 = 0.05;

/// Fixed linear map from the continental US bounding box onto a canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projector {
    size: Size,
}

impl Projector {
    pub fn new(size: Size) -> Self {
        Self { size }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Out-of-range coordinates extrapolate.
    pub fn project(&self, lat: f64, lon: f64) -> Point {
        let w = f64::from(self.size.width);
        let h = f64::from(self.size.height);

        let x = remap(lon, LON_RANGE, (w * MARGIN, w * (1.0 - MARGIN)));
        let y = remap(lat, LAT_RANGE, (h * MARGIN, h * (1.0 - MARGIN)));

        Point::new(x as f32, y as f32)
    }
}

fn remap(v: f64, (from_a, from_b): (f64, f64), (to_a, to_b): (f64, f64)) -> f64 {
    to_a + (v - from_a) * (to_b - to_a) / (from_b - from_a)
}

/// A closed ring in canvas space. The closing edge is implicit.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
}

impl Polygon {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    fn from_ring(ring: &Ring, projector: &Projector) -> Self {
        Self::new(
            ring.iter()
                .map(|[lon, lat]| projector.project(*lat, *lon))
                .collect(),
        )
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Even-odd ray casting.
    ///
    /// Boundary points follow a half-open rule: an edge counts when the
    /// point's y is in `[min_y, max_y)` of the edge and the point is strictly
    /// left of it. On an axis-aligned rectangle this makes the min-x/min-y
    /// corner inside and the other three corners outside.
    pub fn contains(&self, p: Point) -> bool {
        let pts = &self.points;
        if pts.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = pts.len() - 1;
        for i in 0..pts.len() {
            let (pi, pj) = (pts[i], pts[j]);

            if (pi.y > p.y) != (pj.y > p.y) {
                let x_cross = (pj.x - pi.x) * (p.y - pi.y) / (pj.y - pi.y) + pi.x;
                if p.x < x_cross {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    pub fn bounds(&self) -> Rectangle {
        let mut min = Point::new(f32::INFINITY, f32::INFINITY);
        let mut max = Point::new(f32::NEG_INFINITY, f32::NEG_INFINITY);

        for p in &self.points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        if self.points.is_empty() {
            return Rectangle::new(Point::ORIGIN, Size::ZERO);
        }

        Rectangle {
            x: min.x,
            y: min.y,
            width: max.x - min.x,
            height: max.y - min.y,
        }
    }

    /// Vertices scaled by `factor` around the bounding-box center.
    pub fn scaled(&self, factor: f32) -> impl Iterator<Item = Point> + '_ {
        let center = self.bounds().center();
        self.points.iter().map(move |p| {
            Point::new(
                center.x + (p.x - center.x) * factor,
                center.y + (p.y - center.y) * factor,
            )
        })
    }
}

/// All outer rings of one state.
#[derive(Debug, Clone, PartialEq)]
pub struct StateShape {
    pub name: String,
    pub polygons: SmallVec<[Polygon; 1]>,
}

impl StateShape {
    pub fn contains(&self, p: Point) -> bool {
        self.polygons.iter().any(|poly| poly.contains(p))
    }
}

/// Projected state outlines, in source order. Built once at startup.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: Vec<StateShape>,
    index: FxHashMap<String, usize>,
}

impl ShapeStore {
    /// Takes the first ring of each Polygon, and the first ring of each part
    /// of a MultiPolygon. Holes are not kept.
    pub fn build(features: &[Feature], projector: &Projector) -> Self {
        let mut store = ShapeStore::default();

        for feature in features {
            let Some(name) = feature.name.as_deref() else {
                log::warn!("Skipping boundary feature without a name");
                continue;
            };

            let outer_rings: Vec<&Ring> = match &feature.geometry {
                Some(Geometry::Polygon(rings)) => rings.first().into_iter().collect(),
                Some(Geometry::MultiPolygon(polygons)) => {
                    polygons.iter().filter_map(|rings| rings.first()).collect()
                }
                Some(Geometry::Unsupported(kind)) => {
                    log::warn!("Skipping {name}: unsupported geometry type {kind}");
                    continue;
                }
                None => {
                    log::warn!("Skipping {name}: no geometry");
                    continue;
                }
            };

            let polygons: SmallVec<[Polygon; 1]> = outer_rings
                .into_iter()
                .filter(|ring| {
                    let ok = ring.len() >= 3;
                    if !ok {
                        log::warn!("Dropping degenerate ring of {name} ({} points)", ring.len());
                    }
                    ok
                })
                .map(|ring| Polygon::from_ring(ring, projector))
                .collect();

            if polygons.is_empty() {
                log::warn!("Skipping {name}: no usable rings");
                continue;
            }

            store.insert(name, polygons);
        }

        log::info!("Built {} state shapes", store.len());
        store
    }

    // a name seen twice gets the later rings appended
    fn insert(&mut self, name: &str, polygons: SmallVec<[Polygon; 1]>) {
        if let Some(&idx) = self.index.get(name) {
            self.shapes[idx].polygons.extend(polygons);
        } else {
            self.index.insert(name.to_string(), self.shapes.len());
            self.shapes.push(StateShape {
                name: name.to_string(),
                polygons,
            });
        }
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&StateShape> {
        self.index.get(name).map(|&idx| &self.shapes[idx])
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateShape> {
        self.shapes.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().map(|shape| shape.name.as_str())
    }

    /// First state, in source order, with a polygon containing `p`.
    pub fn state_at(&self, p: Point) -> Option<&str> {
        self.shapes
            .iter()
            .find(|shape| shape.contains(p))
            .map(|shape| shape.name.as_str())
    }
}
