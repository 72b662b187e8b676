//! Maps snapshot positions (meters) to viewport pixels.
//!
//! Nothing here touches the simulation: a [`Viewport`] only reads a
//! [`Snapshot`] and owns its own presentation settings.

use crate::game::entity::BodyKind;
use crate::game::repr::Distance;
use crate::snapshot::Snapshot;

/// Distance shown across the viewport height at zoom 1.
pub const VIEW_SPAN: Distance = 1e13;

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub name: String,
    pub kind: BodyKind,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub zoom: f64,
    /// Radius exaggeration for the star, bodies are invisible at true scale.
    pub star_scale: f64,
    /// Radius exaggeration for planets and moons.
    pub planet_scale: f64,
    /// Planet kept at the center of the view, the origin when `None`.
    pub follow: Option<String>,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport::new(1280., 680.)
    }
}

impl Viewport {
    pub const MIN_ZOOM: f64 = 0.01;
    pub const MAX_ZOOM: f64 = 20.;
    pub const DEFAULT_STAR_SCALE: f64 = 100.;
    pub const DEFAULT_PLANET_SCALE: f64 = 5000.;

    pub fn new(width: f64, height: f64) -> Viewport {
        Viewport {
            width,
            height,
            zoom: 1.,
            star_scale: Self::DEFAULT_STAR_SCALE,
            planet_scale: Self::DEFAULT_PLANET_SCALE,
            follow: None,
        }
    }

    pub fn meters_per_pixel(&self) -> f64 {
        VIEW_SPAN / self.height / self.zoom
    }

    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.zoom = zoom.clamp(Self::MIN_ZOOM, Self::MAX_ZOOM);
        self.zoom
    }

    pub fn zoom_by(&mut self, factor: f64) -> f64 {
        self.set_zoom(self.zoom * factor)
    }

    /// Position, in meters, that lands on the middle of the viewport: the
    /// followed planet, or the origin.
    pub fn center(&self, snapshot: &Snapshot) -> [f64; 2] {
        self.follow
            .as_deref()
            .and_then(|name| snapshot.borrow_planet(name))
            .map(|body| body.position)
            .unwrap_or([0., 0.])
    }

    /// Screen coordinates, x to the right and y downward, in pixels.
    pub fn to_screen(&self, position: [f64; 2], center: [f64; 2]) -> (f64, f64) {
        let meters_per_pixel = self.meters_per_pixel();
        (
            self.width / 2. + (position[0] - center[0]) / meters_per_pixel,
            self.height / 2. + (position[1] - center[1]) / meters_per_pixel,
        )
    }

    pub fn project(&self, snapshot: &Snapshot) -> Vec<Sprite> {
        let center = self.center(snapshot);
        let meters_per_pixel = self.meters_per_pixel();

        snapshot
            .bodies
            .iter()
            .map(|body| {
                let (x, y) = self.to_screen(body.position, center);
                let scale = match body.kind {
                    BodyKind::Star => self.star_scale,
                    BodyKind::Planet | BodyKind::Moon => self.planet_scale,
                };
                Sprite {
                    name: body.name.clone(),
                    kind: body.kind,
                    x,
                    y,
                    radius: body.radius * scale / meters_per_pixel,
                }
            })
            .collect()
    }

    /// Cycles the followed body: the star, then every planet in order.
    pub fn follow_next(&mut self, snapshot: &Snapshot) -> Option<&str> {
        let planets: Vec<&str> = snapshot
            .bodies
            .iter()
            .filter(|b| b.kind == BodyKind::Planet)
            .map(|b| b.name.as_str())
            .collect();

        let next = match self.follow.as_deref() {
            None => planets.first(),
            Some(current) => planets
                .iter()
                .position(|name| *name == current)
                .and_then(|index| planets.get(index + 1)),
        };

        self.follow = next.map(|name| name.to_string());
        self.follow.as_deref()
    }
}
