#[cfg(test)]
use test_helpers_async::*;

#[before_all]
#[cfg(test)]
mod orrery_tests_render {
    use approx::assert_relative_eq;
    use common::trace;
    use log::info;
    use orrery::{
        game::{
            entity::{star::SUN_RADIUS, BodyKind, Planet, Star},
            repr::{Position, Velocity},
            system::SolarSystem,
        },
        render::{Viewport, VIEW_SPAN},
        snapshot::Snapshot,
    };

    pub fn before_all() {
        trace::init(Some(".*orrery(.*)".to_string()));
        info!("Render tests");
    }

    fn snapshot() -> Snapshot {
        let mut system = SolarSystem::new(Star::sun());
        let mut earth = Planet::new(
            "Earth".to_string(),
            Position::new(1e12, 0.),
            Velocity::zeros(),
            6.371e6,
            5.972e24,
        );
        earth.spawn_moon("Moon".to_string(), 4e8, 0., 1.7374e6);
        system.add_planet(earth).unwrap();
        system
            .add_planet(Planet::new(
                "Mars".to_string(),
                Position::new(0., -2e12),
                Velocity::zeros(),
                3.3895e6,
                6.417e23,
            ))
            .unwrap();
        system.snapshot(1.)
    }

    #[test]
    fn origin_is_the_viewport_center() {
        let viewport = Viewport::default();
        let sprites = viewport.project(&snapshot());

        let sun = &sprites[0];
        assert_eq!(BodyKind::Star, sun.kind);
        assert_eq!((640., 340.), (sun.x, sun.y));
    }

    #[test]
    fn distances_scale_with_zoom() {
        let snapshot = snapshot();
        let mut viewport = Viewport::default();
        let pixels = 1e12 / (VIEW_SPAN / 680.);

        let earth = viewport
            .project(&snapshot)
            .into_iter()
            .find(|s| s.name == "Earth")
            .unwrap();
        assert_relative_eq!(640. + pixels, earth.x, max_relative = 1e-12);
        assert_relative_eq!(340., earth.y);

        viewport.set_zoom(2.);
        let earth = viewport
            .project(&snapshot)
            .into_iter()
            .find(|s| s.name == "Earth")
            .unwrap();
        assert_relative_eq!(640. + 2. * pixels, earth.x, max_relative = 1e-12);

        let mars = viewport
            .project(&snapshot)
            .into_iter()
            .find(|s| s.name == "Mars")
            .unwrap();
        assert_relative_eq!(340. - 4. * pixels, mars.y, max_relative = 1e-12);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut viewport = Viewport::default();

        assert_eq!(Viewport::MAX_ZOOM, viewport.set_zoom(1e6));
        assert_eq!(Viewport::MIN_ZOOM, viewport.set_zoom(0.));
        viewport.set_zoom(1.);
        assert_relative_eq!(1.25, viewport.zoom_by(1.25));
    }

    #[test]
    fn followed_body_is_centered() {
        let snapshot = snapshot();
        let mut viewport = Viewport::default();
        viewport.follow = Some("Earth".to_string());

        assert_eq!([1e12, 0.], viewport.center(&snapshot));

        let sprites = viewport.project(&snapshot);
        let earth = sprites.iter().find(|s| s.name == "Earth").unwrap();
        let sun = sprites.iter().find(|s| s.name == "Sun").unwrap();
        assert_eq!((640., 340.), (earth.x, earth.y));
        assert!(sun.x < 640.);

        viewport.follow = Some("Pluto".to_string());
        assert_eq!([0., 0.], viewport.center(&snapshot));
    }

    #[test]
    fn follow_ignores_moons_named_like_a_planet() {
        let mut system = SolarSystem::new(Star::sun());
        let mut earth = Planet::new(
            "Earth".to_string(),
            Position::new(1.5e11, 0.),
            Velocity::zeros(),
            6.371e6,
            5.972e24,
        );
        earth.spawn_moon("Mars".to_string(), 4e8, 0., 1.7374e6);
        system.add_planet(earth).unwrap();
        system
            .add_planet(Planet::new(
                "Mars".to_string(),
                Position::new(2.4e11, 0.),
                Velocity::zeros(),
                3.3895e6,
                6.417e23,
            ))
            .unwrap();
        let snapshot = system.snapshot(1.);
        let mut viewport = Viewport::default();

        viewport.follow_next(&snapshot);
        assert_eq!(Some("Mars"), viewport.follow_next(&snapshot));
        assert_eq!([2.4e11, 0.], viewport.center(&snapshot));

        let sprites = viewport.project(&snapshot);
        let planet = sprites
            .iter()
            .find(|s| s.name == "Mars" && s.kind == BodyKind::Planet)
            .unwrap();
        assert_eq!((640., 340.), (planet.x, planet.y));
    }

    #[test]
    fn follow_cycles_through_planets() {
        let snapshot = snapshot();
        let mut viewport = Viewport::default();

        assert_eq!(Some("Earth"), viewport.follow_next(&snapshot));
        assert_eq!(Some("Mars"), viewport.follow_next(&snapshot));
        assert_eq!(None, viewport.follow_next(&snapshot));
        assert_eq!(Some("Earth"), viewport.follow_next(&snapshot));
    }

    #[test]
    fn radii_are_exaggerated_per_kind() {
        let snapshot = snapshot();
        let mut viewport = Viewport::default();
        let meters_per_pixel = viewport.meters_per_pixel();

        let sprites = viewport.project(&snapshot);
        assert_relative_eq!(
            SUN_RADIUS * Viewport::DEFAULT_STAR_SCALE / meters_per_pixel,
            sprites[0].radius,
            max_relative = 1e-12
        );
        let moon = sprites.iter().find(|s| s.kind == BodyKind::Moon).unwrap();
        assert_relative_eq!(
            1.7374e6 * Viewport::DEFAULT_PLANET_SCALE / meters_per_pixel,
            moon.radius,
            max_relative = 1e-12
        );

        viewport.planet_scale *= 2.;
        let moon = viewport
            .project(&snapshot)
            .into_iter()
            .find(|s| s.kind == BodyKind::Moon)
            .unwrap();
        assert_relative_eq!(
            2. * 1.7374e6 * Viewport::DEFAULT_PLANET_SCALE / meters_per_pixel,
            moon.radius,
            max_relative = 1e-12
        );
    }

    #[test]
    fn snapshot_lists_star_then_planets_with_their_moons() {
        let snapshot = snapshot();

        let names: Vec<&str> = snapshot.bodies.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(vec!["Sun", "Earth", "Moon", "Mars"], names);
        assert_eq!(Some("Earth"), snapshot.bodies[2].parent.as_deref());
        assert_eq!("Sun", snapshot.borrow_star().unwrap().name);
        assert_eq!([1e12 + 4e8, 0.], snapshot.borrow_body("Moon").unwrap().position);

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"kind\":\"Moon\""));
    }
}
