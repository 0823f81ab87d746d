use doodle_overlay::draw::model::{Hue, Lifecycle, Point, Stroke};
use doodle_overlay::draw::store::{split_outside, AnnotationStore};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_stroke(rng: &mut StdRng, len: usize) -> Stroke {
    Stroke {
        points: (0..len)
            .map(|_| Point::new(rng.gen_range(0.0..200.0), rng.gen_range(0.0..200.0)))
            .collect(),
        hue: Hue::new(rng.gen_range(0.0..360.0)),
        created_at: 42,
        lifecycle: Lifecycle::Transient,
    }
}

#[test]
fn fragments_concatenate_to_the_surviving_subsequence() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let len = rng.gen_range(1..40);
        let stroke = random_stroke(&mut rng, len);
        let center = Point::new(rng.gen_range(0.0..200.0), rng.gen_range(0.0..200.0));
        let radius = rng.gen_range(1.0..80.0);

        let fragments = split_outside(&stroke, center, radius);
        let joined: Vec<Point> = fragments.iter().flat_map(|f| f.points.clone()).collect();
        let expected: Vec<Point> = stroke
            .points
            .iter()
            .copied()
            .filter(|p| !p.within(center, radius))
            .collect();
        assert_eq!(joined, expected);

        for fragment in &fragments {
            assert!(!fragment.points.is_empty());
            assert!(fragment.points.iter().all(|p| !p.within(center, radius)));
            assert_eq!(fragment.hue, stroke.hue);
            assert_eq!(fragment.created_at, stroke.created_at);
        }
    }
}

#[test]
fn fragments_are_maximal_runs() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..200 {
        let len = rng.gen_range(1..40);
        let stroke = random_stroke(&mut rng, len);
        let center = Point::new(100.0, 100.0);
        let radius = rng.gen_range(10.0..90.0);

        let runs = stroke
            .points
            .split(|p| p.within(center, radius))
            .filter(|run| !run.is_empty())
            .count();
        assert_eq!(split_outside(&stroke, center, radius).len(), runs);
    }
}

#[test]
fn erasing_never_touches_strokes_outside_the_circle() {
    let mut store = AnnotationStore::with_seed(3);
    store.add_stroke(Point::new(500.0, 500.0), Hue::new(10.0));
    store.extend_active_stroke(Point::new(510.0, 500.0));
    store.commit_active_stroke(5, Lifecycle::Persistent);
    let untouched = store.strokes()[0].clone();

    store.add_stroke(Point::new(0.0, 0.0), Hue::new(20.0));
    store.extend_active_stroke(Point::new(1.0, 0.0));
    store.commit_active_stroke(6, Lifecycle::Transient);

    store.erase_at(Point::new(0.0, 0.0), 3.0);

    assert_eq!(store.strokes(), std::slice::from_ref(&untouched));
}
