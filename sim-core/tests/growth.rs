use dla_core::{config::Config, engine::Engine, error::Result};
use glam::IVec3;

/// Upper bound on `step()` calls for a full growth run; a finished run
/// needs far fewer.
const MAX_STEPS: usize = 200_000;

fn seeded_engine(size: u32, seed: u64) -> Result<Engine> {
    let mut engine = Engine::with_config(Config::default().with_size(size).with_seed(seed))?;
    engine.mark_occupied(IVec3::ZERO)?;
    Ok(engine)
}

/// Grows an aggregate until it touches the boundary, checking the growth
/// invariants after every call.
#[test]
fn growth_is_monotonic_and_connected_until_finished() -> Result<()> {
    let mut engine = seeded_engine(11, 2024)?;
    let size = engine.size();

    let mut steps = 0;
    while !engine.is_finished() {
        assert!(steps < MAX_STEPS, "growth did not finish");
        steps += 1;

        let before = engine.lattice().clone();
        let event = engine.step();

        // Nothing ever gets cleared.
        assert!(engine.occupied_count() >= before.occupied_count());
        assert!(before.iter_occupied().all(|p| engine.lattice().is_occupied(p)));
        assert!(engine.occupied_count() <= before.occupied_count() + 1);

        if let Some(active) = engine.active() {
            assert!(active.x < size && active.y < size && active.z < size);
        }

        if let Some(p) = event {
            assert!(p.x < size && p.y < size && p.z < size);
            assert!(
                before.has_occupied_neighbor(p),
                "{p} froze without touching the aggregate"
            );
            assert!(engine.lattice().is_occupied(p));
            assert!(engine.active().is_none());
            assert_eq!(engine.is_finished(), engine.lattice().touches_boundary(p));
        } else {
            assert!(engine.active().is_some());
        }
    }

    let last = *engine.frozen().last().expect("at least one freeze");
    assert!(engine.lattice().touches_boundary(last));
    assert!(engine.occupied_count() > 1);

    // The terminal state is sticky.
    let count = engine.occupied_count();
    for _ in 0..100 {
        assert_eq!(engine.step(), None);
    }
    assert_eq!(engine.occupied_count(), count);
    Ok(())
}

#[test]
fn same_seed_grows_same_aggregate() -> Result<()> {
    let mut a = seeded_engine(9, 77)?;
    let mut b = seeded_engine(9, 77)?;

    for _ in 0..400 {
        assert_eq!(a.step(), b.step());
    }
    assert_eq!(a.frozen(), b.frozen());
    Ok(())
}

#[test]
fn first_freeze_brings_count_to_two() -> Result<()> {
    let mut engine = seeded_engine(5, 9)?;
    assert_eq!(engine.margin(), 2);

    let frozen = loop {
        if let Some(p) = engine.step() {
            break p;
        }
    };

    let centered = engine.to_centered(frozen);
    assert_eq!(centered.abs().element_sum(), 1, "{centered} not next to origin");
    assert_eq!(engine.occupied_count(), 2);
    Ok(())
}

#[test]
fn resize_then_reseed_starts_over() -> Result<()> {
    let mut engine = seeded_engine(3, 1)?;
    while !engine.is_finished() {
        engine.step();
    }

    engine.resize(7)?;
    assert_eq!(engine.margin(), 3);
    assert_eq!(engine.occupied_count(), 0);
    assert!(!engine.is_finished());

    engine.mark_occupied(IVec3::ZERO)?;
    assert_eq!(engine.step(), None);
    assert!(engine.step().is_some());
    assert_eq!(engine.occupied_count(), 2);
    Ok(())
}
