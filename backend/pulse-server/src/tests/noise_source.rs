use crate::NoiseSource;

use pulse_core::ValueSource;

#[test]
fn given_noise_source_when_sampled_then_values_in_range() {
    let mut source = NoiseSource::new();

    for _ in 0..1000 {
        let value = source.next_payload().as_number().unwrap();
        assert!((0.0..100.0).contains(&value), "out of range: {value}");
    }
}

#[test]
fn given_same_seed_when_sampled_then_sequences_match() {
    let mut a = NoiseSource::seeded(7);
    let mut b = NoiseSource::seeded(7);

    let first: Vec<_> = (0..10).map(|_| a.next_payload()).collect();
    let second: Vec<_> = (0..10).map(|_| b.next_payload()).collect();

    assert_eq!(first, second);
}
