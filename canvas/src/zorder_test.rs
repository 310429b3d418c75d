use super::*;

#[test]
fn default_starts_at_zero() {
    let mut z = ZOrderAllocator::default();
    assert_eq!(z.current_max(), 0);
    assert_eq!(z.allocate_next(), 1);
    assert_eq!(z.allocate_next(), 2);
}

#[test]
fn floor_offsets_every_value() {
    let mut z = ZOrderAllocator::new(1000);
    assert_eq!(z.current_max(), 1000);
    assert_eq!(z.allocate_next(), 1001);
    assert_eq!(z.allocated(), 1);
}

#[test]
fn allocations_strictly_increase() {
    let mut z = ZOrderAllocator::new(1000);
    let mut prev = z.current_max();
    for _ in 0..100 {
        let next = z.allocate_next();
        assert!(next > prev);
        assert_eq!(next, z.current_max());
        prev = next;
    }
    assert_eq!(z.allocated(), 100);
}
