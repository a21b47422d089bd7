mod tests {
    use prop_output_composer::timebase::{
        MAX_TICK_DELTA, clamp_step, elapsed, is_due, step_since,
    };
    use prop_output_composer::{Duration, Instant};

    #[test]
    fn test_elapsed_across_tick_wrap() {
        // 101 ticks to the wrap, 50 past it.
        let last = Instant::from_ticks(u64::MAX - 100);
        let now = Instant::from_ticks(50);
        assert_eq!(elapsed(last, now).as_ticks(), 151);
    }

    #[test]
    fn test_elapsed_zero_when_clock_reads_backwards() {
        let last = Instant::from_ticks(1_000_000);
        let now = Instant::from_ticks(999_999);
        assert_eq!(elapsed(last, now), Duration::from_ticks(0));

        // Backwards reading that also straddles the wrap.
        let last = Instant::from_ticks(50);
        let now = Instant::from_ticks(u64::MAX - 100);
        assert_eq!(elapsed(last, now), Duration::from_ticks(0));
    }

    #[test]
    fn test_step_since_clamps_across_wrap() {
        // A one-second stall spanning the wrap still reads as the clamp.
        let span = Duration::from_secs(1).as_ticks();
        let last = Instant::from_ticks(u64::MAX - span / 2);
        let now = Instant::from_ticks(span - span / 2 - 1);
        assert_eq!(elapsed(last, now), Duration::from_secs(1));
        assert_eq!(step_since(last, now), MAX_TICK_DELTA);

        // A short hop over the wrap is reported exactly.
        let last = Instant::from_ticks(u64::MAX - 10);
        let now = Instant::from_ticks(10);
        assert_eq!(step_since(last, now).as_ticks(), 21);
    }

    #[test]
    fn test_is_due_across_tick_wrap() {
        // Deadline sits just past the wrap; a pre-wrap reading is early.
        let deadline = Instant::from_ticks(10);
        assert!(!is_due(deadline, Instant::from_ticks(u64::MAX - 5)));
        assert!(is_due(deadline, Instant::from_ticks(10)));
        assert!(is_due(deadline, Instant::from_ticks(11)));

        // Deadline before the wrap, reading after it.
        let deadline = Instant::from_ticks(u64::MAX - 5);
        assert!(is_due(deadline, Instant::from_ticks(4)));
        assert!(!is_due(deadline, Instant::from_ticks(u64::MAX - 6)));
    }

    #[test]
    fn test_clamp_step() {
        assert_eq!(clamp_step(Duration::from_millis(5)), Duration::from_millis(5));
        assert_eq!(clamp_step(Duration::from_millis(250)), MAX_TICK_DELTA);
        assert_eq!(clamp_step(Duration::from_millis(1000)), MAX_TICK_DELTA);
    }
}
