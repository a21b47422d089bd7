mod tests {
    use std::cell::{Cell, RefCell};
    use std::convert::Infallible;
    use std::rc::Rc;

    use embassy_time::{Duration, Instant};
    use embedded_hal::digital::{ErrorType, OutputPin};
    use prop_output_composer::{
        Command, CommandChannel, EffectEngine, OutputDriver, Outputs, Polarity, RelayBank, Rgb,
        Strip, TickScheduler,
    };

    #[derive(Clone, Default)]
    struct MockPin {
        high: Rc<Cell<bool>>,
    }

    impl ErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high.set(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high.set(true);
            Ok(())
        }
    }

    #[derive(Clone, Default)]
    struct CaptureOutput {
        frame: Rc<RefCell<Vec<Rgb>>>,
    }

    impl OutputDriver for CaptureOutput {
        fn write(&mut self, colors: &[Rgb]) {
            *self.frame.borrow_mut() = colors.to_vec();
        }
    }

    fn outputs(pin: &MockPin) -> Outputs<MockPin, CaptureOutput, CaptureOutput, 1, 4, 4> {
        let bank = RelayBank::new([pin.clone()], [Polarity::ActiveHigh], None);
        let engine = EffectEngine::new(
            Some(Strip::new(CaptureOutput::default())),
            Some(Strip::new(CaptureOutput::default())),
        );
        Outputs::new(bank, engine)
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_drains_and_dispatches_queued_commands() {
        let pin = MockPin::default();
        let channel: CommandChannel<8> = CommandChannel::new();
        let mut scheduler = TickScheduler::new(outputs(&pin), channel.receiver());

        let sender = channel.sender();
        sender
            .try_send(Command::Relay {
                id: 0,
                on: true,
                timeout: None,
            })
            .unwrap();
        sender.try_send(Command::Unrecognized).unwrap();
        sender
            .try_send(Command::Relay {
                id: 99,
                on: true,
                timeout: None,
            })
            .unwrap();

        let result = scheduler.tick(at(0));
        assert!(pin.high.get());
        assert_eq!(result.rejected, 2);

        // Queue is drained; the next tick sees nothing.
        assert_eq!(scheduler.tick(at(5)).rejected, 0);
    }

    #[test]
    fn test_relay_maintenance_runs_before_command_drain() {
        let pin = MockPin::default();
        let channel: CommandChannel<8> = CommandChannel::new();
        let mut scheduler = TickScheduler::new(outputs(&pin), channel.receiver());

        channel
            .sender()
            .try_send(Command::RelayPulse {
                id: 0,
                duration: Some(Duration::from_millis(100)),
            })
            .unwrap();
        scheduler.tick(at(0));
        assert!(pin.high.get());

        // The pulse started at the tick that dispatched it and expires on
        // a later maintenance pass.
        scheduler.tick(at(99));
        assert!(pin.high.get());
        scheduler.tick(at(100));
        assert!(!pin.high.get());
    }

    #[test]
    fn test_pacing_and_sleep() {
        let pin = MockPin::default();
        let channel: CommandChannel<4> = CommandChannel::new();
        let mut scheduler = TickScheduler::with_period(
            outputs(&pin),
            channel.receiver(),
            Duration::from_millis(5),
        );

        // Far behind the epoch deadline: resync to now.
        let first = scheduler.tick(at(1000));
        assert_eq!(first.next_deadline, at(1005));
        assert_eq!(first.sleep, Duration::from_millis(5));

        // On time: deadline advances by one period.
        let second = scheduler.tick(at(1005));
        assert_eq!(second.next_deadline, at(1010));
        assert_eq!(second.sleep, Duration::from_millis(5));

        // Slightly late: shorter sleep, no resync.
        let third = scheduler.tick(at(1012));
        assert_eq!(third.next_deadline, at(1015));
        assert_eq!(third.sleep, Duration::from_millis(3));
    }

    #[test]
    fn test_drift_reset_after_stall() {
        let pin = MockPin::default();
        let channel: CommandChannel<4> = CommandChannel::new();
        let mut scheduler = TickScheduler::with_period(
            outputs(&pin),
            channel.receiver(),
            Duration::from_millis(5),
        );

        scheduler.tick(at(1000));
        // A long stall: skip the backlog instead of a catch-up burst.
        let result = scheduler.tick(at(2000));
        assert_eq!(result.next_deadline, at(2005));
        assert_eq!(result.sleep, Duration::from_millis(5));
    }

    #[test]
    fn test_channel_backpressure() {
        let channel: CommandChannel<2> = CommandChannel::new();
        let sender = channel.sender();
        assert!(sender.try_send(Command::LedStop).is_ok());
        assert!(sender.try_send(Command::LedStop).is_ok());
        let err = sender.try_send(Command::LedStop).unwrap_err();
        assert_eq!(err.0, Command::LedStop);

        let receiver = channel.receiver();
        assert!(receiver.try_receive().is_ok());
        assert!(sender.try_send(Command::LedStop).is_ok());
    }
}
