//! Integration Tests für den fehlertoleranten Zwei-Draht-Bus
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen ScriptedBus

mod mocks;

use esp_core::bus::FaultTolerantBus;
use esp_core::{BusConfig, BusError, RecoveryState, STATUS_I2C_ERROR, TransferFault};
use mocks::{BusEvent, LoggingDelay, ScriptedBus, reset_sequence};

const SENSOR: u8 = 0x3A;

fn channel(failures: usize, max_retries: u8) -> FaultTolerantBus<ScriptedBus, LoggingDelay> {
    let bus = ScriptedBus::new(failures).with_read_data(&[0x11, 0x22, 0x33, 0x44]);
    let delay = bus.delay();
    FaultTolerantBus::with_config(
        bus,
        delay,
        BusConfig::default().with_max_retries(max_retries),
    )
}

// ============================================================================
// Tests: Erfolg ohne Recovery
// ============================================================================

#[test]
fn test_read_first_try() {
    let mut channel = channel(0, 5);
    let mut buffer = [0u8; 4];

    assert_eq!(channel.read(SENSOR, &mut buffer, false), Ok(()));
    assert_eq!(buffer, [0x11, 0x22, 0x33, 0x44]);
    assert_eq!(channel.retry_count(), 0);
    assert_eq!(channel.recovery_state(), RecoveryState::Succeeded);

    let (bus, _) = channel.release();
    assert_eq!(bus.reset_count(), 0);
    assert_eq!(bus.transaction_count(), 1);
}

#[test]
fn test_read_forces_read_bit() {
    let mut channel = channel(0, 5);
    let mut buffer = [0u8; 2];
    channel.read(0x3A, &mut buffer, true).unwrap();

    let (bus, _) = channel.release();
    assert_eq!(
        bus.events(),
        vec![BusEvent::Read {
            address: 0x3B,
            len: 2,
            continue_transaction: true,
        }]
    );
}

#[test]
fn test_write_forces_write_bit() {
    let mut channel = channel(0, 5);
    channel.write(0x3B, &[0x0D], true).unwrap();

    let (bus, _) = channel.release();
    assert_eq!(
        bus.events(),
        vec![BusEvent::Write {
            address: 0x3A,
            data: vec![0x0D],
            continue_transaction: true,
        }]
    );
}

#[test]
fn test_read_array() {
    let mut channel = channel(0, 5);
    let data: [u8; 3] = channel.read_array(SENSOR, false).unwrap();
    assert_eq!(data, [0x11, 0x22, 0x33]);
}

// ============================================================================
// Tests: Recovery
// ============================================================================

#[test]
fn test_write_recovers_after_two_failures() {
    let mut channel = channel(2, 5);
    let data = [1, 2, 3, 4];

    assert_eq!(channel.write(SENSOR, &data, false), Ok(()));
    assert_eq!(channel.retry_count(), 0);

    let (bus, _) = channel.release();
    assert_eq!(bus.transaction_count(), 3);
    assert_eq!(bus.reset_count(), 2);
}

#[test]
fn test_each_failure_runs_full_reset_before_retry() {
    let mut channel = channel(2, 5);
    let data = [0xAB];
    channel.write(SENSOR, &data, false).unwrap();

    let write = BusEvent::Write {
        address: SENSOR,
        data: vec![0xAB],
        continue_transaction: false,
    };
    let mut expected = vec![write.clone()];
    for _ in 0..2 {
        expected.extend(reset_sequence(5));
        expected.push(write.clone());
    }

    let (bus, _) = channel.release();
    assert_eq!(bus.events(), expected);
}

#[test]
fn test_retried_transaction_is_identical() {
    let mut channel = channel(1, 5);
    let mut buffer = [0u8; 3];
    channel.read(SENSOR, &mut buffer, true).unwrap();

    let (bus, _) = channel.release();
    let reads: Vec<_> = bus
        .events()
        .into_iter()
        .filter(|event| matches!(event, BusEvent::Read { .. }))
        .collect();
    assert_eq!(reads.len(), 2);
    assert_eq!(reads[0], reads[1]);
}

#[test]
fn test_success_below_bound() {
    const MAX: u8 = 5;

    for failures in 0..usize::from(MAX) {
        let mut channel = channel(failures, MAX);
        let mut buffer = [0u8; 4];
        assert_eq!(channel.read(SENSOR, &mut buffer, false), Ok(()));
        assert_eq!(buffer, [0x11, 0x22, 0x33, 0x44]);
        assert_eq!(channel.retry_count(), 0);

        let (bus, _) = channel.release();
        assert_eq!(bus.transaction_count(), failures + 1);
        assert_eq!(bus.reset_count(), failures);
    }
}

#[test]
fn test_exhausted_at_or_above_bound() {
    const MAX: u8 = 5;

    for failures in [usize::from(MAX), usize::from(MAX) + 1, 100] {
        let mut channel = channel(failures, MAX);
        let mut buffer = [0u8; 4];

        assert_eq!(
            channel.read(SENSOR, &mut buffer, false),
            Err(BusError::RecoveryExhausted)
        );
        // Keine Teildaten
        assert_eq!(buffer, [0; 4]);
        assert_eq!(channel.retry_count(), MAX);
        assert_eq!(channel.recovery_state(), RecoveryState::Exhausted);

        let (bus, _) = channel.release();
        assert_eq!(bus.transaction_count(), usize::from(MAX));
        assert_eq!(bus.reset_count(), usize::from(MAX) - 1);
    }
}

#[test]
fn test_write_exhausted() {
    let mut channel = channel(3, 3);
    let result = channel.write(SENSOR, &[0x00], false);

    assert_eq!(result, Err(BusError::RecoveryExhausted));
    assert_eq!(result.unwrap_err().code(), STATUS_I2C_ERROR);
}

#[test]
fn test_budget_is_per_call() {
    // Erster Aufruf verbraucht das Budget, der zweite bekommt ein neues
    let mut channel = channel(3 + 2, 3);
    let data = [0x42];

    assert!(channel.write(SENSOR, &data, false).is_err());
    assert_eq!(channel.retry_count(), 3);

    assert_eq!(channel.write(SENSOR, &data, false), Ok(()));
    assert_eq!(channel.retry_count(), 0);
}

#[test]
fn test_power_cycle_hold_has_minimum() {
    let bus = ScriptedBus::new(1);
    let delay = bus.delay();
    let mut channel = FaultTolerantBus::with_config(
        bus,
        delay,
        BusConfig::default()
            .with_max_retries(5)
            .with_power_cycle_hold_us(1),
    );
    channel.write(SENSOR, &[0x01], false).unwrap();

    let (bus, _) = channel.release();
    assert!(bus.events().contains(&BusEvent::DelayNs(5_000)));
}

#[test]
fn test_longer_power_cycle_hold_is_used() {
    let bus = ScriptedBus::new(1);
    let delay = bus.delay();
    let mut channel = FaultTolerantBus::with_config(
        bus,
        delay,
        BusConfig::default().with_power_cycle_hold_us(12),
    );
    channel.write(SENSOR, &[0x01], false).unwrap();

    let (bus, _) = channel.release();
    assert!(bus.events().contains(&BusEvent::DelayNs(12_000)));
}

#[test]
fn test_nack_is_recovered_like_any_fault() {
    let mut bus = ScriptedBus::new(1);
    bus.fault = TransferFault::Nack;
    let delay = bus.delay();
    let mut channel = FaultTolerantBus::new(bus, delay);

    assert_eq!(channel.write(SENSOR, &[0x01], false), Ok(()));
}

#[test]
fn test_default_bound() {
    let bus = ScriptedBus::new(8);
    let delay = bus.delay();
    let mut channel = FaultTolerantBus::new(bus, delay);
    assert_eq!(channel.config().max_retries, 9);

    // 8 Fehlversuche, der neunte Versuch klappt
    assert_eq!(channel.write(SENSOR, &[0x01], false), Ok(()));
}
