//! Register dispatch and status tests

use crate::apu::Apu;
use crate::error::EmulationError;

#[test]
fn test_status_write_enables_channels() {
    let mut apu = Apu::new();
    apu.write_register(0x15, 0x1F).unwrap();

    assert!(apu.pulse1.enabled);
    assert!(apu.pulse2.enabled);
    assert!(apu.triangle.enabled);
    assert!(apu.noise.enabled);
    assert!(apu.dmc_enabled);
}

#[test]
fn test_status_disable_zeroes_length_counters() {
    let mut apu = Apu::new();
    apu.write_register(0x15, 0x0F).unwrap();
    apu.write_register(0x03, 0x08).unwrap(); // pulse1 length load
    apu.write_register(0x07, 0x08).unwrap(); // pulse2
    apu.write_register(0x0B, 0x08).unwrap(); // triangle
    apu.write_register(0x0F, 0x08).unwrap(); // noise
    assert!(apu.pulse1.length_counter.is_active());
    assert!(apu.noise.length_counter.is_active());

    apu.write_register(0x15, 0x00).unwrap();
    assert!(!apu.pulse1.length_counter.is_active());
    assert!(!apu.pulse2.length_counter.is_active());
    assert!(!apu.triangle.length_counter.is_active());
    assert!(!apu.noise.length_counter.is_active());
}

#[test]
fn test_register_routing_reaches_the_right_channel() {
    let mut apu = Apu::new();

    apu.write_register(0x00, 0b1000_0000).unwrap();
    assert_eq!(apu.pulse1.duty, 2);

    apu.write_register(0x04, 0b0100_0000).unwrap();
    assert_eq!(apu.pulse2.duty, 1);
    assert_eq!(apu.pulse1.duty, 2);

    apu.write_register(0x0A, 0x21).unwrap();
    assert_eq!(apu.triangle.timer.period, 0x21);

    apu.write_register(0x0E, 0x03).unwrap();
    assert_eq!(apu.noise.period, 32);
}

#[test]
fn test_frame_counter_records_bits() {
    let mut apu = Apu::new();
    apu.write_register(0x17, 0xC0).unwrap();
    assert_eq!(apu.frame_counter_mode, 1);
    assert!(apu.irq_inhibit);

    apu.write_register(0x17, 0x00).unwrap();
    assert_eq!(apu.frame_counter_mode, 0);
    assert!(!apu.irq_inhibit);
}

#[test]
fn test_unused_slots() {
    let mut apu = Apu::new();
    // Triangle's unused register is ignored
    apu.write_register(0x09, 0xFF).unwrap();
    // The noise one faults
    assert!(matches!(
        apu.write_register(0x0D, 0x00),
        Err(EmulationError::Unimplemented { .. })
    ));
}

#[test]
fn test_dmc_registers() {
    let mut apu = Apu::new();
    // Direct load is accepted and ignored
    apu.write_register(0x11, 0x7F).unwrap();
    // Sample configuration fails loudly
    for reg in [0x10, 0x12, 0x13] {
        assert!(matches!(
            apu.write_register(reg, 0x00),
            Err(EmulationError::Unimplemented { .. })
        ));
    }
}
