//! Condition-Flag Tests.
//!
//! Verifies the one-hot invariant: after any update exactly one of N/Z/P
//! is set, and reset starts with Z.

use lc3_core::core::arch::CondFlags;

fn exactly_one(flags: &CondFlags) -> bool {
    (flags.n() as u8 + flags.z() as u8 + flags.p() as u8) == 1
}

#[test]
fn reset_state_is_zero() {
    let flags = CondFlags::new();
    assert!(flags.z() && !flags.n() && !flags.p());
}

#[test]
fn update_is_one_hot_for_every_class() {
    let mut flags = CondFlags::new();

    flags.update(0);
    assert!(flags.z() && exactly_one(&flags));

    flags.update(1);
    assert!(flags.p() && exactly_one(&flags));

    flags.update(0x7FFF);
    assert!(flags.p() && exactly_one(&flags));

    flags.update(0x8000);
    assert!(flags.n() && exactly_one(&flags));

    flags.update(0xFFFF);
    assert!(flags.n() && exactly_one(&flags));
}

#[test]
fn one_hot_holds_across_arbitrary_sequences() {
    let mut flags = CondFlags::new();
    for v in [3u16, 0, 0xFFFE, 0x8000, 42, 0, 1] {
        flags.update(v);
        assert!(exactly_one(&flags), "one-hot violated after {:#06x}", v);
    }
}

#[test]
fn psr_bits_round_trip() {
    let mut flags = CondFlags::new();
    flags.update(0xFFFF);
    assert_eq!(flags.psr_bits(), 0b100);

    let mut restored = CondFlags::new();
    restored.set_from_psr_bits(0b100);
    assert!(restored.n() && exactly_one(&restored));
}

#[test]
fn psr_restore_with_no_flag_bits_falls_back_to_zero() {
    let mut flags = CondFlags::new();
    flags.set_from_psr_bits(0x8000);
    assert!(flags.z() && exactly_one(&flags));
}
