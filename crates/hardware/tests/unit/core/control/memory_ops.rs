//! Load/Store Instruction Tests.
//!
//! Every addressing mode through the microcoded chains: PC-relative,
//! base+offset, and double-indirect, in both directions.

use crate::common::encode;
use crate::common::harness::TestContext;

#[test]
fn lea_ldr_round_trip() {
    // LEA R0,#15 -> R0 = 0x3010 ; LDR R1,R0,#0 ; TRAP x25
    let mut ctx = TestContext::new()
        .install_halt_handler()
        .load(0x3000, &[0xE00F, 0x6200, 0xF025]);
    ctx.sim.set_memory(0x3010, 0x00AB);
    ctx.run_to_halt(100);

    assert_eq!(ctx.reg(0), 0x3010);
    assert_eq!(ctx.reg(1), 0x00AB);
    assert_eq!(ctx.flags(), (false, false, true));
}

#[test]
fn ld_reads_pc_relative() {
    let mut ctx = TestContext::new()
        .install_halt_handler()
        .load(0x3000, &[encode::ld(2, 4), encode::trap(0x25)]);
    ctx.sim.set_memory(0x3005, 0xFFFE);
    ctx.run_to_halt(100);
    assert_eq!(ctx.reg(2), 0xFFFE);
    assert_eq!(ctx.flags(), (true, false, false), "loaded value sets CC");
}

#[test]
fn st_writes_pc_relative() {
    let mut ctx = TestContext::new().install_halt_handler().load(
        0x3000,
        &[
            encode::add_imm(1, 0, 5),
            encode::st(1, 4),
            encode::trap(0x25),
        ],
    );
    ctx.run_to_halt(100);
    assert_eq!(ctx.mem(0x3006), 5);
}

#[test]
fn ldr_negative_offset() {
    let mut ctx = TestContext::new()
        .install_halt_handler()
        .load(0x3000, &[encode::ldr(1, 2, -1), encode::trap(0x25)]);
    ctx.sim.set_register(2, 0x4000);
    ctx.sim.set_memory(0x3FFF, 0x1234);
    ctx.run_to_halt(100);
    assert_eq!(ctx.reg(1), 0x1234);
}

#[test]
fn str_writes_through_base() {
    let mut ctx = TestContext::new().install_halt_handler().load(
        0x3000,
        &[
            encode::add_imm(3, 0, 9),
            encode::str_op(3, 2, 2),
            encode::trap(0x25),
        ],
    );
    ctx.sim.set_register(2, 0x5000);
    ctx.run_to_halt(100);
    assert_eq!(ctx.mem(0x5002), 9);
}

#[test]
fn ldi_double_indirect_load() {
    let mut ctx = TestContext::new()
        .install_halt_handler()
        .load(0x3000, &[encode::ldi(1, 4), encode::trap(0x25)]);
    ctx.sim.set_memory(0x3005, 0x4000); // pointer
    ctx.sim.set_memory(0x4000, 0x0077); // data
    ctx.run_to_halt(100);
    assert_eq!(ctx.reg(1), 0x0077);
    assert_eq!(ctx.flags(), (false, false, true));
}

#[test]
fn sti_double_indirect_store() {
    let mut ctx = TestContext::new().install_halt_handler().load(
        0x3000,
        &[
            encode::add_imm(1, 0, 0x0C),
            encode::sti(1, 3),
            encode::trap(0x25),
        ],
    );
    ctx.sim.set_memory(0x3005, 0x4800); // pointer
    ctx.run_to_halt(100);
    assert_eq!(ctx.mem(0x4800), 0x0C);
}

#[test]
fn loaded_zero_sets_z() {
    let mut ctx = TestContext::new()
        .install_halt_handler()
        .load(0x3000, &[encode::add_imm(1, 0, 1), encode::ld(1, 4), encode::trap(0x25)]);
    // Target word is already zero; loading it must move CC from P to Z.
    ctx.run_to_halt(100);
    assert_eq!(ctx.reg(1), 0);
    assert_eq!(ctx.flags(), (false, true, false));
}
