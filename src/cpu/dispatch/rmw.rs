/*!
rmw.rs - RMW / shift / increment / decrement opcode family handler

Implements all documented 6502 Read-Modify-Write instructions (shifts,
rotates, memory INC/DEC) plus their illegal combined-effect counterparts
(SLO, RLA, SRE, RRA, DCP, ISC). Every memory form performs the canonical
read -> dummy write (old value) -> write (new value) sequence inside
`rmw_memory`, each charging its own bus cycle, so instruction timing
falls out automatically.

Covered Opcodes
---------------
Shifts / Rotates
  ASL: 0x0A (A), 0x06 (zp), 0x16 (zp,X), 0x0E (abs), 0x1E (abs,X)
  LSR: 0x4A (A), 0x46 (zp), 0x56 (zp,X), 0x4E (abs), 0x5E (abs,X)
  ROL: 0x2A (A), 0x26 (zp), 0x36 (zp,X), 0x2E (abs), 0x3E (abs,X)
  ROR: 0x6A (A), 0x66 (zp), 0x76 (zp,X), 0x6E (abs), 0x7E (abs,X)

Memory Increment / Decrement
  INC: 0xE6 (zp), 0xF6 (zp,X), 0xEE (abs), 0xFE (abs,X)
  DEC: 0xC6 (zp), 0xD6 (zp,X), 0xCE (abs), 0xDE (abs,X)

Illegal combined RMW
  SLO: 0x07, 0x17, 0x0F, 0x1F, 0x1B, 0x03, 0x13
  RLA: 0x27, 0x37, 0x2F, 0x3F, 0x3B, 0x23, 0x33
  SRE: 0x47, 0x57, 0x4F, 0x5F, 0x5B, 0x43, 0x53
  RRA: 0x67, 0x77, 0x6F, 0x7F, 0x7B, 0x63, 0x73
  DCP: 0xC7, 0xD7, 0xCF, 0xDF, 0xDB, 0xC3, 0xD3
  ISC: 0xE7, 0xF7, 0xEF, 0xFF, 0xFB, 0xE3, 0xF3
*/

#![allow(dead_code)]

use crate::bus::Bus;
use crate::cpu::regs::CpuRegs;

use crate::cpu::addressing::{
    addr_abs, addr_abs_x, addr_abs_y, addr_implicit, addr_ind_x, addr_ind_y, addr_zp, addr_zp_x,
};
use crate::cpu::execute::{
    asl_acc, asl_mem, dcp, dec_mem, inc_mem, isc, lsr_acc, lsr_mem, rla, rol_acc, rol_mem,
    ror_acc, ror_mem, rra, slo, sre,
};

/// Attempt to execute an RMW / shift / INC / DEC / illegal-combined opcode.
pub(super) fn handle<C: CpuRegs>(opcode: u8, cpu: &mut C, bus: &mut Bus) -> bool {
    match opcode {
        // -------- ASL --------
        0x0A => {
            addr_implicit(cpu, bus);
            asl_acc(cpu)
        }
        0x06 => {
            let a = addr_zp(cpu, bus);
            asl_mem(cpu, bus, a);
        }
        0x16 => {
            let a = addr_zp_x(cpu, bus);
            asl_mem(cpu, bus, a);
        }
        0x0E => {
            let a = addr_abs(cpu, bus);
            asl_mem(cpu, bus, a);
        }
        0x1E => {
            let a = addr_abs_x(cpu, bus);
            asl_mem(cpu, bus, a);
        }

        // -------- LSR --------
        0x4A => {
            addr_implicit(cpu, bus);
            lsr_acc(cpu)
        }
        0x46 => {
            let a = addr_zp(cpu, bus);
            lsr_mem(cpu, bus, a);
        }
        0x56 => {
            let a = addr_zp_x(cpu, bus);
            lsr_mem(cpu, bus, a);
        }
        0x4E => {
            let a = addr_abs(cpu, bus);
            lsr_mem(cpu, bus, a);
        }
        0x5E => {
            let a = addr_abs_x(cpu, bus);
            lsr_mem(cpu, bus, a);
        }

        // -------- ROL --------
        0x2A => {
            addr_implicit(cpu, bus);
            rol_acc(cpu)
        }
        0x26 => {
            let a = addr_zp(cpu, bus);
            rol_mem(cpu, bus, a);
        }
        0x36 => {
            let a = addr_zp_x(cpu, bus);
            rol_mem(cpu, bus, a);
        }
        0x2E => {
            let a = addr_abs(cpu, bus);
            rol_mem(cpu, bus, a);
        }
        0x3E => {
            let a = addr_abs_x(cpu, bus);
            rol_mem(cpu, bus, a);
        }

        // -------- ROR --------
        0x6A => {
            addr_implicit(cpu, bus);
            ror_acc(cpu)
        }
        0x66 => {
            let a = addr_zp(cpu, bus);
            ror_mem(cpu, bus, a);
        }
        0x76 => {
            let a = addr_zp_x(cpu, bus);
            ror_mem(cpu, bus, a);
        }
        0x6E => {
            let a = addr_abs(cpu, bus);
            ror_mem(cpu, bus, a);
        }
        0x7E => {
            let a = addr_abs_x(cpu, bus);
            ror_mem(cpu, bus, a);
        }

        // -------- INC (memory) --------
        0xE6 => {
            let a = addr_zp(cpu, bus);
            inc_mem(cpu, bus, a);
        }
        0xF6 => {
            let a = addr_zp_x(cpu, bus);
            inc_mem(cpu, bus, a);
        }
        0xEE => {
            let a = addr_abs(cpu, bus);
            inc_mem(cpu, bus, a);
        }
        0xFE => {
            let a = addr_abs_x(cpu, bus);
            inc_mem(cpu, bus, a);
        }

        // -------- DEC (memory) --------
        0xC6 => {
            let a = addr_zp(cpu, bus);
            dec_mem(cpu, bus, a);
        }
        0xD6 => {
            let a = addr_zp_x(cpu, bus);
            dec_mem(cpu, bus, a);
        }
        0xCE => {
            let a = addr_abs(cpu, bus);
            dec_mem(cpu, bus, a);
        }
        0xDE => {
            let a = addr_abs_x(cpu, bus);
            dec_mem(cpu, bus, a);
        }

        // -------- SLO (illegal) --------
        0x07 => {
            let a = addr_zp(cpu, bus);
            slo(cpu, bus, a);
        }
        0x17 => {
            let a = addr_zp_x(cpu, bus);
            slo(cpu, bus, a);
        }
        0x0F => {
            let a = addr_abs(cpu, bus);
            slo(cpu, bus, a);
        }
        0x1F => {
            let a = addr_abs_x(cpu, bus);
            slo(cpu, bus, a);
        }
        0x1B => {
            let a = addr_abs_y(cpu, bus);
            slo(cpu, bus, a);
        }
        0x03 => {
            let a = addr_ind_x(cpu, bus);
            slo(cpu, bus, a);
        }
        0x13 => {
            let a = addr_ind_y(cpu, bus);
            slo(cpu, bus, a);
        }

        // -------- RLA (illegal) --------
        0x27 => {
            let a = addr_zp(cpu, bus);
            rla(cpu, bus, a);
        }
        0x37 => {
            let a = addr_zp_x(cpu, bus);
            rla(cpu, bus, a);
        }
        0x2F => {
            let a = addr_abs(cpu, bus);
            rla(cpu, bus, a);
        }
        0x3F => {
            let a = addr_abs_x(cpu, bus);
            rla(cpu, bus, a);
        }
        0x3B => {
            let a = addr_abs_y(cpu, bus);
            rla(cpu, bus, a);
        }
        0x23 => {
            let a = addr_ind_x(cpu, bus);
            rla(cpu, bus, a);
        }
        0x33 => {
            let a = addr_ind_y(cpu, bus);
            rla(cpu, bus, a);
        }

        // -------- SRE (illegal) --------
        0x47 => {
            let a = addr_zp(cpu, bus);
            sre(cpu, bus, a);
        }
        0x57 => {
            let a = addr_zp_x(cpu, bus);
            sre(cpu, bus, a);
        }
        0x4F => {
            let a = addr_abs(cpu, bus);
            sre(cpu, bus, a);
        }
        0x5F => {
            let a = addr_abs_x(cpu, bus);
            sre(cpu, bus, a);
        }
        0x5B => {
            let a = addr_abs_y(cpu, bus);
            sre(cpu, bus, a);
        }
        0x43 => {
            let a = addr_ind_x(cpu, bus);
            sre(cpu, bus, a);
        }
        0x53 => {
            let a = addr_ind_y(cpu, bus);
            sre(cpu, bus, a);
        }

        // -------- RRA (illegal) --------
        0x67 => {
            let a = addr_zp(cpu, bus);
            rra(cpu, bus, a);
        }
        0x77 => {
            let a = addr_zp_x(cpu, bus);
            rra(cpu, bus, a);
        }
        0x6F => {
            let a = addr_abs(cpu, bus);
            rra(cpu, bus, a);
        }
        0x7F => {
            let a = addr_abs_x(cpu, bus);
            rra(cpu, bus, a);
        }
        0x7B => {
            let a = addr_abs_y(cpu, bus);
            rra(cpu, bus, a);
        }
        0x63 => {
            let a = addr_ind_x(cpu, bus);
            rra(cpu, bus, a);
        }
        0x73 => {
            let a = addr_ind_y(cpu, bus);
            rra(cpu, bus, a);
        }

        // -------- DCP (illegal) --------
        0xC7 => {
            let a = addr_zp(cpu, bus);
            dcp(cpu, bus, a);
        }
        0xD7 => {
            let a = addr_zp_x(cpu, bus);
            dcp(cpu, bus, a);
        }
        0xCF => {
            let a = addr_abs(cpu, bus);
            dcp(cpu, bus, a);
        }
        0xDF => {
            let a = addr_abs_x(cpu, bus);
            dcp(cpu, bus, a);
        }
        0xDB => {
            let a = addr_abs_y(cpu, bus);
            dcp(cpu, bus, a);
        }
        0xC3 => {
            let a = addr_ind_x(cpu, bus);
            dcp(cpu, bus, a);
        }
        0xD3 => {
            let a = addr_ind_y(cpu, bus);
            dcp(cpu, bus, a);
        }

        // -------- ISC (illegal) --------
        0xE7 => {
            let a = addr_zp(cpu, bus);
            isc(cpu, bus, a);
        }
        0xF7 => {
            let a = addr_zp_x(cpu, bus);
            isc(cpu, bus, a);
        }
        0xEF => {
            let a = addr_abs(cpu, bus);
            isc(cpu, bus, a);
        }
        0xFF => {
            let a = addr_abs_x(cpu, bus);
            isc(cpu, bus, a);
        }
        0xFB => {
            let a = addr_abs_y(cpu, bus);
            isc(cpu, bus, a);
        }
        0xE3 => {
            let a = addr_ind_x(cpu, bus);
            isc(cpu, bus, a);
        }
        0xF3 => {
            let a = addr_ind_y(cpu, bus);
            isc(cpu, bus, a);
        }

        _ => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use crate::bus::Bus;
    use crate::cartridge::Cartridge;
    use crate::cpu::core::Cpu;
    use crate::test_utils::build_nrom_with_prg;

    fn setup(prg: &[u8]) -> (Cpu, Bus) {
        let rom = build_nrom_with_prg(prg, 1, 1, None);
        let cart = Cartridge::from_ines_bytes(&rom).expect("parse");
        let mut bus = Bus::new();
        bus.attach_cartridge(cart);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        (cpu, bus)
    }

    #[test]
    fn asl_accumulator_basic() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x81, 0x0A, 0x00]);
        assert_eq!(cpu.step(&mut bus), 2); // LDA
        let c = cpu.step(&mut bus); // ASL A
        assert_eq!(c, 2);
        assert_eq!(cpu.a(), 0x02);
    }

    #[test]
    fn inc_zeropage() {
        let (mut cpu, mut bus) = setup(&[0xA9, 0x00, 0x85, 0x10, 0xE6, 0x10, 0x00]);
        assert_eq!(cpu.step(&mut bus), 2); // LDA
        assert_eq!(cpu.step(&mut bus), 3); // STA
        let cycles = cpu.step(&mut bus); // INC zp
        assert_eq!(cycles, 5);
        assert_eq!(bus.read(0x0010), 0x01);
    }

    #[test]
    fn dec_abs_x() {
        let (mut cpu, mut bus) = setup(&[
            0xA2, 0x01, 0xA9, 0x05, 0x9D, 0x00, 0x20, 0xDE, 0x00, 0x20, 0x00,
        ]);
        assert_eq!(cpu.step(&mut bus), 2); // LDX
        assert_eq!(cpu.step(&mut bus), 2); // LDA
        assert_eq!(cpu.step(&mut bus), 5); // STA abs,X
        let c = cpu.step(&mut bus); // DEC abs,X
        assert_eq!(c, 7);
        assert_eq!(bus.read(0x2001), 0x04);
    }

    #[test]
    fn dcp_zero_page_compares_after_decrement() {
        // LDA #$05; DCP $10; BRK (mem at $10 starts at 0x06, becomes 0x05, equal -> Z/C set)
        let (mut cpu, mut bus) = setup(&[0xA9, 0x05, 0xC7, 0x10, 0x00]);
        bus.write(0x0010, 0x06);
        let _ = cpu.step(&mut bus); // LDA
        let _ = cpu.step(&mut bus); // DCP zp
        assert_eq!(bus.read(0x0010), 0x05);
    }
}
