/*!
load_store.rs - Load / Store / LAX / SAX opcode family handler

Handles all 6502 load and store instructions plus their illegal LAX/SAX
counterparts:

Loads (set Z/N flags; read-addressing helpers charge their own page-cross
dummy read, so no separate cycle bookkeeping is needed here):
    LDA: A9, A5, B5, AD, BD, B9, A1, B1
    LDX: A2, A6, B6, AE, BE
    LDY: A0, A4, B4, AC, BC
    LAX (illegal): A7, B7, AF, BF, A3, B3

Stores (no flags changed; indexed stores always perform the dummy read even
without a page crossing, which the `_w`-suffixed addressing helpers model):
    STA: 85, 95, 8D, 9D, 99, 81, 91
    STX: 86, 96, 8E
    STY: 84, 94, 8C
    SAX (illegal): 87, 97, 8F, 83

Integration
===========
Invoked by the fallback dispatcher after the opcode byte has been fetched
and the PC advanced past it. Every bus access (including dummy reads) is
charged by the addressing/execute helpers themselves, so instruction timing
falls out of the sequence of calls rather than a lookup table.
*/

#![allow(dead_code)]

use crate::bus::Bus;
use crate::cpu::regs::CpuRegs;

use crate::cpu::addressing::{
    addr_abs, addr_abs_x, addr_abs_x_pc, addr_abs_y, addr_abs_y_pc, addr_ind_x, addr_ind_y,
    addr_ind_y_pc, addr_zp, addr_zp_x, addr_zp_y, fetch_byte,
};
use crate::cpu::execute::{lax, lda, ldx, ldy, sax};

/// Attempt to execute a load/store/LAX/SAX opcode.
///
/// Returns true if the opcode was recognized and executed.
pub(super) fn handle<C: CpuRegs>(opcode: u8, cpu: &mut C, bus: &mut Bus) -> bool {
    match opcode {
        // ---------------- LDA ----------------
        0xA9 => {
            let v = fetch_byte(cpu, bus);
            lda(cpu, v);
        }
        0xA5 => {
            let a = addr_zp(cpu, bus);
            let v = bus.cpu_read(a);
            lda(cpu, v);
        }
        0xB5 => {
            let a = addr_zp_x(cpu, bus);
            let v = bus.cpu_read(a);
            lda(cpu, v);
        }
        0xAD => {
            let a = addr_abs(cpu, bus);
            let v = bus.cpu_read(a);
            lda(cpu, v);
        }
        0xBD => {
            let (a, _crossed) = addr_abs_x_pc(cpu, bus);
            let v = bus.cpu_read(a);
            lda(cpu, v);
        }
        0xB9 => {
            let (a, _crossed) = addr_abs_y_pc(cpu, bus);
            let v = bus.cpu_read(a);
            lda(cpu, v);
        }
        0xA1 => {
            let a = addr_ind_x(cpu, bus);
            let v = bus.cpu_read(a);
            lda(cpu, v);
        }
        0xB1 => {
            let (a, _crossed) = addr_ind_y_pc(cpu, bus);
            let v = bus.cpu_read(a);
            lda(cpu, v);
        }

        // ---------------- LDX ----------------
        0xA2 => {
            let v = fetch_byte(cpu, bus);
            ldx(cpu, v);
        }
        0xA6 => {
            let a = addr_zp(cpu, bus);
            let v = bus.cpu_read(a);
            ldx(cpu, v);
        }
        0xB6 => {
            let a = addr_zp_y(cpu, bus);
            let v = bus.cpu_read(a);
            ldx(cpu, v);
        }
        0xAE => {
            let a = addr_abs(cpu, bus);
            let v = bus.cpu_read(a);
            ldx(cpu, v);
        }
        0xBE => {
            let (a, _crossed) = addr_abs_y_pc(cpu, bus);
            let v = bus.cpu_read(a);
            ldx(cpu, v);
        }

        // ---------------- LDY ----------------
        0xA0 => {
            let v = fetch_byte(cpu, bus);
            ldy(cpu, v);
        }
        0xA4 => {
            let a = addr_zp(cpu, bus);
            let v = bus.cpu_read(a);
            ldy(cpu, v);
        }
        0xB4 => {
            let a = addr_zp_x(cpu, bus);
            let v = bus.cpu_read(a);
            ldy(cpu, v);
        }
        0xAC => {
            let a = addr_abs(cpu, bus);
            let v = bus.cpu_read(a);
            ldy(cpu, v);
        }
        0xBC => {
            let (a, _crossed) = addr_abs_x_pc(cpu, bus);
            let v = bus.cpu_read(a);
            ldy(cpu, v);
        }

        // ---------------- LAX (illegal) ----------------
        0xA7 => {
            let a = addr_zp(cpu, bus);
            let v = bus.cpu_read(a);
            lax(cpu, v);
        }
        0xB7 => {
            let a = addr_zp_y(cpu, bus);
            let v = bus.cpu_read(a);
            lax(cpu, v);
        }
        0xAF => {
            let a = addr_abs(cpu, bus);
            let v = bus.cpu_read(a);
            lax(cpu, v);
        }
        0xBF => {
            let (a, _crossed) = addr_abs_y_pc(cpu, bus);
            let v = bus.cpu_read(a);
            lax(cpu, v);
        }
        0xA3 => {
            let a = addr_ind_x(cpu, bus);
            let v = bus.cpu_read(a);
            lax(cpu, v);
        }
        0xB3 => {
            let (a, _crossed) = addr_ind_y_pc(cpu, bus);
            let v = bus.cpu_read(a);
            lax(cpu, v);
        }

        // ---------------- STA ----------------
        0x85 => {
            let a = addr_zp(cpu, bus);
            let a_val = cpu.a();
            bus.cpu_write(a, a_val);
        }
        0x95 => {
            let a = addr_zp_x(cpu, bus);
            let a_val = cpu.a();
            bus.cpu_write(a, a_val);
        }
        0x8D => {
            let a = addr_abs(cpu, bus);
            let a_val = cpu.a();
            bus.cpu_write(a, a_val);
        }
        0x9D => {
            let a = addr_abs_x(cpu, bus);
            let a_val = cpu.a();
            bus.cpu_write(a, a_val);
        }
        0x99 => {
            let a = addr_abs_y(cpu, bus);
            let a_val = cpu.a();
            bus.cpu_write(a, a_val);
        }
        0x81 => {
            let a = addr_ind_x(cpu, bus);
            let a_val = cpu.a();
            bus.cpu_write(a, a_val);
        }
        0x91 => {
            let a = addr_ind_y(cpu, bus);
            let a_val = cpu.a();
            bus.cpu_write(a, a_val);
        }

        // ---------------- STX ----------------
        0x86 => {
            let a = addr_zp(cpu, bus);
            let x_val = cpu.x();
            bus.cpu_write(a, x_val);
        }
        0x96 => {
            let a = addr_zp_y(cpu, bus);
            let x_val = cpu.x();
            bus.cpu_write(a, x_val);
        }
        0x8E => {
            let a = addr_abs(cpu, bus);
            let x_val = cpu.x();
            bus.cpu_write(a, x_val);
        }

        // ---------------- STY ----------------
        0x84 => {
            let a = addr_zp(cpu, bus);
            let y_val = cpu.y();
            bus.cpu_write(a, y_val);
        }
        0x94 => {
            let a = addr_zp_x(cpu, bus);
            let y_val = cpu.y();
            bus.cpu_write(a, y_val);
        }
        0x8C => {
            let a = addr_abs(cpu, bus);
            let y_val = cpu.y();
            bus.cpu_write(a, y_val);
        }

        // ---------------- SAX (illegal) ----------------
        0x87 => {
            let a = addr_zp(cpu, bus);
            let v = sax(cpu);
            bus.cpu_write(a, v);
        }
        0x97 => {
            let a = addr_zp_y(cpu, bus);
            let v = sax(cpu);
            bus.cpu_write(a, v);
        }
        0x8F => {
            let a = addr_abs(cpu, bus);
            let v = sax(cpu);
            bus.cpu_write(a, v);
        }
        0x83 => {
            let a = addr_ind_x(cpu, bus);
            let v = sax(cpu);
            bus.cpu_write(a, v);
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
    fn lda_abs_x_page_cross_penalty_applied() {
        // LDX #$01; LDA $12FF,X; BRK
        let (mut cpu, mut bus) = setup(&[0xA2, 0x01, 0xBD, 0xFF, 0x12, 0x00]);
        let c1 = cpu.step(&mut bus);
        assert_eq!(c1, 2); // LDX imm
        let c2 = cpu.step(&mut bus);
        assert_eq!(c2, 5); // LDA abs,X with page cross
    }

    #[test]
    fn sta_abs_x_always_dummies() {
        // LDX #$01; STA $12FF,X; BRK
        let (mut cpu, mut bus) = setup(&[0xA2, 0x01, 0x9D, 0xFF, 0x12, 0x00]);
        let c1 = cpu.step(&mut bus);
        assert_eq!(c1, 2); // LDX
        let c2 = cpu.step(&mut bus);
        // STA abs,X is always 5 cycles: the dummy indexed read happens
        // whether or not the addition actually crosses a page.
        assert_eq!(c2, 5);
    }

    #[test]
    fn lax_sets_a_and_x_from_memory() {
        let (mut cpu, mut bus) = setup(&[0xA7, 0x10, 0x00]); // LAX $10; BRK
        bus.write(0x0010, 0x77);
        cpu.step(&mut bus);
        assert_eq!(cpu.a(), 0x77);
        assert_eq!(cpu.x(), 0x77);
    }
}
