/*!
branches.rs - Relative branch opcode handler (BPL/BMI/BVC/BVS/BCC/BCS/BNE/BEQ)

Executes all conditional relative branch instructions. `branch_cond`
fetches the displacement and, if taken, updates PC and performs the
appropriate dummy reads (one if taken, a second if the branch crosses a
page), charging each through the bus itself.
*/

#![allow(dead_code)]

use crate::bus::Bus;
use crate::cpu::execute::{branch_cond, get_flag};
use crate::cpu::regs::CpuRegs;
use crate::cpu::state::{CARRY, NEGATIVE, OVERFLOW, ZERO};

/// Attempt to execute a branch opcode.
pub(super) fn handle<C: CpuRegs>(opcode: u8, cpu: &mut C, bus: &mut Bus) -> bool {
    match opcode {
        0x10 => branch_cond(cpu, bus, !get_flag(cpu, NEGATIVE)), // BPL
        0x30 => branch_cond(cpu, bus, get_flag(cpu, NEGATIVE)),  // BMI
        0x50 => branch_cond(cpu, bus, !get_flag(cpu, OVERFLOW)), // BVC
        0x70 => branch_cond(cpu, bus, get_flag(cpu, OVERFLOW)),  // BVS
        0x90 => branch_cond(cpu, bus, !get_flag(cpu, CARRY)),    // BCC
        0xB0 => branch_cond(cpu, bus, get_flag(cpu, CARRY)),     // BCS
        0xD0 => branch_cond(cpu, bus, !get_flag(cpu, ZERO)),     // BNE
        0xF0 => branch_cond(cpu, bus, get_flag(cpu, ZERO)),      // BEQ
        _ => return false,
    };
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
    fn branch_not_taken_base_cycles() {
        let (mut cpu, mut bus) = setup(&[0xB0, 0x02, 0xEA, 0x00]);
        let c = cpu.step(&mut bus);
        assert_eq!(c, 2); // not taken => base cycles
    }

    #[test]
    fn branch_taken_no_page_cross() {
        let (mut cpu, mut bus) = setup(&[0x90, 0x02, 0xEA, 0x00]);
        let c = cpu.step(&mut bus);
        assert_eq!(c, 3); // taken, no cross => base (2) + 1
    }

    #[test]
    fn branch_taken_page_cross() {
        let mut prg = vec![];
        prg.extend(std::iter::repeat(0xEA).take(0x00FF));
        prg.push(0x90); // BCC
        prg.push(0x01);
        prg.push(0x00); // BRK at target
        let (mut cpu, mut bus) = setup(&prg);
        for _ in 0..0x00FF {
            assert_eq!(cpu.step(&mut bus), 2);
        }
        assert_eq!(cpu.step(&mut bus), 4); // taken + page cross
    }

    #[test]
    fn branch_taken_sets_pc_correctly() {
        let (mut cpu, mut bus) = setup(&[0xD0, 0x02, 0xEA, 0x00]);
        let c = cpu.step(&mut bus);
        assert_eq!(c, 3); // taken, no cross
        let c2 = cpu.step(&mut bus);
        assert_eq!(c2, 7); // BRK (software interrupt, not a halt)
        assert!(!cpu.is_halted());
    }
}
