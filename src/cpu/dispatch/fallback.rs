/*!
fallback.rs - Match-based opcode dispatcher

Fetches the opcode, advances PC past it, and walks the family handler
chain (load/store, logical, arithmetic, compare, branches, rmw,
control_flow, misc, illegal) until one claims the opcode. Every handler
charges its own bus cycles through `Bus::cpu_read`/`cpu_write`/
`cpu_dummy_read`, so the total instruction cost is read back from the
bus's running tick counter rather than computed ahead of time.

Opcodes not claimed by any handler are one of the genuine CPU jam
("KIL"/"STP") opcodes; hitting one halts the CPU until reset.
*/

use crate::bus::Bus;
use crate::cpu::addressing::addr_implicit;
use crate::cpu::regs::CpuRegs;

use crate::cpu::dispatch::illegal::JAM_OPCODES;
use crate::cpu::execute::{dex, dey, inx, iny};

/// Execute one instruction using the match-based fallback dispatcher
/// (post-interrupt / DMA already handled by the orchestrator).
/// Returns the total cycles consumed.
pub(crate) fn step<C: CpuRegs>(cpu: &mut C, bus: &mut Bus) -> u32 {
    let before = bus.total_ticks();

    let opcode = bus.cpu_read(cpu.pc());
    cpu.advance_pc_one();

    if super::load_store::handle(opcode, cpu, bus)
        || super::logical::handle(opcode, cpu, bus)
        || super::arithmetic::handle(opcode, cpu, bus)
        || super::compare::handle(opcode, cpu, bus)
        || super::branches::handle(opcode, cpu, bus)
        || super::rmw::handle(opcode, cpu, bus)
        || super::control_flow::handle(opcode, cpu, bus)
        || super::misc::handle(opcode, cpu, bus)
        || super::illegal::handle(opcode, cpu, bus)
    {
        return (bus.total_ticks() - before) as u32;
    }

    match opcode {
        0xE8 => {
            addr_implicit(cpu, bus);
            inx(cpu)
        }
        0xC8 => {
            addr_implicit(cpu, bus);
            iny(cpu)
        }
        0xCA => {
            addr_implicit(cpu, bus);
            dex(cpu)
        }
        0x88 => {
            addr_implicit(cpu, bus);
            dey(cpu)
        }
        0xEA => addr_implicit(cpu, bus), // NOP: dummy read only
        _ if JAM_OPCODES.contains(&opcode) => cpu.set_halted(true),
        _ => cpu.set_halted(true),
    }

    (bus.total_ticks() - before) as u32
}
