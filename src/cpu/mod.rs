/*!
cpu::mod - Public façade for the 6502 CPU core.

Submodules:

    state.rs      - Core CPU state (registers, flags) + constructors.
    regs.rs       - `CpuRegs` trait giving dispatch/execute code a single
                    generic interface over register/flag access.
    addressing.rs - Addressing mode enum & operand resolution helpers.
    execute.rs    - Instruction semantic helpers (ALU, stack, RMW, branch).
    dispatch/     - Per-opcode-family handlers plus the step orchestrator
                    (DMA stall / NMI / IRQ / fallback dispatch).
    core/         - `Cpu`, the canonical façade wrapping `CpuState`.
    table.rs      - Feature-gated (`table_dispatch`) experimental opcode
                    table; disabled by default, kept as a secondary path.

Only `Cpu` (and the flag constants re-exported from `state`) make up the
stable public surface. Everything else is an internal implementation
detail and may be reshuffled without notice.

Usage:
```rust
use arness::cpu::Cpu;

let mut cpu = Cpu::new();
cpu.reset(&mut bus);
cpu.step(&mut bus);
```
*/

pub mod addressing;
pub mod core;
pub(crate) mod dispatch;
pub mod execute;
pub mod regs;
pub mod state;
pub(crate) mod table;

pub use core::Cpu;
pub use state::{BREAK, CARRY, DECIMAL, IRQ_DISABLE, NEGATIVE, OVERFLOW, UNUSED, ZERO};
