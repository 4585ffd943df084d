/*!
Cartridge header parser: iNES 1.0 and NES 2.0, with Mapper construction.

Features:
- Parse iNES (v1) and NES 2.0 headers from bytes or a file path.
- Extract PRG ROM, CHR (ROM or allocate CHR RAM when CHR size == 0), PRG RAM/NVRAM size.
- Determine mirroring, battery-backed RAM, mapper ID + submapper, console type, CPU/PPU timing.
- Construct a concrete Mapper and delegate CPU/PPU mapping through it.

Notes:
- NES 2.0 is detected via header[7] bits 2-3 == 0b10; iNES 1.0 otherwise.
- PRG RAM allocation policy (iNES 1.0 only; NES 2.0 uses explicit shift-counts):
  - If header byte 8 (PRG-RAM size in 8 KiB units) is 0, allocate 8 KiB by convention.
  - Otherwise allocate size_in_units * 8 KiB.
- NROM mapping rules (via Mapper):
  - 16 KiB PRG (NROM-128): $8000-$BFFF maps to the single 16 KiB bank; $C000-$FFFF mirrors it.
  - 32 KiB PRG (NROM-256): $8000-$FFFF maps directly to 32 KiB.
*/

use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::mapper::{Mapper, Nrom};
use crate::mappers::{Cnrom, Mmc1, Mmc3};

const HEADER_LEN: usize = 16;
const TRAINER_LEN: usize = 512;
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mirroring {
    Horizontal,
    Vertical,
    FourScreen,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InesVersion {
    Ines1,
    Ines2,
}

/// NES 2.0 console type (header byte 7 bits 0-1, refined by byte 13 when extended).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ConsoleType {
    Nes,
    VsSystem { vs_ppu: u8, vs_hardware: u8 },
    Playchoice10,
    Extended(u8),
}

/// NES 2.0 CPU/PPU timing mode (header byte 12 bits 0-1).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimingMode {
    Ntsc,
    Pal,
    MultiRegion,
    Dendy,
}

/// Error taxonomy for cartridge header parsing. Parsing is fail-closed: the
/// first error encountered aborts the parse, and the caller must not start
/// the CPU with a partially-built cartridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderError {
    NullPath,
    InvalidFileSize,
    RomTooLarge,
    UnsupportedFormat,
    InvalidMiscRomAreaSize,
    ArithmeticOverflow,
}

impl fmt::Display for HeaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderError::NullPath => write!(f, "no ROM path was supplied"),
            HeaderError::InvalidFileSize => write!(f, "file too small to contain a valid header/body"),
            HeaderError::RomTooLarge => write!(f, "ROM exceeds the maximum accepted file size (5 MiB)"),
            HeaderError::UnsupportedFormat => write!(f, "missing NES<1A> magic or unrecognized header"),
            HeaderError::InvalidMiscRomAreaSize => {
                write!(f, "computed miscellaneous-ROM area size is negative or inconsistent")
            }
            HeaderError::ArithmeticOverflow => write!(f, "NES 2.0 exponent-mode size computation overflowed"),
        }
    }
}

impl std::error::Error for HeaderError {}

pub struct Cartridge {
    // Mapper trait object; interior mutability to allow read methods to delegate.
    pub mapper: RefCell<Box<dyn Mapper>>,

    // Metadata
    mapper_id: u16,
    submapper: u8,
    mirroring: Mirroring,
    battery: bool,
    has_trainer: bool,
    pub ines_version: InesVersion,
    console_type: ConsoleType,
    timing: TimingMode,

    // Size metadata for convenience accessors
    prg_rom_len: usize,
    chr_len: usize,
    prg_ram_len: usize,
    prg_nvram_len: usize,
    chr_nvram_len: usize,
    chr_is_ram: bool,
    misc_rom_len: usize,
    misc_rom_count: u8,
    default_expansion_device: u8,
}

impl fmt::Debug for Cartridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cartridge")
            .field("mapper_id", &self.mapper_id)
            .field("submapper", &self.submapper)
            .field("mirroring", &self.mirroring)
            .field("battery", &self.battery)
            .field("has_trainer", &self.has_trainer)
            .field("ines_version", &self.ines_version)
            .field("console_type", &self.console_type)
            .field("timing", &self.timing)
            .field("prg_rom_len", &self.prg_rom_len)
            .field("chr_len", &self.chr_len)
            .field("prg_ram_len", &self.prg_ram_len)
            .field("prg_nvram_len", &self.prg_nvram_len)
            .field("chr_nvram_len", &self.chr_nvram_len)
            .field("chr_is_ram", &self.chr_is_ram)
            .field("misc_rom_len", &self.misc_rom_len)
            .finish()
    }
}

/// Decode an NES 2.0 size nibble-pair into bytes. `lsb` is the iNES-style
/// 8-bit unit count; `msb_nibble` is the 4-bit extension from header[9].
/// When `msb_nibble == 0xF`, exponent mode applies: `lsb` decomposes as
/// `exponent = bits 2..7`, `multiplier = 2*(bits 0..1)+1`,
/// size = `(1 << exponent) * multiplier`.
fn decode_nes2_rom_size(lsb: u8, msb_nibble: u8, unit: usize) -> Result<usize, HeaderError> {
    if msb_nibble == 0x0F {
        let exponent = (lsb >> 2) as u32;
        let multiplier = 2usize * ((lsb & 0x03) as usize) + 1;
        let base: usize = 1usize
            .checked_shl(exponent)
            .ok_or(HeaderError::ArithmeticOverflow)?;
        base.checked_mul(multiplier)
            .ok_or(HeaderError::ArithmeticOverflow)
    } else {
        let combined = ((msb_nibble as u16) << 8) | lsb as u16;
        (combined as usize)
            .checked_mul(unit)
            .ok_or(HeaderError::ArithmeticOverflow)
    }
}

/// Decode an NES 2.0 RAM/NVRAM shift-count nibble into bytes: `shift == 0`
/// means no RAM of that kind is present; otherwise `64 << shift`.
fn decode_shift_count(shift: u8) -> usize {
    if shift == 0 {
        0
    } else {
        64usize << (shift as u32)
    }
}

impl Cartridge {
    // -------------- Construction --------------

    /// Load a cartridge from raw iNES/NES 2.0 bytes and construct a Mapper.
    pub fn from_ines_bytes(data: &[u8]) -> Result<Self, HeaderError> {
        if data.len() > MAX_FILE_SIZE {
            return Err(HeaderError::RomTooLarge);
        }
        if data.len() < HEADER_LEN {
            return Err(HeaderError::InvalidFileSize);
        }
        if &data[0..4] != b"NES\x1A" {
            return Err(HeaderError::UnsupportedFormat);
        }

        let flags6 = data[6];
        let flags7 = data[7];
        let is_ines2 = (flags7 & 0x0C) == 0x08;
        let version = if is_ines2 {
            InesVersion::Ines2
        } else {
            InesVersion::Ines1
        };

        // Mirroring and battery/trainer flags (shared by both formats).
        let four_screen = (flags6 & 0b0000_1000) != 0;
        let vertical_mirroring = (flags6 & 0b0000_0001) != 0;
        let mirroring = if four_screen {
            Mirroring::FourScreen
        } else if vertical_mirroring {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };
        let battery = (flags6 & 0b0000_0010) != 0;
        let has_trainer = (flags6 & 0b0000_0100) != 0;

        let mapper_low = (flags6 >> 4) as u16;
        let mapper_mid = (flags7 & 0xF0) as u16;

        let (
            mapper_id,
            submapper,
            prg_rom_len,
            chr_len_declared,
            prg_ram_len,
            prg_nvram_len,
            chr_nvram_len,
            console_type,
            timing,
            misc_rom_count,
            default_expansion_device,
        ) = if is_ines2 {
            let byte8 = data.get(8).copied().unwrap_or(0);
            let byte9 = data.get(9).copied().unwrap_or(0);
            let byte10 = data.get(10).copied().unwrap_or(0);
            let byte11 = data.get(11).copied().unwrap_or(0);
            let byte12 = data.get(12).copied().unwrap_or(0);
            let byte13 = data.get(13).copied().unwrap_or(0);
            let byte14 = data.get(14).copied().unwrap_or(0);
            let byte15 = data.get(15).copied().unwrap_or(0);

            let mapper_high = ((byte8 & 0x0F) as u16) << 8;
            let mapper_id = mapper_high | mapper_mid | mapper_low;
            let submapper = byte8 >> 4;

            let prg_rom_msb = byte9 & 0x0F;
            let chr_rom_msb = byte9 >> 4;
            let prg_rom_len = decode_nes2_rom_size(data[4], prg_rom_msb, 16 * 1024)?;
            let chr_rom_len = decode_nes2_rom_size(data[5], chr_rom_msb, 8 * 1024)?;

            let prg_ram_len = decode_shift_count(byte10 & 0x0F);
            let prg_nvram_len = decode_shift_count(byte10 >> 4);
            let chr_ram_len = decode_shift_count(byte11 & 0x0F);
            let chr_nvram_len = decode_shift_count(byte11 >> 4);

            let timing = match byte12 & 0x03 {
                0 => TimingMode::Ntsc,
                1 => TimingMode::Pal,
                2 => TimingMode::MultiRegion,
                _ => TimingMode::Dendy,
            };

            let console_type = match flags7 & 0x03 {
                0 => ConsoleType::Nes,
                1 => ConsoleType::VsSystem {
                    vs_ppu: byte13 & 0x0F,
                    vs_hardware: byte13 >> 4,
                },
                2 => ConsoleType::Playchoice10,
                _ => ConsoleType::Extended(byte13),
            };

            let misc_rom_count = byte14 & 0x03;
            let default_expansion_device = byte15 & 0x3F;

            // CHR: NES 2.0 distinguishes declared CHR-ROM size from CHR-RAM
            // via the ROM size field; CHR-RAM presence is signalled purely
            // by the separate RAM shift-count byte.
            let (chr_len, chr_is_ram_hint) = if chr_rom_len == 0 {
                (chr_ram_len.max(8 * 1024), true)
            } else {
                (chr_rom_len, false)
            };
            let _ = chr_is_ram_hint; // informational; chr_is_ram computed below from file layout.

            (
                mapper_id,
                submapper,
                prg_rom_len,
                chr_len,
                prg_ram_len,
                prg_nvram_len,
                chr_nvram_len,
                console_type,
                timing,
                misc_rom_count,
                default_expansion_device,
            )
        } else {
            let prg_rom_16k_units = data[4] as usize;
            let chr_rom_8k_units = data[5] as usize;
            let prg_ram_8k_units = data.get(8).copied().unwrap_or(0) as usize;

            let mapper_id = mapper_mid | mapper_low;
            let prg_rom_len = prg_rom_16k_units
                .checked_mul(16 * 1024)
                .ok_or(HeaderError::ArithmeticOverflow)?;
            let chr_len = if chr_rom_8k_units == 0 {
                8 * 1024
            } else {
                chr_rom_8k_units
                    .checked_mul(8 * 1024)
                    .ok_or(HeaderError::ArithmeticOverflow)?
            };
            let prg_ram_len = if prg_ram_8k_units == 0 {
                8 * 1024
            } else {
                prg_ram_8k_units
                    .checked_mul(8 * 1024)
                    .ok_or(HeaderError::ArithmeticOverflow)?
            };

            (
                mapper_id,
                0u8,
                prg_rom_len,
                chr_len,
                prg_ram_len,
                0usize,
                0usize,
                ConsoleType::Nes,
                TimingMode::Ntsc,
                0u8,
                0u8,
            )
        };

        // Offset to PRG ROM data
        let mut offset = HEADER_LEN;
        if has_trainer {
            if data.len() < offset + TRAINER_LEN {
                return Err(HeaderError::InvalidFileSize);
            }
            offset += TRAINER_LEN;
        }

        if data.len() < offset + prg_rom_len {
            return Err(HeaderError::InvalidFileSize);
        }
        let prg_rom = data[offset..offset + prg_rom_len].to_vec();
        offset += prg_rom_len;

        // CHR is RAM only when the declared size is 0 for iNES 1.0, or when
        // the file has no bytes remaining for a declared NES 2.0 CHR-ROM
        // size (exponent-mode CHR-RAM entries never have file backing).
        let bytes_remaining_for_chr = data.len().saturating_sub(offset);
        let chr_is_ram = chr_len_declared == 0 || bytes_remaining_for_chr < chr_len_declared;
        let chr_len = if chr_is_ram { chr_len_declared.max(8 * 1024) } else { chr_len_declared };

        let chr = if chr_is_ram {
            vec![0; chr_len]
        } else {
            if data.len() < offset + chr_len {
                return Err(HeaderError::InvalidFileSize);
            }
            data[offset..offset + chr_len].to_vec()
        };

        // Miscellaneous ROM area: whatever bytes remain after PRG+CHR.
        let consumed = HEADER_LEN
            + if has_trainer { TRAINER_LEN } else { 0 }
            + prg_rom_len
            + if chr_is_ram { 0 } else { chr_len };
        if data.len() < consumed {
            return Err(HeaderError::InvalidMiscRomAreaSize);
        }
        let misc_rom_len = data.len() - consumed;
        if misc_rom_count == 0 && misc_rom_len != 0 && is_ines2 {
            return Err(HeaderError::InvalidMiscRomAreaSize);
        }

        let mapper: Box<dyn Mapper> = match mapper_id {
            0 => Box::new(Nrom::new(prg_rom, chr, chr_is_ram, prg_ram_len)),
            1 => {
                let prg_ram = vec![0; prg_ram_len];
                Box::new(Mmc1::new(prg_rom, prg_ram, chr, chr_is_ram))
            }
            3 => Box::new(Cnrom::new(prg_rom, chr, chr_is_ram)),
            4 => {
                let prg_ram = vec![0; prg_ram_len];
                Box::new(Mmc3::new(prg_rom, prg_ram, chr, chr_is_ram))
            }
            _ => return Err(HeaderError::UnsupportedFormat),
        };

        Ok(Self {
            mapper: RefCell::new(mapper),
            mapper_id,
            submapper,
            mirroring,
            battery,
            has_trainer,
            ines_version: version,
            console_type,
            timing,
            prg_rom_len,
            chr_len,
            prg_ram_len,
            prg_nvram_len,
            chr_nvram_len,
            chr_is_ram,
            misc_rom_len,
            misc_rom_count,
            default_expansion_device,
        })
    }

    /// Load a cartridge from an iNES/NES 2.0 file (.nes).
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, HeaderError> {
        let path_ref = path.as_ref();
        if path_ref.as_os_str().is_empty() {
            return Err(HeaderError::NullPath);
        }
        let bytes = fs::read(path_ref).map_err(|_| HeaderError::InvalidFileSize)?;
        Self::from_ines_bytes(&bytes)
    }

    // -------------- CPU PRG mapping convenience (delegating to Mapper) --------------

    /// Read a byte from PRG ROM space ($8000..=$FFFF) via the mapper.
    pub fn cpu_read_prg_rom(&self, addr: u16) -> u8 {
        self.mapper.borrow_mut().cpu_read(addr)
    }

    /// Writes to PRG ROM space ($8000..=$FFFF), delegated to the mapper (ignored by NROM).
    pub fn cpu_write_prg_rom(&mut self, addr: u16, value: u8) {
        self.mapper.get_mut().cpu_write(addr, value);
    }

    /// Read a byte from PRG RAM space ($6000..=$7FFF) via the mapper.
    /// Normalizes any input address to wrap within the PRG RAM window.
    pub fn cpu_read_prg_ram(&self, addr: u16) -> u8 {
        if self.prg_ram_len == 0 {
            return 0;
        }
        let base = 0x6000u16;
        let rel = (addr as usize).saturating_sub(base as usize);
        let idx = rel % self.prg_ram_len;
        let eff = base.wrapping_add(idx as u16);
        self.mapper.borrow_mut().cpu_read(eff)
    }

    /// Write a byte to PRG RAM space ($6000..=$7FFF) via the mapper.
    /// Normalizes any input address to wrap within the PRG RAM window.
    pub fn cpu_write_prg_ram(&mut self, addr: u16, value: u8) {
        if self.prg_ram_len == 0 {
            return;
        }
        let base = 0x6000u16;
        let rel = (addr as usize).saturating_sub(base as usize);
        let idx = rel % self.prg_ram_len;
        let eff = base.wrapping_add(idx as u16);
        self.mapper.get_mut().cpu_write(eff, value);
    }

    // -------------- Accessors --------------

    pub fn mapper_id(&self) -> u16 {
        self.mapper_id
    }

    pub fn submapper(&self) -> u8 {
        self.submapper
    }

    pub fn mirroring(&self) -> Mirroring {
        self.mirroring
    }

    pub fn battery_backed(&self) -> bool {
        self.battery
    }

    pub fn has_prg_ram(&self) -> bool {
        self.prg_ram_len > 0
    }

    pub fn prg_rom_len(&self) -> usize {
        self.prg_rom_len
    }

    pub fn chr_len(&self) -> usize {
        self.chr_len
    }

    pub fn prg_ram_len(&self) -> usize {
        self.prg_ram_len
    }

    pub fn prg_nvram_len(&self) -> usize {
        self.prg_nvram_len
    }

    pub fn chr_nvram_len(&self) -> usize {
        self.chr_nvram_len
    }

    pub fn console_type(&self) -> ConsoleType {
        self.console_type
    }

    pub fn timing(&self) -> TimingMode {
        self.timing
    }

    pub fn misc_rom_len(&self) -> usize {
        self.misc_rom_len
    }

    pub fn misc_rom_count(&self) -> u8 {
        self.misc_rom_count
    }

    pub fn default_expansion_device(&self) -> u8 {
        self.default_expansion_device
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::build_ines;

    #[test]
    fn parse_simple_nrom_32k_chr8k() {
        let flags6 = 0b0000_0001; // vertical mirroring
        let flags7 = 0u8;
        let data = build_ines(2, 1, flags6, flags7, 1, None);
        let cart = Cartridge::from_ines_bytes(&data).expect("parse");

        assert_eq!(cart.mapper_id(), 0);
        assert_eq!(cart.mirroring(), Mirroring::Vertical);
        assert!(cart.has_prg_ram());
        assert_eq!(cart.prg_rom_len(), 32 * 1024);
        assert_eq!(cart.chr_len(), 8 * 1024);
        assert_eq!(cart.ines_version, InesVersion::Ines1);

        assert_eq!(cart.cpu_read_prg_rom(0x8000), 0xAA);
        assert_eq!(cart.cpu_read_prg_rom(0xFFFF), 0xAA);
    }

    #[test]
    fn parse_nrom_16k_chr_ram() {
        let flags6 = 0b0000_0000; // horizontal
        let flags7 = 0u8;
        let data = build_ines(1, 0, flags6, flags7, 0, None);
        let cart = Cartridge::from_ines_bytes(&data).expect("parse");

        assert_eq!(cart.mapper_id(), 0);
        assert_eq!(cart.mirroring(), Mirroring::Horizontal);
        assert!(cart.has_prg_ram());
        assert_eq!(cart.prg_rom_len(), 16 * 1024);
        assert_eq!(cart.chr_len(), 8 * 1024); // allocated CHR RAM

        let first_half = cart.cpu_read_prg_rom(0x8000);
        let second_half = cart.cpu_read_prg_rom(0xC000);
        assert_eq!(first_half, second_half);
    }

    #[test]
    fn trainer_moves_data_offset() {
        let mut trainer = [0u8; 512];
        for (i, b) in trainer.iter_mut().enumerate() {
            *b = (i & 0xFF) as u8;
        }
        let flags6 = 0b0000_0100; // trainer present
        let flags7 = 0u8;
        let data = build_ines(1, 1, flags6, flags7, 1, Some(&trainer));
        let cart = Cartridge::from_ines_bytes(&data).expect("parse");
        assert_eq!(cart.mapper_id(), 0);
        assert!(cart.has_prg_ram());
    }

    #[test]
    fn prg_ram_read_write() {
        let flags6 = 0u8;
        let flags7 = 0u8;
        let data = build_ines(2, 1, flags6, flags7, 1, None);
        let mut cart = Cartridge::from_ines_bytes(&data).expect("parse");

        cart.cpu_write_prg_ram(0x6000, 0x42);
        assert_eq!(cart.cpu_read_prg_ram(0x6000), 0x42);

        let len = cart.prg_ram_len();
        if len > 0 {
            cart.cpu_write_prg_ram(0x6000 + (len as u16), 0x99);
            assert_eq!(cart.cpu_read_prg_ram(0x6000), 0x99);
        }
    }

    #[test]
    fn bad_magic_rejected() {
        let mut data = build_ines(2, 1, 0, 0, 1, None);
        data[0] = b'X';
        let err = Cartridge::from_ines_bytes(&data).unwrap_err();
        assert_eq!(err, HeaderError::UnsupportedFormat);
    }

    #[test]
    fn oversized_file_rejected() {
        let data = vec![0u8; MAX_FILE_SIZE + 1];
        let err = Cartridge::from_ines_bytes(&data).unwrap_err();
        assert_eq!(err, HeaderError::RomTooLarge);
    }

    #[test]
    fn ines2_exponent_mode_prg_size() {
        // PRG size MSB nibble (header byte 9, low nibble) == 0xF selects
        // exponent mode; the LSB byte (header byte 4) then decomposes into
        // exponent (bits 2..7) and multiplier selector (bits 0..1).
        // exponent=10, multiplier selector=0 (2*0+1=1) -> lsb = 0b00101000 = 0x28.
        let mut data = vec![0u8; HEADER_LEN];
        data[0..4].copy_from_slice(b"NES\x1A");
        data[4] = 0x28; // PRG LSB
        data[5] = 0; // CHR LSB 0 -> CHR RAM
        data[6] = 0;
        data[7] = 0b0000_1000; // NES 2.0 signature, console type NES
        data[8] = 0;
        data[9] = 0x0F; // PRG MSB nibble = 0xF -> combined 12-bit field = 0x0FFF (exponent mode)
        data[10] = 0;
        data[11] = 0;
        data[12] = 0;
        data[13] = 0;
        data[14] = 0;
        data[15] = 0;

        let exponent = 0x28u8 >> 2; // 10
        let multiplier = 2usize * ((0x28u8 & 0x03) as usize) + 1; // 1
        let expected_prg_len = (1usize << exponent) * multiplier; // 1024 * 1

        data.extend(std::iter::repeat(0xAAu8).take(expected_prg_len));

        let cart = Cartridge::from_ines_bytes(&data).expect("parse NES2.0 exponent PRG");
        assert_eq!(cart.ines_version, InesVersion::Ines2);
        assert_eq!(cart.prg_rom_len(), expected_prg_len);
    }

    #[test]
    fn ines2_shift_count_ram_sizes() {
        let mut data = vec![0u8; HEADER_LEN];
        data[0..4].copy_from_slice(b"NES\x1A");
        data[4] = 1; // 1 * 16KiB PRG
        data[5] = 1; // 1 * 8KiB CHR
        data[6] = 0;
        data[7] = 0b0000_1000;
        data[8] = 0;
        data[9] = 0;
        data[10] = 0x07; // PRG-RAM shift = 7 -> 64 << 7 = 8192
        data[11] = 0;
        data[12] = 0;
        data[13] = 0;
        data[14] = 0;
        data[15] = 0;
        data.extend(std::iter::repeat(0xAAu8).take(16 * 1024));
        data.extend(std::iter::repeat(0x55u8).take(8 * 1024));

        let cart = Cartridge::from_ines_bytes(&data).expect("parse NES2.0 shift counts");
        assert_eq!(cart.prg_ram_len(), 64 << 7);
    }

    #[test]
    fn submapper_and_mapper_id_extracted() {
        let mut data = vec![0u8; HEADER_LEN];
        data[0..4].copy_from_slice(b"NES\x1A");
        data[4] = 1;
        data[5] = 1;
        data[6] = 0; // mapper low nibble = 0
        data[7] = 0b0000_1000; // NES 2.0 signature, mapper mid nibble 0
        data[8] = 0x30; // mapper high nibble 0x0, submapper 0x3
        data[9] = 0;
        data[10] = 0;
        data[11] = 0;
        data[12] = 0;
        data[13] = 0;
        data[14] = 0;
        data[15] = 0;
        data.extend(std::iter::repeat(0xAAu8).take(16 * 1024));
        data.extend(std::iter::repeat(0x55u8).take(8 * 1024));

        let cart = Cartridge::from_ines_bytes(&data).expect("parse");
        assert_eq!(cart.mapper_id(), 0);
        assert_eq!(cart.submapper(), 0x3);
    }
}
