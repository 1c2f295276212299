//! Static x86 register table: name lookup, bit-width, opcode-index, and
//! bit-mode/extension gating.
//!
//! The table is built once (see `registers()`) rather than written out as
//! 128 `const` entries, since the extended `r8..r31` family in each width
//! is entirely mechanical; the eight legacy register families are listed
//! by hand because each has its own index/width-support quirks.

use std::str::FromStr;
use std::sync::OnceLock;

/// x86 processor operating width. Governs default operand size and which
/// registers are legal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum BitMode {
    #[strum(serialize = "16")]
    Bits16,
    #[strum(serialize = "32")]
    Bits32,
    #[strum(serialize = "64")]
    Bits64,
}

impl BitMode {
    pub fn from_number(n: u64) -> Option<Self> {
        match n {
            16 => Some(BitMode::Bits16),
            32 => Some(BitMode::Bits32),
            64 => Some(BitMode::Bits64),
            _ => None,
        }
    }
}

/// Register storage width, independent of `BitMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterSize {
    Bits8,
    Bits16,
    Bits32,
    Bits64,
}

impl RegisterSize {
    pub fn byte_width(self) -> usize {
        match self {
            RegisterSize::Bits8 => 1,
            RegisterSize::Bits16 => 2,
            RegisterSize::Bits32 => 4,
            RegisterSize::Bits64 => 8,
        }
    }
}

/// A CPU feature a register requires beyond plain long mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CpuExtension {
    /// Intel APX: extends the general-purpose register file to r16-r31.
    Apx,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumString, strum::Display)]
#[strum(ascii_case_insensitive)]
pub enum Register {
    Al,
    Cl,
    Dl,
    Bl,
    Ah,
    Ch,
    Dh,
    Bh,
    Sil,
    Dil,
    Bpl,
    Spl,

    Ax,
    Cx,
    Dx,
    Bx,

    Eax,
    Ecx,
    Edx,
    Ebx,
    Esi,
    Edi,
    Ebp,
    Esp,

    Rax,
    Rcx,
    Rdx,
    Rbx,
    Rsi,
    Rdi,
    Rbp,
    Rsp,

    R8B,
    R9B,
    R10B,
    R11B,
    R12B,
    R13B,
    R14B,
    R15B,
    R16B,
    R17B,
    R18B,
    R19B,
    R20B,
    R21B,
    R22B,
    R23B,
    R24B,
    R25B,
    R26B,
    R27B,
    R28B,
    R29B,
    R30B,
    R31B,
    R8W,
    R9W,
    R10W,
    R11W,
    R12W,
    R13W,
    R14W,
    R15W,
    R16W,
    R17W,
    R18W,
    R19W,
    R20W,
    R21W,
    R22W,
    R23W,
    R24W,
    R25W,
    R26W,
    R27W,
    R28W,
    R29W,
    R30W,
    R31W,
    R8D,
    R9D,
    R10D,
    R11D,
    R12D,
    R13D,
    R14D,
    R15D,
    R16D,
    R17D,
    R18D,
    R19D,
    R20D,
    R21D,
    R22D,
    R23D,
    R24D,
    R25D,
    R26D,
    R27D,
    R28D,
    R29D,
    R30D,
    R31D,
    R8,
    R9,
    R10,
    R11,
    R12,
    R13,
    R14,
    R15,
    R16,
    R17,
    R18,
    R19,
    R20,
    R21,
    R22,
    R23,
    R24,
    R25,
    R26,
    R27,
    R28,
    R29,
    R30,
    R31,
}

#[derive(Debug, Clone, Copy)]
pub struct RegisterInfo {
    pub register: Register,
    pub size: RegisterSize,
    /// Position in an opcode-plus-index encoding (`0xB0 + index`), when the
    /// register participates in one. APX registers (r16-r31) don't use this
    /// 3-bit scheme, so they carry `None`.
    pub index: Option<u8>,
    pub supports_16bit: bool,
    pub supports_32bit: bool,
    pub supports_64bit: bool,
    pub extensions: &'static [CpuExtension],
}

fn legacy_registers() -> Vec<RegisterInfo> {
    use Register::*;
    use RegisterSize::*;
    vec![
        // 8-bit legacy, addressable in any bit mode.
        RegisterInfo { register: Al, size: Bits8, index: Some(0), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Cl, size: Bits8, index: Some(1), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Dl, size: Bits8, index: Some(2), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Bl, size: Bits8, index: Some(3), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Ah, size: Bits8, index: Some(4), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Ch, size: Bits8, index: Some(5), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Dh, size: Bits8, index: Some(6), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Bh, size: Bits8, index: Some(7), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        // REX-only low-byte registers: only addressable once a REX prefix
        // is legal, i.e. 64-bit mode.
        RegisterInfo { register: Spl, size: Bits8, index: Some(4), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Bpl, size: Bits8, index: Some(5), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Sil, size: Bits8, index: Some(6), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Dil, size: Bits8, index: Some(7), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        // 16-bit legacy.
        RegisterInfo { register: Ax, size: Bits16, index: Some(0), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Cx, size: Bits16, index: Some(1), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Dx, size: Bits16, index: Some(2), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Bx, size: Bits16, index: Some(3), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        // 32-bit legacy; usable even in 16-bit mode behind a 0x66 prefix.
        RegisterInfo { register: Eax, size: Bits32, index: Some(0), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Ecx, size: Bits32, index: Some(1), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Edx, size: Bits32, index: Some(2), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Ebx, size: Bits32, index: Some(3), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Esi, size: Bits32, index: Some(4), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Edi, size: Bits32, index: Some(5), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Ebp, size: Bits32, index: Some(6), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Esp, size: Bits32, index: Some(7), supports_16bit: true, supports_32bit: true, supports_64bit: true, extensions: &[] },
        // 64-bit legacy: only meaningful in 64-bit mode.
        RegisterInfo { register: Rax, size: Bits64, index: Some(0), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Rcx, size: Bits64, index: Some(1), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Rdx, size: Bits64, index: Some(2), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Rbx, size: Bits64, index: Some(3), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Rsi, size: Bits64, index: Some(4), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Rdi, size: Bits64, index: Some(5), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Rbp, size: Bits64, index: Some(6), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Rsp, size: Bits64, index: Some(7), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
    ]
}

fn extended_registers() -> Vec<RegisterInfo> {
    use Register::*;
    use RegisterSize::*;
    vec![
        RegisterInfo { register: Register::R8B, size: RegisterSize::Bits8, index: Some(0), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R9B, size: RegisterSize::Bits8, index: Some(1), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R10B, size: RegisterSize::Bits8, index: Some(2), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R11B, size: RegisterSize::Bits8, index: Some(3), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R12B, size: RegisterSize::Bits8, index: Some(4), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R13B, size: RegisterSize::Bits8, index: Some(5), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R14B, size: RegisterSize::Bits8, index: Some(6), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R15B, size: RegisterSize::Bits8, index: Some(7), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R16B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R17B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R18B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R19B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R20B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R21B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R22B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R23B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R24B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R25B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R26B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R27B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R28B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R29B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R30B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R31B, size: RegisterSize::Bits8, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R8W, size: RegisterSize::Bits16, index: Some(0), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R9W, size: RegisterSize::Bits16, index: Some(1), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R10W, size: RegisterSize::Bits16, index: Some(2), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R11W, size: RegisterSize::Bits16, index: Some(3), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R12W, size: RegisterSize::Bits16, index: Some(4), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R13W, size: RegisterSize::Bits16, index: Some(5), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R14W, size: RegisterSize::Bits16, index: Some(6), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R15W, size: RegisterSize::Bits16, index: Some(7), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R16W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R17W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R18W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R19W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R20W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R21W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R22W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R23W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R24W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R25W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R26W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R27W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R28W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R29W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R30W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R31W, size: RegisterSize::Bits16, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R8D, size: RegisterSize::Bits32, index: Some(0), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R9D, size: RegisterSize::Bits32, index: Some(1), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R10D, size: RegisterSize::Bits32, index: Some(2), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R11D, size: RegisterSize::Bits32, index: Some(3), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R12D, size: RegisterSize::Bits32, index: Some(4), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R13D, size: RegisterSize::Bits32, index: Some(5), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R14D, size: RegisterSize::Bits32, index: Some(6), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R15D, size: RegisterSize::Bits32, index: Some(7), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R16D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R17D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R18D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R19D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R20D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R21D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R22D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R23D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R24D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R25D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R26D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R27D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R28D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R29D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R30D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R31D, size: RegisterSize::Bits32, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R8, size: RegisterSize::Bits64, index: Some(0), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R9, size: RegisterSize::Bits64, index: Some(1), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R10, size: RegisterSize::Bits64, index: Some(2), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R11, size: RegisterSize::Bits64, index: Some(3), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R12, size: RegisterSize::Bits64, index: Some(4), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R13, size: RegisterSize::Bits64, index: Some(5), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R14, size: RegisterSize::Bits64, index: Some(6), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R15, size: RegisterSize::Bits64, index: Some(7), supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[] },
        RegisterInfo { register: Register::R16, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R17, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R18, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R19, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R20, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R21, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R22, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R23, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R24, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R25, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R26, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R27, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R28, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R29, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R30, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
        RegisterInfo { register: Register::R31, size: RegisterSize::Bits64, index: None, supports_16bit: false, supports_32bit: false, supports_64bit: true, extensions: &[CpuExtension::Apx] },
    ]
}

fn registers() -> &'static [RegisterInfo] {
    static TABLE: OnceLock<Vec<RegisterInfo>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut all = legacy_registers();
        all.extend(extended_registers());
        all
    })
}

fn info_for(register: Register) -> &'static RegisterInfo {
    registers()
        .iter()
        .find(|info| info.register == register)
        .expect("every Register variant has a table entry")
}

/// Case-insensitive lookup by source-text name. Unknown names return `None`.
pub fn resolve_register(name: &str) -> Option<Register> {
    Register::from_str(name).ok()
}

pub fn supports_register(name: &str) -> bool {
    resolve_register(name).is_some()
}

pub fn register_size(register: Register) -> RegisterSize {
    info_for(register).size
}

pub fn register_index(register: Register) -> Option<u8> {
    info_for(register).index
}

pub fn supported_by_bit_mode(register: Register, mode: BitMode) -> bool {
    let info = info_for(register);
    match mode {
        BitMode::Bits16 => info.supports_16bit,
        BitMode::Bits32 => info.supports_32bit,
        BitMode::Bits64 => info.supports_64bit,
    }
}

pub fn required_extensions(register: Register) -> &'static [CpuExtension] {
    info_for(register).extensions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_case_insensitively() {
        assert_eq!(resolve_register("AX"), Some(Register::Ax));
        assert_eq!(resolve_register("ax"), Some(Register::Ax));
        assert_eq!(resolve_register("Ax"), Some(Register::Ax));
    }

    #[test]
    fn unknown_name_does_not_resolve() {
        assert_eq!(resolve_register("zmm0"), None);
        assert!(!supports_register("zmm0"));
    }

    #[test]
    fn eax_is_legal_in_every_bit_mode() {
        let eax = Register::Eax;
        assert!(supported_by_bit_mode(eax, BitMode::Bits16));
        assert!(supported_by_bit_mode(eax, BitMode::Bits32));
        assert!(supported_by_bit_mode(eax, BitMode::Bits64));
    }

    #[test]
    fn extended_low_registers_require_64_bit_mode() {
        let r8b = Register::R8B;
        assert!(!supported_by_bit_mode(r8b, BitMode::Bits16));
        assert!(!supported_by_bit_mode(r8b, BitMode::Bits32));
        assert!(supported_by_bit_mode(r8b, BitMode::Bits64));
    }

    #[test]
    fn apx_registers_require_64_bit_mode_and_carry_the_extension() {
        let r16 = Register::R16;
        assert!(supported_by_bit_mode(r16, BitMode::Bits64));
        assert!(!supported_by_bit_mode(r16, BitMode::Bits16));
        assert_eq!(info_for(r16).extensions, &[CpuExtension::Apx]);
        assert_eq!(register_index(r16), None);
    }

    #[test]
    fn base_registers_have_opcode_indices_zero_through_seven() {
        for (register, expected) in [
            (Register::Al, 0u8),
            (Register::Cl, 1),
            (Register::Dl, 2),
            (Register::Bl, 3),
            (Register::Ah, 4),
            (Register::Ch, 5),
            (Register::Dh, 6),
            (Register::Bh, 7),
        ] {
            assert_eq!(register_index(register), Some(expected));
        }
    }

    #[test]
    fn register_sizes_match_family() {
        assert_eq!(register_size(Register::Al), RegisterSize::Bits8);
        assert_eq!(register_size(Register::Ax), RegisterSize::Bits16);
        assert_eq!(register_size(Register::Eax), RegisterSize::Bits32);
        assert_eq!(register_size(Register::Rax), RegisterSize::Bits64);
        assert_eq!(register_size(Register::R31), RegisterSize::Bits64);
    }
}
