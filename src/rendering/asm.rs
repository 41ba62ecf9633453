//! Assembler source formatting.
//!
//! Converters emit `dc.w` / `dc.l` / `dcb.l` data directives for 68k
//! assemblers, with `$` hex literals and `%` binary literals.

/// A converted image that can be rendered as assembler data.
pub trait AsmSource {
    fn to_asm(&self) -> String;
}

/// `$XXX` literals for 12-bit color values.
pub fn hex12(value: u16) -> String {
    format!("${:03X}", value)
}

/// `$XXXX` word literal.
pub fn hex16(value: u16) -> String {
    format!("${:04X}", value)
}

/// `$XXXXXXXX` longword literal.
pub fn hex32(value: u32) -> String {
    format!("${:08X}", value)
}

/// `%` binary word literal, all 16 digits.
pub fn bin16(value: u16) -> String {
    format!("%{:016b}", value)
}

/// One directive line: two tabs, the mnemonic, a separator, the operands.
///
/// `separator` is a single tab for compact data, or spaces plus a tab where
/// the mnemonic column is padded.
pub fn directive(mnemonic: &str, separator: &str, operands: &[String]) -> String {
    format!("\t\t{}{}{}\n", mnemonic, separator, operands.join(","))
}
