//! Assertion helpers for assembler output.

use pretty_assertions::assert_eq;

/// Operands of a data directive line, `None` for other lines.
pub fn operands<'a>(line: &'a str, mnemonic: &str) -> Option<Vec<&'a str>> {
    let rest = line.strip_prefix("\t\t")?.strip_prefix(mnemonic)?;
    Some(rest.trim_start().split(',').collect())
}

/// Parse the `$XXXXXXXX` operands of a `dc.l` line.
pub fn parse_longs(line: &str) -> Vec<u32> {
    operands(line, "dc.l")
        .unwrap_or_else(|| panic!("not a dc.l line: {line:?}"))
        .iter()
        .map(|op| {
            let hex = op.strip_prefix('$').expect("hex literal");
            u32::from_str_radix(hex, 16).expect("valid hex")
        })
        .collect()
}

/// Assert every line of `code` is a directive with `count` operands.
pub fn assert_operand_counts(code: &str, mnemonic: &str, count: usize) {
    for (n, line) in code.lines().enumerate() {
        let ops = operands(line, mnemonic)
            .unwrap_or_else(|| panic!("line {n} is not {mnemonic}: {line:?}"));
        assert_eq!(ops.len(), count, "operand count on line {n}: {line:?}");
    }
}
