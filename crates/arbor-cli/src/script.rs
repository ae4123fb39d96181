//! Operation-script parsing.
//!
//! Script format: the first line carries the tree order, the second the
//! number of operations, then one operation per line:
//!
//! ```text
//! I <key>, <value>    insert
//! R <key>             remove
//! B <key>             search
//! ```
//!
//! Any other opcode is preserved as [`Op::Unknown`] so the driver can
//! report it in the output file.

use anyhow::{bail, Context, Result};

/// One script operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Insert { key: i32, value: i32 },
    Remove { key: i32 },
    Search { key: i32 },
    Unknown { opcode: char },
}

/// A parsed operation script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    /// Tree order from the first line.
    pub order: usize,
    /// Operations in script order.
    pub ops: Vec<Op>,
}

/// Parses a whole script file.
pub fn parse_script(input: &str) -> Result<Script> {
    let mut lines = input.lines().map(str::trim).filter(|line| !line.is_empty());

    let order: usize = lines
        .next()
        .context("script is missing the order line")?
        .parse()
        .context("invalid order line")?;
    let count: usize = lines
        .next()
        .context("script is missing the operation count line")?
        .parse()
        .context("invalid operation count line")?;

    let mut ops = Vec::with_capacity(count);
    for line in lines.take(count) {
        ops.push(parse_op(line).with_context(|| format!("bad operation line {:?}", line))?);
    }
    if ops.len() < count {
        bail!("script declares {} operations but contains {}", count, ops.len());
    }

    Ok(Script { order, ops })
}

fn parse_op(line: &str) -> Result<Op> {
    let mut chars = line.chars();
    let opcode = chars.next().context("empty operation line")?;
    let rest = chars.as_str().trim();

    match opcode {
        'I' => {
            let (key, value) = rest
                .split_once(',')
                .context("insert needs 'I <key>, <value>'")?;
            Ok(Op::Insert {
                key: key.trim().parse().context("invalid insert key")?,
                value: value.trim().parse().context("invalid insert value")?,
            })
        }
        'R' => Ok(Op::Remove {
            key: rest.parse().context("invalid remove key")?,
        }),
        'B' => Ok(Op::Search {
            key: rest.parse().context("invalid search key")?,
        }),
        other => Ok(Op::Unknown { opcode: other }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_script() {
        let script = parse_script("4\n3\nI 10, 100\nB 10\nR 10\n").unwrap();
        assert_eq!(script.order, 4);
        assert_eq!(
            script.ops,
            vec![
                Op::Insert {
                    key: 10,
                    value: 100
                },
                Op::Search { key: 10 },
                Op::Remove { key: 10 },
            ]
        );
    }

    #[test]
    fn test_parse_negative_keys() {
        let script = parse_script("3\n2\nI -5, -50\nB -5\n").unwrap();
        assert_eq!(
            script.ops[0],
            Op::Insert {
                key: -5,
                value: -50
            }
        );
    }

    #[test]
    fn test_unknown_opcode_is_preserved() {
        let script = parse_script("3\n1\nX 42\n").unwrap();
        assert_eq!(script.ops, vec![Op::Unknown { opcode: 'X' }]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let script = parse_script("4\n\n2\n\nI 1, 1\n\nR 1\n").unwrap();
        assert_eq!(script.ops.len(), 2);
    }

    #[test]
    fn test_missing_operations_rejected() {
        assert!(parse_script("4\n3\nI 1, 1\n").is_err());
    }

    #[test]
    fn test_extra_lines_ignored() {
        let script = parse_script("4\n1\nB 1\nB 2\nB 3\n").unwrap();
        assert_eq!(script.ops, vec![Op::Search { key: 1 }]);
    }

    #[test]
    fn test_malformed_insert_rejected() {
        assert!(parse_script("4\n1\nI 10\n").is_err());
        assert!(parse_script("4\n1\nI x, 1\n").is_err());
    }

    #[test]
    fn test_missing_header_rejected() {
        assert!(parse_script("").is_err());
        assert!(parse_script("4\n").is_err());
        assert!(parse_script("not a number\n1\nB 1\n").is_err());
    }
}
