//! Pretty printer for operation sequences

use crate::parser::parse;
use antpath_core::{Arg, Operation, ParseError};

/// Serialize operations back into chain text.
///
/// Parsing the output yields the same operations. Spacing is not preserved.
pub fn to_chain(ops: &[Operation], trailing_pipe: bool) -> String {
    let mut output = String::new();

    for (i, op) in ops.iter().enumerate() {
        if i > 0 {
            output.push('|');
        }
        output.push_str(&op.to_string());
    }
    if trailing_pipe && !ops.is_empty() {
        output.push('|');
    }

    output
}

/// One operation per line: index, name, and the argument with its kind.
pub fn format_listing(ops: &[Operation]) -> String {
    let width = ops.len().saturating_sub(1).to_string().len();
    let mut output = String::new();

    for (i, op) in ops.iter().enumerate() {
        output.push_str(&format!("{:>width$}  {}", i, op.name, width = width));
        if let Some(arg) = &op.arg {
            output.push_str(&format!("  {} ({})", arg, arg_kind(arg)));
        }
        output.push('\n');
    }

    output
}

fn arg_kind(arg: &Arg) -> &'static str {
    match arg {
        Arg::Int(_) => "int",
        Arg::Float(_) => "float",
        Arg::Ident(_) => "ident",
        Arg::Member { .. } => "member",
        Arg::Text(_) => "text",
    }
}

/// Parse and re-serialize a chain in canonical form.
pub fn round_trip(source: &str) -> Result<String, ParseError> {
    let sequence = parse(source)?;
    Ok(to_chain(&sequence, false))
}

/// Pretty JSON array of `{ name, arg }` objects.
pub fn to_json(ops: &[Operation]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(ops)
}
