//! The one-shot commands: read JSON in, write JSON out

use std::io::{Read, Write};

use leafcodec::{codec, verify::verify_proof, TreeExport, TypedValue};
use tracing::info;

use crate::errors::Result;

/// Salt a JSON list of rows, and write the resulting tree export
pub fn encode(mut input: impl Read, mut output: impl Write) -> Result<()> {
    let rows: Vec<TypedValue> = serde_json::from_reader(&mut input)?;
    let export = TreeExport::build(codec::assign_salts(rows))?;
    info!(root = %export.root, rows = export.values.len(), "encoded rows");

    serde_json::to_writer_pretty(&mut output, &export)?;
    writeln!(output)?;
    Ok(())
}

/// Prove rows of an exported tree, defaulting to its checked rows
pub fn prove(
    mut input: impl Read,
    indices: Option<&[usize]>,
    mut output: impl Write,
) -> Result<()> {
    let mut json = String::new();
    input.read_to_string(&mut json)?;

    let export = TreeExport::from_json(&json)?;
    let indices = indices.map_or_else(|| export.checked_indices(), <[usize]>::to_vec);
    let proof = export.prove(&indices)?;

    serde_json::to_writer_pretty(&mut output, &proof)?;
    writeln!(output)?;
    Ok(())
}

/// Verify a JSON proof against `root`, writing the outcome and the proven leaves
///
/// A rejected proof is reported and then returned as an error, so the process exits unsuccessfully
pub fn verify(root: &str, mut input: impl Read, mut output: impl Write) -> Result<()> {
    let mut json = String::new();
    input.read_to_string(&mut json)?;

    match verify_proof(root, &json) {
        Ok(leaves) => {
            writeln!(output, "Verified: true")?;
            serde_json::to_writer_pretty(&mut output, &leaves)?;
            writeln!(output)?;
            Ok(())
        }
        Err(err) => {
            writeln!(output, "Verified: false")?;
            Err(err.into())
        }
    }
}
