use sha2::{Digest, Sha256};
use tek_core::errors::{ErrorInfo, TekError};

use crate::sequence::render_flags;
use crate::serde::to_canonical_json_bytes;
use crate::sweep::Sweep;

/// Hex SHA-256 over one pass of rendered flag lists.
///
/// Two runs resumed with `--skip` line up only when their fingerprints match.
pub fn fingerprint(sweep: &Sweep) -> Result<String, TekError> {
    if !sweep.is_restartable() {
        return Err(TekError::Sequence(ErrorInfo::new(
            "fingerprint-one-shot",
            "fingerprinting would consume a one-shot sweep",
        )));
    }
    let mut hasher = Sha256::new();
    for assignment in sweep.iter() {
        let bytes = to_canonical_json_bytes(&render_flags(&assignment))?;
        hasher.update(&bytes);
        hasher.update(b"\n");
    }
    Ok(format!("{:x}", hasher.finalize()))
}
