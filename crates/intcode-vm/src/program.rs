//! Program snapshots

use thiserror::Error;

/// Patch errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("patch address {address} is outside the {len}-cell program")]
    OutOfBounds { address: usize, len: usize },
}

/// Copy `program` with some cells overwritten
///
/// Used to set up inputs that live in memory rather than on a channel,
/// such as the noun/verb pair at addresses 1 and 2.
pub fn patch(program: &[i64], cells: &[(usize, i64)]) -> Result<Vec<i64>, PatchError> {
    let mut patched = program.to_vec();
    for &(address, value) in cells {
        let cell = patched.get_mut(address).ok_or(PatchError::OutOfBounds {
            address,
            len: program.len(),
        })?;
        *cell = value;
    }
    Ok(patched)
}
