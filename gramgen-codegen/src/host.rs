//! Callbacks from the generator into whoever runs it.

use std::{io, path::Path};

/// Receives the generator's output requests and warnings.
///
/// The generator calls [`open_output`](OutputHost::open_output) once per
/// artifact, writes the complete source text into the returned writer and
/// flushes it. Implementations decide whether the writer is backed by a real
/// file or discards what it is given.
pub trait OutputHost {
    /// Open a writer for the artifact `logical_name`.
    ///
    /// `suggested` is where the generator would put the file relative to the
    /// grammar; hosts are free to ignore it.
    fn open_output(
        &mut self,
        logical_name: &str,
        suggested: &Path,
    ) -> io::Result<Box<dyn io::Write + '_>>;

    /// Report a non-fatal problem found while generating.
    fn add_warning(&mut self, text: &str);
}
